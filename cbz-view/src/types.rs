use cli_table::{format::Justify, Table};

#[derive(Debug, Clone, Table)]
pub struct PageRow {
    #[table(title = "#", justify = "Justify::Right")]
    index: usize,
    #[table(title = "Name")]
    name: String,
}

impl PageRow {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}
