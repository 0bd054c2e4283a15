use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct List {
    /// The cbz (or zip) archive, or image directory, to list the pages of
    pub archive: Utf8PathBuf,
}

#[derive(Parser, Debug)]
pub struct Page {
    /// The cbz (or zip) archive, or image directory, to read from
    pub archive: Utf8PathBuf,
    /// Index of the page, starting from 0
    pub index: usize,
    /// Where to write the page, defaults to the page name in the current directory
    #[clap(short, long)]
    pub output: Option<Utf8PathBuf>,
    /// Print the page as a data URI instead of writing it to a file
    #[clap(long, action, conflicts_with = "output")]
    pub data_uri: bool,
}

#[derive(Parser, Debug)]
pub struct Browse {
    /// The cbz (or zip) archive, or image directory, to browse
    pub archive: Utf8PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Subcommands {
    /// List the pages in reading order
    #[clap(alias = "l")]
    List(List),
    /// Extract a single page
    #[clap(alias = "p")]
    Page(Page),
    /// Step through the pages interactively
    #[clap(alias = "b")]
    Browse(Browse),
}

#[derive(Parser, Debug)]
#[clap(about, author, version)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Subcommands,
}
