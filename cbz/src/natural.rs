//! Natural ("human") ordering of file names.
//!
//! Names are compared on their final path segment only, lowercased, and split
//! into runs of ASCII digits and runs of anything else. Digit runs compare by
//! magnitude so that `page2.png` comes before `page10.png`.

use std::cmp::Ordering;

/// Returns the last segment of a `/` or `\` separated name, ignoring trailing separators
#[must_use]
pub fn base_name(name: &str) -> &str {
    let trimmed = name.trim_end_matches(['/', '\\']);
    trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
}

/// Compares two names in natural reading order.
///
/// Only the base name takes part in the comparison and case is ignored.
/// Numeric runs that only differ by leading zeros (`01` and `1`, `00` and `0`)
/// are equal.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    let a = base_name(a).to_lowercase();
    let b = base_name(b).to_lowercase();

    let mut a_chunks = Chunks::new(&a);
    let mut b_chunks = Chunks::new(&b);

    loop {
        match (a_chunks.next(), b_chunks.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a_chunk), Some(b_chunk)) => {
                let ordering = compare_chunks(a_chunk, b_chunk);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Stable sort in natural order, names comparing equal keep their relative position
pub fn sort<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
}

fn compare_chunks(a: Chunk<'_>, b: Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Digits(a), Chunk::Digits(b)) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (a, b) => a.as_str().cmp(b.as_str()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Chunk<'a> {
    fn as_str(self) -> &'a str {
        match self {
            Self::Digits(s) | Self::Text(s) => s,
        }
    }
}

/// Splits a string into maximal digit and non-digit runs
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;

        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(s: &str) -> Vec<&str> {
        Chunks::new(s).map(Chunk::as_str).collect()
    }

    fn sorted(names: &[&'static str]) -> Vec<&'static str> {
        let mut names = names.to_vec();
        sort(&mut names);
        names
    }

    #[test]
    fn test_chunks() {
        assert_eq!(chunks("page10b.png"), vec!["page", "10", "b.png"]);
        assert_eq!(chunks("001"), vec!["001"]);
        assert_eq!(chunks("a1b22c333"), vec!["a", "1", "b", "22", "c", "333"]);
        assert!(chunks("").is_empty());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("chapter 1/page01.png"), "page01.png");
        assert_eq!(base_name("a\\b\\c.jpg"), "c.jpg");
        assert_eq!(base_name("cover/"), "cover");
        assert_eq!(base_name("plain.gif"), "plain.gif");
        assert_eq!(base_name(""), "");
    }

    #[test]
    fn test_numeric_order() {
        assert_eq!(
            sorted(&["page2.png", "page10.png", "page1.png"]),
            vec!["page1.png", "page2.png", "page10.png"]
        );
    }

    #[test]
    fn test_leading_zeros_are_equal() {
        assert_eq!(compare("img01.jpg", "img1.jpg"), Ordering::Equal);
        assert_eq!(sorted(&["img01.jpg", "img1.jpg"]), vec!["img01.jpg", "img1.jpg"]);
        assert_eq!(sorted(&["img1.jpg", "img01.jpg"]), vec!["img1.jpg", "img01.jpg"]);
    }

    #[test]
    fn test_all_zeros_are_equal() {
        assert_eq!(compare("p00.png", "p0.png"), Ordering::Equal);
        assert_eq!(compare("p000.png", "p0000.png"), Ordering::Equal);
        assert_eq!(compare("p0.png", "p1.png"), Ordering::Less);
    }

    #[test]
    fn test_equal_length_numbers() {
        assert_eq!(compare("p19.png", "p21.png"), Ordering::Less);
        assert_eq!(compare("p0021.png", "p19.png"), Ordering::Greater);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(sorted(&["B.png", "a.png"]), vec!["a.png", "B.png"]);
        assert_eq!(compare("PAGE1.PNG", "page1.png"), Ordering::Equal);
    }

    #[test]
    fn test_directories_are_ignored() {
        assert_eq!(compare("z/page1.png", "a/page2.png"), Ordering::Less);
        assert_eq!(compare("vol2/001.jpg", "vol1/001.jpg"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare("page", "page1"), Ordering::Less);
        assert_eq!(compare("page1", "page1a"), Ordering::Less);
        assert_eq!(compare("", "a"), Ordering::Less);
        assert_eq!(compare("", ""), Ordering::Equal);
    }

    #[test]
    fn test_mixed_chunk_kinds_compare_raw() {
        // '-' < '0' < 'a' in byte order
        assert_eq!(compare("1.png", "a.png"), Ordering::Less);
        assert_eq!(compare("-1.png", "1.png"), Ordering::Less);
        assert_eq!(compare("page_2.png", "page2.png"), Ordering::Greater);
    }

    #[test]
    fn test_strict_weak_order() {
        let names = [
            "", "0", "00", "1", "01", "2", "10", "a", "A", "a1", "a01", "a2", "a10", "a10b",
            "b.png", "B.PNG", "page1.png", "page01.png", "page2.png", "page10.png", "x/page3.png",
            "page-1.png", "page_1.png", "page 1.png", "ä1.png", "z99", "z100",
        ];

        for a in names {
            assert_eq!(compare(a, a), Ordering::Equal, "{a:?} is not equal to itself");

            for b in names {
                assert_eq!(
                    compare(a, b),
                    compare(b, a).reverse(),
                    "{a:?} and {b:?} are not antisymmetric"
                );

                for c in names {
                    let ab = compare(a, b);
                    if ab != Ordering::Greater && compare(b, c) == ab {
                        assert_eq!(compare(a, c), ab, "{a:?} {b:?} {c:?} are not transitive");
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut names = vec!["c10.png", "c2.png", "C1.png", "c01.png", "b.png"];
        sort(&mut names);
        let once = names.clone();
        sort(&mut names);
        assert_eq!(names, once);
        assert_eq!(once, vec!["b.png", "C1.png", "c01.png", "c2.png", "c10.png"]);
    }
}
