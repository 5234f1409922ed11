/// Shared data structures for the folder listing
///
/// These structs flow from the scanner to the UI's pick list.
use std::cmp::Ordering;
use std::path::PathBuf;

/// One image found in the folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Filename only (e.g., "skip_12.png")
    pub filename: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Natural-order key derived from `filename`
    pub key: SortKey,
}

impl Candidate {
    pub fn new(filename: String, path: PathBuf) -> Self {
        let key = SortKey::from_filename(&filename);
        Self { filename, path, key }
    }
}

/// Numbers embedded in a filename, left to right
///
/// `"layer3_step10.png"` becomes `[3, 10]`. Keys compare element by element,
/// so a name without digits (empty key) sorts before every numbered name.
/// Only ASCII `0`-`9` count as digits.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<Number>);

impl SortKey {
    pub fn from_filename(name: &str) -> Self {
        let mut numbers = Vec::new();
        let mut rest = name;

        while let Some(start) = rest.find(|c: char| c.is_ascii_digit()) {
            let run = &rest[start..];
            let len = run
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(run.len());
            numbers.push(Number::parse(&run[..len]));
            rest = &run[len..];
        }

        SortKey(numbers)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A run of decimal digits compared by value, with no size limit
///
/// Stored without leading zeros; a longer digit string is a bigger number,
/// equal lengths compare lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(String);

impl Number {
    fn parse(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
