//! Letter drop table.

use std::collections::BTreeMap;

/// Tracks which letters of each enemy name have already dropped this run.
///
/// Each kill of a given kind yields the next letter of its name, so killing
/// three bats drops `B`, `A`, `T` and nothing after that.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropLedger {
    dropped: BTreeMap<String, usize>,
}

impl DropLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the next undropped letter of `name`.
    pub fn next_drop(&mut self, name: &str) -> Option<char> {
        let name = name.to_ascii_uppercase();
        let count = self.dropped.entry(name.clone()).or_insert(0);
        let letter = name.chars().nth(*count)?;
        *count += 1;
        Some(letter)
    }

    /// Letters of `name` handed out so far.
    pub fn dropped_so_far(&self, name: &str) -> String {
        let name = name.to_ascii_uppercase();
        let count = self.dropped.get(&name).copied().unwrap_or(0);
        name.chars().take(count).collect()
    }

    pub fn is_exhausted(&self, name: &str) -> bool {
        self.dropped_so_far(name).len() >= name.len()
    }
}
