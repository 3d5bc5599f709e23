//! Search-as-you-type state

use serde::{Deserialize, Serialize};

use super::case::CaseSummary;

/// A search request as issued to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    /// Strictly increasing per issued call
    pub sequence_id: u64,
}

/// Results of one issued call, tagged with the call's sequence id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub sequence_id: u64,
    pub items: Vec<CaseSummary>,
}

impl SearchResultSet {
    pub fn empty(sequence_id: u64) -> Self {
        Self { sequence_id, items: Vec::new() }
    }
}

/// What the search dropdown currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchView {
    /// Text as last typed (untrimmed)
    pub query: String,
    /// Sequence id of the result set on display, 0 before any call
    pub sequence_id: u64,
    pub items: Vec<CaseSummary>,
    /// True while the latest issued call is outstanding
    pub searching: bool,
}

impl SearchView {
    pub fn is_open(&self) -> bool {
        !self.items.is_empty()
    }
}
