use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a built catalog.
///
/// Returned by [`Catalog::stats`](crate::Catalog::stats) and by the
/// repository once it is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Records in the store.
    pub cities: usize,
    /// Distinct folded names, i.e. terminal nodes in the index.
    pub distinct_names: usize,
    /// Trie nodes, root included.
    pub nodes: usize,
}
