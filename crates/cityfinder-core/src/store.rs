// crates/cityfinder-core/src/store.rs

//! # Record Store
//!
//! The flat, ordered list of every city plus the prefix index built over it.
//! The index does not copy records: terminals hold `u32` ids into the store.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::common::CatalogStats;
use crate::error::{CityError, Result};
use crate::model::City;
use crate::text::{is_blank, Folding};
use crate::trie::PrefixIndex;

/// Immutable Record Store plus its Prefix Index.
///
/// A catalog is complete the moment [`Catalog::build`] returns, and nothing
/// mutates it afterwards, so a shared `Arc<Catalog>` can be read from any
/// number of threads without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<City>,
    index: PrefixIndex<u32>,
}

impl Catalog {
    /// Build the index over `records`, inserting each one exactly once and in
    /// store order.
    pub fn build(records: Vec<City>, folding: Folding) -> Result<Self> {
        let started = Instant::now();
        let mut index = PrefixIndex::new(folding);
        for (i, city) in records.iter().enumerate() {
            let id = u32::try_from(i).map_err(|_| {
                CityError::Other(format!(
                    "dataset too large: more than {} records",
                    u32::MAX
                ))
            })?;
            index.insert(&city.name, id);
        }

        info!(
            cities = records.len(),
            nodes = index.node_count(),
            folding = %folding,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "prefix index built"
        );

        Ok(Self { records, index })
    }

    /// The whole store, in ingestion order.
    pub fn records(&self) -> &[City] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn folding(&self) -> Folding {
        self.index.folding()
    }

    pub fn index(&self) -> &PrefixIndex<u32> {
        &self.index
    }

    /// Trie search; the empty prefix walks the whole trie.
    pub fn search(&self, prefix: &str) -> Vec<&City> {
        self.index
            .search(prefix)
            .into_iter()
            .map(|&id| &self.records[id as usize])
            .collect()
    }

    /// Store ids matching `prefix`, in trie order.
    pub fn search_ids(&self, prefix: &str) -> Vec<u32> {
        self.index.search(prefix).into_iter().copied().collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            cities: self.records.len(),
            distinct_names: self.index.distinct_names(),
            nodes: self.index.node_count(),
        }
    }
}

/// Result of a catalog query.
///
/// Holds the shared catalog instead of cloned records. The all-records case
/// borrows the store as is; a prefix match keeps only the matching ids.
#[derive(Debug, Clone)]
pub struct CityList {
    catalog: Arc<Catalog>,
    ids: Option<Vec<u32>>,
}

impl CityList {
    /// Every record, in store order.
    pub fn all(catalog: Arc<Catalog>) -> Self {
        Self { catalog, ids: None }
    }

    /// Records matching `prefix`. A blank prefix short-circuits to
    /// [`CityList::all`] without touching the trie.
    pub fn search(catalog: Arc<Catalog>, prefix: &str) -> Self {
        if is_blank(prefix) {
            return Self::all(catalog);
        }
        let ids = catalog.search_ids(prefix);
        Self {
            catalog,
            ids: Some(ids),
        }
    }

    pub fn len(&self) -> usize {
        match &self.ids {
            Some(ids) => ids.len(),
            None => self.catalog.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<&City> {
        match &self.ids {
            Some(ids) => ids.get(i).map(|&id| &self.catalog.records[id as usize]),
            None => self.catalog.records.get(i),
        }
    }

    pub fn iter(&self) -> CityIter<'_> {
        CityIter { list: self, pos: 0 }
    }

    /// `true` when this list is the full store rather than a trie match.
    pub fn is_all(&self) -> bool {
        self.ids.is_none()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn to_vec(&self) -> Vec<City> {
        self.iter().cloned().collect()
    }
}

pub struct CityIter<'a> {
    list: &'a CityList,
    pos: usize,
}

impl<'a> Iterator for CityIter<'a> {
    type Item = &'a City;

    fn next(&mut self) -> Option<Self::Item> {
        let city = self.list.get(self.pos)?;
        self.pos += 1;
        Some(city)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.list.len().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl ExactSizeIterator for CityIter<'_> {}

impl<'a> IntoIterator for &'a CityList {
    type Item = &'a City;
    type IntoIter = CityIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
