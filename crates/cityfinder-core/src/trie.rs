// crates/cityfinder-core/src/trie.rs

//! # Prefix Index
//!
//! A character trie keyed by folded names. Each node owns its children, and
//! a node at which at least one name ends (a terminal) holds the values
//! inserted under that name, in insertion order.
//!
//! Children live in a `BTreeMap`, so a search walks them in ascending `char`
//! order. Results are therefore: the prefix node's own values, then each
//! child subtree in character order, recursively. That order is part of the
//! contract.

use std::collections::BTreeMap;

use crate::text::Folding;

#[derive(Debug, Clone)]
pub struct TrieNode<V> {
    children: BTreeMap<char, TrieNode<V>>,
    values: Vec<V>,
}

impl<V> Default for TrieNode<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            values: Vec::new(),
        }
    }
}

impl<V> TrieNode<V> {
    /// `true` iff at least one inserted name ends here.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !self.values.is_empty()
    }

    /// Values whose folded name ends exactly at this node.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn child(&self, c: char) -> Option<&TrieNode<V>> {
        self.children.get(&c)
    }

    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode<V>)> {
        self.children.iter().map(|(c, n)| (*c, n))
    }
}

/// Case-insensitive prefix index.
///
/// Build it once with [`PrefixIndex::insert`], then query it as often as
/// needed with [`PrefixIndex::search`]. Nothing is ever removed.
///
/// # Complexity
///
/// - `insert`: O(k) where k = name length
/// - `search`: O(k + s) where s = size of the matched subtree
///
/// # Examples
///
/// ```
/// use cityfinder_core::{Folding, PrefixIndex};
///
/// let mut index = PrefixIndex::new(Folding::Lowercase);
/// index.insert("London", "GB");
/// index.insert("Los Angeles", "US");
/// index.insert("Paris", "FR");
///
/// assert_eq!(index.search("LO"), vec![&"GB", &"US"]);
/// assert!(index.search("z").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct PrefixIndex<V> {
    root: TrieNode<V>,
    folding: Folding,
    len: usize,
    nodes: usize,
    terminals: usize,
}

impl<V> Default for PrefixIndex<V> {
    fn default() -> Self {
        Self::new(Folding::default())
    }
}

impl<V> PrefixIndex<V> {
    pub fn new(folding: Folding) -> Self {
        Self {
            root: TrieNode::default(),
            folding,
            len: 0,
            nodes: 1,
            terminals: 0,
        }
    }

    pub fn folding(&self) -> Folding {
        self.folding
    }

    /// Number of inserted values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Number of distinct folded names, i.e. terminal nodes.
    pub fn distinct_names(&self) -> usize {
        self.terminals
    }

    pub fn root(&self) -> &TrieNode<V> {
        &self.root
    }

    /// Insert `value` under `name`.
    ///
    /// Appends to whatever is already stored under the same folded name, so
    /// duplicates survive and keep their insertion order. An empty name
    /// stores the value on the root.
    pub fn insert(&mut self, name: &str, value: V) {
        let key = self.folding.fold(name);
        let mut created = 0;
        let mut node = &mut self.root;
        for c in key.chars() {
            node = node.children.entry(c).or_insert_with(|| {
                created += 1;
                TrieNode::default()
            });
        }
        if node.values.is_empty() {
            self.terminals += 1;
        }
        node.values.push(value);
        self.nodes += created;
        self.len += 1;
    }

    /// Node reached by walking the folded `prefix`, if it exists.
    pub fn find_node(&self, prefix: &str) -> Option<&TrieNode<V>> {
        let key = self.folding.fold(prefix);
        let mut node = &self.root;
        for c in key.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    /// Every value whose folded name starts with the folded `prefix`.
    ///
    /// Never fails: a prefix that leaves the trie yields an empty vector, and
    /// the empty prefix yields everything.
    pub fn search(&self, prefix: &str) -> Vec<&V> {
        let mut out = Vec::new();
        if let Some(node) = self.find_node(prefix) {
            collect_values(node, &mut out);
        }
        out
    }

    /// `true` if some inserted name starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.find_node(prefix).is_some()
    }
}

/// Pre-order walk with an explicit stack: a node's own values first, then its
/// children in ascending character order.
fn collect_values<'a, V>(start: &'a TrieNode<V>, out: &mut Vec<&'a V>) {
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        out.extend(node.values.iter());
        // reversed so the smallest char is popped first
        stack.extend(node.children.values().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(names: &[&'static str]) -> PrefixIndex<&'static str> {
        let mut index = PrefixIndex::new(Folding::Lowercase);
        for name in names {
            index.insert(name, *name);
        }
        index
    }

    #[test]
    fn finds_by_prefix_case_insensitively() {
        let index = index_of(&["New York", "London", "Paris"]);
        assert_eq!(index.search("lo"), vec![&"London"]);
        assert_eq!(index.search("LO"), vec![&"London"]);
        assert!(index.search("z").is_empty());
    }

    #[test]
    fn full_name_matches_itself_and_extensions() {
        let index = index_of(&["Sandiego", "San", "Santa Fe", "Salem"]);
        assert_eq!(index.search("San"), vec![&"San", &"Sandiego", &"Santa Fe"]);
    }

    #[test]
    fn children_are_visited_in_char_order() {
        let index = index_of(&["bc", "ba", "b", "a", "bb"]);
        assert_eq!(index.search(""), vec![&"a", &"b", &"ba", &"bb", &"bc"]);
    }

    #[test]
    fn duplicates_keep_insertion_order() {
        let mut index = PrefixIndex::new(Folding::Lowercase);
        index.insert("Vancouver", "CA");
        index.insert("vancouver", "US");
        assert_eq!(index.search("VAN"), vec![&"CA", &"US"]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn empty_name_lands_on_root() {
        let mut index = PrefixIndex::new(Folding::Lowercase);
        index.insert("", 1);
        index.insert("a", 2);
        assert!(index.root().is_terminal());
        assert_eq!(index.search(""), vec![&1, &2]);
        assert_eq!(index.search("a"), vec![&2]);
    }

    #[test]
    fn unseen_characters_yield_nothing() {
        let index = index_of(&["Oslo"]);
        assert!(index.search("O😀").is_empty());
        assert!(!index.contains_prefix("Oslo "));
        assert!(index.contains_prefix("osl"));
    }

    #[test]
    fn counts_nodes_once_per_new_char() {
        let index = index_of(&["ab", "ac", "ab"]);
        // root, a, b, c
        assert_eq!(index.node_count(), 4);
        assert_eq!(index.distinct_names(), 2);
        assert!(index.find_node("a").is_some_and(|n| !n.is_terminal()));
        assert_eq!(index.find_node("ab").map(|n| n.values().len()), Some(2));
    }

    #[test]
    fn greek_prefix_matches_in_either_case() {
        let mut index = PrefixIndex::new(Folding::Lowercase);
        index.insert("ΑΣΑ", 1);
        assert_eq!(index.search("ασ"), vec![&1]);
        assert_eq!(index.search("ΑΣ"), vec![&1]);
        assert_eq!(index.search("Ασα"), vec![&1]);
    }

    #[test]
    fn trie_shape_follows_folded_names() {
        let index = index_of(&["Rome", "Rio", "ROMA"]);
        let r = index.root().child('r').expect("shared first letter");
        let next: Vec<char> = r.children().map(|(c, _)| c).collect();
        assert_eq!(next, vec!['i', 'o']);
        assert!(index.root().child('R').is_none());

        let rom = r.child('o').and_then(|n| n.child('m')).expect("rom");
        let endings: Vec<(char, &[&str])> = rom.children().map(|(c, n)| (c, n.values())).collect();
        assert_eq!(endings, vec![('a', &["ROMA"][..]), ('e', &["Rome"][..])]);
    }

    #[test]
    fn transliterated_index_ignores_accents() {
        let mut index = PrefixIndex::new(Folding::Transliterate);
        index.insert("Zürich", 1);
        index.insert("Zug", 2);
        assert_eq!(index.search("zur"), vec![&1]);
        assert_eq!(index.search("ZÜ"), vec![&2, &1]);
    }
}
