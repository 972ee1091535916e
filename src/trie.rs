//! # Prefix Index Module
//!
//! ## Purpose
//! Implements the case-insensitive prefix tree (trie) that indexes every
//! place name in the dataset, together with the bounded breadth-first lookup
//! that drives autocomplete queries.
//!
//! ## Input/Output Specification
//! - **Input**: (name, record) pairs at build time, query prefixes at serve
//!   time
//! - **Output**: Exact-key existence checks, prefix match record lists
//! - **Performance**: O(m) descent where m = query length, bounded subtree
//!   walk for completions
//!
//! ## Key Features
//! - Case-insensitive keys via Unicode lowercasing
//! - Duplicate names retained per terminal node in insertion order
//! - Breadth-first completion order, shortest completions first
//! - Deterministic traversal for a fixed index
//! - Match limits counted in terminal nodes, not records

use crate::Record;
use std::collections::{BTreeMap, VecDeque};

/// Prefix tree over place names. Built once at startup by sequential
/// inserts, then read-only for the life of the process; concurrent lookups
/// need no locking because nothing mutates after the build phase.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    record_count: usize,
}

/// One node per character of a normalized key. `records` is non-empty only
/// on terminal nodes and keeps every record inserted under that exact key.
/// Children are ordered by character so traversal order is reproducible.
#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
    records: Vec<Record>,
}

impl PrefixIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under the given name. The name is lowercased before
    /// descending; records sharing a name accumulate on the same terminal
    /// node rather than overwriting each other. Inserting the empty string
    /// marks the root terminal.
    pub fn insert(&mut self, name: &str, record: Record) {
        let mut node = &mut self.root;

        for ch in name.to_lowercase().chars() {
            node = node.children.entry(ch).or_default();
        }

        node.terminal = true;
        node.records.push(record);
        self.record_count += 1;
    }

    /// Check whether the exact key was inserted. A string that is merely a
    /// prefix of an inserted key does not count: the node at the end of the
    /// path must be terminal.
    pub fn find(&self, name: &str) -> bool {
        let mut node = &self.root;

        for ch in name.to_lowercase().chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return false,
            }
        }

        node.terminal
    }

    /// Collect the records of every key starting with `prefix`, visiting
    /// terminal nodes in breadth-first order so the shortest completions
    /// surface first. `limit` caps the number of terminal nodes visited
    /// (each contributes all of its records); `None` or zero walks the whole
    /// subtree. The caller re-ranks by score, so this order carries no
    /// ranking meaning beyond deciding which nodes a limited walk reaches.
    pub fn find_matches(&self, prefix: &str, limit: Option<usize>) -> Vec<Record> {
        let mut results = Vec::new();

        // descend to the subtree that matches the prefix
        let mut node = &self.root;
        for ch in prefix.to_lowercase().chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return results,
            }
        }

        // level-order walk of the subtree
        let mut queue = VecDeque::from([node]);
        let mut matched_nodes = 0;

        while let Some(node) = queue.pop_front() {
            if node.terminal {
                results.extend(node.records.iter().cloned());
                matched_nodes += 1;

                if limit.is_some_and(|limit| limit > 0 && matched_nodes >= limit) {
                    break;
                }
            }

            for child in node.children.values() {
                queue.push_back(child);
            }
        }

        results
    }

    /// Number of records inserted
    pub fn len(&self) -> usize {
        self.record_count
    }

    /// Whether any records have been inserted
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        Record {
            id: name.to_string(),
            name: name.to_string(),
            display_name: name.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            region: "CA".to_string(),
        }
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn find_on_empty_index() {
        let index = PrefixIndex::new();
        assert!(!index.find("nope"));
    }

    #[test]
    fn find_missing_key() {
        let mut index = PrefixIndex::new();
        index.insert("a", record("a"));
        assert!(!index.find("nope"));
    }

    #[test]
    fn find_single_and_multiple_characters() {
        let mut index = PrefixIndex::new();
        index.insert("a", record("a"));
        index.insert("abc", record("abc"));
        assert!(index.find("a"));
        assert!(index.find("abc"));
    }

    #[test]
    fn find_rejects_strict_prefix_of_inserted_key() {
        let mut index = PrefixIndex::new();
        index.insert("abc", record("abc"));
        assert!(!index.find("ab"));
    }

    #[test]
    fn find_rejects_extension_of_inserted_key() {
        let mut index = PrefixIndex::new();
        index.insert("abc", record("abc"));
        assert!(!index.find("abcd"));
    }

    #[test]
    fn find_is_case_insensitive() {
        let mut index = PrefixIndex::new();
        index.insert("Victoria", record("Victoria"));
        assert!(index.find("victoria"));
        assert!(index.find("VICTORIA"));
        assert!(index.find("vIcToRiA"));
    }

    #[test]
    fn empty_key_marks_the_root() {
        let mut index = PrefixIndex::new();
        assert!(!index.find(""));
        index.insert("", record(""));
        assert!(index.find(""));
    }

    #[test]
    fn find_matches_on_empty_index() {
        let index = PrefixIndex::new();
        assert!(index.find_matches("nope", Some(10)).is_empty());
    }

    #[test]
    fn find_matches_unknown_prefix() {
        let mut index = PrefixIndex::new();
        index.insert("a", record("a"));
        assert!(index.find_matches("nope", Some(10)).is_empty());
    }

    #[test]
    fn find_matches_exact_key() {
        let mut index = PrefixIndex::new();
        index.insert("a", record("a"));
        assert_eq!(names(&index.find_matches("a", Some(10))), vec!["a"]);
    }

    #[test]
    fn find_matches_collects_whole_subtree() {
        let mut index = PrefixIndex::new();
        index.insert("abc", record("abc"));
        index.insert("abd", record("abd"));
        assert_eq!(names(&index.find_matches("ab", Some(10))), vec!["abc", "abd"]);
    }

    #[test]
    fn limited_match_returns_shortest_completion_first() {
        let mut index = PrefixIndex::new();
        index.insert("abde", record("abde"));
        index.insert("abc", record("abc"));
        assert_eq!(names(&index.find_matches("ab", Some(1))), vec!["abc"]);
    }

    #[test]
    fn no_limit_returns_everything() {
        let mut index = PrefixIndex::new();
        index.insert("abc", record("abc"));
        index.insert("abd", record("abd"));
        index.insert("abde", record("abde"));
        assert_eq!(
            names(&index.find_matches("ab", None)),
            vec!["abc", "abd", "abde"]
        );
    }

    #[test]
    fn zero_limit_means_unbounded() {
        let mut index = PrefixIndex::new();
        index.insert("abc", record("abc"));
        index.insert("abd", record("abd"));
        assert_eq!(names(&index.find_matches("ab", Some(0))), vec!["abc", "abd"]);
    }

    #[test]
    fn limited_result_is_a_strict_subset_of_unlimited() {
        let mut index = PrefixIndex::new();
        index.insert("aa", record("aa"));
        index.insert("ab", record("ab"));
        index.insert("ac", record("ac"));

        let limited = index.find_matches("a", Some(2));
        let all = index.find_matches("a", None);
        assert_eq!(names(&limited), vec!["aa", "ab"]);
        assert_eq!(names(&all), vec!["aa", "ab", "ac"]);
    }

    #[test]
    fn duplicate_names_are_all_retained() {
        let mut index = PrefixIndex::new();
        let mut first = record("Springfield");
        first.region = "US".to_string();
        let mut second = record("Springfield");
        second.region = "CA".to_string();

        index.insert("Springfield", first);
        index.insert("Springfield", second);

        let matches = index.find_matches("Spring", Some(10));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].region, "US");
        assert_eq!(matches[1].region, "CA");
    }

    #[test]
    fn limit_counts_terminal_nodes_not_records() {
        let mut index = PrefixIndex::new();
        index.insert("aa", record("aa"));
        index.insert("aa", record("aa"));
        index.insert("ab", record("ab"));

        // one terminal node satisfies the limit but contributes both records
        let matches = index.find_matches("a", Some(1));
        assert_eq!(names(&matches), vec!["aa", "aa"]);
    }

    #[test]
    fn prefix_lookup_is_case_insensitive() {
        let mut index = PrefixIndex::new();
        index.insert("Victoria", record("Victoria"));
        index.insert("Vista", record("Vista"));

        for prefix in ["vi", "VI", "Vi"] {
            assert_eq!(
                names(&index.find_matches(prefix, Some(10))),
                vec!["Vista", "Victoria"],
                "prefix {prefix:?}"
            );
        }
    }

    #[test]
    fn len_counts_records() {
        let mut index = PrefixIndex::new();
        assert!(index.is_empty());
        index.insert("aa", record("aa"));
        index.insert("aa", record("aa"));
        assert_eq!(index.len(), 2);
    }
}
