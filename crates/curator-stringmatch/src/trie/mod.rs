//! Ordered prefix tree keyed by normalized characters.
//!
//! Insertion and lookup both run in time linear in the probed text.

mod sanitizer;

use std::collections::BTreeMap;

pub use sanitizer::KeyNormalization;
use sanitizer::Sanitizer;

#[derive(Debug, Clone)]
struct Node<V> {
    children: BTreeMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

/// Longest match found by [`Trie::lookup`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrieMatch<'a, V> {
    /// Bytes of the haystack consumed by the match, starting at the probe offset.
    pub length: usize,
    pub value: &'a V,
}

/// Prefix tree from normalized strings to values.
#[derive(Debug, Clone)]
pub struct Trie<V> {
    root: Node<V>,
    normalization: KeyNormalization,
    len: usize,
}

impl<V> Trie<V> {
    pub fn new(normalization: KeyNormalization) -> Self {
        Self {
            root: Node::default(),
            normalization,
            len: 0,
        }
    }

    pub fn normalization(&self) -> KeyNormalization {
        self.normalization
    }

    /// Number of keys holding a value.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` under `key`, returning the value it replaces.
    pub fn put(&mut self, key: &str, value: V) -> Option<V> {
        let node = descend_mut(&mut self.root, self.normalization, key);
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let mut sanitizer = Sanitizer::new(self.normalization);
        let mut node = &self.root;
        for c in key.chars() {
            if let Some(mapped) = sanitizer.map(c) {
                node = node.children.get(&mapped)?;
            }
        }
        node.value.as_ref()
    }

    /// Value under `key`, created with `default` when absent.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let node = descend_mut(&mut self.root, self.normalization, key);
        if node.value.is_none() {
            self.len += 1;
        }
        node.value.get_or_insert_with(default)
    }

    /// Deepest key that is a prefix of `haystack[start..]`.
    ///
    /// Returns `None` when nothing matches or `start` is not a char boundary.
    pub fn lookup(&self, haystack: &str, start: usize) -> Option<TrieMatch<'_, V>> {
        let tail = haystack.get(start..)?;
        let mut sanitizer = Sanitizer::new(self.normalization);
        let mut node = &self.root;
        let mut best = None;
        for (idx, c) in tail.char_indices() {
            let Some(mapped) = sanitizer.map(c) else {
                continue;
            };
            match node.children.get(&mapped) {
                Some(child) => {
                    node = child;
                    if let Some(value) = &node.value {
                        best = Some(TrieMatch {
                            length: idx + c.len_utf8(),
                            value,
                        });
                    }
                }
                None => break,
            }
        }
        best
    }
}

fn descend_mut<'a, V>(
    root: &'a mut Node<V>,
    normalization: KeyNormalization,
    key: &str,
) -> &'a mut Node<V> {
    let mut sanitizer = Sanitizer::new(normalization);
    let mut node = root;
    for c in key.chars() {
        if let Some(mapped) = sanitizer.map(c) {
            node = node.children.entry(mapped).or_default();
        }
    }
    node
}
