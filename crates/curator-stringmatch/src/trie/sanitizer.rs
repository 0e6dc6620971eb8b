use serde::{Deserialize, Serialize};

/// How characters are mapped before they enter or probe the trie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyNormalization {
    /// Characters are used as they are.
    Exact,
    /// Any whitespace becomes a single space; runs collapse to one.
    #[default]
    Whitespace,
}

/// Stateful per-key mapper. A fresh one is used for every key or probe.
#[derive(Debug)]
pub(crate) struct Sanitizer {
    policy: KeyNormalization,
    last_was_space: bool,
}

impl Sanitizer {
    pub(crate) fn new(policy: KeyNormalization) -> Self {
        Self {
            policy,
            last_was_space: false,
        }
    }

    /// Mapped character, or `None` when the character is skipped.
    pub(crate) fn map(&mut self, c: char) -> Option<char> {
        match self.policy {
            KeyNormalization::Exact => Some(c),
            KeyNormalization::Whitespace => {
                if c.is_whitespace() {
                    if self.last_was_space {
                        return None;
                    }
                    self.last_was_space = true;
                    Some(' ')
                } else {
                    self.last_was_space = false;
                    Some(c)
                }
            }
        }
    }
}
