use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open `[begin, end)` byte range into a document text.
///
/// Both ends always fall on `char` boundaries. The derived ordering is
/// ascending by `(begin, end)`, the order every sweep in the system expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    pub begin: usize,
    pub end: usize,
}

impl Offset {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the two ranges share at least one position.
    /// Touching ranges such as `[0,5)` and `[5,8)` do not overlap.
    pub fn overlaps(&self, other: &Offset) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// True when `other` lies entirely inside this range.
    pub fn covers(&self, other: &Offset) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.begin, self.end)
    }
}

impl From<(usize, usize)> for Offset {
    fn from((begin, end): (usize, usize)) -> Self {
        Self::new(begin, end)
    }
}
