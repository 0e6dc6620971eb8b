//! Single-pass sweep over two sorted interval lists.

use crate::models::Offset;

/// Walks two offset lists with one cursor each and stops on candidate pairs.
///
/// # Preconditions
/// Both lists must be sorted ascending by `(begin, end)`. Unsorted input
/// gives meaningless results; it is not detected.
///
/// Every step advances exactly one cursor, so a full walk takes
/// `O(|a| + |b|)` steps. A consumer that calls [`ignore_a`](Self::ignore_a)
/// on every overlap sees each element of `a` that overlaps some element of
/// `b` exactly once, paired with the first such `b` in sort order.
///
/// ```
/// use curator_core::{Offset, OverlapIterator};
///
/// let a = [Offset::new(0, 5)];
/// let b = [Offset::new(3, 8)];
/// let mut it = OverlapIterator::new(&a, &b);
/// let mut hits = 0;
/// while it.has_next() {
///     if it.overlaps() {
///         hits += 1;
///         it.ignore_a();
///     }
///     it.step();
/// }
/// assert_eq!(hits, 1);
/// ```
#[derive(Debug)]
pub struct OverlapIterator<'a> {
    a: &'a [Offset],
    b: &'a [Offset],
    ai: usize,
    bi: usize,
    ignore_a: bool,
}

impl<'a> OverlapIterator<'a> {
    pub fn new(a: &'a [Offset], b: &'a [Offset]) -> Self {
        Self {
            a,
            b,
            ai: 0,
            bi: 0,
            ignore_a: false,
        }
    }

    pub fn has_next(&self) -> bool {
        self.ai < self.a.len() && self.bi < self.b.len()
    }

    /// Current element of list A. Only valid while `has_next()`.
    pub fn a(&self) -> Offset {
        self.a[self.ai]
    }

    /// Current element of list B. Only valid while `has_next()`.
    pub fn b(&self) -> Offset {
        self.b[self.bi]
    }

    pub fn a_index(&self) -> usize {
        self.ai
    }

    pub fn b_index(&self) -> usize {
        self.bi
    }

    /// Whether the current pair overlaps.
    pub fn overlaps(&self) -> bool {
        self.a().overlaps(&self.b())
    }

    /// Mark the current A as handled; the next `step` moves past it.
    pub fn ignore_a(&mut self) {
        self.ignore_a = true;
    }

    /// Advance one cursor.
    pub fn step(&mut self) {
        if !self.has_next() {
            return;
        }
        if self.ignore_a {
            self.ignore_a = false;
            self.ai += 1;
            return;
        }

        let a = self.a();
        let b = self.b();
        if b.end <= a.begin {
            // B ends before A starts, so it cannot reach any later A either.
            self.bi += 1;
        } else if a.end <= b.begin {
            // A ends before B starts, so it cannot reach any later B either.
            self.ai += 1;
        } else if a.end <= b.end {
            self.ai += 1;
        } else {
            self.bi += 1;
        }
    }
}
