/// A labeled interval registered by one annotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub offset: usize,
    pub length: usize,
    pub rater: usize,
    pub category: String,
}

/// Units of several annotators over one shared continuum `[0, length)`.
#[derive(Debug, Clone)]
pub struct UnitizingStudy {
    rater_count: usize,
    continuum_length: usize,
    units: Vec<Unit>,
}

impl UnitizingStudy {
    pub fn new(rater_count: usize, continuum_length: usize) -> Self {
        Self {
            rater_count,
            continuum_length,
            units: Vec::new(),
        }
    }

    pub fn add_unit(&mut self, offset: usize, length: usize, rater: usize, category: impl Into<String>) {
        debug_assert!(rater < self.rater_count, "rater {rater} out of range");
        self.units.push(Unit {
            offset,
            length,
            rater,
            category: category.into(),
        });
    }

    pub fn rater_count(&self) -> usize {
        self.rater_count
    }

    pub fn continuum_length(&self) -> usize {
        self.continuum_length
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for unit in &self.units {
            if !out.contains(&unit.category.as_str()) {
                out.push(&unit.category);
            }
        }
        out
    }
}
