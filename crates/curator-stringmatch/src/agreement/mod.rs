//! Inter-annotator agreement over character-interval units.

mod krippendorff;
mod study;

pub use krippendorff::alpha_unitizing;
pub use study::{Unit, UnitizingStudy};
