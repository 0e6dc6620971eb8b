//! # curator-active-learning
//!
//! Picks the next suggestion a user should review and records what they
//! decided.
//!
//! - [`strategy`]: interchangeable selection strategies behind
//!   [`IActiveLearningStrategy`]
//! - [`session`]: one user's review loop on one layer

pub mod session;
pub mod strategy;

pub use session::{ActiveLearningSession, Feedback};
pub use strategy::{
    build_strategy, IActiveLearningStrategy, RoundRobinStrategy, UncertaintySamplingStrategy,
};
