//! Domain entities for the injection tracker.

pub mod injection;
pub mod side_effect;
