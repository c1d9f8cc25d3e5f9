pub mod aggregate;
pub mod vector;

pub use aggregate::{UNSELECTED_WEIGHT, aggregate_observations};
pub use vector::{DIMENSION_COUNT, PREFERENCE_DIMENSIONS, PreferenceVector};
