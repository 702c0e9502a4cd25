//! Core data models for the geographic context lookups.

pub mod feature;
pub mod geometry;

pub use feature::{parse_category, Feature, Properties, PropertyValue};
pub use geometry::{Geometry, Location};
