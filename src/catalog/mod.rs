//! Feature catalog — declarative tour content and its data model.

pub mod features;
pub mod model;

pub use features::tour_features;
pub use model::{BeforeShow, Button, ButtonAction, Feature, Gate, Placement, Step, Target};
