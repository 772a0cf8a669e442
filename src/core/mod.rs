pub mod analysis;
pub mod catalog;
pub mod classifier;
pub mod cluster;
pub mod containment;
pub mod engine;
pub mod relationships;
pub mod snapshot;

pub use crate::domain::model::{BuildOptions, LayoutPlan, Resource};
pub use crate::domain::ports::{ConfigProvider, PlanSink};
pub use crate::utils::error::Result;
