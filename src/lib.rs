pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalOutput, CliConfig};

pub use config::toml_config::TomlConfig;
pub use core::{
    analysis::AnalysisReport,
    cluster::ClusterTreeBuilder,
    engine::{LayoutEngine, RunSummary},
    snapshot::{Snapshot, SnapshotReader},
};
pub use domain::model::{
    BuildOptions, Diagnostic, Edge, Group, GroupKind, GroupMode, LayoutPlan, Node, OutputFormat,
    Resource,
};
pub use utils::error::{DiagraformError, Result};
