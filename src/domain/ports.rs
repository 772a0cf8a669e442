use crate::domain::model::{GroupMode, LayoutPlan, OutputFormat};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Destination for a finished plan (files on disk, an in-memory buffer, a renderer).
pub trait PlanSink {
    /// Writes `plan`, read from `source`, under the file stem `stem` and returns the paths produced.
    fn write_plan(&self, plan: &LayoutPlan, source: &Path, stem: &str) -> Result<Vec<PathBuf>>;
}

pub trait ConfigProvider {
    fn title(&self) -> &str;
    fn group_mode(&self) -> GroupMode;
    fn nested(&self) -> bool;
    fn include_types(&self) -> &[String];
    fn exclude_types(&self) -> &[String];
    fn max_depth(&self) -> usize;
    fn output_path(&self) -> &str;
    fn filename(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
}
