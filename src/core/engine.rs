use crate::core::cluster::ClusterTreeBuilder;
use crate::core::snapshot::{Snapshot, SnapshotReader};
use crate::domain::model::{BuildOptions, LayoutPlan};
use crate::domain::ports::{ConfigProvider, PlanSink};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub resources: usize,
    pub dependencies: usize,
    pub nodes: usize,
    pub edges: usize,
    pub diagnostics: usize,
    pub outputs: Vec<PathBuf>,
}

/// Runs read -> build -> write for one state file.
pub struct LayoutEngine<S: PlanSink, C: ConfigProvider> {
    sink: S,
    config: C,
    monitor: SystemMonitor,
}

impl<S: PlanSink, C: ConfigProvider> LayoutEngine<S, C> {
    pub fn new(sink: S, config: C) -> Self {
        Self::new_with_monitoring(sink, config, false)
    }

    pub fn new_with_monitoring(sink: S, config: C, monitor_enabled: bool) -> Self {
        Self {
            sink,
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Reads and builds without writing anything.
    pub fn plan<P: AsRef<Path>>(&self, state_file: P) -> Result<(Snapshot, LayoutPlan)> {
        let state_file = state_file.as_ref();
        tracing::info!("Analyzing state file: {}", state_file.display());
        let snapshot = SnapshotReader::read(state_file)?;
        tracing::info!(
            "Found {} resources and {} dependencies",
            snapshot.resources().len(),
            snapshot.dependency_count()
        );
        self.monitor.log_phase("read");

        let options = BuildOptions::from_provider(&self.config);
        if !options.include_types.is_empty() {
            tracing::info!("Filtering by resource types: {}", options.include_types.join(", "));
        }
        if !options.exclude_types.is_empty() {
            tracing::info!("Excluding resource types: {}", options.exclude_types.join(", "));
        }
        tracing::info!("Grouping resources by: {}", options.mode);
        if options.nested {
            tracing::info!("Creating nested clusters for related resources");
        }

        let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&options);
        self.monitor.log_phase("build");
        Ok((snapshot, plan))
    }

    pub fn run<P: AsRef<Path>>(&self, state_file: P) -> Result<RunSummary> {
        let state_file = state_file.as_ref();
        let (snapshot, plan) = self.plan(state_file)?;

        let outputs = self
            .sink
            .write_plan(&plan, state_file, self.config.filename())?;
        for output in &outputs {
            tracing::debug!("Wrote {}", output.display());
        }
        self.monitor.log_phase("write");

        Ok(RunSummary {
            resources: snapshot.resources().len(),
            dependencies: snapshot.dependency_count(),
            nodes: plan.node_count(),
            edges: plan.edges.len(),
            diagnostics: plan.diagnostics.len(),
            outputs,
        })
    }
}
