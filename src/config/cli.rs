use crate::domain::model::{Edge, LayoutPlan, OutputFormat};
use crate::domain::ports::PlanSink;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// The JSON document written next to the plan files.
#[derive(Debug, Serialize)]
pub struct PlanDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub plan: &'a LayoutPlan,
}

#[derive(Debug, Serialize)]
struct NodeRow<'a> {
    address: &'a str,
    name: &'a str,
    resource_type: &'a str,
    category: &'a str,
    shape: &'a str,
    group: String,
}

/// Writes plans as files under a base directory.
#[derive(Debug, Clone)]
pub struct LocalOutput {
    base_path: PathBuf,
    formats: Vec<OutputFormat>,
}

impl LocalOutput {
    pub fn new(base_path: impl Into<PathBuf>, formats: Vec<OutputFormat>) -> Self {
        Self {
            base_path: base_path.into(),
            formats,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn write_json(&self, plan: &LayoutPlan, source: &Path, stem: &str) -> Result<PathBuf> {
        let path = self.base_path.join(format!("{}.json", stem));
        let document = PlanDocument {
            generated_at: Utc::now(),
            source: source.display().to_string(),
            plan,
        };
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, &document)?;
        Ok(path)
    }

    fn write_csv(&self, plan: &LayoutPlan, stem: &str) -> Result<Vec<PathBuf>> {
        let nodes_path = self.base_path.join(format!("{}_nodes.csv", stem));
        let mut writer = csv::Writer::from_path(&nodes_path)?;
        let mut rows = Vec::new();
        plan.root.walk(&mut |path, group| {
            // Skip the root label; it is the same for every row.
            let group_path = path[1..].join(" / ");
            for node in &group.nodes {
                rows.push(NodeRow {
                    address: &node.address,
                    name: &node.name,
                    resource_type: &node.resource_type,
                    category: node.category.as_str(),
                    shape: &node.shape,
                    group: group_path.clone(),
                });
            }
        });
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        let edges_path = self.base_path.join(format!("{}_edges.csv", stem));
        let mut writer = csv::Writer::from_path(&edges_path)?;
        // Written by hand: an edgeless plan still gets a header.
        writer.write_record(["source", "target"])?;
        for Edge { source, target } in &plan.edges {
            writer.write_record([source, target])?;
        }
        writer.flush()?;

        Ok(vec![nodes_path, edges_path])
    }
}

impl PlanSink for LocalOutput {
    fn write_plan(&self, plan: &LayoutPlan, source: &Path, stem: &str) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.base_path)?;

        let mut written = Vec::new();
        for format in &self.formats {
            match format {
                OutputFormat::Json => written.push(self.write_json(plan, source, stem)?),
                OutputFormat::Csv => written.extend(self.write_csv(plan, stem)?),
            }
            tracing::info!("Saved {} output for {}", format.as_str(), stem);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cluster::ClusterTreeBuilder;
    use crate::core::snapshot::SnapshotReader;
    use crate::domain::model::{BuildOptions, GroupMode};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn plan() -> LayoutPlan {
        let content = json!({
            "values": {"root_module": {"resources": [
                {"address": "aws_vpc.main", "type": "aws_vpc", "name": "main",
                 "values": {"id": "vpc-1"}},
                {"address": "aws_subnet.a", "type": "aws_subnet", "name": "a",
                 "values": {"vpc_id": "vpc-1"}, "depends_on": ["aws_vpc.main"]},
                {"address": "aws_s3_bucket.logs", "type": "aws_s3_bucket", "name": "logs"}
            ]}}
        })
        .to_string();
        let snapshot = SnapshotReader::from_str("state.json", &content).unwrap();
        ClusterTreeBuilder::from_snapshot(&snapshot).build(&BuildOptions::new(GroupMode::Vpc, false))
    }

    #[test]
    fn test_write_json_document() {
        let dir = TempDir::new().unwrap();
        let output = LocalOutput::new(dir.path().join("out"), vec![OutputFormat::Json]);

        let written = output
            .write_plan(&plan(), Path::new("state.json"), "infra")
            .unwrap();
        assert_eq!(written, vec![dir.path().join("out").join("infra.json")]);

        let document: Value =
            serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(document["source"], "state.json");
        assert!(document["generated_at"].is_string());
        assert_eq!(document["plan"]["root"]["groups"][0]["label"], "VPC: main");
        assert_eq!(document["plan"]["edges"][0]["source"], "aws_vpc.main");
    }

    #[test]
    fn test_write_csv_rows() {
        let dir = TempDir::new().unwrap();
        let output = LocalOutput::new(dir.path(), vec![OutputFormat::Csv]);

        let written = output
            .write_plan(&plan(), Path::new("state.json"), "infra")
            .unwrap();
        assert_eq!(written.len(), 2);

        let nodes = fs::read_to_string(&written[0]).unwrap();
        let mut lines = nodes.lines();
        assert_eq!(
            lines.next(),
            Some("address,name,resource_type,category,shape,group")
        );
        assert!(nodes.contains("aws_subnet.a,a,aws_subnet,network,PrivateSubnet,VPC: main"));
        assert!(nodes.contains("aws_s3_bucket.logs,logs,aws_s3_bucket,storage,"));
        assert!(nodes.contains("Global Resources"));

        let edges = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(edges, "source,target\naws_vpc.main,aws_subnet.a\n");
    }
}
