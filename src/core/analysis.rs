use crate::core::snapshot::Snapshot;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub resource_type: String,
    pub count: usize,
}

/// Resource statistics for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub total_resources: usize,
    pub total_dependencies: usize,
    pub types: Vec<TypeCount>,
}

impl AnalysisReport {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let types = snapshot
            .count_by_type()
            .into_iter()
            .map(|(resource_type, count)| TypeCount {
                resource_type: resource_type.to_string(),
                count,
            })
            .collect();

        Self {
            source: snapshot.source_name().to_string(),
            total_resources: snapshot.resources().len(),
            total_dependencies: snapshot.dependency_count(),
            types,
        }
    }

    pub fn write_text<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "Total resources: {}", self.total_resources)?;
        writeln!(out)?;
        writeln!(out, "Resource types found:")?;
        for entry in &self.types {
            writeln!(out, "  - {}: {}", entry.resource_type, entry.count)?;
        }
        writeln!(out)?;
        writeln!(out, "Total dependencies: {}", self.total_dependencies)?;
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        for entry in &self.types {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::SnapshotReader;
    use serde_json::json;

    fn snapshot() -> Snapshot {
        let content = json!({
            "values": {"root_module": {"resources": [
                {"address": "aws_subnet.a", "type": "aws_subnet", "name": "a",
                 "depends_on": ["aws_vpc.main"]},
                {"address": "aws_vpc.main", "type": "aws_vpc", "name": "main"},
                {"address": "aws_subnet.b", "type": "aws_subnet", "name": "b",
                 "depends_on": ["aws_vpc.main", "aws_subnet.a"]}
            ]}}
        })
        .to_string();
        SnapshotReader::from_str("state.json", &content).unwrap()
    }

    #[test]
    fn test_report_counts() {
        let report = AnalysisReport::from_snapshot(&snapshot());
        assert_eq!(report.total_resources, 3);
        assert_eq!(report.total_dependencies, 3);
        assert_eq!(
            report.types,
            vec![
                TypeCount { resource_type: "aws_subnet".to_string(), count: 2 },
                TypeCount { resource_type: "aws_vpc".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_report_text_and_csv() {
        let report = AnalysisReport::from_snapshot(&snapshot());

        let mut text = Vec::new();
        report.write_text(&mut text).unwrap();
        let text = String::from_utf8(text).unwrap();
        assert!(text.contains("  - aws_subnet: 2"));
        assert!(text.contains("Total dependencies: 3"));

        let mut csv_out = Vec::new();
        report.write_csv(&mut csv_out).unwrap();
        let csv_out = String::from_utf8(csv_out).unwrap();
        assert_eq!(csv_out, "resource_type,count\naws_subnet,2\naws_vpc,1\n");
    }
}
