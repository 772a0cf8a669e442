//! Reading `terraform show -json` style snapshots.
//!
//! Resources are flattened depth-first: the root module's resources first, then each
//! child module (and its own children) in document order.

use crate::domain::model::{DependencyMap, Resource};
use crate::utils::error::{DiagraformError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct StateDocument {
    values: Option<StateValues>,
}

#[derive(Debug, Deserialize)]
struct StateValues {
    root_module: Option<ModuleRecord>,
}

#[derive(Debug, Deserialize)]
struct ModuleRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    resources: Vec<ResourceRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    child_modules: Vec<ModuleRecord>,
}

#[derive(Debug, Deserialize)]
struct ResourceRecord {
    address: String,
    #[serde(rename = "type")]
    resource_type: String,
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    values: serde_json::Map<String, serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    depends_on: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Flattened resources plus their declared dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    source_name: String,
    resources: Vec<Resource>,
    dependencies: DependencyMap,
}

impl Snapshot {
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    pub fn into_parts(self) -> (Vec<Resource>, DependencyMap) {
        (self.resources, self.dependencies)
    }

    pub fn find(&self, address: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.address == address)
    }

    /// Unique resource types, sorted.
    pub fn resource_types(&self) -> BTreeSet<&str> {
        self.resources
            .iter()
            .map(|r| r.resource_type.as_str())
            .collect()
    }

    pub fn resources_by_type(&self, resource_type: &str) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    pub fn count_by_type(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for resource in &self.resources {
            *counts.entry(resource.resource_type.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of declared `depends_on` entries, resolved or not.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.values().map(Vec::len).sum()
    }
}

pub struct SnapshotReader;

impl SnapshotReader {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let content = std::fs::read(path).map_err(|e| {
            DiagraformError::malformed(&source_name, format!("cannot read file: {}", e))
        })?;
        Self::from_slice(&source_name, &content)
    }

    pub fn from_str(source_name: &str, content: &str) -> Result<Snapshot> {
        Self::from_slice(source_name, content.as_bytes())
    }

    pub fn from_slice(source_name: &str, content: &[u8]) -> Result<Snapshot> {
        let document: StateDocument = serde_json::from_slice(content)
            .map_err(|e| DiagraformError::malformed(source_name, e.to_string()))?;

        let root = document
            .values
            .and_then(|values| values.root_module)
            .ok_or_else(|| DiagraformError::malformed(source_name, "missing values.root_module"))?;

        let mut snapshot = Snapshot {
            source_name: source_name.to_string(),
            resources: Vec::new(),
            dependencies: DependencyMap::new(),
        };
        let mut seen = HashSet::new();
        flatten_module(root, &mut snapshot, &mut seen);

        tracing::debug!(
            "Read {} resources and {} dependencies from {}",
            snapshot.resources.len(),
            snapshot.dependency_count(),
            source_name
        );
        Ok(snapshot)
    }
}

fn flatten_module(module: ModuleRecord, snapshot: &mut Snapshot, seen: &mut HashSet<String>) {
    for record in module.resources {
        if !seen.insert(record.address.clone()) {
            tracing::warn!("Duplicate resource address {}, keeping the first", record.address);
            continue;
        }
        snapshot
            .dependencies
            .insert(record.address.clone(), record.depends_on);
        snapshot.resources.push(Resource {
            address: record.address,
            resource_type: record.resource_type,
            name: record.name,
            values: record.values,
        });
    }

    for child in module.child_modules {
        flatten_module(child, snapshot, seen);
    }
}
