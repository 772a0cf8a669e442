use crate::domain::ports::ConfigProvider;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub type AttributeMap = serde_json::Map<String, Value>;

/// `address -> addresses it depends on`, in snapshot order.
pub type DependencyMap = IndexMap<String, Vec<String>>;

pub const DEFAULT_TITLE: &str = "Terraform Infrastructure";
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// One provisioned item from the state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub address: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub values: AttributeMap,
}

impl Resource {
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The provider-assigned identifier (`values.id`), when it is a non-empty string.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn is_type(&self, resource_type: &str) -> bool {
        self.resource_type == resource_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Compute,
    Network,
    Storage,
    Database,
    Security,
    Integration,
    Management,
    Analytics,
    MachineLearning,
    Iot,
    Mobile,
    Blockchain,
    Business,
    Engagement,
    Media,
    Migration,
    Quantum,
    Satellite,
    Robotics,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Compute => "compute",
            Category::Network => "network",
            Category::Storage => "storage",
            Category::Database => "database",
            Category::Security => "security",
            Category::Integration => "integration",
            Category::Management => "management",
            Category::Analytics => "analytics",
            Category::MachineLearning => "machine_learning",
            Category::Iot => "iot",
            Category::Mobile => "mobile",
            Category::Blockchain => "blockchain",
            Category::Business => "business",
            Category::Engagement => "engagement",
            Category::Media => "media",
            Category::Migration => "migration",
            Category::Quantum => "quantum",
            Category::Satellite => "satellite",
            Category::Robotics => "robotics",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the renderer needs to pick an icon: the category and a shape identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeKind {
    pub category: Category,
    pub shape: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    #[default]
    None,
    Vpc,
    Type,
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupMode::None => "none",
            GroupMode::Vpc => "vpc",
            GroupMode::Type => "type",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["json", "csv"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Root,
    Container,
    Ungrouped,
    TypePartition,
    Dependents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub address: String,
    pub name: String,
    pub resource_type: String,
    pub label: String,
    pub category: Category,
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub label: String,
    pub kind: GroupKind,
    pub nodes: Vec<Node>,
    pub groups: Vec<Group>,
}

impl Group {
    pub fn new(label: impl Into<String>, kind: GroupKind) -> Self {
        Self {
            label: label.into(),
            kind,
            nodes: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.groups.is_empty()
    }

    pub fn child(&self, label: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.label == label)
    }

    pub fn node_addresses(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.address.as_str()).collect()
    }

    /// Depth-first visit of this group and all descendants, with the label path from `self`.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&[&'a str], &'a Group),
    {
        let mut path = Vec::new();
        self.walk_inner(&mut path, visit);
    }

    fn walk_inner<'a, F>(&'a self, path: &mut Vec<&'a str>, visit: &mut F)
    where
        F: FnMut(&[&'a str], &'a Group),
    {
        path.push(self.label.as_str());
        visit(path, self);
        for group in &self.groups {
            group.walk_inner(path, visit);
        }
        path.pop();
    }
}

/// Dependency edge, drawn from `source` (the dependency) to `target` (the dependent).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `from` declares a dependency on an address missing from the snapshot.
    UnresolvedReference { from: String, to: String },
    /// `address` points at a container identifier no container in the snapshot carries.
    UnresolvedContainer { address: String, reference: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub title: String,
    pub root: Group,
    pub edges: Vec<Edge>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LayoutPlan {
    /// Every placed address, in tree order.
    pub fn placed_addresses(&self) -> Vec<&str> {
        let mut addresses = Vec::new();
        self.root.walk(&mut |_, group| {
            addresses.extend(group.nodes.iter().map(|n| n.address.as_str()));
        });
        addresses
    }

    pub fn node_count(&self) -> usize {
        self.placed_addresses().len()
    }

    pub fn find_node(&self, address: &str) -> Option<&Node> {
        let mut found = None;
        self.root.walk(&mut |_, group| {
            if found.is_none() {
                found = group.nodes.iter().find(|n| n.address == address);
            }
        });
        found
    }

    /// Labels from the root down to the group holding `address`.
    pub fn group_path_of(&self, address: &str) -> Option<Vec<String>> {
        let mut found = None;
        self.root.walk(&mut |path, group| {
            if found.is_none() && group.nodes.iter().any(|n| n.address == address) {
                found = Some(path.iter().map(|s| s.to_string()).collect());
            }
        });
        found
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    pub title: String,
    pub mode: GroupMode,
    pub nested: bool,
    pub include_types: Vec<String>,
    pub exclude_types: Vec<String>,
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            mode: GroupMode::None,
            nested: false,
            include_types: Vec::new(),
            exclude_types: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuildOptions {
    pub fn new(mode: GroupMode, nested: bool) -> Self {
        Self {
            mode,
            nested,
            ..Self::default()
        }
    }

    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            title: config.title().to_string(),
            mode: config.group_mode(),
            nested: config.nested(),
            include_types: config.include_types().to_vec(),
            exclude_types: config.exclude_types().to_vec(),
            max_depth: config.max_depth(),
        }
    }

    pub fn include(mut self, types: &[&str]) -> Self {
        self.include_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn exclude(mut self, types: &[&str]) -> Self {
        self.exclude_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Include filter first (when set), then exclude.
    pub fn admits(&self, resource_type: &str) -> bool {
        let included = self.include_types.is_empty()
            || self.include_types.iter().any(|t| t == resource_type);
        included && !self.exclude_types.iter().any(|t| t == resource_type)
    }
}
