use crate::core::catalog;
use crate::domain::model::{Category, NodeKind, Resource};
use serde_json::Value;

pub const SUBNET_TYPE: &str = "aws_subnet";
pub const PROVIDER_PREFIX: &str = "aws_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetVisibility {
    Public,
    Private,
}

impl SubnetVisibility {
    fn shape(self) -> &'static str {
        match self {
            SubnetVisibility::Public => "PublicSubnet",
            SubnetVisibility::Private => "PrivateSubnet",
        }
    }

    /// `Some(Public)` / `Some(Private)` when `text` says so, `None` when it says neither.
    fn signalled_by(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("public") {
            Some(SubnetVisibility::Public)
        } else if text.contains("private") {
            Some(SubnetVisibility::Private)
        } else {
            None
        }
    }
}

pub fn category_of(resource: &Resource) -> Category {
    node_kind(resource).category
}

/// Category and renderer shape for a resource. Unknown types fall back to the
/// general category; subnets get a public/private shape.
pub fn node_kind(resource: &Resource) -> NodeKind {
    let kind = catalog::lookup(&resource.resource_type).unwrap_or_else(|| {
        tracing::debug!(
            "No catalog entry for {} ({}), using {}",
            resource.resource_type,
            resource.address,
            catalog::GENERAL_SHAPE
        );
        catalog::FALLBACK
    });

    match subnet_visibility(resource) {
        Some(visibility) => NodeKind {
            shape: visibility.shape(),
            ..kind
        },
        None => kind,
    }
}

/// Public/private resolution for subnets; `None` for every other type.
///
/// Each source overrides the previous one only when it gives a signal:
/// `map_public_ip_on_launch`, then `tags.Type`, then the display name, which
/// always has the last word. Default is private.
pub fn subnet_visibility(resource: &Resource) -> Option<SubnetVisibility> {
    if resource.resource_type != SUBNET_TYPE {
        return None;
    }

    let mut visibility = SubnetVisibility::Private;

    if resource
        .attribute("map_public_ip_on_launch")
        .is_some_and(is_truthy)
    {
        visibility = SubnetVisibility::Public;
    }

    let tag_type = resource
        .attribute("tags")
        .and_then(|tags| tags.get("Type"))
        .and_then(Value::as_str);
    if let Some(signal) = tag_type.and_then(SubnetVisibility::signalled_by) {
        visibility = signal;
    }

    if let Some(signal) = SubnetVisibility::signalled_by(&resource.name) {
        visibility = signal;
    }

    Some(visibility)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// `aws_ecs_cluster` -> `Ecs Cluster`.
pub fn friendly_type_label(resource_type: &str) -> String {
    let stripped = resource_type
        .strip_prefix(PROVIDER_PREFIX)
        .unwrap_or(resource_type);
    title_case(&stripped.replace('_', " "))
}

// Uppercases a letter that follows a non-letter, lowercases the rest ("ec2 ipv6cidr" -> "Ec2 Ipv6Cidr").
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}
