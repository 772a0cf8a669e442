//! Inferred "belongs to" relationships around hub resources.
//!
//! A resource is treated as a dependent of a hub when one of its attribute values
//! mentions the hub's identifier. The match is a plain substring test, so bare ids,
//! ARNs and ids embedded in URLs all count.

use crate::domain::model::{AttributeMap, Resource};
use serde_json::Value;
use std::collections::HashSet;

/// Types allowed to open a sub-group for their dependents.
pub const HUB_TYPES: &[&str] = &[
    "aws_ecs_cluster",
    "aws_eks_cluster",
    "aws_rds_cluster",
    "aws_autoscaling_group",
    "aws_lb",
    "aws_alb",
    "aws_elb",
];

pub fn is_hub(resource: &Resource) -> bool {
    HUB_TYPES.contains(&resource.resource_type.as_str())
}

pub fn dependents_label(hub: &Resource) -> String {
    let prefix = match hub.resource_type.as_str() {
        "aws_ecs_cluster" => "ECS Cluster",
        "aws_eks_cluster" => "EKS Cluster",
        "aws_rds_cluster" => "RDS Cluster",
        "aws_autoscaling_group" => "ASG",
        "aws_lb" | "aws_alb" | "aws_elb" => "Load Balancer",
        _ => return format!("Dependencies of {}", hub.name),
    };
    format!("{}: {}", prefix, hub.name)
}

/// Candidates that reference `hub`'s identifier, in candidate order. The hub itself and
/// anything in `visited` are skipped. A hub without a string `id` has no dependents.
pub fn dependents_of<'a>(
    hub: &Resource,
    candidates: &[&'a Resource],
    visited: &HashSet<&str>,
) -> Vec<&'a Resource> {
    let Some(hub_id) = hub.id() else {
        tracing::debug!("{} has no id, skipping dependent lookup", hub.address);
        return Vec::new();
    };

    candidates
        .iter()
        .copied()
        .filter(|candidate| candidate.address != hub.address)
        .filter(|candidate| !visited.contains(candidate.address.as_str()))
        .filter(|candidate| references_id(&candidate.values, hub_id))
        .collect()
}

/// True when a scalar attribute, or a scalar inside a directly nested mapping, contains
/// `id` once stringified. Lists and deeper mappings are not searched.
pub fn references_id(values: &AttributeMap, id: &str) -> bool {
    if id.is_empty() {
        return false;
    }
    values.values().any(|value| match value {
        Value::Object(nested) => nested.values().any(|inner| scalar_contains(inner, id)),
        other => scalar_contains(other, id),
    })
}

fn scalar_contains(value: &Value, id: &str) -> bool {
    match value {
        Value::String(s) => s.contains(id),
        Value::Number(n) => n.to_string().contains(id),
        Value::Bool(b) => b.to_string().contains(id),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(address: &str, resource_type: &str, values: Value) -> Resource {
        Resource {
            address: address.to_string(),
            resource_type: resource_type.to_string(),
            name: address.rsplit('.').next().unwrap_or(address).to_string(),
            values: values.as_object().cloned().unwrap_or_default(),
        }
    }

    fn values(v: Value) -> AttributeMap {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_references_id_top_level_substring() {
        let attrs = values(json!({
            "cluster": "arn:aws:ecs:eu-west-1:123:cluster/prod-cluster"
        }));
        assert!(references_id(&attrs, "prod-cluster"));
        assert!(!references_id(&attrs, "staging"));
    }

    #[test]
    fn test_references_id_one_level_nested() {
        let attrs = values(json!({"network": {"cluster_ref": "c-123"}}));
        assert!(references_id(&attrs, "c-123"));

        let deeper = values(json!({"network": {"inner": {"cluster_ref": "c-123"}}}));
        assert!(!references_id(&deeper, "c-123"));
    }

    #[test]
    fn test_references_id_ignores_lists() {
        let attrs = values(json!({"clusters": ["c-123"]}));
        assert!(!references_id(&attrs, "c-123"));
    }

    #[test]
    fn test_references_id_stringifies_numbers() {
        let attrs = values(json!({"cluster_number": 41234}));
        assert!(references_id(&attrs, "1234"));
        assert!(!references_id(&attrs, ""));
    }

    #[test]
    fn test_dependents_of_skips_hub_and_visited() {
        let hub = resource("aws_ecs_cluster.main", "aws_ecs_cluster", json!({"id": "ecs-1"}));
        let service = resource("aws_ecs_service.api", "aws_ecs_service", json!({"cluster": "ecs-1"}));
        let task = resource("aws_ecs_service.worker", "aws_ecs_service", json!({"cluster": "ecs-1"}));
        let bucket = resource("aws_s3_bucket.assets", "aws_s3_bucket", json!({"bucket": "assets"}));
        let candidates = vec![&hub, &service, &task, &bucket];

        let mut visited = HashSet::new();
        let dependents = dependents_of(&hub, &candidates, &visited);
        let addresses: Vec<&str> = dependents.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["aws_ecs_service.api", "aws_ecs_service.worker"]);

        visited.insert("aws_ecs_service.api");
        let dependents = dependents_of(&hub, &candidates, &visited);
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].address, "aws_ecs_service.worker");
    }

    #[test]
    fn test_hub_without_id_has_no_dependents() {
        let hub = resource("aws_lb.front", "aws_lb", json!({"name": "front"}));
        let listener = resource("aws_lb_listener.http", "aws_lb_listener", json!({"load_balancer_arn": "front"}));
        let candidates = vec![&hub, &listener];

        assert!(dependents_of(&hub, &candidates, &HashSet::new()).is_empty());
    }

    #[test]
    fn test_hub_labels() {
        let ecs = resource("aws_ecs_cluster.main", "aws_ecs_cluster", json!({}));
        let asg = resource("aws_autoscaling_group.workers", "aws_autoscaling_group", json!({}));
        let alb = resource("aws_alb.front", "aws_alb", json!({}));
        let other = resource("aws_instance.web", "aws_instance", json!({}));

        assert_eq!(dependents_label(&ecs), "ECS Cluster: main");
        assert_eq!(dependents_label(&asg), "ASG: workers");
        assert_eq!(dependents_label(&alb), "Load Balancer: front");
        assert_eq!(dependents_label(&other), "Dependencies of web");

        assert!(is_hub(&ecs));
        assert!(is_hub(&asg));
        assert!(!is_hub(&other));
    }
}
