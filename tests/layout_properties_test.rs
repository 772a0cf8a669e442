use anyhow::Result;
use diagraform::{
    BuildOptions, ClusterTreeBuilder, Diagnostic, GroupKind, GroupMode, LayoutPlan, Snapshot,
    SnapshotReader,
};
use serde_json::{json, Value};
use std::collections::HashSet;

fn snapshot(resources: Value) -> Result<Snapshot> {
    let document = json!({"values": {"root_module": {"resources": resources}}});
    Ok(SnapshotReader::from_str("fixture.json", &document.to_string())?)
}

/// A VPC with an ECS cluster, two services on it, a subnet, plus a bucket outside any VPC.
fn platform() -> Result<Snapshot> {
    snapshot(json!([
        {"address": "aws_vpc.main", "type": "aws_vpc", "name": "main",
         "values": {"id": "vpc-1"}},
        {"address": "aws_subnet.public", "type": "aws_subnet", "name": "public",
         "values": {"vpc_id": "vpc-1", "map_public_ip_on_launch": true},
         "depends_on": ["aws_vpc.main"]},
        {"address": "aws_ecs_cluster.app", "type": "aws_ecs_cluster", "name": "app",
         "values": {"id": "arn:aws:ecs:eu-west-1:1:cluster/app", "vpc_id": "vpc-1"}},
        {"address": "aws_ecs_service.api", "type": "aws_ecs_service", "name": "api",
         "values": {"cluster": "arn:aws:ecs:eu-west-1:1:cluster/app", "vpc_id": "vpc-1"},
         "depends_on": ["aws_ecs_cluster.app"]},
        {"address": "aws_ecs_service.worker", "type": "aws_ecs_service", "name": "worker",
         "values": {"cluster": "arn:aws:ecs:eu-west-1:1:cluster/app", "vpc_id": "vpc-1"},
         "depends_on": ["aws_ecs_cluster.app", "aws_sqs_queue.jobs"]},
        {"address": "aws_s3_bucket.assets", "type": "aws_s3_bucket", "name": "assets",
         "values": {"bucket": "assets"}}
    ]))
}

fn all_options() -> Vec<BuildOptions> {
    let mut options = Vec::new();
    for mode in [GroupMode::None, GroupMode::Vpc, GroupMode::Type] {
        for nested in [false, true] {
            options.push(BuildOptions::new(mode, nested));
        }
    }
    options
}

fn assert_exactly_once(plan: &LayoutPlan, snapshot: &Snapshot) {
    let placed = plan.placed_addresses();
    let unique: HashSet<&str> = placed.iter().copied().collect();
    assert_eq!(placed.len(), unique.len(), "duplicate placement in {:?}", placed);
    let expected: HashSet<&str> = snapshot.resources().iter().map(|r| r.address.as_str()).collect();
    assert_eq!(unique, expected);
}

#[test]
fn test_every_resource_placed_exactly_once_in_every_mode() -> Result<()> {
    let snapshot = platform()?;
    for options in all_options() {
        let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&options);
        assert_exactly_once(&plan, &snapshot);
    }
    Ok(())
}

#[test]
fn test_edges_only_join_placed_nodes() -> Result<()> {
    let snapshot = platform()?;
    for options in all_options() {
        let plan = ClusterTreeBuilder::from_snapshot(&snapshot)
            .build(&options.exclude(&["aws_vpc"]));
        let placed: HashSet<&str> = plan.placed_addresses().into_iter().collect();
        for edge in &plan.edges {
            assert!(placed.contains(edge.source.as_str()));
            assert!(placed.contains(edge.target.as_str()));
        }
        assert!(plan.edges.iter().all(|e| e.source != "aws_vpc.main"));
    }
    Ok(())
}

#[test]
fn test_container_groups_only_in_vpc_mode() -> Result<()> {
    let snapshot = platform()?;
    for options in all_options() {
        let mode = options.mode;
        let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&options);
        let mut containers = 0;
        plan.root.walk(&mut |_, group| {
            if group.kind == GroupKind::Container {
                containers += 1;
            }
        });
        assert_eq!(containers > 0, mode == GroupMode::Vpc, "mode {}", mode);
    }
    Ok(())
}

#[test]
fn test_nested_vpc_layout() -> Result<()> {
    let snapshot = platform()?;
    let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&BuildOptions::new(GroupMode::Vpc, true));

    assert_eq!(
        plan.group_path_of("aws_ecs_service.api"),
        Some(vec![
            "Terraform Infrastructure".to_string(),
            "VPC: main".to_string(),
            "Ecs Cluster".to_string(),
            "ECS Cluster: app".to_string(),
        ])
    );
    assert_eq!(
        plan.group_path_of("aws_s3_bucket.assets"),
        Some(vec![
            "Terraform Infrastructure".to_string(),
            "Global Resources".to_string(),
            "S3 Bucket".to_string(),
        ])
    );
    assert_eq!(plan.find_node("aws_subnet.public").map(|n| n.shape.as_str()), Some("PublicSubnet"));
    assert_eq!(plan.find_node("aws_ecs_service.worker").map(|n| n.label.as_str()), Some("worker"));
    assert_eq!(
        plan.diagnostics,
        vec![Diagnostic::UnresolvedReference {
            from: "aws_ecs_service.worker".to_string(),
            to: "aws_sqs_queue.jobs".to_string(),
        }]
    );
    Ok(())
}

#[test]
fn test_end_to_end_single_container() -> Result<()> {
    let snapshot = snapshot(json!([
        {"address": "c1", "type": "aws_vpc", "name": "c1", "values": {"id": "vpc-1"}},
        {"address": "m1", "type": "aws_instance", "name": "m1", "values": {"vpc_id": "vpc-1"}}
    ]))?;
    let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&BuildOptions::new(GroupMode::Vpc, false));

    assert!(plan.root.nodes.is_empty());
    assert_eq!(plan.root.groups.len(), 1);
    let group = &plan.root.groups[0];
    assert_eq!(group.label, "VPC: c1");
    assert_eq!(group.node_addresses(), vec!["c1", "m1"]);
    assert!(group.groups.is_empty());
    assert!(plan.root.child("Global Resources").is_none());
    Ok(())
}

#[test]
fn test_private_name_beats_public_flag() -> Result<()> {
    let snapshot = snapshot(json!([
        {"address": "aws_subnet.x", "type": "aws_subnet", "name": "private-subnet",
         "values": {"map_public_ip_on_launch": true}}
    ]))?;
    let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&BuildOptions::default());

    let node = plan.find_node("aws_subnet.x").expect("subnet placed");
    assert_eq!(node.shape, "PrivateSubnet");
    assert_eq!(node.label, "private-subnet\n(aws_subnet)");
    Ok(())
}

#[test]
fn test_mutually_referencing_hubs_terminate() -> Result<()> {
    let snapshot = snapshot(json!([
        {"address": "aws_lb.a", "type": "aws_lb", "name": "a",
         "values": {"id": "lb-a", "peer": "lb-b"}},
        {"address": "aws_lb.b", "type": "aws_lb", "name": "b",
         "values": {"id": "lb-b", "peer": "lb-a"}}
    ]))?;
    let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&BuildOptions::new(GroupMode::Type, true));

    assert_exactly_once(&plan, &snapshot);
    assert_eq!(
        plan.group_path_of("aws_lb.b"),
        Some(vec![
            "Terraform Infrastructure".to_string(),
            "Lb".to_string(),
            "Load Balancer: a".to_string(),
        ])
    );
    Ok(())
}

#[test]
fn test_build_is_deterministic() -> Result<()> {
    let snapshot = platform()?;
    for options in all_options() {
        let builder = ClusterTreeBuilder::from_snapshot(&snapshot);
        assert_eq!(builder.build(&options), builder.build(&options));
    }
    Ok(())
}

#[test]
fn test_unknown_type_is_general_leaf() -> Result<()> {
    let snapshot = snapshot(json!([
        {"address": "aws_made_up.thing", "type": "aws_made_up", "name": "thing",
         "values": {"id": "x"}}
    ]))?;
    let plan = ClusterTreeBuilder::from_snapshot(&snapshot).build(&BuildOptions::new(GroupMode::Type, true));

    let node = plan.find_node("aws_made_up.thing").expect("placed");
    assert_eq!(node.category.as_str(), "general");
    assert_eq!(plan.root.groups.len(), 1);
    assert!(plan.root.groups[0].groups.is_empty());
    Ok(())
}
