//! Builds the group tree of a [`LayoutPlan`] from flattened resources.
//!
//! Placement is tracked per build: once an address sits in a group it is never
//! placed again, and a hub is expanded at most once. Both sets are dropped when
//! `build` returns.

use crate::core::classifier;
use crate::core::containment::{ContainmentResolver, UNGROUPED_LABEL};
use crate::core::relationships;
use crate::core::snapshot::Snapshot;
use crate::domain::model::{
    BuildOptions, DependencyMap, Diagnostic, Edge, Group, GroupKind, GroupMode, LayoutPlan, Node,
    Resource,
};
use indexmap::IndexMap;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelStyle {
    NameAndType,
    Name,
}

impl LabelStyle {
    fn label(self, resource: &Resource) -> String {
        match self {
            LabelStyle::NameAndType => format!("{}\n({})", resource.name, resource.resource_type),
            LabelStyle::Name => resource.name.clone(),
        }
    }
}

#[derive(Default)]
struct BuildState<'a> {
    placed: HashSet<&'a str>,
    expanded: HashSet<&'a str>,
}

impl<'a> BuildState<'a> {
    fn is_placed(&self, resource: &Resource) -> bool {
        self.placed.contains(resource.address.as_str())
    }
}

pub struct ClusterTreeBuilder<'a> {
    resources: &'a [Resource],
    dependencies: &'a DependencyMap,
    containment: ContainmentResolver,
}

impl<'a> ClusterTreeBuilder<'a> {
    pub fn new(resources: &'a [Resource], dependencies: &'a DependencyMap) -> Self {
        Self {
            resources,
            dependencies,
            containment: ContainmentResolver::default(),
        }
    }

    pub fn from_snapshot(snapshot: &'a Snapshot) -> Self {
        Self::new(snapshot.resources(), snapshot.dependencies())
    }

    pub fn with_containment(mut self, containment: ContainmentResolver) -> Self {
        self.containment = containment;
        self
    }

    pub fn build(&self, options: &BuildOptions) -> LayoutPlan {
        let survivors: Vec<&'a Resource> = self
            .resources
            .iter()
            .filter(|r| options.admits(&r.resource_type))
            .collect();
        tracing::debug!(
            "{} of {} resources left after filtering",
            survivors.len(),
            self.resources.len()
        );

        let mut state = BuildState::default();
        let mut diagnostics = Vec::new();
        let mut root = Group::new(options.title.as_str(), GroupKind::Root);

        match options.mode {
            GroupMode::None => {
                for &resource in &survivors {
                    self.place(resource, LabelStyle::NameAndType, &mut root, &mut state);
                }
            }
            GroupMode::Vpc => {
                self.build_by_container(&survivors, options, &mut root, &mut state, &mut diagnostics)
            }
            GroupMode::Type => {
                self.place_partitioned(&survivors, &survivors, options, &mut root, &mut state)
            }
        }

        let edges = self.derive_edges(&state.placed, &mut diagnostics);

        tracing::info!(
            "Built {} layout: {} nodes, {} top-level groups, {} edges",
            options.mode,
            state.placed.len(),
            root.groups.len(),
            edges.len()
        );

        LayoutPlan {
            title: options.title.clone(),
            root,
            edges,
            diagnostics,
        }
    }

    fn build_by_container(
        &self,
        survivors: &[&'a Resource],
        options: &BuildOptions,
        root: &mut Group,
        state: &mut BuildState<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for container in self.containment.containers(survivors) {
            let mut group = Group::new(self.containment.group_label(container), GroupKind::Container);
            self.place(container, LabelStyle::NameAndType, &mut group, state);

            let members: Vec<&'a Resource> = self
                .containment
                .members_of(container, survivors)
                .into_iter()
                .filter(|m| !state.is_placed(m))
                .collect();
            tracing::debug!("{} holds {} members", container.address, members.len());

            if options.nested {
                self.place_partitioned(&members, &members, options, &mut group, state);
            } else {
                for &member in &members {
                    self.place(member, LabelStyle::NameAndType, &mut group, state);
                }
            }
            root.groups.push(group);
        }

        let leftovers: Vec<&'a Resource> = survivors
            .iter()
            .copied()
            .filter(|r| !state.is_placed(r))
            .collect();
        if leftovers.is_empty() {
            return;
        }

        self.report_unresolved_containers(&leftovers, diagnostics);

        let mut global = Group::new(UNGROUPED_LABEL, GroupKind::Ungrouped);
        if options.nested {
            self.place_partitioned(&leftovers, &leftovers, options, &mut global, state);
        } else {
            for &resource in &leftovers {
                self.place(resource, LabelStyle::NameAndType, &mut global, state);
            }
        }
        root.groups.push(global);
    }

    /// One type group per friendly label; hubs open their dependents' group in place
    /// when nesting is on. `scope` bounds which resources a hub may claim.
    fn place_partitioned(
        &self,
        resources: &[&'a Resource],
        scope: &[&'a Resource],
        options: &BuildOptions,
        parent: &mut Group,
        state: &mut BuildState<'a>,
    ) {
        for (label, members) in partition_by_type(resources) {
            let mut type_group = Group::new(label, GroupKind::TypePartition);
            for resource in members {
                if !self.place(resource, LabelStyle::Name, &mut type_group, state) {
                    continue;
                }
                if options.nested && relationships::is_hub(resource) {
                    self.expand_hub(resource, scope, 0, options.max_depth, &mut type_group, state);
                }
            }
            if !type_group.is_empty() {
                parent.groups.push(type_group);
            }
        }
    }

    fn expand_hub(
        &self,
        hub: &'a Resource,
        scope: &[&'a Resource],
        depth: usize,
        max_depth: usize,
        parent: &mut Group,
        state: &mut BuildState<'a>,
    ) {
        if depth >= max_depth {
            tracing::debug!("Depth limit {} reached at {}", max_depth, hub.address);
            return;
        }
        if !state.expanded.insert(hub.address.as_str()) {
            return;
        }

        let dependents = relationships::dependents_of(hub, scope, &state.placed);
        if dependents.is_empty() {
            return;
        }
        tracing::debug!(
            "{} claims {} dependents at depth {}",
            hub.address,
            dependents.len(),
            depth
        );

        // Claim every dependent before recursing so deeper hubs cannot pull siblings away.
        for &dependent in &dependents {
            state.placed.insert(dependent.address.as_str());
        }

        let mut hub_group = Group::new(relationships::dependents_label(hub), GroupKind::Dependents);
        let partitions = partition_by_type(&dependents);
        if partitions.len() > 1 {
            for (label, members) in partitions {
                let mut type_group = Group::new(label, GroupKind::TypePartition);
                for resource in members {
                    type_group.nodes.push(make_node(resource, LabelStyle::Name));
                    if relationships::is_hub(resource) {
                        self.expand_hub(resource, scope, depth + 1, max_depth, &mut type_group, state);
                    }
                }
                hub_group.groups.push(type_group);
            }
        } else {
            for resource in dependents {
                hub_group.nodes.push(make_node(resource, LabelStyle::Name));
                if relationships::is_hub(resource) {
                    self.expand_hub(resource, scope, depth + 1, max_depth, &mut hub_group, state);
                }
            }
        }
        parent.groups.push(hub_group);
    }

    /// Pushes a node for `resource` unless it was already placed somewhere in this build.
    fn place(
        &self,
        resource: &'a Resource,
        style: LabelStyle,
        group: &mut Group,
        state: &mut BuildState<'a>,
    ) -> bool {
        if !state.placed.insert(resource.address.as_str()) {
            return false;
        }
        group.nodes.push(make_node(resource, style));
        true
    }

    fn report_unresolved_containers(
        &self,
        leftovers: &[&'a Resource],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let kind = self.containment.kind();
        let known_ids: HashSet<String> = self
            .resources
            .iter()
            .filter(|r| self.containment.is_container(r))
            .filter_map(|r| r.attribute(kind.id_attribute))
            .map(|id| id.to_string())
            .collect();

        for resource in leftovers {
            let Some(reference) = resource
                .attribute(kind.reference_attribute)
                .filter(|v| !v.is_null())
            else {
                continue;
            };
            if self.containment.is_container(resource) || known_ids.contains(&reference.to_string()) {
                continue;
            }
            let reference = reference
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| reference.to_string());
            tracing::warn!(
                "{} references unknown {} {}",
                resource.address,
                kind.label_prefix,
                reference
            );
            diagnostics.push(Diagnostic::UnresolvedContainer {
                address: resource.address.clone(),
                reference,
            });
        }
    }

    /// `Edge(dep, address)` for every declared dependency whose both ends were placed.
    fn derive_edges(&self, placed: &HashSet<&str>, diagnostics: &mut Vec<Diagnostic>) -> Vec<Edge> {
        let known: HashSet<&str> = self.resources.iter().map(|r| r.address.as_str()).collect();
        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        for (address, deps) in self.dependencies {
            if !placed.contains(address.as_str()) {
                continue;
            }
            for dep in deps {
                if !known.contains(dep.as_str()) {
                    tracing::warn!("{} depends on unknown address {}", address, dep);
                    diagnostics.push(Diagnostic::UnresolvedReference {
                        from: address.clone(),
                        to: dep.clone(),
                    });
                    continue;
                }
                if !placed.contains(dep.as_str()) {
                    continue;
                }
                let edge = Edge {
                    source: dep.clone(),
                    target: address.clone(),
                };
                if seen.insert(edge.clone()) {
                    edges.push(edge);
                }
            }
        }
        edges
    }
}

fn make_node(resource: &Resource, style: LabelStyle) -> Node {
    let kind = classifier::node_kind(resource);
    Node {
        address: resource.address.clone(),
        name: resource.name.clone(),
        resource_type: resource.resource_type.clone(),
        label: style.label(resource),
        category: kind.category,
        shape: kind.shape.to_string(),
    }
}

/// Groups resources by friendly type label, keeping first-appearance order.
fn partition_by_type<'a>(resources: &[&'a Resource]) -> IndexMap<String, Vec<&'a Resource>> {
    let mut partitions: IndexMap<String, Vec<&'a Resource>> = IndexMap::new();
    for &resource in resources {
        partitions
            .entry(classifier::friendly_type_label(&resource.resource_type))
            .or_default()
            .push(resource);
    }
    partitions
}
