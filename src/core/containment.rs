use crate::domain::model::Resource;
use serde_json::Value;

/// A kind of network container and the attributes that tie members to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerKind {
    pub resource_type: &'static str,
    /// Attribute on the container holding its identifier.
    pub id_attribute: &'static str,
    /// Attribute on a member that references the container's identifier.
    pub reference_attribute: &'static str,
    pub label_prefix: &'static str,
}

pub const VPC: ContainerKind = ContainerKind {
    resource_type: "aws_vpc",
    id_attribute: "id",
    reference_attribute: "vpc_id",
    label_prefix: "VPC",
};

pub const UNGROUPED_LABEL: &str = "Global Resources";

#[derive(Debug, Clone, Copy)]
pub struct ContainmentResolver {
    kind: ContainerKind,
}

impl Default for ContainmentResolver {
    fn default() -> Self {
        Self::new(VPC)
    }
}

impl ContainmentResolver {
    pub fn new(kind: ContainerKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn is_container(&self, resource: &Resource) -> bool {
        resource.resource_type == self.kind.resource_type
    }

    pub fn containers<'a>(&self, resources: &[&'a Resource]) -> Vec<&'a Resource> {
        resources
            .iter()
            .copied()
            .filter(|r| self.is_container(r))
            .collect()
    }

    pub fn group_label(&self, container: &Resource) -> String {
        format!("{}: {}", self.kind.label_prefix, container.name)
    }

    /// Candidates whose reference attribute equals the container's identifier, in input order.
    /// Other containers are never members, and a missing or null identifier on either side
    /// never matches.
    pub fn members_of<'a>(
        &self,
        container: &Resource,
        candidates: &[&'a Resource],
    ) -> Vec<&'a Resource> {
        let Some(container_id) = identifier(container, self.kind.id_attribute) else {
            tracing::debug!(
                "{} has no {} attribute, it cannot hold members",
                container.address,
                self.kind.id_attribute
            );
            return Vec::new();
        };

        candidates
            .iter()
            .copied()
            .filter(|candidate| !self.is_container(candidate))
            .filter(|candidate| {
                identifier(candidate, self.kind.reference_attribute) == Some(container_id)
            })
            .collect()
    }
}

fn identifier<'a>(resource: &'a Resource, attribute: &str) -> Option<&'a Value> {
    resource.attribute(attribute).filter(|v| !v.is_null())
}
