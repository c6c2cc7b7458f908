//! Member table - the members a visitor enumerates.

use std::collections::HashMap;

use prism_registry::{MemberDescriptor, Shape};
use tracing::debug;

use crate::options::TargetKind;

/// Ordered snapshot of the members reachable through one target.
///
/// A static-type target only reaches type-level members.
#[derive(Debug)]
pub(crate) struct MemberTable {
    members: Vec<MemberDescriptor>,
    index: HashMap<String, usize>,
}

impl MemberTable {
    pub(crate) fn build<T>(shape: &Shape<T>, target: TargetKind) -> Self {
        let members: Vec<MemberDescriptor> = shape
            .descriptors()
            .filter(|d| target != TargetKind::StaticType || d.is_static)
            .cloned()
            .collect();
        let index = members
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), i))
            .collect();

        debug!(
            type_name = shape.type_name(),
            %target,
            members = members.len(),
            "built member table"
        );
        Self { members, index }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&MemberDescriptor> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    pub(crate) fn descriptors(&self) -> &[MemberDescriptor] {
        &self.members
    }
}
