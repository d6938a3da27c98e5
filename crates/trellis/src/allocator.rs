//! Per-group identifier allocation.

use trellis_core::{group::Group, identifier::Id};

/// Generates collision-free element ids, one counter per group.
///
/// Counters only move forward: an automatically generated id is never handed
/// out twice, even after the element that held it has been removed.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    node_counter: u64,
    edge_counter: u64,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `preferred` when it is free in `group`, otherwise the next free
    /// `prefix + counter` id.
    ///
    /// `is_taken` reports whether an id is currently used in `group`.
    pub(crate) fn generate(
        &mut self,
        group: Group,
        preferred: Option<&str>,
        is_taken: impl Fn(Id) -> bool,
    ) -> Id {
        if let Some(preferred) = preferred {
            let id = Id::new(preferred);
            if !is_taken(id) {
                return id;
            }
        }

        loop {
            let counter = self.counter_mut(group);
            let id = Id::generated(group.id_prefix(), *counter);
            *counter += 1;
            if !is_taken(id) {
                return id;
            }
        }
    }

    fn counter_mut(&mut self, group: Group) -> &mut u64 {
        match group {
            Group::Node => &mut self.node_counter,
            Group::Edge => &mut self.edge_counter,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// A sequence of requests: `Some(name)` asks for a preferred id.
    fn requests_strategy() -> impl Strategy<Value = Vec<Option<String>>> {
        prop::collection::vec(prop::option::of("[ne][0-9]{1,2}|[a-c]"), 1..60)
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Ids handed out while every previous id stays taken are pairwise distinct.
    fn check_ids_are_unique(requests: Vec<Option<String>>) -> Result<(), TestCaseError> {
        let mut allocator = IdAllocator::new();
        let mut taken = HashSet::new();

        for preferred in requests {
            let id = allocator.generate(Group::Node, preferred.as_deref(), |id| {
                taken.contains(&id)
            });
            prop_assert!(taken.insert(id), "id {id} was issued twice");
        }
        Ok(())
    }

    /// Automatic ids are never reissued, even when nothing is taken.
    fn check_automatic_ids_are_monotonic(count: usize) -> Result<(), TestCaseError> {
        let mut allocator = IdAllocator::new();
        let mut seen = HashSet::new();

        for _ in 0..count {
            let id = allocator.generate(Group::Edge, None, |_| false);
            prop_assert!(seen.insert(id), "id {id} was reissued");
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn ids_are_unique(requests in requests_strategy()) {
            check_ids_are_unique(requests)?;
        }

        #[test]
        fn automatic_ids_are_monotonic(count in 1usize..200) {
            check_automatic_ids_are_monotonic(count)?;
        }
    }
}
