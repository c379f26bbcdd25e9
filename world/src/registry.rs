//! Ordered list of live entities.

use tank_arena_core::EntityId;

/// Entity identifiers sorted by z-order, ties kept in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    entries: Vec<(i32, EntityId)>,
}

impl Registry {
    pub(crate) fn insert(&mut self, id: EntityId, z: i32) {
        if self.contains(id) {
            return;
        }
        let index = self.entries.partition_point(|(existing, _)| *existing <= z);
        self.entries.insert(index, (z, id));
    }

    pub(crate) fn remove(&mut self, id: EntityId) {
        self.entries.retain(|(_, existing)| *existing != id);
    }

    pub(crate) fn contains(&self, id: EntityId) -> bool {
        self.entries.iter().any(|(_, existing)| *existing == id)
    }

    /// Copy of the current order, safe to iterate while entities come and go.
    pub(crate) fn snapshot(&self) -> Vec<EntityId> {
        self.entries.iter().map(|(_, id)| *id).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_z_then_insertion() {
        let mut registry = Registry::default();
        registry.insert(EntityId::new(1), 0);
        registry.insert(EntityId::new(2), 10);
        registry.insert(EntityId::new(3), 0);
        registry.insert(EntityId::new(4), 5);
        registry.insert(EntityId::new(5), 1);

        let order: Vec<u32> = registry.snapshot().iter().map(EntityId::get).collect();
        assert_eq!(order, vec![1, 3, 5, 4, 2]);
    }

    #[test]
    fn ignores_duplicates_and_missing_removals() {
        let mut registry = Registry::default();
        registry.insert(EntityId::new(7), 0);
        registry.insert(EntityId::new(7), 3);
        registry.remove(EntityId::new(8));
        assert_eq!(registry.len(), 1);

        registry.remove(EntityId::new(7));
        assert!(!registry.contains(EntityId::new(7)));
    }
}
