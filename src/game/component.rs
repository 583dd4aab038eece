//! Component Storage
//!
//! `ComponentStorage<T>` is a sparse array indexed by entity slot. Each
//! occupied slot also remembers the full handle it was inserted under, so
//! a lookup through a stale handle (same slot, older generation) misses
//! instead of returning the component of whatever reused the slot.
//!
//! The scene holds a few dozen entities at most; sparse vectors are plenty.

use super::entity::Entity;

pub struct ComponentStorage<T> {
    data: Vec<Option<(Entity, T)>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn ensure_capacity(&mut self, index: usize) {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
    }

    /// Insert a component, replacing whatever occupied the slot.
    pub fn insert(&mut self, entity: Entity, component: T) {
        let idx = entity.index() as usize;
        self.ensure_capacity(idx);
        self.data[idx] = Some((entity, component));
    }

    /// Remove a component. Stale handles remove nothing.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        if !self.contains(entity) {
            return None;
        }
        self.data[entity.index() as usize].take().map(|(_, c)| c)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        match self.data.get(entity.index() as usize) {
            Some(Some((owner, component))) if *owner == entity => Some(component),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.data.get_mut(entity.index() as usize) {
            Some(Some((owner, component))) if *owner == entity => Some(component),
            _ => None,
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Iterate over `(entity, component)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.data
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(e, c)| (*e, c)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.data
            .iter_mut()
            .filter_map(|slot| slot.as_mut().map(|(e, c)| (*e, c)))
    }

    pub fn clear(&mut self) {
        for slot in &mut self.data {
            *slot = None;
        }
    }

    /// Number of occupied slots.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut storage: ComponentStorage<i32> = ComponentStorage::new();
        let entity = Entity::new(5, 0);

        storage.insert(entity, 42);
        assert_eq!(storage.get(entity), Some(&42));
        assert!(storage.contains(entity));
        assert!(!storage.contains(Entity::new(4, 0)));
    }

    #[test]
    fn test_stale_handle_misses() {
        let mut storage: ComponentStorage<&str> = ComponentStorage::new();
        let old = Entity::new(3, 0);
        let new = Entity::new(3, 1);

        storage.insert(old, "game over");
        storage.insert(new, "coin");

        assert_eq!(storage.get(old), None);
        assert_eq!(storage.remove(old), None);
        assert_eq!(storage.get(new), Some(&"coin"));
    }

    #[test]
    fn test_remove() {
        let mut storage: ComponentStorage<i32> = ComponentStorage::new();
        let entity = Entity::new(3, 0);

        storage.insert(entity, 100);
        assert_eq!(storage.remove(entity), Some(100));
        assert!(!storage.contains(entity));
        assert_eq!(storage.remove(entity), None);
    }

    #[test]
    fn test_iteration_yields_handles() {
        let mut storage: ComponentStorage<&str> = ComponentStorage::new();

        storage.insert(Entity::new(0, 0), "zero");
        storage.insert(Entity::new(2, 4), "two");
        storage.insert(Entity::new(5, 1), "five");

        let items: Vec<_> = storage.iter().collect();
        assert_eq!(
            items,
            vec![
                (Entity::new(0, 0), &"zero"),
                (Entity::new(2, 4), &"two"),
                (Entity::new(5, 1), &"five"),
            ]
        );
        assert_eq!(storage.count(), 3);

        for (_, value) in storage.iter_mut() {
            *value = "x";
        }
        assert!(storage.iter().all(|(_, v)| *v == "x"));
    }
}
