//! Entity handles with generational indices
//!
//! Everything the arcade layer owns is addressed through an `Entity`:
//! the player, platforms, stars, slimes and on-screen text elements.
//! Only removing a text, respawning the player and tearing the world down
//! free slots. A collected star is disabled in place and keeps its slot.
//! The generation counter makes any handle held across a reuse stale.
//!
//! The delayed "Game Over" text removal relies on this: a timer that fires
//! after its text is already gone finds a stale handle and does nothing.

/// Handle to something the arcade world owns.
///
/// Two handles with the same index but different generations refer to
/// different entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    /// Only the allocator hands these out.
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index (for component storage access).
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Placeholder for "no entity yet".
    pub const NULL: Entity = Entity { index: u32::MAX, generation: 0 };

    pub fn is_null(&self) -> bool {
        self.index == u32::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::NULL
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    generation: u32,
    occupied: bool,
}

/// Hands out entity slots and tracks which generations are alive.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    slots: Vec<Slot>,
    /// Vacant slot indices, reused LIFO
    vacant: Vec<u32>,
    live: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Entity {
        self.live += 1;
        let index = match self.vacant.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        slot.occupied = true;
        Entity::new(index, slot.generation)
    }

    /// Release an entity's slot. Returns false for stale handles.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = &mut self.slots[entity.index as usize];
        slot.occupied = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(entity.index);
        self.live -= 1;
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index as usize)
            .is_some_and(|slot| slot.occupied && slot.generation == entity.generation)
    }

    pub fn alive_count(&self) -> u32 {
        self.live
    }

    /// Release every slot, invalidating all handles handed out so far.
    pub fn clear(&mut self) {
        self.vacant.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if slot.occupied {
                slot.occupied = false;
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.vacant.push(index as u32);
        }
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut alloc = EntityAllocator::new();

        let star = alloc.allocate();
        let slime = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);

        assert!(alloc.free(star));
        assert_eq!(alloc.alive_count(), 1);
        assert!(!alloc.is_alive(star));
        assert!(alloc.is_alive(slime));
    }

    #[test]
    fn test_reused_slot_invalidates_old_handle() {
        let mut alloc = EntityAllocator::new();

        let old_text = alloc.allocate();
        alloc.free(old_text);

        let new_star = alloc.allocate();
        assert_eq!(new_star.index(), old_text.index());
        assert_ne!(new_star.generation(), old_text.generation());
        assert!(!alloc.is_alive(old_text));
        assert!(alloc.is_alive(new_star));
    }

    #[test]
    fn test_double_free_is_rejected() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        assert!(alloc.free(e));
        assert!(!alloc.free(e));
        assert_eq!(alloc.alive_count(), 0);
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut alloc = EntityAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        alloc.clear();
        assert!(!alloc.is_alive(a));
        assert!(!alloc.is_alive(b));
        assert_eq!(alloc.alive_count(), 0);

        // Slots are handed out again, lowest first
        let c = alloc.allocate();
        assert_eq!(c.index(), 0);
        assert!(alloc.is_alive(c));
    }

    #[test]
    fn test_null_entity() {
        let alloc = EntityAllocator::new();
        assert!(!alloc.is_alive(Entity::NULL));
        assert!(Entity::default().is_null());
    }
}
