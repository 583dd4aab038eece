//! Contact events
//!
//! The physics step never calls gameplay code directly. It records what
//! touched what into these queues, and the app drains them into the scene
//! handlers once the step is over:
//! 1. Physics finds the player overlapping a coin → `StarOverlap`
//! 2. Physics finds the player overlapping a slime → `HazardHit`
//! 3. App drains star events first, then hazard events

use super::entity::Entity;

/// Events of one type collected during a frame.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain in send order.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All contact queues for one physics step.
#[derive(Debug, Default)]
pub struct Events {
    pub star_overlap: EventQueue<StarOverlapEvent>,
    pub hazard_hit: EventQueue<HazardHitEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_all(&mut self) {
        self.star_overlap.clear();
        self.hazard_hit.clear();
    }
}

/// The player is overlapping an enabled star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarOverlapEvent {
    pub star: Entity,
}

/// The player ran into a slime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardHitEvent {
    pub hazard: Entity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_drains_in_order() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);
        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut events = Events::new();
        events.star_overlap.send(StarOverlapEvent { star: Entity::new(1, 0) });
        events.hazard_hit.send(HazardHitEvent { hazard: Entity::new(2, 0) });

        events.clear_all();
        assert!(events.star_overlap.is_empty());
        assert!(events.hazard_hit.is_empty());
    }
}
