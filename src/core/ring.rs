//! Rotation buffer — an ordered ring of items that can be rotated without
//! moving any of them.
//!
//! The items live in a fixed backing `Vec`; a logical `head` index marks
//! which slot is displayed first.  Rotating only bumps that index, so the
//! operation is O(1) regardless of length and the sequence is never
//! observable in a half-rotated state.

/// Ordered ring of display items.
#[derive(Debug, Clone)]
pub struct RotationBuffer<T> {
    slots: Vec<T>,
    /// Backing index of the logical first item.
    head: usize,
}

impl<T> Default for RotationBuffer<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            head: 0,
        }
    }
}

impl<T> RotationBuffer<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            slots: items,
            head: 0,
        }
    }

    /// Swap in a fresh list wholesale.  The new list starts unrotated.
    pub fn replace(&mut self, items: Vec<T>) {
        self.slots = items;
        self.head = 0;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Rotation only has a visible effect with two or more items.
    pub fn is_eligible(&self) -> bool {
        self.slots.len() >= 2
    }

    /// Move the logical head to the tail.  Returns `false` (and changes
    /// nothing) when fewer than two items are held.
    pub fn rotate(&mut self) -> bool {
        if !self.is_eligible() {
            return false;
        }
        self.head = (self.head + 1) % self.slots.len();
        true
    }

    /// Items in display order, starting at the logical head.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (wrapped, leading) = self.slots.split_at(self.head);
        leading.iter().chain(wrapped.iter())
    }
}
