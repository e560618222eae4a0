//! Pooled storage for short-lived entities.
//!
//! Projectiles and explosions churn fast enough that freeing them would be
//! wasted work; instead each lives in a slot that only ever flips between
//! the active set and a reserve. Slots are addressed by [`Handle`]s that stay
//! valid for the life of the pool, and the slot count only grows.

/// Stable index of one pool slot. Handles never dangle; releasing a slot
/// leaves every other handle untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Handle(usize);

#[derive(Clone, Debug)]
pub struct Pool<T> {
    slots: Vec<T>,
    active: Vec<bool>,
}

impl<T: Default> Pool<T> {
    /// Empty pool. Grows on demand.
    pub fn new() -> Self {
        Pool {
            slots: Vec::new(),
            active: Vec::new(),
        }
    }

    /// Pool pre-seeded with `n` reserve slots, so the first `n` acquires
    /// reuse storage instead of allocating.
    pub fn with_reserve(n: usize) -> Self {
        let mut slots = Vec::with_capacity(n);
        slots.resize_with(n, T::default);
        Pool {
            slots,
            active: vec![false; n],
        }
    }

    /// Move one slot from the reserve into the active set, growing the pool
    /// when the reserve is empty. Cannot fail. The slot keeps whatever data
    /// it held when it was released; the caller resets the fields it uses.
    pub fn acquire(&mut self) -> Handle {
        if let Some(idx) = self.active.iter().position(|live| !live) {
            self.active[idx] = true;
            return Handle(idx);
        }
        self.slots.push(T::default());
        self.active.push(true);
        Handle(self.slots.len() - 1)
    }
}

impl<T> Pool<T> {
    /// Return a slot to the reserve.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already in the reserve. A double release means
    /// some caller is holding a stale handle, and carrying on would let two
    /// owners share one slot.
    pub fn release(&mut self, handle: Handle) {
        assert!(
            self.active[handle.0],
            "released a pool slot that was already in reserve"
        );
        self.active[handle.0] = false;
    }

    /// Release every active slot at once. Used by round reset.
    pub fn release_all(&mut self) {
        for live in &mut self.active {
            *live = false;
        }
    }

    /// Borrow an active slot. Panics on a released handle so stale data
    /// never leaks back out.
    pub fn get(&self, handle: Handle) -> &T {
        assert!(self.active[handle.0], "read a pool slot that is in reserve");
        &self.slots[handle.0]
    }

    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        assert!(
            self.active[handle.0],
            "wrote a pool slot that is in reserve"
        );
        &mut self.slots[handle.0]
    }

    pub fn is_active(&self, handle: Handle) -> bool {
        self.active[handle.0]
    }

    /// Walk the active set read-only, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .zip(&self.active)
            .filter(|(_, live)| **live)
            .map(|(slot, _)| slot)
    }

    /// Walk the active set mutably, in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots
            .iter_mut()
            .zip(&self.active)
            .filter(|(_, live)| **live)
            .map(|(slot, _)| slot)
    }

    /// Handles of every active slot, in slot order. Lets a caller interleave
    /// reads with releases without fighting the borrow on `self`.
    pub fn handles(&self) -> Vec<Handle> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, live)| **live)
            .map(|(idx, _)| Handle(idx))
            .collect()
    }

    /// Advance every active slot, releasing the ones `step` rejects.
    pub fn retain_active(&mut self, mut step: impl FnMut(&mut T) -> bool) {
        for (slot, live) in self.slots.iter_mut().zip(self.active.iter_mut()) {
            if *live && !step(slot) {
                *live = false;
            }
        }
    }

    pub fn active_len(&self) -> usize {
        self.active.iter().filter(|live| **live).count()
    }

    pub fn reserve_len(&self) -> usize {
        self.len() - self.active_len()
    }

    /// Total slots, active plus reserve. Only ever grows.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T: Default> Default for Pool<T> {
    fn default() -> Self {
        Pool::new()
    }
}
