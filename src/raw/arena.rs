use alloc::vec::Vec;

use super::handle::Handle;

/// Slab of elements addressed by stable [`Handle`]s.
///
/// Handles stay valid across any number of other allocations; a slot is
/// only invalidated by `take`/`free` on its own handle. Freed slots (node
/// merges, root collapses) are recycled before the backing vector grows, so
/// sustained insert/remove churn does not grow the slab without bound.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live elements.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            handle
        } else {
            // Strict less-than: at most `Handle::MAX` slots after the push.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is stale!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is stale!")
    }

    /// Removes and returns the element, invalidating `handle` until its slot
    /// is handed out again.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is stale!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn freed_slots_are_recycled() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        assert_eq!(arena.take(b), 2);
        // The next allocation reuses `b`'s slot instead of growing.
        let c = arena.alloc(3);
        assert_eq!(c, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(*arena.get(a), 1);
        assert_eq!(*arena.get(c), 3);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is stale!")]
    fn stale_handle_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let handle = arena.alloc(7);
        arena.free(handle);
        let _ = arena.get(handle);
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Mutate(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            8 => any::<u32>().prop_map(Operation::Alloc),
            3 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Mutate(which, value)),
            4 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }

    proptest! {
        /// Replays random alloc/mutate/take/clear traffic against a plain
        /// `Vec` model and checks every surviving handle after each step.
        #[test]
        fn arena_matches_model(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        model.push((handle, value));
                    }
                    Operation::Mutate(which, value) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = which % model.len();
                        let (handle, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }
}
