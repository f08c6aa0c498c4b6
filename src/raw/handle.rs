use core::num::NonZero;

/// Stable address of a node slot in the arena.
///
/// Backed by `NonZero<u32>` so that `Option<Handle>` (every node's parent
/// back-link) is the same size as `Handle` itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<u32>);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow after the bound check.
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as u32;
        Self(NonZero::new(raw).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
