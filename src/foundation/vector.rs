use std::marker::PhantomData;

use crate::foundation::error::{VpeError, VpeResult};

/// Typed position inside an [`IdxVec`].
pub trait Idx: Copy + Eq + std::fmt::Debug {
    /// Wrap a raw position.
    fn new(raw: usize) -> Self;
    /// Raw position.
    fn index(self) -> usize;
}

/// Declare a `u32`-backed index newtype implementing [`Idx`].
macro_rules! define_idx {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name(pub u32);

        impl $crate::foundation::vector::Idx for $name {
            fn new(raw: usize) -> Self {
                Self(raw as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}
pub(crate) use define_idx;

/// Growable array of fixed-size records addressed by typed indices.
///
/// Records are only ever appended or cleared wholesale, so an index handed out by [`push`]
/// stays valid (and keeps naming the same record) until the next [`clear`].
///
/// [`push`]: IdxVec::push
/// [`clear`]: IdxVec::clear
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdxVec<I: Idx, T> {
    items: Vec<T>,
    _idx: PhantomData<fn(I) -> I>,
}

impl<I: Idx, T> Default for IdxVec<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Idx, T> IdxVec<I, T> {
    /// Empty vector.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _idx: PhantomData,
        }
    }

    /// Empty vector with room for `n` records, failing with `NoMemory` when the allocation fails.
    pub fn with_capacity(n: usize) -> VpeResult<Self> {
        let mut v = Self::new();
        v.reserve(n)?;
        Ok(v)
    }

    /// Reserve room for `n` more records.
    pub fn reserve(&mut self, n: usize) -> VpeResult<()> {
        self.items.try_reserve(n).map_err(|_| VpeError::NoMemory)
    }

    /// Append a record and return its index.
    pub fn push(&mut self, item: T) -> VpeResult<I> {
        self.reserve(1)?;
        let idx = I::new(self.items.len());
        self.items.push(item);
        Ok(idx)
    }

    /// Record at `idx`.
    pub fn get(&self, idx: I) -> Option<&T> {
        self.items.get(idx.index())
    }

    /// Mutable record at `idx`.
    pub fn get_mut(&mut self, idx: I) -> Option<&mut T> {
        self.items.get_mut(idx.index())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every record; previously returned indices become dangling.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Last record.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Last record, mutably.
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Records paired with their index, in insertion order.
    pub fn iter_enumerated(&self) -> impl Iterator<Item = (I, &T)> + '_ {
        self.items.iter().enumerate().map(|(i, t)| (I::new(i), t))
    }

    /// Records as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Records as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<I: Idx, T> std::ops::Index<I> for IdxVec<I, T> {
    type Output = T;

    fn index(&self, idx: I) -> &T {
        &self.items[idx.index()]
    }
}

impl<I: Idx, T> std::ops::IndexMut<I> for IdxVec<I, T> {
    fn index_mut(&mut self, idx: I) -> &mut T {
        &mut self.items[idx.index()]
    }
}

impl<'a, I: Idx, T> IntoIterator for &'a IdxVec<I, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/vector.rs"]
mod tests;
