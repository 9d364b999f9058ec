use core::fmt;
use std::{ops::Deref, sync::Arc};

use crate::{Comparer, Natural, Result, SortedVec};

/// Copy-on-write [`SortedVec`].
///
/// Every modifying operation returns a new version and leaves `self`
/// untouched. Cloning only copies a pointer: versions share their storage
/// until one of them is modified.
///
/// ```
/// use sorted_multimap::ImmutableSortedVec;
///
/// let a = ImmutableSortedVec::new().insert(1);
/// let b = a.insert(2);
///
/// assert_eq!(a.as_slice(), [1]);
/// assert_eq!(b.as_slice(), [1, 2]);
/// ```
pub struct ImmutableSortedVec<T, C = Natural> {
	inner: Arc<SortedVec<T, C>>,
}

impl<T> ImmutableSortedVec<T> {
	pub fn new() -> Self {
		Self::from(SortedVec::new())
	}
}

impl<T, C: Default> Default for ImmutableSortedVec<T, C> {
	fn default() -> Self {
		Self::from(SortedVec::default())
	}
}

impl<T, C> ImmutableSortedVec<T, C> {
	pub fn with_comparer(comparer: C) -> Self {
		Self::from(SortedVec::with_comparer(comparer))
	}

	/// Checks whether both values are the same version.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	pub fn as_sorted_vec(&self) -> &SortedVec<T, C> {
		&self.inner
	}

	/// Returns the inner collection, cloning it only if other versions share
	/// it.
	pub fn into_sorted_vec(self) -> SortedVec<T, C>
	where
		T: Clone,
		C: Clone,
	{
		Arc::unwrap_or_clone(self.inner)
	}
}

impl<T: Clone, C: Clone> ImmutableSortedVec<T, C> {
	fn update<R>(&self, f: impl FnOnce(&mut SortedVec<T, C>) -> R) -> (Self, R) {
		let mut next = SortedVec::clone(&self.inner);
		let r = f(&mut next);
		(Self::from(next), r)
	}

	fn try_update<R>(&self, f: impl FnOnce(&mut SortedVec<T, C>) -> Result<R>) -> Result<Self> {
		let mut next = SortedVec::clone(&self.inner);
		f(&mut next)?;
		Ok(Self::from(next))
	}

	pub fn remove_at(&self, index: usize) -> Result<Self> {
		self.try_update(|v| v.remove_at(index))
	}

	pub fn remove_all(&self, predicate: impl FnMut(&T) -> bool) -> Self {
		self.update(|v| v.remove_all(predicate)).0
	}

	pub fn remove_range(&self, index: usize, count: usize) -> Result<Self> {
		self.try_update(|v| v.remove_range(index, count))
	}

	pub fn clear(&self) -> Self {
		Self::from(SortedVec::with_comparer(self.inner.comparer().clone()))
	}

	/// Returns a reversed version, see [`SortedVec::reverse`].
	pub fn reverse(&self) -> Self {
		self.update(SortedVec::reverse).0
	}

	pub fn reverse_range(&self, index: usize, count: usize) -> Result<Self> {
		self.try_update(|v| v.reverse_range(index, count))
	}

	pub fn get_range(&self, index: usize, count: usize) -> Result<Self> {
		self.inner.get_range(index, count).map(Self::from)
	}

	pub fn find_all(&self, predicate: impl FnMut(&T) -> bool) -> Self {
		Self::from(self.inner.find_all(predicate))
	}
}

impl<T: Clone, C: Clone + Comparer<T>> ImmutableSortedVec<T, C> {
	pub fn insert(&self, item: T) -> Self {
		self.update(|v| v.insert(item)).0
	}

	/// Inserts every item of `items`.
	pub fn extend_from(&self, items: impl IntoIterator<Item = T>) -> Self {
		self.update(|v| v.extend(items)).0
	}

	/// Removes one element equal to `item`.
	///
	/// If there is none, the same version is returned.
	pub fn remove(&self, item: &T) -> Self {
		if self.inner.contains(item) {
			self.update(|v| v.remove(item)).0
		} else {
			self.clone()
		}
	}

	pub fn set(&self, index: usize, value: T) -> Result<Self> {
		self.try_update(|v| v.set(index, value))
	}

	pub fn sort(&self) -> Self {
		self.update(SortedVec::sort).0
	}

	pub fn get_view_between(&self, lower: Option<&T>, upper: Option<&T>) -> Self {
		Self::from(self.inner.get_view_between(lower, upper))
	}
}

impl<T, C> Clone for ImmutableSortedVec<T, C> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T, C> Deref for ImmutableSortedVec<T, C> {
	type Target = SortedVec<T, C>;

	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

impl<T, C> From<SortedVec<T, C>> for ImmutableSortedVec<T, C> {
	fn from(value: SortedVec<T, C>) -> Self {
		Self {
			inner: Arc::new(value),
		}
	}
}

impl<T, C: Comparer<T> + Default> FromIterator<T> for ImmutableSortedVec<T, C> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::from(iter.into_iter().collect::<SortedVec<T, C>>())
	}
}

impl<'a, T, C> IntoIterator for &'a ImmutableSortedVec<T, C> {
	type IntoIter = crate::sorted_vec::Iter<'a, T>;
	type Item = &'a T;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.iter()
	}
}

impl<T: PartialEq, C> PartialEq for ImmutableSortedVec<T, C> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other) || self.inner == other.inner
	}
}

impl<T: Eq, C> Eq for ImmutableSortedVec<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for ImmutableSortedVec<T, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.inner, f)
	}
}
