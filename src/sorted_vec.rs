//! Vector kept sorted by a [`Comparer`].
use core::fmt;
use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
	iter::FusedIterator,
	ops::{Index, Range},
};

use crate::{
	error::{check_index, check_range},
	Comparer, Natural, Result, SearchResult,
};

/// Sequence of elements kept in non-decreasing order.
///
/// Elements are stored contiguously. Lookups are binary searches, insertions
/// and removals shift the elements after the affected position. Duplicates
/// are allowed and stored next to each other, in insertion order.
///
/// ```
/// use sorted_multimap::SortedVec;
///
/// let mut numbers: SortedVec<i32> = [5, 1, 3].into_iter().collect();
/// assert_eq!(numbers.as_slice(), [1, 3, 5]);
///
/// numbers.insert(4);
/// assert_eq!(numbers.as_slice(), [1, 3, 4, 5]);
/// assert_eq!(numbers.binary_search(&4).found(), Some(2));
///
/// let view = numbers.get_view_between(Some(&2), Some(&4));
/// assert_eq!(view.as_slice(), [3, 4]);
/// ```
#[derive(Clone)]
pub struct SortedVec<T, C = Natural> {
	items: Vec<T>,
	comparer: C,
}

impl<T, C: Default> Default for SortedVec<T, C> {
	fn default() -> Self {
		Self::with_comparer(C::default())
	}
}

impl<T> SortedVec<T> {
	pub fn new() -> Self {
		Self::with_comparer(Natural)
	}

	pub fn with_capacity(cap: usize) -> Self {
		Self {
			items: Vec::with_capacity(cap),
			comparer: Natural,
		}
	}
}

impl<T, C> SortedVec<T, C> {
	pub fn with_comparer(comparer: C) -> Self {
		Self {
			items: Vec::new(),
			comparer,
		}
	}

	pub fn comparer(&self) -> &C {
		&self.comparer
	}

	pub fn as_slice(&self) -> &[T] {
		&self.items
	}

	pub fn into_vec(self) -> Vec<T> {
		self.items
	}

	pub fn capacity(&self) -> usize {
		self.items.capacity()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		self.items.get(index)
	}

	pub fn first(&self) -> Option<&T> {
		self.items.first()
	}

	pub fn last(&self) -> Option<&T> {
		self.items.last()
	}

	pub fn iter(&self) -> Iter<T> {
		Iter(self.items.iter())
	}

	/// Returns the first element matching the predicate.
	///
	/// The predicate does not have to agree with the order: every element
	/// may be visited.
	pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
		self.items.iter().find(|item| predicate(item))
	}

	pub fn find_last(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
		self.items.iter().rev().find(|item| predicate(item))
	}

	pub fn find_index(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
		self.items.iter().position(predicate)
	}

	pub fn find_last_index(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
		self.items.iter().rposition(predicate)
	}

	pub fn exists(&self, predicate: impl FnMut(&T) -> bool) -> bool {
		self.items.iter().any(predicate)
	}

	/// Returns a new collection with every element matching the predicate.
	pub fn find_all(&self, mut predicate: impl FnMut(&T) -> bool) -> Self
	where
		T: Clone,
		C: Clone,
	{
		Self {
			items: self.items.iter().filter(|item| predicate(item)).cloned().collect(),
			comparer: self.comparer.clone(),
		}
	}

	/// Returns a new collection holding `count` elements starting at `index`.
	pub fn get_range(&self, index: usize, count: usize) -> Result<Self>
	where
		T: Clone,
		C: Clone,
	{
		let range = check_range(index, count, self.len())?;
		Ok(self.cloned_range(range))
	}

	fn cloned_range(&self, range: Range<usize>) -> Self
	where
		T: Clone,
		C: Clone,
	{
		Self {
			items: self.items[range].to_vec(),
			comparer: self.comparer.clone(),
		}
	}

	pub fn remove_at(&mut self, index: usize) -> Result<T> {
		check_index(index, self.len())?;
		Ok(self.items.remove(index))
	}

	/// Removes every element matching the predicate and returns how many
	/// were removed.
	pub fn remove_all(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
		let len = self.items.len();
		self.items.retain(|item| !predicate(item));
		len - self.items.len()
	}

	/// Removes `count` elements starting at `index`, returning them in order.
	pub fn remove_range(&mut self, index: usize, count: usize) -> Result<Vec<T>> {
		let range = check_range(index, count, self.len())?;
		Ok(self.items.drain(range).collect())
	}

	pub fn retain(&mut self, f: impl FnMut(&T) -> bool) {
		self.items.retain(f)
	}

	pub fn pop_first(&mut self) -> Option<T> {
		if self.items.is_empty() {
			None
		} else {
			Some(self.items.remove(0))
		}
	}

	pub fn pop_last(&mut self) -> Option<T> {
		self.items.pop()
	}

	pub fn clear(&mut self) {
		self.items.clear()
	}

	/// Reverses the order of the elements.
	///
	/// This breaks the ordering invariant: searches and insertions give
	/// meaningless results until [`Self::sort`] is called.
	pub fn reverse(&mut self) {
		tracing::debug!(len = self.items.len(), "reversing sorted vec, order suspended");
		self.items.reverse()
	}

	/// Reverses `count` elements starting at `index`.
	///
	/// Breaks the ordering invariant the same way [`Self::reverse`] does.
	pub fn reverse_range(&mut self, index: usize, count: usize) -> Result<()> {
		let range = check_range(index, count, self.len())?;
		tracing::debug!(index, count, "reversing sorted vec range, order suspended");
		self.items[range].reverse();
		Ok(())
	}
}

impl<T, C: Comparer<T>> SortedVec<T, C> {
	/// Builds a collection from unordered items, sorting them once.
	///
	/// The sort is stable: equal items keep their relative order.
	pub fn from_vec_with(mut items: Vec<T>, comparer: C) -> Self {
		items.sort_by(|a, b| comparer.compare(a, b));
		Self { items, comparer }
	}

	pub fn is_sorted(&self) -> bool {
		self.items
			.windows(2)
			.all(|w| self.comparer.compare(&w[0], &w[1]) != Ordering::Greater)
	}

	/// Restores the ordering invariant, for instance after a call to
	/// [`Self::reverse`].
	pub fn sort(&mut self) {
		let comparer = &self.comparer;
		self.items.sort_by(|a, b| comparer.compare(a, b))
	}

	/// Searches for `item`.
	///
	/// If several elements compare equal to `item`, any of them may be
	/// returned.
	pub fn binary_search(&self, item: &T) -> SearchResult {
		self.binary_search_with(item, &self.comparer)
	}

	/// Searches for `item` using another comparer, which must agree with the
	/// collection's order.
	pub fn binary_search_with(&self, item: &T, comparer: &impl Comparer<T>) -> SearchResult {
		self.items
			.binary_search_by(|probe| comparer.compare(probe, item))
			.into()
	}

	pub fn binary_search_by(&self, f: impl FnMut(&T) -> Ordering) -> SearchResult {
		self.items.binary_search_by(f).into()
	}

	/// Index of the first element not less than `item`.
	pub fn lower_bound(&self, item: &T) -> usize {
		self.items
			.partition_point(|probe| self.comparer.compare(probe, item) == Ordering::Less)
	}

	/// Index of the first element greater than `item`.
	pub fn upper_bound(&self, item: &T) -> usize {
		self.items
			.partition_point(|probe| self.comparer.compare(probe, item) != Ordering::Greater)
	}

	pub fn contains(&self, item: &T) -> bool {
		self.binary_search(item).is_found()
	}

	/// Inserts `item` at its sorted position and returns that position.
	///
	/// An item equal to existing elements is placed after them.
	pub fn insert(&mut self, item: T) -> usize {
		let i = match self.binary_search(&item) {
			SearchResult::Found(_) => self.upper_bound(&item),
			SearchResult::InsertAt(i) => i,
		};

		self.items.insert(i, item);
		i
	}

	/// Replaces the element at `index`, returning the previous one.
	///
	/// If `value` does not belong at `index`, the whole vector is sorted
	/// again.
	pub fn set(&mut self, index: usize, value: T) -> Result<T> {
		check_index(index, self.len())?;

		let fits_before = index == 0
			|| self.comparer.compare(&self.items[index - 1], &value) != Ordering::Greater;
		let fits_after = index + 1 == self.items.len()
			|| self.comparer.compare(&value, &self.items[index + 1]) != Ordering::Greater;

		let previous = std::mem::replace(&mut self.items[index], value);

		if !(fits_before && fits_after) {
			tracing::trace!(index, len = self.items.len(), "replacement out of order, sorting again");
			self.sort();
		}

		Ok(previous)
	}

	/// Removes one element equal to `item`, if any.
	pub fn remove(&mut self, item: &T) -> bool {
		let search = self
			.items
			.binary_search_by(|probe| self.comparer.compare(probe, item));

		match search {
			Ok(i) => {
				self.items.remove(i);
				true
			}
			Err(_) => false,
		}
	}

	/// Removes one element equal to `item` according to `comparer`, which
	/// must agree with the collection's order.
	pub fn remove_with(&mut self, item: &T, comparer: &impl Comparer<T>) -> bool {
		match self.binary_search_with(item, comparer) {
			SearchResult::Found(i) => {
				self.items.remove(i);
				true
			}
			SearchResult::InsertAt(_) => false,
		}
	}

	/// Computes the index range of the elements between `lower` and `upper`,
	/// both inclusive.
	///
	/// A missing bound leaves that side of the range open. The range is empty
	/// when `lower > upper`.
	pub fn view_indices(&self, lower: Option<&T>, upper: Option<&T>) -> Range<usize> {
		let start = lower.map(|l| self.lower_bound(l)).unwrap_or(0);
		let end = upper
			.map(|u| self.upper_bound(u))
			.unwrap_or(self.items.len());

		if end < start {
			start..start
		} else {
			start..end
		}
	}

	/// Returns a new collection with every element `e` such that
	/// `lower <= e <= upper`.
	pub fn get_view_between(&self, lower: Option<&T>, upper: Option<&T>) -> Self
	where
		T: Clone,
		C: Clone,
	{
		let range = self.view_indices(lower, upper);

		if range.is_empty() {
			tracing::trace!(len = self.items.len(), "empty view");
		}

		self.cloned_range(range)
	}
}

impl<T, C> Index<usize> for SortedVec<T, C> {
	type Output = T;

	fn index(&self, index: usize) -> &Self::Output {
		&self.items[index]
	}
}

impl<T, C> AsRef<[T]> for SortedVec<T, C> {
	fn as_ref(&self) -> &[T] {
		&self.items
	}
}

impl<T: Ord> From<Vec<T>> for SortedVec<T> {
	fn from(value: Vec<T>) -> Self {
		Self::from_vec_with(value, Natural)
	}
}

pub type IntoIter<T> = std::vec::IntoIter<T>;

impl<T, C> IntoIterator for SortedVec<T, C> {
	type IntoIter = IntoIter<T>;
	type Item = T;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl<'a, T, C> IntoIterator for &'a SortedVec<T, C> {
	type IntoIter = Iter<'a, T>;
	type Item = &'a T;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<T: PartialEq, C> PartialEq for SortedVec<T, C> {
	fn eq(&self, other: &Self) -> bool {
		self.items == other.items
	}
}

impl<T: Eq, C> Eq for SortedVec<T, C> {}

impl<T: PartialOrd, C> PartialOrd for SortedVec<T, C> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.items.partial_cmp(&other.items)
	}
}

impl<T: Ord, C> Ord for SortedVec<T, C> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.items.cmp(&other.items)
	}
}

impl<T: Hash, C> Hash for SortedVec<T, C> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_usize(self.len());
		for item in self {
			item.hash(state);
		}
	}
}

impl<T: fmt::Debug, C> fmt::Debug for SortedVec<T, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<T, C: Comparer<T>> Extend<T> for SortedVec<T, C> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for item in iter {
			self.insert(item);
		}
	}
}

impl<T, C: Comparer<T> + Default> FromIterator<T> for SortedVec<T, C> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::from_vec_with(iter.into_iter().collect(), C::default())
	}
}

pub struct Iter<'a, T>(std::slice::Iter<'a, T>);

impl<'a, T> Iterator for Iter<'a, T> {
	type Item = &'a T;

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next()
	}
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.0.next_back()
	}
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}
