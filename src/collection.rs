//! Per-key value containers of a [`MultiValueMap`](crate::MultiValueMap).
use std::{
	collections::{btree_set, hash_set, vec_deque, BTreeSet, HashSet, VecDeque},
	hash::{BuildHasher, Hash},
};

use crate::{sorted_vec, Comparer, SortedVec};

/// Container holding the values associated to a single key.
///
/// The container decides what an insertion means: a [`Vec`] keeps every
/// value in insertion order, a [`BTreeSet`] or [`HashSet`] absorbs
/// duplicates, a [`SortedVec`] keeps values sorted.
pub trait ValueCollection<V> {
	type Iter<'a>: Iterator<Item = &'a V>
	where
		Self: 'a,
		V: 'a;

	/// Adds a value, returning `true` if the collection changed.
	fn insert(&mut self, value: V) -> bool;

	/// Removes one occurrence of `value`, returning `true` if there was one.
	fn remove(&mut self, value: &V) -> bool;

	fn contains(&self, value: &V) -> bool;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn iter(&self) -> Self::Iter<'_>;

	fn clear(&mut self);
}

impl<V: PartialEq> ValueCollection<V> for Vec<V> {
	type Iter<'a>
		= std::slice::Iter<'a, V>
	where
		V: 'a;

	fn insert(&mut self, value: V) -> bool {
		self.push(value);
		true
	}

	fn remove(&mut self, value: &V) -> bool {
		match self.as_slice().iter().position(|v| v == value) {
			Some(i) => {
				Vec::remove(self, i);
				true
			}
			None => false,
		}
	}

	fn contains(&self, value: &V) -> bool {
		self.as_slice().contains(value)
	}

	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn iter(&self) -> Self::Iter<'_> {
		self.as_slice().iter()
	}

	fn clear(&mut self) {
		Vec::clear(self)
	}
}

impl<V: PartialEq> ValueCollection<V> for VecDeque<V> {
	type Iter<'a>
		= vec_deque::Iter<'a, V>
	where
		V: 'a;

	fn insert(&mut self, value: V) -> bool {
		self.push_back(value);
		true
	}

	fn remove(&mut self, value: &V) -> bool {
		match VecDeque::iter(self).position(|v| v == value) {
			Some(i) => VecDeque::remove(self, i).is_some(),
			None => false,
		}
	}

	fn contains(&self, value: &V) -> bool {
		VecDeque::contains(self, value)
	}

	fn len(&self) -> usize {
		VecDeque::len(self)
	}

	fn iter(&self) -> Self::Iter<'_> {
		VecDeque::iter(self)
	}

	fn clear(&mut self) {
		VecDeque::clear(self)
	}
}

impl<V: Ord> ValueCollection<V> for BTreeSet<V> {
	type Iter<'a>
		= btree_set::Iter<'a, V>
	where
		V: 'a;

	fn insert(&mut self, value: V) -> bool {
		BTreeSet::insert(self, value)
	}

	fn remove(&mut self, value: &V) -> bool {
		BTreeSet::remove(self, value)
	}

	fn contains(&self, value: &V) -> bool {
		BTreeSet::contains(self, value)
	}

	fn len(&self) -> usize {
		BTreeSet::len(self)
	}

	fn iter(&self) -> Self::Iter<'_> {
		BTreeSet::iter(self)
	}

	fn clear(&mut self) {
		BTreeSet::clear(self)
	}
}

impl<V: Eq + Hash, S: BuildHasher> ValueCollection<V> for HashSet<V, S> {
	type Iter<'a>
		= hash_set::Iter<'a, V>
	where
		S: 'a,
		V: 'a;

	fn insert(&mut self, value: V) -> bool {
		HashSet::insert(self, value)
	}

	fn remove(&mut self, value: &V) -> bool {
		HashSet::remove(self, value)
	}

	fn contains(&self, value: &V) -> bool {
		HashSet::contains(self, value)
	}

	fn len(&self) -> usize {
		HashSet::len(self)
	}

	fn iter(&self) -> Self::Iter<'_> {
		HashSet::iter(self)
	}

	fn clear(&mut self) {
		HashSet::clear(self)
	}
}

impl<V, C: Comparer<V>> ValueCollection<V> for SortedVec<V, C> {
	type Iter<'a>
		= sorted_vec::Iter<'a, V>
	where
		C: 'a,
		V: 'a;

	fn insert(&mut self, value: V) -> bool {
		SortedVec::insert(self, value);
		true
	}

	fn remove(&mut self, value: &V) -> bool {
		SortedVec::remove(self, value)
	}

	fn contains(&self, value: &V) -> bool {
		SortedVec::contains(self, value)
	}

	fn len(&self) -> usize {
		SortedVec::len(self)
	}

	fn iter(&self) -> Self::Iter<'_> {
		SortedVec::iter(self)
	}

	fn clear(&mut self) {
		SortedVec::clear(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fill<C: ValueCollection<i32>>(mut c: C) -> C {
		for v in [3, 1, 3, 2] {
			c.insert(v);
		}
		c
	}

	#[test]
	fn list_keeps_duplicates_in_order() {
		let mut c = fill(Vec::new());
		assert_eq!(ValueCollection::iter(&c).copied().collect::<Vec<_>>(), [3, 1, 3, 2]);
		assert!(ValueCollection::remove(&mut c, &3));
		assert_eq!(c, [1, 3, 2]);
		assert!(!ValueCollection::remove(&mut c, &7));
	}

	#[test]
	fn sets_absorb_duplicates() {
		let c = fill(BTreeSet::new());
		assert_eq!(ValueCollection::len(&c), 3);

		let c = fill(HashSet::<i32>::new());
		assert_eq!(ValueCollection::len(&c), 3);
	}

	#[test]
	fn sorted_vec_keeps_order() {
		let c = fill(SortedVec::new());
		assert_eq!(c.as_slice(), [1, 2, 3, 3]);
	}

	#[test]
	fn deque_behaves_like_list() {
		let mut c = fill(VecDeque::new());
		assert!(ValueCollection::contains(&c, &2));
		assert!(ValueCollection::remove(&mut c, &1));
		assert_eq!(c, [3, 3, 2]);
	}
}
