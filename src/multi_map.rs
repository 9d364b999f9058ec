//! Map associating each key with a collection of values.
use core::fmt;
use equivalent::{Comparable, Equivalent};
use std::{iter::FusedIterator, marker::PhantomData, ops::Index};

use crate::{entries::Entries, Error, Result, ValueCollection};

/// What happens to a key whose collection loses its last value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyKeyPolicy {
	/// The key is removed: no key is ever observed with zero values.
	#[default]
	Prune,

	/// The key stays, associated to an empty collection.
	Retain,
}

/// Map from unique keys to collections of values.
///
/// Each key owns exactly one collection of type `C`, built by the map's
/// factory when the first value is inserted for that key. The collection
/// type decides how values are stored: a [`Vec`] (the default) keeps every
/// value in insertion order while a set absorbs duplicates.
///
/// Keys are kept in insertion order and looked up through a B-tree index.
///
/// ```
/// use sorted_multimap::MultiValueMap;
///
/// let mut map: MultiValueMap<&str, i32> = MultiValueMap::new();
/// map.insert("a", 1);
/// map.insert("a", 2);
/// map.insert("b", 2);
///
/// assert_eq!(map.get_values("a").copied().collect::<Vec<_>>(), [1, 2]);
/// assert_eq!(map.keys_containing(&[1]).collect::<Vec<_>>(), [&"a"]);
/// assert_eq!(map.get_values("c").count(), 0);
/// ```
pub struct MultiValueMap<K, V, C = Vec<V>> {
	entries: Entries<K, C>,
	factory: fn() -> C,
	policy: EmptyKeyPolicy,
	value: PhantomData<fn() -> V>,
}

impl<K, V, C: Default> Default for MultiValueMap<K, V, C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V, C: Default> MultiValueMap<K, V, C> {
	pub fn new() -> Self {
		Self::with_factory(C::default)
	}
}

impl<K, V, C> MultiValueMap<K, V, C> {
	/// Creates an empty map building value collections with `factory`.
	pub fn with_factory(factory: fn() -> C) -> Self {
		Self {
			entries: Entries::new(),
			factory,
			policy: EmptyKeyPolicy::default(),
			value: PhantomData,
		}
	}

	/// Sets the policy applied to keys left without values.
	pub fn with_policy(mut self, policy: EmptyKeyPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn policy(&self) -> EmptyKeyPolicy {
		self.policy
	}

	pub fn factory(&self) -> fn() -> C {
		self.factory
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn keys(&self) -> Keys<K, C> {
		Keys(self.entries.as_slice().iter())
	}

	/// Iterates over the keys and their collections, in key insertion order.
	pub fn collections(&self) -> Collections<K, C> {
		Collections(self.entries.as_slice().iter())
	}

	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		Q: ?Sized + Comparable<K>,
	{
		self.entries.get(key).is_some()
	}

	pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.entries.get_full(key).map(|(i, _, _)| i)
	}

	/// Returns the collection of `key`, if any.
	pub fn get<Q>(&self, key: &Q) -> Option<&C>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.entries.get(key)
	}

	/// Returns a mutable reference to the collection of `key`.
	///
	/// The empty-key policy is not applied to changes made through this
	/// reference: a collection emptied here keeps its key until it is
	/// removed with [`Self::remove`], whatever the policy. Later operations
	/// on other keys leave it in place.
	pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut C>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.entries.get_mut(key)
	}

	pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &C)>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.entries.get_full(key).map(|(_, k, c)| (k, c))
	}

	/// Returns the collection of `key`, or [`Error::KeyNotFound`].
	pub fn try_get<Q>(&self, key: &Q) -> Result<&C>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.get(key).ok_or(Error::KeyNotFound)
	}

	/// Removes `key` and its whole collection.
	pub fn remove<Q>(&mut self, key: &Q) -> Option<C>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.remove_entry(key).map(|(_, c)| c)
	}

	pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, C)>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.entries.shift_remove(key)
	}

	/// Removes every given key, returning how many were present.
	pub fn remove_keys<'q, Q>(&mut self, keys: impl IntoIterator<Item = &'q Q>) -> usize
	where
		Q: 'q + ?Sized + Comparable<K>,
	{
		let mut count = 0;
		for key in keys {
			if self.entries.shift_remove(key).is_some() {
				count += 1;
			}
		}

		count
	}

	/// Keeps only the keys for which `f` returns `true`.
	pub fn retain(&mut self, mut f: impl FnMut(&K, &C) -> bool) -> usize
	where
		K: Ord,
	{
		self.entries.retain(|k, c| f(k, c))
	}

	pub fn clear(&mut self) {
		self.entries.clear()
	}
}

impl<K, V, C: ValueCollection<V>> MultiValueMap<K, V, C> {
	/// Total number of values, across all keys.
	pub fn value_count(&self) -> usize {
		self.entries.as_slice().iter().map(|(_, c)| c.len()).sum()
	}

	/// Iterates over the values of `key`. The iterator is empty if the key
	/// is absent.
	pub fn get_values<Q>(&self, key: &Q) -> GetValues<V, C>
	where
		Q: ?Sized + Comparable<K>,
	{
		GetValues {
			inner: self.entries.get(key).map(|c| c.iter()),
			value: PhantomData,
		}
	}

	/// Iterates over every key/value pair, grouped by key in key insertion
	/// order, values in collection order.
	pub fn iter(&self) -> Iter<K, V, C> {
		Flatten::new(self.entries.as_slice().iter())
	}

	/// Same as [`Self::iter`], restricted to the given keys.
	///
	/// Pairs still come in key insertion order, not in the order of `keys`.
	pub fn flattened_entries_of<'a, Q>(&'a self, keys: &'a [&'a Q]) -> Flatten<'a, K, V, C, Subset<'a, K, C, Q>>
	where
		Q: ?Sized + Equivalent<K>,
	{
		Flatten::new(Subset {
			entries: self.entries.as_slice().iter(),
			keys,
		})
	}

	pub fn flattened_values(&self) -> FlattenedValues<K, V, C> {
		FlattenedValues(self.iter())
	}

	pub fn flattened_values_of<'a, Q>(&'a self, keys: &'a [&'a Q]) -> FlattenedValues<'a, K, V, C, Subset<'a, K, C, Q>>
	where
		Q: ?Sized + Equivalent<K>,
	{
		FlattenedValues(self.flattened_entries_of(keys))
	}

	/// Iterates over the keys whose collection contains at least one of
	/// `values`.
	pub fn keys_containing<'a>(&'a self, values: &'a [V]) -> KeysContaining<'a, K, V, C> {
		KeysContaining {
			entries: self.entries.as_slice().iter(),
			values,
		}
	}

	pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
	where
		Q: ?Sized + Comparable<K>,
	{
		self.entries.get(key).is_some_and(|c| c.contains(value))
	}

	/// Checks every collection for `value`.
	pub fn contains_value(&self, value: &V) -> bool {
		self.entries
			.as_slice()
			.iter()
			.any(|(_, c)| c.contains(value))
	}

	/// Adds `value` to the collection of `key`, creating the collection if
	/// needed.
	///
	/// Returns `false` if the collection rejected the value (a set already
	/// holding it, for instance).
	pub fn insert(&mut self, key: K, value: V) -> bool
	where
		K: Ord,
	{
		self.entries
			.get_or_insert_with(key, self.factory)
			.insert(value)
	}

	/// Adds every value to the collection of `key`, returning how many the
	/// collection accepted.
	///
	/// No collection is created when `values` is empty.
	pub fn insert_all(&mut self, key: K, values: impl IntoIterator<Item = V>) -> usize
	where
		K: Ord,
	{
		let mut values = values.into_iter().peekable();
		if values.peek().is_none() {
			return 0;
		}

		let collection = self.entries.get_or_insert_with(key, self.factory);
		let mut count = 0;
		for value in values {
			if collection.insert(value) {
				count += 1;
			}
		}

		count
	}

	/// Replaces the whole collection of `key` with a new one holding only
	/// `value`, returning the previous collection.
	pub fn insert_single(&mut self, key: K, value: V) -> Option<C>
	where
		K: Ord,
	{
		let mut collection = (self.factory)();
		collection.insert(value);
		self.entries.insert(key, collection)
	}

	/// Adds `value` to the collection of `key` unless it already contains it,
	/// whatever the collection type.
	///
	/// Returns `true` if the value was added.
	pub fn insert_unique(&mut self, key: K, value: V) -> bool
	where
		K: Ord,
	{
		match self.entries.get_mut(&key) {
			Some(collection) => !collection.contains(&value) && collection.insert(value),
			None => self.insert(key, value),
		}
	}

	/// Sets the collection of `key`, returning the previous one.
	///
	/// With [`EmptyKeyPolicy::Prune`], an empty `collection` removes the key.
	pub fn replace(&mut self, key: K, collection: C) -> Option<C>
	where
		K: Ord,
	{
		if collection.is_empty() && self.policy == EmptyKeyPolicy::Prune {
			self.remove(&key)
		} else {
			self.entries.insert(key, collection)
		}
	}

	/// Removes one occurrence of `value` from every collection.
	///
	/// Returns the number of collections that held the value. With
	/// [`EmptyKeyPolicy::Prune`], the keys whose collection lost its last
	/// value are removed.
	pub fn remove_value(&mut self, value: &V) -> usize
	where
		K: Ord,
	{
		let prune = self.policy == EmptyKeyPolicy::Prune;
		let mut count = 0;
		let removed = self.entries.retain(|_, collection| {
			if collection.remove(value) {
				count += 1;
				!(prune && collection.is_empty())
			} else {
				true
			}
		});

		if removed > 0 {
			tracing::trace!(removed, "pruned keys left without values");
		}

		count
	}

	/// Removes one occurrence of `value` from the collection of each given
	/// key.
	///
	/// Only the given keys are subject to the empty-key policy.
	pub fn remove_value_from<'q, Q>(&mut self, value: &V, keys: impl IntoIterator<Item = &'q Q>) -> usize
	where
		Q: 'q + ?Sized + Comparable<K>,
	{
		let mut count = 0;
		for key in keys {
			let emptied = match self.entries.get_mut(key) {
				Some(collection) => {
					if collection.remove(value) {
						count += 1;
						collection.is_empty()
					} else {
						false
					}
				}
				None => false,
			};

			if emptied && self.policy == EmptyKeyPolicy::Prune {
				self.entries.shift_remove(key);
				tracing::trace!("pruned key left without values");
			}
		}

		count
	}
}

impl<K, V, C, Q> Index<&Q> for MultiValueMap<K, V, C>
where
	Q: ?Sized + Comparable<K>,
{
	type Output = C;

	fn index(&self, key: &Q) -> &Self::Output {
		self.get(key).expect("no entry found for key")
	}
}

impl<K: Clone, V, C: Clone> Clone for MultiValueMap<K, V, C> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
			factory: self.factory,
			policy: self.policy,
			value: PhantomData,
		}
	}
}

impl<K: PartialEq, V, C: PartialEq> PartialEq for MultiValueMap<K, V, C> {
	fn eq(&self, other: &Self) -> bool {
		self.entries.as_slice() == other.entries.as_slice()
	}
}

impl<K: Eq, V, C: Eq> Eq for MultiValueMap<K, V, C> {}

impl<K: fmt::Debug, V, C: fmt::Debug> fmt::Debug for MultiValueMap<K, V, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.collections()).finish()
	}
}

impl<K: Ord, V, C: ValueCollection<V>> Extend<(K, V)> for MultiValueMap<K, V, C> {
	fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<K: Ord, V, C: ValueCollection<V> + Default> FromIterator<(K, V)> for MultiValueMap<K, V, C> {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut result = Self::new();
		result.extend(iter);
		result
	}
}

impl<'a, K, V, C: ValueCollection<V>> IntoIterator for &'a MultiValueMap<K, V, C> {
	type IntoIter = Iter<'a, K, V, C>;
	type Item = (&'a K, &'a V);

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

pub struct Keys<'a, K, C>(std::slice::Iter<'a, (K, C)>);

impl<'a, K, C> Iterator for Keys<'a, K, C> {
	type Item = &'a K;

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|(k, _)| k)
	}
}

impl<K, C> DoubleEndedIterator for Keys<'_, K, C> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.0.next_back().map(|(k, _)| k)
	}
}

impl<K, C> ExactSizeIterator for Keys<'_, K, C> {}

impl<K, C> FusedIterator for Keys<'_, K, C> {}

pub struct Collections<'a, K, C>(std::slice::Iter<'a, (K, C)>);

impl<'a, K, C> Iterator for Collections<'a, K, C> {
	type Item = (&'a K, &'a C);

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|(k, c)| (k, c))
	}
}

impl<K, C> DoubleEndedIterator for Collections<'_, K, C> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.0.next_back().map(|(k, c)| (k, c))
	}
}

impl<K, C> ExactSizeIterator for Collections<'_, K, C> {}

impl<K, C> FusedIterator for Collections<'_, K, C> {}

pub struct GetValues<'a, V: 'a, C: ValueCollection<V> + 'a> {
	inner: Option<C::Iter<'a>>,
	value: PhantomData<&'a V>,
}

impl<'a, V: 'a, C: ValueCollection<V> + 'a> Iterator for GetValues<'a, V, C> {
	type Item = &'a V;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.as_mut()?.next()
	}
}

/// Entries of the keys listed in a slice, in key insertion order.
pub struct Subset<'a, K, C, Q: ?Sized> {
	entries: std::slice::Iter<'a, (K, C)>,
	keys: &'a [&'a Q],
}

impl<'a, K, C, Q> Iterator for Subset<'a, K, C, Q>
where
	Q: ?Sized + Equivalent<K>,
{
	type Item = &'a (K, C);

	fn next(&mut self) -> Option<Self::Item> {
		let keys = self.keys;
		self.entries
			.find(|(k, _)| keys.iter().any(|q| q.equivalent(k)))
	}
}

/// Key/value pairs of a sequence of key/collection entries.
pub struct Flatten<'a, K, V: 'a, C: ValueCollection<V> + 'a, I> {
	outer: I,
	current: Option<(&'a K, C::Iter<'a>)>,
	value: PhantomData<&'a V>,
}

pub type Iter<'a, K, V, C> = Flatten<'a, K, V, C, std::slice::Iter<'a, (K, C)>>;

impl<'a, K, V: 'a, C: ValueCollection<V> + 'a, I> Flatten<'a, K, V, C, I> {
	fn new(outer: I) -> Self {
		Self {
			outer,
			current: None,
			value: PhantomData,
		}
	}
}

impl<'a, K, V, C, I> Iterator for Flatten<'a, K, V, C, I>
where
	K: 'a,
	V: 'a,
	C: ValueCollection<V> + 'a,
	I: Iterator<Item = &'a (K, C)>,
{
	type Item = (&'a K, &'a V);

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			match &mut self.current {
				Some((k, values)) => match values.next() {
					Some(v) => break Some((*k, v)),
					None => self.current = None,
				},
				None => match self.outer.next() {
					Some((k, c)) => self.current = Some((k, c.iter())),
					None => break None,
				},
			}
		}
	}
}

impl<'a, K, V, C, I> FusedIterator for Flatten<'a, K, V, C, I>
where
	K: 'a,
	V: 'a,
	C: ValueCollection<V> + 'a,
	I: FusedIterator<Item = &'a (K, C)>,
{
}

pub struct FlattenedValues<'a, K, V: 'a, C: ValueCollection<V> + 'a, I = std::slice::Iter<'a, (K, C)>>(
	Flatten<'a, K, V, C, I>,
);

impl<'a, K, V, C, I> Iterator for FlattenedValues<'a, K, V, C, I>
where
	K: 'a,
	V: 'a,
	C: ValueCollection<V> + 'a,
	I: Iterator<Item = &'a (K, C)>,
{
	type Item = &'a V;

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|(_, v)| v)
	}
}

pub struct KeysContaining<'a, K, V, C> {
	entries: std::slice::Iter<'a, (K, C)>,
	values: &'a [V],
}

impl<'a, K, V, C: ValueCollection<V>> Iterator for KeysContaining<'a, K, V, C> {
	type Item = &'a K;

	fn next(&mut self) -> Option<Self::Item> {
		let values = self.values;
		self.entries
			.find(|(_, c)| values.iter().any(|v| c.contains(v)))
			.map(|(k, _)| k)
	}
}
