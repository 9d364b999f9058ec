use core::fmt;
use equivalent::Comparable;
use std::{ops::Deref, sync::Arc};

use crate::{multi_map, EmptyKeyPolicy, MultiValueMap, ValueCollection};

/// Copy-on-write [`MultiValueMap`].
///
/// Every modifying operation copies the map (rebuilding each collection with
/// the same factory and policy), applies the change to the copy and returns
/// it as a new version. Existing versions never change.
///
/// ```
/// use sorted_multimap::ImmutableMultiValueMap;
///
/// let empty: ImmutableMultiValueMap<&str, i32> = ImmutableMultiValueMap::new();
/// let a = empty.insert("a", 1);
/// let b = a.insert("a", 2);
///
/// assert!(empty.is_empty());
/// assert_eq!(a.get_values("a").count(), 1);
/// assert_eq!(b.get_values("a").count(), 2);
/// ```
pub struct ImmutableMultiValueMap<K, V, C = Vec<V>> {
	inner: Arc<MultiValueMap<K, V, C>>,
}

impl<K, V, C: Default> ImmutableMultiValueMap<K, V, C> {
	pub fn new() -> Self {
		Self::from(MultiValueMap::new())
	}
}

impl<K, V, C: Default> Default for ImmutableMultiValueMap<K, V, C> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V, C> ImmutableMultiValueMap<K, V, C> {
	pub fn with_factory(factory: fn() -> C) -> Self {
		Self::from(MultiValueMap::with_factory(factory))
	}

	pub fn with_policy(self, policy: EmptyKeyPolicy) -> Self
	where
		K: Clone,
		C: Clone,
	{
		Self::from(Arc::unwrap_or_clone(self.inner).with_policy(policy))
	}

	/// Checks whether both values are the same version.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	pub fn as_map(&self) -> &MultiValueMap<K, V, C> {
		&self.inner
	}

	pub fn into_map(self) -> MultiValueMap<K, V, C>
	where
		K: Clone,
		C: Clone,
	{
		Arc::unwrap_or_clone(self.inner)
	}
}

impl<K: Clone + Ord, V, C: Clone + ValueCollection<V>> ImmutableMultiValueMap<K, V, C> {
	fn update(&self, f: impl FnOnce(&mut MultiValueMap<K, V, C>)) -> Self {
		let mut next = MultiValueMap::clone(&self.inner);
		f(&mut next);
		Self::from(next)
	}

	pub fn insert(&self, key: K, value: V) -> Self {
		self.update(|map| {
			map.insert(key, value);
		})
	}

	/// Adds every value to the collection of `key`.
	pub fn insert_all(&self, key: K, values: impl IntoIterator<Item = V>) -> Self {
		self.update(|map| {
			map.insert_all(key, values);
		})
	}

	/// Adds every key/value pair.
	pub fn insert_entries(&self, entries: impl IntoIterator<Item = (K, V)>) -> Self {
		self.update(|map| map.extend(entries))
	}

	/// See [`MultiValueMap::insert_single`].
	pub fn insert_single(&self, key: K, value: V) -> Self {
		self.update(|map| {
			map.insert_single(key, value);
		})
	}

	/// See [`MultiValueMap::insert_unique`].
	///
	/// Returns the same version if the value was already present.
	pub fn insert_unique(&self, key: K, value: V) -> Self {
		if self.inner.contains(&key, &value) {
			self.clone()
		} else {
			self.update(|map| {
				map.insert_unique(key, value);
			})
		}
	}

	/// Replaces the collection of `key`.
	pub fn set_item(&self, key: K, collection: C) -> Self {
		self.update(|map| {
			map.replace(key, collection);
		})
	}

	pub fn set_items(&self, items: impl IntoIterator<Item = (K, C)>) -> Self {
		self.update(|map| {
			for (key, collection) in items {
				map.replace(key, collection);
			}
		})
	}

	pub fn remove<Q>(&self, key: &Q) -> Self
	where
		Q: ?Sized + Comparable<K>,
	{
		if self.inner.contains_key(key) {
			self.update(|map| {
				map.remove(key);
			})
		} else {
			self.clone()
		}
	}

	pub fn remove_keys<'q, Q>(&self, keys: impl IntoIterator<Item = &'q Q>) -> Self
	where
		Q: 'q + ?Sized + Comparable<K>,
	{
		self.update(|map| {
			map.remove_keys(keys);
		})
	}

	/// See [`MultiValueMap::remove_value`].
	pub fn remove_value(&self, value: &V) -> Self {
		self.update(|map| {
			map.remove_value(value);
		})
	}

	pub fn remove_value_from<'q, Q>(&self, value: &V, keys: impl IntoIterator<Item = &'q Q>) -> Self
	where
		Q: 'q + ?Sized + Comparable<K>,
	{
		self.update(|map| {
			map.remove_value_from(value, keys);
		})
	}

	/// Returns an empty version with the same factory and policy.
	pub fn clear(&self) -> Self {
		Self::from(MultiValueMap::with_factory(self.inner.factory()).with_policy(self.inner.policy()))
	}
}

impl<K, V, C> Clone for ImmutableMultiValueMap<K, V, C> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<K, V, C> Deref for ImmutableMultiValueMap<K, V, C> {
	type Target = MultiValueMap<K, V, C>;

	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

impl<K, V, C> From<MultiValueMap<K, V, C>> for ImmutableMultiValueMap<K, V, C> {
	fn from(value: MultiValueMap<K, V, C>) -> Self {
		Self {
			inner: Arc::new(value),
		}
	}
}

impl<K: Ord, V, C: ValueCollection<V> + Default> FromIterator<(K, V)> for ImmutableMultiValueMap<K, V, C> {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self::from(iter.into_iter().collect::<MultiValueMap<K, V, C>>())
	}
}

impl<'a, K, V, C: ValueCollection<V>> IntoIterator for &'a ImmutableMultiValueMap<K, V, C> {
	type IntoIter = multi_map::Iter<'a, K, V, C>;
	type Item = (&'a K, &'a V);

	fn into_iter(self) -> Self::IntoIter {
		self.inner.iter()
	}
}

impl<K: PartialEq, V, C: PartialEq> PartialEq for ImmutableMultiValueMap<K, V, C> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other) || self.inner == other.inner
	}
}

impl<K: Eq, V, C: Eq> Eq for ImmutableMultiValueMap<K, V, C> {}

impl<K: fmt::Debug, V, C: fmt::Debug> fmt::Debug for ImmutableMultiValueMap<K, V, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.inner, f)
	}
}
