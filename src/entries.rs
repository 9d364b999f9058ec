use equivalent::Comparable;
use raw_btree::RawBTree;
use std::cmp::Ordering;

/// Key/collection pairs in key insertion order, indexed by key.
///
/// The B-tree stores positions into `entries`, ordered by the key found at
/// that position.
#[derive(Clone)]
pub(crate) struct Entries<K, C> {
	entries: Vec<(K, C)>,
	index: RawBTree<usize>,
}

impl<K, C> Entries<K, C> {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			index: RawBTree::new(),
		}
	}

	pub fn as_slice(&self) -> &[(K, C)] {
		&self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn get_full<Q>(&self, key: &Q) -> Option<(usize, &K, &C)>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.index
			.get(outer_cmp(&self.entries), key)
			.copied()
			.map(|i| {
				let (k, c) = &self.entries[i];
				(i, k, c)
			})
	}

	pub fn get<Q>(&self, key: &Q) -> Option<&C>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.get_full(key).map(|(_, _, c)| c)
	}

	pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut C>
	where
		Q: ?Sized + Comparable<K>,
	{
		self.index
			.get(outer_cmp(&self.entries), key)
			.copied()
			.map(|i| &mut self.entries[i].1)
	}

	/// Returns the collection of `key`, creating it with `f` first if the key
	/// is not yet present.
	pub fn get_or_insert_with(&mut self, key: K, f: impl FnOnce() -> C) -> &mut C
	where
		K: Ord,
	{
		let i = match self.index.get(outer_cmp(&self.entries), &key).copied() {
			Some(i) => i,
			None => self.force_insert(key, f()),
		};

		&mut self.entries[i].1
	}

	/// Sets the collection of `key`, returning the previous one.
	///
	/// A new key is appended at the end.
	pub fn insert(&mut self, key: K, collection: C) -> Option<C>
	where
		K: Ord,
	{
		match self.index.get(outer_cmp(&self.entries), &key).copied() {
			Some(i) => Some(std::mem::replace(&mut self.entries[i].1, collection)),
			None => {
				self.force_insert(key, collection);
				None
			}
		}
	}

	fn force_insert(&mut self, key: K, collection: C) -> usize
	where
		K: Ord,
	{
		let i = self.entries.len();
		self.entries.push((key, collection));
		self.index.insert(inner_cmp(&self.entries), i);
		i
	}

	/// Removes `key`, keeping the insertion order of the remaining keys.
	pub fn shift_remove<Q>(&mut self, key: &Q) -> Option<(K, C)>
	where
		Q: ?Sized + Comparable<K>,
	{
		let i = self.index.remove(outer_cmp(&self.entries), key)?;

		let entry = self.entries.remove(i);

		// Shift larger indices.
		for j in self.index.iter_mut() {
			if *j > i {
				*j -= 1;
			}
		}

		Some(entry)
	}

	/// Keeps only the entries for which `f` returns `true`, and returns how
	/// many were removed.
	pub fn retain(&mut self, mut f: impl FnMut(&K, &mut C) -> bool) -> usize
	where
		K: Ord,
	{
		let len = self.entries.len();
		self.entries.retain_mut(|(k, c)| f(k, c));

		let removed = len - self.entries.len();
		if removed > 0 {
			self.reindex();
		}

		removed
	}

	fn reindex(&mut self)
	where
		K: Ord,
	{
		self.index = RawBTree::new();
		for i in 0..self.entries.len() {
			self.index.insert(inner_cmp(&self.entries), i);
		}
	}

	pub fn clear(&mut self) {
		self.entries.clear();
		self.index = RawBTree::new();
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<(K, C)> {
		self.entries.iter_mut()
	}
}

fn inner_cmp<K, C>(entries: &[(K, C)]) -> impl use<'_, K, C> + Fn(&usize, &usize) -> Ordering
where
	K: Ord,
{
	|&i, &j| entries[i].0.cmp(&entries[j].0)
}

fn outer_cmp<K, C, Q>(entries: &[(K, C)]) -> impl use<'_, K, C, Q> + Fn(&usize, &Q) -> Ordering
where
	Q: ?Sized + Comparable<K>,
{
	|&i, q| q.compare(&entries[i].0).reverse()
}
