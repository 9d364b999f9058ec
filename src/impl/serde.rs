use std::marker::PhantomData;

use serde::{ser::SerializeMap, Deserialize, Serialize};

use crate::{Comparer, EmptyKeyPolicy, ImmutableMultiValueMap, ImmutableSortedVec, MultiValueMap, SortedVec, ValueCollection};

impl<T: Serialize, C> Serialize for SortedVec<T, C> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_seq(self.iter())
	}
}

impl<'de, T, C> Deserialize<'de> for SortedVec<T, C>
where
	T: Deserialize<'de>,
	C: Comparer<T> + Default,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct Visitor<T, C>(PhantomData<(T, C)>);

		impl<'de, T, C> serde::de::Visitor<'de> for Visitor<T, C>
		where
			T: Deserialize<'de>,
			C: Comparer<T> + Default,
		{
			type Value = SortedVec<T, C>;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(formatter, "a sequence")
			}

			fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::SeqAccess<'de>,
			{
				let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));

				while let Some(item) = seq.next_element()? {
					items.push(item);
				}

				Ok(SortedVec::from_vec_with(items, C::default()))
			}
		}

		deserializer.deserialize_seq(Visitor(PhantomData))
	}
}

impl<T: Serialize, C> Serialize for ImmutableSortedVec<T, C> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.as_sorted_vec().serialize(serializer)
	}
}

impl<'de, T, C> Deserialize<'de> for ImmutableSortedVec<T, C>
where
	T: Deserialize<'de>,
	C: Comparer<T> + Default,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		SortedVec::deserialize(deserializer).map(Self::from)
	}
}

/// Values of a single key, serialized as a sequence.
struct Values<'a, V, C>(&'a C, PhantomData<V>);

impl<V: Serialize, C: ValueCollection<V>> Serialize for Values<'_, V, C> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_seq(self.0.iter())
	}
}

impl<K, V, C> Serialize for MultiValueMap<K, V, C>
where
	K: Serialize,
	V: Serialize,
	C: ValueCollection<V>,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.len()))?;

		for (key, values) in self.collections() {
			map.serialize_entry(key, &Values(values, PhantomData))?;
		}

		map.end()
	}
}

impl<'de, K, V, C> Deserialize<'de> for MultiValueMap<K, V, C>
where
	K: Ord + Deserialize<'de>,
	V: Deserialize<'de>,
	C: ValueCollection<V> + Default,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		struct Visitor<K, V, C>(PhantomData<(K, V, C)>);

		impl<'de, K, V, C> serde::de::Visitor<'de> for Visitor<K, V, C>
		where
			K: Ord + Deserialize<'de>,
			V: Deserialize<'de>,
			C: ValueCollection<V> + Default,
		{
			type Value = MultiValueMap<K, V, C>;

			fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(formatter, "a map")
			}

			fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
			where
				A: serde::de::MapAccess<'de>,
			{
				let mut result: MultiValueMap<K, V, C> = MultiValueMap::new();

				while let Some((key, values)) = map.next_entry::<K, Vec<V>>()? {
					if values.is_empty() {
						// Only a map retaining empty keys serializes one.
						result = result.with_policy(EmptyKeyPolicy::Retain);
						if !result.contains_key(&key) {
							result.replace(key, C::default());
						}
					} else {
						result.insert_all(key, values);
					}
				}

				Ok(result)
			}
		}

		deserializer.deserialize_map(Visitor(PhantomData))
	}
}

impl<K, V, C> Serialize for ImmutableMultiValueMap<K, V, C>
where
	K: Serialize,
	V: Serialize,
	C: ValueCollection<V>,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.as_map().serialize(serializer)
	}
}

impl<'de, K, V, C> Deserialize<'de> for ImmutableMultiValueMap<K, V, C>
where
	K: Ord + Deserialize<'de>,
	V: Deserialize<'de>,
	C: ValueCollection<V> + Default,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		MultiValueMap::deserialize(deserializer).map(Self::from)
	}
}
