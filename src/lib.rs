//! Sorted vector and multi-value map data structures.
//!
//! - [`SortedVec`] keeps its elements sorted by a [`Comparer`], answering
//!   lookups with binary searches and extracting views between two values.
//! - [`MultiValueMap`] associates each key with a collection of values whose
//!   type, a [`ValueCollection`], is chosen by the user.
//!
//! Both come with a copy-on-write variant, [`ImmutableSortedVec`] and
//! [`ImmutableMultiValueMap`], where every modification returns a new version.
pub mod collection;
pub mod compare;
mod entries;
pub mod error;
pub mod immutable_multi_map;
pub mod immutable_sorted_vec;
pub mod multi_map;
pub mod search;
pub mod sorted_vec;

pub use collection::ValueCollection;
pub use compare::{Comparer, Natural, Reversed};
pub use error::{Error, Result};
pub use immutable_multi_map::ImmutableMultiValueMap;
pub use immutable_sorted_vec::ImmutableSortedVec;
pub use multi_map::{EmptyKeyPolicy, MultiValueMap};
pub use search::SearchResult;
pub use sorted_vec::SortedVec;

pub use equivalent::{Comparable, Equivalent};

mod r#impl;
#[allow(unused_imports)]
pub use r#impl::*;
