use std::cmp::Ordering;

/// Total order used to keep a [`SortedVec`](crate::SortedVec) sorted.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparer. The behavior of the
/// collections is unspecified if the order is not total.
pub trait Comparer<T: ?Sized> {
	fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Natural ordering of `T`, given by its [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Comparer<T> for Natural {
	fn compare(&self, a: &T, b: &T) -> Ordering {
		a.cmp(b)
	}
}

/// Inverts the order of the wrapped comparer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparer<T>> Comparer<T> for Reversed<C> {
	fn compare(&self, a: &T, b: &T) -> Ordering {
		self.0.compare(b, a)
	}
}

impl<T: ?Sized, F> Comparer<T> for F
where
	F: Fn(&T, &T) -> Ordering,
{
	fn compare(&self, a: &T, b: &T) -> Ordering {
		self(a, b)
	}
}
