use std::num::TryFromIntError;

/// Outcome of a binary search in a sorted sequence.
///
/// Either the position of an element comparing equal to the searched value,
/// or the position at which the value would have to be inserted to keep the
/// sequence sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchResult {
	Found(usize),
	InsertAt(usize),
}

impl SearchResult {
	pub fn is_found(&self) -> bool {
		matches!(self, Self::Found(_))
	}

	pub fn found(&self) -> Option<usize> {
		match self {
			Self::Found(i) => Some(*i),
			Self::InsertAt(_) => None,
		}
	}

	/// Returns the carried index, whatever the variant.
	pub fn index(&self) -> usize {
		match self {
			Self::Found(i) | Self::InsertAt(i) => *i,
		}
	}

	/// Position at which an element equal to the searched value can be
	/// inserted without breaking the order.
	pub fn insertion_index(&self) -> usize {
		self.index()
	}

	/// Decodes a result encoded with the bitwise complement convention, the
	/// inverse of `isize::try_from`.
	pub fn from_raw(raw: isize) -> Self {
		if raw < 0 {
			Self::InsertAt((!raw) as usize)
		} else {
			Self::Found(raw as usize)
		}
	}
}

/// Encodes the result using the bitwise complement convention: a found index
/// is returned as is, an insertion point `i` as `!i` (always negative).
///
/// Fails if the index does not fit in an `isize`.
impl TryFrom<SearchResult> for isize {
	type Error = TryFromIntError;

	fn try_from(value: SearchResult) -> Result<Self, Self::Error> {
		match value {
			SearchResult::Found(i) => isize::try_from(i),
			SearchResult::InsertAt(i) => isize::try_from(i).map(|i| !i),
		}
	}
}

impl From<Result<usize, usize>> for SearchResult {
	fn from(value: Result<usize, usize>) -> Self {
		match value {
			Ok(i) => Self::Found(i),
			Err(i) => Self::InsertAt(i),
		}
	}
}

impl From<SearchResult> for Result<usize, usize> {
	fn from(value: SearchResult) -> Self {
		match value {
			SearchResult::Found(i) => Ok(i),
			SearchResult::InsertAt(i) => Err(i),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn raw(result: SearchResult) -> isize {
		isize::try_from(result).unwrap()
	}

	#[test]
	fn raw_encoding() {
		assert_eq!(raw(SearchResult::Found(0)), 0);
		assert_eq!(raw(SearchResult::Found(7)), 7);
		assert_eq!(raw(SearchResult::InsertAt(0)), -1);
		assert_eq!(raw(SearchResult::InsertAt(3)), -4);

		for encoded in [-5, -1, 0, 4] {
			assert_eq!(raw(SearchResult::from_raw(encoded)), encoded)
		}

		let encoded = raw(SearchResult::InsertAt(2));
		let decoded = if encoded < 0 { !encoded } else { encoded };
		assert_eq!(decoded, 2)
	}

	#[test]
	fn raw_encoding_overflow_is_an_error() {
		assert!(isize::try_from(SearchResult::Found(usize::MAX)).is_err());
		assert!(isize::try_from(SearchResult::InsertAt(usize::MAX)).is_err());
		assert_eq!(raw(SearchResult::InsertAt(isize::MAX as usize)), isize::MIN);
	}

	#[test]
	fn from_std_result() {
		assert_eq!(SearchResult::from(Ok(1)), SearchResult::Found(1));
		assert_eq!(SearchResult::from(Err(4)), SearchResult::InsertAt(4));
		let raw: Result<usize, usize> = SearchResult::InsertAt(4).into();
		assert_eq!(raw, Err(4));
	}
}
