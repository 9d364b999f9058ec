use thiserror::Error;

/// Errors raised by fallible collection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
	#[error("index {index} is out of range for length {len}")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("range of {count} elements starting at {index} is out of bounds for length {len}")]
	RangeOutOfBounds {
		index: usize,
		count: usize,
		len: usize,
	},

	#[error("no entry found for key")]
	KeyNotFound,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Checks that `[index, index + count)` lies within `0..len`.
pub(crate) fn check_range(index: usize, count: usize, len: usize) -> Result<std::ops::Range<usize>> {
	match index.checked_add(count) {
		Some(end) if end <= len => Ok(index..end),
		_ => Err(Error::RangeOutOfBounds { index, count, len }),
	}
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
	if index < len {
		Ok(())
	} else {
		Err(Error::IndexOutOfRange { index, len })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn range_checks() {
		assert_eq!(check_range(0, 0, 0), Ok(0..0));
		assert_eq!(check_range(1, 2, 3), Ok(1..3));
		assert_eq!(
			check_range(2, 2, 3),
			Err(Error::RangeOutOfBounds {
				index: 2,
				count: 2,
				len: 3
			})
		);
		assert!(check_range(usize::MAX, 2, 3).is_err());
	}

	#[test]
	fn index_checks() {
		assert!(check_index(0, 1).is_ok());
		assert_eq!(check_index(1, 1), Err(Error::IndexOutOfRange { index: 1, len: 1 }));
	}
}
