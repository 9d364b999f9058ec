//! Unit tests for SortedVec.

use rstest::rstest;
use sorted_multimap::{Error, Reversed, SearchResult, SortedVec};

fn sorted(items: &[i32]) -> SortedVec<i32> {
	items.iter().copied().collect()
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_is_empty() {
	let numbers: SortedVec<i32> = SortedVec::new();
	assert!(numbers.is_empty());
	assert_eq!(numbers.len(), 0);
	assert_eq!(numbers.first(), None);
}

#[rstest]
fn test_collect_sorts_once() {
	let numbers = sorted(&[5, 1, 3]);
	assert_eq!(numbers.as_slice(), [1, 3, 5]);
	assert!(numbers.is_sorted());
}

#[rstest]
fn test_construction_is_stable_for_equal_keys() {
	let pairs = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
	let by_key = SortedVec::from_vec_with(pairs, |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
	assert_eq!(by_key.as_slice(), [(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
}

#[rstest]
fn test_reversed_comparer() {
	let mut numbers = SortedVec::from_vec_with(vec![1, 3, 2], Reversed(sorted_multimap::Natural));
	assert_eq!(numbers.as_slice(), [3, 2, 1]);
	numbers.insert(0);
	numbers.insert(4);
	assert_eq!(numbers.as_slice(), [4, 3, 2, 1, 0]);
}

// =============================================================================
// Insertion and search
// =============================================================================

#[rstest]
fn test_insert_keeps_order() {
	let mut numbers = sorted(&[5, 1, 3]);
	assert_eq!(numbers.insert(4), 2);
	assert_eq!(numbers.as_slice(), [1, 3, 4, 5]);
	assert_eq!(numbers.binary_search(&4), SearchResult::Found(2));
}

#[rstest]
fn test_insert_places_equal_items_after_existing_run() {
	let mut pairs = SortedVec::with_comparer(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
	pairs.insert((1, 'a'));
	pairs.insert((0, 'b'));
	pairs.insert((1, 'c'));
	pairs.insert((2, 'd'));
	assert_eq!(pairs.insert((1, 'e')), 3);

	assert_eq!(pairs.as_slice(), [(0, 'b'), (1, 'a'), (1, 'c'), (1, 'e'), (2, 'd')]);
}

#[rstest]
#[case(0, SearchResult::InsertAt(0))]
#[case(1, SearchResult::Found(0))]
#[case(2, SearchResult::InsertAt(1))]
#[case(5, SearchResult::Found(2))]
#[case(9, SearchResult::InsertAt(3))]
fn test_binary_search(#[case] item: i32, #[case] expected: SearchResult) {
	let numbers = sorted(&[1, 3, 5]);
	assert_eq!(numbers.binary_search(&item), expected);
	assert_eq!(numbers.contains(&item), expected.is_found());
}

#[rstest]
fn test_binary_search_raw_convention() {
	let numbers = sorted(&[1, 3, 5]);
	assert_eq!(isize::try_from(numbers.binary_search(&3)), Ok(1));
	let raw = isize::try_from(numbers.binary_search(&4)).unwrap();
	assert!(raw < 0);
	assert_eq!(!raw, 2);
}

#[rstest]
fn test_binary_search_with_other_comparer() {
	let words: SortedVec<&str> = ["apple", "Banana", "cherry"].into_iter().collect();
	let by_length = |a: &&str, b: &&str| a.len().cmp(&b.len());
	let short: SortedVec<&str, _> = SortedVec::from_vec_with(words.into_vec(), by_length);
	assert!(short.binary_search_with(&"kiwis", &by_length).is_found());
	assert_eq!(short.binary_search_by(|w| w.len().cmp(&4)), SearchResult::InsertAt(0));
}

#[rstest]
fn test_bounds() {
	let numbers = sorted(&[1, 2, 2, 2, 3]);
	assert_eq!(numbers.lower_bound(&2), 1);
	assert_eq!(numbers.upper_bound(&2), 4);
	assert_eq!(numbers.lower_bound(&0), 0);
	assert_eq!(numbers.upper_bound(&9), 5);
}

// =============================================================================
// Predicate scans
// =============================================================================

#[rstest]
fn test_find_family_scans_everything() {
	let numbers = sorted(&[1, 2, 3, 4, 5, 6]);
	assert_eq!(numbers.find(|n| n % 2 == 0), Some(&2));
	assert_eq!(numbers.find_last(|n| n % 2 == 0), Some(&6));
	assert_eq!(numbers.find_index(|n| n % 3 == 0), Some(2));
	assert_eq!(numbers.find_last_index(|n| n % 3 == 0), Some(5));
	assert_eq!(numbers.find(|n| *n > 10), None);
	assert!(numbers.exists(|n| *n == 4));

	let odd = numbers.find_all(|n| n % 2 == 1);
	assert_eq!(odd.as_slice(), [1, 3, 5]);
}

// =============================================================================
// Ranges and views
// =============================================================================

#[rstest]
fn test_get_range() {
	let numbers = sorted(&[1, 2, 3, 4, 5]);
	assert_eq!(numbers.get_range(1, 3).unwrap().as_slice(), [2, 3, 4]);
	assert!(numbers.get_range(5, 0).unwrap().is_empty());
	assert_eq!(
		numbers.get_range(3, 3),
		Err(Error::RangeOutOfBounds {
			index: 3,
			count: 3,
			len: 5
		})
	);
}

#[rstest]
#[case(Some(2), Some(4), &[3, 4])]
#[case(Some(3), Some(4), &[3, 4])]
#[case(None, Some(3), &[1, 3])]
#[case(Some(4), None, &[4, 5])]
#[case(None, None, &[1, 3, 4, 5])]
#[case(Some(6), Some(9), &[])]
#[case(Some(4), Some(2), &[])]
#[case(Some(2), Some(2), &[])]
fn test_get_view_between(#[case] lower: Option<i32>, #[case] upper: Option<i32>, #[case] expected: &[i32]) {
	let numbers = sorted(&[1, 3, 4, 5]);
	let view = numbers.get_view_between(lower.as_ref(), upper.as_ref());
	assert_eq!(view.as_slice(), expected);
}

#[rstest]
fn test_view_on_empty_collection() {
	let numbers: SortedVec<i32> = SortedVec::new();
	assert!(numbers.get_view_between(Some(&1), Some(&2)).is_empty());
	assert_eq!(numbers.view_indices(None, None), 0..0);
}

#[rstest]
fn test_view_includes_whole_equal_runs() {
	let numbers = sorted(&[1, 2, 2, 2, 3, 3]);
	assert_eq!(numbers.get_view_between(Some(&2), Some(&2)).as_slice(), [2, 2, 2]);
	assert_eq!(numbers.get_view_between(Some(&2), Some(&3)).len(), 5);
}

// =============================================================================
// Replacement
// =============================================================================

#[rstest]
fn test_set_in_place() {
	let mut numbers = sorted(&[1, 3, 5]);
	assert_eq!(numbers.set(1, 4), Ok(3));
	assert_eq!(numbers.as_slice(), [1, 4, 5]);
}

#[rstest]
fn test_set_out_of_place_sorts_again() {
	let mut numbers = sorted(&[1, 3, 5]);
	assert_eq!(numbers.set(0, 9), Ok(1));
	assert_eq!(numbers.as_slice(), [3, 5, 9]);
	assert!(numbers.is_sorted());
}

#[rstest]
fn test_set_out_of_range() {
	let mut numbers = sorted(&[1]);
	assert_eq!(numbers.set(1, 4), Err(Error::IndexOutOfRange { index: 1, len: 1 }));
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
fn test_remove() {
	let mut numbers = sorted(&[1, 2, 2, 3]);
	assert!(numbers.remove(&2));
	assert_eq!(numbers.as_slice(), [1, 2, 3]);
	assert!(!numbers.remove(&7));
}

#[rstest]
fn test_remove_with_other_comparer() {
	let mut pairs = SortedVec::from_vec_with(vec![(1, 'a'), (2, 'b')], |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
	assert!(pairs.remove_with(&(2, 'z'), &|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0)));
	assert_eq!(pairs.as_slice(), [(1, 'a')]);
}

#[rstest]
fn test_remove_all_and_range() {
	let mut numbers = sorted(&[1, 2, 3, 4, 5, 6]);
	assert_eq!(numbers.remove_all(|n| n % 2 == 0), 3);
	assert_eq!(numbers.as_slice(), [1, 3, 5]);

	assert_eq!(numbers.remove_range(0, 2), Ok(vec![1, 3]));
	assert_eq!(numbers.as_slice(), [5]);
	assert!(numbers.remove_range(1, 1).is_err());
	assert_eq!(numbers.remove_at(3), Err(Error::IndexOutOfRange { index: 3, len: 1 }));
	assert_eq!(numbers.remove_at(0), Ok(5));
}

#[rstest]
fn test_pop() {
	let mut numbers = sorted(&[2, 1, 3]);
	assert_eq!(numbers.pop_first(), Some(1));
	assert_eq!(numbers.pop_last(), Some(3));
	numbers.clear();
	assert_eq!(numbers.pop_first(), None);
}

// =============================================================================
// Reversal
// =============================================================================

#[rstest]
fn test_reverse_suspends_order_until_sorted() {
	let mut numbers = sorted(&[1, 2, 3, 4]);
	numbers.reverse();
	assert_eq!(numbers.as_slice(), [4, 3, 2, 1]);
	assert!(!numbers.is_sorted());

	numbers.sort();
	assert_eq!(numbers.as_slice(), [1, 2, 3, 4]);

	numbers.reverse_range(1, 2).unwrap();
	assert_eq!(numbers.as_slice(), [1, 3, 2, 4]);
	assert!(numbers.reverse_range(3, 2).is_err());
}

// =============================================================================
// Traits
// =============================================================================

#[rstest]
fn test_extend_and_iterate() {
	let mut numbers = sorted(&[3]);
	numbers.extend([1, 5, 2]);
	assert_eq!(numbers.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 5]);
	assert_eq!(numbers.iter().rev().next(), Some(&5));
	assert_eq!(numbers[1], 2);
	assert_eq!(format!("{numbers:?}"), "[1, 2, 3, 5]");
	assert_eq!(numbers.clone().into_iter().sum::<i32>(), 11);
}

#[rstest]
fn test_equality_ignores_construction_order() {
	assert_eq!(sorted(&[3, 1, 2]), sorted(&[2, 3, 1]));
	assert!(sorted(&[1, 2]) < sorted(&[1, 3]));
}
