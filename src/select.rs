use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Returns the `n` largest items in descending order.
///
/// A bounded min-heap of size `n` is kept while scanning the input, so
/// the selection costs `O(len log n)` and never materializes a full sort.
pub(crate) fn n_largest<T: Ord>(n: usize, items: Vec<T>) -> Vec<T> {
    let mut heap = BinaryHeap::with_capacity(n + 1);
    for item in items {
        heap.push(Reverse(item));
        if heap.len() > n {
            heap.pop();
        }
    }
    let mut selected: Vec<T> = heap.into_iter().map(|Reverse(item)| item).collect();
    selected.sort_unstable_by(|x, y| y.cmp(x));
    selected
}

#[test]
fn test_n_largest() {
    assert_eq!(n_largest(3, vec![1, 9, 4, 7, 3]), vec![9, 7, 4]);
    assert_eq!(n_largest(10, vec![2, 1]), vec![2, 1]);
    assert_eq!(n_largest::<i32>(3, vec![]), Vec::<i32>::new());
}

#[test]
fn test_n_largest_ties() {
    // ties resolve towards the larger secondary value
    assert_eq!(
        n_largest(2, vec![(1, "a"), (1, "b"), (0, "z")]),
        vec![(1, "b"), (1, "a")]
    );
}
