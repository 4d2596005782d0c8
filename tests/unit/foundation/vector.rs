use super::*;

define_idx! {
    struct TestIdx;
}

#[test]
fn push_hands_out_stable_indices() {
    let mut v = IdxVec::<TestIdx, &str>::new();
    let a = v.push("a").unwrap();
    let b = v.push("b").unwrap();
    for i in 0..100 {
        v.push(if i % 2 == 0 { "x" } else { "y" }).unwrap();
    }
    assert_eq!(a, TestIdx(0));
    assert_eq!(b, TestIdx(1));
    assert_eq!(v[a], "a");
    assert_eq!(v.get(b), Some(&"b"));
    assert_eq!(v.len(), 102);
}

#[test]
fn clear_empties_and_restarts_numbering() {
    let mut v = IdxVec::<TestIdx, u32>::with_capacity(4).unwrap();
    v.push(7).unwrap();
    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.get(TestIdx(0)), None);
    assert_eq!(v.push(9).unwrap(), TestIdx(0));
}

#[test]
fn iter_enumerated_pairs_indices() {
    let mut v = IdxVec::<TestIdx, u32>::new();
    v.push(10).unwrap();
    v.push(20).unwrap();
    let pairs: Vec<_> = v.iter_enumerated().map(|(i, x)| (i.0, *x)).collect();
    assert_eq!(pairs, vec![(0, 10), (1, 20)]);
    v[TestIdx(1)] += 1;
    assert_eq!(v.last(), Some(&21));
}

#[test]
fn absurd_reservation_reports_no_memory() {
    let mut v = IdxVec::<TestIdx, u64>::new();
    assert_eq!(v.reserve(usize::MAX), Err(VpeError::NoMemory));
}
