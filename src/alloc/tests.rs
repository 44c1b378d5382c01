//! Unit tests for the arena allocator.

use super::arena::{kilo_bytes, Arena, MAX_ALIGN};

#[test]
fn test_total_allocated_covers_requests() {
    let arena = Arena::new(256);
    let sizes = [1, 7, 16, 33, 100, 250, 3, 512, 64];

    for size in sizes {
        arena.alloc_raw(size, 1);
    }

    assert!(arena.total_allocated() >= sizes.iter().sum::<usize>());
    assert_eq!(arena.total_allocations(), sizes.len());
}

#[test]
fn test_allocations_are_aligned() {
    let arena = Arena::new(128);

    for size in [1, 3, 17, 40, 9, 200] {
        let ptr = arena.alloc_raw(size, 1);
        assert_eq!(ptr.as_ptr() as usize % MAX_ALIGN, 0);
    }

    let value = arena.alloc(7u64);
    assert_eq!(value as *const u64 as usize % MAX_ALIGN, 0);
}

#[test]
fn test_values_survive_block_switches() {
    let arena = Arena::new(64);
    let values: Vec<&mut u64> = (0..100).map(|i| arena.alloc(i as u64)).collect();

    assert!(arena.block_count() > 1);
    for (i, value) in values.iter().enumerate() {
        assert_eq!(**value, i as u64);
    }
}

#[test]
fn test_oversized_request_gets_dedicated_block() {
    let arena = Arena::new(64);
    arena.alloc_raw(8, 1);
    arena.alloc_raw(1000, 1);

    assert_eq!(arena.block_count(), 2);
    assert!(arena.capacity() >= 64 + 1000);
}

#[test]
fn test_reset_reuses_blocks() {
    let mut arena = Arena::new(kilo_bytes(1));

    for _ in 0..64 {
        arena.alloc_raw(100, 8);
    }
    let blocks = arena.block_count();
    let capacity = arena.capacity();
    assert!(blocks > 1);

    arena.reset();
    assert_eq!(arena.total_allocated(), 0);

    for _ in 0..64 {
        arena.alloc_raw(100, 8);
    }
    assert_eq!(arena.block_count(), blocks);
    assert_eq!(arena.capacity(), capacity);
}

#[test]
fn test_reset_first_fit_picks_large_enough_block() {
    let mut arena = Arena::new(64);
    arena.alloc_raw(32, 1);
    arena.alloc_raw(4096, 1);
    arena.alloc_raw(32, 1);
    let blocks = arena.block_count();

    arena.reset();

    // The big block was retired and can now hold the big request again.
    arena.alloc_raw(48, 1);
    arena.alloc_raw(4096, 1);
    assert_eq!(arena.block_count(), blocks);
}

#[test]
fn test_alloc_struct() {
    #[derive(Debug, PartialEq)]
    struct Node<'a> {
        value: u32,
        next: Option<&'a Node<'a>>,
    }

    let arena = Arena::default();
    let tail = arena.alloc(Node { value: 2, next: None });
    let head = arena.alloc(Node { value: 1, next: Some(&*tail) });

    assert_eq!(head.value, 1);
    assert_eq!(head.next.map(|node| node.value), Some(2));
}

#[test]
#[should_panic]
fn test_rejects_overaligned_requests() {
    let arena = Arena::default();
    arena.alloc_raw(8, MAX_ALIGN * 2);
}
