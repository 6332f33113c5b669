//! Hybrid list integration tests.
//!
//! Exercises the public API end to end:
//! - Construction and configuration
//! - Append, indexed access, positional insert and removal
//! - Deep copies
//! - Randomized operation sequences checked against a Vec model
//! - Large-chain append/read/erase with timing output

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use hybrid_list::{DEFAULT_BLOCK_SIZE, HybridError, HybridList, ListConfig};

// =============================================================================
// Helpers
// =============================================================================

fn filled(block_size: usize, count: usize) -> HybridList {
    let mut list = HybridList::new(block_size).unwrap();
    for i in 0..count {
        list.push_back(i as f64);
    }
    list
}

fn snapshot(list: &HybridList) -> Vec<f64> {
    (0..list.len()).map(|i| list.at(i).unwrap()).collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_construction_valid_block_sizes() {
    for block_size in 1..=32 {
        let list = HybridList::new(block_size).unwrap();
        assert_eq!(list.len(), 0);
        assert_eq!(list.capacity(), 0);
        assert_eq!(list.block_size(), block_size);
    }
}

#[test]
fn test_construction_zero_block_size() {
    assert!(matches!(
        HybridList::new(0),
        Err(HybridError::InvalidConfiguration { .. })
    ));

    assert!(HybridList::with_config(&ListConfig::new(0)).is_err());
}

#[test]
fn test_default_list() {
    let mut list = HybridList::default();
    assert_eq!(list.block_size(), DEFAULT_BLOCK_SIZE);
    list.push_back(1.0);
    assert_eq!(list.capacity(), DEFAULT_BLOCK_SIZE);
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn test_five_pushes_block_size_four() {
    let mut list = HybridList::new(4).unwrap();
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        list.push_back(v);
    }
    assert_eq!(list.len(), 5);
    assert_eq!(list.block_count(), 2);
    assert_eq!(snapshot(&list), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_erase_after_five_pushes() {
    let mut list = HybridList::new(4).unwrap();
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        list.push_back(v);
    }
    list.erase(2).unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(snapshot(&list), vec![1.0, 2.0, 4.0, 5.0]);
}

#[test]
fn test_pop_back_fresh_list() {
    let mut list = HybridList::new(4).unwrap();
    assert_eq!(list.pop_back(), Err(HybridError::EmptyContainer));
}

#[test]
fn test_block_size_plus_one_pushes() {
    for block_size in 1..=16 {
        let list = filled(block_size, block_size + 1);
        assert_eq!(list.block_count(), 2, "block_size {block_size}");
        assert_eq!(list.len(), block_size + 1);
        let expected: Vec<f64> = (0..=block_size).map(|i| i as f64).collect();
        assert_eq!(snapshot(&list), expected);
        list.check_invariants().unwrap();
    }
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn test_positional_bounds() {
    let mut list = filled(3, 10);
    for index in [10, 11, 100, usize::MAX] {
        assert!(matches!(
            list.at(index),
            Err(HybridError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            list.insert(index, 0.0),
            Err(HybridError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            list.erase(index),
            Err(HybridError::IndexOutOfRange { .. })
        ));
    }
    // Failed calls leave the list untouched
    assert_eq!(snapshot(&list), (0..10).map(|i| i as f64).collect::<Vec<_>>());

    for index in 0..list.len() {
        assert!(list.at(index).is_ok());
    }
}

// =============================================================================
// Insert / erase semantics
// =============================================================================

#[test]
fn test_insert_every_position() {
    for block_size in 1..=6 {
        for count in 1..=13 {
            for index in 0..count {
                let mut list = filled(block_size, count);
                list.insert(index, -1.0).unwrap();

                let mut expected: Vec<f64> = (0..count).map(|i| i as f64).collect();
                expected.insert(index, -1.0);
                assert_eq!(
                    snapshot(&list),
                    expected,
                    "block_size {block_size}, count {count}, index {index}"
                );
                list.check_invariants().unwrap();
            }
        }
    }
}

#[test]
fn test_erase_every_position() {
    for block_size in 1..=6 {
        for count in 1..=13 {
            for index in 0..count {
                let mut list = filled(block_size, count);
                assert_eq!(list.erase(index).unwrap(), index as f64);

                let mut expected: Vec<f64> = (0..count).map(|i| i as f64).collect();
                expected.remove(index);
                assert_eq!(snapshot(&list), expected);
                list.check_invariants().unwrap();
            }
        }
    }
}

#[test]
fn test_drain_from_front_releases_blocks() {
    let mut list = filled(4, 50);
    while !list.is_empty() {
        list.erase(0).unwrap();
        list.check_invariants().unwrap();
        assert!(list.capacity() >= list.len());
    }
    assert_eq!(list.block_count(), 0);
    assert!(list.front().is_none());
}

#[test]
fn test_repeated_head_inserts() {
    let mut list = HybridList::new(5).unwrap();
    list.push_back(0.0);
    for i in 1..200 {
        list.insert(0, i as f64).unwrap();
    }
    let expected: Vec<f64> = (0..200).rev().map(|i| i as f64).collect();
    assert_eq!(snapshot(&list), expected);
    list.check_invariants().unwrap();
}

// =============================================================================
// Deep copy
// =============================================================================

#[test]
fn test_clone_independent() {
    let mut original = filled(4, 40);
    let mut copy = original.clone();
    assert_eq!(snapshot(&copy), snapshot(&original));

    *copy.at_mut(10).unwrap() = -10.0;
    original.set(20, -20.0).unwrap();
    assert_eq!(original.at(10).unwrap(), 10.0);
    assert_eq!(copy.at(20).unwrap(), 20.0);

    copy.erase(0).unwrap();
    assert_eq!(original.len(), 40);
}

#[test]
fn test_clone_from_overwrites_target() {
    let source = filled(3, 17);
    let mut target = filled(7, 100);
    target.clone_from(&source);

    assert_eq!(target.block_size(), 3);
    assert_eq!(target.len(), 17);
    assert_eq!(target, source);
    target.check_invariants().unwrap();
}

// =============================================================================
// Randomized model check
// =============================================================================

#[test]
fn test_random_operations_match_vec() {
    const OPS: usize = 20_000;

    for block_size in [1, 2, 3, 4, 7, 16, 64] {
        let mut rng = StdRng::seed_from_u64(block_size as u64);
        let mut list = HybridList::new(block_size).unwrap();
        let mut model: Vec<f64> = Vec::new();

        for step in 0..OPS {
            let value: f64 = rng.random_range(-1000.0..1000.0);
            match rng.random_range(0..10) {
                0..=3 => {
                    list.push_back(value);
                    model.push(value);
                }
                4..=5 if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    list.insert(index, value).unwrap();
                    model.insert(index, value);
                }
                6..=7 if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    assert_eq!(list.erase(index).unwrap(), model.remove(index));
                }
                8 => {
                    assert_eq!(list.pop_back().ok(), model.pop());
                }
                _ if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    list.set(index, value).unwrap();
                    model[index] = value;
                }
                _ => {}
            }

            assert_eq!(list.len(), model.len(), "step {step}");
            if step % 997 == 0 {
                list.check_invariants().unwrap();
                assert_eq!(snapshot(&list), model, "step {step}");
            }
        }

        list.check_invariants().unwrap();
        assert_eq!(snapshot(&list), model);
        assert!(list.capacity() >= list.len());
    }
}

// =============================================================================
// Scale
// =============================================================================

/// Appends 200,000 values, reads them back, then erases every other one.
#[test]
fn test_large_chain() {
    const COUNT: usize = 200_000;
    const BLOCK_SIZE: usize = 256;

    println!("\n=== Hybrid List Large Chain Test ===");
    println!("Values: {}", COUNT);
    println!("Block size: {}", BLOCK_SIZE);

    let start = Instant::now();
    let mut list = filled(BLOCK_SIZE, COUNT);
    let append_duration = start.elapsed();
    println!(
        "  Append: {:.0} values/sec",
        COUNT as f64 / append_duration.as_secs_f64()
    );

    // Appends split at block_size / 2 + 1, so blocks stay more than half full
    assert!(list.block_count() <= COUNT / (BLOCK_SIZE / 2) + 1);
    list.check_invariants().unwrap();

    let start = Instant::now();
    for i in (0..COUNT).step_by(COUNT / 1000) {
        assert_eq!(std::hint::black_box(list.at(i).unwrap()), i as f64);
    }
    println!(
        "  Sampled read: {:.0} ns/read",
        start.elapsed().as_nanos() as f64 / 1000.0
    );

    let start = Instant::now();
    for i in (0..COUNT / 2).rev() {
        list.erase(i * 2).unwrap();
    }
    println!(
        "  Erase: {:.0} values/sec",
        (COUNT / 2) as f64 / start.elapsed().as_secs_f64()
    );

    assert_eq!(list.len(), COUNT / 2);
    assert_eq!(list.at(0).unwrap(), 1.0);
    assert_eq!(list.at(COUNT / 2 - 1).unwrap(), (COUNT - 1) as f64);
    list.check_invariants().unwrap();

    list.clear();
    assert_eq!(list.capacity(), 0);
    println!("Hybrid List Large Chain: PASSED");
}
