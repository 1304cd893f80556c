//! Property tests for split invariants

use proptest::prelude::*;
use stratsplit::pipeline::{split_dataframe, split_indices, SplitIndices};
use stratsplit::SplitError;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn strata_frame(sizes: &[usize]) -> polars::prelude::DataFrame {
    let labels: Vec<String> = (0..sizes.len()).map(|i| format!("S{}", i)).collect();
    let strata: Vec<(&str, usize)> = labels
        .iter()
        .map(String::as_str)
        .zip(sizes.iter().copied())
        .collect();
    create_strata_dataframe(&strata)
}

/// Stratum index of each row in a frame built by `strata_frame`
fn stratum_of(sizes: &[usize]) -> Vec<usize> {
    sizes
        .iter()
        .enumerate()
        .flat_map(|(i, &n)| std::iter::repeat(i).take(n))
        .collect()
}

fn count_in(rows: &[u32], stratum_of: &[usize], stratum: usize) -> usize {
    rows.iter()
        .filter(|&&r| stratum_of[r as usize] == stratum)
        .count()
}

fn all_rows(indices: &SplitIndices) -> Vec<u32> {
    let mut rows: Vec<u32> = indices
        .train
        .iter()
        .chain(&indices.validation)
        .chain(&indices.test)
        .map(|&r| r as u32)
        .collect();
    rows.sort_unstable();
    rows
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_partitions_cover_every_row_once(
        sizes in prop::collection::vec(10usize..60, 1..5),
        seed in any::<u64>(),
    ) {
        let df = strata_frame(&sizes);
        let indices = split_indices(&df, &["type"], seed).unwrap();

        let total: usize = sizes.iter().sum();
        prop_assert_eq!(all_rows(&indices), (0..total as u32).collect::<Vec<_>>());
    }

    #[test]
    fn prop_validation_and_test_balanced(
        sizes in prop::collection::vec(10usize..60, 1..5),
        seed in any::<u64>(),
    ) {
        let df = strata_frame(&sizes);
        let indices = split_indices(&df, &["type"], seed).unwrap();

        prop_assert!(indices.validation.len().abs_diff(indices.test.len()) <= 1);
        if (indices.validation.len() + indices.test.len()) % 2 == 0 {
            prop_assert_eq!(indices.validation.len(), indices.test.len());
        }
    }

    #[test]
    fn prop_strata_keep_their_share(
        sizes in prop::collection::vec(10usize..60, 1..5),
        seed in any::<u64>(),
    ) {
        let df = strata_frame(&sizes);
        let indices = split_indices(&df, &["type"], seed).unwrap();
        let owner = stratum_of(&sizes);
        let train: Vec<u32> = indices.train.iter().map(|&r| r as u32).collect();
        let validation: Vec<u32> = indices.validation.iter().map(|&r| r as u32).collect();
        let test: Vec<u32> = indices.test.iter().map(|&r| r as u32).collect();

        for (s, &n) in sizes.iter().enumerate() {
            let in_train = count_in(&train, &owner, s);
            let in_validation = count_in(&validation, &owner, s);
            let in_test = count_in(&test, &owner, s);

            let n = n as f64;
            prop_assert!((in_train as f64 - 0.8 * n).abs() <= 1.0);
            prop_assert!((in_validation as f64 - 0.1 * n).abs() <= 1.0);
            prop_assert!((in_test as f64 - 0.1 * n).abs() <= 1.0);
            prop_assert!(in_validation >= 1 && in_test >= 1);
            prop_assert!(in_validation.abs_diff(in_test) <= 1);
        }
    }

    #[test]
    fn prop_same_seed_same_partitions(
        sizes in prop::collection::vec(10usize..60, 1..5),
        seed in any::<u64>(),
    ) {
        let df = strata_frame(&sizes);
        let first = split_indices(&df, &["type"], seed).unwrap();
        let second = split_indices(&df, &["type"], seed).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_singleton_stratum_always_rejected(
        sizes in prop::collection::vec(10usize..60, 1..5),
        seed in any::<u64>(),
    ) {
        let mut sizes = sizes;
        sizes.push(1);
        let df = strata_frame(&sizes);
        let result = split_dataframe(&df, &["type"], seed);
        let rejected = matches!(result, Err(SplitError::InsufficientData { count: 1, .. }));
        prop_assert!(rejected);
    }
}
