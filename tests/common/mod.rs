//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::prelude::*;

/// 100 rows: `id` 0..100, `type` alternating A/B (50/50), `value` = id * 1.5
pub fn create_balanced_dataframe() -> DataFrame {
    let ids: Vec<i64> = (0..100).collect();
    let types: Vec<&str> = (0..100).map(|i| if i % 2 == 0 { "A" } else { "B" }).collect();
    let values: Vec<f64> = (0..100).map(|i| i as f64 * 1.5).collect();
    df! {
        "id" => ids,
        "type" => types,
        "value" => values,
    }
    .unwrap()
}

/// Rows with `id` and `type`, one stratum per `(label, count)` pair, in order
pub fn create_strata_dataframe(strata: &[(&str, usize)]) -> DataFrame {
    let types: Vec<&str> = strata
        .iter()
        .flat_map(|&(label, count)| std::iter::repeat(label).take(count))
        .collect();
    let ids: Vec<i64> = (0..types.len() as i64).collect();
    df! {
        "id" => ids,
        "type" => types,
    }
    .unwrap()
}

/// 200 rows over two stratify columns: `type` (A/B) x `region` (north/south),
/// 50 rows per combination, interleaved
pub fn create_multi_column_dataframe() -> DataFrame {
    let ids: Vec<i64> = (0..200).collect();
    let types: Vec<&str> = (0..200).map(|i| if i % 2 == 0 { "A" } else { "B" }).collect();
    let regions: Vec<&str> = (0..200)
        .map(|i| if (i / 2) % 2 == 0 { "north" } else { "south" })
        .collect();
    df! {
        "id" => ids,
        "type" => types,
        "region" => regions,
    }
    .unwrap()
}

/// Random labels drawn from `n_types` categories, with a fixed seed
pub fn create_random_dataframe(rows: usize, n_types: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let ids: Vec<i64> = (0..rows as i64).collect();
    let types: Vec<String> = (0..rows)
        .map(|_| format!("T{}", rng.gen_range(0..n_types)))
        .collect();
    let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
    df! {
        "id" => ids,
        "type" => types,
        "value" => values,
    }
    .unwrap()
}

/// Values of the `id` column
pub fn ids(df: &DataFrame) -> Vec<i64> {
    df.column("id")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect()
}

/// Number of rows whose `column` equals `value`
pub fn count_value(df: &DataFrame, column: &str, value: &str) -> usize {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .filter(|v| *v == Some(value))
        .count()
}

/// Assert that a DataFrame has exactly the given columns, in order
pub fn assert_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    assert_eq!(
        actual_cols, expected_cols,
        "Column mismatch: expected {:?}, got {:?}",
        expected_cols, actual_cols
    );
}
