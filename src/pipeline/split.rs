//! Two-stage stratified train/validation/test split
//!
//! Stage one holds out 20% of the rows from training, stage two splits the
//! held-out rows evenly into validation and test. Both stages preserve each
//! stratum's share as closely as integer rounding allows and draw from a
//! single ChaCha8 stream seeded by the caller, so a `(dataset, columns, seed)`
//! triple always produces the same partitions.

use std::collections::BTreeMap;

use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::allocation::{allocate_holdout, holdout_size, SplitRatio, HOLDOUT_RATIO, TEST_RATIO};
use super::strata::{stratify_keys, StratumKey};
use crate::config::SplitConfig;
use crate::error::{SplitError, SplitStage};

/// Minimum held-out rows per stratum after stage one, so that stage two
/// can give the stratum at least one validation and one test row.
pub const MIN_HELD_OUT_PER_STRATUM: usize = 2;

/// Row positions of each partition, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<IdxSize>,
    pub validation: Vec<IdxSize>,
    pub test: Vec<IdxSize>,
}

/// The three partitions of a dataset.
#[derive(Debug, Clone)]
pub struct StratifiedSplit {
    pub train: DataFrame,
    pub validation: DataFrame,
    pub test: DataFrame,
    /// Input row positions behind each partition
    pub indices: SplitIndices,
}

impl StratifiedSplit {
    /// Consume the split into `(train, validation, test)`
    pub fn into_parts(self) -> (DataFrame, DataFrame, DataFrame) {
        (self.train, self.validation, self.test)
    }
}

/// Split a DataFrame 80/10/10 into train, validation and test, stratified
/// on the combined values of `stratify_columns`.
///
/// The input is only borrowed; each output keeps the input schema and the
/// input row order.
///
/// # Errors
/// * `SplitError::EmptyDataset` if `df` has no rows
/// * `SplitError::NoStratifyColumns` if `stratify_columns` is empty
/// * `SplitError::Schema` if a stratify column does not exist
/// * `SplitError::InsufficientData` if a stratum is too small to reach every partition
pub fn split_dataframe<S: AsRef<str>>(
    df: &DataFrame,
    stratify_columns: &[S],
    seed: u64,
) -> Result<StratifiedSplit, SplitError> {
    let indices = split_indices(df, stratify_columns, seed)?;

    let train = take_rows(df, &indices.train)?;
    let validation = take_rows(df, &indices.validation)?;
    let test = take_rows(df, &indices.test)?;

    assert_partition_invariants(df.height(), train.height(), validation.height(), test.height());

    Ok(StratifiedSplit {
        train,
        validation,
        test,
        indices,
    })
}

/// [`split_dataframe`] driven by a [`SplitConfig`]
pub fn split_with_config(
    df: &DataFrame,
    config: &SplitConfig,
) -> Result<StratifiedSplit, SplitError> {
    config.validate()?;
    split_dataframe(df, &config.stratify_columns, config.seed)
}

/// Compute partition membership without materializing the partitions.
pub fn split_indices<S: AsRef<str>>(
    df: &DataFrame,
    stratify_columns: &[S],
    seed: u64,
) -> Result<SplitIndices, SplitError> {
    if df.height() == 0 {
        return Err(SplitError::EmptyDataset);
    }

    let keys = stratify_keys(df, stratify_columns)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let rows: Vec<IdxSize> = (0..df.height() as IdxSize).collect();
    let (train, held_out) = stratified_partition(
        &rows,
        &keys,
        HOLDOUT_RATIO,
        SplitStage::Holdout,
        MIN_HELD_OUT_PER_STRATUM,
        &mut rng,
    )?;
    let (validation, test) = stratified_partition(
        &held_out,
        &keys,
        TEST_RATIO,
        SplitStage::Evaluation,
        1,
        &mut rng,
    )?;

    tracing::debug!(
        rows = df.height(),
        train = train.len(),
        validation = validation.len(),
        test = test.len(),
        seed,
        "stratified split complete"
    );

    assert_partition_invariants(rows.len(), train.len(), validation.len(), test.len());

    Ok(SplitIndices {
        train,
        validation,
        test,
    })
}

/// Split `rows` in two, stratum by stratum.
///
/// Returns `(kept, held_out)`, both ascending. Every stratum must end up
/// with at least one kept row and `min_held_out` held-out rows.
fn stratified_partition(
    rows: &[IdxSize],
    keys: &[StratumKey],
    ratio: SplitRatio,
    stage: SplitStage,
    min_held_out: usize,
    rng: &mut ChaCha8Rng,
) -> Result<(Vec<IdxSize>, Vec<IdxSize>), SplitError> {
    let mut strata: BTreeMap<&StratumKey, Vec<IdxSize>> = BTreeMap::new();
    for &row in rows {
        strata.entry(&keys[row as usize]).or_default().push(row);
    }

    let counts: Vec<usize> = strata.values().map(Vec::len).collect();
    let holdout = holdout_size(rows.len(), ratio);
    let allocation = allocate_holdout(&counts, ratio);

    tracing::debug!(
        %stage,
        rows = rows.len(),
        strata = strata.len(),
        holdout,
        "allocating held-out rows across strata"
    );

    let (kept_side, held_side) = stage.sides();
    let mut kept = Vec::with_capacity(rows.len() - holdout);
    let mut held_out = Vec::with_capacity(holdout);

    for ((key, mut members), held) in strata.into_iter().zip(allocation) {
        let count = members.len();
        if held < min_held_out {
            return Err(SplitError::InsufficientData {
                stage,
                stratum: key.to_string(),
                count,
                partition: held_side,
                allocated: held,
                required: min_held_out,
            });
        }
        if held >= count {
            return Err(SplitError::InsufficientData {
                stage,
                stratum: key.to_string(),
                count,
                partition: kept_side,
                allocated: count.saturating_sub(held),
                required: 1,
            });
        }

        members.shuffle(rng);
        held_out.extend_from_slice(&members[..held]);
        kept.extend_from_slice(&members[held..]);
    }

    kept.sort_unstable();
    held_out.sort_unstable();

    Ok((kept, held_out))
}

fn take_rows(df: &DataFrame, rows: &[IdxSize]) -> Result<DataFrame, SplitError> {
    let idx = IdxCa::from_vec("idx".into(), rows.to_vec());
    Ok(df.take(&idx)?)
}

/// Panic if partition sizes are inconsistent with the input.
///
/// A violation means the split logic itself is broken, so it is not
/// reported as a recoverable error.
pub fn assert_partition_invariants(total: usize, train: usize, validation: usize, test: usize) {
    assert_eq!(
        train + validation + test,
        total,
        "partition sizes {} + {} + {} do not add up to {} input rows",
        train,
        validation,
        test,
        total
    );
    assert!(
        validation.abs_diff(test) <= 1,
        "validation ({}) and test ({}) sizes differ by more than one",
        validation,
        test
    );
}
