//! Per-stratum summary of a split

use std::collections::BTreeMap;
use std::fmt;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::SplitError;
use crate::pipeline::{stratify_keys, SplitIndices, StratifiedSplit, StratumKey};

/// How one stratum was distributed across the partitions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StratumCounts {
    /// Display form of the stratify key, e.g. `(A, north)`
    pub stratum: String,
    pub total: usize,
    pub train: usize,
    pub validation: usize,
    pub test: usize,
}

impl StratumCounts {
    /// Largest distance between a partition count and its 80/10/10 share
    pub fn max_deviation(&self) -> f64 {
        let total = self.total as f64;
        [
            (self.train, 0.8),
            (self.validation, 0.1),
            (self.test, 0.1),
        ]
        .iter()
        .map(|&(count, share)| (count as f64 - share * total).abs())
        .fold(0.0, f64::max)
    }
}

/// Summary of a stratified split
#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub stratify_columns: Vec<String>,
    pub total_rows: usize,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub test_rows: usize,
    /// One entry per stratum, ordered by key
    pub strata: Vec<StratumCounts>,
}

impl SplitSummary {
    /// Build a summary from per-row keys and partition membership
    ///
    /// # Errors
    /// * `SplitError::RowCountMismatch` if `indices` refer to a row without a key
    pub fn new<S: AsRef<str>>(
        stratify_columns: &[S],
        keys: &[StratumKey],
        indices: &SplitIndices,
    ) -> Result<Self, SplitError> {
        let total_rows = indices.train.len() + indices.validation.len() + indices.test.len();
        let mut counts: BTreeMap<&StratumKey, StratumCounts> = BTreeMap::new();

        let partitions = [&indices.train, &indices.validation, &indices.test];
        for (slot, rows) in partitions.iter().enumerate() {
            for &row in rows.iter() {
                let key = keys
                    .get(row as usize)
                    .ok_or(SplitError::RowCountMismatch {
                        expected: total_rows,
                        actual: keys.len(),
                    })?;
                let entry = counts.entry(key).or_insert_with(|| StratumCounts {
                    stratum: key.to_string(),
                    total: 0,
                    train: 0,
                    validation: 0,
                    test: 0,
                });
                entry.total += 1;
                match slot {
                    0 => entry.train += 1,
                    1 => entry.validation += 1,
                    _ => entry.test += 1,
                }
            }
        }

        Ok(Self {
            stratify_columns: stratify_columns
                .iter()
                .map(|c| c.as_ref().to_string())
                .collect(),
            total_rows,
            train_rows: indices.train.len(),
            validation_rows: indices.validation.len(),
            test_rows: indices.test.len(),
            strata: counts.into_values().collect(),
        })
    }

    /// Summarize a split of `df` on `stratify_columns`
    ///
    /// `df` must be the frame the split was made from.
    pub fn from_split<S: AsRef<str>>(
        df: &DataFrame,
        stratify_columns: &[S],
        split: &StratifiedSplit,
    ) -> Result<Self, SplitError> {
        let indices = &split.indices;
        let expected = indices.train.len() + indices.validation.len() + indices.test.len();
        if df.height() != expected {
            return Err(SplitError::RowCountMismatch {
                expected,
                actual: df.height(),
            });
        }

        let keys = stratify_keys(df, stratify_columns)?;
        Self::new(stratify_columns, &keys, indices)
    }

    /// Largest per-stratum deviation from the 80/10/10 shares
    pub fn max_deviation(&self) -> f64 {
        self.strata
            .iter()
            .map(StratumCounts::max_deviation)
            .fold(0.0, f64::max)
    }

    /// Export as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Stratum").add_attribute(Attribute::Bold),
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new("Train").add_attribute(Attribute::Bold),
            Cell::new("Validation").add_attribute(Attribute::Bold),
            Cell::new("Test").add_attribute(Attribute::Bold),
        ]);

        for stratum in &self.strata {
            let pct = |n: usize| {
                if stratum.total > 0 {
                    format!("{} ({:.1}%)", n, n as f64 / stratum.total as f64 * 100.0)
                } else {
                    n.to_string()
                }
            };
            table.add_row(vec![
                Cell::new(&stratum.stratum),
                Cell::new(stratum.total).set_alignment(CellAlignment::Right),
                Cell::new(pct(stratum.train)).set_alignment(CellAlignment::Right),
                Cell::new(pct(stratum.validation)).set_alignment(CellAlignment::Right),
                Cell::new(pct(stratum.test)).set_alignment(CellAlignment::Right),
            ]);
        }

        table.add_row(vec![
            Cell::new("All").add_attribute(Attribute::Bold),
            Cell::new(self.total_rows).set_alignment(CellAlignment::Right),
            Cell::new(self.train_rows)
                .fg(Color::Green)
                .set_alignment(CellAlignment::Right),
            Cell::new(self.validation_rows)
                .fg(Color::Yellow)
                .set_alignment(CellAlignment::Right),
            Cell::new(self.test_rows)
                .fg(Color::Cyan)
                .set_alignment(CellAlignment::Right),
        ]);

        table
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            style("SPLIT SUMMARY").white().bold(),
            style(format!("(stratified on {})", self.stratify_columns.join(", "))).dim()
        )?;
        write!(f, "{}", self.table())
    }
}
