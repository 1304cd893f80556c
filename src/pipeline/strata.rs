//! Stratify keys and stratum grouping
//!
//! A stratum is the set of rows sharing the same values in every stratify
//! column. Keys are kept as one component per column rather than a joined
//! string, so `("ab", "c")` and `("a", "bc")` never collide.

use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;

use crate::error::SplitError;

/// Composite stratify key: one component per stratify column, `None` for null.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StratumKey(Vec<Option<String>>);

impl StratumKey {
    pub fn new(components: Vec<Option<String>>) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[Option<String>] {
        &self.0
    }
}

impl fmt::Display for StratumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match component {
                Some(value) => write!(f, "{}", value)?,
                None => write!(f, "null")?,
            }
        }
        write!(f, ")")
    }
}

/// Check that every stratify column exists in the DataFrame
pub fn validate_stratify_columns<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
) -> Result<(), SplitError> {
    if columns.is_empty() {
        return Err(SplitError::NoStratifyColumns);
    }

    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for column in columns {
        let column = column.as_ref();
        if !available.iter().any(|name| name == column) {
            return Err(SplitError::Schema {
                column: column.to_string(),
                available,
            });
        }
    }

    Ok(())
}

/// Compute the stratify key of every row, in row order.
///
/// # Errors
/// * `SplitError::Schema` if a column is missing
/// * `SplitError::NoStratifyColumns` if `columns` is empty
pub fn stratify_keys<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
) -> Result<Vec<StratumKey>, SplitError> {
    validate_stratify_columns(df, columns)?;

    let per_column: Vec<Vec<Option<String>>> = columns
        .iter()
        .map(|name| column_components(df.column(name.as_ref())?))
        .collect::<Result<_, SplitError>>()?;

    let keys = (0..df.height())
        .map(|row| {
            StratumKey::new(
                per_column
                    .iter()
                    .map(|values| values[row].clone())
                    .collect(),
            )
        })
        .collect();

    Ok(keys)
}

/// Group row indices by stratum.
///
/// The map is ordered by key so iteration never depends on hashing, and
/// each index list is in ascending row order.
pub fn group_strata(keys: &[StratumKey]) -> BTreeMap<StratumKey, Vec<IdxSize>> {
    let mut strata: BTreeMap<StratumKey, Vec<IdxSize>> = BTreeMap::new();
    for (row, key) in keys.iter().enumerate() {
        strata.entry(key.clone()).or_default().push(row as IdxSize);
    }
    strata
}

/// String form of every value in a column, dispatched on dtype
fn column_components(col: &Column) -> Result<Vec<Option<String>>, SplitError> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = col.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = col.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map(|n| n.to_string()))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                // -0.0 and 0.0 compare equal and share a stratum
                .map(|v| v.map(|n| format!("{}", if n == 0.0 { 0.0 } else { n })))
                .collect()
        }
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| s.to_string()))
                .collect()
        }
    };

    Ok(values)
}
