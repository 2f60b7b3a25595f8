use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, FieldValue, Record};
use crate::error::{OverlayError, Result};

// ---------------------------------------------------------------------------
// Selection: which rows of a dataset take part in a series
// ---------------------------------------------------------------------------

/// Row selection for one series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every row participates.
    #[default]
    AllRows,
    /// One flag per row; must match the dataset's row count.
    Mask(Vec<bool>),
}

impl From<Vec<bool>> for Selection {
    fn from(mask: Vec<bool>) -> Self {
        Selection::Mask(mask)
    }
}

impl Selection {
    /// Expand into a flag per row. `AllRows` is built lazily here.
    ///
    /// `label` only names the series in the error.
    pub fn resolve(&self, label: &str, rows: usize) -> Result<Cow<'_, [bool]>> {
        match self {
            Selection::AllRows => Ok(Cow::Owned(vec![true; rows])),
            Selection::Mask(m) if m.len() == rows => Ok(Cow::Borrowed(m.as_slice())),
            Selection::Mask(m) => Err(OverlayError::ShapeMismatch {
                label: label.to_string(),
                expected: rows,
                actual: m.len(),
            }),
        }
    }

    /// Number of selected rows out of `rows`.
    pub fn count(&self, rows: usize) -> usize {
        match self {
            Selection::AllRows => rows,
            Selection::Mask(m) => m.iter().filter(|&&b| b).count(),
        }
    }

    /// Select the given row positions. Indices past `rows` are ignored.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>, rows: usize) -> Self {
        let mut mask = vec![false; rows];
        for i in indices {
            if let Some(slot) = mask.get_mut(i) {
                *slot = true;
            }
        }
        Selection::Mask(mask)
    }

    /// Select rows whose `field` satisfies `predicate`.
    pub fn where_field<P>(dataset: &Dataset, field: &str, predicate: P) -> Result<Self>
    where
        P: Fn(&FieldValue) -> bool,
    {
        if !dataset.has_field(field) {
            return Err(OverlayError::FieldNotFound {
                field: field.to_string(),
                label: String::new(),
            });
        }
        Ok(Self::where_record(dataset, |rec| {
            rec.get(field).is_some_and(&predicate)
        }))
    }

    /// Select rows for which `predicate` holds on the whole record.
    pub fn where_record<P>(dataset: &Dataset, predicate: P) -> Self
    where
        P: Fn(&Record) -> bool,
    {
        Selection::Mask(dataset.records.iter().map(predicate).collect())
    }

    /// Row-wise AND. Two masks of different lengths are a
    /// [`OverlayError::ShapeMismatch`] (unlabelled; `expected` is `self`'s length).
    pub fn and(&self, other: &Selection) -> Result<Selection> {
        match (self, other) {
            (Selection::AllRows, s) | (s, Selection::AllRows) => Ok(s.clone()),
            (Selection::Mask(a), Selection::Mask(b)) if a.len() == b.len() => Ok(Selection::Mask(
                a.iter().zip(b).map(|(x, y)| *x && *y).collect(),
            )),
            (Selection::Mask(a), Selection::Mask(b)) => Err(OverlayError::ShapeMismatch {
                label: String::new(),
                expected: a.len(),
                actual: b.len(),
            }),
        }
    }

    /// Row-wise negation over `rows` rows.
    pub fn invert(&self, rows: usize) -> Selection {
        match self {
            Selection::AllRows => Selection::Mask(vec![false; rows]),
            Selection::Mask(m) => Selection::Mask(m.iter().map(|b| !b).collect()),
        }
    }
}

// ---------------------------------------------------------------------------
// Categorical filters: which unique values are accepted per column
// ---------------------------------------------------------------------------

/// Per-column accepted values: maps column_name → set of selected values.
/// A column absent from the map is unconstrained.
pub type FilterState = BTreeMap<String, BTreeSet<FieldValue>>;

/// Initialise a [`FilterState`] with every value accepted.
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    dataset
        .unique_values
        .iter()
        .map(|(col, vals)| (col.clone(), vals.clone()))
        .collect()
}

/// Build a mask of the records that pass all categorical filters.
///
/// A record passes a column filter when:
/// * The filter set for that column is empty → nothing accepted → fails
/// * The filter set covers every unique value → no effective constraint
/// * The record's value for that column is in the set → passes
pub fn filter_selection(dataset: &Dataset, filters: &FilterState) -> Selection {
    Selection::where_record(dataset, |rec| {
        filters.iter().all(|(col, accepted)| {
            if accepted.is_empty() {
                return false;
            }
            if let Some(all_vals) = dataset.unique_values.get(col) {
                if accepted.len() == all_vals.len() {
                    return true;
                }
            }
            match rec.get(col) {
                Some(val) => accepted.contains(val),
                None => accepted.contains(&FieldValue::Null),
            }
        })
    })
}
