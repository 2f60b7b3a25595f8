use std::collections::{BTreeMap, BTreeSet};

use crate::error::{OverlayError, Result};

// ---------------------------------------------------------------------------
// FieldValue – a single cell of an event record
// ---------------------------------------------------------------------------

/// A dynamically-typed field value.
/// Kept `Ord` so categorical columns can be indexed in a `BTreeSet`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Bool(bool),
    String(String),
    Null,
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl FieldValue {
    /// Numeric view of the value. `Null` reads as NaN so that missing entries
    /// drop out of the histogram instead of failing the call.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Null => Some(f64::NAN),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of a dataset
// ---------------------------------------------------------------------------

/// A single event record: field name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Numeric value of `field`, `None` if absent or non-numeric.
    pub fn f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Dataset – an ordered collection of records
// ---------------------------------------------------------------------------

/// An ordered collection of records with pre-computed column indices.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records (rows), addressable by position.
    pub records: Vec<Record>,
    /// Ordered list of field names.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<FieldValue>>,
}

impl Dataset {
    /// Build column indices from the records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut column_names_set: BTreeSet<String> = BTreeSet::new();
        let mut unique_values: BTreeMap<String, BTreeSet<FieldValue>> = BTreeMap::new();

        for rec in &records {
            for (col, val) in &rec.fields {
                column_names_set.insert(col.clone());
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        let column_names: Vec<String> = column_names_set.into_iter().collect();
        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Build a dataset from equally long numeric columns.
    pub fn from_columns<S: AsRef<str>>(columns: &[(S, Vec<f64>)]) -> Result<Self> {
        let rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        for (name, values) in columns {
            if values.len() != rows {
                return Err(OverlayError::ColumnLength {
                    field: name.as_ref().to_string(),
                    expected: rows,
                    actual: values.len(),
                });
            }
        }

        let records = (0..rows)
            .map(|row| {
                columns
                    .iter()
                    .fold(Record::new(), |rec, (name, values)| {
                        rec.with(name.as_ref(), values[row])
                    })
            })
            .collect();
        Ok(Self::from_records(records))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.column_names.iter().any(|c| c == field)
    }
}
