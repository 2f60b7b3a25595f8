use crate::data::model::{Dataset, FieldValue};
use crate::data::selection::Selection;
use crate::error::{OverlayError, Result};

/// One (dataset, selection, label) unit contributing one histogram trace.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    pub dataset: &'a Dataset,
    pub selection: Selection,
    pub label: String,
    /// Optional per-row weight field; unweighted rows count as 1.
    pub weight_field: Option<String>,
}

/// Values and weights of the selected rows of one series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedValues {
    pub values: Vec<f64>,
    pub weights: Option<Vec<f64>>,
}

impl<'a> Series<'a> {
    /// A series over every row of `dataset`.
    pub fn new(dataset: &'a Dataset, label: impl Into<String>) -> Self {
        Self {
            dataset,
            selection: Selection::AllRows,
            label: label.into(),
            weight_field: None,
        }
    }

    pub fn with_selection(mut self, selection: impl Into<Selection>) -> Self {
        self.selection = selection.into();
        self
    }

    pub fn with_weights(mut self, field: impl Into<String>) -> Self {
        self.weight_field = Some(field.into());
        self
    }

    /// Collect `field` (and the weight field, if any) over the selected rows.
    ///
    /// Fails on a missing field, a mask of the wrong length, or a selected
    /// value that is not numeric.
    pub fn selected_values(&self, field: &str) -> Result<SelectedValues> {
        self.require_field(field)?;
        if let Some(w) = &self.weight_field {
            self.require_field(w)?;
        }
        let mask = self.selection.resolve(&self.label, self.dataset.len())?;

        let mut values = Vec::with_capacity(self.selection.count(self.dataset.len()));
        let mut weights = self.weight_field.as_ref().map(|_| Vec::with_capacity(values.capacity()));

        for (row, (rec, _)) in self
            .dataset
            .records
            .iter()
            .zip(mask.iter())
            .enumerate()
            .filter(|(_, (_, keep))| **keep)
        {
            values.push(self.numeric(rec.get(field), field, row)?);
            if let (Some(w), Some(weight_field)) = (weights.as_mut(), self.weight_field.as_deref()) {
                w.push(self.numeric(rec.get(weight_field), weight_field, row)?);
            }
        }

        Ok(SelectedValues { values, weights })
    }

    fn require_field(&self, field: &str) -> Result<()> {
        if self.dataset.has_field(field) {
            Ok(())
        } else {
            Err(OverlayError::FieldNotFound {
                field: field.to_string(),
                label: self.label.clone(),
            })
        }
    }

    fn numeric(&self, value: Option<&FieldValue>, field: &str, row: usize) -> Result<f64> {
        match value {
            None => Err(OverlayError::FieldNotFound {
                field: field.to_string(),
                label: self.label.clone(),
            }),
            Some(v) => v.as_f64().ok_or_else(|| OverlayError::NonNumeric {
                field: field.to_string(),
                label: self.label.clone(),
                row,
            }),
        }
    }
}
