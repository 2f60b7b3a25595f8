//! Shared binning and single-pass histogram filling.

use serde::Deserialize;

use crate::error::{OverlayError, Result};

/// How the variable axis is partitioned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BinSpec {
    /// Uniform bins spanning the observed range of all series.
    Count(usize),
    /// Explicit, non-decreasing bin edges (`n_bins + 1` values).
    Edges(Vec<f64>),
}

impl From<usize> for BinSpec {
    fn from(n: usize) -> Self {
        BinSpec::Count(n)
    }
}

impl From<Vec<f64>> for BinSpec {
    fn from(edges: Vec<f64>) -> Self {
        BinSpec::Edges(edges)
    }
}

impl BinSpec {
    pub fn validate(&self) -> Result<()> {
        match self {
            BinSpec::Count(0) => Err(OverlayError::InvalidBinSpec(
                "bin count must be at least 1".into(),
            )),
            BinSpec::Count(_) => Ok(()),
            BinSpec::Edges(edges) => validate_edges(edges),
        }
    }

    /// Resolve to concrete edges shared by every series.
    ///
    /// For a count the range is the min/max of all finite values. An empty
    /// sample gives `[0, 1]`; a single distinct value `v` gives `[v - 0.5, v + 0.5]`.
    pub fn edges_for<'a, I>(&self, samples: I) -> Result<Vec<f64>>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        self.validate()?;
        match self {
            BinSpec::Edges(edges) => Ok(edges.clone()),
            BinSpec::Count(n) => {
                let (lo, hi) = samples
                    .into_iter()
                    .flat_map(|s| s.iter().copied())
                    .filter(|v| v.is_finite())
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                let (lo, hi) = if lo > hi {
                    (0.0, 1.0)
                } else if lo == hi {
                    (lo - 0.5, hi + 0.5)
                } else {
                    (lo, hi)
                };
                Ok(uniform_edges(lo, hi, *n))
            }
        }
    }
}

/// At least two finite, non-decreasing edges. Repeated edges (including a
/// single zero-width bin) are allowed.
pub fn validate_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(OverlayError::InvalidBinSpec(format!(
            "need at least 2 bin edges, got {}",
            edges.len()
        )));
    }
    if let Some(i) = edges.iter().position(|e| !e.is_finite()) {
        return Err(OverlayError::InvalidBinSpec(format!(
            "bin edge {i} is not finite ({})",
            edges[i]
        )));
    }
    if let Some(i) = edges.windows(2).position(|w| w[1] < w[0]) {
        return Err(OverlayError::InvalidBinSpec(format!(
            "bin edges must be non-decreasing (edge {} = {} < edge {} = {})",
            i + 1,
            edges[i + 1],
            i,
            edges[i]
        )));
    }
    Ok(())
}

/// `n + 1` evenly spaced edges from `lo` to exactly `hi`.
pub fn uniform_edges(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    let step = (hi - lo) / n as f64;
    let mut edges: Vec<f64> = (0..n).map(|i| lo + step * i as f64).collect();
    edges.push(hi);
    edges
}

/// A filled 1-D histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges (sorted, length = n_bins + 1).
    pub edges: Vec<f64>,
    /// Bin contents (sum of weights per bin).
    pub counts: Vec<f64>,
    /// Weight below the first edge.
    pub underflow: f64,
    /// Weight above the last edge.
    pub overflow: f64,
    /// In-range entries, unweighted.
    pub entries: u64,
    /// NaN/infinite values that were dropped.
    pub non_finite: u64,
}

impl Histogram {
    /// All-zero histogram over `edges`, which must pass [`validate_edges`].
    pub fn empty(edges: Vec<f64>) -> Result<Self> {
        validate_edges(&edges)?;
        let n_bins = edges.len() - 1;
        Ok(Self {
            edges,
            counts: vec![0.0; n_bins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
            non_finite: 0,
        })
    }

    /// Fill from values with optional per-value weights (same length).
    pub fn from_values(edges: Vec<f64>, values: &[f64], weights: Option<&[f64]>) -> Result<Self> {
        let mut h = Self::empty(edges)?;
        match weights {
            Some(w) => values.iter().zip(w).for_each(|(&v, &w)| h.fill(v, w)),
            None => values.iter().for_each(|&v| h.fill(v, 1.0)),
        }
        Ok(h)
    }

    pub fn fill(&mut self, value: f64, weight: f64) {
        if !value.is_finite() {
            self.non_finite += 1;
            return;
        }
        match find_bin(&self.edges, value) {
            Some(b) => {
                self.counts[b] += weight;
                self.entries += 1;
            }
            None if self.edges.first().is_some_and(|&lo| value < lo) => {
                self.underflow += weight
            }
            None => self.overflow += weight,
        }
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Running sum of the bin contents, same edges.
    pub fn cumulative(&self) -> Histogram {
        let mut acc = 0.0;
        let counts = self
            .counts
            .iter()
            .map(|c| {
                acc += c;
                acc
            })
            .collect();
        Histogram {
            counts,
            ..self.clone()
        }
    }

    /// Smallest strictly positive bin content, if any.
    pub fn min_positive(&self) -> Option<f64> {
        self.counts
            .iter()
            .copied()
            .filter(|c| *c > 0.0)
            .reduce(f64::min)
    }

    pub fn max_count(&self) -> f64 {
        self.counts.iter().copied().fold(0.0, f64::max)
    }
}

/// Bin index for `val`, `None` outside `[edges[0], edges[last]]`.
///
/// Bins are half-open except the last, which also holds the upper edge.
fn find_bin(edges: &[f64], val: f64) -> Option<usize> {
    let n_bins = edges.len().checked_sub(1)?;
    if n_bins == 0 || val < edges[0] || val > edges[n_bins] {
        return None;
    }
    if val == edges[n_bins] {
        return Some(n_bins - 1);
    }
    // partition_point over sorted edges: first edge strictly greater than val.
    let k = edges.partition_point(|e| *e <= val);
    Some(k - 1)
}
