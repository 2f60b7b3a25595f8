//! Overlay step histograms of one variable from several (dataset,
//! selection, label) series on shared axes, annotated with experiment
//! provenance.
//!
//! ```text
//!   Series ──▶ build_figure ──▶ Figure ──▶ FigureBackend::display
//!               │                           (EguiBackend: native window)
//!               ├─ histogram: shared edges, per-series counts
//!               ├─ layout:    legend placement and figure size
//!               └─ style:     fonts, palette, provenance
//! ```

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod figure;
pub mod histogram;
pub mod kinematics;
pub mod layout;
pub mod render;
pub mod sample;
pub mod series;
pub mod style;
pub mod ui;

pub use app::EguiBackend;
pub use data::model::{Dataset, FieldValue, Record};
pub use data::selection::Selection;
pub use error::{OverlayError, Result};
pub use figure::{Figure, Scale};
pub use histogram::{BinSpec, Histogram};
pub use layout::{legend_layout_for, LegendLayout};
pub use render::{build_figure, render, FigureBackend, VariableSpec};
pub use series::Series;
pub use style::{BuiltinTheme, Provenance, StyleConfig};
