//! regstat
//!
//! A small Rust library for ingesting regional statistics published as CSV and JSON
//! (StatsWales style), merging them into one area → measure → year model, filtering
//! by area, measure and year, and reporting the result. Pairs with the `regstat` CLI.
//!
//! ### Features
//! - Three source formats: authority-code lookup CSV, wide year-column CSV, and
//!   nested-list JSON, each driven by a [`ColumnMapping`]
//! - Deterministic overwrite-merge when the same area/measure/year appears twice
//! - Per-source failure isolation with row-level warnings
//! - JSON export, fixed-width table report, and summary statistics
//!
//! ### Example
//! ```
//! use regstat::{AreaCollection, ColumnMapping, Filters, SourceColumn, SourceFormat};
//!
//! let cols = ColumnMapping::new()
//!     .with(SourceColumn::AuthCode, "code")
//!     .with(SourceColumn::SingleMeasureCode, "pop")
//!     .with(SourceColumn::SingleMeasureName, "Population");
//! let mut areas = AreaCollection::new();
//! areas.ingest(
//!     "code,1999,2000\nW001,10,20\n".as_bytes(),
//!     SourceFormat::WideYearCsv,
//!     &cols,
//!     &Filters::default(),
//! )?;
//! assert_eq!(areas.get("W001")?.measure("pop")?.value(2000)?, 20.0);
//! println!("{}", areas.render());
//! # Ok::<(), regstat::Error>(())
//! ```

pub mod collection;
pub mod columns;
pub mod datasets;
pub mod error;
pub mod export;
pub mod filters;
pub mod ingest;
pub mod models;
pub mod stats;
pub mod table;

pub use collection::AreaCollection;
pub use columns::{ColumnMapping, SourceColumn, SourceFormat};
pub use error::{Error, Result};
pub use filters::{Filters, StringFilter, YearFilter};
pub use ingest::{IngestReport, RowWarning};
pub use models::{Area, Measure};
