//! Input-format side of the bikeway engine.
//!
//! Responsibilities:
//! - Decode the comma-separated bikeway export into rows.
//! - Parse `MULTILINESTRING` geometry into down-sampled paths.
//! - Admit rows by category and turn them into raw segments.
//! - Run the full reconstruction and memoise its routes.
//!
//! Boundaries:
//! - Do not encode merge or attribute rules (live in `bikeway-core`).
//! - Perform no I/O; callers hand in text that is already loaded.
//!
//! Invariants:
//! - A bad row is skipped and counted, never fatal.
//! - The only global state is the write-once route cache.

mod config;
pub mod ingest;
pub mod pipeline;
pub mod table;
pub mod wkt;

pub use config::{
    DEFAULT_CATEGORY_COLUMN, DEFAULT_GEOMETRY_COLUMN, DEFAULT_SAMPLE_STRIDE, PipelineConfig,
};
pub use ingest::{IngestError, SkippedRows, segment_from_row};
pub use pipeline::{NetworkReport, NetworkSummary, RouteCache, bikeway_routes, reconstruct};
pub use table::{Row, Rows, TableDecoder, split_fields};
pub use wkt::{GeometryError, parse_multilinestring};
