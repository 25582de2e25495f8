//! Facade crate for the bikeway network engine.
//!
//! This crate re-exports the domain types, the merge engine and the
//! reconstruction pipeline. JSON support is behind the `serde` feature.
//!
//! ```
//! use bikeway_engine::{PipelineConfig, reconstruct};
//!
//! let table = "\
//! ID,NAME,CLASS,A,B,C,D,GEOMETRY
//! 1,12 AV,Bicycle Lane,,,,,\"MULTILINESTRING ((-114.08 51.04, -114.07 51.04))\"
//! ";
//! let report = reconstruct(table, &PipelineConfig::default());
//! assert_eq!(report.routes.len(), 1);
//! assert_eq!(report.routes[0].id.to_string(), "route-0");
//! ```

#![forbid(unsafe_code)]

pub use bikeway_core::{
    BikewayCategory, LatLng, MergeConfig, MergeConfigError, MergeOutcome, MergedPath, ParseIdError,
    RawSegment, Route, RouteAttributes, RouteId, SegmentId, UrbanRural, merge_segments,
};

pub use bikeway_data::{
    GeometryError, IngestError, NetworkReport, NetworkSummary, PipelineConfig, RouteCache,
    SkippedRows, TableDecoder, bikeway_routes, parse_multilinestring, reconstruct,
};
