//! Core domain types for the bikeway reconstruction engine.
//!
//! The crate owns everything that does not care where the data came from:
//! coordinates, raw segments, the merge engine that stitches fragments into
//! continuous routes, and the synthesiser that attaches metrics and ratings to
//! each finished route. Parsing the municipal export lives in `bikeway-data`.
//!
//! # Examples
//!
//! ```
//! use bikeway_core::{
//!     BikewayCategory, LatLng, MergeConfig, RawSegment, Route, RouteId, SegmentId,
//!     merge_segments,
//! };
//!
//! # fn main() -> Result<(), bikeway_core::SegmentError> {
//! let first = RawSegment::new(
//!     SegmentId(1),
//!     BikewayCategory::CycleTrack,
//!     vec![LatLng::new(51.0, -114.0), LatLng::new(51.0, -114.01)],
//! )?;
//! let second = RawSegment::new(
//!     SegmentId(2),
//!     BikewayCategory::CycleTrack,
//!     vec![LatLng::new(51.0, -114.01), LatLng::new(51.0, -114.02)],
//! )?;
//!
//! let outcome = merge_segments(vec![first, second], &MergeConfig::default());
//! let routes: Vec<Route> = outcome
//!     .paths
//!     .into_iter()
//!     .enumerate()
//!     .map(|(index, path)| Route::from_path(RouteId(index), path))
//!     .collect();
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes[0].coordinates.len(), 3);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod attributes;
mod coord;
pub mod geometry;
pub mod merge;
mod route;
mod segment;

pub use attributes::{RouteAttributes, UrbanRural};
pub use coord::LatLng;
pub use merge::{MergeConfig, MergeConfigError, MergeOutcome, MergedPath, merge_segments};
pub use route::{Route, RouteId};
pub use segment::{
    BikewayCategory, ParseIdError, RawSegment, SegmentError, SegmentId, UnknownCategory,
};
