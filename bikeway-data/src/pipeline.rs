//! End-to-end reconstruction and the process-wide route cache.
//!
//! [`reconstruct`] runs decode, filter, parse, merge and attribute synthesis
//! over a text blob that has already been loaded. [`RouteCache`] memoises the
//! resulting routes; the first caller pays for the computation and every later
//! caller shares the same allocation.

use std::sync::Arc;

use bikeway_core::{Route, RouteId, merge_segments};
use log::{debug, info};
use once_cell::sync::OnceCell;

use crate::ingest::{SkippedRows, segment_from_row};
use crate::table::TableDecoder;
use crate::PipelineConfig;

/// Load statistics for one reconstruction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct NetworkSummary {
    /// Raw segments admitted into the merge.
    pub segment_count: usize,
    /// Routes left after merging and filtering.
    pub route_count: usize,
    /// Share of segments absorbed by merging, in percent, one decimal.
    pub reduction_percent: f64,
    /// Points across every route.
    pub total_coordinates: usize,
    /// Mean points per route, one decimal.
    pub average_points_per_route: f64,
}

impl NetworkSummary {
    /// Summarise `routes` built from `segment_count` segments.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "summary ratios are reported as rounded floats"
    )]
    pub fn new(segment_count: usize, routes: &[Route]) -> Self {
        let route_count = routes.len();
        let total_coordinates = routes.iter().map(|route| route.coordinates.len()).sum();
        let reduction_percent = if segment_count == 0 {
            0.0
        } else {
            (1.0 - route_count as f64 / segment_count as f64) * 100.0
        };
        let average_points_per_route = if route_count == 0 {
            0.0
        } else {
            total_coordinates as f64 / route_count as f64
        };
        Self {
            segment_count,
            route_count,
            reduction_percent: round_tenths(reduction_percent),
            total_coordinates,
            average_points_per_route: round_tenths(average_points_per_route),
        }
    }
}

#[expect(clippy::float_arithmetic, reason = "rounding to one decimal")]
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Everything one reconstruction produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct NetworkReport {
    /// Attributed routes in output order.
    pub routes: Vec<Route>,
    /// Load statistics.
    pub summary: NetworkSummary,
    /// Rows that did not become segments, by reason.
    pub skipped_rows: SkippedRows,
}

/// Reconstruct the bike route network from a bikeway table.
///
/// Bad rows are skipped and counted; the result may be empty but this never
/// fails.
///
/// # Examples
/// ```
/// use bikeway_data::{PipelineConfig, reconstruct};
///
/// let table = "\
/// ID,NAME,CLASS,A,B,C,D,GEOMETRY
/// 1,Bow,Cycle Track,,,,,\"MULTILINESTRING ((0 0, 1 0))\"
/// 2,Bow,Cycle Track,,,,,\"MULTILINESTRING ((1 0, 2 0))\"
/// 3,Elbow,Pathway,,,,,\"MULTILINESTRING ((5 5, 6 6))\"
/// ";
/// let report = reconstruct(table, &PipelineConfig::default());
/// assert_eq!(report.summary.segment_count, 2);
/// assert_eq!(report.routes.len(), 1);
/// assert_eq!(report.skipped_rows.excluded_category, 1);
/// ```
#[must_use]
pub fn reconstruct(table: &str, config: &PipelineConfig) -> NetworkReport {
    let mut rows = TableDecoder::new(config.required_fields()).decode(table);
    let mut skipped_rows = SkippedRows::default();
    let mut segments = Vec::new();

    for row in rows.by_ref() {
        match segment_from_row(&row, config) {
            Ok(segment) => segments.push(segment),
            Err(err) => {
                debug!("skipping line {}: {err}", row.line());
                skipped_rows.record(&err);
            }
        }
    }
    skipped_rows.malformed += rows.short_rows();

    let segment_count = segments.len();
    let outcome = merge_segments(segments, &config.merge);
    let routes: Vec<Route> = outcome
        .paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| Route::from_path(RouteId(index), path))
        .collect();

    let summary = NetworkSummary::new(segment_count, &routes);
    info!(
        "reconstructed {} routes from {} segments ({}% reduction, {} coordinates, {} points per route, {} rows skipped)",
        summary.route_count,
        summary.segment_count,
        summary.reduction_percent,
        summary.total_coordinates,
        summary.average_points_per_route,
        skipped_rows.total(),
    );

    NetworkReport {
        routes,
        summary,
        skipped_rows,
    }
}

/// Write-once store for a reconstructed network.
///
/// The cache is never invalidated: once filled, later calls return the stored
/// routes and ignore their input.
#[derive(Debug, Default)]
pub struct RouteCache {
    routes: OnceCell<Arc<[Route]>>,
}

impl RouteCache {
    /// An empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            routes: OnceCell::new(),
        }
    }

    /// Routes already stored, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<[Route]>> {
        self.routes.get().map(Arc::clone)
    }

    /// Return the stored routes, running `build` only if the cache is empty.
    #[must_use]
    pub fn get_or_build_with<F>(&self, build: F) -> Arc<[Route]>
    where
        F: FnOnce() -> Vec<Route>,
    {
        let routes = self.routes.get_or_init(|| Arc::from(build()));
        Arc::clone(routes)
    }

    /// Return the stored routes, reconstructing them from `table` on a miss.
    #[must_use]
    pub fn get_or_reconstruct(&self, table: &str, config: &PipelineConfig) -> Arc<[Route]> {
        self.get_or_build_with(|| {
            debug!("route cache miss; reconstructing network");
            reconstruct(table, config).routes
        })
    }
}

static NETWORK: RouteCache = RouteCache::new();

/// Process-wide routes built with the default configuration.
///
/// Only the first call in a process reads `table`.
#[must_use]
pub fn bikeway_routes(table: &str) -> Arc<[Route]> {
    NETWORK.get_or_reconstruct(table, &PipelineConfig::default())
}
