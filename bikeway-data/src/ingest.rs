//! Turns decoded rows into raw segments.
//!
//! Rows are rejected one at a time: a bad row yields an [`IngestError`] that
//! the pipeline logs and counts, and never stops the load.

use bikeway_core::{BikewayCategory, RawSegment, SegmentError, SegmentId};
use thiserror::Error;

use crate::table::Row;
use crate::wkt::{GeometryError, parse_multilinestring};
use crate::PipelineConfig;

/// Reasons a row does not become a segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// The row has no value in a required column.
    #[error("row has no column {column}")]
    MissingField {
        /// Zero-based column index.
        column: usize,
    },
    /// The category is not one admitted into the network.
    #[error("category '{0}' is not admitted")]
    UnknownCategory(String),
    /// The geometry column could not be parsed.
    #[error("invalid geometry: {source}")]
    Geometry {
        /// Underlying parser error.
        #[from]
        source: GeometryError,
    },
    /// The geometry yielded no usable points.
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

/// Build a segment from one decoded row.
///
/// The segment id is the row's line index, so the first data row becomes
/// `segment-1`.
///
/// # Errors
/// Returns an [`IngestError`] describing why the row was rejected.
pub fn segment_from_row(row: &Row, config: &PipelineConfig) -> Result<RawSegment, IngestError> {
    let label = required(row, config.category_column)?;
    let category = label
        .parse::<BikewayCategory>()
        .ok()
        .filter(|category| config.allows(*category))
        .ok_or_else(|| IngestError::UnknownCategory(label.to_owned()))?;

    let geometry = required(row, config.geometry_column)?;
    let coordinates = parse_multilinestring(geometry, config.sample_stride)?;
    Ok(RawSegment::new(SegmentId(row.line()), category, coordinates)?)
}

fn required(row: &Row, column: usize) -> Result<&str, IngestError> {
    row.field(column)
        .filter(|value| !value.is_empty())
        .ok_or(IngestError::MissingField { column })
}

/// Per-reason counts of rows that did not become segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SkippedRows {
    /// Rows with too few fields or an empty required field.
    pub malformed: usize,
    /// Rows whose category is not admitted.
    pub excluded_category: usize,
    /// Rows whose geometry could not be parsed.
    pub invalid_geometry: usize,
}

impl SkippedRows {
    /// Count one rejected row.
    pub fn record(&mut self, error: &IngestError) {
        match error {
            IngestError::MissingField { .. } => self.malformed += 1,
            IngestError::UnknownCategory(_) => self.excluded_category += 1,
            IngestError::Geometry { .. } | IngestError::Segment(_) => {
                self.invalid_geometry += 1;
            }
        }
    }

    /// Total number of skipped rows.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.malformed + self.excluded_category + self.invalid_geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TableDecoder;
    use bikeway_core::LatLng;
    use rstest::{fixture, rstest};

    const HEADER: &str = "ID,NAME,CLASS,A,B,C,D,GEOMETRY";

    #[fixture]
    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    fn row(category: &str, geometry: &str) -> Row {
        let text = format!("{HEADER}\n1,Bow,{category},a,b,c,d,\"{geometry}\"\n");
        TableDecoder::new(8)
            .decode(&text)
            .next()
            .expect("row decodes")
    }

    #[rstest]
    fn admitted_row_becomes_a_segment(config: PipelineConfig) {
        let segment = segment_from_row(
            &row("Cycle Track", "MULTILINESTRING ((-114.0 51.0, -114.1 51.1))"),
            &config,
        )
        .expect("row is admitted");
        assert_eq!(segment.id, SegmentId(1));
        assert_eq!(segment.category, BikewayCategory::CycleTrack);
        assert_eq!(
            segment.coordinates,
            vec![LatLng::new(51.0, -114.0), LatLng::new(51.1, -114.1)]
        );
    }

    #[rstest]
    #[case("Multi-Use Pathway")]
    #[case("bicycle lane")]
    fn unknown_category_is_rejected(config: PipelineConfig, #[case] category: &str) {
        let err = segment_from_row(&row(category, "MULTILINESTRING ((0 0, 1 1))"), &config)
            .unwrap_err();
        assert_eq!(err, IngestError::UnknownCategory(category.to_owned()));
    }

    #[rstest]
    fn category_outside_allow_list_is_rejected(config: PipelineConfig) {
        let config = config.with_allowed_categories([BikewayCategory::CycleTrack]);
        let err = segment_from_row(&row("Bicycle Lane", "MULTILINESTRING ((0 0, 1 1))"), &config)
            .unwrap_err();
        assert_eq!(err, IngestError::UnknownCategory("Bicycle Lane".to_owned()));
    }

    #[rstest]
    fn empty_geometry_is_malformed(config: PipelineConfig) {
        let err = segment_from_row(&row("Cycle Track", ""), &config).unwrap_err();
        assert_eq!(err, IngestError::MissingField { column: 7 });
    }

    #[rstest]
    fn unparsable_geometry_is_reported(config: PipelineConfig) {
        let err = segment_from_row(&row("Cycle Track", "LINESTRING (0 0, 1 1)"), &config)
            .unwrap_err();
        assert_eq!(
            err,
            IngestError::Geometry {
                source: GeometryError::MissingCoordinates,
            }
        );
    }

    #[rstest]
    fn skipped_rows_are_tallied_by_reason() {
        let mut skipped = SkippedRows::default();
        skipped.record(&IngestError::MissingField { column: 2 });
        skipped.record(&IngestError::UnknownCategory("Pathway".to_owned()));
        skipped.record(&IngestError::UnknownCategory("Sharrow".to_owned()));
        skipped.record(&IngestError::from(GeometryError::MissingCoordinates));
        assert_eq!(
            skipped,
            SkippedRows {
                malformed: 1,
                excluded_category: 2,
                invalid_geometry: 1,
            }
        );
        assert_eq!(skipped.total(), 4);
    }
}
