//! Raw segments as delivered by the bikeway export.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::LatLng;

/// Identifier of a raw segment: the 1-based line of the row it came from.
///
/// Serialised as its display form, `segment-{line}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct SegmentId(pub usize);

impl SegmentId {
    const PREFIX: &'static str = "segment-";
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for SegmentId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, Self::PREFIX).map(Self)
    }
}

impl From<SegmentId> for String {
    fn from(id: SegmentId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SegmentId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Returned when text is not a `prefix-{n}` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{text}' is not a {prefix}{{n}} identifier")]
pub struct ParseIdError {
    /// Expected prefix, including the trailing dash.
    pub prefix: &'static str,
    /// Rejected text.
    pub text: String,
}

pub(crate) fn parse_prefixed(text: &str, prefix: &'static str) -> Result<usize, ParseIdError> {
    text.strip_prefix(prefix)
        .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| ParseIdError {
            prefix,
            text: text.to_owned(),
        })
}

/// Bikeway classes accepted into the network.
///
/// # Examples
/// ```
/// use bikeway_core::BikewayCategory;
///
/// let category: BikewayCategory = "Cycle Track".parse().unwrap();
/// assert_eq!(category, BikewayCategory::CycleTrack);
/// assert_eq!(BikewayCategory::BicycleLane.to_string(), "Bicycle Lane");
/// assert!("Pathway".parse::<BikewayCategory>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BikewayCategory {
    /// Painted lane on the carriageway.
    #[cfg_attr(feature = "serde", serde(rename = "Bicycle Lane"))]
    BicycleLane,
    /// Physically separated cycle track.
    #[cfg_attr(feature = "serde", serde(rename = "Cycle Track"))]
    CycleTrack,
}

impl BikewayCategory {
    /// Every accepted category.
    pub const ALL: [Self; 2] = [Self::BicycleLane, Self::CycleTrack];

    /// Label used by the export for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BicycleLane => "Bicycle Lane",
            Self::CycleTrack => "Cycle Track",
        }
    }
}

impl fmt::Display for BikewayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label does not name an accepted bikeway class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bikeway category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for BikewayCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// One unmerged fragment of the bikeway network.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    /// Source row identifier.
    pub id: SegmentId,
    /// Bikeway class of the fragment.
    pub category: BikewayCategory,
    /// Ordered positions along the fragment.
    pub coordinates: Vec<LatLng>,
}

/// Errors returned by [`RawSegment::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// No coordinates were supplied.
    #[error("segment {0} has no coordinates")]
    Empty(SegmentId),
}

impl RawSegment {
    /// Validates and constructs a [`RawSegment`].
    ///
    /// # Errors
    /// Returns [`SegmentError::Empty`] when `coordinates` is empty.
    pub fn new(
        id: SegmentId,
        category: BikewayCategory,
        coordinates: Vec<LatLng>,
    ) -> Result<Self, SegmentError> {
        if coordinates.is_empty() {
            return Err(SegmentError::Empty(id));
        }
        Ok(Self {
            id,
            category,
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bicycle Lane", BikewayCategory::BicycleLane)]
    #[case("Cycle Track", BikewayCategory::CycleTrack)]
    fn parses_accepted_labels(#[case] label: &str, #[case] expected: BikewayCategory) {
        assert_eq!(label.parse::<BikewayCategory>(), Ok(expected));
    }

    #[rstest]
    #[case("bicycle lane")]
    #[case("Multi-Use Pathway")]
    #[case("")]
    fn rejects_other_labels(#[case] label: &str) {
        let err = label.parse::<BikewayCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory(label.to_owned()));
    }

    #[rstest]
    fn segment_requires_coordinates() {
        let result = RawSegment::new(SegmentId(4), BikewayCategory::CycleTrack, Vec::new());
        assert_eq!(result, Err(SegmentError::Empty(SegmentId(4))));
    }

    #[rstest]
    fn segment_id_displays_with_prefix() {
        assert_eq!(SegmentId(12).to_string(), "segment-12");
    }

    #[rstest]
    #[case("segment-0", SegmentId(0))]
    #[case("segment-12", SegmentId(12))]
    fn segment_id_parses_display_form(#[case] text: &str, #[case] expected: SegmentId) {
        assert_eq!(text.parse::<SegmentId>(), Ok(expected));
    }

    #[rstest]
    #[case("12")]
    #[case("segment-")]
    #[case("segment--1")]
    #[case("segment-+1")]
    #[case("route-3")]
    fn segment_id_rejects_other_text(#[case] text: &str) {
        let err = text.parse::<SegmentId>().unwrap_err();
        assert_eq!(err.prefix, "segment-");
        assert_eq!(err.text, text);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn segment_id_serialises_with_prefix() {
        let json = serde_json::to_value(SegmentId(12)).expect("serialise id");
        assert_eq!(json, serde_json::json!("segment-12"));
        let back: SegmentId = serde_json::from_value(json).expect("deserialise id");
        assert_eq!(back, SegmentId(12));
        assert!(serde_json::from_value::<SegmentId>(serde_json::json!(12)).is_err());
    }
}
