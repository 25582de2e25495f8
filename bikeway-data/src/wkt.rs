//! Parser for the `MULTILINESTRING` geometry column.
//!
//! The literal must hold a single ring: a list closed by `))` right after its
//! last pair. A multi-ring literal has no such list and is rejected as
//! [`GeometryError::MissingCoordinates`]. Points in the literal are written
//! `lng lat` and come out as [`LatLng`]. The parsed path is down-sampled to every
//! `stride`-th point, but the true final point is always kept so that the
//! merge engine sees the real endpoint.

use std::num::NonZeroUsize;

use bikeway_core::LatLng;
use thiserror::Error;

const OPEN: &str = "((";
const CLOSE: &str = "))";

/// Errors raised while parsing a geometry literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The text holds no `((...))` coordinate list.
    #[error("geometry has no coordinate list")]
    MissingCoordinates,
    /// A coordinate pair could not be read as two finite numbers.
    #[error("coordinate {index} is not a 'lng lat' pair: '{text}'")]
    InvalidCoordinate {
        /// Position of the pair in the literal.
        index: usize,
        /// The offending text.
        text: String,
    },
}

/// Parse a multi-line-string literal, keeping every `stride`-th point.
///
/// # Errors
/// Returns [`GeometryError::MissingCoordinates`] when no coordinate list is
/// present and [`GeometryError::InvalidCoordinate`] when a kept pair does not
/// parse.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use bikeway_core::LatLng;
/// use bikeway_data::parse_multilinestring;
///
/// let stride = NonZeroUsize::new(3).unwrap();
/// let text = "MULTILINESTRING ((0 10, 1 11, 2 12, 3 13, 4 14))";
/// let points = parse_multilinestring(text, stride).unwrap();
/// assert_eq!(
///     points,
///     vec![LatLng::new(10.0, 0.0), LatLng::new(13.0, 3.0), LatLng::new(14.0, 4.0)],
/// );
/// ```
pub fn parse_multilinestring(
    text: &str,
    stride: NonZeroUsize,
) -> Result<Vec<LatLng>, GeometryError> {
    let list = coordinate_list(text).ok_or(GeometryError::MissingCoordinates)?;
    let pairs: Vec<&str> = list.split(',').collect();

    let mut points = pairs
        .iter()
        .enumerate()
        .step_by(stride.get())
        .map(|(index, pair)| parse_pair(index, pair))
        .collect::<Result<Vec<_>, _>>()?;

    let last_index = pairs.len().saturating_sub(1);
    if let Some(pair) = pairs.last() {
        let last = parse_pair(last_index, pair)?;
        if points.last() != Some(&last) {
            points.push(last);
        }
    }
    Ok(points)
}

/// Text between the first `((` and the `))` that closes it.
fn coordinate_list(text: &str) -> Option<&str> {
    let mut offset = 0;
    while let Some(found) = text.get(offset..)?.find(OPEN) {
        let start = offset + found + OPEN.len();
        let rest = text.get(start..)?;
        if let Some(end) = rest.find(')')
            && end > 0
            && rest.get(end..).is_some_and(|tail| tail.starts_with(CLOSE))
        {
            return rest.get(..end);
        }
        offset += found + 1;
    }
    None
}

fn parse_pair(index: usize, pair: &str) -> Result<LatLng, GeometryError> {
    let invalid = || GeometryError::InvalidCoordinate {
        index,
        text: pair.trim().to_owned(),
    };
    let mut values = pair.split_whitespace().map(str::parse::<f64>);
    match (values.next(), values.next()) {
        (Some(Ok(lng)), Some(Ok(lat))) if lng.is_finite() && lat.is_finite() => {
            Ok(LatLng::new(lat, lng))
        }
        _ => Err(invalid()),
    }
}
