#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Well-known-text geometry decoding.
//!
//! Parses the WKT strings carried on report records into coordinate
//! structures. Only `POINT` bodies are decoded today; the tag dispatch and
//! error taxonomy are general so additional geometry types can be added
//! without changing caller-visible contracts. Parse failures are typed and
//! never panic: every caller treats them as non-fatal and skips the record.

use geo::Point;
use thiserror::Error;

/// Errors produced while decoding a well-known-text string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WktError {
    /// The input was empty or whitespace-only.
    #[error("empty geometry text")]
    Empty,

    /// The geometry tag is not one this decoder handles.
    #[error("unsupported geometry type: {tag}")]
    UnsupportedType {
        /// The tag as it appeared in the input, uppercased.
        tag: String,
    },

    /// The text between the parentheses could not be decoded.
    #[error("malformed {tag} body: {body:?}")]
    MalformedBody {
        /// Geometry tag the body belongs to.
        tag: String,
        /// The offending body text.
        body: String,
    },

    /// A coordinate parsed but is NaN or infinite.
    #[error("non-finite coordinate in {tag} body")]
    NonFinite {
        /// Geometry tag the coordinate belongs to.
        tag: String,
    },
}

/// A decoded geometry.
///
/// Single-variant today; report geometries are points.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single position, longitude/latitude order.
    Point(Point<f64>),
}

/// Decodes a well-known-text string.
///
/// # Errors
///
/// Returns [`WktError`] if the input is empty, the tag is unsupported, or
/// the body is malformed.
pub fn parse(wkt: &str) -> Result<Geometry, WktError> {
    let trimmed = wkt.trim();
    if trimmed.is_empty() {
        return Err(WktError::Empty);
    }

    let (tag, body) = split_tag(trimmed)?;
    match tag.as_str() {
        "POINT" => parse_point_body(&body).map(Geometry::Point),
        _ => Err(WktError::UnsupportedType { tag }),
    }
}

/// Decodes a well-known-text point.
///
/// Convenience wrapper for the only geometry type reports carry.
///
/// # Errors
///
/// Returns [`WktError`] as [`parse`] does.
pub fn parse_point(wkt: &str) -> Result<Point<f64>, WktError> {
    let Geometry::Point(point) = parse(wkt)?;
    Ok(point)
}

/// Splits `TAG ( body )` into an uppercased tag and the body text.
fn split_tag(text: &str) -> Result<(String, String), WktError> {
    let open = text.find('(').ok_or_else(|| WktError::MalformedBody {
        tag: text.to_uppercase(),
        body: String::new(),
    })?;

    let tag = text[..open].trim().to_uppercase();
    if tag.is_empty() {
        return Err(WktError::Empty);
    }

    let rest = &text[open + 1..];
    let close = rest.rfind(')').ok_or_else(|| WktError::MalformedBody {
        tag: tag.clone(),
        body: rest.to_string(),
    })?;
    if !rest[close + 1..].trim().is_empty() {
        return Err(WktError::MalformedBody {
            tag,
            body: rest.to_string(),
        });
    }

    Ok((tag, rest[..close].to_string()))
}

/// Parses a `POINT` body: exactly two whitespace-separated finite numbers,
/// longitude first.
fn parse_point_body(body: &str) -> Result<Point<f64>, WktError> {
    let malformed = || WktError::MalformedBody {
        tag: "POINT".to_string(),
        body: body.to_string(),
    };

    let mut parts = body.split_whitespace();
    let lng: f64 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(malformed)?;
    let lat: f64 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    if !lng.is_finite() || !lat.is_finite() {
        return Err(WktError::NonFinite {
            tag: "POINT".to_string(),
        });
    }

    Ok(Point::new(lng, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_point_lon_lat_order() {
        let point = parse_point("POINT(121.5 25.1)").unwrap();
        assert!((point.x() - 121.5).abs() < f64::EPSILON);
        assert!((point.y() - 25.1).abs() < f64::EPSILON);
    }

    #[test]
    fn tolerates_tag_spacing_and_case() {
        assert!(parse_point("POINT (121.5 25.1)").is_ok());
        assert!(parse_point("point(121.5 25.1)").is_ok());
        assert!(parse_point("  POINT( 121.5   25.1 )  ").is_ok());
    }

    #[test]
    fn parse_is_idempotent() {
        let first = parse("POINT(121.6 25.0)").unwrap();
        let second = parse("POINT(121.6 25.0)").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert!(matches!(
            parse("POINT(abc)"),
            Err(WktError::MalformedBody { .. })
        ));
        assert!(matches!(
            parse("POINT(121.5)"),
            Err(WktError::MalformedBody { .. })
        ));
        assert!(matches!(
            parse("POINT(121.5 25.1 7.0)"),
            Err(WktError::MalformedBody { .. })
        ));
        assert!(matches!(
            parse("POINT(121.5 25.1"),
            Err(WktError::MalformedBody { .. })
        ));
        assert!(matches!(
            parse("POINT 121.5 25.1"),
            Err(WktError::MalformedBody { .. })
        ));
    }

    #[test]
    fn rejects_unsupported_tags() {
        assert_eq!(
            parse("LINESTRING(0 0, 1 1)"),
            Err(WktError::UnsupportedType {
                tag: "LINESTRING".to_string()
            })
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse(""), Err(WktError::Empty));
        assert_eq!(parse("   "), Err(WktError::Empty));
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(matches!(
            parse("POINT(NaN 25.1)"),
            Err(WktError::NonFinite { .. })
        ));
        assert!(matches!(
            parse("POINT(inf 25.1)"),
            Err(WktError::NonFinite { .. })
        ));
    }
}
