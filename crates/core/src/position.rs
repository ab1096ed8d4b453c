//! Degrees-minutes position codec for bridge watch entries.
//!
//! Positions are keyed in as a digit body plus a hemisphere: latitude
//! `DDMM.m` (e.g. `0115.0`), longitude `DDDMM.m` (e.g. `10345.0`). The
//! canonical display string (`01°15.0'N`, `103°45.0'E`) is what gets
//! persisted, and [`decode_latitude`]/[`decode_longitude`] recover the body
//! and hemisphere from it when an entry is edited.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Hemispheres
// ---------------------------------------------------------------------------

/// North/south hemisphere letter for latitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatHemisphere {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
}

impl LatHemisphere {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
        }
    }
}

/// East/west hemisphere letter for longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LonHemisphere {
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl LonHemisphere {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::East => "E",
            Self::West => "W",
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode a latitude body (`DDMM.m`) into the canonical `DD°MM.m'H` string.
pub fn encode_latitude(body: &str, hemisphere: LatHemisphere) -> Result<String, CoreError> {
    let (degrees, minutes) = split_body(body, 2, "Latitude", "DDMM.m format (e.g. 0115.0)")?;

    if degrees > 90 {
        return Err(CoreError::Validation(
            "Latitude degrees must be between 0 and 90.".to_string(),
        ));
    }
    check_minutes(minutes, "Latitude")?;

    Ok(format!("{degrees:02}°{minutes:.1}'{}", hemisphere.as_str()))
}

/// Encode a longitude body (`DDDMM.m`) into the canonical `DDD°MM.m'H` string.
pub fn encode_longitude(body: &str, hemisphere: LonHemisphere) -> Result<String, CoreError> {
    let (degrees, minutes) = split_body(body, 3, "Longitude", "DDDMM.m format (e.g. 10345.0)")?;

    if degrees > 180 {
        return Err(CoreError::Validation(
            "Longitude degrees must be between 0 and 180.".to_string(),
        ));
    }
    check_minutes(minutes, "Longitude")?;

    Ok(format!("{degrees:03}°{minutes:.1}'{}", hemisphere.as_str()))
}

/// Split a digit body into its leading degree digits and decimal minutes.
fn split_body(
    body: &str,
    degree_digits: usize,
    what: &str,
    format_hint: &str,
) -> Result<(u32, f64), CoreError> {
    let raw = body.trim();
    if raw.is_empty() {
        return Err(CoreError::Validation(format!("{what} cannot be empty.")));
    }
    // A body shorter than degrees + one minute digit cannot be split.
    if !raw.is_ascii() || raw.len() <= degree_digits {
        return Err(CoreError::Validation(format!(
            "{what} should be in {format_hint}."
        )));
    }

    let degrees = raw[..degree_digits].parse::<u32>();
    let minutes = raw[degree_digits..].parse::<f64>();

    match (degrees, minutes) {
        (Ok(degrees), Ok(minutes)) if minutes.is_finite() => Ok((degrees, minutes)),
        _ => Err(CoreError::Validation(format!(
            "{what} must contain only numbers and decimal point."
        ))),
    }
}

fn check_minutes(minutes: f64, what: &str) -> Result<(), CoreError> {
    if !(0.0..60.0).contains(&minutes) {
        return Err(CoreError::Validation(format!(
            "{what} minutes must be between 0.0 and 59.999."
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A canonical position string taken back apart for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLatitude {
    /// Digit body in `DDMM.m` form.
    pub body: String,
    pub hemisphere: LatHemisphere,
}

/// See [`DecodedLatitude`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLongitude {
    /// Digit body in `DDDMM.m` form.
    pub body: String,
    pub hemisphere: LonHemisphere,
}

/// Recover body digits and hemisphere from a canonical latitude string.
///
/// Lenient: any non-digit decoration is stripped and a missing hemisphere
/// letter defaults to N, so values keyed in before the codec existed still
/// decode. Returns `None` when there are no digits at all.
pub fn decode_latitude(display: &str) -> Option<DecodedLatitude> {
    let body = digit_body(display)?;
    let hemisphere = display
        .chars()
        .find_map(|c| match c.to_ascii_uppercase() {
            'N' => Some(LatHemisphere::North),
            'S' => Some(LatHemisphere::South),
            _ => None,
        })
        .unwrap_or(LatHemisphere::North);
    Some(DecodedLatitude { body, hemisphere })
}

/// Recover body digits and hemisphere from a canonical longitude string.
/// Missing hemisphere letters default to E.
pub fn decode_longitude(display: &str) -> Option<DecodedLongitude> {
    let body = digit_body(display)?;
    let hemisphere = display
        .chars()
        .find_map(|c| match c.to_ascii_uppercase() {
            'E' => Some(LonHemisphere::East),
            'W' => Some(LonHemisphere::West),
            _ => None,
        })
        .unwrap_or(LonHemisphere::East);
    Some(DecodedLongitude { body, hemisphere })
}

fn digit_body(display: &str) -> Option<String> {
    let body: String = display
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- encoding --

    #[test]
    fn latitude_encodes_to_canonical_display() {
        let encoded = encode_latitude("0115.0", LatHemisphere::North).unwrap();
        assert_eq!(encoded, "01°15.0'N");
    }

    #[test]
    fn longitude_encodes_with_three_degree_digits() {
        let encoded = encode_longitude("10345.0", LonHemisphere::East).unwrap();
        assert_eq!(encoded, "103°45.0'E");
    }

    #[test]
    fn latitude_minutes_keep_one_decimal() {
        let encoded = encode_latitude("0115.5", LatHemisphere::South).unwrap();
        assert_eq!(encoded, "01°15.5'S");
    }

    #[test]
    fn longitude_at_antimeridian_is_valid() {
        let encoded = encode_longitude("18000.0", LonHemisphere::West).unwrap();
        assert_eq!(encoded, "180°0.0'W");
    }

    #[test]
    fn latitude_degrees_above_ninety_are_rejected() {
        let err = encode_latitude("9515.0", LatHemisphere::North).unwrap_err();
        assert!(err.to_string().contains("between 0 and 90"));
    }

    #[test]
    fn longitude_degrees_above_one_eighty_are_rejected() {
        let err = encode_longitude("18145.0", LonHemisphere::East).unwrap_err();
        assert!(err.to_string().contains("between 0 and 180"));
    }

    #[test]
    fn minutes_of_sixty_are_rejected() {
        let err = encode_latitude("0160.0", LatHemisphere::North).unwrap_err();
        assert!(err.to_string().contains("between 0.0 and 59.999"));
    }

    #[test]
    fn empty_body_is_rejected() {
        assert_matches!(
            encode_latitude("  ", LatHemisphere::North),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn short_body_is_rejected() {
        assert_matches!(
            encode_longitude("103", LonHemisphere::East),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn non_numeric_body_is_rejected() {
        assert_matches!(
            encode_latitude("01x5.0", LatHemisphere::North),
            Err(CoreError::Validation(_))
        );
    }

    // -- decoding --

    #[test]
    fn latitude_round_trips_through_display() {
        let encoded = encode_latitude("0115.0", LatHemisphere::North).unwrap();
        let decoded = decode_latitude(&encoded).unwrap();
        assert_eq!(decoded.body, "0115.0");
        assert_eq!(decoded.hemisphere, LatHemisphere::North);
    }

    #[test]
    fn longitude_round_trips_through_display() {
        let encoded = encode_longitude("10345.5", LonHemisphere::West).unwrap();
        let decoded = decode_longitude(&encoded).unwrap();
        assert_eq!(decoded.body, "10345.5");
        assert_eq!(decoded.hemisphere, LonHemisphere::West);
    }

    #[test]
    fn southern_hemisphere_survives_round_trip() {
        let encoded = encode_latitude("3322.1", LatHemisphere::South).unwrap();
        let decoded = decode_latitude(&encoded).unwrap();
        assert_eq!(decoded.hemisphere, LatHemisphere::South);
    }

    #[test]
    fn missing_hemisphere_defaults_north() {
        let decoded = decode_latitude("01°15.0").unwrap();
        assert_eq!(decoded.hemisphere, LatHemisphere::North);
    }

    #[test]
    fn decode_without_digits_is_none() {
        assert_eq!(decode_latitude("N"), None);
        assert_eq!(decode_longitude(""), None);
    }
}
