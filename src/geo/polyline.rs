use super::Coordinate;
use crate::error::PolylineError;

const PRECISION: f64 = 1e5;

/// Decodes a Google encoded polyline (precision 5) into coordinates.
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat = lat
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow(index))?;
        if index >= bytes.len() {
            return Err(PolylineError::Unpaired);
        }
        lng = lng
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow(index))?;

        let point = Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION);
        if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
            return Err(PolylineError::OutOfRange(points.len()));
        }
        points.push(point);
    }

    Ok(points)
}

/// Reads one zig-zag, 5-bit chunked delta starting at `index`
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result = 0i64;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated(*index));
        };
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(PolylineError::InvalidCharacter(byte as char, *index));
        }
        *index += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 { !(result >> 1) } else { result >> 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decode_reference_polyline() {
        let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

        assert_eq!(points.len(), expected.len());
        for (p, (lat, lng)) in points.iter().zip(expected) {
            assert_relative_eq!(p.lat, lat, epsilon = 1e-9);
            assert_relative_eq!(p.lng, lng, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_polyline("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        // Continuation bit set on the last byte
        assert_eq!(decode_polyline("_p~iF~ps|"), Err(PolylineError::Truncated(9)));
    }

    #[test]
    fn test_decode_rejects_unpaired_latitude() {
        assert_eq!(decode_polyline("_p~iF"), Err(PolylineError::Unpaired));
    }

    #[test]
    fn test_decode_rejects_huge_deltas() {
        // Each "}~~~~~~~~~~~F" decodes to a delta of roughly 4.6e13 degrees
        let once = "}~~~~~~~~~~~F?";
        assert_eq!(decode_polyline(once), Err(PolylineError::OutOfRange(0)));
        assert_eq!(decode_polyline(&once.repeat(2)), Err(PolylineError::OutOfRange(0)));
        assert_eq!(decode_polyline(&once.repeat(3)), Err(PolylineError::OutOfRange(0)));
    }

    #[test]
    fn test_decode_rejects_point_that_leaves_range() {
        // (89.0, 0.0) then +2 degrees of latitude
        let mut encoded = encode_value(8_900_000);
        encoded.push_str(&encode_value(0));
        encoded.push_str(&encode_value(200_000));
        encoded.push_str(&encode_value(0));

        assert_eq!(decode_polyline(&encoded), Err(PolylineError::OutOfRange(1)));
    }

    #[test]
    fn test_decode_accepts_range_limits() {
        let mut encoded = encode_value(-9_000_000);
        encoded.push_str(&encode_value(18_000_000));

        let points = decode_polyline(&encoded).unwrap();
        assert_eq!(points, vec![Coordinate::new(-90.0, 180.0)]);
    }

    /// Encodes one signed delta the same way the maps service does
    fn encode_value(value: i64) -> String {
        let mut v = if value < 0 { !(value << 1) } else { value << 1 };
        let mut out = String::new();
        while v >= 0x20 {
            out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
            v >>= 5;
        }
        out.push((v as u8 + 63) as char);
        out
    }

    #[test]
    fn test_decode_rejects_bad_character() {
        assert!(matches!(
            decode_polyline("_p~iF ps|U"),
            Err(PolylineError::InvalidCharacter(' ', 5))
        ));
    }
}
