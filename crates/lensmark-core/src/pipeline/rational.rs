//! Conversions from raw EXIF values to normalized scalars.
//!
//! EXIF stores most measurements as rationals (numerator/denominator pairs).
//! Every conversion here returns `None` instead of producing an infinity or a
//! NaN, so a zero denominator simply makes the field absent.

use exif::{Rational, SRational, Value};

/// Convert an unsigned rational to `f64`.
pub fn rational_to_f64(r: &Rational) -> Option<f64> {
    if r.denom == 0 {
        return None;
    }
    Some(f64::from(r.num) / f64::from(r.denom))
}

/// Convert a signed rational to `f64`.
pub fn srational_to_f64(r: &SRational) -> Option<f64> {
    if r.denom == 0 {
        return None;
    }
    Some(f64::from(r.num) / f64::from(r.denom))
}

/// First element of a numeric value as `f64`.
///
/// Rationals are divided out; integer and float scalars pass through.
pub fn first_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Rational(v) => rational_to_f64(v.first()?)?,
        Value::SRational(v) => srational_to_f64(v.first()?)?,
        Value::Byte(v) => f64::from(*v.first()?),
        Value::Short(v) => f64::from(*v.first()?),
        Value::Long(v) => f64::from(*v.first()?),
        Value::SByte(v) => f64::from(*v.first()?),
        Value::SShort(v) => f64::from(*v.first()?),
        Value::SLong(v) => f64::from(*v.first()?),
        Value::Float(v) => f64::from(*v.first()?),
        Value::Double(v) => *v.first()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// First element of a numeric value as `u32`.
///
/// Lists (e.g. ISO written as `[200, 0]`) yield their first element.
pub fn first_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Byte(v) => v.first().map(|&x| u32::from(x)),
        Value::Short(v) => v.first().map(|&x| u32::from(x)),
        Value::Long(v) => v.first().copied(),
        _ => {
            let v = first_f64(value)?;
            (v >= 0.0 && v <= f64::from(u32::MAX)).then(|| v as u32)
        }
    }
}

/// First non-empty ASCII string, trimmed of NUL padding and whitespace.
pub fn ascii_text(value: &Value) -> Option<String> {
    let Value::Ascii(parts) = value else {
        return None;
    };
    parts
        .iter()
        .map(|bytes| {
            String::from_utf8_lossy(bytes)
                .trim_matches(|c: char| c == '\0' || c.is_whitespace())
                .to_string()
        })
        .find(|s| !s.is_empty())
}

/// Convert a (degrees, minutes, seconds) rational triple to decimal degrees.
pub fn dms_to_degrees(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(v) if v.len() >= 3 => {
            let degrees = rational_to_f64(&v[0])?;
            let minutes = rational_to_f64(&v[1])?;
            let seconds = rational_to_f64(&v[2])?;
            Some(degrees + minutes / 60.0 + seconds / 3600.0)
        }
        _ => None,
    }
}

/// Apply a hemisphere reference ("N"/"S"/"E"/"W") to decimal degrees.
pub fn apply_hemisphere(degrees: f64, reference: &str) -> f64 {
    match reference.trim().chars().next() {
        Some('S' | 's' | 'W' | 'w') => -degrees,
        _ => degrees,
    }
}

/// Render an exposure time rational as a reduced fraction ("1/250", "2", "3/2").
pub fn exposure_fraction(r: &Rational) -> Option<String> {
    if r.denom == 0 {
        return None;
    }
    if r.num == 0 {
        return Some("0".to_string());
    }
    let g = gcd(r.num, r.denom);
    let (num, denom) = (r.num / g, r.denom / g);
    Some(if denom == 1 {
        num.to_string()
    } else {
        format!("{}/{}", num, denom)
    })
}

/// Render an APEX shutter speed value (Tv) as an exposure time string.
///
/// Exposure time is `2^-Tv` seconds; sub-second times are shown as `1/N`.
pub fn apex_shutter_speed(tv: f64) -> Option<String> {
    if !tv.is_finite() {
        return None;
    }
    let seconds = (-tv).exp2();
    let limit = f64::from(u32::MAX);
    if !(seconds > 0.0 && seconds <= limit && seconds.recip() <= limit) {
        return None;
    }
    if seconds < 1.0 {
        Some(format!("1/{}", (1.0 / seconds).round() as u64))
    } else if (seconds - seconds.round()).abs() < 0.05 {
        Some(format!("{}", seconds.round() as u64))
    } else {
        Some(format!("{:.1}", seconds))
    }
}

/// Convert an APEX aperture value (Av) to an f-number, rounded to one decimal.
pub fn apex_aperture(av: f64) -> Option<f64> {
    if !av.is_finite() {
        return None;
    }
    let f_number = (av / 2.0).exp2();
    Some((f_number * 10.0).round() / 10.0)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
