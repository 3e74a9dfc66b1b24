//! Gimbal angles from the DJI maker note.
//!
//! The DJI maker note is a bare IFD (no header) using the byte order of the
//! enclosing TIFF structure. The gimbal angles are single `FLOAT` entries,
//! so their values sit inline in the 12-byte directory entry and no offsets
//! into the outer TIFF buffer need resolving.

const TYPE_FLOAT: u16 = 11;
const ENTRY_SIZE: usize = 12;

const TAG_CAMERA_PITCH: u16 = 0x0009;
const TAG_CAMERA_YAW: u16 = 0x000a;
const TAG_CAMERA_ROLL: u16 = 0x000b;

/// Gimbal orientation recorded by the camera, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GimbalAngles {
    pub pitch: Option<f64>,
    pub roll: Option<f64>,
    pub yaw: Option<f64>,
}

impl GimbalAngles {
    fn is_empty(&self) -> bool {
        self.pitch.is_none() && self.roll.is_none() && self.yaw.is_none()
    }
}

/// True if the camera make identifies a DJI body.
pub fn is_dji(make: &str) -> bool {
    make.trim().to_ascii_uppercase().starts_with("DJI")
}

/// Parse the gimbal angles out of a DJI maker note.
///
/// Returns `None` for truncated or implausible directories.
pub fn parse_dji(bytes: &[u8], little_endian: bool) -> Option<GimbalAngles> {
    let count = usize::from(read_u16(bytes, 0, little_endian)?);
    if count == 0 || 2 + count * ENTRY_SIZE > bytes.len() {
        return None;
    }

    let mut angles = GimbalAngles::default();
    for i in 0..count {
        let base = 2 + i * ENTRY_SIZE;
        let tag = read_u16(bytes, base, little_endian)?;
        let typ = read_u16(bytes, base + 2, little_endian)?;
        let n = read_u32(bytes, base + 4, little_endian)?;
        if typ != TYPE_FLOAT || n != 1 {
            continue;
        }
        let value = f64::from(f32::from_bits(read_u32(bytes, base + 8, little_endian)?));
        if !value.is_finite() {
            continue;
        }
        match tag {
            TAG_CAMERA_PITCH => angles.pitch = Some(value),
            TAG_CAMERA_YAW => angles.yaw = Some(value),
            TAG_CAMERA_ROLL => angles.roll = Some(value),
            _ => {}
        }
    }

    (!angles.is_empty()).then_some(angles)
}

fn read_u16(bytes: &[u8], at: usize, little_endian: bool) -> Option<u16> {
    let raw: [u8; 2] = bytes.get(at..at + 2)?.try_into().ok()?;
    Some(if little_endian {
        u16::from_le_bytes(raw)
    } else {
        u16::from_be_bytes(raw)
    })
}

fn read_u32(bytes: &[u8], at: usize, little_endian: bool) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
    Some(if little_endian {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    })
}
