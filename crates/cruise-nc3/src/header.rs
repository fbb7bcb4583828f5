//! NetCDF classic header layout.
//!
//! Byte-level building blocks shared by the writer and reader. All
//! integers are big-endian; names and payloads are padded to four-byte
//! boundaries with NUL bytes.

use cruise_model::AttrValue;

use crate::error::{NcError, Result};

/// File magic: "CDF" followed by the version byte.
pub const MAGIC: &[u8; 3] = b"CDF";

/// CDF-1: 32-bit offsets.
pub const VERSION_CLASSIC: u8 = 1;

/// List tags.
pub const TAG_DIMENSION: i32 = 0x0A;
pub const TAG_VARIABLE: i32 = 0x0B;
pub const TAG_ATTRIBUTE: i32 = 0x0C;

/// An absent list is encoded as two zero words.
pub const TAG_ABSENT: i32 = 0;

/// External type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NcType {
    Byte = 1,
    Char = 2,
    Short = 3,
    Int = 4,
    Float = 5,
    Double = 6,
}

impl NcType {
    pub fn size(self) -> usize {
        match self {
            NcType::Byte | NcType::Char => 1,
            NcType::Short => 2,
            NcType::Int | NcType::Float => 4,
            NcType::Double => 8,
        }
    }

    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(NcType::Byte),
            2 => Ok(NcType::Char),
            3 => Ok(NcType::Short),
            4 => Ok(NcType::Int),
            5 => Ok(NcType::Float),
            6 => Ok(NcType::Double),
            other => Err(NcError::Format(format!("unknown nc_type {other}"))),
        }
    }
}

/// Round a byte count up to the next four-byte boundary.
pub fn pad4(len: usize) -> usize {
    len.div_ceil(4) * 4
}

pub fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub fn put_f64(out: &mut Vec<u8>, value: f64) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Encode a name: length word, bytes, NUL padding to four bytes.
pub fn put_name(out: &mut Vec<u8>, name: &str) {
    let bytes = name.as_bytes();
    put_i32(out, bytes.len() as i32);
    out.extend_from_slice(bytes);
    out.resize(out.len() + (pad4(bytes.len()) - bytes.len()), 0);
}

/// NetCDF classic name rules: leading alphanumeric or underscore, no
/// embedded NULs or slashes.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| NcError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("empty"));
    };
    if !(first.is_ascii_alphanumeric() || first == '_') {
        return Err(invalid("must start with an alphanumeric or underscore"));
    }
    if name.chars().any(|ch| ch == '\0' || ch == '/') {
        return Err(invalid("contains a NUL or slash"));
    }
    Ok(())
}

/// Encode one attribute: name, type, element count, padded payload.
pub fn put_attr(out: &mut Vec<u8>, name: &str, value: &AttrValue) -> Result<()> {
    validate_name(name)?;
    put_name(out, name);
    match value {
        AttrValue::Str(text) => {
            let bytes = text.as_bytes();
            put_i32(out, NcType::Char as i32);
            put_i32(out, bytes.len() as i32);
            out.extend_from_slice(bytes);
            out.resize(out.len() + (pad4(bytes.len()) - bytes.len()), 0);
        }
        AttrValue::F64(v) => {
            put_i32(out, NcType::Double as i32);
            put_i32(out, 1);
            put_f64(out, *v);
        }
        AttrValue::I64(v) => {
            let narrow = i32::try_from(*v).map_err(|_| {
                NcError::Unsupported(format!("attribute '{name}' value {v} exceeds 32 bits"))
            })?;
            put_i32(out, NcType::Int as i32);
            put_i32(out, 1);
            put_i32(out, narrow);
        }
    }
    Ok(())
}
