//! NetCDF classic file reader.
//!
//! Parses the subset of the classic format the writer produces: CDF-1,
//! no record dimension, double and char payloads. Enough for round-trip
//! verification and the post-export convention check.

use std::path::Path;

use cruise_model::{ArrayValues, AttrList, AttrValue, DataArray, Dataset};

use crate::error::{NcError, Result};
use crate::header::{MAGIC, NcType, TAG_ATTRIBUTE, TAG_DIMENSION, TAG_VARIABLE, VERSION_CLASSIC};

/// Read a NetCDF classic file back into a [`Dataset`].
///
/// Char variables over a `STRING<n>` dimension are decoded to string
/// values; the synthetic string-length dimensions do not reappear in the
/// dataset's dimension table.
pub fn read_nc3(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path)?;
    parse(&bytes)
}

fn parse(bytes: &[u8]) -> Result<Dataset> {
    let mut cursor = Cursor::new(bytes);

    let magic = cursor.take(4)?;
    if &magic[..3] != MAGIC {
        return Err(NcError::Format("bad magic".to_string()));
    }
    if magic[3] != VERSION_CLASSIC {
        return Err(NcError::Format(format!(
            "unsupported CDF version {}",
            magic[3]
        )));
    }

    let _numrecs = cursor.i32()?;

    let dims = read_dim_list(&mut cursor)?;
    let global_attrs = read_attr_list(&mut cursor)?;
    let raw_vars = read_var_list(&mut cursor)?;

    let mut dataset = Dataset::new();
    dataset.attrs = global_attrs;
    for (name, len) in &dims {
        if !is_string_dim(name) {
            dataset.dims.insert(name.clone(), *len);
        }
    }

    for raw in raw_vars {
        let array = decode_variable(bytes, &dims, &raw)?;
        if array.dims.len() == 1 && array.dims[0] == raw.name {
            dataset.coords.insert(raw.name, array);
        } else {
            dataset.data_vars.insert(raw.name, array);
        }
    }

    Ok(dataset)
}

struct RawVar {
    name: String,
    dimids: Vec<usize>,
    attrs: AttrList,
    nc_type: NcType,
    begin: usize,
}

fn read_dim_list(cursor: &mut Cursor<'_>) -> Result<Vec<(String, usize)>> {
    let (tag, count) = (cursor.i32()?, cursor.i32()?);
    if count == 0 {
        return Ok(Vec::new());
    }
    if tag != TAG_DIMENSION {
        return Err(NcError::Format(format!("expected dim list, got tag {tag}")));
    }
    let mut dims = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = cursor.name()?;
        let len = cursor.i32()?;
        dims.push((name, len as usize));
    }
    Ok(dims)
}

fn read_attr_list(cursor: &mut Cursor<'_>) -> Result<AttrList> {
    let (tag, count) = (cursor.i32()?, cursor.i32()?);
    let mut attrs = AttrList::new();
    if count == 0 {
        return Ok(attrs);
    }
    if tag != TAG_ATTRIBUTE {
        return Err(NcError::Format(format!(
            "expected attribute list, got tag {tag}"
        )));
    }
    for _ in 0..count {
        let name = cursor.name()?;
        let nc_type = NcType::from_code(cursor.i32()?)?;
        let nelems = cursor.i32()? as usize;
        let value = read_attr_value(cursor, &name, nc_type, nelems)?;
        attrs.set(name, value);
    }
    Ok(attrs)
}

fn read_attr_value(
    cursor: &mut Cursor<'_>,
    name: &str,
    nc_type: NcType,
    nelems: usize,
) -> Result<AttrValue> {
    match nc_type {
        NcType::Char => {
            let raw = cursor.take_padded(nelems)?;
            let text = String::from_utf8(raw.to_vec())
                .map_err(|_| NcError::Format(format!("attribute '{name}' is not UTF-8")))?;
            Ok(AttrValue::Str(text))
        }
        NcType::Double if nelems == 1 => {
            let raw = cursor.take(8)?;
            Ok(AttrValue::F64(f64::from_be_bytes(
                raw.try_into().expect("8 bytes"),
            )))
        }
        NcType::Int if nelems == 1 => {
            let value = cursor.i32()?;
            Ok(AttrValue::I64(i64::from(value)))
        }
        other => Err(NcError::Format(format!(
            "attribute '{name}': unsupported {other:?} x {nelems}"
        ))),
    }
}

fn read_var_list(cursor: &mut Cursor<'_>) -> Result<Vec<RawVar>> {
    let (tag, count) = (cursor.i32()?, cursor.i32()?);
    if count == 0 {
        return Ok(Vec::new());
    }
    if tag != TAG_VARIABLE {
        return Err(NcError::Format(format!(
            "expected variable list, got tag {tag}"
        )));
    }
    let mut vars = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = cursor.name()?;
        let ndims = cursor.i32()? as usize;
        let mut dimids = Vec::with_capacity(ndims);
        for _ in 0..ndims {
            dimids.push(cursor.i32()? as usize);
        }
        let attrs = read_attr_list(cursor)?;
        let nc_type = NcType::from_code(cursor.i32()?)?;
        let _vsize = cursor.i32()?;
        let begin = cursor.i32()? as usize;
        vars.push(RawVar {
            name,
            dimids,
            attrs,
            nc_type,
            begin,
        });
    }
    Ok(vars)
}

fn decode_variable(bytes: &[u8], dims: &[(String, usize)], raw: &RawVar) -> Result<DataArray> {
    let dim_names: Vec<&str> = raw
        .dimids
        .iter()
        .map(|&id| {
            dims.get(id)
                .map(|(name, _)| name.as_str())
                .ok_or_else(|| NcError::Format(format!("bad dimid {id} in '{}'", raw.name)))
        })
        .collect::<Result<_>>()?;
    let lengths: Vec<usize> = raw.dimids.iter().map(|&id| dims[id].1).collect();
    let nelems: usize = lengths.iter().product();

    let mut array = match raw.nc_type {
        NcType::Double => {
            let end = raw.begin + nelems * 8;
            let slice = bytes
                .get(raw.begin..end)
                .ok_or_else(|| NcError::Format(format!("truncated data for '{}'", raw.name)))?;
            let values = slice
                .chunks_exact(8)
                .map(|chunk| f64::from_be_bytes(chunk.try_into().expect("8 bytes")))
                .collect();
            DataArray {
                dims: dim_names.iter().map(|d| (*d).to_string()).collect(),
                values: ArrayValues::F64(values),
                attrs: AttrList::new(),
            }
        }
        NcType::Char => {
            let Some((&width_dim, outer)) = dim_names.split_last() else {
                return Err(NcError::Unsupported(format!(
                    "char variable '{}' has no string dimension",
                    raw.name
                )));
            };
            if !is_string_dim(width_dim) {
                return Err(NcError::Unsupported(format!(
                    "char variable '{}' lacks a STRING<n> dimension",
                    raw.name
                )));
            }
            let width = *lengths.last().expect("split_last ensured a dim");
            let rows = nelems / width.max(1);
            let end = raw.begin + nelems;
            let slice = bytes
                .get(raw.begin..end)
                .ok_or_else(|| NcError::Format(format!("truncated data for '{}'", raw.name)))?;
            let values = slice
                .chunks_exact(width)
                .map(|chunk| {
                    let trimmed: Vec<u8> =
                        chunk.iter().copied().take_while(|&b| b != 0).collect();
                    String::from_utf8(trimmed).map_err(|_| {
                        NcError::Format(format!("non-UTF-8 text in '{}'", raw.name))
                    })
                })
                .collect::<Result<Vec<String>>>()?;
            debug_assert_eq!(values.len(), rows);
            DataArray {
                dims: outer.iter().map(|d| (*d).to_string()).collect(),
                values: ArrayValues::Str(values),
                attrs: AttrList::new(),
            }
        }
        other => {
            return Err(NcError::Unsupported(format!(
                "variable '{}': type {other:?}",
                raw.name
            )));
        }
    };

    array.attrs = raw.attrs.clone();
    Ok(array)
}

fn is_string_dim(name: &str) -> bool {
    name.strip_prefix("STRING")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos + n;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| NcError::Format("unexpected end of file".to_string()))?;
        self.pos = end;
        Ok(slice)
    }

    /// Take `n` bytes and skip the padding to the four-byte boundary.
    fn take_padded(&mut self, n: usize) -> Result<&'a [u8]> {
        let slice = self.take(n)?;
        let padding = crate::header::pad4(n) - n;
        self.take(padding)?;
        Ok(slice)
    }

    fn i32(&mut self) -> Result<i32> {
        let raw = self.take(4)?;
        Ok(i32::from_be_bytes(raw.try_into().expect("4 bytes")))
    }

    fn name(&mut self) -> Result<String> {
        let len = self.i32()? as usize;
        let raw = self.take_padded(len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|_| NcError::Format("non-UTF-8 name".to_string()))
    }
}
