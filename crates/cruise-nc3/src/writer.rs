//! NetCDF classic file writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cruise_model::{ArrayValues, DataArray, Dataset};

use crate::error::{NcError, Result};
use crate::header::{
    MAGIC, NcType, TAG_ABSENT, TAG_ATTRIBUTE, TAG_DIMENSION, TAG_VARIABLE, VERSION_CLASSIC, pad4,
    put_attr, put_i32, put_name, validate_name,
};

/// Write a cruise dataset as a NetCDF classic (CDF-1) file.
///
/// Coordinates are written first, then data variables in dictionary
/// order. Text variables become two-dimensional char arrays over a shared
/// `STRING<n>` length dimension. No record dimension is used.
pub fn write_nc3(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let plan = FilePlan::build(dataset)?;
    plan.write_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}

struct PlannedVar {
    name: String,
    dimids: Vec<usize>,
    nc_type: NcType,
    data: Vec<u8>,
}

impl PlannedVar {
    fn vsize(&self) -> usize {
        pad4(self.data.len())
    }
}

struct FilePlan {
    dims: Vec<(String, usize)>,
    global_attrs: Vec<u8>,
    global_attr_count: usize,
    vars: Vec<PlannedVar>,
    var_attr_blocks: Vec<(Vec<u8>, usize)>,
}

impl FilePlan {
    fn build(dataset: &Dataset) -> Result<Self> {
        let mut dims: Vec<(String, usize)> = Vec::new();
        for (name, len) in &dataset.dims {
            validate_name(name)?;
            dims.push((name.clone(), *len));
        }

        let mut global_attrs = Vec::new();
        for (name, value) in dataset.attrs.iter() {
            put_attr(&mut global_attrs, name, value)?;
        }
        let global_attr_count = dataset.attrs.len();

        let mut vars = Vec::new();
        let mut var_attr_blocks = Vec::new();
        for (name, array) in dataset.coords.iter().chain(dataset.data_vars.iter()) {
            validate_name(name)?;
            let planned = plan_variable(name, array, &mut dims)?;
            vars.push(planned);

            let mut block = Vec::new();
            for (attr_name, value) in array.attrs.iter() {
                put_attr(&mut block, attr_name, value)?;
            }
            var_attr_blocks.push((block, array.attrs.len()));
        }

        Ok(Self {
            dims,
            global_attrs,
            global_attr_count,
            vars,
            var_attr_blocks,
        })
    }

    /// Serialize the header with the given per-variable begin offsets.
    fn header_bytes(&self, begins: &[usize]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.push(VERSION_CLASSIC);
        put_i32(&mut out, 0); // numrecs: no record dimension

        // dim_list
        if self.dims.is_empty() {
            put_i32(&mut out, TAG_ABSENT);
            put_i32(&mut out, 0);
        } else {
            put_i32(&mut out, TAG_DIMENSION);
            put_i32(&mut out, self.dims.len() as i32);
            for (name, len) in &self.dims {
                put_name(&mut out, name);
                put_i32(&mut out, *len as i32);
            }
        }

        // gatt_list
        put_attr_list(&mut out, &self.global_attrs, self.global_attr_count);

        // var_list
        if self.vars.is_empty() {
            put_i32(&mut out, TAG_ABSENT);
            put_i32(&mut out, 0);
        } else {
            put_i32(&mut out, TAG_VARIABLE);
            put_i32(&mut out, self.vars.len() as i32);
            for (idx, var) in self.vars.iter().enumerate() {
                put_name(&mut out, &var.name);
                put_i32(&mut out, var.dimids.len() as i32);
                for dimid in &var.dimids {
                    put_i32(&mut out, *dimid as i32);
                }
                let (block, count) = &self.var_attr_blocks[idx];
                put_attr_list(&mut out, block, *count);
                put_i32(&mut out, var.nc_type as i32);
                put_i32(&mut out, var.vsize() as i32);
                put_i32(&mut out, begins[idx] as i32);
            }
        }

        out
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        // First pass with zeroed offsets fixes the header length; real
        // offsets follow from it.
        let zeros = vec![0usize; self.vars.len()];
        let header_len = self.header_bytes(&zeros).len();

        let mut begins = Vec::with_capacity(self.vars.len());
        let mut offset = header_len;
        for var in &self.vars {
            begins.push(offset);
            offset += var.vsize();
        }

        writer.write_all(&self.header_bytes(&begins))?;
        for var in &self.vars {
            writer.write_all(&var.data)?;
            let padding = var.vsize() - var.data.len();
            writer.write_all(&vec![0u8; padding])?;
        }
        Ok(())
    }
}

fn put_attr_list(out: &mut Vec<u8>, block: &[u8], count: usize) {
    if count == 0 {
        put_i32(out, TAG_ABSENT);
        put_i32(out, 0);
    } else {
        put_i32(out, TAG_ATTRIBUTE);
        put_i32(out, count as i32);
        out.extend_from_slice(block);
    }
}

fn plan_variable(
    name: &str,
    array: &DataArray,
    dims: &mut Vec<(String, usize)>,
) -> Result<PlannedVar> {
    let mut dimids = Vec::with_capacity(array.dims.len());
    for dim in &array.dims {
        let dimid = dims
            .iter()
            .position(|(n, _)| n == dim)
            .ok_or_else(|| NcError::UnknownDimension {
                variable: name.to_string(),
                dim: dim.clone(),
            })?;
        dimids.push(dimid);
    }
    let expected: usize = dimids.iter().map(|&id| dims[id].1).product();

    match &array.values {
        ArrayValues::F64(values) => {
            if values.len() != expected {
                return Err(NcError::SizeMismatch {
                    variable: name.to_string(),
                    expected,
                    actual: values.len(),
                });
            }
            let mut data = Vec::with_capacity(values.len() * 8);
            for value in values {
                data.extend_from_slice(&value.to_be_bytes());
            }
            Ok(PlannedVar {
                name: name.to_string(),
                dimids,
                nc_type: NcType::Double,
                data,
            })
        }
        ArrayValues::Str(values) => {
            if values.len() != expected {
                return Err(NcError::SizeMismatch {
                    variable: name.to_string(),
                    expected,
                    actual: values.len(),
                });
            }
            let width = values.iter().map(String::len).max().unwrap_or(0).max(1);
            let string_dim = format!("STRING{width}");
            let dimid = match dims.iter().position(|(n, _)| *n == string_dim) {
                Some(id) => id,
                None => {
                    dims.push((string_dim, width));
                    dims.len() - 1
                }
            };
            dimids.push(dimid);

            let mut data = Vec::with_capacity(values.len() * width);
            for value in values {
                let bytes = value.as_bytes();
                if bytes.len() > width {
                    return Err(NcError::Unsupported(format!(
                        "string value longer than planned width in '{name}'"
                    )));
                }
                data.extend_from_slice(bytes);
                data.resize(data.len() + (width - bytes.len()), 0);
            }
            Ok(PlannedVar {
                name: name.to_string(),
                dimids,
                nc_type: NcType::Char,
                data,
            })
        }
    }
}
