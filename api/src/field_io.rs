//! Field files

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use integrators::SimulationResult;
use photon_core::base::*;
use photon_core::error::*;
use photon_core::params::FieldKind;
use photon_core::stats::WalkStats;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// File signature.
const MAGIC: &[u8; 4] = b"PFLD";

/// Current format version.
const VERSION: u32 = 1;

/// Writes a field to a little-endian binary file. The header holds the
/// field kind, grid shape, pitch, photon count, aperture area and maximum
/// value (NaN when absent), followed by the volume as `f32` in x-fastest
/// order.
///
/// * `path`   - Output file path.
/// * `result` - The field to write.
pub fn write_field<P: AsRef<Path>>(path: P, result: &SimulationResult) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut w = BufWriter::new(file);
    write_field_to(&mut w, result)?;
    w.flush()?;
    Ok(())
}

/// Writes a field to any writer.
///
/// * `w`      - Output.
/// * `result` - The field to write.
pub fn write_field_to<W: Write>(w: &mut W, result: &SimulationResult) -> Result<()> {
    w.write_all(MAGIC)?;
    w.write_u32::<LittleEndian>(VERSION)?;
    w.write_u8(match result.kind {
        FieldKind::Detector => 0,
        FieldKind::Emitter => 1,
    })?;
    for &n in result.dims.iter() {
        let n = u32::try_from(n).map_err(|_| {
            FieldError::InvalidParameter(format!("dims {:?} too large for field file", result.dims))
        })?;
        w.write_u32::<LittleEndian>(n)?;
    }
    w.write_f32::<LittleEndian>(result.pitch as f32)?;
    w.write_u64::<LittleEndian>(result.total_photons)?;
    w.write_f32::<LittleEndian>(result.emitter_area.map_or(f32::NAN, |v| v as f32))?;
    w.write_f32::<LittleEndian>(result.max_value.map_or(f32::NAN, |v| v as f32))?;
    for &v in result.volume.iter() {
        w.write_f32::<LittleEndian>(v as f32)?;
    }
    Ok(())
}

/// Reads a field written by `write_field`. Walk statistics are not stored
/// and come back empty.
///
/// * `path` - Input file path.
pub fn read_field<P: AsRef<Path>>(path: P) -> Result<SimulationResult> {
    let file = File::open(path.as_ref())?;
    read_field_from(&mut BufReader::new(file))
}

/// Reads a field from any reader.
///
/// * `r` - Input.
pub fn read_field_from<R: Read>(r: &mut R) -> Result<SimulationResult> {
    let mut magic = [0_u8; 4];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(FieldError::Parse(String::from("not a field file")));
    }
    let version = r.read_u32::<LittleEndian>()?;
    if version != VERSION {
        return Err(FieldError::Parse(format!(
            "unsupported field file version {}",
            version
        )));
    }
    let kind = match r.read_u8()? {
        0 => FieldKind::Detector,
        1 => FieldKind::Emitter,
        k => return Err(FieldError::Parse(format!("invalid field kind {}", k))),
    };

    let mut dims = [0_usize; 3];
    for d in dims.iter_mut() {
        *d = r.read_u32::<LittleEndian>()? as usize;
    }
    let pitch = r.read_f32::<LittleEndian>()? as Float;
    let total_photons = r.read_u64::<LittleEndian>()?;
    let emitter_area = optional(r.read_f32::<LittleEndian>()?);
    let max_value = optional(r.read_f32::<LittleEndian>()?);

    let exhausted = |bytes| FieldError::ResourceExhaustion { dims, bytes };
    let len = dims
        .iter()
        .try_fold(1_usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| exhausted(usize::MAX))?;
    let mut raw: Vec<f32> = Vec::new();
    raw.try_reserve_exact(len)
        .map_err(|_| exhausted(len.saturating_mul(4)))?;
    raw.resize(len, 0.0);
    r.read_f32_into::<LittleEndian>(&mut raw)?;

    Ok(SimulationResult {
        kind,
        dims,
        pitch,
        volume: raw.into_iter().map(Float::from).collect(),
        total_photons,
        emitter_area,
        max_value,
        stats: WalkStats::default(),
    })
}

fn optional(v: f32) -> Option<Float> {
    if v.is_nan() {
        None
    } else {
        Some(v as Float)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
