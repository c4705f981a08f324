//! 二进制记录
//!
//! 所有记录均为大端 IEEE-754 单精度浮点数，无填充：
//! - `bounds`: (top, left, width, height)，16 字节
//! - `stacked_<name>`: (dx, dy, z)，12 字节

use crate::error::FileError;
use pcb3d_core::math::{Bounds, Offset3};

pub const BOUNDS_LEN: usize = 16;
pub const OFFSET_LEN: usize = 12;

fn encode_floats<const N: usize>(values: [f64; N]) -> Vec<u8> {
    values
        .iter()
        .flat_map(|v| (*v as f32).to_be_bytes())
        .collect()
}

fn decode_floats<const N: usize>(bytes: &[u8], record: &str) -> Result<[f64; N], FileError> {
    if bytes.len() != N * 4 {
        return Err(FileError::InvalidFormat(format!(
            "{} record must be {} bytes, got {}",
            record,
            N * 4,
            bytes.len()
        )));
    }

    let mut values = [0.0; N];
    for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(4)) {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(chunk);
        *value = f32::from_be_bytes(buf) as f64;
    }
    Ok(values)
}

pub fn encode_bounds(bounds: &Bounds) -> Vec<u8> {
    encode_floats(bounds.to_array())
}

pub fn decode_bounds(bytes: &[u8]) -> Result<Bounds, FileError> {
    decode_floats::<4>(bytes, "bounds").map(Bounds::from_array)
}

pub fn encode_offset(offset: &Offset3) -> Vec<u8> {
    encode_floats([offset.x, offset.y, offset.z])
}

pub fn decode_offset(bytes: &[u8]) -> Result<Offset3, FileError> {
    let [x, y, z] = decode_floats::<3>(bytes, "stacked")?;
    Ok(Offset3::new(x, y, z))
}
