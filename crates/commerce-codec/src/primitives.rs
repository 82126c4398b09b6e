//! Primitive field codecs.
//!
//! Every wire primitive comes as a `write_*` / `read_*` pair. Writers
//! append to an output buffer; readers take `(data, offset)` and return
//! `(value, bytes_consumed)` so composite decoding can advance a cursor.
//! The byte-level rules:
//!
//! ```text
//! u8/u16/u32/u64   little-endian, fixed width
//! bool             1 byte; writers emit 0 or 1, readers accept any
//!                  nonzero byte as true
//! address          32 raw bytes
//! bytes / string   u32 LE length prefix (count of bytes), then payload;
//!                  strings are UTF-8, decoded with replacement on
//!                  invalid sequences
//! ```
//!
//! Option and enum tag bytes are composite concerns and live in
//! [`crate::engine`].

use crate::address::Address;
use crate::error::CodecError;

/// Check that `count` bytes are available at `offset`.
fn ensure(data: &[u8], offset: usize, count: usize) -> Result<(), CodecError> {
    let remaining = data.len().saturating_sub(offset);
    if remaining < count {
        return Err(CodecError::InvalidLength {
            expected: count,
            actual: remaining,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Fixed-width integers
// ---------------------------------------------------------------------------

pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

pub fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn read_u8(data: &[u8], offset: usize) -> Result<(u8, usize), CodecError> {
    ensure(data, offset, 1)?;
    Ok((data[offset], 1))
}

pub fn read_u16(data: &[u8], offset: usize) -> Result<(u16, usize), CodecError> {
    ensure(data, offset, 2)?;
    let bytes: [u8; 2] = data[offset..offset + 2].try_into().unwrap();
    Ok((u16::from_le_bytes(bytes), 2))
}

pub fn read_u32(data: &[u8], offset: usize) -> Result<(u32, usize), CodecError> {
    ensure(data, offset, 4)?;
    let bytes: [u8; 4] = data[offset..offset + 4].try_into().unwrap();
    Ok((u32::from_le_bytes(bytes), 4))
}

pub fn read_u64(data: &[u8], offset: usize) -> Result<(u64, usize), CodecError> {
    ensure(data, offset, 8)?;
    let bytes: [u8; 8] = data[offset..offset + 8].try_into().unwrap();
    Ok((u64::from_le_bytes(bytes), 8))
}

// ---------------------------------------------------------------------------
// Bool
// ---------------------------------------------------------------------------

pub fn write_bool(out: &mut Vec<u8>, value: bool) {
    out.push(u8::from(value));
}

/// Any nonzero byte decodes as `true`; only writers are restricted to 0/1.
pub fn read_bool(data: &[u8], offset: usize) -> Result<(bool, usize), CodecError> {
    let (byte, consumed) = read_u8(data, offset)?;
    Ok((byte != 0, consumed))
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

pub fn write_address(out: &mut Vec<u8>, value: &Address) {
    out.extend_from_slice(value.as_bytes());
}

pub fn read_address(data: &[u8], offset: usize) -> Result<(Address, usize), CodecError> {
    ensure(data, offset, Address::LEN)?;
    let bytes: [u8; 32] = data[offset..offset + Address::LEN].try_into().unwrap();
    Ok((Address::new(bytes), Address::LEN))
}

// ---------------------------------------------------------------------------
// Length-prefixed bytes and strings
// ---------------------------------------------------------------------------

pub fn write_bytes(out: &mut Vec<u8>, value: &[u8]) {
    write_u32(out, value.len() as u32);
    out.extend_from_slice(value);
}

pub fn read_bytes(data: &[u8], offset: usize) -> Result<(Vec<u8>, usize), CodecError> {
    let (len, prefix) = read_u32(data, offset)?;
    let len = len as usize;
    ensure(data, offset + prefix, len)?;
    let start = offset + prefix;
    Ok((data[start..start + len].to_vec(), prefix + len))
}

pub fn write_str(out: &mut Vec<u8>, value: &str) {
    write_bytes(out, value.as_bytes());
}

pub fn read_str(data: &[u8], offset: usize) -> Result<(String, usize), CodecError> {
    let (bytes, consumed) = read_bytes(data, offset)?;
    Ok((String::from_utf8_lossy(&bytes).into_owned(), consumed))
}
