//! Byte codec for the Hathor wire format.
//!
//! Provides fixed-width big-endian integer encoding helpers, the
//! `ByteReader`/`ByteWriter` cursor types used by transaction
//! serialization, and the dual-width output value encoding.
//!
//! All multi-byte integers on the Hathor wire are big-endian.

use crate::PrimitivesError;

/// Largest output value that still fits the 4-byte encoding.
const MAX_OUTPUT_VALUE_32: i64 = i32::MAX as i64;

// ---------------------------------------------------------------------------
// Fixed-width integer encoding
// ---------------------------------------------------------------------------

/// Encode an unsigned integer as exactly `width` big-endian bytes.
///
/// Supported widths are 1, 2, and 4 bytes.
///
/// # Arguments
/// * `value` - The non-negative value to encode.
/// * `width` - Target width in bytes.
///
/// # Returns
/// The encoded bytes, or an error if the value does not fit or the width
/// is unsupported.
pub fn int_to_bytes(value: u64, width: usize) -> Result<Vec<u8>, PrimitivesError> {
    let max = match width {
        1 => u8::MAX as u64,
        2 => u16::MAX as u64,
        4 => u32::MAX as u64,
        _ => return Err(PrimitivesError::InvalidWidth(width)),
    };
    if value > max {
        return Err(PrimitivesError::ValueOutOfRange {
            value: value as i128,
            width,
        });
    }
    Ok(value.to_be_bytes()[8 - width..].to_vec())
}

/// Encode a signed integer as exactly `width` big-endian two's-complement bytes.
///
/// Supported widths are 1, 2, and 4 bytes.
///
/// # Arguments
/// * `value` - The value to encode.
/// * `width` - Target width in bytes.
///
/// # Returns
/// The encoded bytes, or an error if the value does not fit or the width
/// is unsupported.
pub fn signed_int_to_bytes(value: i64, width: usize) -> Result<Vec<u8>, PrimitivesError> {
    let fits = match width {
        1 => i8::try_from(value).is_ok(),
        2 => i16::try_from(value).is_ok(),
        4 => i32::try_from(value).is_ok(),
        _ => return Err(PrimitivesError::InvalidWidth(width)),
    };
    if !fits {
        return Err(PrimitivesError::ValueOutOfRange {
            value: value as i128,
            width,
        });
    }
    Ok(value.to_be_bytes()[8 - width..].to_vec())
}

/// Encode a 64-bit-range signed integer as 4 or 8 big-endian bytes.
///
/// Used for token values, which occupy the full signed 64-bit range on
/// the wire.
///
/// # Arguments
/// * `value` - The value to encode.
/// * `width` - Target width in bytes; must be 4 or 8.
///
/// # Returns
/// The encoded bytes, or an error if the value does not fit or the width
/// is unsupported.
pub fn bigint_to_bytes(value: i64, width: usize) -> Result<Vec<u8>, PrimitivesError> {
    match width {
        4 => signed_int_to_bytes(value, 4),
        8 => Ok(value.to_be_bytes().to_vec()),
        _ => Err(PrimitivesError::InvalidWidth(width)),
    }
}

/// Encode an IEEE-754 double as 8 big-endian bytes.
///
/// Used for the transaction `weight` field.
///
/// # Arguments
/// * `value` - The float to encode.
///
/// # Returns
/// The 8 encoded bytes.
pub fn float_to_bytes(value: f64) -> [u8; 8] {
    value.to_be_bytes()
}

// ---------------------------------------------------------------------------
// Output value codec
// ---------------------------------------------------------------------------

/// Encode an output value using the dual-width Hathor encoding.
///
/// Values up to `i32::MAX` are written as 4 signed big-endian bytes.
/// Larger values are written as 8 signed big-endian bytes of the *negated*
/// value, so the sign bit of the leading 4-byte view doubles as the width
/// discriminator: a negative first word means 8 bytes follow.
///
/// This encoding is a protocol invariant; it must not be replaced by a
/// length-prefixed scheme.
///
/// # Arguments
/// * `value` - The output value; must be strictly positive.
///
/// # Returns
/// 4 or 8 encoded bytes, or `InvalidOutputValue` if `value <= 0`.
pub fn output_value_to_bytes(value: i64) -> Result<Vec<u8>, PrimitivesError> {
    if value <= 0 {
        return Err(PrimitivesError::InvalidOutputValue(value));
    }
    if value > MAX_OUTPUT_VALUE_32 {
        Ok((-value).to_be_bytes().to_vec())
    } else {
        Ok((value as i32).to_be_bytes().to_vec())
    }
}

/// Decode an output value from the front of a buffer.
///
/// Mirrors [`output_value_to_bytes`]: peeks the first 4 bytes as a signed
/// big-endian word; if negative, reads 8 bytes and negates, otherwise the
/// 4-byte value is taken directly.
///
/// # Arguments
/// * `data` - Buffer starting with an encoded output value.
///
/// # Returns
/// The decoded value and the remaining tail of the buffer.
pub fn bytes_to_output_value(data: &[u8]) -> Result<(i64, &[u8]), PrimitivesError> {
    if data.len() < 4 {
        return Err(PrimitivesError::UnexpectedEof);
    }
    let head = i32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    if head < 0 {
        if data.len() < 8 {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let raw = i64::from_be_bytes([
            data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
        ]);
        // raw is the negated value; i64::MIN has no positive counterpart
        let value = raw
            .checked_neg()
            .ok_or(PrimitivesError::InvalidOutputValue(raw))?;
        Ok((value, &data[8..]))
    } else {
        Ok((head as i64, &data[4..]))
    }
}

// ---------------------------------------------------------------------------
// ByteReader
// ---------------------------------------------------------------------------

/// A cursor-based reader for Hathor wire-format binary data.
///
/// Wraps a byte slice and maintains a read position, providing methods to
/// read fixed-size big-endian integers, floats, and raw byte runs.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new reader over the given byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from.
    ///
    /// # Returns
    /// A `ByteReader` positioned at the start of the data.
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// A byte slice of length `n`, or an error if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if self.pos + n > self.data.len() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a single byte and advance the position.
    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Read a big-endian u16 and advance the position by 2 bytes.
    pub fn read_u16_be(&mut self) -> Result<u16, PrimitivesError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian u32 and advance the position by 4 bytes.
    pub fn read_u32_be(&mut self) -> Result<u32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a big-endian i32 and advance the position by 4 bytes.
    pub fn read_i32_be(&mut self) -> Result<i32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a big-endian u64 and advance the position by 8 bytes.
    pub fn read_u64_be(&mut self) -> Result<u64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a big-endian i64 and advance the position by 8 bytes.
    pub fn read_i64_be(&mut self) -> Result<i64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        Ok(i64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a big-endian IEEE-754 double and advance the position by 8 bytes.
    pub fn read_f64_be(&mut self) -> Result<f64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        Ok(f64::from_be_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read `n` bytes and return them as a lowercase hex string.
    ///
    /// # Arguments
    /// * `n` - Number of bytes to read.
    ///
    /// # Returns
    /// The hex encoding of the bytes read.
    pub fn read_hex(&mut self, n: usize) -> Result<String, PrimitivesError> {
        let bytes = self.read_bytes(n)?;
        Ok(hex::encode(bytes))
    }

    /// Read a dual-width output value from the current position.
    ///
    /// See [`bytes_to_output_value`] for the encoding.
    pub fn read_output_value(&mut self) -> Result<i64, PrimitivesError> {
        let (value, rest) = bytes_to_output_value(&self.data[self.pos..])?;
        self.pos = self.data.len() - rest.len();
        Ok(value)
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for Hathor wire-format binary data.
///
/// Wraps a `Vec<u8>` and provides methods to append fixed-size big-endian
/// integers, floats, and raw bytes.
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create a new empty writer.
    pub fn new() -> Self {
        ByteWriter { buf: Vec::new() }
    }

    /// Create a new writer with a pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial byte capacity of the internal buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a single byte to the buffer.
    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a big-endian u16 (2 bytes) to the buffer.
    pub fn write_u16_be(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a big-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_be(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a big-endian i32 (4 bytes) to the buffer.
    pub fn write_i32_be(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a big-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_be(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a big-endian i64 (8 bytes) to the buffer.
    pub fn write_i64_be(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a big-endian IEEE-754 double (8 bytes) to the buffer.
    pub fn write_f64_be(&mut self, val: f64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Append a dual-width output value to the buffer.
    ///
    /// See [`output_value_to_bytes`] for the encoding.
    ///
    /// # Arguments
    /// * `value` - The output value; must be strictly positive.
    pub fn write_output_value(&mut self, value: i64) -> Result<(), PrimitivesError> {
        let bytes = output_value_to_bytes(value)?;
        self.buf.extend_from_slice(&bytes);
        Ok(())
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Return a reference to the current buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Return the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}
