use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ParcelError;

// -----------------------------------------------------------------------------
// Parcel

/// A sequential, position-tracked byte buffer with typed accessors.
///
/// `Parcel` is the transport the wire codec writes through: little-endian
/// 32- and 64-bit slots, booleans as one 32-bit word, and length-prefixed
/// UTF-8 strings. Writes append at the end; reads consume from the front
/// and fail with [`ParcelError::Truncated`] instead of running past the
/// data.
///
/// # Example
///
/// ```
/// use replica_parcel::Parcel;
///
/// let mut parcel = Parcel::new();
/// parcel.write_string("hello").unwrap();
/// parcel.write_i32(7);
/// let bytes = parcel.marshall();
///
/// let mut parcel = Parcel::unmarshall(&bytes);
/// assert_eq!(parcel.read_string().unwrap(), "hello");
/// assert_eq!(parcel.read_i32().unwrap(), 7);
/// ```
#[derive(Default)]
pub struct Parcel {
    data: BytesMut,
    read_at: usize,
}

impl Parcel {
    /// Creates an empty parcel positioned for writing.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously marshalled bytes, positioned at the start for
    /// reading.
    pub fn unmarshall(bytes: &[u8]) -> Self {
        Self {
            data: BytesMut::from(bytes),
            read_at: 0,
        }
    }

    /// Freezes the written content into a byte sequence.
    #[inline]
    pub fn marshall(self) -> Bytes {
        self.data.freeze()
    }

    /// The number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.read_at)
    }

    // -- writes --------------------------------------------------------------

    /// Appends one 32-bit slot.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.data.put_i32_le(value);
    }

    /// Appends one 64-bit slot.
    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.data.put_i64_le(value);
    }

    /// Appends a 32-bit float at native width.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.data.put_f32_le(value);
    }

    /// Appends a 64-bit float at native width.
    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.data.put_f64_le(value);
    }

    /// Appends a boolean as one 32-bit word.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_i32(if value { 1 } else { 0 });
    }

    /// Appends a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> Result<(), ParcelError> {
        let len = u32::try_from(value.len())
            .map_err(|_| ParcelError::Oversized { len: value.len() })?;
        self.data.put_u32_le(len);
        self.data.put_slice(value.as_bytes());
        Ok(())
    }

    // -- reads ---------------------------------------------------------------

    fn take_bytes(&mut self, needed: usize) -> Result<&[u8], ParcelError> {
        if self.remaining() < needed {
            return Err(ParcelError::Truncated {
                needed,
                remaining: self.remaining(),
            });
        }
        let start = self.read_at;
        self.read_at += needed;
        Ok(&self.data[start..self.read_at])
    }

    /// Consumes one 32-bit slot.
    pub fn read_i32(&mut self) -> Result<i32, ParcelError> {
        self.take_bytes(4).map(|mut bytes| bytes.get_i32_le())
    }

    /// Consumes one 64-bit slot.
    pub fn read_i64(&mut self) -> Result<i64, ParcelError> {
        self.take_bytes(8).map(|mut bytes| bytes.get_i64_le())
    }

    /// Consumes a 32-bit float.
    pub fn read_f32(&mut self) -> Result<f32, ParcelError> {
        self.take_bytes(4).map(|mut bytes| bytes.get_f32_le())
    }

    /// Consumes a 64-bit float.
    pub fn read_f64(&mut self) -> Result<f64, ParcelError> {
        self.take_bytes(8).map(|mut bytes| bytes.get_f64_le())
    }

    /// Consumes a boolean written as one 32-bit word.
    pub fn read_bool(&mut self) -> Result<bool, ParcelError> {
        Ok(self.read_i32()? == 1)
    }

    /// Consumes a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, ParcelError> {
        let len = self.take_bytes(4).map(|mut bytes| bytes.get_u32_le())? as usize;
        let bytes = self.take_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| ParcelError::BadString)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Parcel;
    use crate::error::ParcelError;

    #[test]
    fn typed_slots_round_trip() {
        let mut parcel = Parcel::new();
        parcel.write_i32(-5);
        parcel.write_i64(1 << 40);
        parcel.write_f32(1.5);
        parcel.write_f64(-2.25);
        parcel.write_bool(true);
        parcel.write_string("héllo").unwrap();

        let bytes = parcel.marshall();
        let mut parcel = Parcel::unmarshall(&bytes);

        assert_eq!(parcel.read_i32().unwrap(), -5);
        assert_eq!(parcel.read_i64().unwrap(), 1 << 40);
        assert_eq!(parcel.read_f32().unwrap(), 1.5);
        assert_eq!(parcel.read_f64().unwrap(), -2.25);
        assert!(parcel.read_bool().unwrap());
        assert_eq!(parcel.read_string().unwrap(), "héllo");
        assert_eq!(parcel.remaining(), 0);
    }

    #[test]
    fn short_reads_are_truncation_errors() {
        let mut parcel = Parcel::new();
        parcel.write_i32(1);
        let bytes = parcel.marshall();

        let mut parcel = Parcel::unmarshall(&bytes);
        assert!(parcel.read_i64().is_err());
    }

    #[test]
    fn string_reads_validate_utf8() {
        let mut parcel = Parcel::new();
        parcel.write_i32(2);
        parcel.write_i32(i32::from_le_bytes(*b"\xff\xfe\x00\x00"));
        let bytes = parcel.marshall();

        let mut parcel = Parcel::unmarshall(&bytes);
        assert!(matches!(
            parcel.read_string(),
            Err(ParcelError::BadString)
        ));
    }
}
