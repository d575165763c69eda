//! Sequential primitive reader over a byte stream.

use std::io::{self, Read};
use std::marker::PhantomData;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use log::trace;

use crate::error::{DecodeError, Result};

/// Width in bytes of every primitive in the model layout.
pub const PRIMITIVE_SIZE: u64 = 4;

/// Cursor-tracking reader for 4-byte model primitives.
///
/// Every call consumes exactly the bytes it decodes and advances
/// [`position`](Self::position). The byte order is fixed at compile time by
/// `E` and defaults to little-endian, which is what XGBoost writes on all
/// common platforms.
///
/// # Example
///
/// ```
/// use boosters_regtree::io::ModelReader;
///
/// let bytes = 7i32.to_le_bytes();
/// let mut reader = ModelReader::new(&bytes[..]);
/// assert_eq!(reader.read_i32("value").unwrap(), 7);
/// assert_eq!(reader.position(), 4);
/// ```
#[derive(Debug)]
pub struct ModelReader<R, E = LittleEndian> {
    inner: R,
    position: u64,
    _order: PhantomData<E>,
}

impl<R: Read> ModelReader<R> {
    /// Wrap a reader using little-endian byte order.
    pub fn new(inner: R) -> Self {
        Self::with_byte_order(inner)
    }
}

impl<R: Read, E: ByteOrder> ModelReader<R, E> {
    /// Wrap a reader using the byte order `E`.
    pub fn with_byte_order(inner: R) -> Self {
        Self {
            inner,
            position: 0,
            _order: PhantomData,
        }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap the underlying reader, positioned after the last consumed byte.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read one signed 32-bit integer.
    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        let value = self
            .inner
            .read_i32::<E>()
            .map_err(|e| self.map_err(e, field))?;
        self.position += PRIMITIVE_SIZE;
        Ok(value)
    }

    /// Read one 32-bit IEEE-754 float.
    pub fn read_f32(&mut self, field: &'static str) -> Result<f32> {
        let value = self
            .inner
            .read_f32::<E>()
            .map_err(|e| self.map_err(e, field))?;
        self.position += PRIMITIVE_SIZE;
        Ok(value)
    }

    /// Read `len` consecutive signed 32-bit integers.
    ///
    /// On failure the reported offset is the start of the array.
    pub fn read_i32_array(&mut self, len: usize, field: &'static str) -> Result<Vec<i32>> {
        let mut values = vec![0i32; len];
        self.inner
            .read_i32_into::<E>(&mut values)
            .map_err(|e| self.map_err(e, field))?;
        self.position += PRIMITIVE_SIZE * len as u64;
        trace!("read {len} x i32 for {field}, now at offset {}", self.position);
        Ok(values)
    }

    fn map_err(&self, err: io::Error, field: &'static str) -> DecodeError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::ShortRead {
                field,
                offset: self.position,
            }
        } else {
            DecodeError::Io(err)
        }
    }
}
