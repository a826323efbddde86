//! Binary parsing utils.
//!
//! This module should not be used directly, unless you're planning to parse
//! some tables manually.

use std::io::{self, Read, Seek, SeekFrom};
use std::vec::Vec;

use crate::{Error, Result};

/// A trait for parsing raw binary data of a fixed size.
///
/// This is a low-level, internal trait that should not be used directly.
pub trait FromData: Sized {
    /// Object's raw data size.
    ///
    /// Not always the same as `mem::size_of`.
    const SIZE: usize;

    /// Parses an object from a raw data.
    ///
    /// `data` is guaranteed to be exactly `SIZE` bytes long.
    fn parse(data: &[u8]) -> Self;
}

impl FromData for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        data[0]
    }
}

impl FromData for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        data[0] as i8
    }
}

impl FromData for u16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        u16::from_be_bytes([data[0], data[1]])
    }
}

impl FromData for i16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        i16::from_be_bytes([data[0], data[1]])
    }
}

impl FromData for u32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        u32::from_be_bytes([data[0], data[1], data[2], data[3]])
    }
}

impl FromData for i32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        i32::from_be_bytes([data[0], data[1], data[2], data[3]])
    }
}

impl FromData for u64 {
    const SIZE: usize = 8;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut bytes = [0; 8];
        bytes.copy_from_slice(&data[0..8]);
        u64::from_be_bytes(bytes)
    }
}


/// A 32-bit signed fixed-point number (16.16).
#[derive(Clone, Copy, Debug)]
pub struct Fixed(pub f32);

impl FromData for Fixed {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        Fixed(i32::parse(data) as f32 / 65536.0)
    }
}


/// A 16-bit signed fixed number with the low 14 bits of fraction (2.14).
#[derive(Clone, Copy, Debug)]
pub struct F2DOT14(pub i16);

impl F2DOT14 {
    /// Converts i16 to f32.
    #[inline]
    pub fn to_f32(&self) -> f32 {
        f32::from(self.0) / 16384.0
    }
}

impl FromData for F2DOT14 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        F2DOT14(i16::parse(data))
    }
}


/// A safe u32 to usize casting.
///
/// Rust doesn't implement `From<u32> for usize`,
/// because it has to support 16 bit targets.
/// We don't, so we can allow this.
pub trait NumFrom<T>: Sized {
    /// Converts u32 into usize.
    fn num_from(_: T) -> Self;
}

impl NumFrom<u32> for usize {
    #[inline]
    fn num_from(v: u32) -> Self {
        #[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
        {
            v as usize
        }

        // compilation error on 16 bit targets
    }
}


/// A "safe" stream over a record's bytes.
///
/// Unlike [`Stream`], `SafeStream` doesn't perform any I/O and doesn't check bounds
/// explicitly. It's used only inside `FromData::parse`, where the record size
/// is already guaranteed by `FromData::SIZE`.
#[derive(Clone, Copy)]
pub struct SafeStream<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SafeStream<'a> {
    /// Creates a new `SafeStream` from a record data.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        SafeStream { data, offset: 0 }
    }

    /// Parses the type from the record.
    #[inline]
    pub fn read<T: FromData>(&mut self) -> T {
        let start = self.offset;
        self.offset += T::SIZE;
        T::parse(&self.data[start..self.offset])
    }

    /// Skips the type in the record.
    #[inline]
    pub fn skip<T: FromData>(&mut self) {
        self.offset += T::SIZE;
    }
}


/// A type-safe offset.
pub trait Offset {
    /// Converts the offset to `usize`.
    fn to_usize(&self) -> usize;

    /// Checks that offset is null.
    fn is_null(&self) -> bool { self.to_usize() == 0 }
}


/// A type-safe u16 offset.
#[derive(Clone, Copy, Debug)]
pub struct Offset16(pub u16);

impl Offset for Offset16 {
    #[inline]
    fn to_usize(&self) -> usize {
        usize::from(self.0)
    }
}

impl FromData for Offset16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        Offset16(u16::parse(data))
    }
}

impl FromData for Option<Offset16> {
    const SIZE: usize = Offset16::SIZE;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let offset = Offset16::parse(data);
        if offset.0 != 0 { Some(offset) } else { None }
    }
}


/// A type-safe u32 offset.
#[derive(Clone, Copy, Debug)]
pub struct Offset32(pub u32);

impl Offset for Offset32 {
    #[inline]
    fn to_usize(&self) -> usize {
        usize::num_from(self.0)
    }
}

impl FromData for Offset32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        Offset32(u32::parse(data))
    }
}

impl FromData for Option<Offset32> {
    const SIZE: usize = Offset32::SIZE;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let offset = Offset32::parse(data);
        if offset.0 != 0 { Some(offset) } else { None }
    }
}


// Large enough for any record we parse through `Stream::read`.
const MAX_RECORD_SIZE: usize = 32;

#[inline]
fn map_io_error(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::TruncatedInput
    } else {
        Error::Io(e)
    }
}

/// A big-endian reader over a seekable byte stream.
///
/// All reads advance the cursor. All seeks are absolute,
/// starting from the beginning of the container.
#[derive(Debug)]
pub struct Stream<R> {
    inner: R,
}

impl<R: Read + Seek> Stream<R> {
    /// Creates a new `Stream`.
    ///
    /// The current position of `inner` is preserved.
    #[inline]
    pub fn new(inner: R) -> Self {
        Stream { inner }
    }

    /// Returns the underlying reader.
    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Returns the current absolute position.
    #[inline]
    pub fn offset(&mut self) -> Result<u64> {
        self.inner.stream_position().map_err(map_io_error)
    }

    /// Moves the cursor to an absolute position.
    #[inline]
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset)).map_err(map_io_error)?;
        Ok(())
    }

    /// Moves the cursor forward by `len` bytes.
    #[inline]
    pub fn advance(&mut self, len: usize) -> Result<()> {
        let len = i64::try_from(len).map_err(|_| Error::TruncatedInput)?;
        self.inner.seek(SeekFrom::Current(len)).map_err(map_io_error)?;
        Ok(())
    }

    /// Moves the cursor backward by `len` bytes.
    #[inline]
    pub fn rewind(&mut self, len: usize) -> Result<()> {
        let len = i64::try_from(len).map_err(|_| Error::TruncatedInput)?;
        self.inner.seek(SeekFrom::Current(-len)).map_err(map_io_error)?;
        Ok(())
    }

    /// Skips the type's size.
    #[inline]
    pub fn skip<T: FromData>(&mut self) -> Result<()> {
        self.advance(T::SIZE)
    }

    /// Reads a big-endian value.
    #[inline]
    pub fn read<T: FromData>(&mut self) -> Result<T> {
        if T::SIZE > MAX_RECORD_SIZE {
            let data = self.read_bytes(T::SIZE)?;
            return Ok(T::parse(&data));
        }

        let mut buf = [0u8; MAX_RECORD_SIZE];
        let buf = &mut buf[..T::SIZE];
        self.inner.read_exact(buf).map_err(map_io_error)?;
        Ok(T::parse(buf))
    }

    /// Reads a big-endian value at an absolute position.
    ///
    /// The cursor ends up right after the value.
    #[inline]
    pub fn read_at<T: FromData>(&mut self, offset: u64) -> Result<T> {
        self.seek(offset)?;
        self.read()
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        // Do not trust `len` with a preallocation, since it comes from the font.
        let mut data = Vec::new();
        (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut data)
            .map_err(map_io_error)?;

        if data.len() != len {
            return Err(Error::TruncatedInput);
        }

        Ok(data)
    }

    /// Reads `count` consecutive values.
    pub fn read_array<T: FromData>(&mut self, count: usize) -> Result<Vec<T>> {
        let len = count.checked_mul(T::SIZE).ok_or(Error::TruncatedInput)?;
        let data = self.read_bytes(len)?;
        Ok(data.chunks_exact(T::SIZE).map(T::parse).collect())
    }

    /// Reads a `u16` count followed by that many values.
    #[inline]
    pub fn read_array16<T: FromData>(&mut self) -> Result<Vec<T>> {
        let count = self.read::<u16>()?;
        self.read_array(usize::from(count))
    }

    /// Reads a `u32` count followed by that many values.
    #[inline]
    pub fn read_array32<T: FromData>(&mut self) -> Result<Vec<T>> {
        let count = self.read::<u32>()?;
        self.read_array(usize::num_from(count))
    }
}
