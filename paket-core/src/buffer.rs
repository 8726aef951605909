// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Byte-level cursor abstraction used by every codec.
//!
//! [`DataVisitor`] is the contract: fixed-width reads and writes with
//! independent reader and writer positions over some growable byte store.
//! Multi-byte values use network byte order. [`VecVisitor`] is the in-memory
//! implementation over `Vec<u8>`; any transport buffer implementing the trait
//! can back the engine without changes to codec code.
//!
//! Reads are bounded by the writer position, never by the underlying
//! allocation: reading past what has been written is a buffer underflow
//! error. [`ReadOnly`] and [`WriteOnly`] are zero-copy views that fail the
//! disallowed half of the contract with an unsupported-operation error.

use crate::error::Error;

/// Cursor over a growable byte buffer with independent read/write positions.
///
/// All multi-byte encodings are big-endian. Implementations must not read
/// past the writer position; the readable region is
/// `reader_index..writer_index`.
pub trait DataVisitor: Send {
    fn reader_index(&self) -> usize;

    fn set_reader_index(&mut self, index: usize) -> Result<(), Error>;

    fn writer_index(&self) -> usize;

    fn set_writer_index(&mut self, index: usize) -> Result<(), Error>;

    fn write_u8(&mut self, value: u8) -> Result<(), Error>;

    fn read_u8(&mut self) -> Result<u8, Error>;

    fn write_u16(&mut self, value: u16) -> Result<(), Error>;

    fn read_u16(&mut self) -> Result<u16, Error>;

    fn write_u32(&mut self, value: u32) -> Result<(), Error>;

    fn read_u32(&mut self) -> Result<u32, Error>;

    fn write_u64(&mut self, value: u64) -> Result<(), Error>;

    fn read_u64(&mut self) -> Result<u64, Error>;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error>;

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, Error>;

    #[inline(always)]
    fn write_bool(&mut self, value: bool) -> Result<(), Error> {
        self.write_u8(u8::from(value))
    }

    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_u8()? != 0)
    }

    #[inline(always)]
    fn write_i8(&mut self, value: i8) -> Result<(), Error> {
        self.write_u8(value as u8)
    }

    #[inline(always)]
    fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    #[inline(always)]
    fn write_i16(&mut self, value: i16) -> Result<(), Error> {
        self.write_u16(value as u16)
    }

    #[inline(always)]
    fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(self.read_u16()? as i16)
    }

    #[inline(always)]
    fn write_i32(&mut self, value: i32) -> Result<(), Error> {
        self.write_u32(value as u32)
    }

    #[inline(always)]
    fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(self.read_u32()? as i32)
    }

    #[inline(always)]
    fn write_i64(&mut self, value: i64) -> Result<(), Error> {
        self.write_u64(value as u64)
    }

    #[inline(always)]
    fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(self.read_u64()? as i64)
    }

    #[inline(always)]
    fn write_f32(&mut self, value: f32) -> Result<(), Error> {
        self.write_u32(value.to_bits())
    }

    #[inline(always)]
    fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    #[inline(always)]
    fn write_f64(&mut self, value: f64) -> Result<(), Error> {
        self.write_u64(value.to_bits())
    }

    #[inline(always)]
    fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Writes a single UTF-16 code unit.
    #[inline(always)]
    fn write_utf16(&mut self, value: u16) -> Result<(), Error> {
        self.write_u16(value)
    }

    /// Reads a single UTF-16 code unit.
    #[inline(always)]
    fn read_utf16(&mut self) -> Result<u16, Error> {
        self.read_u16()
    }

    /// Returns every byte written so far, from position 0 up to the writer
    /// index. The reader index is restored afterwards.
    fn bytes(&mut self) -> Result<Vec<u8>, Error> {
        let saved = self.reader_index();
        self.set_reader_index(0)?;
        let result = self.read_bytes(self.writer_index());
        self.set_reader_index(saved)?;
        result
    }

    /// Reads the unread remainder, advancing the reader to the writer index.
    fn finish(&mut self) -> Result<Vec<u8>, Error> {
        let remaining = self.writer_index().saturating_sub(self.reader_index());
        self.read_bytes(remaining)
    }

    /// Bulk-copies `len` bytes from `source`, advancing its reader index.
    fn write_from(&mut self, source: &mut dyn DataVisitor, len: usize) -> Result<(), Error> {
        let bytes = source.read_bytes(len)?;
        self.write_bytes(&bytes)
    }

    /// Bulk-copies everything `source` has left to read.
    fn write_remaining_from(&mut self, source: &mut dyn DataVisitor) -> Result<(), Error> {
        let bytes = source.finish()?;
        self.write_bytes(&bytes)
    }
}

/// Growable in-memory cursor over a `Vec<u8>`.
///
/// Writes land at the writer index, growing the buffer on demand, so a
/// caller may rewind the writer and overwrite earlier bytes. Reads are
/// checked against the writer index.
#[derive(Default)]
pub struct VecVisitor {
    buf: Vec<u8>,
    reader: usize,
    writer: usize,
}

impl VecVisitor {
    pub fn new() -> VecVisitor {
        VecVisitor::default()
    }

    pub fn with_capacity(capacity: usize) -> VecVisitor {
        VecVisitor {
            buf: Vec::with_capacity(capacity),
            reader: 0,
            writer: 0,
        }
    }

    /// Wraps already-encoded bytes; the writer index starts at the end so
    /// the whole content is readable.
    pub fn from_vec(buf: Vec<u8>) -> VecVisitor {
        let writer = buf.len();
        VecVisitor {
            buf,
            reader: 0,
            writer,
        }
    }

    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.writer);
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.writer]
    }

    #[inline(always)]
    fn check_readable(&self, n: usize) -> Result<(), Error> {
        if self.reader + n > self.writer {
            return Err(Error::buffer_underflow(self.reader, n, self.writer));
        }
        Ok(())
    }

    #[inline(always)]
    fn put_slice(&mut self, bytes: &[u8]) {
        let end = self.writer + bytes.len();
        if self.buf.len() < end {
            self.buf.resize(end, 0);
        }
        self.buf[self.writer..end].copy_from_slice(bytes);
        self.writer = end;
    }
}

impl DataVisitor for VecVisitor {
    #[inline(always)]
    fn reader_index(&self) -> usize {
        self.reader
    }

    #[inline(always)]
    fn set_reader_index(&mut self, index: usize) -> Result<(), Error> {
        self.reader = index;
        Ok(())
    }

    #[inline(always)]
    fn writer_index(&self) -> usize {
        self.writer
    }

    #[inline(always)]
    fn set_writer_index(&mut self, index: usize) -> Result<(), Error> {
        if self.buf.len() < index {
            self.buf.resize(index, 0);
        }
        self.writer = index;
        Ok(())
    }

    #[inline(always)]
    fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        self.put_slice(&[value]);
        Ok(())
    }

    #[inline(always)]
    fn read_u8(&mut self) -> Result<u8, Error> {
        self.check_readable(1)?;
        let value = self.buf[self.reader];
        self.reader += 1;
        Ok(value)
    }

    #[inline(always)]
    fn write_u16(&mut self, value: u16) -> Result<(), Error> {
        self.put_slice(&value.to_be_bytes());
        Ok(())
    }

    #[inline(always)]
    fn read_u16(&mut self) -> Result<u16, Error> {
        self.check_readable(2)?;
        let value = u16::from_be_bytes(self.buf[self.reader..self.reader + 2].try_into().unwrap());
        self.reader += 2;
        Ok(value)
    }

    #[inline(always)]
    fn write_u32(&mut self, value: u32) -> Result<(), Error> {
        self.put_slice(&value.to_be_bytes());
        Ok(())
    }

    #[inline(always)]
    fn read_u32(&mut self) -> Result<u32, Error> {
        self.check_readable(4)?;
        let value = u32::from_be_bytes(self.buf[self.reader..self.reader + 4].try_into().unwrap());
        self.reader += 4;
        Ok(value)
    }

    #[inline(always)]
    fn write_u64(&mut self, value: u64) -> Result<(), Error> {
        self.put_slice(&value.to_be_bytes());
        Ok(())
    }

    #[inline(always)]
    fn read_u64(&mut self) -> Result<u64, Error> {
        self.check_readable(8)?;
        let value = u64::from_be_bytes(self.buf[self.reader..self.reader + 8].try_into().unwrap());
        self.reader += 8;
        Ok(value)
    }

    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.put_slice(bytes);
        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        self.check_readable(len)?;
        let bytes = self.buf[self.reader..self.reader + len].to_vec();
        self.reader += len;
        Ok(bytes)
    }
}

/// Read-only view over another visitor; every write fails.
pub struct ReadOnly<'a> {
    inner: &'a mut dyn DataVisitor,
}

impl<'a> ReadOnly<'a> {
    pub fn new(inner: &'a mut dyn DataVisitor) -> ReadOnly<'a> {
        ReadOnly { inner }
    }

    fn rejected<T>() -> Result<T, Error> {
        Err(Error::unsupported("cannot write to a read-only visitor"))
    }
}

impl DataVisitor for ReadOnly<'_> {
    fn reader_index(&self) -> usize {
        self.inner.reader_index()
    }

    fn set_reader_index(&mut self, index: usize) -> Result<(), Error> {
        self.inner.set_reader_index(index)
    }

    fn writer_index(&self) -> usize {
        self.inner.writer_index()
    }

    fn set_writer_index(&mut self, _index: usize) -> Result<(), Error> {
        Self::rejected()
    }

    fn write_u8(&mut self, _value: u8) -> Result<(), Error> {
        Self::rejected()
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        self.inner.read_u8()
    }

    fn write_u16(&mut self, _value: u16) -> Result<(), Error> {
        Self::rejected()
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        self.inner.read_u16()
    }

    fn write_u32(&mut self, _value: u32) -> Result<(), Error> {
        Self::rejected()
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        self.inner.read_u32()
    }

    fn write_u64(&mut self, _value: u64) -> Result<(), Error> {
        Self::rejected()
    }

    fn read_u64(&mut self) -> Result<u64, Error> {
        self.inner.read_u64()
    }

    fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), Error> {
        Self::rejected()
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, Error> {
        self.inner.read_bytes(len)
    }
}

/// Write-only view over another visitor; every read fails.
pub struct WriteOnly<'a> {
    inner: &'a mut dyn DataVisitor,
}

impl<'a> WriteOnly<'a> {
    pub fn new(inner: &'a mut dyn DataVisitor) -> WriteOnly<'a> {
        WriteOnly { inner }
    }

    fn rejected<T>() -> Result<T, Error> {
        Err(Error::unsupported("cannot read from a write-only visitor"))
    }
}

impl DataVisitor for WriteOnly<'_> {
    fn reader_index(&self) -> usize {
        self.inner.reader_index()
    }

    fn set_reader_index(&mut self, _index: usize) -> Result<(), Error> {
        Self::rejected()
    }

    fn writer_index(&self) -> usize {
        self.inner.writer_index()
    }

    fn set_writer_index(&mut self, index: usize) -> Result<(), Error> {
        self.inner.set_writer_index(index)
    }

    fn write_u8(&mut self, value: u8) -> Result<(), Error> {
        self.inner.write_u8(value)
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        Self::rejected()
    }

    fn write_u16(&mut self, value: u16) -> Result<(), Error> {
        self.inner.write_u16(value)
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        Self::rejected()
    }

    fn write_u32(&mut self, value: u32) -> Result<(), Error> {
        self.inner.write_u32(value)
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        Self::rejected()
    }

    fn write_u64(&mut self, value: u64) -> Result<(), Error> {
        self.inner.write_u64(value)
    }

    fn read_u64(&mut self) -> Result<u64, Error> {
        Self::rejected()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.inner.write_bytes(bytes)
    }

    fn read_bytes(&mut self, _len: usize) -> Result<Vec<u8>, Error> {
        Self::rejected()
    }
}
