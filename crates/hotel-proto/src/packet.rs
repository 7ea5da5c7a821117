//! Packet structure and body scalar codec.
//!
//! A [`Packet`] is a header id plus an opaque body. Body scalars are
//! big-endian: `i32`/`i16` integers, single-byte booleans, and strings as a
//! `u16` length prefix followed by UTF-8 bytes. Reads go through a
//! [`BodyReader`] cursor so multi-field payloads are consumed sequentially;
//! writes append to the body.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{ProtoError, Result};

/// A decoded packet: header id plus body bytes.
///
/// The header id identifies the packet type on the wire and survives any
/// body rewrite; [`Packet::set_body`] replaces the payload in place without
/// touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    header: u16,
    body: BytesMut,
}

impl Packet {
    /// Create an empty packet with the given header id.
    pub fn new(header: u16) -> Self {
        Self {
            header,
            body: BytesMut::new(),
        }
    }

    /// Create a packet over an existing body.
    pub fn with_body(header: u16, body: &[u8]) -> Self {
        Self {
            header,
            body: BytesMut::from(body),
        }
    }

    /// The packet-type header id.
    pub fn header(&self) -> u16 {
        self.header
    }

    /// The body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replace the body in place, keeping the header id.
    pub fn set_body(&mut self, body: &[u8]) {
        self.body.clear();
        self.body.extend_from_slice(body);
    }

    /// Sequential reader over the body, starting at the first field.
    pub fn reader(&self) -> BodyReader<'_> {
        BodyReader { buf: &self.body }
    }

    /// Append a big-endian `i32`.
    pub fn write_i32(&mut self, value: i32) {
        self.body.put_i32(value);
    }

    /// Append a big-endian `i16`.
    pub fn write_i16(&mut self, value: i16) {
        self.body.put_i16(value);
    }

    /// Append a single-byte boolean.
    pub fn write_bool(&mut self, value: bool) {
        self.body.put_u8(u8::from(value));
    }

    /// Append a length-prefixed UTF-8 string.
    ///
    /// Fails if the string's byte length does not fit the `u16` prefix.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let len =
            u16::try_from(value.len()).map_err(|_| ProtoError::StringTooLong(value.len()))?;
        self.body.put_u16(len);
        self.body.put_slice(value.as_bytes());
        Ok(())
    }
}

/// Sequential reader over a packet body.
///
/// Each read consumes the field it returns; a field that extends past the
/// end of the body yields [`ProtoError::UnexpectedEof`].
#[derive(Debug)]
pub struct BodyReader<'a> {
    buf: &'a [u8],
}

impl<'a> BodyReader<'a> {
    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.buf.len() < n {
            return Err(ProtoError::UnexpectedEof {
                wanted: n,
                remaining: self.buf.len(),
            });
        }
        let (head, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(head)
    }

    /// Read a big-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        let mut head = self.take(4)?;
        Ok(head.get_i32())
    }

    /// Read a big-endian `i16`.
    pub fn read_i16(&mut self) -> Result<i16> {
        let mut head = self.take(2)?;
        Ok(head.get_i16())
    }

    /// Read a single-byte boolean (any non-zero byte is true).
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.take(1)?[0] != 0)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let mut head = self.take(2)?;
        let len = head.get_u16() as usize;
        let bytes = self.take(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
