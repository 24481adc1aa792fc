//! This module defines the `ValueReader` trait for reading protobuf primitives from tile data.
//!
//! # Overview
//!
//! The `ValueReader` trait reads varints, zigzag varints, fixed-width floats, strings and
//! length-delimited sub-messages. Every reader knows its absolute offset within the decoded
//! buffer, so structural errors are reported as [`DecodeError::Malformed`] pointing at the
//! exact byte where decoding stopped, even from deeply nested sub-readers.
//!
//! # Examples
//!
//! ```rust
//! use vt2geojson_core::io::{ValueReader, ValueReaderSlice};
//!
//! let mut reader = ValueReaderSlice::new_le(&[0x08, 0xAC, 0x02]);
//! assert_eq!(reader.read_pbf_key()?, (1, 0));
//! assert_eq!(reader.read_varint()?, 300);
//! assert!(!reader.has_remaining());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::{Blob, DecodeError};
use anyhow::{Context, Result};
use byteorder::{ByteOrder, ReadBytesExt};
use std::io::{Read, Seek};

/// A simple alias for types implementing both `Seek` and `Read`, used for convenience.
pub trait SeekRead: Seek + Read {}

/// A trait for reading values from tile data with support for different byte orders.
pub trait ValueReader<'a, E: ByteOrder + 'a> {
	/// Returns the underlying reader to access raw bytes.
	fn get_reader(&mut self) -> &mut dyn SeekRead;

	/// Returns the total length of the readable data.
	fn len(&self) -> u64;

	/// Returns the current position, relative to the start of this reader.
	fn position(&mut self) -> u64;

	/// Returns the absolute offset of this reader's first byte within the decoded buffer.
	fn offset(&self) -> u64;

	/// Sets the current position, relative to the start of this reader.
	///
	/// # Errors
	/// Returns an error if `position` lies beyond the end of the data.
	fn set_position(&mut self, position: u64) -> Result<()>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn remaining(&mut self) -> u64 {
		self.len().saturating_sub(self.position())
	}

	fn has_remaining(&mut self) -> bool {
		self.remaining() > 0
	}

	/// Returns the current position within the decoded buffer.
	fn absolute_position(&mut self) -> u64 {
		self.offset() + self.position()
	}

	/// Creates a [`DecodeError::Malformed`] pointing at the current position.
	fn malformed(&mut self, message: &str) -> anyhow::Error {
		DecodeError::malformed(self.absolute_position(), message)
	}

	/// Fails with [`DecodeError::Malformed`] unless at least `length` bytes are left.
	fn ensure_remaining(&mut self, length: u64, what: &str) -> Result<()> {
		let remaining = self.remaining();
		if length > remaining {
			return Err(self.malformed(&format!(
				"{what} needs {length} bytes, but only {remaining} bytes are left"
			)));
		}
		Ok(())
	}

	/// Advances the position by `length` bytes.
	fn skip(&mut self, length: u64) -> Result<()> {
		self.ensure_remaining(length, "skipped field")?;
		let position = self.position();
		self.set_position(position + length)
	}

	/// Reads a variable-length unsigned integer (varint) from the data.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] if the data ends inside the varint or the varint
	/// is longer than ten bytes.
	fn read_varint(&mut self) -> Result<u64> {
		let start = self.absolute_position();
		let mut value = 0;
		let mut shift = 0;
		loop {
			if !self.has_remaining() {
				return Err(DecodeError::malformed(start, "truncated varint"));
			}
			let byte = self.get_reader().read_u8()?;
			value |= (u64::from(byte) & 0x7F) << shift;
			if byte & 0x80 == 0 {
				break;
			}
			shift += 7;
			if shift >= 70 {
				return Err(DecodeError::malformed(start, "varint too long"));
			}
		}
		Ok(value)
	}

	/// Reads a zigzag-encoded varint.
	#[allow(clippy::cast_possible_wrap)]
	fn read_svarint(&mut self) -> Result<i64> {
		let raw = self.read_varint()?;
		Ok(((raw >> 1) as i64) ^ -((raw & 1) as i64))
	}

	fn read_u8(&mut self) -> Result<u8> {
		self.ensure_remaining(1, "u8")?;
		Ok(self.get_reader().read_u8()?)
	}

	fn read_f32(&mut self) -> Result<f32> {
		self.ensure_remaining(4, "fixed32 value")?;
		Ok(self.get_reader().read_f32::<E>()?)
	}

	fn read_f64(&mut self) -> Result<f64> {
		self.ensure_remaining(8, "fixed64 value")?;
		Ok(self.get_reader().read_f64::<E>()?)
	}

	/// Reads a binary blob of the specified length.
	fn read_blob(&mut self, length: u64) -> Result<Blob> {
		self.ensure_remaining(length, "blob")?;
		let mut vec = vec![0u8; usize::try_from(length)?];
		self.get_reader().read_exact(&mut vec)?;
		Ok(Blob::from(vec))
	}

	/// Reads a UTF-8 encoded string of the specified length.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] if the data is too short or not valid UTF-8.
	fn read_string(&mut self, length: u64) -> Result<String> {
		let start = self.absolute_position();
		let blob = self.read_blob(length).context("Failed to read string")?;
		String::from_utf8(blob.into_vec())
			.map_err(|e| DecodeError::malformed(start + e.utf8_error().valid_up_to() as u64, "invalid UTF-8 in string"))
	}

	/// Reads a Protocol Buffers key consisting of a field number and wire type.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] for truncated keys and field numbers that are
	/// zero or do not fit into 32 bits.
	fn read_pbf_key(&mut self) -> Result<(u32, u8)> {
		let start = self.absolute_position();
		let value = self.read_varint().context("Failed to read varint for PBF key")?;
		let field_number = u32::try_from(value >> 3)
			.ok()
			.filter(|f| *f > 0)
			.ok_or_else(|| DecodeError::malformed(start, format!("invalid field number {}", value >> 3)))?;
		#[allow(clippy::cast_possible_truncation)]
		Ok((field_number, (value & 0x07) as u8))
	}

	/// Skips the payload of a field with the given wire type.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] for wire types that cannot be skipped (groups and
	/// the reserved types 6 and 7) or if the payload is truncated.
	fn skip_pbf_field(&mut self, wire_type: u8) -> Result<()> {
		match wire_type {
			0 => self.read_varint().map(|_| ()),
			1 => self.skip(8),
			2 => {
				let length = self.read_varint().context("Failed to read varint for field length")?;
				self.skip(length)
			}
			5 => self.skip(4),
			w => Err(self.malformed(&format!("unsupported wire type {w}"))),
		}
	}

	/// Returns a sub-reader limited to the given length and advances past it.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] if `length` exceeds the remaining data.
	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b;

	/// Returns a sub-reader for a Protocol Buffers embedded message.
	///
	/// Reads the length as a varint, then returns a sub-reader limited to that length.
	fn get_pbf_sub_reader<'b>(&'b mut self) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b,
	{
		let length = self
			.read_varint()
			.context("Failed to read varint for sub-reader length")?;
		self.get_sub_reader(length).context("Failed to get sub-reader")
	}

	/// Reads a packed repeated field of unsigned 32-bit integers.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] if the payload is truncated or an element does
	/// not fit into 32 bits.
	fn read_pbf_packed_uint32(&mut self) -> Result<Vec<u32>> {
		let mut reader = self
			.get_pbf_sub_reader()
			.context("Failed to get PBF sub-reader for packed uint32")?;
		let mut values = Vec::new();
		while reader.has_remaining() {
			let start = reader.absolute_position();
			let value = reader
				.read_varint()
				.context("Failed to read varint for packed uint32")?;
			values.push(
				u32::try_from(value).map_err(|_| DecodeError::malformed(start, format!("value {value} exceeds uint32")))?,
			);
		}
		drop(reader);
		Ok(values)
	}

	fn read_pbf_string(&mut self) -> Result<String> {
		let length = self.read_varint().context("Failed to read varint for string length")?;
		self.read_string(length).context("Failed to read PBF string")
	}
}
