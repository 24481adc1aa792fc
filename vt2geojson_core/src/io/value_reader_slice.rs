//! This module provides the `ValueReaderSlice` struct for reading values from a byte slice.
//!
//! # Examples
//!
//! ```rust
//! use vt2geojson_core::io::{ValueReader, ValueReaderSlice};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // a length-delimited message holding the varint 150
//!     let data = &[0x03, 0x08, 0x96, 0x01];
//!
//!     let mut reader = ValueReaderSlice::new_le(data);
//!     let mut message = reader.get_pbf_sub_reader()?;
//!     assert_eq!(message.offset(), 1);
//!     assert_eq!(message.read_pbf_key()?, (1, 0));
//!     assert_eq!(message.read_varint()?, 150);
//!
//!     Ok(())
//! }
//! ```

use super::{SeekRead, ValueReader};
use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::{io::Cursor, marker::PhantomData};

/// A struct that provides reading capabilities from a byte slice using a specified byte order.
pub struct ValueReaderSlice<'a, E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<&'a [u8]>,
	len: u64,
	offset: u64,
}

impl<'a, E: ByteOrder> ValueReaderSlice<'a, E> {
	/// Creates a new `ValueReaderSlice` whose first byte lies at `offset` in the decoded buffer.
	#[must_use]
	pub fn new_at(slice: &'a [u8], offset: u64) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice {
			_phantom: PhantomData,
			len: slice.len() as u64,
			cursor: Cursor::new(slice),
			offset,
		}
	}

	#[must_use]
	pub fn new(slice: &'a [u8]) -> ValueReaderSlice<'a, E> {
		ValueReaderSlice::new_at(slice, 0)
	}
}

impl<'a> ValueReaderSlice<'a, LittleEndian> {
	/// Creates a new `ValueReaderSlice` with little-endian byte order, as used by protobuf.
	#[must_use]
	pub fn new_le(slice: &'a [u8]) -> ValueReaderSlice<'a, LittleEndian> {
		ValueReaderSlice::new(slice)
	}
}

impl SeekRead for Cursor<&[u8]> {}

impl<'a, E: ByteOrder + 'a> ValueReader<'a, E> for ValueReaderSlice<'a, E> {
	fn get_reader(&mut self) -> &mut dyn SeekRead {
		&mut self.cursor
	}

	fn len(&self) -> u64 {
		self.len
	}

	fn position(&mut self) -> u64 {
		self.cursor.position()
	}

	fn offset(&self) -> u64 {
		self.offset
	}

	fn set_position(&mut self, position: u64) -> Result<()> {
		let len = self.len;
		if position > len {
			return Err(self.malformed(&format!("position {position} is outside of {len} bytes")));
		}
		self.cursor.set_position(position);
		Ok(())
	}

	fn get_sub_reader<'b>(&'b mut self, length: u64) -> Result<Box<dyn ValueReader<'b, E> + 'b>>
	where
		E: 'b,
	{
		self.ensure_remaining(length, "sub-message")?;

		let start = self.cursor.position();
		let end = start + length;
		let data: &'a [u8] = *self.cursor.get_ref();
		let slice = &data[usize::try_from(start)?..usize::try_from(end)?];
		self.cursor.set_position(end);

		Ok(Box::new(ValueReaderSlice::<'b, E>::new_at(slice, self.offset + start)))
	}
}
