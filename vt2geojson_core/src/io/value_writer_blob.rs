//! This module provides the `ValueWriterBlob` struct, an in-memory protobuf writer used to craft
//! tile fixtures in tests.

use crate::Blob;
use anyhow::{Context, Result};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::{
	io::{Cursor, Write},
	marker::PhantomData,
};

/// Writes values to an in-memory blob using a specified byte order.
pub struct ValueWriterBlob<E: ByteOrder> {
	_phantom: PhantomData<E>,
	cursor: Cursor<Vec<u8>>,
}

impl<E: ByteOrder> Default for ValueWriterBlob<E> {
	fn default() -> Self {
		ValueWriterBlob {
			_phantom: PhantomData,
			cursor: Cursor::new(Vec::new()),
		}
	}
}

impl ValueWriterBlob<LittleEndian> {
	#[must_use]
	pub fn new_le() -> ValueWriterBlob<LittleEndian> {
		ValueWriterBlob::default()
	}
}

impl<E: ByteOrder> ValueWriterBlob<E> {
	#[must_use]
	pub fn into_blob(self) -> Blob {
		Blob::from(self.cursor.into_inner())
	}

	pub fn write_varint(&mut self, mut value: u64) -> Result<()> {
		while value >= 0x80 {
			#[allow(clippy::cast_possible_truncation)]
			self.cursor.write_all(&[((value & 0x7F) as u8) | 0x80])?;
			value >>= 7;
		}
		#[allow(clippy::cast_possible_truncation)]
		self.cursor.write_all(&[value as u8])?;
		Ok(())
	}

	#[allow(clippy::cast_sign_loss)]
	pub fn write_svarint(&mut self, value: i64) -> Result<()> {
		self.write_varint(((value << 1) ^ (value >> 63)) as u64)
	}

	pub fn write_f32(&mut self, value: f32) -> Result<()> {
		Ok(self.cursor.write_f32::<E>(value)?)
	}

	pub fn write_f64(&mut self, value: f64) -> Result<()> {
		Ok(self.cursor.write_f64::<E>(value)?)
	}

	/// Writes raw bytes without a length prefix.
	pub fn write_slice(&mut self, buf: &[u8]) -> Result<()> {
		Ok(self.cursor.write_all(buf)?)
	}

	pub fn write_pbf_key(&mut self, field_number: u32, wire_type: u8) -> Result<()> {
		self
			.write_varint((u64::from(field_number) << 3) | u64::from(wire_type))
			.context("Failed to write PBF key")
	}

	/// Writes a packed repeated field of unsigned 32-bit integers, prefixed by its length.
	pub fn write_pbf_packed_uint32(&mut self, data: &[u32]) -> Result<()> {
		let mut writer = ValueWriterBlob::<E>::default();
		for &value in data {
			writer
				.write_varint(u64::from(value))
				.context("Failed to write varint for packed uint32")?;
		}
		self
			.write_pbf_blob(&writer.into_blob())
			.context("Failed to write packed uint32 blob")
	}

	pub fn write_pbf_blob(&mut self, blob: &Blob) -> Result<()> {
		self
			.write_varint(blob.len())
			.context("Failed to write varint for blob length")?;
		self.write_slice(blob.as_slice()).context("Failed to write PBF blob")
	}

	pub fn write_pbf_string(&mut self, text: &str) -> Result<()> {
		self
			.write_varint(text.len() as u64)
			.context("Failed to write varint for string length")?;
		self.write_slice(text.as_bytes()).context("Failed to write PBF string")
	}
}
