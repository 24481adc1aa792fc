//! This module defines the [`TileCompression`] enum, naming the envelopes a raw tile buffer may
//! arrive in.
//!
//! # Examples
//!
//! ```
//! use vt2geojson_core::TileCompression;
//!
//! assert_eq!(TileCompression::from_magic(&[0x1f, 0x8b, 0x08]), TileCompression::Gzip);
//! assert_eq!(TileCompression::from_magic(&[0x78, 0x9c]), TileCompression::Zlib);
//! assert_eq!(TileCompression::from_magic(&[0x1a, 0x05]), TileCompression::Uncompressed);
//! assert_eq!(TileCompression::Gzip.to_string(), "gzip");
//! ```

use std::fmt::Display;

/// Enum representing the compression envelopes recognised around tile data.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TileCompression {
	Uncompressed,
	Zlib,
	Gzip,
}

impl TileCompression {
	/// Detects the envelope from the first two bytes of a buffer.
	///
	/// `78 9c` is a zlib stream (default compression level), `1f 8b` a gzip stream.
	/// Anything else, including buffers shorter than two bytes, is treated as uncompressed.
	#[must_use]
	pub fn from_magic(data: &[u8]) -> TileCompression {
		match data {
			[0x78, 0x9c, ..] => TileCompression::Zlib,
			[0x1f, 0x8b, ..] => TileCompression::Gzip,
			_ => TileCompression::Uncompressed,
		}
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			TileCompression::Uncompressed => "none",
			TileCompression::Zlib => "zlib",
			TileCompression::Gzip => "gzip",
		}
	}
}

impl Display for TileCompression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
