//! Removal of compression envelopes around raw tile data.
//!
//! Tiles are frequently served or stored zlib- or gzip-compressed. [`decompress_tile`] inspects
//! the magic bytes of a buffer and returns the plain protobuf payload.
//!
//! ```rust
//! use vt2geojson_core::{Blob, compression::decompress_tile};
//!
//! let plain = Blob::from(vec![0x1a, 0x00]);
//! assert_eq!(decompress_tile(plain.clone())?, plain);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod method_gzip;
mod method_zlib;

pub use method_gzip::*;
pub use method_zlib::*;

use crate::{Blob, TileCompression};
use anyhow::Result;
use log::debug;

/// Detects the compression envelope of `blob` and removes it.
///
/// Buffers without a known envelope, including buffers shorter than two bytes, are returned
/// unchanged.
///
/// # Errors
///
/// Returns [`crate::DecodeError::Compression`] if a detected envelope is corrupt or truncated.
pub fn decompress_tile(blob: Blob) -> Result<Blob> {
	let compression = TileCompression::from_magic(blob.as_slice());
	debug!("tile envelope: {compression} ({} bytes)", blob.len());

	match compression {
		TileCompression::Uncompressed => Ok(blob),
		TileCompression::Zlib => decompress_zlib(&blob),
		TileCompression::Gzip => decompress_gzip(&blob),
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;
	use crate::DecodeError;

	/// Generates compressible but not trivial test data of the given length.
	pub fn generate_test_data(size: usize) -> Blob {
		let mut seed = 0x2545_f491_u32;
		let data = (0..size)
			.map(|i| {
				seed ^= seed << 13;
				seed ^= seed >> 17;
				seed ^= seed << 5;
				if i % 3 == 0 { (seed & 0x0f) as u8 } else { (i % 251) as u8 }
			})
			.collect::<Vec<u8>>();
		Blob::from(data)
	}

	#[test]
	fn passes_through_uncompressed_data() -> Result<()> {
		for data in [vec![], vec![0x78], vec![0x1a, 0x03, 0x0a, 0x01, 0x61]] {
			let blob = Blob::from(data);
			assert_eq!(decompress_tile(blob.clone())?, blob);
		}
		Ok(())
	}

	#[test]
	fn envelopes_are_transparent() -> Result<()> {
		let data = generate_test_data(5_000);
		assert_eq!(decompress_tile(compress_zlib(&data)?)?, data);
		assert_eq!(decompress_tile(compress_gzip(&data)?)?, data);
		Ok(())
	}

	#[test]
	fn broken_envelope_aborts() {
		let err = decompress_tile(Blob::from(&[0x1f, 0x8b, 0x08])).unwrap_err();
		assert!(matches!(
			DecodeError::find(&err),
			Some(DecodeError::Compression { .. })
		));
	}
}
