use crate::{Blob, DecodeError, TileCompression};
use anyhow::Result;
use flate2::bufread::GzDecoder;
use std::io::Read;

/// Decompresses a complete gzip stream.
///
/// # Errors
///
/// Returns [`DecodeError::Compression`] if the stream is corrupt or truncated, including a
/// missing or mismatching CRC trailer.
pub fn decompress_gzip(blob: &Blob) -> Result<Blob> {
	let mut decoder = GzDecoder::new(blob.as_slice());
	let mut decompressed_data = Vec::new();
	decoder
		.read_to_end(&mut decompressed_data)
		.map_err(|e| DecodeError::Compression {
			compression: TileCompression::Gzip,
			message: e.to_string(),
		})?;
	Ok(Blob::from(decompressed_data))
}

/// Compresses data using gzip. Used to craft compressed fixtures.
#[cfg(any(test, feature = "test"))]
pub fn compress_gzip(blob: &Blob) -> Result<Blob> {
	use anyhow::Context;
	use flate2::bufread::GzEncoder;

	let mut encoder = GzEncoder::new(blob.as_slice(), flate2::Compression::best());
	let mut compressed_data = Vec::new();
	encoder
		.read_to_end(&mut compressed_data)
		.context("Failed to compress data using Gzip")?;
	Ok(Blob::from(compressed_data))
}

#[cfg(test)]
mod tests {
	use super::super::tests::generate_test_data;
	use super::*;

	#[test]
	fn compress_and_decompress() -> Result<()> {
		let data = generate_test_data(100_000);
		let compressed = compress_gzip(&data)?;
		assert_eq!(&compressed.as_slice()[0..2], &[0x1f, 0x8b]);
		assert_eq!(decompress_gzip(&compressed)?, data);
		Ok(())
	}

	#[test]
	fn truncated_stream_fails() -> Result<()> {
		let compressed = compress_gzip(&generate_test_data(10_000))?.into_vec();
		for cut in [compressed.len() - 4, compressed.len() / 2, 12] {
			let err = decompress_gzip(&Blob::from(&compressed[..cut])).unwrap_err();
			assert!(matches!(
				DecodeError::find(&err),
				Some(DecodeError::Compression {
					compression: TileCompression::Gzip,
					..
				})
			));
		}
		Ok(())
	}
}
