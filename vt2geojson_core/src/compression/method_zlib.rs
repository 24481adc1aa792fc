use crate::{Blob, DecodeError, TileCompression};
use anyhow::Result;
use flate2::{Decompress, FlushDecompress, Status};

fn zlib_error(message: impl Into<String>) -> DecodeError {
	DecodeError::Compression {
		compression: TileCompression::Zlib,
		message: message.into(),
	}
}

/// Decompresses a complete zlib stream.
///
/// The stream must reach its end marker. Input that stops early is reported as truncated
/// instead of yielding the partial output.
///
/// # Errors
///
/// Returns [`DecodeError::Compression`] if the stream is corrupt or truncated.
pub fn decompress_zlib(blob: &Blob) -> Result<Blob> {
	let input = blob.as_slice();
	let mut decoder = Decompress::new(true);
	let mut output = Vec::with_capacity(input.len().saturating_mul(4).max(64));

	loop {
		let consumed = usize::try_from(decoder.total_in())?;
		let remaining = input.get(consumed..).unwrap_or_default();

		let status = decoder
			.decompress_vec(remaining, &mut output, FlushDecompress::Finish)
			.map_err(|e| zlib_error(e.to_string()))?;

		match status {
			Status::StreamEnd => break,
			Status::Ok | Status::BufError => {
				// spare room in the output means the decoder starved on input
				if output.len() < output.capacity() {
					return Err(zlib_error("unexpected end of stream").into());
				}
				output.reserve(output.capacity());
			}
		}
	}

	Ok(Blob::from(output))
}

/// Compresses data using zlib. Used to craft compressed fixtures.
#[cfg(any(test, feature = "test"))]
pub fn compress_zlib(blob: &Blob) -> Result<Blob> {
	use anyhow::Context;
	use flate2::bufread::ZlibEncoder;
	use std::io::Read;

	// default level, so the stream starts with the 78 9c header
	let mut encoder = ZlibEncoder::new(blob.as_slice(), flate2::Compression::default());
	let mut compressed_data = Vec::new();
	encoder
		.read_to_end(&mut compressed_data)
		.context("Failed to compress data using zlib")?;
	Ok(Blob::from(compressed_data))
}
