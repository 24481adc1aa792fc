//! Typed decode failures.
//!
//! Functions in this workspace return [`anyhow::Result`]. When a tile cannot be decoded, the
//! failure site creates a [`DecodeError`] and callers add context (layer name, feature index)
//! on the way up. [`DecodeError::find`] recovers the typed kind from any such error chain.

use crate::TileCompression;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeError {
	/// The compressed envelope around the tile is truncated or corrupt.
	#[error("failed to decompress {compression} tile data: {message}")]
	Compression {
		compression: TileCompression,
		message: String,
	},

	/// The protobuf structure, a dictionary index or a geometry command stream is invalid.
	#[error("malformed tile data at byte {offset}: {message}")]
	Malformed { offset: u64, message: String },

	/// The feature declares a geometry type other than Point, LineString or Polygon.
	#[error("unsupported geometry type {0}")]
	UnsupportedGeometry(u64),

	/// The tile address could not be determined before decoding.
	#[error("Could not determine tile z, x, and y from {0:?}; specify manually with -z <z> -x <x> -y <y>")]
	MissingAddress(String),
}

impl DecodeError {
	/// Builds a [`DecodeError::Malformed`] wrapped as an [`anyhow::Error`].
	pub fn malformed(offset: u64, message: impl Into<String>) -> anyhow::Error {
		anyhow::Error::new(DecodeError::Malformed {
			offset,
			message: message.into(),
		})
	}

	/// Searches an error chain for the first [`DecodeError`].
	pub fn find(err: &anyhow::Error) -> Option<&DecodeError> {
		err.chain().find_map(|cause| cause.downcast_ref::<DecodeError>())
	}
}
