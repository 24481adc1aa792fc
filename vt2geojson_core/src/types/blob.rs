//! This module provides the [`Blob`] struct, a wrapper around [`Vec<u8>`] used for raw and
//! decompressed tile data.
//!
//! # Examples
//!
//! ```rust
//! use vt2geojson_core::Blob;
//!
//! let blob = Blob::from(vec![0x1a, 0x02, 0x0a, 0x00]);
//! assert_eq!(blob.len(), 4);
//! assert_eq!(blob.as_slice()[0], 0x1a);
//! ```

use std::fmt::Debug;

/// A simple wrapper around [`Vec<u8>`] holding tile bytes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Blob(Vec<u8>);

impl Blob {
	/// Creates an empty `Blob`.
	#[must_use]
	pub fn new_empty() -> Blob {
		Blob(Vec::new())
	}

	/// Returns the content as a byte slice.
	#[must_use]
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	/// Consumes the `Blob` and returns the underlying vector.
	#[must_use]
	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	/// Returns the length in bytes.
	#[must_use]
	pub fn len(&self) -> u64 {
		self.0.len() as u64
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for Blob {
	fn from(item: Vec<u8>) -> Self {
		Blob(item)
	}
}

impl From<&[u8]> for Blob {
	fn from(item: &[u8]) -> Self {
		Blob(item.to_vec())
	}
}

impl<const N: usize> From<&[u8; N]> for Blob {
	fn from(item: &[u8; N]) -> Self {
		Blob(item.to_vec())
	}
}

impl Debug for Blob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let preview = self.0.iter().take(16).map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ");
		if self.0.len() > 16 {
			write!(f, "Blob({} bytes: {preview} …)", self.0.len())
		} else {
			write!(f, "Blob({} bytes: {preview})", self.0.len())
		}
	}
}
