//! Core building blocks shared by the vt2geojson crates.
//!
//! - [`types`]: byte buffers ([`Blob`]), tile addresses ([`TileCoord`]) and compression kinds.
//! - [`compression`]: detection and removal of zlib/gzip envelopes around tile data.
//! - [`io`]: protobuf-aware value readers and the data readers that fetch raw tiles.
//! - [`DecodeError`]: the typed failure kinds reported by the decode pipeline.

pub mod compression;
mod error;
pub mod io;
pub mod types;

pub use error::*;
pub use types::*;
