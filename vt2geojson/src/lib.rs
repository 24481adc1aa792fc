//! Converts Mapbox Vector Tiles into GeoJSON feature collections.
//!
//! [`read_tile`] converts raw tile bytes without any I/O, [`convert`] additionally resolves the
//! tile address and fetches the tile from a file or an HTTP server.
//!
//! ```rust
//! use vt2geojson::{core::{Blob, TileCoord}, geometry::vector_tile::LayerSelector, read_tile};
//!
//! let collection = read_tile(&Blob::new_empty(), &TileCoord::new(0, 0, 0)?, &LayerSelector::All)?;
//! assert!(collection.features.is_empty());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod convert;
pub mod source;

pub use convert::*;
pub use vt2geojson_core as core;
pub use vt2geojson_geometry as geometry;
