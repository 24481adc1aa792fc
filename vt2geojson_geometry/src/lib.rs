//! Decoding of Mapbox Vector Tiles into GeoJSON feature collections.
//!
//! [`vector_tile::VectorTile`] parses an uncompressed tile; its layers are converted into
//! [`GeoFeature`]s with coordinates projected to WGS84 longitude/latitude.
//!
//! ```rust
//! use vt2geojson_core::{Blob, TileCoord};
//! use vt2geojson_geometry::vector_tile::{LayerSelector, VectorTile};
//!
//! let tile = VectorTile::from_blob(&Blob::new_empty())?;
//! let collection = tile.to_geo_collection(&TileCoord::new(0, 0, 0)?, &LayerSelector::All)?;
//! assert_eq!(collection.to_json_string(None, false)?, r#"{"features":[],"type":"FeatureCollection"}"#);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod geo;
pub mod math;
pub mod vector_tile;

pub use geo::*;
