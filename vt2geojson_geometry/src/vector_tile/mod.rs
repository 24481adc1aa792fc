//! Mapbox Vector Tile decoding.
//!
//! - [`tile`]: the top-level container holding the layers of one tile.
//! - [`layer`]: a layer with its features and key/value dictionaries.
//! - [`feature`]: per-feature tags and encoded geometry.
//! - [`geometry_decoder`]: turns command streams into rings, lines and points.
//! - [`selector`]: chooses which layers are converted.
//!
//! [`VectorTile::to_geo_collection`] converts a decoded tile into a [`crate::GeoCollection`].

pub mod feature;
pub mod geometry_decoder;
mod geometry_type;
pub mod layer;
mod property_manager;
pub mod selector;
#[cfg(any(test, feature = "test"))]
pub mod test_utils;
pub mod tile;
mod value;

pub use geometry_type::GeomType;
pub use layer::VectorTileLayer;
pub use property_manager::PropertyManager;
pub use selector::LayerSelector;
pub use tile::VectorTile;
