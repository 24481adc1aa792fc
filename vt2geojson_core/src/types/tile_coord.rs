//! Tile addresses in a Web Mercator pyramid and the projection of tile-local coordinates
//!
//! [`TileCoord`] identifies one tile by zoom level, column and row. It also projects
//! tile-local integer coordinates of a vector tile layer into WGS84 longitude/latitude.
//!
//! # Examples
//!
//! ```
//! use vt2geojson_core::TileCoord;
//!
//! let coord = TileCoord::new(0, 0, 0).unwrap();
//! let [lon, lat] = coord.project(0.0, 0.0, 4096);
//! assert_eq!(lon, -180.0);
//! assert!((lat - 85.051_128_779_806_6).abs() < 1e-9);
//!
//! // the centre of the world tile is null island
//! let [lon, lat] = coord.project(2048.0, 2048.0, 4096);
//! assert!(lon.abs() < 1e-12 && lat.abs() < 1e-12);
//! ```

use anyhow::{Result, ensure};
use std::{
	f64::consts::PI,
	fmt::{self, Debug, Display},
};

/// A tile coordinate in a Web Mercator tile pyramid, with zoom level, x, and y indices.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index (column) of the tile.
	pub x: u32,
	/// The y index (row) of the tile, counted from the north.
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord` at the given zoom `level` and tile indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or if `x`/`y` are not below `2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= 31, "level ({level}) must be <= 31");
		let max = 2u32.pow(u32::from(level));
		ensure!(x < max, "x ({x}) out of bounds for level {level}");
		ensure!(y < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Convert a fractional position in the tile grid of `level` to `[longitude, latitude]`.
	///
	/// `x` and `y` are measured in tiles: `(0, 0)` is the north-west corner of the world,
	/// `(2^level, 2^level)` the south-east corner.
	#[must_use]
	pub fn coord_to_geo(level: u8, x: f64, y: f64) -> [f64; 2] {
		let zoom = 2.0f64.powi(i32::from(level));
		let lon = x / zoom * 360.0 - 180.0;
		let n = PI - 2.0 * PI * y / zoom;
		let lat = n.sinh().atan().to_degrees();
		[lon, lat]
	}

	/// Projects a tile-local point of a layer with the given `extent` to `[longitude, latitude]`.
	///
	/// Points outside `[0, extent)`, e.g. in a tile buffer, are projected with the same formula.
	#[must_use]
	pub fn project(&self, px: f64, py: f64, extent: u32) -> [f64; 2] {
		let extent = f64::from(extent);
		TileCoord::coord_to_geo(
			self.level,
			f64::from(self.x) + px / extent,
			f64::from(self.y) + py / extent,
		)
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.level, self.x, self.y)
	}
}
