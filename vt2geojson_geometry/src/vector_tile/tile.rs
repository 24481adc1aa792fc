use super::{layer::VectorTileLayer, selector::LayerSelector};
use crate::geo::GeoCollection;
use anyhow::{Context, Result};
use log::{debug, warn};
use vt2geojson_core::{Blob, DecodeError, TileCoord, io::*};

/// A decoded vector tile: its layers in tile order, names unique.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTile {
	pub layers: Vec<VectorTileLayer>,
}

impl VectorTile {
	#[must_use]
	pub fn new(layers: Vec<VectorTileLayer>) -> VectorTile {
		VectorTile { layers }
	}

	/// Decodes an uncompressed tile.
	///
	/// Layers without features are left out. A layer whose name was already seen replaces the
	/// content of the earlier layer but keeps its position.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] if the protobuf structure is invalid.
	pub fn from_blob(blob: &Blob) -> Result<VectorTile> {
		let mut reader = ValueReaderSlice::new_le(blob.as_slice());

		let mut tile = VectorTile::default();
		let mut index = 0;
		while reader.has_remaining() {
			let position = reader.absolute_position();
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(3, 2) => {
					let layer = VectorTileLayer::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader")?
							.as_mut(),
					)
					.with_context(|| format!("Failed to read layer {index}"))?;
					index += 1;
					tile.add_layer(layer);
				}
				(3, w) => {
					return Err(DecodeError::malformed(
						position,
						format!("unexpected wire type {w} for tile field 3"),
					));
				}
				(_, w) => reader.skip_pbf_field(w).context("Failed to skip unknown tile field")?,
			}
		}

		Ok(tile)
	}

	fn add_layer(&mut self, layer: VectorTileLayer) {
		if layer.features.is_empty() {
			debug!("skipping layer '{}' without features", layer.name);
			return;
		}
		match self.layers.iter_mut().find(|l| l.name == layer.name) {
			Some(existing) => {
				warn!("duplicate layer '{}' in tile, the later layer replaces the earlier one", layer.name);
				*existing = layer;
			}
			None => self.layers.push(layer),
		}
	}

	/// Converts the selected layers into a feature collection.
	///
	/// If more than one layer is requested, every feature gets a `vt_layer` property. Any error
	/// aborts the whole conversion.
	pub fn to_geo_collection(&self, coord: &TileCoord, selector: &LayerSelector) -> Result<GeoCollection> {
		let tag_layer = selector.requested_count(&self.layers) > 1;

		let mut features = Vec::new();
		for layer in selector.select(&self.layers) {
			features.extend(
				layer
					.to_features(coord, tag_layer)
					.with_context(|| format!("Failed to convert layer '{}'", layer.name))?,
			);
		}

		Ok(GeoCollection::from(features))
	}
}
