//! Vector tile **layer** decoding.
//!
//! A layer message carries:
//!  * field 1: `name` (string)
//!  * field 2: repeated `feature` (embedded message)
//!  * field 3: repeated `keys` (string)
//!  * field 4: repeated `values` (embedded message)
//!  * field 5: `extent` (varint, default 4096)
//!  * field 15: `version` (varint, default 1)
//!
//! Other fields are skipped.

use super::{feature::VectorTileFeature, property_manager::PropertyManager, value::GeoValuePBF};
use crate::geo::{GeoFeature, GeoValue};
use anyhow::{Context, Result};
use byteorder::LE;
use vt2geojson_core::{DecodeError, TileCoord, io::ValueReader};

/// A single vector tile layer with its features and property dictionaries.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorTileLayer {
	/// Size of the local coordinate space along one tile edge.
	pub extent: u32,
	pub features: Vec<VectorTileFeature>,
	pub name: String,
	pub property_manager: PropertyManager,
	/// Format version; decoded but not interpreted.
	pub version: u32,
}

impl VectorTileLayer {
	#[must_use]
	pub fn new(name: String, extent: u32, version: u32) -> VectorTileLayer {
		VectorTileLayer {
			extent,
			features: vec![],
			name,
			property_manager: PropertyManager::default(),
			version,
		}
	}

	/// Reads a `VectorTileLayer` from a layer message.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] for structural errors, a missing name or an extent
	/// of 0.
	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileLayer> {
		let start = reader.offset();
		let mut extent = 4096;
		let mut features: Vec<VectorTileFeature> = Vec::new();
		let mut name = None;
		let mut property_manager = PropertyManager::new();
		let mut version = 1;

		while reader.has_remaining() {
			let position = reader.absolute_position();
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 2) => name = Some(reader.read_pbf_string().context("Failed to read layer name")?),
				(2, 2) => features.push(
					VectorTileFeature::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for feature")?
							.as_mut(),
					)
					.with_context(|| format!("Failed to read feature {}", features.len()))?,
				),
				(3, 2) => property_manager.add_key(reader.read_pbf_string().context("Failed to read property key")?),
				(4, 2) => property_manager.add_val(
					GeoValue::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for property value")?
							.as_mut(),
					)
					.context("Failed to read property value")?,
				),
				(5, 0) => {
					let value = reader.read_varint().context("Failed to read extent")?;
					extent = u32::try_from(value)
						.ok()
						.filter(|e| *e > 0)
						.ok_or_else(|| DecodeError::malformed(position, format!("invalid layer extent {value}")))?;
				}
				(15, 0) => {
					let value = reader.read_varint().context("Failed to read version")?;
					version = u32::try_from(value)
						.map_err(|_| DecodeError::malformed(position, format!("invalid layer version {value}")))?;
				}
				(f @ (1..=5 | 15), w) => {
					return Err(DecodeError::malformed(
						position,
						format!("unexpected wire type {w} for layer field {f}"),
					));
				}
				(_, w) => reader.skip_pbf_field(w).context("Failed to skip unknown layer field")?,
			}
		}

		Ok(VectorTileLayer {
			extent,
			features,
			name: name.ok_or_else(|| DecodeError::malformed(start, "layer without a name"))?,
			property_manager,
			version,
		})
	}

	/// Converts all features of this layer. With `tag_layer`, every feature gets a `vt_layer`
	/// property naming this layer.
	pub fn to_features(&self, coord: &TileCoord, tag_layer: bool) -> Result<Vec<GeoFeature>> {
		let mut features = Vec::with_capacity(self.features.len());
		for (index, feature) in self.features.iter().enumerate() {
			let mut feature = feature
				.to_feature(&self.property_manager, self.extent, coord)
				.with_context(|| format!("Failed to convert feature {index}"))?;
			if tag_layer {
				feature.set_property(String::from("vt_layer"), self.name.as_str());
			}
			features.push(feature);
		}
		Ok(features)
	}
}
