use super::{
	geometry_decoder::decode_geometry, geometry_type::GeomType, property_manager::PropertyManager,
};
use crate::geo::{GeoFeature, Geometry};
use anyhow::{Context, Result};
use byteorder::LE;
use vt2geojson_core::{
	Blob, DecodeError, TileCoord,
	io::{ValueReader, ValueReaderSlice},
};

/// A feature as stored in a layer: tags and geometry are kept encoded until conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorTileFeature {
	pub id: Option<u64>,
	pub tag_ids: Vec<u32>,
	/// Raw geometry type; validated when the feature is converted.
	pub geom_type: u64,
	pub geom_data: Blob,
	/// Absolute position of the feature message in the decoded tile.
	pub offset: u64,
	/// Absolute position of the geometry payload in the decoded tile.
	pub geom_offset: u64,
}

impl VectorTileFeature {
	/// Decodes a `VectorTileFeature` from a feature message.
	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileFeature> {
		let offset = reader.offset();
		let mut feature = VectorTileFeature {
			id: None,
			tag_ids: Vec::new(),
			geom_type: 0,
			geom_data: Blob::new_empty(),
			offset,
			geom_offset: offset,
		};

		while reader.has_remaining() {
			let position = reader.absolute_position();
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 0) => feature.id = Some(reader.read_varint().context("Failed to read feature ID")?),
				(2, 2) => feature.tag_ids = reader.read_pbf_packed_uint32().context("Failed to read tag IDs")?,
				(3, 0) => feature.geom_type = reader.read_varint().context("Failed to read geometry type")?,
				(4, 2) => {
					let length = reader.read_varint().context("Failed to read geometry length")?;
					feature.geom_offset = reader.absolute_position();
					feature.geom_data = reader.read_blob(length).context("Failed to read geometry data")?;
				}
				(f @ 1..=4, w) => {
					return Err(DecodeError::malformed(
						position,
						format!("unexpected wire type {w} for feature field {f}"),
					));
				}
				(_, w) => reader.skip_pbf_field(w).context("Failed to skip unknown feature field")?,
			}
		}

		Ok(feature)
	}

	/// Decodes the geometry and projects it into longitude/latitude.
	pub fn to_geometry(&self, extent: u32, coord: &TileCoord) -> Result<Geometry> {
		let geom_type = GeomType::try_from(self.geom_type)?;
		let mut reader = ValueReaderSlice::new_at(self.geom_data.as_slice(), self.geom_offset);
		let geometry = decode_geometry(geom_type, &mut reader)?;
		Ok(geometry.into_geometry(|[x, y]| coord.project(x as f64, y as f64, extent)))
	}

	/// Converts the feature into a [`GeoFeature`] using the dictionaries of its layer.
	pub fn to_feature(
		&self,
		property_manager: &PropertyManager,
		extent: u32,
		coord: &TileCoord,
	) -> Result<GeoFeature> {
		let geometry = self.to_geometry(extent, coord).context("Failed to decode geometry")?;

		let mut feature = GeoFeature::new(geometry);
		feature.set_properties(
			property_manager
				.decode_tag_ids(&self.tag_ids, self.offset)
				.context("Failed to decode properties")?,
		);
		if let Some(id) = self.id {
			feature.set_id(id);
		}
		Ok(feature)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		geo::{GeoProperties, GeoValue},
		vector_tile::test_utils::{GeometryEncoder, TestFeature},
	};
	use approx::assert_abs_diff_eq;
	use pretty_assertions::assert_eq;

	fn read(feature: &TestFeature) -> Result<VectorTileFeature> {
		let blob = feature.to_blob()?;
		VectorTileFeature::read(&mut ValueReaderSlice::new_le(blob.as_slice()))
	}

	fn world() -> TileCoord {
		TileCoord::new(0, 0, 0).unwrap()
	}

	#[test]
	fn read_fields() -> Result<()> {
		let feature = read(&TestFeature::new(1, vec![9, 50, 34]).with_id(7).with_tags(&[0, 1]))?;
		assert_eq!(feature.id, Some(7));
		assert_eq!(feature.tag_ids, vec![0, 1]);
		assert_eq!(feature.geom_type, 1);
		assert_eq!(feature.geom_data.as_slice(), &[9, 50, 34]);
		// id (2 bytes) + tags (4 bytes) + type (2 bytes) + geometry key and length
		assert_eq!(feature.geom_offset, 10);
		Ok(())
	}

	#[test]
	fn read_skips_unknown_fields() -> Result<()> {
		let feature = read(&TestFeature::new(1, vec![9, 2, 2]).with_extra(&[0x28, 0x01, 0x32, 0x01, 0xFF]))?;
		assert_eq!(feature.geom_type, 1);
		Ok(())
	}

	#[test]
	fn read_rejects_wrong_wire_type() {
		// field 3 (type) as a length-delimited field
		let err = read(&TestFeature::default().with_extra(&[0x1A, 0x00])).unwrap_err();
		assert_eq!(
			err.to_string(),
			"malformed tile data at byte 0: unexpected wire type 2 for feature field 3"
		);
	}

	#[test]
	fn to_geometry_projects_points() -> Result<()> {
		let commands = GeometryEncoder::new().move_to(&[[0, 0], [4096, 4096]]).into_commands();
		let feature = read(&TestFeature::new(1, commands))?;
		let Geometry::MultiPoint(points) = feature.to_geometry(4096, &world())? else {
			panic!("expected a multi point")
		};
		assert_abs_diff_eq!(points.0[0].0.x(), -180.0, epsilon = 1e-10);
		assert_abs_diff_eq!(points.0[0].0.y(), 85.051_128_779_806_6, epsilon = 1e-10);
		assert_abs_diff_eq!(points.0[1].0.x(), 180.0, epsilon = 1e-10);
		assert_abs_diff_eq!(points.0[1].0.y(), -85.051_128_779_806_6, epsilon = 1e-10);
		Ok(())
	}

	#[test]
	fn to_geometry_checks_type() -> Result<()> {
		for geom_type in [0, 4] {
			let feature = read(&TestFeature::new(geom_type, vec![9, 2, 2]))?;
			let err = feature.to_geometry(4096, &world()).unwrap_err();
			assert_eq!(DecodeError::find(&err), Some(&DecodeError::UnsupportedGeometry(geom_type)));
		}

		let mut missing = TestFeature::new(1, vec![9, 2, 2]);
		missing.geom_type = None;
		let err = read(&missing)?.to_geometry(4096, &world()).unwrap_err();
		assert_eq!(DecodeError::find(&err), Some(&DecodeError::UnsupportedGeometry(0)));
		Ok(())
	}

	#[test]
	fn geometry_errors_point_into_the_tile() -> Result<()> {
		// MoveTo with a single coordinate
		let feature = read(&TestFeature::new(1, vec![9, 2]).with_id(1))?;
		let err = feature.to_geometry(4096, &world()).unwrap_err();
		assert_eq!(err.to_string(), "malformed tile data at byte 8: incomplete coordinate pair");
		Ok(())
	}

	#[test]
	fn to_feature() -> Result<()> {
		let manager = PropertyManager::from_slices(&["kind"], &[GeoValue::from("tree")]);
		let feature = read(&TestFeature::new(1, vec![9, 50, 34]).with_id(3).with_tags(&[0, 0]))?
			.to_feature(&manager, 4096, &world())?;
		assert_eq!(feature.id, Some(3));
		assert_eq!(feature.geometry.get_type(), "Point");
		assert_eq!(feature.properties, GeoProperties::from(vec![("kind", GeoValue::from("tree"))]));

		let err = read(&TestFeature::new(1, vec![9, 50, 34]).with_tags(&[0, 1]))?
			.to_feature(&manager, 4096, &world())
			.unwrap_err();
		assert_eq!(
			DecodeError::find(&err),
			Some(&DecodeError::Malformed {
				offset: 0,
				message: String::from("value index 1 out of range, layer has 1 values")
			})
		);
		Ok(())
	}

	#[test]
	fn degenerate_polygons_are_kept() -> Result<()> {
		let commands = GeometryEncoder::new().ring(&[[0, 0], [2, 2], [4, 4], [0, 0]]).into_commands();
		let feature = read(&TestFeature::new(3, commands))?.to_feature(&PropertyManager::new(), 4096, &world())?;
		assert_eq!(feature.geometry.get_type(), "Polygon");

		let commands = GeometryEncoder::new()
			.ring(&[[0, 0], [2, 2], [4, 4], [0, 0]])
			.ring(&[[4, 4], [6, 6], [8, 8], [4, 4]])
			.into_commands();
		let err = read(&TestFeature::new(3, commands))?
			.to_feature(&PropertyManager::new(), 4096, &world())
			.unwrap_err();
		assert!(matches!(DecodeError::find(&err), Some(DecodeError::Malformed { .. })));
		Ok(())
	}
}
