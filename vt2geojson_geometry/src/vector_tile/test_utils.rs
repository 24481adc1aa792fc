//! Builders for synthetic vector tiles used in tests.
//!
//! [`GeometryEncoder`] produces command streams from absolute tile-local positions,
//! [`TestFeature`] and [`TestLayer`] describe messages field by field, and [`build_tile`]
//! serialises them. Every field is optional, so malformed tiles are as easy to craft as valid
//! ones.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::missing_errors_doc)]

use crate::geo::GeoValue;
use anyhow::{Context, Result};
use vt2geojson_core::{Blob, io::ValueWriterBlob};

/// Returns the command integer for `id` repeated `count` times.
#[must_use]
pub fn command(id: u32, count: u32) -> u32 {
	(count << 3) | id
}

#[must_use]
pub fn zigzag(value: i64) -> u32 {
	((value << 1) ^ (value >> 63)) as u32
}

/// Encodes geometry commands, tracking the cursor like a decoder does.
#[derive(Clone, Debug, Default)]
pub struct GeometryEncoder {
	cursor: [i64; 2],
	commands: Vec<u32>,
}

impl GeometryEncoder {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	fn push_points(&mut self, id: u32, points: &[[i64; 2]]) {
		self.commands.push(command(id, points.len() as u32));
		for point in points {
			self.commands.push(zigzag(point[0] - self.cursor[0]));
			self.commands.push(zigzag(point[1] - self.cursor[1]));
			self.cursor = *point;
		}
	}

	/// One `MoveTo` with a repetition per point.
	#[must_use]
	pub fn move_to(mut self, points: &[[i64; 2]]) -> Self {
		self.push_points(1, points);
		self
	}

	#[must_use]
	pub fn line_to(mut self, points: &[[i64; 2]]) -> Self {
		self.push_points(2, points);
		self
	}

	#[must_use]
	pub fn close_path(mut self) -> Self {
		self.commands.push(command(7, 1));
		self
	}

	/// Encodes a closed ring given with its closing point, e.g. `[a, b, c, a]`.
	#[must_use]
	pub fn ring(self, points: &[[i64; 2]]) -> Self {
		let last = points.len().saturating_sub(1).max(1);
		self.move_to(&points[..1]).line_to(&points[1..last]).close_path()
	}

	#[must_use]
	pub fn into_commands(self) -> Vec<u32> {
		self.commands
	}

	/// Writes command integers as consecutive varints, as found in a feature's geometry field.
	pub fn encode_commands(commands: &[u32]) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		for value in commands {
			writer.write_varint(u64::from(*value))?;
		}
		Ok(writer.into_blob())
	}
}

/// A feature message. `None` fields are left out.
#[derive(Clone, Debug, Default)]
pub struct TestFeature {
	pub id: Option<u64>,
	pub geom_type: Option<u64>,
	pub tags: Vec<u32>,
	pub geometry: Option<Vec<u32>>,
	/// Raw bytes appended to the message, e.g. unknown fields.
	pub extra: Vec<u8>,
}

impl TestFeature {
	#[must_use]
	pub fn new(geom_type: u64, geometry: Vec<u32>) -> Self {
		Self {
			geom_type: Some(geom_type),
			geometry: Some(geometry),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_id(mut self, id: u64) -> Self {
		self.id = Some(id);
		self
	}

	#[must_use]
	pub fn with_tags(mut self, tags: &[u32]) -> Self {
		self.tags = tags.to_vec();
		self
	}

	#[must_use]
	pub fn with_extra(mut self, extra: &[u8]) -> Self {
		self.extra = extra.to_vec();
		self
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		if let Some(id) = self.id {
			writer.write_pbf_key(1, 0)?;
			writer.write_varint(id)?;
		}
		if !self.tags.is_empty() {
			writer.write_pbf_key(2, 2)?;
			writer.write_pbf_packed_uint32(&self.tags)?;
		}
		if let Some(geom_type) = self.geom_type {
			writer.write_pbf_key(3, 0)?;
			writer.write_varint(geom_type)?;
		}
		if let Some(geometry) = &self.geometry {
			writer.write_pbf_key(4, 2)?;
			writer.write_pbf_packed_uint32(geometry)?;
		}
		writer.write_slice(&self.extra)?;
		Ok(writer.into_blob())
	}
}

/// A layer message. `None` fields are left out.
#[derive(Clone, Debug, Default)]
pub struct TestLayer {
	pub name: Option<String>,
	pub extent: Option<u64>,
	pub version: Option<u64>,
	pub keys: Vec<String>,
	pub values: Vec<GeoValue>,
	pub features: Vec<TestFeature>,
	/// Raw bytes appended to the message, e.g. unknown fields.
	pub extra: Vec<u8>,
}

impl TestLayer {
	#[must_use]
	pub fn new(name: &str) -> Self {
		Self {
			name: Some(name.to_string()),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_extent(mut self, extent: u64) -> Self {
		self.extent = Some(extent);
		self
	}

	#[must_use]
	pub fn with_key(mut self, key: &str) -> Self {
		self.keys.push(key.to_string());
		self
	}

	#[must_use]
	pub fn with_value(mut self, value: GeoValue) -> Self {
		self.values.push(value);
		self
	}

	#[must_use]
	pub fn with_feature(mut self, feature: TestFeature) -> Self {
		self.features.push(feature);
		self
	}

	#[must_use]
	pub fn with_extra(mut self, extra: &[u8]) -> Self {
		self.extra = extra.to_vec();
		self
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();
		if let Some(name) = &self.name {
			writer.write_pbf_key(1, 2)?;
			writer.write_pbf_string(name)?;
		}
		for feature in &self.features {
			writer.write_pbf_key(2, 2)?;
			writer.write_pbf_blob(&feature.to_blob().context("Failed to encode feature")?)?;
		}
		for key in &self.keys {
			writer.write_pbf_key(3, 2)?;
			writer.write_pbf_string(key)?;
		}
		for value in &self.values {
			writer.write_pbf_key(4, 2)?;
			writer.write_pbf_blob(&encode_value(value)?)?;
		}
		if let Some(extent) = self.extent {
			writer.write_pbf_key(5, 0)?;
			writer.write_varint(extent)?;
		}
		if let Some(version) = self.version {
			writer.write_pbf_key(15, 0)?;
			writer.write_varint(version)?;
		}
		writer.write_slice(&self.extra)?;
		Ok(writer.into_blob())
	}
}

/// Encodes a `Value` message. Signed integers use the zigzag field.
pub fn encode_value(value: &GeoValue) -> Result<Blob> {
	let mut writer = ValueWriterBlob::new_le();
	match value {
		GeoValue::String(s) => {
			writer.write_pbf_key(1, 2)?;
			writer.write_pbf_string(s)?;
		}
		GeoValue::Double(v) => {
			writer.write_pbf_key(3, 1)?;
			writer.write_f64(*v)?;
		}
		GeoValue::Int(v) => {
			writer.write_pbf_key(6, 0)?;
			writer.write_svarint(*v)?;
		}
		GeoValue::UInt(v) => {
			writer.write_pbf_key(5, 0)?;
			writer.write_varint(*v)?;
		}
		GeoValue::Bool(v) => {
			writer.write_pbf_key(7, 0)?;
			writer.write_varint(u64::from(*v))?;
		}
	}
	Ok(writer.into_blob())
}

/// Serialises layers into an uncompressed tile.
pub fn build_tile(layers: &[TestLayer]) -> Result<Blob> {
	let mut writer = ValueWriterBlob::new_le();
	for layer in layers {
		writer.write_pbf_key(3, 2)?;
		writer.write_pbf_blob(&layer.to_blob().context("Failed to encode layer")?)?;
	}
	Ok(writer.into_blob())
}
