use super::GeoFeature;
use anyhow::Result;
use serde_json::{Map, Value};

/// A GeoJSON feature collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeoCollection {
	pub features: Vec<GeoFeature>,
}

impl GeoCollection {
	#[must_use]
	pub fn from(features: Vec<GeoFeature>) -> Self {
		Self { features }
	}

	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> Value {
		let mut obj = Map::new();
		obj.insert(String::from("type"), Value::from("FeatureCollection"));
		obj.insert(
			String::from("features"),
			Value::from(self.features.iter().map(|f| f.to_json(precision)).collect::<Vec<_>>()),
		);
		Value::Object(obj)
	}

	/// Serialises the collection, either compact or indented.
	pub fn to_json_string(&self, precision: Option<u8>, pretty: bool) -> Result<String> {
		let json = self.to_json(precision);
		Ok(if pretty {
			serde_json::to_string_pretty(&json)?
		} else {
			serde_json::to_string(&json)?
		})
	}
}
