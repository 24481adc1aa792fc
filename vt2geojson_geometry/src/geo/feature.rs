use super::*;
use serde_json::{Map, Value};

/// A GeoJSON feature.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	pub id: Option<u64>,
	pub geometry: Geometry,
	pub properties: GeoProperties,
}

impl GeoFeature {
	#[must_use]
	pub fn new(geometry: Geometry) -> Self {
		Self {
			id: None,
			geometry,
			properties: GeoProperties::new(),
		}
	}

	pub fn set_id(&mut self, id: u64) {
		self.id = Some(id);
	}

	pub fn set_properties(&mut self, properties: GeoProperties) {
		self.properties = properties;
	}

	pub fn set_property<T>(&mut self, key: String, value: T)
	where
		GeoValue: From<T>,
	{
		self.properties.insert(key, GeoValue::from(value));
	}

	/// Converts the feature to a GeoJSON feature object. `id` is only emitted when present.
	#[must_use]
	pub fn to_json(&self, precision: Option<u8>) -> Value {
		let mut obj = Map::new();
		obj.insert(String::from("type"), Value::from("Feature"));
		if let Some(id) = self.id {
			obj.insert(String::from("id"), Value::from(id));
		}
		obj.insert(String::from("geometry"), self.geometry.to_json(precision));
		obj.insert(String::from("properties"), self.properties.to_json());
		Value::Object(obj)
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Self {
			id: Some(13),
			geometry: Geometry::new_example(),
			properties: GeoProperties::from(vec![
				("name", GeoValue::from("Nice")),
				("population", GeoValue::from(348085)),
				("is_nice", GeoValue::from(true)),
			]),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn to_json() {
		let mut feature = GeoFeature::new(Geometry::new_point([1.23456, 2.0]));
		feature.set_property(String::from("class"), "park");
		assert_eq!(
			feature.to_json(Some(2)),
			json!({
				"type": "Feature",
				"geometry": {"type": "Point", "coordinates": [1.23, 2.0]},
				"properties": {"class": "park"}
			})
		);

		feature.set_id(7);
		assert_eq!(feature.to_json(None)["id"], json!(7));
	}

	#[test]
	fn example_properties() {
		let feature = GeoFeature::new_example();
		let json = feature.to_json(None);
		assert_eq!(json["id"], json!(13));
		assert_eq!(json["properties"], json!({"is_nice": true, "name": "Nice", "population": 348085}));
		assert_eq!(json["geometry"]["type"], json!("MultiPolygon"));
	}
}
