use crate::geo::{GeoProperties, GeoValue};
use anyhow::Result;
use vt2geojson_core::DecodeError;

/// The key and value dictionaries of a layer, in wire order.
///
/// Features reference properties by index pairs into these lists. Entries are never
/// deduplicated, so an index always resolves to the entry the encoder wrote at that position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyManager {
	pub keys: Vec<String>,
	pub values: Vec<GeoValue>,
}

impl PropertyManager {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[cfg(test)]
	pub fn from_slices(keys: &[&str], values: &[GeoValue]) -> Self {
		Self {
			keys: keys.iter().map(|k| (*k).to_string()).collect(),
			values: values.to_vec(),
		}
	}

	pub fn add_key(&mut self, key: String) {
		self.keys.push(key);
	}

	pub fn add_val(&mut self, value: GeoValue) {
		self.values.push(value);
	}

	/// Resolves `(key index, value index)` pairs into properties. A repeated key keeps the
	/// value of its last pair.
	///
	/// # Errors
	/// Fails with [`DecodeError::Malformed`] at `offset` for an odd number of indices or an
	/// index outside the dictionaries.
	pub fn decode_tag_ids(&self, tag_ids: &[u32], offset: u64) -> Result<GeoProperties> {
		if !tag_ids.len().is_multiple_of(2) {
			return Err(DecodeError::malformed(
				offset,
				format!("odd number of tag indices ({})", tag_ids.len()),
			));
		}

		let mut properties = GeoProperties::new();
		for pair in tag_ids.chunks_exact(2) {
			let key = self.keys.get(pair[0] as usize).ok_or_else(|| {
				DecodeError::malformed(
					offset,
					format!("key index {} out of range, layer has {} keys", pair[0], self.keys.len()),
				)
			})?;
			let value = self.values.get(pair[1] as usize).ok_or_else(|| {
				DecodeError::malformed(
					offset,
					format!("value index {} out of range, layer has {} values", pair[1], self.values.len()),
				)
			})?;
			properties.insert(key.clone(), value.clone());
		}
		Ok(properties)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn manager() -> PropertyManager {
		PropertyManager::from_slices(
			&["name", "height", "name"],
			&[GeoValue::from("Berlin"), GeoValue::UInt(12), GeoValue::from("Paris")],
		)
	}

	#[test]
	fn decode_tag_ids() -> Result<()> {
		let properties = manager().decode_tag_ids(&[0, 0, 1, 1], 0)?;
		assert_eq!(
			properties,
			GeoProperties::from(vec![("name", GeoValue::from("Berlin")), ("height", GeoValue::UInt(12))])
		);
		assert!(manager().decode_tag_ids(&[], 0)?.is_empty());
		Ok(())
	}

	#[test]
	fn repeated_keys_keep_the_last_value() -> Result<()> {
		// key 0 and key 2 are both "name"; entries are not merged
		let properties = manager().decode_tag_ids(&[0, 0, 2, 2], 0)?;
		assert_eq!(properties.len(), 1);
		assert_eq!(properties.get("name"), Some(&GeoValue::from("Paris")));
		Ok(())
	}

	#[test]
	fn dictionaries_keep_wire_order() {
		let mut manager = PropertyManager::new();
		manager.add_key(String::from("b"));
		manager.add_key(String::from("a"));
		manager.add_key(String::from("b"));
		manager.add_val(GeoValue::Bool(true));
		assert_eq!(manager.keys, vec!["b", "a", "b"]);
		assert_eq!(manager.values, vec![GeoValue::Bool(true)]);
	}

	#[rstest]
	#[case(&[0], "odd number of tag indices (1)")]
	#[case(&[0, 1, 2], "odd number of tag indices (3)")]
	#[case(&[3, 0], "key index 3 out of range, layer has 3 keys")]
	#[case(&[0, 3], "value index 3 out of range, layer has 3 values")]
	fn invalid_tag_ids(#[case] tag_ids: &[u32], #[case] message: &str) {
		let err = manager().decode_tag_ids(tag_ids, 42).unwrap_err();
		assert_eq!(err.to_string(), format!("malformed tile data at byte 42: {message}"));
	}
}
