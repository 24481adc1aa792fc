use super::layer::VectorTileLayer;
use log::debug;

/// Chooses the layers of a tile that are converted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LayerSelector {
	/// Every layer, in tile order.
	#[default]
	All,
	/// The named layers, in the given order.
	Names(Vec<String>),
}

impl LayerSelector {
	/// An empty list selects all layers. Repeated names are reduced to their first occurrence.
	#[must_use]
	pub fn from_names(names: Vec<String>) -> LayerSelector {
		if names.is_empty() {
			return LayerSelector::All;
		}
		let mut unique: Vec<String> = Vec::with_capacity(names.len());
		for name in names {
			if !unique.contains(&name) {
				unique.push(name);
			}
		}
		LayerSelector::Names(unique)
	}

	/// Returns the selected layers. Requested names missing from the tile are skipped.
	pub fn select<'a>(&self, layers: &'a [VectorTileLayer]) -> Vec<&'a VectorTileLayer> {
		match self {
			LayerSelector::All => layers.iter().collect(),
			LayerSelector::Names(names) => names
				.iter()
				.filter_map(|name| {
					let layer = layers.iter().find(|layer| &layer.name == name);
					if layer.is_none() {
						debug!("layer '{name}' not found in tile");
					}
					layer
				})
				.collect(),
		}
	}

	/// Number of requested layers: all layers of the tile, or the number of distinct names.
	#[must_use]
	pub fn requested_count(&self, layers: &[VectorTileLayer]) -> usize {
		match self {
			LayerSelector::All => layers.len(),
			LayerSelector::Names(names) => names.len(),
		}
	}
}

impl From<&str> for LayerSelector {
	fn from(name: &str) -> Self {
		LayerSelector::Names(vec![name.to_string()])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn layers() -> Vec<VectorTileLayer> {
		["water", "roads", "poi"]
			.iter()
			.map(|name| VectorTileLayer::new((*name).to_string(), 4096, 1))
			.collect()
	}

	fn names(selected: &[&VectorTileLayer]) -> Vec<String> {
		selected.iter().map(|layer| layer.name.clone()).collect()
	}

	#[test]
	fn from_names() {
		assert_eq!(LayerSelector::from_names(vec![]), LayerSelector::All);
		assert_eq!(
			LayerSelector::from_names(vec![String::from("a"), String::from("b"), String::from("a")]),
			LayerSelector::Names(vec![String::from("a"), String::from("b")])
		);
		assert_eq!(LayerSelector::from("a"), LayerSelector::Names(vec![String::from("a")]));
	}

	#[test]
	fn select_all() {
		let layers = layers();
		assert_eq!(names(&LayerSelector::All.select(&layers)), vec!["water", "roads", "poi"]);
		assert_eq!(LayerSelector::All.requested_count(&layers), 3);
	}

	#[test]
	fn select_names_in_requested_order() {
		let layers = layers();
		let selector = LayerSelector::from_names(vec![
			String::from("poi"),
			String::from("missing"),
			String::from("water"),
		]);
		assert_eq!(names(&selector.select(&layers)), vec!["poi", "water"]);
		assert_eq!(selector.requested_count(&layers), 3);
		assert_eq!(LayerSelector::from("roads").requested_count(&layers), 1);
	}
}
