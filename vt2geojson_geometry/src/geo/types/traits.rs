use serde_json::Value;
use std::fmt::Debug;

/// Shared interface of all geometric primitives.
pub trait GeometryTrait: Debug + Clone + Sized {
	/// Converts the geometry into the JSON representation of its coordinates.
	/// Optionally rounds coordinate values to the given number of decimal places.
	fn to_coord_json(&self, precision: Option<u8>) -> Value;
}

/// Geometries that are collections of simpler elements, e.g. a polygon made of rings.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	fn new() -> Self;

	fn as_vec(&self) -> &Vec<Item>;

	fn as_mut_vec(&mut self) -> &mut Vec<Item>;

	fn into_inner(self) -> Vec<Item>;

	fn is_empty(&self) -> bool {
		self.as_vec().is_empty()
	}

	fn len(&self) -> usize {
		self.as_vec().len()
	}

	fn push(&mut self, item: Item) {
		self.as_mut_vec().push(item);
	}

	fn first(&self) -> Option<&Item> {
		self.as_vec().first()
	}
}

/// Implements [`CompositeGeometryTrait`] and [`GeometryTrait`] for a newtype over `Vec<Item>`.
#[macro_export]
macro_rules! impl_composite_geometry {
	($($t:ty,$i:ty),*) => {$(
		impl $crate::geo::CompositeGeometryTrait<$i> for $t {
			fn new() -> Self {
				Self(Vec::new())
			}
			fn as_vec(&self) -> &Vec<$i> {
				&self.0
			}
			fn as_mut_vec(&mut self) -> &mut Vec<$i> {
				&mut self.0
			}
			fn into_inner(self) -> Vec<$i> {
				self.0
			}
		}

		impl std::fmt::Debug for $t {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.debug_list().entries(&self.0).finish()
			}
		}
	)*}
}
