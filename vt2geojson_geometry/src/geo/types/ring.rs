use super::*;
use serde_json::Value;

/// A closed ring: the first and last position are identical.
/// Rings are the building blocks of polygons.
#[derive(Clone, PartialEq)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl GeometryTrait for RingGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> Value {
		Value::from(self.0.iter().map(|c| c.to_json(precision)).collect::<Vec<_>>())
	}
}

crate::impl_composite_geometry!(RingGeometry, Coordinates);
crate::impl_from_array!(RingGeometry, Coordinates);
