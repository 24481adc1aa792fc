use super::*;
use serde_json::Value;

#[derive(Clone, PartialEq)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> Value {
		Value::from(self.0.iter().map(|c| c.to_json(precision)).collect::<Vec<_>>())
	}
}

crate::impl_composite_geometry!(LineStringGeometry, Coordinates);
crate::impl_from_array!(LineStringGeometry, Coordinates);
