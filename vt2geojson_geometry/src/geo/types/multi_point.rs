use super::*;
use serde_json::Value;

#[derive(Clone, PartialEq)]
pub struct MultiPointGeometry(pub Vec<PointGeometry>);

impl GeometryTrait for MultiPointGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> Value {
		Value::from(self.0.iter().map(|p| p.to_coord_json(precision)).collect::<Vec<_>>())
	}
}

crate::impl_composite_geometry!(MultiPointGeometry, PointGeometry);
crate::impl_from_array!(MultiPointGeometry, PointGeometry);
