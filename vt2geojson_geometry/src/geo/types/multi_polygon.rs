use super::*;
use serde_json::Value;

#[derive(Clone, PartialEq)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> Value {
		Value::from(self.0.iter().map(|p| p.to_coord_json(precision)).collect::<Vec<_>>())
	}
}

crate::impl_composite_geometry!(MultiPolygonGeometry, PolygonGeometry);
crate::impl_from_array!(MultiPolygonGeometry, PolygonGeometry);
