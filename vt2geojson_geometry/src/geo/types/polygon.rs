use super::*;
use serde_json::Value;

/// A polygon: the exterior ring followed by its holes.
#[derive(Clone, PartialEq)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl GeometryTrait for PolygonGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> Value {
		Value::from(self.0.iter().map(|r| r.to_coord_json(precision)).collect::<Vec<_>>())
	}
}

crate::impl_composite_geometry!(PolygonGeometry, RingGeometry);
crate::impl_from_array!(PolygonGeometry, RingGeometry);
