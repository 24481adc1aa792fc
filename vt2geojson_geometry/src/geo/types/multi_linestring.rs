use super::*;
use serde_json::Value;

#[derive(Clone, PartialEq)]
pub struct MultiLineStringGeometry(pub Vec<LineStringGeometry>);

impl GeometryTrait for MultiLineStringGeometry {
	fn to_coord_json(&self, precision: Option<u8>) -> Value {
		Value::from(self.0.iter().map(|l| l.to_coord_json(precision)).collect::<Vec<_>>())
	}
}

crate::impl_composite_geometry!(MultiLineStringGeometry, LineStringGeometry);
crate::impl_from_array!(MultiLineStringGeometry, LineStringGeometry);
