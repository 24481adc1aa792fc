use vt2geojson_core::DecodeError;

/// The geometry type of a vector tile feature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeomType {
	Point = 1,
	LineString = 2,
	Polygon = 3,
}

impl TryFrom<u64> for GeomType {
	type Error = DecodeError;

	/// Maps the wire value; `0` (UNKNOWN) and anything above `3` are unsupported.
	fn try_from(value: u64) -> Result<Self, Self::Error> {
		match value {
			1 => Ok(GeomType::Point),
			2 => Ok(GeomType::LineString),
			3 => Ok(GeomType::Polygon),
			other => Err(DecodeError::UnsupportedGeometry(other)),
		}
	}
}
