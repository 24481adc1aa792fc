use crate::geo::GeoValue;
use anyhow::{Context, Result};
use byteorder::LE;
use vt2geojson_core::{DecodeError, io::ValueReader};

/// Decoding of a `Value` message from a layer's value dictionary.
pub trait GeoValuePBF<'a> {
	fn read(reader: &mut dyn ValueReader<'a, LE>) -> Result<GeoValue>;
}

impl<'a> GeoValuePBF<'a> for GeoValue {
	/// Reads one value. If the message sets several value fields, the last one wins.
	#[allow(clippy::cast_possible_wrap)]
	fn read(reader: &mut dyn ValueReader<'a, LE>) -> Result<GeoValue> {
		use GeoValue::*;
		let start = reader.absolute_position();
		let mut value: Option<GeoValue> = None;

		while reader.has_remaining() {
			let position = reader.absolute_position();
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, 2) => value = Some(String(reader.read_pbf_string().context("Failed to read string value")?)),
				(2, 5) => value = Some(Double(f64::from(reader.read_f32().context("Failed to read f32 value")?))),
				(3, 1) => value = Some(Double(reader.read_f64().context("Failed to read f64 value")?)),
				(4, 0) => {
					value = Some(Int(
						reader.read_varint().context("Failed to read varint for int value")? as i64,
					));
				}
				(5, 0) => value = Some(UInt(reader.read_varint().context("Failed to read varint for uint value")?)),
				(6, 0) => value = Some(Int(reader.read_svarint().context("Failed to read svarint value")?)),
				(7, 0) => value = Some(Bool(reader.read_varint().context("Failed to read varint for bool value")? != 0)),
				(f @ 1..=7, w) => {
					return Err(DecodeError::malformed(
						position,
						format!("unexpected wire type {w} for value field {f}"),
					));
				}
				(_, w) => reader.skip_pbf_field(w).context("Failed to skip unknown value field")?,
			}
		}

		value.ok_or_else(|| DecodeError::malformed(start, "value message without a value"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use vt2geojson_core::io::ValueReaderSlice;

	fn read(data: &[u8]) -> Result<GeoValue> {
		GeoValue::read(&mut ValueReaderSlice::new_le(data))
	}

	#[rstest]
	#[case(&[0x0A, 0x05, b'h', b'e', b'l', b'l', b'o'], GeoValue::from("hello"))]
	#[case(&[0x15, 0x00, 0x00, 0x80, 0x3F], GeoValue::Double(1.0))]
	#[case(&[0x19, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F], GeoValue::Double(1.0))]
	#[case(&[0x20, 0x96, 0x01], GeoValue::Int(150))]
	#[case(&[0x20, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01], GeoValue::Int(-1))]
	#[case(&[0x28, 0x96, 0x01], GeoValue::UInt(150))]
	#[case(&[0x30, 0x96, 0x01], GeoValue::Int(75))]
	#[case(&[0x30, 0x03], GeoValue::Int(-2))]
	#[case(&[0x30, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01], GeoValue::Int(i64::MAX))]
	#[case(&[0x30, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01], GeoValue::Int(i64::MIN))]
	#[case(&[0x38, 0x01], GeoValue::Bool(true))]
	#[case(&[0x38, 0x00], GeoValue::Bool(false))]
	fn read_value(#[case] data: &[u8], #[case] expected: GeoValue) -> Result<()> {
		assert_eq!(read(data)?, expected);
		Ok(())
	}

	#[test]
	fn float_is_widened_to_double() -> Result<()> {
		let GeoValue::Double(v) = read(&[0x15, 0xCD, 0xCC, 0x8C, 0x3F])? else {
			panic!("expected a double")
		};
		approx::assert_abs_diff_eq!(v, 1.1, epsilon = 1e-6);
		Ok(())
	}

	#[test]
	fn last_field_wins() -> Result<()> {
		assert_eq!(read(&[0x28, 0x05, 0x38, 0x01])?, GeoValue::Bool(true));
		assert_eq!(read(&[0x38, 0x01, 0x0A, 0x01, b'a'])?, GeoValue::from("a"));
		Ok(())
	}

	#[test]
	fn unknown_fields_are_skipped() -> Result<()> {
		// field 9 (varint) and field 10 (length-delimited) before a uint
		assert_eq!(read(&[0x48, 0x07, 0x52, 0x02, 0xAA, 0xBB, 0x28, 0x2A])?, GeoValue::UInt(42));
		Ok(())
	}

	#[rstest]
	#[case(&[], 0, "value message without a value")]
	#[case(&[0x48, 0x01], 0, "value message without a value")]
	#[case(&[0x28, 0x01, 0x08, 0x01], 2, "unexpected wire type 0 for value field 1")]
	#[case(&[0x0A, 0x05, b'h', b'i'], 2, "blob needs 5 bytes, but only 2 bytes are left")]
	#[case(&[0x0A, 0x02, 0xC3, 0x28], 2, "invalid UTF-8 in string")]
	#[case(&[0x4B], 1, "unsupported wire type 3")]
	fn malformed_values(#[case] data: &[u8], #[case] offset: u64, #[case] message: &str) {
		let err = read(data).unwrap_err();
		assert_eq!(
			DecodeError::find(&err),
			Some(&DecodeError::Malformed {
				offset,
				message: message.to_string()
			})
		);
	}
}
