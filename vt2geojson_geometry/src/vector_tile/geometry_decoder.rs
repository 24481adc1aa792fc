//! Reconstruction of feature geometries from the vector tile command stream.
//!
//! A geometry is a packed sequence of command integers `(count << 3) | id`, each followed by
//! `count` zigzag-encoded `(dx, dy)` pairs for `MoveTo` (1) and `LineTo` (2), or by nothing for
//! `ClosePath` (7). The cursor starts at `(0, 0)` for every feature and keeps its position
//! across commands. Decoding yields tile-local integer coordinates; projection to longitude
//! and latitude happens in [`TileGeometry::into_geometry`].

use super::geometry_type::GeomType;
use crate::{geo::*, math::area_ring};
use anyhow::{Context, Result};
use byteorder::LE;
use log::trace;
use std::{cmp::Ordering, mem::take};
use vt2geojson_core::{DecodeError, io::ValueReader};

const MOVE_TO: u64 = 1;
const LINE_TO: u64 = 2;
const CLOSE_PATH: u64 = 7;

/// A position in the local coordinate space of a layer.
pub type TilePoint = [i64; 2];

/// Decoder state threaded through the command steps of one feature.
#[derive(Debug, Default, PartialEq)]
pub struct GeometryCursor {
	pub x: i64,
	pub y: i64,
	/// Finished coordinate sequences.
	pub sequences: Vec<Vec<TilePoint>>,
	/// The sequence currently being built.
	pub current: Vec<TilePoint>,
}

impl GeometryCursor {
	/// Moves the cursor by `(dx, dy)`. Positions are limited to the 32-bit range of the format.
	fn advance(&mut self, dx: i64, dy: i64) -> bool {
		let step = |from: i64, delta: i64| {
			from
				.checked_add(delta)
				.filter(|v| i32::try_from(*v).is_ok())
		};
		match (step(self.x, dx), step(self.y, dy)) {
			(Some(x), Some(y)) => {
				self.x = x;
				self.y = y;
				true
			}
			_ => false,
		}
	}

	/// Starts a new sequence at the cursor moved by `(dx, dy)`. Returns `false` if the new
	/// position is out of range.
	pub fn move_to(&mut self, dx: i64, dy: i64) -> bool {
		if !self.advance(dx, dy) {
			return false;
		}
		if !self.current.is_empty() {
			self.sequences.push(take(&mut self.current));
		}
		self.current.push([self.x, self.y]);
		true
	}

	/// Appends the cursor moved by `(dx, dy)` to the current sequence. Returns `false` if the
	/// new position is out of range.
	pub fn line_to(&mut self, dx: i64, dy: i64) -> bool {
		if !self.advance(dx, dy) {
			return false;
		}
		self.current.push([self.x, self.y]);
		true
	}

	/// Closes the current sequence by repeating its first point. Returns `false` if there is
	/// nothing to close.
	pub fn close_path(&mut self) -> bool {
		match self.current.first() {
			Some(first) => {
				let first = *first;
				self.current.push(first);
				true
			}
			None => false,
		}
	}

	/// Returns all sequences, including the one still being built.
	pub fn finish(mut self) -> Vec<Vec<TilePoint>> {
		if !self.current.is_empty() {
			self.sequences.push(self.current);
		}
		self.sequences
	}
}

/// A decoded geometry in tile-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum TileGeometry {
	Points(Vec<TilePoint>),
	LineStrings(Vec<Vec<TilePoint>>),
	/// Each polygon is an exterior ring followed by its holes.
	Polygons(Vec<Vec<Vec<TilePoint>>>),
}

impl TileGeometry {
	/// Projects every position with `project` and picks the single or multi variant by the
	/// number of members.
	pub fn into_geometry<F>(self, project: F) -> Geometry
	where
		F: Fn(TilePoint) -> [f64; 2],
	{
		let line = |points: Vec<TilePoint>| -> Vec<[f64; 2]> { points.into_iter().map(&project).collect() };

		let geometry = match self {
			TileGeometry::Points(points) => Geometry::new_multi_point(line(points)),
			TileGeometry::LineStrings(lines) => Geometry::new_multi_line_string(lines.into_iter().map(line).collect()),
			TileGeometry::Polygons(polygons) => Geometry::new_multi_polygon(
				polygons
					.into_iter()
					.map(|rings| rings.into_iter().map(line).collect())
					.collect(),
			),
		};
		geometry.into_single_if_possible()
	}
}

fn read_delta(reader: &mut dyn ValueReader<'_, LE>) -> Result<(i64, i64)> {
	let mut delta = [0i64; 2];
	for value in &mut delta {
		if !reader.has_remaining() {
			return Err(reader.malformed("incomplete coordinate pair"));
		}
		*value = reader.read_svarint().context("Failed to read coordinate delta")?;
	}
	Ok((delta[0], delta[1]))
}

/// Decodes the command stream in `reader` into tile-local coordinates.
///
/// # Errors
/// Fails with [`DecodeError::Malformed`] if the command stream is invalid for `geom_type`.
pub fn decode_geometry(geom_type: GeomType, reader: &mut dyn ValueReader<'_, LE>) -> Result<TileGeometry> {
	let start = reader.absolute_position();
	let mut cursor = GeometryCursor::default();

	while reader.has_remaining() {
		let position = reader.absolute_position();
		let command = reader.read_varint().context("Failed to read geometry command")?;
		let count = command >> 3;

		match command & 0x7 {
			MOVE_TO => {
				for _ in 0..count {
					let (dx, dy) = read_delta(reader)?;
					if !cursor.move_to(dx, dy) {
						return Err(DecodeError::malformed(position, "coordinate out of range"));
					}
				}
			}
			LINE_TO => {
				if geom_type == GeomType::Point {
					return Err(DecodeError::malformed(position, "LineTo in a point geometry"));
				}
				if cursor.current.is_empty() {
					return Err(DecodeError::malformed(position, "LineTo without preceding MoveTo"));
				}
				for _ in 0..count {
					let (dx, dy) = read_delta(reader)?;
					if !cursor.line_to(dx, dy) {
						return Err(DecodeError::malformed(position, "coordinate out of range"));
					}
				}
			}
			CLOSE_PATH => {
				if geom_type != GeomType::Polygon {
					return Err(DecodeError::malformed(position, "ClosePath in a non-polygon geometry"));
				}
				if count != 1 {
					return Err(DecodeError::malformed(
						position,
						format!("ClosePath must have a count of 1, found {count}"),
					));
				}
				if !cursor.close_path() {
					return Err(DecodeError::malformed(position, "ClosePath on an empty sequence"));
				}
			}
			other => return Err(DecodeError::malformed(position, format!("unknown command {other}"))),
		}
	}

	let sequences = cursor.finish();
	if sequences.is_empty() {
		return Err(DecodeError::malformed(start, "empty geometry"));
	}

	match geom_type {
		GeomType::Point => Ok(TileGeometry::Points(sequences.into_iter().flatten().collect())),
		GeomType::LineString => {
			if let Some(line) = sequences.iter().find(|line| line.len() < 2) {
				return Err(DecodeError::malformed(
					start,
					format!("linestring must have at least 2 points, found {}", line.len()),
				));
			}
			Ok(TileGeometry::LineStrings(sequences))
		}
		GeomType::Polygon => classify_rings(sequences, start).map(TileGeometry::Polygons),
	}
}

/// Groups rings into polygons. The winding of the first ring with an area marks exterior
/// rings: a ring with that winding starts a new polygon, a ring with the opposite winding is a
/// hole of the preceding one. Rings without area are dropped, unless the polygon has only one
/// ring.
fn classify_rings(rings: Vec<Vec<TilePoint>>, offset: u64) -> Result<Vec<Vec<Vec<TilePoint>>>> {
	for ring in &rings {
		if ring.len() < 4 {
			return Err(DecodeError::malformed(
				offset,
				format!("polygon ring must have at least 4 points, found {}", ring.len()),
			));
		}
		if ring.first() != ring.last() {
			return Err(DecodeError::malformed(offset, "polygon ring is not closed"));
		}
	}
	if rings.len() == 1 {
		return Ok(vec![rings]);
	}

	let mut polygons: Vec<Vec<Vec<TilePoint>>> = Vec::new();
	let mut exterior = None;
	for ring in rings {
		let winding = area_ring(&ring).cmp(&0);
		if winding == Ordering::Equal {
			trace!("skipping ring with zero area: {ring:?}");
			continue;
		}
		if *exterior.get_or_insert(winding) == winding {
			polygons.push(vec![ring]);
		} else if let Some(polygon) = polygons.last_mut() {
			polygon.push(ring);
		}
	}

	if polygons.is_empty() {
		return Err(DecodeError::malformed(offset, "polygon without a ring of non-zero area"));
	}
	Ok(polygons)
}
