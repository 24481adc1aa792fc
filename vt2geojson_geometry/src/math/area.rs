/// Returns twice the signed area of a ring of tile-local integer coordinates.
///
/// The sum is exact for coordinates in the 32-bit range of vector tiles. With the y axis pointing down, as in vector tiles, exterior rings have a
/// positive and holes a negative area.
pub fn area_ring(ring: &[[i64; 2]]) -> i128 {
	let mut sum = 0i128;
	if let Some(mut p2) = ring.last() {
		for p1 in ring {
			let dx = i128::from(p2[0]) - i128::from(p1[0]);
			sum += dx * (i128::from(p1[1]) + i128::from(p2[1]));
			p2 = p1;
		}
	}
	sum
}
