//! The conversion pipeline: fetch, decompress, decode, convert.

use crate::source::TileSource;
use anyhow::{Context, Result};
use log::debug;
use vt2geojson_core::{Blob, TileCoord, compression::decompress_tile};
use vt2geojson_geometry::{
	GeoCollection,
	vector_tile::{LayerSelector, VectorTile},
};

/// Options of a single conversion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertOptions {
	pub layers: LayerSelector,
	/// Tile address; taken from the URI if `None`.
	pub coord: Option<TileCoord>,
	/// Extra HTTP request headers.
	pub headers: Vec<(String, String)>,
}

/// Converts a raw, possibly compressed tile into a feature collection.
///
/// No I/O happens here; any error aborts the conversion.
pub fn read_tile(blob: &Blob, coord: &TileCoord, layers: &LayerSelector) -> Result<GeoCollection> {
	let blob = decompress_tile(blob.clone())?;
	let tile = VectorTile::from_blob(&blob).context("Failed to decode vector tile")?;
	debug!("decoded {} layers of tile {coord}", tile.layers.len());
	tile.to_geo_collection(coord, layers)
}

/// Reads the tile at `uri` and converts it.
///
/// The address is resolved before anything is read.
pub async fn convert(uri: &str, options: &ConvertOptions) -> Result<GeoCollection> {
	let coord = match options.coord {
		Some(coord) => coord,
		None => TileSource::address_from_uri(uri)?,
	};
	let source = TileSource::parse(uri)?;
	let blob = source.read(&options.headers).await?;
	read_tile(&blob, &coord, &options.layers).with_context(|| format!("Failed to convert tile {coord} from '{uri}'"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::fs;
	use tokio::{
		io::{AsyncReadExt, AsyncWriteExt},
		net::TcpListener,
	};
	use vt2geojson_core::{
		DecodeError,
		compression::{compress_gzip, compress_zlib},
	};
	use vt2geojson_geometry::{
		GeoValue,
		vector_tile::test_utils::{GeometryEncoder, TestFeature, TestLayer, build_tile},
	};

	fn sample_tile() -> Result<Blob> {
		let line = GeometryEncoder::new().move_to(&[[0, 0]]).line_to(&[[4096, 4096]]).into_commands();
		let ring = GeometryEncoder::new()
			.ring(&[[0, 0], [2048, 0], [2048, 2048], [0, 2048], [0, 0]])
			.into_commands();
		build_tile(&[
			TestLayer::new("roads")
				.with_key("class")
				.with_value(GeoValue::from("primary"))
				.with_feature(TestFeature::new(2, line).with_tags(&[0, 0]).with_id(1)),
			TestLayer::new("water").with_feature(TestFeature::new(3, ring)),
		])
	}

	#[test]
	fn compression_is_transparent() -> Result<()> {
		let coord = TileCoord::new(3, 4, 2)?;
		let plain = sample_tile()?;
		let expected = read_tile(&plain, &coord, &LayerSelector::All)?;
		assert_eq!(expected.features.len(), 2);

		for compressed in [compress_zlib(&plain)?, compress_gzip(&plain)?] {
			assert_ne!(compressed, plain);
			assert_eq!(read_tile(&compressed, &coord, &LayerSelector::All)?, expected);
		}
		Ok(())
	}

	#[test]
	fn corrupt_envelope() -> Result<()> {
		let mut data = compress_gzip(&sample_tile()?)?.into_vec();
		data.truncate(data.len() / 2);
		let err = read_tile(&Blob::from(data), &TileCoord::new(0, 0, 0)?, &LayerSelector::All).unwrap_err();
		assert!(matches!(DecodeError::find(&err), Some(DecodeError::Compression { .. })));
		Ok(())
	}

	#[test]
	fn layer_selection() -> Result<()> {
		let coord = TileCoord::new(0, 0, 0)?;
		let collection = read_tile(&sample_tile()?, &coord, &LayerSelector::from("water"))?;
		assert_eq!(collection.features.len(), 1);
		assert_eq!(collection.features[0].geometry.get_type(), "Polygon");
		assert!(collection.features[0].properties.is_empty());

		let collection = read_tile(&sample_tile()?, &coord, &LayerSelector::All)?;
		assert_eq!(collection.features[0].properties.get("vt_layer"), Some(&GeoValue::from("roads")));
		assert_eq!(collection.features[0].properties.get("class"), Some(&GeoValue::from("primary")));
		Ok(())
	}

	#[tokio::test]
	async fn convert_file_with_address_in_path() -> Result<()> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("2/1/3.pbf");
		fs::create_dir_all(path.parent().unwrap())?;
		fs::write(&path, compress_gzip(&sample_tile()?)?.as_slice())?;

		let uri = path.to_str().unwrap();
		let collection = convert(uri, &ConvertOptions::default()).await?;
		assert_eq!(
			collection,
			read_tile(&sample_tile()?, &TileCoord::new(2, 1, 3)?, &LayerSelector::All)?
		);

		let options = ConvertOptions {
			coord: Some(TileCoord::new(0, 0, 0)?),
			..ConvertOptions::default()
		};
		assert_eq!(
			convert(&format!("file://{uri}"), &options).await?,
			read_tile(&sample_tile()?, &TileCoord::new(0, 0, 0)?, &LayerSelector::All)?
		);
		Ok(())
	}

	#[tokio::test]
	async fn convert_without_address_fails_before_reading() {
		let err = convert("/does/not/exist.pbf", &ConvertOptions::default()).await.unwrap_err();
		assert_eq!(
			DecodeError::find(&err),
			Some(&DecodeError::MissingAddress(String::from("/does/not/exist.pbf")))
		);
	}

	#[tokio::test]
	async fn convert_http() -> Result<()> {
		let tile = sample_tile()?;
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let uri = format!("http://{}/tiles/1/0/1.pbf", listener.local_addr()?);
		let body = tile.as_slice().to_vec();
		let server = tokio::spawn(async move {
			let (mut socket, _) = listener.accept().await?;
			let mut request = Vec::new();
			let mut buffer = [0u8; 1024];
			while !request.ends_with(b"\r\n\r\n") {
				let n = socket.read(&mut buffer).await?;
				if n == 0 {
					break;
				}
				request.extend_from_slice(&buffer[..n]);
			}
			let head = format!("HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n", body.len());
			socket.write_all(head.as_bytes()).await?;
			socket.write_all(&body).await?;
			socket.shutdown().await?;
			anyhow::Ok(String::from_utf8(request)?)
		});

		let options = ConvertOptions {
			layers: LayerSelector::from("roads"),
			headers: vec![(String::from("Authorization"), String::from("Bearer token"))],
			..ConvertOptions::default()
		};
		let collection = convert(&uri, &options).await?;
		assert_eq!(
			collection,
			read_tile(&tile, &TileCoord::new(1, 0, 1)?, &LayerSelector::from("roads"))?
		);

		let request = server.await??.to_lowercase();
		assert!(request.contains("authorization: bearer token"));
		Ok(())
	}
}
