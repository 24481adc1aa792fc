//! Where a tile comes from and which address it has.
//!
//! A source URI is either an `http(s)://` URL, a `file://` URI or a plain path. When no address
//! is given explicitly, it is taken from the first `/{z}/{x}/{y}` triple in the URI.

use anyhow::{Context, Result, bail};
use log::debug;
use regex::Regex;
use reqwest::Url;
use std::path::PathBuf;
use vt2geojson_core::{
	Blob, DecodeError, TileCoord,
	io::{DataReader, DataReaderFile, DataReaderHttp},
};

/// A location a raw tile can be read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileSource {
	Http(Url),
	File(PathBuf),
}

impl TileSource {
	/// Classifies `uri`. `file://host/path` refers to the local path `host/path`.
	pub fn parse(uri: &str) -> Result<TileSource> {
		if uri.starts_with("http://") || uri.starts_with("https://") {
			let url = Url::parse(uri).with_context(|| format!("invalid URL '{uri}'"))?;
			return Ok(TileSource::Http(url));
		}
		if let Some(path) = uri.strip_prefix("file://") {
			return Ok(TileSource::File(PathBuf::from(path)));
		}
		Ok(TileSource::File(PathBuf::from(uri)))
	}

	/// Extracts the tile address from the first `/{z}/{x}/{y}` triple of `uri`.
	///
	/// # Errors
	/// Fails with [`DecodeError::MissingAddress`] if there is no such triple, and if the
	/// numbers do not form a valid address.
	pub fn address_from_uri(uri: &str) -> Result<TileCoord> {
		let missing = || anyhow::Error::new(DecodeError::MissingAddress(uri.to_string()));

		let address = Regex::new(r"/(\d+)/(\d+)/(\d+)")?;
		let captures = address.captures(uri).ok_or_else(missing)?;
		let (Ok(z), Ok(x), Ok(y)) = (captures[1].parse::<u8>(), captures[2].parse::<u32>(), captures[3].parse::<u32>())
		else {
			return Err(missing());
		};
		debug!("tile address {z}/{x}/{y} taken from '{uri}'");
		TileCoord::new(z, x, y).map_err(|e| missing().context(e.to_string()))
	}

	/// Opens a reader for this source. `headers` are only sent to HTTP sources.
	pub fn reader(&self, headers: &[(String, String)]) -> Result<DataReader> {
		let reader: DataReader = match self {
			TileSource::Http(url) => DataReaderHttp::from_url(url.clone(), headers)?,
			TileSource::File(path) => DataReaderFile::open(path)?,
		};
		Ok(reader)
	}

	/// Reads the complete raw tile.
	pub async fn read(&self, headers: &[(String, String)]) -> Result<Blob> {
		let reader = self.reader(headers)?;
		reader
			.read_all()
			.await
			.with_context(|| format!("Failed to read tile from '{}'", reader.get_name()))
	}
}

/// Parses a `Name: Value` header argument.
pub fn parse_header(header: &str) -> Result<(String, String)> {
	let Some((name, value)) = header.split_once(':') else {
		bail!("invalid header '{header}', expected 'Name: Value'");
	};
	let name = name.trim();
	if name.is_empty() {
		bail!("invalid header '{header}', the name is empty");
	}
	Ok((name.to_string(), value.trim().to_string()))
}
