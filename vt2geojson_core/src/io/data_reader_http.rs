//! This module provides functionality for fetching a raw tile from an HTTP(S) endpoint.
//!
//! # Overview
//!
//! `DataReaderHttp` sends a single GET request with optional extra headers and accepts only a
//! `200 OK` response. Transport-level gzip is negotiated and removed by `reqwest`; a tile that
//! is itself compressed is handled later by the decompression detector.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vt2geojson_core::io::{DataReaderHttp, DataReaderTrait};
//! use anyhow::Result;
//! use reqwest::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let url = Url::parse("https://example.com/tiles/14/8800/5373.pbf")?;
//!     let headers = vec![(String::from("Authorization"), String::from("Bearer secret"))];
//!     let reader = DataReaderHttp::from_url(url, &headers)?;
//!     println!("Read {} bytes", reader.read_all().await?.len());
//!     Ok(())
//! }
//! ```

use super::DataReaderTrait;
use crate::Blob;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
	Client, StatusCode, Url,
	header::{HeaderMap, HeaderName, HeaderValue},
};
use std::time::Duration;
use tokio::time::sleep;

const MAX_RETRIES: u32 = 3;

/// A struct that provides reading capabilities from an HTTP(S) endpoint.
#[derive(Debug)]
pub struct DataReaderHttp {
	client: Client,
	name: String,
	url: Url,
}

impl DataReaderHttp {
	/// Creates a `DataReaderHttp` from a URL and extra request headers.
	///
	/// # Errors
	/// Returns an error for schemes other than `http`/`https`, for invalid header names or
	/// values, and if the HTTP client cannot be built.
	pub fn from_url(url: Url, headers: &[(String, String)]) -> Result<Box<DataReaderHttp>> {
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in '{url}', expected 'http' or 'https'"),
		}

		let mut header_map = HeaderMap::new();
		for (name, value) in headers {
			let name = HeaderName::from_bytes(name.as_bytes()).with_context(|| format!("invalid header name '{name}'"))?;
			let value = HeaderValue::from_str(value).with_context(|| format!("invalid value for header '{name}'"))?;
			header_map.append(name, value);
		}

		let client = Client::builder()
			.default_headers(header_map)
			.gzip(true)
			.tcp_keepalive(Duration::from_secs(600))
			.build()?;

		Ok(Box::new(DataReaderHttp {
			client,
			name: url.to_string(),
			url,
		}))
	}
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
	err.is_connect() || err.is_timeout() || err.is_body()
}

#[async_trait]
impl DataReaderTrait for DataReaderHttp {
	/// Fetches the tile.
	///
	/// Connection failures, timeouts and broken bodies are retried with exponential backoff.
	/// A `401` is reported as `Invalid Token`, any other status except `200` as an error naming
	/// the URL and the status code.
	async fn read_all(&self) -> Result<Blob> {
		for attempt in 0..=MAX_RETRIES {
			if attempt > 0 {
				let backoff = Duration::from_secs(1 << (attempt - 1));
				warn!(
					"retry attempt {attempt}/{MAX_RETRIES} reading from '{}', waiting {backoff:?}",
					self.url
				);
				sleep(backoff).await;
			}

			let response = match self.client.get(self.url.clone()).send().await {
				Ok(r) => r,
				Err(e) if is_retryable_error(&e) && attempt < MAX_RETRIES => {
					warn!("retryable error: {e}");
					continue;
				}
				Err(e) => return Err(e).with_context(|| format!("requesting '{}'", self.url)),
			};

			match response.status() {
				StatusCode::OK => (),
				StatusCode::UNAUTHORIZED => bail!("Invalid Token"),
				status => bail!(
					"Error retrieving data from \"{}\". Server responded with code: {}",
					self.url,
					status.as_u16()
				),
			}

			let bytes = match response.bytes().await {
				Ok(b) => b,
				Err(e) if is_retryable_error(&e) && attempt < MAX_RETRIES => {
					warn!("retryable error reading response body: {e}");
					continue;
				}
				Err(e) => return Err(e).with_context(|| format!("reading response body of '{}'", self.url)),
			};

			debug!("received {} bytes from '{}'", bytes.len(), self.url);
			return Ok(Blob::from(&*bytes));
		}

		bail!("request failed after {MAX_RETRIES} retries")
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokio::{
		io::{AsyncReadExt, AsyncWriteExt},
		net::TcpListener,
	};

	/// Serves a single canned HTTP response and returns the request it received.
	async fn serve_once(response: &'static [u8]) -> Result<(Url, tokio::task::JoinHandle<Result<String>>)> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let url = Url::parse(&format!("http://{}/3/4/5.pbf", listener.local_addr()?))?;
		let handle = tokio::spawn(async move {
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
			socket.write_all(response).await?;
			socket.shutdown().await?;
			Ok(String::from_utf8(request)?)
		});
		Ok((url, handle))
	}

	#[test]
	fn from_url_checks_scheme_and_headers() {
		let valid_url = Url::parse("https://www.example.com/0/0/0").unwrap();
		let invalid_url = Url::parse("ftp://www.example.com/0/0/0").unwrap();

		assert!(DataReaderHttp::from_url(valid_url.clone(), &[]).is_ok());
		assert!(DataReaderHttp::from_url(invalid_url, &[]).is_err());

		let bad_header = vec![(String::from("bad header"), String::from("x"))];
		let err = DataReaderHttp::from_url(valid_url, &bad_header).unwrap_err();
		assert_eq!(err.to_string(), "invalid header name 'bad header'");
	}

	#[tokio::test]
	async fn read_all_sends_headers() -> Result<()> {
		let (url, server) = serve_once(b"HTTP/1.1 200 OK\r\ncontent-length: 3\r\nconnection: close\r\n\r\nabc").await?;
		let headers = vec![(String::from("X-Api-Key"), String::from("secret"))];
		let reader = DataReaderHttp::from_url(url, &headers)?;

		assert_eq!(reader.read_all().await?.as_slice(), b"abc");

		let request = server.await??.to_lowercase();
		assert!(request.starts_with("get /3/4/5.pbf http/1.1"));
		assert!(request.contains("x-api-key: secret"));
		Ok(())
	}

	#[tokio::test]
	async fn read_all_reports_invalid_token() -> Result<()> {
		let (url, _server) =
			serve_once(b"HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\nconnection: close\r\n\r\n").await?;
		let err = DataReaderHttp::from_url(url, &[])?.read_all().await.unwrap_err();
		assert_eq!(err.to_string(), "Invalid Token");
		Ok(())
	}

	#[tokio::test]
	async fn read_all_reports_status_code() -> Result<()> {
		let (url, _server) =
			serve_once(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n").await?;
		let err = DataReaderHttp::from_url(url.clone(), &[])?.read_all().await.unwrap_err();
		assert_eq!(
			err.to_string(),
			format!("Error retrieving data from \"{url}\". Server responded with code: 404")
		);
		Ok(())
	}
}
