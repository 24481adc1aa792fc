//! This module defines the `DataReaderTrait` for fetching raw tile bytes from a source.
//!
//! # Examples
//!
//! ```rust
//! use vt2geojson_core::{io::{DataReader, DataReaderTrait}, Blob};
//! use anyhow::Result;
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct MockDataReader {
//!     data: Vec<u8>,
//! }
//!
//! #[async_trait]
//! impl DataReaderTrait for MockDataReader {
//!     async fn read_all(&self) -> Result<Blob> {
//!         Ok(Blob::from(self.data.clone()))
//!     }
//!
//!     fn get_name(&self) -> &str {
//!         "MockDataReader"
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let reader: DataReader = Box::new(MockDataReader { data: vec![1, 2, 3] });
//!     assert_eq!(reader.read_all().await?.as_slice(), &[1, 2, 3]);
//!     Ok(())
//! }
//! ```

use crate::Blob;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Type alias for a boxed dynamic implementation of the `DataReaderTrait`.
pub type DataReader = Box<dyn DataReaderTrait>;

/// A source that delivers one complete raw tile.
#[async_trait]
pub trait DataReaderTrait: Debug + Send + Sync {
	/// Reads all the data from the source.
	async fn read_all(&self) -> Result<Blob>;

	/// Gets the name of the data source, e.g. a path or URL.
	fn get_name(&self) -> &str;
}
