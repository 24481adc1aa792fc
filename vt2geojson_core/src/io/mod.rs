//! Readers for raw tile sources and for the protobuf values inside a tile.
//!
//! - [`DataReaderFile`] and [`DataReaderHttp`] fetch a complete raw tile as a [`crate::Blob`].
//! - [`ValueReader`] and [`ValueReaderSlice`] decode protobuf primitives with absolute offsets.
//! - `ValueWriterBlob` (feature `test`) writes protobuf data to craft fixtures.

mod data_reader;
mod data_reader_file;
mod data_reader_http;
mod value_reader;
mod value_reader_slice;
#[cfg(any(test, feature = "test"))]
mod value_writer_blob;

pub use data_reader::*;
pub use data_reader_file::*;
pub use data_reader_http::*;
pub use value_reader::*;
pub use value_reader_slice::*;
#[cfg(any(test, feature = "test"))]
pub use value_writer_blob::*;
