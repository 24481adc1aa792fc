//! This module provides `DataReaderFile` for reading a raw tile from a local file.

use super::DataReaderTrait;
use crate::Blob;
use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use std::{
	fs::File,
	io::{Read, Seek, SeekFrom},
	path::Path,
};

/// Reads a complete file.
#[derive(Debug)]
pub struct DataReaderFile {
	name: String,
	file: File,
	size: u64,
}

impl DataReaderFile {
	/// Opens a file and creates a `DataReaderFile` instance.
	///
	/// # Errors
	/// Returns an error if the path does not exist or is not a regular file.
	pub fn open(path: &Path) -> Result<Box<DataReaderFile>> {
		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_file(), "path {path:?} must be a file");

		let file = File::open(path).with_context(|| format!("failed to open file {path:?}"))?;
		let size = file.metadata()?.len();

		Ok(Box::new(DataReaderFile {
			name: path.to_string_lossy().into_owned(),
			file,
			size,
		}))
	}
}

#[async_trait]
impl DataReaderTrait for DataReaderFile {
	async fn read_all(&self) -> Result<Blob> {
		let mut buffer = Vec::with_capacity(usize::try_from(self.size)?);
		let mut file = self
			.file
			.try_clone()
			.with_context(|| format!("failed to clone file '{}'", self.name))?;
		file
			.seek(SeekFrom::Start(0))
			.with_context(|| format!("failed to seek to start of file '{}'", self.name))?;
		file
			.read_to_end(&mut buffer)
			.with_context(|| format!("failed to read all {} bytes from file '{}'", self.size, self.name))?;
		Ok(Blob::from(buffer))
	}

	fn get_name(&self) -> &str {
		&self.name
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[tokio::test]
	async fn read_all() -> Result<()> {
		let mut temp_file = NamedTempFile::new()?;
		temp_file.write_all(&[0x1a, 0x00, 0xff])?;

		let reader = DataReaderFile::open(temp_file.path())?;
		assert_eq!(reader.read_all().await?.as_slice(), &[0x1a, 0x00, 0xff]);
		// reading twice starts from the beginning again
		assert_eq!(reader.read_all().await?.len(), 3);
		assert_eq!(reader.get_name(), temp_file.path().to_string_lossy());
		Ok(())
	}

	#[test]
	fn open_rejects_missing_files_and_directories() -> Result<()> {
		let dir = tempfile::tempdir()?;

		let err = DataReaderFile::open(&dir.path().join("missing.pbf")).unwrap_err();
		assert!(err.to_string().ends_with("does not exist"));

		let err = DataReaderFile::open(dir.path()).unwrap_err();
		assert!(err.to_string().ends_with("must be a file"));
		Ok(())
	}
}
