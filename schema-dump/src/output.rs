use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use crate::{Result, SchemaDumpError};

pub const SCHEMA_FILE_NAME: &str = "schema.sql";
pub const TABLES_FILE_NAME: &str = "tables.json";
pub const ORM_MODEL_FILE_NAME: &str = "orm_model.md";

/// The well-known files the commands write, all placed in one directory.
///
/// Every run overwrites whatever is already there.
#[derive(Debug, Clone)]
pub struct OutputFiles {
    directory: PathBuf,
}

impl OutputFiles {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn schema_sql(&self) -> PathBuf {
        self.directory.join(SCHEMA_FILE_NAME)
    }

    pub fn tables_json(&self) -> PathBuf {
        self.directory.join(TABLES_FILE_NAME)
    }

    pub fn orm_model(&self) -> PathBuf {
        self.directory.join(ORM_MODEL_FILE_NAME)
    }
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Creates or truncates `path` and writes `contents` to it.
pub(crate) async fn write_output_file(path: &Path, contents: &str) -> Result {
    let to_file_error = |source| SchemaDumpError::FileError {
        action: "write",
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).await.map_err(|source| SchemaDumpError::FileError {
        action: "create",
        path: path.to_path_buf(),
        source,
    })?;

    let mut file = BufWriter::new(file);
    file.write_all(contents.as_bytes()).await.map_err(to_file_error)?;
    file.flush().await.map_err(to_file_error)?;

    Ok(())
}

pub(crate) async fn read_output_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|source| SchemaDumpError::FileError {
        action: "read",
        path: path.to_path_buf(),
        source,
    })
}
