use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::export::ExportArtifact;
use thiserror::Error;

const PICTURES_SUBDIR: &str = "Pictures";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("export file name is empty")]
    MissingFileName,
    #[error("export file name `{name}` must not contain path separators")]
    InvalidFileName { name: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Host-side save mechanism for exported images.
pub trait ExportStorage {
    fn save_export(&self, artifact: &ExportArtifact) -> StorageResult<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct StorageService {
    output_dir: PathBuf,
}

impl StorageService {
    pub const fn with_output_dir(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn with_default_paths() -> StorageResult<Self> {
        let home = std::env::var("HOME").map_err(|_| StorageError::MissingHomeDirectory)?;
        let mut output_dir = PathBuf::from(home);
        output_dir.push(PICTURES_SUBDIR);
        Ok(Self::with_output_dir(output_dir))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn validate_file_name(file_name: &str) -> StorageResult<()> {
        if file_name.is_empty() {
            return Err(StorageError::MissingFileName);
        }
        if file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
            return Err(StorageError::InvalidFileName {
                name: file_name.to_string(),
            });
        }
        Ok(())
    }

    pub fn allocate_target_path(&self, file_name: &str) -> StorageResult<PathBuf> {
        Self::validate_file_name(file_name)?;
        let mut path = self.output_dir.clone();
        path.push(file_name);
        Ok(path)
    }

    pub fn save_export(&self, artifact: &ExportArtifact) -> StorageResult<PathBuf> {
        let target = self.allocate_target_path(&artifact.file_name)?;
        write_overwrite(&target, &artifact.bytes)?;
        tracing::info!(
            path = %target.display(),
            format = %artifact.format,
            bytes = artifact.bytes.len(),
            "export saved"
        );
        Ok(target)
    }
}

impl ExportStorage for StorageService {
    fn save_export(&self, artifact: &ExportArtifact) -> StorageResult<PathBuf> {
        self.save_export(artifact)
    }
}

fn write_overwrite<D: AsRef<Path>>(destination: D, bytes: &[u8]) -> StorageResult<()> {
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(destination, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn scratch_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "paintboard-storage-{label}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn allocate_target_path_uses_artifact_file_name() {
        let service = StorageService::with_output_dir(PathBuf::from("/home/test/Pictures"));
        let path = service.allocate_target_path("1700000000000.png").unwrap();
        assert_eq!(path, PathBuf::from("/home/test/Pictures/1700000000000.png"));
    }

    #[test]
    fn allocate_target_path_rejects_empty_and_nested_names() {
        let service = StorageService::with_output_dir(PathBuf::from("/tmp"));
        assert!(matches!(
            service.allocate_target_path(""),
            Err(StorageError::MissingFileName)
        ));
        assert!(matches!(
            service.allocate_target_path("../escape.png"),
            Err(StorageError::InvalidFileName { .. })
        ));
    }

    #[test]
    fn save_export_creates_directory_and_overwrites() {
        let dir = scratch_dir("save");
        let service = StorageService::with_output_dir(dir.join("nested"));
        let at = UNIX_EPOCH + Duration::from_millis(42);

        let first = ExportArtifact::new(ExportFormat::Png, b"first".to_vec(), at).unwrap();
        let path = service.save_export(&first).unwrap();
        assert_eq!(path, dir.join("nested").join("42.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        let second = ExportArtifact::new(ExportFormat::Png, b"second".to_vec(), at).unwrap();
        let path = service.save_export(&second).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
