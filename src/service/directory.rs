use super::FileCollectionService;
use crate::error::ServiceError;
use crate::model::{CreateFilesPayload, StoredFile};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const MANIFEST_FILE: &str = "index.json";

/// Stores file blobs as `<uuid>.<ext>` in a single directory, with their
/// metadata in an `index.json` manifest next to them.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    root: PathBuf,
}

impl DirectoryService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    async fn read_manifest(&self) -> Result<Vec<StoredFile>, ServiceError> {
        let path = self.root.join(MANIFEST_FILE);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Written to a temp file then renamed so a crash never leaves a torn manifest.
    async fn write_manifest(&self, entries: &[StoredFile]) -> Result<(), ServiceError> {
        fs::create_dir_all(&self.root).await?;
        let tmp = self.root.join(format!("{}.tmp", MANIFEST_FILE));
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, self.root.join(MANIFEST_FILE)).await?;
        Ok(())
    }

    async fn remove_blob(&self, name: &str) -> Result<(), ServiceError> {
        match fs::remove_file(self.blob_path(name)).await {
            Ok(()) => Ok(()),
            // Already gone on disk; dropping the manifest entry is enough.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn split_name(path: &Path) -> (String, String) {
    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    (original_name, extension)
}

impl FileCollectionService for DirectoryService {
    async fn fetch_all(&self) -> Result<Vec<StoredFile>, ServiceError> {
        let entries = self.read_manifest().await?;
        let mut present = Vec::with_capacity(entries.len());
        for entry in entries {
            if fs::try_exists(self.blob_path(&entry.name)).await? {
                present.push(entry);
            } else {
                log::warn!("Manifest entry '{}' has no blob on disk, skipping", entry.name);
            }
        }
        Ok(present)
    }

    async fn create_many(&self, payload: &CreateFilesPayload) -> Result<(), ServiceError> {
        if payload.files.is_empty() {
            return Err(ServiceError::EmptyPayload);
        }
        for source in &payload.files {
            match fs::metadata(source).await {
                Ok(meta) if meta.is_file() => {}
                _ => return Err(ServiceError::InvalidSource(source.clone())),
            }
        }

        fs::create_dir_all(&self.root).await?;
        let mut entries = self.read_manifest().await?;
        for source in &payload.files {
            let (original_name, extension) = split_name(source);
            let id = Uuid::new_v4().simple().to_string();
            let name = if extension.is_empty() {
                id
            } else {
                format!("{}.{}", id, extension)
            };
            fs::copy(source, self.blob_path(&name)).await?;
            log::info!("Stored '{}' as '{}'", original_name, name);
            entries.push(StoredFile {
                name,
                original_name,
                extension,
                created_at: Utc::now(),
            });
        }
        self.write_manifest(&entries).await
    }

    async fn delete_one(&self, file: &StoredFile) -> Result<(), ServiceError> {
        let mut entries = self.read_manifest().await?;
        let idx = entries
            .iter()
            .position(|e| e.name == file.name)
            .ok_or_else(|| ServiceError::NotFound(file.name.clone()))?;
        entries.remove(idx);
        self.remove_blob(&file.name).await?;
        self.write_manifest(&entries).await
    }

    async fn delete_many(&self, files: &[StoredFile]) -> Result<(), ServiceError> {
        let mut entries = self.read_manifest().await?;
        if let Some(missing) = files.iter().find(|f| !entries.iter().any(|e| e.name == f.name)) {
            return Err(ServiceError::NotFound(missing.name.clone()));
        }
        entries.retain(|e| !files.iter().any(|f| f.name == e.name));
        for file in files {
            self.remove_blob(&file.name).await?;
        }
        self.write_manifest(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn fetch_all_on_fresh_directory_is_empty() {
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path().join("store"));
        assert!(service.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_many_stores_blobs_and_metadata() {
        let sources = TempDir::new().unwrap();
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());

        let payload = CreateFilesPayload {
            files: vec![
                write_source(&sources, "report.PDF", "pdf"),
                write_source(&sources, "notes", "plain"),
            ],
        };
        service.create_many(&payload).await.unwrap();

        let files = service.fetch_all().await.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].original_name, "report.PDF");
        assert_eq!(files[0].extension, "pdf");
        assert!(files[0].name.ends_with(".pdf"));
        assert_eq!(files[1].original_name, "notes");
        assert_eq!(files[1].extension, "");
        assert_ne!(files[0].name, files[1].name);
        let stored = std::fs::read_to_string(storage.path().join(&files[1].name)).unwrap();
        assert_eq!(stored, "plain");
    }

    #[tokio::test]
    async fn create_many_rejects_missing_source_without_writing() {
        let sources = TempDir::new().unwrap();
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());

        let payload = CreateFilesPayload {
            files: vec![
                write_source(&sources, "a.txt", "a"),
                sources.path().join("missing.txt"),
            ],
        };
        let err = service.create_many(&payload).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidSource(_)));
        assert!(service.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_many_rejects_empty_payload() {
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());
        let err = service.create_many(&CreateFilesPayload::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::EmptyPayload));
    }

    #[tokio::test]
    async fn delete_one_removes_blob_and_entry() {
        let sources = TempDir::new().unwrap();
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());
        let payload = CreateFilesPayload {
            files: vec![write_source(&sources, "a.txt", "a"), write_source(&sources, "b.txt", "b")],
        };
        service.create_many(&payload).await.unwrap();
        let files = service.fetch_all().await.unwrap();

        service.delete_one(&files[0]).await.unwrap();

        let remaining = service.fetch_all().await.unwrap();
        assert_eq!(remaining, vec![files[1].clone()]);
        assert!(!storage.path().join(&files[0].name).exists());
    }

    #[tokio::test]
    async fn delete_one_unknown_file_is_not_found() {
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());
        let err = service.delete_one(&crate::model::file("ghost.txt")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(name) if name == "ghost.txt"));
    }

    #[tokio::test]
    async fn delete_many_validates_every_target_first() {
        let sources = TempDir::new().unwrap();
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());
        let payload = CreateFilesPayload {
            files: vec![write_source(&sources, "a.txt", "a"), write_source(&sources, "b.txt", "b")],
        };
        service.create_many(&payload).await.unwrap();
        let files = service.fetch_all().await.unwrap();

        let targets = vec![files[0].clone(), crate::model::file("ghost.txt")];
        assert!(service.delete_many(&targets).await.is_err());
        assert_eq!(service.fetch_all().await.unwrap().len(), 2);

        service.delete_many(&files).await.unwrap();
        assert!(service.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_all_skips_entries_without_blob() {
        let sources = TempDir::new().unwrap();
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());
        let payload = CreateFilesPayload {
            files: vec![write_source(&sources, "a.txt", "a"), write_source(&sources, "b.txt", "b")],
        };
        service.create_many(&payload).await.unwrap();
        let files = service.fetch_all().await.unwrap();
        std::fs::remove_file(storage.path().join(&files[0].name)).unwrap();

        let listed = service.fetch_all().await.unwrap();
        assert_eq!(listed, vec![files[1].clone()]);
    }
}
