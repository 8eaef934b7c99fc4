use crate::model::CreateFilesPayload;
use crate::service::{DirectoryService, FileCollectionService};
use anyhow::{Context, Result};
use std::path::PathBuf;

const SAMPLE_EXTENSIONS: [&str; 6] = ["txt", "md", "csv", "json", "log", ""];

fn sample_contents(i: usize, extension: &str) -> String {
    match extension {
        "csv" => format!("id,value\n{},{}\n", i, i * 10),
        "json" => format!("{{\"id\": {}, \"label\": \"sample {}\"}}\n", i, i),
        "md" => format!("# Sample {}\n\nSeeded by lazyfiles.\n", i),
        _ => format!("Sample file {}\n", i),
    }
}

/// Empties the store and fills it with `count` small sample files.
pub async fn seed_storage(service: &DirectoryService, count: usize) -> Result<()> {
    println!("Seeding {} with {} sample files...", service.root().display(), count);

    let existing = service.fetch_all().await?;
    if !existing.is_empty() {
        service.delete_many(&existing).await?;
        println!("Removed {} existing files.", existing.len());
    }

    let staging = std::env::temp_dir().join(format!("lazyfiles-seed-{}", std::process::id()));
    tokio::fs::create_dir_all(&staging)
        .await
        .with_context(|| format!("creating staging directory '{}'", staging.display()))?;

    let mut files: Vec<PathBuf> = Vec::with_capacity(count);
    for i in 0..count {
        let extension = SAMPLE_EXTENSIONS[i % SAMPLE_EXTENSIONS.len()];
        let file_name = if extension.is_empty() {
            format!("sample_{:03}", i)
        } else {
            format!("sample_{:03}.{}", i, extension)
        };
        let path = staging.join(file_name);
        tokio::fs::write(&path, sample_contents(i, extension)).await?;
        files.push(path);
    }

    let result = service.create_many(&CreateFilesPayload { files }).await;
    if let Err(e) = tokio::fs::remove_dir_all(&staging).await {
        log::warn!("Failed to remove staging directory '{}': {}", staging.display(), e);
    }
    result?;

    println!("Finished seeding data.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn seeding_replaces_existing_files() {
        let storage = TempDir::new().unwrap();
        let service = DirectoryService::new(storage.path());

        seed_storage(&service, 4).await.unwrap();
        seed_storage(&service, 7).await.unwrap();

        let files = service.fetch_all().await.unwrap();
        assert_eq!(files.len(), 7);
        assert_eq!(files[0].original_name, "sample_000.txt");
        assert_eq!(files[5].extension, "");
    }
}
