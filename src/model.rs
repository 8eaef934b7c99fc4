use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One managed file entry.
///
/// `name` is the stored name and the identity of the record: two entries with
/// equal names are the same file, whatever their other fields say.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub name: String,
    pub original_name: String,
    pub extension: String,
    pub created_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn same_name(a: &StoredFile, b: &StoredFile) -> bool {
        a.name == b.name
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateFilesPayload {
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnId {
    Select,
    Name,
    OriginalName,
    Extension,
    CreatedAt,
    Actions,
}

impl ColumnId {
    pub fn title(self) -> &'static str {
        match self {
            ColumnId::Select => "",
            ColumnId::Name => "Name",
            ColumnId::OriginalName => "Original name",
            ColumnId::Extension => "Ext",
            ColumnId::CreatedAt => "Created",
            ColumnId::Actions => "Actions",
        }
    }
}

#[cfg(test)]
pub fn file(name: &str) -> StoredFile {
    use chrono::TimeZone;

    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_string()).unwrap_or_default();
    StoredFile {
        name: name.to_string(),
        original_name: format!("original-{}", name),
        extension,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}
