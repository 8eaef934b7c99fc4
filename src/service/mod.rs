pub mod directory;
#[cfg(test)]
pub mod memory;

use crate::error::{DashboardError, ServiceError};
use crate::model::{CreateFilesPayload, StoredFile};

pub use directory::DirectoryService;

/// Backend that owns the authoritative list of stored files.
///
/// The single and batch delete shapes are distinct operations; callers pick one,
/// the service never decides for them.
#[allow(async_fn_in_trait)]
pub trait FileCollectionService {
    async fn fetch_all(&self) -> Result<Vec<StoredFile>, ServiceError>;

    async fn create_many(&self, payload: &CreateFilesPayload) -> Result<(), ServiceError>;

    async fn delete_one(&self, file: &StoredFile) -> Result<(), ServiceError>;

    async fn delete_many(&self, files: &[StoredFile]) -> Result<(), ServiceError>;
}

/// Sink for failed operations. The dashboard reports and moves on; it never retries.
pub trait ErrorReporter {
    fn report(&mut self, error: &DashboardError);
}

/// Logs every error and keeps the latest one as a transient notice for the status line.
#[derive(Debug, Default)]
pub struct StatusReporter {
    notice: Option<String>,
}

impl StatusReporter {
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

impl ErrorReporter for StatusReporter {
    fn report(&mut self, error: &DashboardError) {
        log::error!("{}", error);
        self.notice = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reporter_keeps_latest_notice_until_taken() {
        let mut reporter = StatusReporter::default();
        reporter.report(&DashboardError::LoadFailure(ServiceError::NotFound("a".into())));
        reporter.report(&DashboardError::MutationFailure {
            operation: "delete files",
            source: ServiceError::NotFound("b".into()),
        });

        assert_eq!(
            reporter.take_notice().as_deref(),
            Some("Failed to delete files: file 'b' not found in storage")
        );
        assert_eq!(reporter.take_notice(), None);
    }
}
