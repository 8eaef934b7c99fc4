use super::dashboard::FileDashboard;
use crate::error::{DashboardError, ServiceError};
use crate::model::StoredFile;
use crate::service::{ErrorReporter, FileCollectionService};

/// Which delete shape was sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Nothing,
    Single,
    Many(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No targets; nothing was sent.
    Ignored,
    Deleted(usize),
    Failed,
}

/// Routes `targets` to the single or batch delete operation. Holds no
/// deletion logic of its own.
pub async fn dispatch<S: FileCollectionService>(
    service: &S,
    targets: &[StoredFile],
) -> Result<Dispatched, ServiceError> {
    match targets {
        [] => Ok(Dispatched::Nothing),
        [only] => {
            service.delete_one(only).await?;
            Ok(Dispatched::Single)
        }
        many => {
            service.delete_many(many).await?;
            Ok(Dispatched::Many(many.len()))
        }
    }
}

impl<S: FileCollectionService, R: ErrorReporter> FileDashboard<S, R> {
    async fn run_delete(&mut self, targets: &[StoredFile]) -> DeleteOutcome {
        match dispatch(&self.service, targets).await {
            Ok(Dispatched::Nothing) => DeleteOutcome::Ignored,
            Ok(_) => {
                log::info!("Deleted {} files", targets.len());
                self.load().await;
                DeleteOutcome::Deleted(targets.len())
            }
            Err(e) => {
                self.reporter.report(&DashboardError::MutationFailure {
                    operation: "delete files",
                    source: e,
                });
                DeleteOutcome::Failed
            }
        }
    }

    /// Row action delete. The deleted files leave the selection on success.
    pub async fn delete_files(&mut self, targets: &[StoredFile]) -> DeleteOutcome {
        let outcome = self.run_delete(targets).await;
        if let DeleteOutcome::Deleted(_) = outcome {
            for target in targets {
                self.selection.deselect(target);
            }
        }
        outcome
    }

    /// Deletes the whole selection and empties it on success.
    pub async fn bulk_delete(&mut self) -> DeleteOutcome {
        if self.selection.is_empty() {
            return DeleteOutcome::Ignored;
        }
        let targets = self.selection.selected().to_vec();
        let outcome = self.run_delete(&targets).await;
        if let DeleteOutcome::Deleted(_) = outcome {
            self.selection.clear();
        }
        outcome
    }

    /// Clears everything when the visible page is fully selected, otherwise
    /// selects the visible page.
    pub fn toggle_all_rows(&mut self) {
        if self.is_all_selected() {
            self.selection.clear();
        } else {
            self.selection.select_all(&self.page.rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file;
    use crate::service::memory::InMemoryService;

    #[tokio::test]
    async fn empty_targets_call_nothing() {
        let service = InMemoryService::default();
        assert_eq!(dispatch(&service, &[]).await.unwrap(), Dispatched::Nothing);
        assert_eq!(service.delete_one_calls.get(), 0);
        assert_eq!(service.delete_many_calls.get(), 0);
    }

    #[tokio::test]
    async fn one_target_uses_single_delete() {
        let service = InMemoryService::with_files(vec![file("a"), file("b")]);
        assert_eq!(dispatch(&service, &[file("a")]).await.unwrap(), Dispatched::Single);
        assert_eq!(service.delete_one_calls.get(), 1);
        assert_eq!(service.delete_many_calls.get(), 0);
        assert_eq!(service.names(), vec!["b"]);
    }

    #[tokio::test]
    async fn several_targets_use_batch_delete_once() {
        for n in 2..6 {
            let files: Vec<_> = (0..n).map(|i| file(&format!("f{}", i))).collect();
            let service = InMemoryService::with_files(files.clone());
            assert_eq!(dispatch(&service, &files).await.unwrap(), Dispatched::Many(n));
            assert_eq!(service.delete_many_calls.get(), 1);
            assert_eq!(service.delete_one_calls.get(), 0);
        }
    }

    #[tokio::test]
    async fn failure_is_returned() {
        let service = InMemoryService::with_files(vec![file("a")]);
        service.fail_mutations.set(true);
        assert!(dispatch(&service, &[file("a")]).await.is_err());
        assert_eq!(service.names(), vec!["a"]);
    }
}
