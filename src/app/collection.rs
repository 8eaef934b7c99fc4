use crate::error::ServiceError;
use crate::model::StoredFile;
use crate::service::FileCollectionService;

/// Stamp for one reload request. Only the most recently issued ticket may
/// replace the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket(u64);

/// Holds the latest loaded list of files. The list is only ever replaced
/// wholesale by a reload.
#[derive(Debug, Default)]
pub struct CollectionStore {
    records: Vec<StoredFile>,
    issued: u64,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &[StoredFile] {
        &self.records
    }

    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.issued += 1;
        ReloadTicket(self.issued)
    }

    /// Returns false, leaving the collection alone, when a newer reload has
    /// been issued since `ticket`.
    pub fn apply(&mut self, ticket: ReloadTicket, records: Vec<StoredFile>) -> bool {
        if ticket.0 != self.issued {
            log::debug!(
                "Discarding stale reload response #{} (latest is #{})",
                ticket.0,
                self.issued
            );
            return false;
        }
        self.records = records;
        true
    }

    pub async fn load<S: FileCollectionService>(
        &mut self,
        service: &S,
    ) -> Result<&[StoredFile], ServiceError> {
        let ticket = self.begin_reload();
        let records = service.fetch_all().await?;
        self.apply(ticket, records);
        Ok(&self.records)
    }
}
