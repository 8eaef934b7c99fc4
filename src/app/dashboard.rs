use super::collection::CollectionStore;
use super::columns::ColumnController;
use super::selection::SelectionTracker;
use super::view::{self, SortDirection, SortKey, ViewPage, ViewState};
use crate::error::DashboardError;
use crate::model::{ColumnId, CreateFilesPayload, StoredFile};
use crate::service::{ErrorReporter, FileCollectionService};

/// The file list view controller: a collection, its sorted/paginated page, a
/// selection over it, and the bulk mode column switch.
///
/// The page is recomputed eagerly after every transition that touches the
/// collection or the view state, so readers never see a stale projection.
pub struct FileDashboard<S, R> {
    pub(super) service: S,
    pub(super) reporter: R,
    pub(super) store: CollectionStore,
    pub(super) view_state: ViewState,
    pub(super) page: ViewPage,
    pub(super) selection: SelectionTracker<StoredFile>,
    pub(super) columns: ColumnController,
}

impl<S: FileCollectionService, R: ErrorReporter> FileDashboard<S, R> {
    pub fn new(service: S, reporter: R, page_size: usize) -> Self {
        Self {
            service,
            reporter,
            store: CollectionStore::new(),
            view_state: ViewState::with_page_size(page_size),
            page: ViewPage::default(),
            selection: SelectionTracker::by_name(),
            columns: ColumnController::default(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn collection(&self) -> &[StoredFile] {
        self.store.current()
    }

    pub fn rows(&self) -> &[StoredFile] {
        &self.page.rows
    }

    pub fn total_count(&self) -> usize {
        self.page.total_count
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn selection(&self) -> &SelectionTracker<StoredFile> {
        &self.selection
    }

    pub(super) fn refresh_page(&mut self) {
        self.page = view::derive(self.store.current(), &self.view_state);
    }

    /// Fetches the collection. On failure the previous collection stays and the
    /// error goes to the reporter.
    pub async fn load(&mut self) -> bool {
        let loaded = self.store.load(&self.service).await.map(|records| records.len());
        match loaded {
            Ok(count) => {
                log::info!("Loaded {} files", count);
                self.selection.retain_present(self.store.current());
                self.refresh_page();
                true
            }
            Err(e) => {
                self.reporter.report(&DashboardError::LoadFailure(e));
                false
            }
        }
    }

    pub async fn add_files(&mut self, payload: &CreateFilesPayload) -> bool {
        match self.service.create_many(payload).await {
            Ok(()) => {
                log::info!("Added {} files", payload.files.len());
                self.load().await;
                true
            }
            Err(e) => {
                self.reporter.report(&DashboardError::MutationFailure {
                    operation: "add files",
                    source: e,
                });
                false
            }
        }
    }

    pub fn set_sort(&mut self, sort_key: Option<SortKey>, sort_direction: SortDirection) {
        self.view_state.sort_key = sort_key;
        self.view_state.sort_direction = sort_direction;
        self.refresh_page();
    }

    pub fn set_page(&mut self, page_index: usize, page_size: usize) {
        self.view_state.page_index = page_index;
        self.view_state.page_size = page_size.max(1);
        self.refresh_page();
    }

    pub fn toggle_selection(&mut self, file: &StoredFile) {
        self.selection.toggle(file);
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.all_selected(&self.page.rows)
    }

    pub fn toggle_bulk_mode(&mut self) {
        self.columns.toggle_bulk_mode();
    }

    pub fn is_bulk_mode(&self) -> bool {
        self.columns.is_bulk_mode()
    }

    pub fn displayed_columns(&self) -> Vec<ColumnId> {
        self.columns.displayed_columns()
    }
}
