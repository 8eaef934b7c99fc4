pub mod app_clipboard;
pub mod bulk;
pub mod collection;
pub mod columns;
pub mod dashboard;
pub mod selection;
pub mod state_add_files;
pub mod state_delete_dialog;
pub mod view;

use crate::model::StoredFile;
use crate::service::{FileCollectionService, StatusReporter};
use bulk::DeleteOutcome;
use dashboard::FileDashboard;
use state_add_files::AddFilesPrompt;
use state_delete_dialog::DeleteDialogState;
use view::{SortKey, PAGE_SIZE_OPTIONS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingOperation {
    InitialLoad,
    Reload,
    ConfirmDeleteItem,
    SubmitAddFiles,
    CopyFileNameToClipboard,
}

pub struct App<S> {
    pub dashboard: FileDashboard<S, StatusReporter>,
    pub storage_label: String,
    pub selected_row_index: usize,
    pub status: Option<String>,
    pub delete_dialog: DeleteDialogState,
    pub add_files: AddFilesPrompt,
    pub pending_operation: Option<PendingOperation>,
}

impl<S: FileCollectionService> App<S> {
    pub fn new(service: S, storage_label: &str, page_size: usize) -> App<S> {
        App {
            dashboard: FileDashboard::new(service, StatusReporter::default(), page_size),
            storage_label: storage_label.to_string(),
            selected_row_index: 0,
            status: None,
            delete_dialog: DeleteDialogState::default(),
            add_files: AddFilesPrompt::new(),
            pending_operation: None,
        }
    }

    pub fn trigger_initial_load(&mut self) {
        self.status = Some(format!("Loading files from {}...", self.storage_label));
        self.pending_operation = Some(PendingOperation::InitialLoad);
    }

    pub fn trigger_reload(&mut self) {
        self.status = Some("Reloading...".to_string());
        self.pending_operation = Some(PendingOperation::Reload);
    }

    pub async fn execute_load(&mut self) {
        if self.dashboard.load().await {
            self.status = Some(format!("{} files in {}", self.dashboard.total_count(), self.storage_label));
        }
        self.after_reload();
    }

    /// Keeps the page and row cursor inside the data after the collection shrank,
    /// and moves any reported error to the status line.
    fn after_reload(&mut self) {
        let state = *self.dashboard.view_state();
        let last = view::last_page_index(self.dashboard.total_count(), state.page_size);
        if state.page_index > last {
            self.dashboard.set_page(last, state.page_size);
        }
        let rows = self.dashboard.rows().len();
        if self.selected_row_index >= rows {
            self.selected_row_index = rows.saturating_sub(1);
        }
        if let Some(notice) = self.dashboard.reporter_mut().take_notice() {
            self.status = Some(notice);
        }
    }

    pub fn selected_file(&self) -> Option<&StoredFile> {
        self.dashboard.rows().get(self.selected_row_index)
    }

    pub fn next_row(&mut self) {
        let len = self.dashboard.rows().len();
        if len > 0 {
            self.selected_row_index = (self.selected_row_index + 1) % len;
        }
    }

    pub fn previous_row(&mut self) {
        let len = self.dashboard.rows().len();
        if len > 0 {
            if self.selected_row_index > 0 {
                self.selected_row_index -= 1;
            } else {
                self.selected_row_index = len - 1;
            }
        }
    }

    pub fn next_page(&mut self) {
        let state = *self.dashboard.view_state();
        let last = view::last_page_index(self.dashboard.total_count(), state.page_size);
        if state.page_index < last {
            self.dashboard.set_page(state.page_index + 1, state.page_size);
            self.selected_row_index = 0;
        }
    }

    pub fn previous_page(&mut self) {
        let state = *self.dashboard.view_state();
        if state.page_index > 0 {
            self.dashboard.set_page(state.page_index - 1, state.page_size);
            self.selected_row_index = 0;
        }
    }

    pub fn cycle_page_size(&mut self) {
        let current = self.dashboard.view_state().page_size;
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|&size| size > current)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        self.dashboard.set_page(0, next);
        self.selected_row_index = 0;
    }

    pub fn cycle_sort_key(&mut self) {
        let state = *self.dashboard.view_state();
        self.dashboard.set_sort(SortKey::cycle(state.sort_key), state.sort_direction);
    }

    pub fn flip_sort_direction(&mut self) {
        let state = *self.dashboard.view_state();
        if state.sort_key.is_some() {
            self.dashboard.set_sort(state.sort_key, state.sort_direction.flipped());
        }
    }

    pub fn toggle_bulk_mode(&mut self) {
        self.dashboard.toggle_bulk_mode();
    }

    pub fn toggle_selected_row(&mut self) {
        if !self.dashboard.is_bulk_mode() {
            return;
        }
        if let Some(file) = self.selected_file().cloned() {
            self.dashboard.toggle_selection(&file);
        }
    }

    pub fn toggle_all_rows(&mut self) {
        if self.dashboard.is_bulk_mode() {
            self.dashboard.toggle_all_rows();
        }
    }

    pub fn initiate_delete_selected_item(&mut self) {
        self.delete_dialog
            .initiate_delete_selected_item(self.selected_row_index, self.dashboard.rows());
    }

    pub fn initiate_bulk_delete(&mut self) {
        if !self.dashboard.is_bulk_mode() {
            return;
        }
        let count = self.dashboard.selection().len();
        if count == 0 {
            self.status = Some("No files selected.".to_string());
            return;
        }
        self.delete_dialog.initiate_bulk_delete(count);
    }

    pub fn cancel_delete_item(&mut self) {
        self.delete_dialog.cancel_delete_item();
    }

    pub async fn confirm_delete_item(&mut self) {
        let outcome = if self.delete_dialog.is_bulk_delete {
            self.dashboard.bulk_delete().await
        } else {
            let targets = self.delete_dialog.targets.clone();
            self.dashboard.delete_files(&targets).await
        };
        self.delete_dialog.cancel_delete_item();

        match outcome {
            DeleteOutcome::Deleted(1) => self.status = Some("Deleted 1 file.".to_string()),
            DeleteOutcome::Deleted(n) => self.status = Some(format!("Deleted {} files.", n)),
            DeleteOutcome::Ignored => self.status = Some("Nothing to delete.".to_string()),
            DeleteOutcome::Failed => {}
        }
        self.after_reload();
    }

    pub fn open_add_files_prompt(&mut self) {
        self.add_files.open();
    }

    pub fn close_add_files_prompt(&mut self) {
        self.add_files.close();
    }

    pub async fn submit_add_files(&mut self) {
        let payload = self.add_files.payload();
        if payload.files.is_empty() {
            self.add_files.last_result = Some("Enter one or more file paths.".to_string());
            return;
        }
        if self.dashboard.add_files(&payload).await {
            self.add_files.close();
            self.status = Some(format!("Added {} files.", payload.files.len()));
            self.after_reload();
        } else {
            self.add_files.last_result = self.dashboard.reporter_mut().take_notice();
        }
    }
}
