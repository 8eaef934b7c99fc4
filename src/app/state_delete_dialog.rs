use crate::model::StoredFile;

#[derive(Debug, Default, Clone)]
pub struct DeleteDialogState {
    pub show_confirmation_dialog: bool,
    pub targets: Vec<StoredFile>,
    pub is_bulk_delete: bool,
    pub bulk_count: usize,
}

impl DeleteDialogState {
    pub fn initiate_delete_selected_item(&mut self, selected_index: usize, visible_rows: &[StoredFile]) {
        let Some(file) = visible_rows.get(selected_index) else {
            return;
        };
        self.targets = vec![file.clone()];
        self.is_bulk_delete = false;
        self.bulk_count = 0;
        self.show_confirmation_dialog = true;
    }

    /// Bulk deletes act on the selection at confirmation time, so only the count is kept.
    pub fn initiate_bulk_delete(&mut self, selected_count: usize) {
        if selected_count == 0 {
            return;
        }
        self.targets.clear();
        self.is_bulk_delete = true;
        self.bulk_count = selected_count;
        self.show_confirmation_dialog = true;
    }

    pub fn display_name(&self) -> String {
        if self.is_bulk_delete {
            format!("{} selected files", self.bulk_count)
        } else {
            self.targets
                .first()
                .map(|f| format!("'{}' ({})", f.original_name, f.name))
                .unwrap_or_else(|| "unknown".to_string())
        }
    }

    pub fn cancel_delete_item(&mut self) {
        self.show_confirmation_dialog = false;
        self.targets.clear();
        self.is_bulk_delete = false;
        self.bulk_count = 0;
    }
}
