use crate::model::ColumnId;

const BASE_COLUMNS: [ColumnId; 5] = [
    ColumnId::Name,
    ColumnId::OriginalName,
    ColumnId::Extension,
    ColumnId::CreatedAt,
    ColumnId::Actions,
];

#[derive(Debug, Default, Clone)]
pub struct ColumnController {
    bulk_mode: bool,
}

impl ColumnController {
    pub fn toggle_bulk_mode(&mut self) {
        self.bulk_mode = !self.bulk_mode;
    }

    pub fn is_bulk_mode(&self) -> bool {
        self.bulk_mode
    }

    pub fn displayed_columns(&self) -> Vec<ColumnId> {
        let mut columns = Vec::with_capacity(BASE_COLUMNS.len() + 1);
        if self.bulk_mode {
            columns.push(ColumnId::Select);
        }
        columns.extend(BASE_COLUMNS);
        columns
    }
}
