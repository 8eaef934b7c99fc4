use crate::model::StoredFile;
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    OriginalName,
    Extension,
    CreatedAt,
}

impl SortKey {
    /// Cycle order used by the sort key binding: unsorted, then each column in turn.
    pub fn cycle(current: Option<SortKey>) -> Option<SortKey> {
        match current {
            None => Some(SortKey::Name),
            Some(SortKey::Name) => Some(SortKey::OriginalName),
            Some(SortKey::OriginalName) => Some(SortKey::Extension),
            Some(SortKey::Extension) => Some(SortKey::CreatedAt),
            Some(SortKey::CreatedAt) => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::OriginalName => "original name",
            SortKey::Extension => "extension",
            SortKey::CreatedAt => "created",
        }
    }

    fn compare(self, a: &StoredFile, b: &StoredFile) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::OriginalName => a.original_name.cmp(&b.original_name),
            SortKey::Extension => a.extension.cmp(&b.extension),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub sort_key: Option<SortKey>,
    pub sort_direction: SortDirection,
    pub page_index: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewPage {
    pub rows: Vec<StoredFile>,
    pub total_count: usize,
}

/// Sorted, paginated projection of `collection`. Sorting is stable in both
/// directions: records that compare equal keep their collection order.
pub fn derive(collection: &[StoredFile], state: &ViewState) -> ViewPage {
    let mut sorted: Vec<&StoredFile> = collection.iter().collect();
    if let Some(key) = state.sort_key {
        match state.sort_direction {
            SortDirection::Ascending => sorted.sort_by(|a, b| key.compare(a, b)),
            SortDirection::Descending => sorted.sort_by(|a, b| key.compare(b, a)),
        }
    }

    let page_size = state.page_size.max(1);
    let rows = sorted
        .into_iter()
        .skip(state.page_index.saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect();

    ViewPage {
        rows,
        total_count: collection.len(),
    }
}

pub fn page_count(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1))
}

pub fn last_page_index(total_count: usize, page_size: usize) -> usize {
    page_count(total_count, page_size).saturating_sub(1)
}
