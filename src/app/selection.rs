use crate::model::StoredFile;
use std::fmt;

/// Equality rule used for every membership check.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> bool>;

/// Multi-selection keyed by a caller-supplied equality rule instead of
/// structural or reference equality.
pub struct SelectionTracker<T> {
    selected: Vec<T>,
    same: Comparator<T>,
}

impl<T: Clone> SelectionTracker<T> {
    pub fn new(same: Comparator<T>) -> Self {
        Self {
            selected: Vec::new(),
            same,
        }
    }

    fn position(&self, item: &T) -> Option<usize> {
        self.selected.iter().position(|s| (self.same)(s, item))
    }

    pub fn select(&mut self, item: &T) {
        if self.position(item).is_none() {
            self.selected.push(item.clone());
        }
    }

    pub fn deselect(&mut self, item: &T) {
        let same = &self.same;
        self.selected.retain(|s| !same(s, item));
    }

    pub fn toggle(&mut self, item: &T) {
        if self.is_selected(item) {
            self.deselect(item);
        } else {
            self.select(item);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Adds every visible row, leaving rows outside the current page untouched.
    pub fn select_all(&mut self, visible_rows: &[T]) {
        for row in visible_rows {
            self.select(row);
        }
    }

    pub fn is_selected(&self, item: &T) -> bool {
        self.position(item).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn selected(&self) -> &[T] {
        &self.selected
    }

    /// True when every visible row is selected; an empty page counts as fully selected.
    pub fn all_selected(&self, visible_rows: &[T]) -> bool {
        visible_rows.iter().all(|row| self.is_selected(row))
    }

    /// Drops members that have no equal entry in `collection`.
    pub fn retain_present(&mut self, collection: &[T]) {
        let same = &self.same;
        self.selected.retain(|s| collection.iter().any(|c| same(s, c)));
    }
}

impl SelectionTracker<StoredFile> {
    pub fn by_name() -> Self {
        Self::new(Box::new(StoredFile::same_name))
    }
}

impl<T: fmt::Debug> fmt::Debug for SelectionTracker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file;

    #[test]
    fn membership_uses_name_not_payload() {
        let mut selection = SelectionTracker::by_name();
        let a = file("a");
        let mut renamed_a = file("a");
        renamed_a.original_name = "something else".into();

        selection.select(&a);
        selection.select(&renamed_a);
        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected(&renamed_a));

        selection.deselect(&renamed_a);
        assert!(selection.is_empty());
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let mut selection = SelectionTracker::by_name();
        selection.select(&file("Report"));
        assert!(!selection.is_selected(&file("report")));
    }

    #[test]
    fn custom_comparator_is_honoured() {
        let mut selection: SelectionTracker<StoredFile> = SelectionTracker::new(Box::new(
            |a: &StoredFile, b: &StoredFile| a.name.eq_ignore_ascii_case(&b.name),
        ));
        selection.select(&file("Report"));
        assert!(selection.is_selected(&file("report")));
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionTracker::by_name();
        selection.toggle(&file("a"));
        assert!(selection.is_selected(&file("a")));
        selection.toggle(&file("a"));
        assert!(!selection.is_selected(&file("a")));
    }

    #[test]
    fn select_all_is_scoped_to_visible_rows() {
        let mut selection = SelectionTracker::by_name();
        let page = vec![file("a"), file("b")];
        selection.select_all(&page);

        assert!(selection.all_selected(&page));
        assert!(!selection.all_selected(&[file("a"), file("b"), file("c")]));
        assert!(!selection.is_selected(&file("c")));
    }

    #[test]
    fn all_selected_ignores_extra_members() {
        let mut selection = SelectionTracker::by_name();
        selection.select(&file("z"));
        selection.select_all(&[file("a")]);
        assert!(selection.all_selected(&[file("a")]));
        assert!(selection.all_selected(&[]));
    }

    #[test]
    fn retain_present_prunes_removed_records() {
        let mut selection = SelectionTracker::by_name();
        selection.select_all(&[file("a"), file("b"), file("c")]);
        selection.retain_present(&[file("b"), file("d")]);
        let names: Vec<_> = selection.selected().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b"]);
    }
}
