//! Full per-table state: selection, highlighting, modal and sort
//! bookkeeping, and the caller notification seam.
//!
//! [`TreatmentsTableState`] is the state object behind one treatments
//! table instance. It owns the applied filter groups (whose flattened
//! keys form the locked selection baseline), delegates selection and
//! combination-mode logic to [`SelectionFilterState`], and notifies the
//! caller exactly once per applied selection through a plain callback
//! bound at construction.

use crate::highlight::{FilterPartition, HighlightBucket};
use crate::model::{row_unique_key, PreSelectedRows, RowKey, TableKind, TreatmentRow};
use crate::selection::{CombinationMode, FilterPayload, SelectionFilterState};
use crate::store::PreferenceStore;

/// Callback invoked with the payload of each applied selection.
pub type SelectionCallback = Box<dyn FnMut(FilterPayload)>;

/// Sort direction for the table's active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The other direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Visibility state of the table's side panel modal.
#[derive(Debug, Clone, Default)]
pub struct ModalState {
    open: bool,
    panel_name: String,
}

impl ModalState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the modal is currently shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Panel recorded at the last open.
    #[must_use]
    pub fn panel_name(&self) -> &str {
        &self.panel_name
    }

    /// Flip visibility; the panel name is recorded only when opening.
    pub fn toggle(&mut self, panel_name: &str) {
        self.open = !self.open;
        if !self.open {
            return;
        }
        self.panel_name = panel_name.to_string();
    }

    /// Hide the modal.
    pub fn close(&mut self) {
        self.open = false;
    }
}

/// State for one treatments table instance.
///
/// Lives as long as the table it backs; the combination-mode preference
/// outlives it through the injected store.
pub struct TreatmentsTableState {
    kind: TableKind,
    filters: Vec<Vec<RowKey>>,
    flattened_filters: Vec<RowKey>,
    selection: SelectionFilterState,
    partition: FilterPartition,
    modal: ModalState,
    sort_direction: SortDirection,
    store: Box<dyn PreferenceStore>,
    on_user_selection: SelectionCallback,
}

impl TreatmentsTableState {
    /// Build table state from the applied filter groups.
    ///
    /// The flattened filter keys become the locked selection baseline.
    /// The store and the selection callback are bound for the lifetime of
    /// the instance.
    pub fn new(
        kind: TableKind,
        filters: Vec<Vec<RowKey>>,
        store: Box<dyn PreferenceStore>,
        on_user_selection: SelectionCallback,
    ) -> Self {
        let flattened_filters: Vec<RowKey> = filters.iter().flatten().cloned().collect();
        let partition = FilterPartition::new(&filters);
        let selection = SelectionFilterState::new(kind, flattened_filters.clone());
        Self {
            kind,
            filters,
            flattened_filters,
            selection,
            partition,
            modal: ModalState::new(),
            sort_direction: SortDirection::default(),
            store,
            on_user_selection,
        }
    }

    /// The table kind this state belongs to.
    #[must_use]
    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    /// The applied filter groups, as supplied.
    #[must_use]
    pub fn filters(&self) -> &[Vec<RowKey>] {
        &self.filters
    }

    /// Selection state, for read-only inspection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionFilterState {
        &self.selection
    }

    /// Whether a row's checkbox is disabled (locked by the baseline).
    #[must_use]
    pub fn is_row_disabled(&self, key: &RowKey) -> bool {
        self.selection.is_locked(key)
    }

    /// Whether a row's checkbox is checked.
    #[must_use]
    pub fn is_row_checked(&self, key: &RowKey) -> bool {
        self.selection.is_selected(key)
    }

    /// Toggle a row in the user selection.
    pub fn toggle_row(&mut self, key: RowKey) {
        self.selection.toggle(key);
    }

    /// Number of rows toggled but not yet applied.
    #[must_use]
    pub fn pending_selection_count(&self) -> usize {
        self.selection.selection_count()
    }

    /// Apply the pending selection.
    ///
    /// Commits the selection into a payload under the effective
    /// combination mode, hands it to the bound callback exactly once, and
    /// leaves the selection empty for the next round.
    pub fn apply_selection(&mut self) {
        let payload = self.selection.commit(&*self.store);
        (self.on_user_selection)(payload);
    }

    /// Effective combination mode for this table.
    #[must_use]
    pub fn combination_mode(&self) -> CombinationMode {
        self.selection.combination_mode(&*self.store)
    }

    /// Flip the combination mode and persist the choice.
    pub fn toggle_combination_mode(&mut self) -> CombinationMode {
        self.selection.toggle_combination_mode(&mut *self.store)
    }

    /// Whether a row is selected, resolved through the row identity.
    #[must_use]
    pub fn is_selected_row(&self, row: &TreatmentRow) -> bool {
        self.is_row_checked(&row_unique_key(row))
    }

    /// Highlight bucket for a row, resolved through the row identity.
    #[must_use]
    pub fn bucket_for_row(&self, row: &TreatmentRow) -> HighlightBucket {
        self.partition.bucket_for(&row_unique_key(row))
    }

    /// Modal visibility state.
    #[must_use]
    pub const fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// Mutable modal visibility state.
    pub fn modal_mut(&mut self) -> &mut ModalState {
        &mut self.modal
    }

    /// Current sort direction.
    #[must_use]
    pub const fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Flip the sort direction.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggled();
    }
}

impl PreSelectedRows for TreatmentsTableState {
    fn pre_selected_row_keys(&self) -> &[RowKey] {
        &self.flattened_filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPreferenceStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn keys(values: &[&str]) -> Vec<RowKey> {
        values.iter().map(|v| RowKey::from(*v)).collect()
    }

    fn table_with_sink(
        filters: Vec<Vec<RowKey>>,
    ) -> (TreatmentsTableState, Rc<RefCell<Vec<FilterPayload>>>) {
        let sink = Rc::new(RefCell::new(Vec::new()));
        let sink_handle = Rc::clone(&sink);
        let table = TreatmentsTableState::new(
            TableKind::PatientTreatments,
            filters,
            Box::new(MemoryPreferenceStore::new()),
            Box::new(move |payload| sink_handle.borrow_mut().push(payload)),
        );
        (table, sink)
    }

    #[test]
    fn baseline_is_flattened_filters() {
        let (table, _) = table_with_sink(vec![keys(&["a", "b"]), keys(&["c"])]);
        assert_eq!(table.pre_selected_row_keys(), keys(&["a", "b", "c"]).as_slice());
        assert!(table.is_row_disabled(&RowKey::from("b")));
        assert!(table.is_row_checked(&RowKey::from("c")));
        assert!(!table.is_row_disabled(&RowKey::from("d")));
    }

    #[test]
    fn apply_selection_invokes_callback_once_per_round() {
        let (mut table, sink) = table_with_sink(Vec::new());
        table.toggle_row(RowKey::from("x"));
        table.toggle_row(RowKey::from("y"));
        table.apply_selection();

        assert_eq!(sink.borrow().len(), 1);
        assert_eq!(sink.borrow()[0], vec![keys(&["x", "y"])]);
        assert_eq!(table.pending_selection_count(), 0);

        table.toggle_row(RowKey::from("z"));
        table.apply_selection();
        assert_eq!(sink.borrow().len(), 2);
        assert_eq!(sink.borrow()[1], vec![keys(&["z"])]);
    }

    #[test]
    fn intersection_mode_reaches_callback_payload() {
        let (mut table, sink) = table_with_sink(Vec::new());
        table.toggle_combination_mode();
        table.toggle_row(RowKey::from("x"));
        table.toggle_row(RowKey::from("y"));
        table.apply_selection();

        assert_eq!(sink.borrow()[0], vec![keys(&["x"]), keys(&["y"])]);
    }

    #[test]
    fn row_lookups_go_through_identity() {
        let (mut table, _) = table_with_sink(vec![keys(&["Cisplatin"])]);
        let locked = TreatmentRow::patient("Cisplatin", 7);
        let free = TreatmentRow::patient("Taxol", 3);

        assert!(table.is_selected_row(&locked));
        assert!(!table.is_selected_row(&free));
        assert_eq!(table.bucket_for_row(&locked), HighlightBucket::Even);
        // One filter group, so unpartitioned rows land in the odd bucket.
        assert_eq!(table.bucket_for_row(&free), HighlightBucket::Odd);

        table.toggle_row(row_unique_key(&free));
        assert!(table.is_selected_row(&free));
    }

    #[test]
    fn modal_records_panel_only_when_opening() {
        let mut modal = ModalState::new();
        assert!(!modal.is_open());

        modal.toggle("treatment detail");
        assert!(modal.is_open());
        assert_eq!(modal.panel_name(), "treatment detail");

        modal.toggle("ignored");
        assert!(!modal.is_open());
        assert_eq!(modal.panel_name(), "treatment detail");

        modal.toggle("other panel");
        assert_eq!(modal.panel_name(), "other panel");
        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn sort_direction_toggles() {
        let (mut table, _) = table_with_sink(Vec::new());
        assert_eq!(table.sort_direction(), SortDirection::Asc);
        table.toggle_sort_direction();
        assert_eq!(table.sort_direction(), SortDirection::Desc);
        table.toggle_sort_direction();
        assert_eq!(table.sort_direction(), SortDirection::Asc);
    }
}
