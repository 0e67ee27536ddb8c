//! Row-selection state with union/intersection filter combination.
//!
//! [`SelectionFilterState`] accumulates user-toggled row keys on top of a
//! locked baseline of pre-selected rows, and converts that state into a
//! filter payload on demand. The combination mode (how committed keys are
//! grouped) survives the instance through a [`PreferenceStore`], keyed by
//! table kind.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{RowKey, TableKind};
use crate::store::PreferenceStore;

/// How committed selections combine into a filter.
///
/// Union means any selected row matches; intersection means all selected
/// rows must jointly match, modeled downstream as separate singleton
/// groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinationMode {
    Union,
    Intersection,
}

impl CombinationMode {
    /// Canonical persisted form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersection => "INTERSECTION",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Union => Self::Intersection,
            Self::Intersection => Self::Union,
        }
    }

    /// Parse a persisted value, case-insensitively.
    ///
    /// Anything outside `{UNION, INTERSECTION}` is `None`; readers fall
    /// back to [`CombinationMode::Union`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "UNION" => Some(Self::Union),
            "INTERSECTION" => Some(Self::Intersection),
            _ => None,
        }
    }
}

impl fmt::Display for CombinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The list-of-groups structure handed to the caller after a commit.
///
/// An all-empty single group means "no filter applied", not "match
/// nothing"; callers must not interpret it as an exclusion.
pub type FilterPayload = Vec<Vec<RowKey>>;

/// Selection state for one table instance.
///
/// Tracks user-toggled keys against the pre-selected baseline. Toggled
/// keys live until [`SelectionFilterState::commit`] consumes them; the
/// in-memory mode override lives for the whole instance.
#[derive(Debug, Clone)]
pub struct SelectionFilterState {
    kind: TableKind,
    pre_selected: Vec<RowKey>,
    selected: Vec<RowKey>,
    mode_override: Option<CombinationMode>,
}

impl SelectionFilterState {
    /// Create state for a table kind with its locked baseline.
    #[must_use]
    pub fn new(kind: TableKind, pre_selected: Vec<RowKey>) -> Self {
        Self {
            kind,
            pre_selected,
            selected: Vec::new(),
            mode_override: None,
        }
    }

    /// The table kind this state persists preferences under.
    #[must_use]
    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    /// Keys locked into the selection.
    #[must_use]
    pub fn pre_selected(&self) -> &[RowKey] {
        &self.pre_selected
    }

    /// Keys toggled on by the user, in first-toggle order.
    #[must_use]
    pub fn selected(&self) -> &[RowKey] {
        &self.selected
    }

    /// Number of user-toggled keys.
    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether a key is part of the locked baseline.
    ///
    /// Locked rows are not independently toggleable off and are always
    /// considered selected.
    #[must_use]
    pub fn is_locked(&self, key: &RowKey) -> bool {
        self.pre_selected.iter().any(|k| k == key)
    }

    /// Whether a key is selected, either by the user or by the baseline.
    #[must_use]
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.iter().any(|k| k == key) || self.is_locked(key)
    }

    /// Toggle a key in the user selection.
    ///
    /// Appends the key if absent, removes it by value if present. The
    /// baseline is untouched: toggling a locked key is tracked here but
    /// [`SelectionFilterState::is_selected`] stays true for it.
    pub fn toggle(&mut self, key: RowKey) {
        if let Some(pos) = self.selected.iter().position(|k| *k == key) {
            self.selected.remove(pos);
        } else {
            self.selected.push(key);
        }
    }

    /// Resolve the effective combination mode.
    ///
    /// Order: in-memory override set this session, else persisted value
    /// for this table kind (matched case-insensitively), else union.
    #[must_use]
    pub fn combination_mode(&self, store: &dyn PreferenceStore) -> CombinationMode {
        if let Some(mode) = self.mode_override {
            return mode;
        }
        store
            .get(self.kind.storage_key())
            .and_then(|raw| CombinationMode::parse(&raw))
            .unwrap_or(CombinationMode::Union)
    }

    /// Flip the effective combination mode and persist the new value.
    ///
    /// This is a toggle, not an arbitrary set: the next mode is always
    /// the opposite of the currently effective one. Persist failure is
    /// logged and otherwise ignored; the in-memory override still wins
    /// for the rest of this instance's life.
    pub fn toggle_combination_mode(&mut self, store: &mut dyn PreferenceStore) -> CombinationMode {
        let next = self.combination_mode(store).opposite();
        self.mode_override = Some(next);
        tracing::debug!(
            "combination mode for {} is now {next}",
            self.kind.storage_key()
        );
        if let Err(e) = store.set(self.kind.storage_key(), next.label()) {
            tracing::warn!("Failed to persist combination mode: {e}");
        }
        next
    }

    /// Consume the current selection into a filter payload.
    ///
    /// Union mode yields a single group holding every selected key (a
    /// single empty group when nothing is selected). Intersection mode
    /// yields one singleton group per selected key, in toggle order. The
    /// user selection is empty afterwards; the baseline survives.
    ///
    /// Selected keys are emitted verbatim, including any that also belong
    /// to the baseline.
    pub fn commit(&mut self, store: &dyn PreferenceStore) -> FilterPayload {
        let selected = std::mem::take(&mut self.selected);
        match self.combination_mode(store) {
            CombinationMode::Union => vec![selected],
            CombinationMode::Intersection => {
                selected.into_iter().map(|key| vec![key]).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPreferenceStore;

    fn keys(values: &[&str]) -> Vec<RowKey> {
        values.iter().map(|v| RowKey::from(*v)).collect()
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        state.toggle(RowKey::from("a"));
        assert_eq!(state.selected(), keys(&["a"]).as_slice());

        state.toggle(RowKey::from("a"));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn toggle_removes_by_value_not_position() {
        let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        state.toggle(RowKey::from("a"));
        state.toggle(RowKey::from("b"));
        state.toggle(RowKey::from("c"));

        state.toggle(RowKey::from("b"));
        assert_eq!(state.selected(), keys(&["a", "c"]).as_slice());
    }

    #[test]
    fn locked_keys_always_selected() {
        let mut state =
            SelectionFilterState::new(TableKind::PatientTreatments, keys(&["locked"]));
        let locked = RowKey::from("locked");

        assert!(state.is_locked(&locked));
        assert!(state.is_selected(&locked));

        state.toggle(locked.clone());
        assert!(state.is_selected(&locked), "lock dominates toggle on");
        state.toggle(locked.clone());
        assert!(state.is_selected(&locked), "lock dominates toggle off");
        assert!(!state.is_locked(&RowKey::from("other")));
    }

    #[test]
    fn union_commit_is_single_group() {
        let store = MemoryPreferenceStore::new();
        let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        state.toggle(RowKey::from("a"));
        state.toggle(RowKey::from("b"));
        state.toggle(RowKey::from("c"));

        let payload = state.commit(&store);
        assert_eq!(payload, vec![keys(&["a", "b", "c"])]);
        assert!(state.selected().is_empty(), "commit consumes the selection");
    }

    #[test]
    fn intersection_commit_is_singleton_groups() {
        let mut store = MemoryPreferenceStore::new();
        let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        state.toggle_combination_mode(&mut store);
        assert_eq!(state.combination_mode(&store), CombinationMode::Intersection);

        state.toggle(RowKey::from("a"));
        state.toggle(RowKey::from("b"));

        let payload = state.commit(&store);
        assert_eq!(payload, vec![keys(&["a"]), keys(&["b"])]);
        assert!(state.selected().is_empty());
    }

    #[test]
    fn empty_union_commit_is_one_empty_group() {
        let store = MemoryPreferenceStore::new();
        let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());

        let payload = state.commit(&store);
        assert_eq!(payload.len(), 1, "one group, not zero");
        assert!(payload[0].is_empty());
    }

    #[test]
    fn empty_intersection_commit_is_zero_groups() {
        let mut store = MemoryPreferenceStore::new();
        let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        state.toggle_combination_mode(&mut store);

        let payload = state.commit(&store);
        assert!(payload.is_empty());
    }

    #[test]
    fn mode_defaults_to_union() {
        let store = MemoryPreferenceStore::new();
        let state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        assert_eq!(state.combination_mode(&store), CombinationMode::Union);
    }

    #[test]
    fn persisted_mode_is_read_case_insensitively() {
        let mut store = MemoryPreferenceStore::new();
        store
            .set(TableKind::PatientTreatments.storage_key(), "intersection")
            .unwrap();

        let state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        assert_eq!(state.combination_mode(&store), CombinationMode::Intersection);
    }

    #[test]
    fn malformed_persisted_mode_falls_back_to_union() {
        let mut store = MemoryPreferenceStore::new();
        store
            .set(TableKind::PatientTreatments.storage_key(), "EXCLUSION")
            .unwrap();

        let state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        assert_eq!(state.combination_mode(&store), CombinationMode::Union);
    }

    #[test]
    fn override_wins_over_persisted_value() {
        let mut store = MemoryPreferenceStore::new();
        store
            .set(TableKind::PatientTreatments.storage_key(), "INTERSECTION")
            .unwrap();

        let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        // Effective mode starts as the persisted intersection; toggling
        // flips to union and persists it.
        assert_eq!(
            state.toggle_combination_mode(&mut store),
            CombinationMode::Union
        );
        assert_eq!(
            store.get(TableKind::PatientTreatments.storage_key()).as_deref(),
            Some("UNION")
        );
        assert_eq!(state.combination_mode(&store), CombinationMode::Union);
    }

    #[test]
    fn table_kinds_persist_independently() {
        let mut store = MemoryPreferenceStore::new();
        let mut patient = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
        patient.toggle_combination_mode(&mut store);

        let sample = SelectionFilterState::new(TableKind::SampleTreatments, Vec::new());
        assert_eq!(sample.combination_mode(&store), CombinationMode::Union);
    }

    #[test]
    fn locked_and_toggled_key_appears_in_intersection_payload() {
        // Toggling a locked key is tracked in the user selection, and
        // commit emits the selection verbatim.
        let mut store = MemoryPreferenceStore::new();
        let mut state =
            SelectionFilterState::new(TableKind::PatientTreatments, keys(&["locked"]));
        state.toggle_combination_mode(&mut store);
        state.toggle(RowKey::from("locked"));
        state.toggle(RowKey::from("free"));

        let payload = state.commit(&store);
        assert_eq!(payload, vec![keys(&["locked"]), keys(&["free"])]);
    }

    #[test]
    fn mode_parse_vocabulary() {
        assert_eq!(CombinationMode::parse("union"), Some(CombinationMode::Union));
        assert_eq!(
            CombinationMode::parse("Intersection"),
            Some(CombinationMode::Intersection)
        );
        assert_eq!(CombinationMode::parse(""), None);
        assert_eq!(CombinationMode::parse("neither"), None);
    }
}
