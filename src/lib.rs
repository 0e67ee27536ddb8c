//! **Selection and filter state management for clinical cohort table views.**
//!
//! `cohort-tables` provides the presentational-state core behind treatment
//! and mutation tables in cohort exploration UIs: row selection against a
//! locked baseline, union/intersection filter combination with an
//! externally persisted mode preference, partition-based row highlighting,
//! and column visibility policy. It contains no rendering: a front-end
//! binds its own widgets to this state and reacts through an explicit
//! callback seam.
//!
//! ## Key Features
//!
//! - **Selection accumulation**: toggle rows on and off with
//!   symmetric-difference semantics; rows locked by the applied filters
//!   stay selected no matter what.
//! - **Union/intersection combination**: committed selections become a
//!   filter payload shaped by the active combination mode, and the mode
//!   choice persists per table kind across instances.
//! - **Explicit persistence seam**: preferences go through the
//!   [`PreferenceStore`] trait (a file-backed document store for
//!   production, an in-memory store for tests), never a hidden global.
//! - **Highlight buckets**: rows alternate between two visual buckets by
//!   filter-group membership, deterministically.
//! - **Column policy**: pure rules deciding which mutation-table columns
//!   carry information for a given study context.
//!
//! ## Core Concepts & Modules
//!
//! - **[`selection`]**: [`SelectionFilterState`], the selection
//!   accumulator and combination-mode logic.
//! - **[`table`]**: [`TreatmentsTableState`], the full per-table state
//!   object wiring selection, highlighting, modal/sort bookkeeping, and
//!   the caller callback together.
//! - **[`store`]**: the [`PreferenceStore`] trait and its file-backed and
//!   in-memory implementations.
//! - **[`highlight`]**: [`FilterPartition`] and [`HighlightBucket`].
//! - **[`columns`]**: [`ColumnContext`] visibility policy.
//! - **[`model`]**: row identity ([`RowKey`], [`row_unique_key`]) and
//!   table kinds.
//!
//! ## Getting Started
//!
//! ```
//! use cohort_tables::{
//!     MemoryPreferenceStore, RowKey, SelectionFilterState, TableKind,
//! };
//!
//! let mut store = MemoryPreferenceStore::new();
//! let mut state = SelectionFilterState::new(TableKind::PatientTreatments, Vec::new());
//!
//! state.toggle(RowKey::from("Carboplatin"));
//! state.toggle(RowKey::from("Taxol"));
//!
//! // Union mode (the default): one group with every selected key.
//! let payload = state.commit(&store);
//! assert_eq!(payload.len(), 1);
//! assert_eq!(payload[0].len(), 2);
//!
//! // Flip to intersection and the next commit emits singleton groups.
//! state.toggle_combination_mode(&mut store);
//! state.toggle(RowKey::from("Carboplatin"));
//! state.toggle(RowKey::from("Taxol"));
//! let payload = state.commit(&store);
//! assert_eq!(payload.len(), 2);
//! ```
//!
//! ## Wiring a Table
//!
//! [`TreatmentsTableState`] binds the pieces together the way a view
//! component would use them:
//!
//! ```
//! use cohort_tables::{
//!     MemoryPreferenceStore, RowKey, TableKind, TreatmentsTableState,
//! };
//!
//! let filters = vec![vec![RowKey::from("Cisplatin")]];
//! let mut table = TreatmentsTableState::new(
//!     TableKind::SampleTreatments,
//!     filters,
//!     Box::new(MemoryPreferenceStore::new()),
//!     Box::new(|payload| {
//!         // Hand the payload to the filtering backend.
//!         let _ = payload;
//!     }),
//! );
//!
//! // Rows named by the applied filters are locked.
//! assert!(table.is_row_disabled(&RowKey::from("Cisplatin")));
//!
//! table.toggle_row(RowKey::from("Taxol"));
//! table.apply_selection(); // invokes the callback exactly once
//! ```

pub mod columns;
pub mod error;
pub mod highlight;
pub mod model;
pub mod selection;
pub mod store;
pub mod table;

// Re-export the primary public API at the crate root.
pub use columns::{ColumnContext, MutationColumn};
pub use error::{Result, StoreError};
pub use highlight::{FilterPartition, HighlightBucket};
pub use model::{
    row_unique_key, PreSelectedRows, RowKey, TableKind, TreatmentRow, TreatmentTime,
};
pub use selection::{CombinationMode, FilterPayload, SelectionFilterState};
pub use store::{
    preferences_json_schema, FilePreferenceStore, MemoryPreferenceStore, PreferenceDocument,
    PreferenceStore,
};
pub use table::{ModalState, SelectionCallback, SortDirection, TreatmentsTableState};
