//! Row identity types shared by the table state modules.
//!
//! Every selectable row is addressed by an opaque [`RowKey`] derived from
//! the row's domain data. Derivation is pure and deterministic: the same
//! row always yields the same key, so selection state can be kept as plain
//! key collections without holding on to row data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity for one selectable table row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which logical treatments table a state instance belongs to.
///
/// The variant doubles as the persistence category: combination-mode
/// preferences are stored under [`TableKind::storage_key`], one entry per
/// kind, so patient and sample tables keep independent defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableKind {
    /// Treatments aggregated per patient.
    PatientTreatments,
    /// Treatments aggregated per sample, split by pre/post status.
    SampleTreatments,
}

impl TableKind {
    /// Stable key used to persist per-table preferences.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::PatientTreatments => "PATIENT_TREATMENTS_TABLE",
            Self::SampleTreatments => "SAMPLE_TREATMENTS_TABLE",
        }
    }

    /// Get display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PatientTreatments => "Patient Treatments",
            Self::SampleTreatments => "Sample Treatments",
        }
    }
}

/// Whether a sample-level treatment row covers the window before or after
/// treatment start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreatmentTime {
    Pre,
    Post,
}

impl TreatmentTime {
    /// Get display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pre => "Pre",
            Self::Post => "Post",
        }
    }
}

/// Minimal row shape needed by the identity function and the table state.
///
/// Real deployments carry many more columns (counts, frequencies, ...);
/// only the fields that feed [`row_unique_key`] are modeled here, plus the
/// entity count used for display ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentRow {
    /// Treatment identifier as reported by the study data.
    pub treatment: String,
    /// Pre/post window for sample-level rows; `None` for patient-level rows.
    pub time: Option<TreatmentTime>,
    /// Number of patients or samples the row aggregates.
    pub count: u32,
}

impl TreatmentRow {
    /// Patient-level row.
    pub fn patient(treatment: impl Into<String>, count: u32) -> Self {
        Self {
            treatment: treatment.into(),
            time: None,
            count,
        }
    }

    /// Sample-level row for the given treatment window.
    pub fn sample(treatment: impl Into<String>, time: TreatmentTime, count: u32) -> Self {
        Self {
            treatment: treatment.into(),
            time: Some(time),
            count,
        }
    }
}

/// Derive the unique selection key for a treatment row.
///
/// Patient rows are keyed by treatment id alone; sample rows additionally
/// carry the pre/post window so the two phases select independently.
#[must_use]
pub fn row_unique_key(row: &TreatmentRow) -> RowKey {
    match row.time {
        None => RowKey::new(row.treatment.clone()),
        Some(time) => RowKey::new(format!("{}-{}", row.treatment, time.label())),
    }
}

/// Capability implemented by table variants that lock a baseline of rows
/// into the selection.
///
/// Pre-selected rows are always considered selected and cannot be toggled
/// off individually; concrete tables typically derive them from the
/// currently applied filters.
pub trait PreSelectedRows {
    /// Keys of the rows locked into the selection.
    fn pre_selected_row_keys(&self) -> &[RowKey];
}
