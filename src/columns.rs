//! Column visibility policy for patient-view mutation tables.
//!
//! Some columns only carry information in specific study contexts: an
//! expression rank is meaningless without an expression profile, and a
//! per-sample breakdown is noise when the view covers a single sample.
//! The policy here decides which columns to show from the study context
//! alone, independent of any rendering layer.

use serde::{Deserialize, Serialize};

/// Columns of the patient-view mutation table governed by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationColumn {
    Gene,
    MrnaExpr,
    Samples,
    CopyNumber,
}

impl MutationColumn {
    /// Get display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gene => "Gene",
            Self::MrnaExpr => "mRNA Expr.",
            Self::Samples => "Samples",
            Self::CopyNumber => "Copy #",
        }
    }

    /// All policy-governed columns, in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Gene, Self::MrnaExpr, Self::Samples, Self::CopyNumber]
    }
}

/// Study context the visibility rules consult.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnContext {
    /// Samples shown in the current view.
    pub sample_ids: Vec<String>,
    /// mRNA expression rank molecular profile, when the study has one.
    pub mrna_profile_id: Option<String>,
    /// Discrete copy-number molecular profile, when the study has one.
    pub cna_profile_id: Option<String>,
}

impl ColumnContext {
    /// Context for the given samples with no molecular profiles.
    #[must_use]
    pub fn for_samples(sample_ids: Vec<String>) -> Self {
        Self {
            sample_ids,
            ..Self::default()
        }
    }

    /// Whether a column should be shown in this context.
    ///
    /// Expression ranks need a profile and exactly one sample; the
    /// per-sample column needs at least two samples; discrete copy-number
    /// needs a profile and at most one sample.
    #[must_use]
    pub fn is_visible(&self, column: MutationColumn) -> bool {
        match column {
            MutationColumn::Gene => true,
            MutationColumn::MrnaExpr => {
                self.mrna_profile_id.is_some() && self.sample_ids.len() == 1
            }
            MutationColumn::Samples => self.sample_ids.len() > 1,
            MutationColumn::CopyNumber => {
                self.cna_profile_id.is_some() && self.sample_ids.len() <= 1
            }
        }
    }

    /// Columns visible in this context, in display order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<MutationColumn> {
        MutationColumn::all()
            .into_iter()
            .filter(|column| self.is_visible(*column))
            .collect()
    }
}
