use crate::model::ConduitCategory;

/// Outcome of one category's unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryReport {
    pub category: ConduitCategory,
    /// Straight conduits that were queried.
    pub conduits: usize,
    /// Conduits skipped for unsupported shape or invalid dimensions.
    pub skipped_conduits: usize,
    /// Unique crossings found.
    pub crossings: usize,
    /// Crossings skipped because the wall's level was not found.
    pub skipped_crossings: usize,
    /// Openings created and kept.
    pub placed: usize,
    /// Openings the host failed to create.
    pub failed: usize,
    /// Whether the unit of work was rolled back.
    pub aborted: bool,
}

impl CategoryReport {
    #[must_use]
    pub fn new(category: ConduitCategory) -> Self {
        Self {
            category,
            conduits: 0,
            skipped_conduits: 0,
            crossings: 0,
            skipped_crossings: 0,
            placed: 0,
            failed: 0,
            aborted: false,
        }
    }
}

/// Outcome of a whole placement run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementReport {
    pub categories: Vec<CategoryReport>,
}

impl PlacementReport {
    /// Number of openings placed across all categories.
    #[must_use]
    pub fn total_placed(&self) -> usize {
        self.categories.iter().map(|c| c.placed).sum()
    }

    /// Returns the report of one category, if it was processed.
    #[must_use]
    pub fn category(&self, category: ConduitCategory) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }
}
