//! Category filter deciding which apps make it into the output
//!
//! Matching is case-insensitive and an app needs only one matching category.

use crate::record::AppRecord;

/// Case-insensitive set of target categories
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    /// Targets as configured, kept for reporting
    targets: Vec<String>,

    /// Lower-cased targets used for matching
    lowered: Vec<String>,
}

impl CategoryFilter {
    /// Creates a filter from the configured target categories
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();
        let lowered = targets.iter().map(|t| t.to_lowercase()).collect();
        Self { targets, lowered }
    }

    /// Returns true if at least one of the record's categories is a target
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_sieve::CategoryFilter;
    ///
    /// let filter = CategoryFilter::new(["Шутеры", "Инди"]);
    /// assert!(filter.matches_categories(&["ШУТЕРЫ".to_string()]));
    /// assert!(!filter.matches_categories(&[]));
    /// ```
    pub fn matches_categories(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| self.is_target(c))
    }

    /// Returns true if the record belongs to at least one target category
    pub fn matches(&self, record: &AppRecord) -> bool {
        self.matches_categories(&record.categories)
    }

    /// Returns true if a single category name is a target
    pub fn is_target(&self, category: &str) -> bool {
        let lowered = category.to_lowercase();
        self.lowered.iter().any(|t| *t == lowered)
    }

    /// Returns the configured spelling of a target matching `category`
    pub fn canonical(&self, category: &str) -> Option<&str> {
        let lowered = category.to_lowercase();
        self.lowered
            .iter()
            .position(|t| *t == lowered)
            .map(|i| self.targets[i].as_str())
    }

    /// Target categories in configuration order
    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}
