//! Comparison configuration.

/// Options for a section comparison.
///
/// Built once by the caller and passed explicitly to
/// [`compare_inputs`](crate::compare_inputs) and
/// [`diff_tables`](crate::diff_tables).
///
/// # Examples
///
/// ```
/// use elfdiff_core::DiffConfig;
///
/// // Compare everything, decoding both inputs concurrently
/// let config = DiffConfig::default();
///
/// // Ignore sections that are expected to differ
/// let custom = DiffConfig {
///     ignored_sections: vec![".note.gnu.build-id".to_string()],
///     ..Default::default()
/// };
/// assert!(custom.is_ignored(".note.gnu.build-id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    /// Section names left out of every part of the report.
    pub ignored_sections: Vec<String>,

    /// Decode the two inputs on separate threads.
    pub parallel: bool,
}

impl Default for DiffConfig {
    /// Default values:
    /// - `ignored_sections`: empty (compare every allocatable section)
    /// - `parallel`: true
    fn default() -> Self {
        Self {
            ignored_sections: Vec::new(),
            parallel: true,
        }
    }
}

impl DiffConfig {
    /// Returns `true` if `name` is excluded from comparison.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_sections.iter().any(|ignored| ignored == name)
    }
}
