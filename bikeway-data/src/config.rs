//! Pipeline configuration.

use std::num::NonZeroUsize;

use bikeway_core::{BikewayCategory, MergeConfig};

/// Column holding the bikeway class in the municipal export.
pub const DEFAULT_CATEGORY_COLUMN: usize = 2;

/// Column holding the `MULTILINESTRING` geometry in the municipal export.
pub const DEFAULT_GEOMETRY_COLUMN: usize = 7;

/// Keep every third parsed point.
pub const DEFAULT_SAMPLE_STRIDE: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(stride) => stride,
    None => NonZeroUsize::MIN,
};

/// Configuration for [`reconstruct`](crate::reconstruct).
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use bikeway_core::BikewayCategory;
/// use bikeway_data::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_sample_stride(NonZeroUsize::MIN)
///     .with_allowed_categories([BikewayCategory::CycleTrack]);
/// assert_eq!(config.required_fields(), 8);
/// assert!(!config.allows(BikewayCategory::BicycleLane));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Zero-based column of the category label.
    pub category_column: usize,
    /// Zero-based column of the geometry literal.
    pub geometry_column: usize,
    /// Down-sampling stride applied to each geometry.
    pub sample_stride: NonZeroUsize,
    /// Categories admitted into the network.
    pub allowed_categories: Vec<BikewayCategory>,
    /// Merge engine settings.
    pub merge: MergeConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            category_column: DEFAULT_CATEGORY_COLUMN,
            geometry_column: DEFAULT_GEOMETRY_COLUMN,
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            allowed_categories: BikewayCategory::ALL.to_vec(),
            merge: MergeConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the category and geometry columns.
    #[must_use]
    pub fn with_columns(mut self, category: usize, geometry: usize) -> Self {
        self.category_column = category;
        self.geometry_column = geometry;
        self
    }

    /// Set the down-sampling stride.
    #[must_use]
    pub fn with_sample_stride(mut self, stride: NonZeroUsize) -> Self {
        self.sample_stride = stride;
        self
    }

    /// Restrict the admitted categories.
    #[must_use]
    pub fn with_allowed_categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = BikewayCategory>,
    {
        self.allowed_categories = categories.into_iter().collect();
        self
    }

    /// Replace the merge engine settings.
    #[must_use]
    pub fn with_merge(mut self, merge: MergeConfig) -> Self {
        self.merge = merge;
        self
    }

    /// Minimum number of fields a row needs to be considered.
    #[must_use]
    pub fn required_fields(&self) -> usize {
        self.category_column.max(self.geometry_column) + 1
    }

    /// Whether rows of `category` are admitted.
    #[must_use]
    pub fn allows(&self, category: BikewayCategory) -> bool {
        self.allowed_categories.contains(&category)
    }
}
