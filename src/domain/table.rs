// ============================================================
// Layer 3 — Table Domain Type
// ============================================================
// A labelled table: numeric feature columns plus one
// categorical label per row. Produced by the CSV loader,
// partitioned by the splitter, consumed by the preprocessor.

/// Features and labels read from a CSV file.
///
/// `features[i]` and `labels[i]` describe the same row, and every
/// feature row has `feature_names.len()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub feature_names: Vec<String>,
    pub features:      Vec<Vec<f32>>,
    pub labels:        Vec<String>,
}

impl Table {
    pub fn new(feature_names: Vec<String>, features: Vec<Vec<f32>>, labels: Vec<String>) -> Self {
        debug_assert_eq!(features.len(), labels.len());
        Self { feature_names, features, labels }
    }

    pub fn num_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn num_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Build a new table from the rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            feature_names: self.feature_names.clone(),
            features:      indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels:        indices.iter().map(|&i| self.labels[i].clone()).collect(),
        }
    }
}
