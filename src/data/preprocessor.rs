// ============================================================
// Layer 4 — Feature Scaler and Label Binarizer
// ============================================================
// Turns the raw split tables into model-ready samples.
//
// Features: standardised per column,
//   x' = (x - mean) / std
//   mean and (population) std are learned on the TRAINING rows
//   only, then applied unchanged to the validation rows so no
//   validation statistics leak into training. A constant column
//   has std 0 and is only centred.
//
// Labels: one-hot encoded,
//   classes = sorted distinct training labels
//   "cat" with classes [cat, dog, fox] → [1, 0, 0]
//   Labels sort numerically when every label is a number
//   ("2" before "10"), lexicographically otherwise.

use std::collections::BTreeSet;

use crate::data::dataset::TabularSample;
use crate::domain::{error::DataError, table::Table};

// ─── StandardScaler ───────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean:  Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Learn per-column mean and standard deviation.
    pub fn fit(rows: &[Vec<f32>]) -> Self {
        let n_cols = rows.first().map_or(0, Vec::len);
        let n      = rows.len().max(1) as f64;

        let mut mean = vec![0.0f64; n_cols];
        for row in rows {
            for (m, &x) in mean.iter_mut().zip(row) {
                *m += x as f64;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0f64; n_cols];
        for row in rows {
            for ((v, &x), m) in var.iter_mut().zip(row).zip(&mean) {
                let d = x as f64 - m;
                *v += d * d;
            }
        }

        let scale = var
            .into_iter()
            .enumerate()
            .map(|(col, v)| {
                let std = (v / n).sqrt();
                if std > 0.0 {
                    std
                } else {
                    tracing::warn!("Feature column {col} is constant; centring only");
                    1.0
                }
            })
            .collect();

        Self { mean, scale }
    }

    pub fn num_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform_row(&self, row: &[f32]) -> Result<Vec<f32>, DataError> {
        if row.len() != self.num_features() {
            return Err(DataError::FeatureCount {
                expected: self.num_features(),
                actual:   row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (m, s))| ((x as f64 - m) / s) as f32)
            .collect())
    }

    pub fn transform(&self, rows: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, DataError> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }
}

// ─── LabelBinarizer ───────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBinarizer {
    classes: Vec<String>,
}

impl LabelBinarizer {
    pub fn fit(labels: &[String]) -> Result<Self, DataError> {
        let distinct: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
        let mut classes: Vec<String> = distinct.into_iter().map(str::to_string).collect();

        let numeric: Option<Vec<f64>> = classes.iter().map(|c| c.parse::<f64>().ok()).collect();
        if let Some(values) = numeric {
            let mut paired: Vec<(f64, String)> = values.into_iter().zip(classes).collect();
            paired.sort_by(|a, b| a.0.total_cmp(&b.0));
            classes = paired.into_iter().map(|(_, c)| c).collect();
        }

        if classes.len() < 2 {
            return Err(DataError::TooFewClasses(classes.len()));
        }
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn class_index(&self, label: &str) -> Result<usize, DataError> {
        self.classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| DataError::UnknownLabel(label.to_string()))
    }

    /// One-hot vector for a single label.
    pub fn transform_one(&self, label: &str) -> Result<Vec<f32>, DataError> {
        let idx = self.class_index(label)?;
        let mut onehot = vec![0.0f32; self.num_classes()];
        onehot[idx] = 1.0;
        Ok(onehot)
    }
}

// ─── Preprocessing step ───────────────────────────────────────────────────────
/// Scaled, binarised train/validation samples plus the shapes
/// the model factory needs.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub train:       Vec<TabularSample>,
    pub val:         Vec<TabularSample>,
    pub input_dim:   usize,
    pub num_classes: usize,
    pub classes:     Vec<String>,
}

/// Fit the scaler and binarizer on `train`, apply both to `train` and `val`.
pub fn preprocess(train: &Table, val: &Table) -> Result<Prepared, DataError> {
    let scaler    = StandardScaler::fit(&train.features);
    let binarizer = LabelBinarizer::fit(&train.labels)?;

    let to_samples = |table: &Table| -> Result<Vec<TabularSample>, DataError> {
        scaler
            .transform(&table.features)?
            .into_iter()
            .zip(&table.labels)
            .map(|(features, label)| -> Result<TabularSample, DataError> {
                Ok(TabularSample {
                    features,
                    target: binarizer.transform_one(label)?,
                })
            })
            .collect()
    };

    let prepared = Prepared {
        train:       to_samples(train)?,
        val:         to_samples(val)?,
        input_dim:   scaler.num_features(),
        num_classes: binarizer.num_classes(),
        classes:     binarizer.classes().to_vec(),
    };

    tracing::debug!(
        "Preprocessed {} features into {} classes: {:?}",
        prepared.input_dim,
        prepared.num_classes,
        prepared.classes,
    );
    Ok(prepared)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<f32>>, labels: &[&str]) -> Table {
        let names = (0..rows[0].len()).map(|i| format!("f{i}")).collect();
        Table::new(names, rows, labels.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_output_feature_count_matches_input() {
        let train = table(
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.5]],
            &["a", "b", "a"],
        );
        let val = table(vec![vec![0.0, 0.0, 0.0]], &["b"]);
        let p   = preprocess(&train, &val).unwrap();

        assert_eq!(p.input_dim, 3);
        assert!(p.train.iter().chain(&p.val).all(|s| s.features.len() == 3));
    }

    #[test]
    fn test_scaled_training_columns_are_standardised() {
        let rows: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32, 100.0 + 3.0 * i as f32]).collect();
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&rows).unwrap();

        for col in 0..2 {
            let xs: Vec<f64> = scaled.iter().map(|r| r[col] as f64).collect();
            let mean = xs.iter().sum::<f64>() / xs.len() as f64;
            let var  = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;
            assert!(mean.abs() < 1e-5);
            assert!((var.sqrt() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_validation_uses_training_statistics() {
        let scaler = StandardScaler::fit(&[vec![0.0], vec![2.0]]);
        // mean 1, std 1
        assert_eq!(scaler.transform_row(&[3.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_constant_column_is_centred_only() {
        let scaler = StandardScaler::fit(&[vec![5.0], vec![5.0]]);
        assert_eq!(scaler.transform_row(&[7.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0]]);
        assert!(matches!(
            scaler.transform_row(&[1.0]),
            Err(DataError::FeatureCount { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_binarizer_one_hot() {
        let labels: Vec<String> = ["dog", "cat", "fox", "cat"].iter().map(|s| s.to_string()).collect();
        let lb = LabelBinarizer::fit(&labels).unwrap();

        assert_eq!(lb.classes(), ["cat", "dog", "fox"]);
        assert_eq!(lb.transform_one("dog").unwrap(), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_binary_labels_still_get_two_columns() {
        let labels: Vec<String> = ["0", "1", "1"].iter().map(|s| s.to_string()).collect();
        let lb = LabelBinarizer::fit(&labels).unwrap();
        assert_eq!(lb.transform_one("1").unwrap(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_numeric_labels_sort_by_value() {
        let labels: Vec<String> = ["10", "2", "1"].iter().map(|s| s.to_string()).collect();
        let lb = LabelBinarizer::fit(&labels).unwrap();
        assert_eq!(lb.classes(), ["1", "2", "10"]);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let labels: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let lb = LabelBinarizer::fit(&labels).unwrap();
        assert!(matches!(lb.transform_one("c"), Err(DataError::UnknownLabel(_))));
    }

    #[test]
    fn test_single_class_is_rejected() {
        let labels = vec!["a".to_string(), "a".to_string()];
        assert!(matches!(LabelBinarizer::fit(&labels), Err(DataError::TooFewClasses(1))));
    }
}
