// ============================================================
// Layer 4 — Stratified Train/Validation Splitter
// ============================================================
// Splits row indices into a training set and a validation set
// so that every class keeps (approximately) the same share in
// both partitions.
//
// How the split works:
//   1. validation size = ceil(test_fraction * n)
//   2. each class gets floor(val_size * class_count / n) rows,
//      leftover rows go to the classes with the largest
//      fractional remainder (ties → class order)
//   3. each class's rows are shuffled with a seeded RNG and the
//      first k go to validation, the rest to training
//   4. both partitions are shuffled once more so classes are
//      interleaved
//
// With a fixed seed the split is reproducible run to run.

use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::error::DataError;

/// Proportion of rows held out for validation.
pub const VALIDATION_FRACTION: f64 = 0.2;

/// Seed used for the train/validation split.
pub const SPLIT_SEED: u64 = 42;

/// Row indices of the two partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub val:   Vec<usize>,
}

/// Stratified split of `labels` into (train, validation) row indices.
///
/// # Errors
/// Returns [`DataError::Split`] when a class has fewer than two rows,
/// or when either partition would hold fewer rows than there are classes.
pub fn stratified_split(
    labels:        &[String],
    test_fraction: f64,
    seed:          u64,
) -> Result<SplitIndices, DataError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DataError::Split(format!(
            "validation fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let total   = labels.len();
    let n_val   = ((total as f64) * test_fraction).ceil() as usize;
    let n_train = total.saturating_sub(n_val);

    // BTreeMap keeps class order stable, which keeps the split reproducible
    let mut by_class: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, label) in labels.iter().enumerate() {
        by_class.entry(label.as_str()).or_default().push(i);
    }

    if let Some((label, rows)) = by_class.iter().find(|(_, rows)| rows.len() < 2) {
        return Err(DataError::Split(format!(
            "class '{label}' has only {} row(s); every class needs at least 2",
            rows.len()
        )));
    }

    let num_classes = by_class.len();
    if n_val < num_classes || n_train < num_classes {
        return Err(DataError::Split(format!(
            "{total} rows cannot be split into {n_train} train / {n_val} validation \
             rows covering all {num_classes} classes"
        )));
    }

    let counts: Vec<usize> = by_class.values().map(Vec::len).collect();
    let val_counts         = allocate(&counts, n_val);

    let mut rng   = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut val   = Vec::with_capacity(n_val);

    for (mut rows, k) in by_class.into_values().zip(val_counts) {
        rows.shuffle(&mut rng);
        let rest = rows.split_off(k);
        val.extend(rows);
        train.extend(rest);
    }

    train.shuffle(&mut rng);
    val.shuffle(&mut rng);

    tracing::debug!(
        "Stratified split: {} training, {} validation across {} classes",
        train.len(),
        val.len(),
        num_classes,
    );

    Ok(SplitIndices { train, val })
}

/// Distribute `n` draws over classes proportionally to `counts`
/// using largest-remainder rounding. Never allocates more than a
/// class holds, so `n` is capped at the total count.
fn allocate(counts: &[usize], n: usize) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }
    let n = n.min(total);

    let mut alloc: Vec<usize> = counts.iter().map(|&c| c * n / total).collect();
    let mut left = n - alloc.iter().sum::<usize>();

    // remainder of c * n / total, as an exact integer numerator
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse((counts[i] * n) % total));

    for &i in order.iter().cycle() {
        if left == 0 {
            break;
        }
        if alloc[i] < counts[i] {
            alloc[i] += 1;
            left     -= 1;
        }
    }
    alloc
}
