// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the CSV file to tensor batches:
//
//   CSV file
//       │
//       ▼
//   CsvLoader          → header check, f32 features + labels
//       │
//       ▼
//   stratified_split   → 80/20 train/validation, seed 42
//       │
//       ▼
//   preprocess         → StandardScaler + LabelBinarizer
//       │
//       ▼
//   TabularDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   TabularBatcher     → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader         → feeds (optionally shuffled) batches
//                        to the training loop

/// Reads a labelled CSV file
pub mod loader;

/// Stratified train/validation split
pub mod splitter;

/// Feature standardisation and label binarisation
pub mod preprocessor;

/// Implements Burn's Dataset trait for tabular samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
