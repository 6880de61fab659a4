// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with: a labelled table, a hyperparameter
// configuration, and the errors raised while reading data.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only plain data and traits

// A labelled table of numeric features
pub mod table;

// A point in the hyperparameter search space
pub mod hyper_params;

// Errors raised while loading, splitting and preprocessing data
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
