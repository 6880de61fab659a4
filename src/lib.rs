//! Train a small dense neural network classifier on tabular CSV data,
//! optionally after a random hyperparameter search.
//!
//! Layers, outermost first: [`cli`] → [`application`] → [`data`] / [`ml`],
//! with shared types in [`domain`] and [`infra`].

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
