//! Logic Module - Scoring & Inference
//!
//! - `features/` - raw answers → composite scores → feature record
//! - `model/` - artifacts, classifier backends, label decoding, invocation
//! - `engine` - validate → derive → invoke for one submission

pub mod engine;
pub mod error;
pub mod features;
pub mod model;
