//! HTTP handlers

pub mod assessments;
pub mod explanation;
pub mod health;
pub mod model;
