//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `grading` - Grade scale, GPA aggregation, report card assembly
//! - `records` - Durable student, term, course, enrollment and grade rows

pub mod foundation;
pub mod grading;
pub mod records;
