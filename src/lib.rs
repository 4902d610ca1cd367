//! Report Card - GPA computation and report card generation
//!
//! This crate converts letter grades and credit hours into a weighted GPA,
//! resolves submissions onto durable student, term, course and grade
//! records, and assembles report cards that can be rendered and exported.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
