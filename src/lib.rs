//! Comparison engine for gas turbine start-up trends.
//!
//! Aligns an uploaded "failed start-up" recording against a cached
//! "successful start-up" baseline, computes per-channel absolute percentage
//! deviation, classifies channels against an operator tolerance and keeps a
//! navigable cursor over the selected channels. Rendering is left to the
//! embedding presentation layer; this crate only prepares its data.

pub mod align;
pub mod browser;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod deviation;
pub mod error;
pub mod session;
pub mod tolerance;
