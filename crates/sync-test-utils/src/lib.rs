//! Shared test utilities for the settings-sync workspace.
//!
//! Standardised git fixtures so crate test suites do not each hand-roll
//! repository setup. Dev-dependency only — never published.

pub mod git;
