//! Common test utilities for error-contract testing.
//!
//! This module provides test infrastructure including:
//!
//! - [`harness`] - In-process API harness
//! - [`fixtures`] - Response bodies and contract files

pub mod fixtures;
pub mod harness;
