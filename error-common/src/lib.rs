//! Common error handling utilities for the Family Budget engine
//!
//! This module provides the error type, stable error codes and error context
//! shared by every crate in the workspace. Access-control verdicts are not
//! errors in themselves; a caller that needs to abort on a denial converts it
//! into [`BudgetError::AccessDenied`] and surfaces it as a 403-equivalent.
//!
//! # Error Categories
//!
//! - **AccessDenied**: an authorization verdict the caller chose to enforce
//! - **InvalidTransition**: an illegal user status change
//! - **ValidationError**: malformed snapshots at the deserialization boundary
//! - **ConfigError**: unusable engine configuration
//!
//! # Example
//!
//! ```rust
//! use error_common::{BudgetError, ErrorContext, codes};
//!
//! let err = BudgetError::access_denied(codes::authorization::OUT_OF_SCOPE, "outside your family");
//! assert_eq!(err.code(), "AUTHZ_3102");
//! assert_eq!(err.http_status(), 403);
//!
//! let ctx = ErrorContext::new()
//!     .with_user_id("u-42".to_string())
//!     .add_context("action", "DELETE_USER");
//! assert_eq!(ctx.additional.get("action").map(String::as_str), Some("DELETE_USER"));
//! ```

pub mod types;
pub mod context;
pub mod codes;

pub use types::*;
pub use context::*;
