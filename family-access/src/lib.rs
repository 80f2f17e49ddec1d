//! Access control and data visibility engine for the Family Budget application
//!
//! This crate centralizes every decision about who may see or change what:
//! - Role hierarchy (`SUPER_ADMIN > ADMIN > MANAGER > MEMBER`, translator outside it)
//! - Family (tenant) isolation of the users an actor may enumerate
//! - Amount masking for adult family members who have not opted in
//! - Authorization of mutating actions with machine-readable denial reasons
//!
//! The engine never loads or stores data. Callers pass in a consistent
//! snapshot of users and records and get back a verdict.
//!
//! # Core Concepts
//!
//! - **Scope**: the set of users an actor may enumerate at all
//! - **Masking**: reporting an amount as zero and flagged while keeping metadata visible
//! - **Decision**: `Allow` or `Deny(reason)` for one action against one target
//!
//! # Example
//!
//! ```rust
//! use family_access::{AccessConfig, AccessRequest, Decision, DecisionEngine, DenyReason, Role, User};
//!
//! let engine = DecisionEngine::new(AccessConfig::default()).unwrap();
//!
//! let manager = User::new("mom", Role::Manager).in_family("smiths");
//! let child = User::new("kid", Role::Member).in_family("smiths").created_by(&manager.id);
//! let neighbour = User::new("ned", Role::Member).in_family("flanders");
//!
//! assert!(engine.in_scope(&manager, &child));
//! assert_eq!(
//!     engine.authorize(&manager, &AccessRequest::DeleteUser { target: &neighbour }),
//!     Decision::Deny(DenyReason::OutOfScope),
//! );
//! ```

pub mod role;
pub mod models;
pub mod age;
pub mod tenant;
pub mod visibility;
pub mod masking;
pub mod authorize;
pub mod lifecycle;
pub mod clock;
pub mod config;
pub mod logging;
pub mod engine;

pub use role::*;
pub use models::*;
pub use visibility::AmountVisibility;
pub use masking::{LedgerView, MaskedRecord};
pub use authorize::{AccessRequest, Action, Decision, DenyReason, RoleChange};
pub use clock::*;
pub use config::*;
pub use engine::*;
