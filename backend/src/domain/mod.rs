//! # Domain Module
//!
//! Business logic for the dojo portal: the belt catalog, the student record
//! store, registration from form input, and the aggregation engine that
//! drives every reporting view.
//!
//! ## Module Organization
//!
//! - **belt_catalog**: the fixed ten-entry belt and exam fee schedule
//! - **record_store**: the persisted student working set
//! - **registration**: form coercion and student creation
//! - **aggregation**: pure search, filter, sort and rollup functions
//! - **fee_table**: currency formatting for table display
//! - **directory_service**: read-side views over the store
//!
//! ## Business Rules
//!
//! - A student's total is exam + food + rice (absent counts as zero) + garment
//! - Serial numbers are assigned as the current count plus one and never reused
//! - Students keep a copy of the belt they registered on
//! - Forms without a name or belt never reach the store

pub mod aggregation;
pub mod belt_catalog;
pub mod directory_service;
pub mod fee_table;
pub mod record_store;
pub mod registration;

pub use aggregation::{FeeTierPolicy, StudentQuery};
pub use directory_service::DirectoryService;
pub use fee_table::{FeeTableConfig, FeeTableService};
pub use record_store::StudentStore;
pub use registration::{RegistrationError, RegistrationService};
