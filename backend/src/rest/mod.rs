//! # REST API Interface Layer
//!
//! JSON endpoints that expose the belt catalog, registration and the
//! reporting views to a presentation layer. Handlers only translate between
//! HTTP and the domain services; every view reads the persisted store.
//!
//! - **belt_apis**: catalog listing and lookup
//! - **student_apis**: registration and the student directory
//! - **report_apis**: dashboard summary, directory stats and belt analytics

pub mod belt_apis;
pub mod report_apis;
pub mod student_apis;

pub use belt_apis::*;
pub use report_apis::*;
pub use student_apis::*;
