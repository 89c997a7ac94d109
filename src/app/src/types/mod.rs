//! Domain-based type organization
//!
//! Types are organized by domain to match the structure in `update/`:
//! - auth: Session and login gate types
//! - config: Device configuration form types
//! - device: Live system info and polling types
//! - common: Status messages and lenient JSON accessors

pub mod auth;
pub mod common;
pub mod config;
pub mod device;

pub use auth::*;
pub use common::*;
pub use config::*;
pub use device::*;
