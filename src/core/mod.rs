//! Core functionality for instance provisioning
//!
//! Wraps the Terraform sub-invocations and the destroy confirmation gate.

pub mod confirm;
pub mod terraform;

pub use confirm::confirm_destroy;
pub use terraform::Terraform;
