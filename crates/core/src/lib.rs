//! Domain types shared by the Concord server and client crates.

pub mod error;
pub mod policy;
pub mod roles;
pub mod types;
