//! Client side of member management.
//!
//! [`api`] talks to the member endpoints, [`modal`] holds the shared modal
//! state and [`dialog`] is the members dialog built on both.

pub mod api;
pub mod config;
pub mod dialog;
pub mod error;
pub mod modal;
pub mod model;
