//! Framework-free building blocks shared by the dashboard views
//!
//! Nothing in this crate touches the DOM, the network or browser storage;
//! the frontend wires these types to its components.

pub mod shared;
