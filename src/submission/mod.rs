//! Transaction submission collaborator boundary

pub mod service;

pub use service::*;
