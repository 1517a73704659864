//! Error taxonomy and result alias

pub mod bot_error;

pub use bot_error::*;
