//! DEX venue adapters: read-only contract quoting

pub mod source;
pub mod codec;
pub mod decimals;
pub mod adapter;
pub mod survey;

pub use source::*;
pub use codec::*;
pub use decimals::*;
pub use adapter::*;
pub use survey::*;
