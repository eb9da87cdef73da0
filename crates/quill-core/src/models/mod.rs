//! Asset models
//!
//! The filename convention that pairs an original with its derived thumbnail, the asset
//! kinds that pick a prefix, and the persisted asset list format.

mod asset;
mod asset_list;

pub use asset::*;
pub use asset_list::*;
