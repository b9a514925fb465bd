// Asset domain module
// Contains the asset aggregate root, its status value object and disposals

#![allow(clippy::module_inception)]

pub mod asset;
pub mod disposal;
pub mod value_objects;

// Re-export main types for convenience
pub use asset::{Asset, AssetChanges, AssetDetails};
pub use disposal::{AssetDisposal, DisposalRequest};
pub use value_objects::AssetStatus;
