pub mod animation;
pub mod asset;
pub mod loader;

pub use animation::{Motion, NodeAnimator};
pub use asset::{EmbeddedCamera, NodeHandle, ParkAsset};
pub use loader::{begin_load, AssetLoad};
