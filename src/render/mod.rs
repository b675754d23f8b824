pub mod camera;
pub mod viewport;

pub use camera::ActiveCamera;
pub use viewport::{SceneStatus, Viewport};
