pub mod gltf;
pub mod texture;

pub use gltf::{load_model, ModelData};
pub use texture::{load_cubemap, load_png, ImageData};
