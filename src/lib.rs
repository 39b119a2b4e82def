pub mod app;
pub mod asset;
pub mod camera;
pub mod cli;
pub mod demo;
pub mod demos;
pub mod frame;
pub mod geometry;
pub mod loaders;
pub mod panel;
pub mod renderer;
pub mod uniforms;

pub use demo::DemoConfig;
pub use demos::Demo;
