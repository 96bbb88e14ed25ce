pub mod camera;
pub mod disk;
pub mod error;
pub mod event_loop;
pub mod layout;
pub mod mesh;
pub mod model;
pub mod noise;
pub mod render_state;
pub mod scene;
pub mod signal;
pub mod texture;
pub mod types;
pub mod util;

pub use {disk::Disk, error::Error, mesh::RenderBuffer, signal::Signal};
