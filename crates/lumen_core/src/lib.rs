//! Lumen Core - Scene records and scene file loading.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Light`, `Object`, `Shape`, `Surface`
//! - **Scene files**: JSON scene parsing and record validation
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights",
//!     scene.objects.len(),
//!     scene.lights.len());
//! ```

pub mod error;
pub mod scene;
pub mod scene_file;

// Re-export commonly used types
pub use error::{SceneError, SceneResult};
pub use scene::{
    Camera, Light, Object, Plane, Quadric, Scene, Shape, Sphere, Spotlight, Surface,
    ViewPlaneBasis,
};
pub use scene_file::{load_scene, load_scene_from_str};
