//! Scene file support for Lumen.
//!
//! A scene file is a JSON array of typed records:
//!
//! ```json
//! [
//!   { "type": "camera", "width": 2.0, "height": 2.0 },
//!   { "type": "sphere", "position": [0, 0, 5], "radius": 1,
//!     "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1] },
//!   { "type": "light", "position": [0, 5, 0], "color": [1, 1, 1],
//!     "radial-a0": 1, "radial-a1": 0, "radial-a2": 0 }
//! ]
//! ```
//!
//! ## Record types
//!
//! - `camera`: `width`, `height`, `position`, `facing`, `up`, `focal_length`
//! - `light`: `position`, `color`, `radial-a0..2`, spotlight `direction`, `theta`, `angular-a0`
//! - `plane`: `position`, `normal`
//! - `sphere`: `position`, `radius`
//! - `quadric`: `A` through `J`
//!
//! Every object also takes `diffuse_color` (or `color`), `specular_color`,
//! `ns`, `reflectivity`, `refractivity` and `ior`.

mod types;
mod loader;

pub use types::*;
pub use loader::*;
