//! ASCII Cube - a colorful rotating 3D cube renderer for the terminal
//!
//! This crate renders a rotating polyhedron as ASCII art: vertices are rotated
//! and perspective-projected every frame, faces are lit, depth-sorted and
//! filled back to front, and a wireframe outline is drawn on top. The result
//! is a character/color grid flushed to the terminal with ANSI escape codes.

pub mod cli;
pub mod launcher;
pub mod prelude;
pub mod rasterizer;
pub mod renderer;
pub mod scene;

pub use cli::{Cli, Shape};
pub use rasterizer::{Cell, RasterConfig, Rasterizer, ScreenBuffer, ShadeLevel, Shading};
pub use renderer::{frame_delay, Renderer};
pub use scene::{Mesh, RotationState, Vec3};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Package description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default shading characters for the three-level mode (bright, neutral, dark)
pub const DEFAULT_SHADE_CHARS: [char; 3] = ['.', '-', '#'];

/// Default gradient ramp for the N-level mode, ordered darkest to lightest
pub const DEFAULT_GRADIENT_RAMP: &str = "@%#*+=-:./\\|~<>?";

/// Default wireframe outline character
pub const DEFAULT_OUTLINE_CHAR: char = '*';

/// Error types used throughout the application
#[derive(thiserror::Error, Debug)]
pub enum AsciiCubeError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to open a new terminal window: {0}")]
    Launcher(String),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, AsciiCubeError>;

/// Utility functions
pub mod utils {
    /// Wrap an angle in degrees into `[0, 360)`.
    pub fn wrap_degrees(angle: f64) -> f64 {
        angle.rem_euclid(360.0)
    }
}
