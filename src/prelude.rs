// Re-export commonly used types for convenience
pub use crate::cli::{color_by_name, Cli, Shape};
pub use crate::rasterizer::{
    draw_line, fill_polygon, Cell, RasterConfig, Rasterizer, ScreenBuffer, ShadeLevel, Shading,
};
pub use crate::renderer::{frame_delay, Renderer};
pub use crate::scene::{face_normal, normalize_or_zero, Mesh, RotationState, Vec3};
pub use crate::utils::wrap_degrees;
pub use crate::{AsciiCubeError, DEFAULT_GRADIENT_RAMP, DEFAULT_SHADE_CHARS};
