use std::cmp::Ordering;

use crossterm::style::Color;
use log::debug;

use crate::scene::{face_normal, Mesh, RotationState, Vec3};
use crate::{AsciiCubeError, Result};

/// One character cell of the output grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Color>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: None,
    };
}

/// A 2D grid of character cells, rebuilt wholesale every frame
#[derive(Debug, Clone)]
pub struct ScreenBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl ScreenBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    /// Write a cell; coordinates outside the grid are ignored.
    pub fn put(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| *cell == Cell::BLANK)
    }
}

/// A (character, color) pair for one brightness level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadeLevel {
    pub glyph: char,
    pub color: Color,
}

/// How face light intensity maps to characters and colors
#[derive(Debug, Clone, PartialEq)]
pub enum Shading {
    /// Three discrete buckets with fixed thresholds at 2/3 and 1/3
    ThreeLevel {
        bright: ShadeLevel,
        neutral: ShadeLevel,
        dark: ShadeLevel,
    },
    /// An N-character ramp (darkest to lightest) with gamma correction and a
    /// single foreground color
    Gradient {
        ramp: Vec<char>,
        gamma: f64,
        color: Color,
    },
}

impl Shading {
    pub fn three_level(
        chars: [char; 3],
        bright: Color,
        neutral: Color,
        dark: Color,
    ) -> Self {
        let [bright_glyph, neutral_glyph, dark_glyph] = chars;
        Shading::ThreeLevel {
            bright: ShadeLevel {
                glyph: bright_glyph,
                color: bright,
            },
            neutral: ShadeLevel {
                glyph: neutral_glyph,
                color: neutral,
            },
            dark: ShadeLevel {
                glyph: dark_glyph,
                color: dark,
            },
        }
    }

    pub fn gradient(ramp: &str, gamma: f64, color: Color) -> Result<Self> {
        let ramp: Vec<char> = ramp.chars().collect();
        if ramp.is_empty() {
            return Err(AsciiCubeError::InvalidConfig(
                "gradient ramp must contain at least one character".to_string(),
            ));
        }
        if gamma <= 0.0 {
            return Err(AsciiCubeError::InvalidConfig(
                "gamma must be greater than 0".to_string(),
            ));
        }
        Ok(Shading::Gradient { ramp, gamma, color })
    }

    /// Map a clamped light intensity in `[0, 1]` to an output cell.
    ///
    /// The three-level thresholds are strict: an intensity of exactly 1/3 or
    /// 2/3 falls into the lower bucket. In monochrome mode the three-level
    /// strategy always uses the neutral glyph with no color.
    pub fn shade(&self, intensity: f64, monochrome: bool) -> Cell {
        match self {
            Shading::ThreeLevel {
                bright,
                neutral,
                dark,
            } => {
                if monochrome {
                    return Cell {
                        glyph: neutral.glyph,
                        color: None,
                    };
                }
                let level = if intensity > 2.0 / 3.0 {
                    bright
                } else if intensity > 1.0 / 3.0 {
                    neutral
                } else {
                    dark
                };
                Cell {
                    glyph: level.glyph,
                    color: Some(level.color),
                }
            }
            Shading::Gradient { ramp, gamma, color } => {
                let adjusted = intensity.clamp(0.0, 1.0).powf(*gamma);
                let index = (adjusted * (ramp.len() - 1) as f64) as usize;
                Cell {
                    glyph: ramp[index.min(ramp.len() - 1)],
                    color: if monochrome { None } else { Some(*color) },
                }
            }
        }
    }
}

/// Rasterizer configuration, fixed for the lifetime of the run
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Output grid width in characters
    pub width: usize,
    /// Output grid height in characters
    pub height: usize,
    /// Perspective zoom constant
    pub zoom: f64,
    /// Unit light direction
    pub light: Vec3,
    /// Face shading strategy
    pub shading: Shading,
    /// Wireframe outline character and color
    pub outline: ShadeLevel,
    /// Suppress all color information
    pub monochrome: bool,
}

/// The rendering pipeline: rotate, project, light, depth-sort, cull, fill,
/// and outline into a [`ScreenBuffer`].
pub struct Rasterizer {
    config: RasterConfig,
}

impl Rasterizer {
    pub fn new(config: RasterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Render one frame of the mesh at the given rotation into the buffer.
    /// The buffer is not cleared first; callers decide when to wipe it.
    pub fn render(&self, mesh: &Mesh, rotation: &RotationState, buffer: &mut ScreenBuffer) {
        let rotated = mesh.rotated_vertices(rotation);
        let projected: Vec<(i32, i32)> = rotated.iter().map(|&v| self.project(v)).collect();

        // Light intensity and mean depth per face, in rotated space
        let mut ordered: Vec<(f64, &[usize], f64)> = Vec::with_capacity(mesh.faces.len());
        for face in &mesh.faces {
            if face.len() < 3 || face.iter().any(|&i| i >= rotated.len()) {
                debug!("Skipping invalid face {:?}", face);
                continue;
            }
            let corners: Vec<Vec3> = face.iter().map(|&i| rotated[i]).collect();
            let normal = face_normal(&corners);
            let intensity = normal.dot(&self.config.light).max(0.0);
            let depth = corners.iter().map(|v| v.z).sum::<f64>() / corners.len() as f64;
            ordered.push((depth, face.as_slice(), intensity));
        }

        // Painter's algorithm: farthest faces first, no depth buffer
        ordered.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        for (depth, face, intensity) in ordered {
            // Faces behind the mid-plane face away from the camera
            if depth < 0.0 {
                continue;
            }
            let cell = self.config.shading.shade(intensity, self.config.monochrome);
            let points: Vec<(i32, i32)> = face.iter().map(|&i| projected[i]).collect();
            fill_polygon(buffer, &points, cell);
        }

        let outline = Cell {
            glyph: self.config.outline.glyph,
            color: if self.config.monochrome {
                None
            } else {
                Some(self.config.outline.color)
            },
        };
        for &(a, b) in &mesh.edges {
            if a >= projected.len() || b >= projected.len() {
                debug!("Skipping invalid edge ({}, {})", a, b);
                continue;
            }
            draw_line(buffer, projected[a], projected[b], outline);
        }
    }

    /// Perspective-divide projection into screen coordinates. Y is inverted
    /// because screen rows grow downward. The denominator is clamped away
    /// from zero so a point at `z == -zoom` cannot divide by zero.
    pub fn project(&self, p: Vec3) -> (i32, i32) {
        let mut denominator = p.z + self.config.zoom;
        if denominator.abs() < 1e-9 {
            denominator = if denominator < 0.0 { -1e-9 } else { 1e-9 };
        }
        let factor = self.config.zoom / denominator;
        let half_width = self.config.width as f64 / 2.0;
        let half_height = self.config.height as f64 / 2.0;
        let x = (half_width + factor * p.x * half_width) as i32;
        let y = (half_height - factor * p.y * half_height) as i32;
        (x, y)
    }
}

/// Even-odd scanline fill of a polygon given in screen coordinates.
///
/// For each row between the polygon's vertical extremes, X intersections are
/// collected from every edge whose Y span straddles the row, sorted, and
/// filled in alternating pairs. The straddle test is the half-open interval
/// `(p1.y <= row < p2.y) || (p2.y <= row < p1.y)`, which makes edges meeting
/// at a shared vertex count once and skips exactly-horizontal edges.
pub fn fill_polygon(buffer: &mut ScreenBuffer, points: &[(i32, i32)], cell: Cell) {
    if points.len() < 3 {
        return;
    }

    let width = buffer.width() as i32;
    let height = buffer.height() as i32;
    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
    let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);

    // Rows outside the buffer can never produce visible cells
    for y in min_y.max(0)..=max_y.min(height - 1) {
        let mut intersections: Vec<i32> = Vec::new();
        for i in 0..points.len() {
            let p1 = points[i];
            let p2 = points[(i + 1) % points.len()];

            if (p1.1 <= y && y < p2.1) || (p2.1 <= y && y < p1.1) {
                // The straddle test excludes horizontal edges, so the slope
                // denominator is never zero here
                let x = (y - p1.1) as f64 * (p2.0 - p1.0) as f64 / (p2.1 - p1.1) as f64
                    + p1.0 as f64;
                intersections.push(x as i32);
            }
        }

        intersections.sort_unstable();
        let mut i = 0;
        while i < intersections.len() {
            let x_start = intersections[i];
            // An unpaired trailing intersection fills to the right edge
            let x_end = intersections.get(i + 1).copied().unwrap_or(width);

            for x in x_start.max(0)..=x_end.min(width - 1) {
                buffer.put(x as usize, y as usize, cell);
            }
            i += 2;
        }
    }
}

/// Draw a straight line segment between two screen points.
///
/// Vertical and horizontal segments are direct fills; everything else steps
/// with the Bresenham error accumulator. A segment whose endpoints are not
/// both inside the buffer is dropped entirely rather than clipped.
pub fn draw_line(buffer: &mut ScreenBuffer, from: (i32, i32), to: (i32, i32), cell: Cell) {
    let width = buffer.width() as i32;
    let height = buffer.height() as i32;
    let in_bounds =
        |(x, y): (i32, i32)| (0..width).contains(&x) && (0..height).contains(&y);

    if !in_bounds(from) || !in_bounds(to) {
        return;
    }

    let (x1, y1) = from;
    let (x2, y2) = to;

    if x1 == x2 {
        for y in y1.min(y2)..=y1.max(y2) {
            buffer.put(x1 as usize, y as usize, cell);
        }
    } else if y1 == y2 {
        for x in x1.min(x2)..=x1.max(x2) {
            buffer.put(x as usize, y1 as usize, cell);
        }
    } else {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let step_x = if x1 < x2 { 1 } else { -1 };
        let step_y = if y1 < y2 { 1 } else { -1 };
        let mut error = dx - dy;

        let (mut x, mut y) = (x1, y1);
        loop {
            if in_bounds((x, y)) {
                buffer.put(x as usize, y as usize, cell);
            }
            if x == x2 && y == y2 {
                break;
            }
            let doubled = 2 * error;
            if doubled > -dy {
                error -= dy;
                x += step_x;
            }
            if doubled < dx {
                error += dx;
                y += step_y;
            }
        }
    }
}
