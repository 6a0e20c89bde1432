use clap::Parser;
use crossterm::style::Color;
use log::warn;

use crate::{DEFAULT_GRADIENT_RAMP, DEFAULT_OUTLINE_CHAR, DEFAULT_SHADE_CHARS};

/// Fallback colors used when a color name is not in the table
pub const DEFAULT_BRIGHT_COLOR: Color = Color::Red;
pub const DEFAULT_NEUTRAL_COLOR: Color = Color::Green;
pub const DEFAULT_DARK_COLOR: Color = Color::Blue;
pub const DEFAULT_OUTLINE_COLOR: Color = Color::Yellow;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Screen width in characters (defaults to the terminal width)
    #[arg(short = 'W', long)]
    pub width: Option<u16>,

    /// Screen height in characters (defaults to the terminal height)
    #[arg(short = 'H', long)]
    pub height: Option<u16>,

    /// Rotation speed around the X axis, in degrees per frame
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub x_speed: f64,

    /// Rotation speed around the Y axis, in degrees per frame
    #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
    pub y_speed: f64,

    /// Rotation speed around the Z axis, in degrees per frame
    #[arg(long, default_value_t = 0.7, allow_negative_numbers = true)]
    pub z_speed: f64,

    /// Perspective zoom level; higher values flatten the projection
    #[arg(short, long, default_value_t = 10.0)]
    pub zoom: f64,

    /// Shading characters, bright to dark (exactly 3, e.g. ".-#")
    #[arg(short, long, default_value = ".-#")]
    pub shades: String,

    /// Character used for the wireframe outline
    #[arg(short, long, default_value_t = DEFAULT_OUTLINE_CHAR)]
    pub outline_char: char,

    /// X component of the light direction
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub light_x: f64,

    /// Y component of the light direction
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub light_y: f64,

    /// Z component of the light direction (negative Z points at the viewer)
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    pub light_z: f64,

    /// Color name for the brightest shade
    #[arg(long, default_value = "bright_red")]
    pub bright_color: String,

    /// Color name for the neutral shade
    #[arg(long, default_value = "bright_green")]
    pub neutral_color: String,

    /// Color name for the darkest shade
    #[arg(long, default_value = "bright_blue")]
    pub dark_color: String,

    /// Color name for the wireframe outline
    #[arg(long, default_value = "bright_yellow")]
    pub outline_color: String,

    /// Disable color output (monochrome ASCII)
    #[arg(short = 'C', long)]
    pub no_color: bool,

    /// Shade faces with an N-character ramp (darkest to lightest) instead of
    /// three fixed levels; pass the flag alone to use the built-in ramp
    #[arg(
        short,
        long,
        value_name = "CHARS",
        num_args = 0..=1,
        default_missing_value = DEFAULT_GRADIENT_RAMP
    )]
    pub gradient: Option<String>,

    /// Gamma correction applied to the gradient ramp
    #[arg(long, default_value_t = 0.5)]
    pub gamma: f64,

    /// Shape to render
    #[arg(long, value_enum, default_value_t = Shape::Cube)]
    pub shape: Shape,

    /// Frame rate limit (FPS)
    #[arg(short, long, default_value_t = 30.0)]
    pub fps: f64,

    /// Render this many frames and exit (useful for testing)
    #[arg(long)]
    pub frames: Option<u64>,

    /// Relaunch the animation inside a new terminal window
    #[arg(long)]
    pub new_window: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The canonical unit cube
    Cube,
    /// A square-based pyramid
    Pyramid,
}

impl Cli {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<(), String> {
        if self.width == Some(0) {
            return Err("Screen width must be greater than 0".to_string());
        }

        if self.height == Some(0) {
            return Err("Screen height must be greater than 0".to_string());
        }

        if self.zoom <= 0.0 {
            return Err("Zoom must be greater than 0".to_string());
        }

        if self.fps <= 0.0 {
            return Err("FPS must be greater than 0".to_string());
        }

        if self.gamma <= 0.0 {
            return Err("Gamma must be greater than 0".to_string());
        }

        if let Some(ramp) = &self.gradient {
            if ramp.is_empty() {
                return Err("Gradient ramp must contain at least one character".to_string());
            }
        }

        Ok(())
    }

    /// Get effective screen dimensions
    pub fn screen_size(&self) -> Result<(u16, u16), std::io::Error> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Ok((w, h)),
            (Some(w), None) => {
                let (_, h) = crossterm::terminal::size()?;
                Ok((w, h))
            }
            (None, Some(h)) => {
                let (w, _) = crossterm::terminal::size()?;
                Ok((w, h))
            }
            (None, None) => crossterm::terminal::size(),
        }
    }

    /// Get the three shading characters, falling back to the default set when
    /// the argument does not contain exactly three characters
    pub fn shade_chars(&self) -> [char; 3] {
        let chars: Vec<char> = self.shades.chars().collect();
        match chars.as_slice() {
            [bright, neutral, dark] => [*bright, *neutral, *dark],
            _ => {
                warn!(
                    "Shading argument should provide exactly 3 characters, got {}; using default",
                    chars.len()
                );
                DEFAULT_SHADE_CHARS
            }
        }
    }

    pub fn bright_color(&self) -> Color {
        color_by_name(&self.bright_color).unwrap_or(DEFAULT_BRIGHT_COLOR)
    }

    pub fn neutral_color(&self) -> Color {
        color_by_name(&self.neutral_color).unwrap_or(DEFAULT_NEUTRAL_COLOR)
    }

    pub fn dark_color(&self) -> Color {
        color_by_name(&self.dark_color).unwrap_or(DEFAULT_DARK_COLOR)
    }

    pub fn outline_color(&self) -> Color {
        color_by_name(&self.outline_color).unwrap_or(DEFAULT_OUTLINE_COLOR)
    }
}

/// Look up an ANSI color by name. Unknown names return `None`; callers are
/// expected to substitute a default rather than fail.
pub fn color_by_name(name: &str) -> Option<Color> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::DarkRed),
        "green" => Some(Color::DarkGreen),
        "yellow" => Some(Color::DarkYellow),
        "blue" => Some(Color::DarkBlue),
        "magenta" => Some(Color::DarkMagenta),
        "cyan" => Some(Color::DarkCyan),
        "white" => Some(Color::Grey),
        "bright_black" => Some(Color::DarkGrey),
        "bright_red" => Some(Color::Red),
        "bright_green" => Some(Color::Green),
        "bright_yellow" => Some(Color::Yellow),
        "bright_blue" => Some(Color::Blue),
        "bright_magenta" => Some(Color::Magenta),
        "bright_cyan" => Some(Color::Cyan),
        "bright_white" => Some(Color::White),
        _ => None,
    }
}
