use crate::rasterizer::ScreenBuffer;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use anyhow::Result;
use log::debug;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

/// Terminal renderer for screen buffers
pub struct Renderer {
    stdout: Stdout,
    use_colors: bool,
    initialized: bool,
}

impl Renderer {
    /// Create a new renderer. The terminal is not touched until `init`.
    pub fn new(use_colors: bool) -> Self {
        Self {
            stdout: stdout(),
            use_colors,
            initialized: false,
        }
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(self.stdout, Hide, Clear(ClearType::All))?;
        self.initialized = true;
        debug!("Terminal initialized for rendering");
        Ok(())
    }

    /// Restore terminal to normal state
    pub fn cleanup(&mut self) -> Result<()> {
        if self.initialized {
            execute!(self.stdout, Show, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
            disable_raw_mode()?;
            self.initialized = false;
            debug!("Terminal restored to normal state");
        }
        Ok(())
    }

    /// Flush one frame to the terminal.
    ///
    /// The screen is cleared with the erase-and-home pair, then rows are
    /// written top to bottom. Foreground SGR codes are emitted only when the
    /// color changes along a row, and every row ends with a reset.
    pub fn draw(&mut self, buffer: &ScreenBuffer) -> Result<()> {
        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))?;

        for (y, row) in buffer.rows().enumerate() {
            queue!(self.stdout, MoveTo(0, y as u16))?;

            let mut current: Option<Color> = None;
            for cell in row {
                if self.use_colors && cell.color != current {
                    match cell.color {
                        Some(color) => queue!(self.stdout, SetForegroundColor(color))?,
                        None => queue!(self.stdout, ResetColor)?,
                    }
                    current = cell.color;
                }
                queue!(self.stdout, Print(cell.glyph))?;
            }

            // Reset styling at the end of each row
            if self.use_colors && current.is_some() {
                queue!(self.stdout, ResetColor)?;
            }
        }

        self.stdout.flush()?;
        Ok(())
    }

    /// Check if renderer emits colors
    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        // Ensure terminal is restored on drop
        let _ = self.cleanup();
    }
}

/// Fixed frame interval for a target frame rate
pub fn frame_delay(fps: f64) -> Duration {
    let frame_time_ms = 1000.0 / fps;
    Duration::from_millis(frame_time_ms as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_delay_calculation() {
        assert_eq!(frame_delay(30.0).as_millis(), 33); // the reference 0.03s cadence
        assert_eq!(frame_delay(60.0).as_millis(), 16);
        assert_eq!(frame_delay(10.0).as_millis(), 100);
    }

    #[test]
    fn test_renderer_creation_is_inert() {
        // Construction must not touch the terminal, so it works without a tty
        let renderer = Renderer::new(true);
        assert!(renderer.uses_colors());

        let renderer = Renderer::new(false);
        assert!(!renderer.uses_colors());
    }
}
