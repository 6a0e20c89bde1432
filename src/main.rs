use ascii_cube::cli::{Cli, Shape};
use ascii_cube::rasterizer::{RasterConfig, Rasterizer, ScreenBuffer, ShadeLevel, Shading};
use ascii_cube::renderer::{frame_delay, Renderer};
use ascii_cube::scene::{normalize_or_zero, Mesh, RotationState, Vec3};
use ascii_cube::{launcher, PACKAGE_NAME, VERSION};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Validate CLI arguments
    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    // Set up logging level
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    info!("Starting {} v{}", PACKAGE_NAME, VERSION);

    // Hand off to a fresh terminal window when requested
    if cli.new_window {
        match launcher::spawn_in_new_terminal(&relaunch_args(std::env::args().skip(1))) {
            Ok(()) => {
                info!("Animation started in a new terminal window");
                return Ok(());
            }
            Err(e) => {
                warn!("Could not open a new terminal window: {}; running here instead", e);
            }
        }
    }

    let (width, height) = cli.screen_size()?;
    debug!("Screen size: {}x{}", width, height);

    // Color output requires a terminal on the other end
    let use_colors = !cli.no_color && atty::is(atty::Stream::Stdout);

    let mesh = match cli.shape {
        Shape::Cube => Mesh::cube(),
        Shape::Pyramid => Mesh::pyramid(),
    }
    .validated();

    let shading = match &cli.gradient {
        Some(ramp) => Shading::gradient(ramp, cli.gamma, cli.bright_color())?,
        None => Shading::three_level(
            cli.shade_chars(),
            cli.bright_color(),
            cli.neutral_color(),
            cli.dark_color(),
        ),
    };

    let rasterizer = Rasterizer::new(RasterConfig {
        width: width as usize,
        height: height as usize,
        zoom: cli.zoom,
        light: normalize_or_zero(Vec3::new(cli.light_x, cli.light_y, cli.light_z)),
        shading,
        outline: ShadeLevel {
            glyph: cli.outline_char,
            color: cli.outline_color(),
        },
        monochrome: !use_colors,
    });

    let mut buffer = ScreenBuffer::new(width as usize, height as usize);
    let mut rotation = RotationState::zero();

    let mut renderer = Renderer::new(use_colors);
    renderer.init()?;

    let delay = frame_delay(cli.fps);
    let mut frame_count: u64 = 0;

    // Main animation loop
    loop {
        // Handle input events
        if event::poll(Duration::from_millis(1))? {
            if let Event::Key(key_event) = event::read()? {
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        info!("Quit requested by user");
                        break;
                    }
                    KeyCode::Char('c')
                        if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        info!("Ctrl+C pressed, exiting");
                        break;
                    }
                    _ => {}
                }
            }
        }

        // Render one frame
        buffer.clear();
        rasterizer.render(&mesh, &rotation, &mut buffer);
        renderer.draw(&buffer)?;

        // Advance the simulation
        rotation.advance(cli.x_speed, cli.y_speed, cli.z_speed);
        frame_count += 1;

        if let Some(limit) = cli.frames {
            if frame_count >= limit {
                info!("Rendered {} frames, exiting", frame_count);
                break;
            }
        }

        // Sleep for frame timing
        sleep(delay).await;
    }

    // Cleanup
    renderer.cleanup()?;
    info!("Stopped after {} frames", frame_count);
    Ok(())
}

/// Arguments for the relaunched process: everything we received except the
/// flag that would make the child spawn yet another window.
fn relaunch_args(args: impl Iterator<Item = String>) -> Vec<String> {
    args.filter(|arg| arg != "--new-window").collect()
}
