//! Relaunching the animation inside a freshly spawned terminal window.
//!
//! This is a platform-dependent collaborator with a single capability; the
//! rendering pipeline never depends on it. Failures are reported to the
//! caller, which is expected to fall back to the current terminal.

use std::env;
use std::process::Command;

use log::debug;

use crate::{AsciiCubeError, Result};

/// Spawn a copy of the current executable, with the given arguments, inside a
/// new terminal window. Returns as soon as the window process is started.
pub fn spawn_in_new_terminal(args: &[String]) -> Result<()> {
    let exe = env::current_exe().map_err(AsciiCubeError::Io)?;
    let exe = exe.to_string_lossy().into_owned();

    match env::consts::OS {
        "linux" => spawn_linux(&exe, args),
        "macos" => spawn_macos(&exe, args),
        "windows" => spawn_windows(&exe, args),
        other => Err(AsciiCubeError::Launcher(format!(
            "unsupported platform: {}",
            other
        ))),
    }
}

fn spawn_linux(exe: &str, args: &[String]) -> Result<()> {
    // Probe common terminal emulators in order of preference
    for terminal in ["gnome-terminal", "konsole", "xterm"] {
        if !command_exists(terminal) {
            continue;
        }
        let mut command = Command::new(terminal);
        if terminal == "gnome-terminal" {
            command.arg("--");
        } else {
            command.arg("-e");
        }
        command.arg(exe).args(args);
        command.spawn().map_err(AsciiCubeError::Io)?;
        debug!("Spawned {} via {}", exe, terminal);
        return Ok(());
    }
    Err(AsciiCubeError::Launcher(
        "no supported terminal emulator found".to_string(),
    ))
}

fn spawn_macos(exe: &str, args: &[String]) -> Result<()> {
    let mut command_line = shell_quote(exe);
    for arg in args {
        command_line.push(' ');
        command_line.push_str(&shell_quote(arg));
    }
    let script = format!(
        "tell application \"Terminal\"\nactivate\ndo script \"{}\"\nend tell",
        command_line.replace('\\', "\\\\").replace('"', "\\\"")
    );
    Command::new("osascript")
        .args(["-e", &script])
        .spawn()
        .map_err(AsciiCubeError::Io)?;
    debug!("Spawned {} via Terminal.app", exe);
    Ok(())
}

fn spawn_windows(exe: &str, args: &[String]) -> Result<()> {
    Command::new("cmd")
        .args(["/C", "start", exe])
        .args(args)
        .spawn()
        .map_err(AsciiCubeError::Io)?;
    debug!("Spawned {} via cmd start", exe);
    Ok(())
}

fn command_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
