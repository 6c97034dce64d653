use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// Opens a written document for the user.
pub trait Viewer {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Delegates to the platform's default handler for the file type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) -> io::Result<()> {
        let mut command = opener_command(path);
        debug!("Running {:?}", command);

        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("viewer exited with {status}")))
        }
    }
}

fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}
