use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// The user-facing side of a command: report lines, prompts and the browser.
pub trait Console {
    fn print(&mut self, line: &str);
    /// Ask for a line of input. The answer comes back trimmed.
    fn prompt(&mut self, message: &str) -> Result<String>;
    /// Like `prompt`, without echoing what is typed.
    fn prompt_secret(&mut self, message: &str) -> Result<String>;
    /// Best effort. A browser that fails to start is not an error.
    fn open_url(&mut self, url: &str);
}

/// Stdin/stdout console used by the binary.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn print(&mut self, line: &str) {
        println!("{}", line);
    }

    fn prompt(&mut self, message: &str) -> Result<String> {
        print!("{}", message);
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("Failed to read from stdin")?;
        Ok(answer.trim().to_string())
    }

    fn prompt_secret(&mut self, message: &str) -> Result<String> {
        let answer = rpassword::prompt_password(message).context("Failed to read secret")?;
        Ok(answer.trim().to_string())
    }

    fn open_url(&mut self, url: &str) {
        open_browser(url);
    }
}

/// Open a URL in the system default browser.
fn open_browser(url: &str) {
    #[cfg(target_os = "linux")]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(url).spawn();
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/c", "start", "", url])
        .spawn();
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let result: io::Result<std::process::Child> = Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "no known browser launcher",
    ));

    if let Err(e) = result {
        tracing::warn!("could not open browser: {}", e);
    }
}

#[cfg(test)]
pub use scripted::ScriptedConsole;
