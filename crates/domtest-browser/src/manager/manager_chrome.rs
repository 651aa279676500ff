//! Locating and starting a local Chrome with remote debugging.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{info, warn};

use super::{BrowserError, BrowserManagerConfig};

#[cfg(target_os = "macos")]
const CANDIDATES: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

#[cfg(target_os = "linux")]
const CANDIDATES: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
];

#[cfg(target_os = "windows")]
const CANDIDATES: &[&str] = &[r"C:\Program Files\Google\Chrome\Application\chrome.exe"];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CANDIDATES: &[&str] = &[];

/// `CHROME_PATH` if it points at a file, else the first installed candidate.
pub(super) fn locate() -> Option<PathBuf> {
    std::env::var_os("CHROME_PATH")
        .map(PathBuf::from)
        .filter(|p| p.is_file())
        .or_else(|| CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists()))
}

/// Command line for a throwaway automation profile.
pub(super) fn launch_args(config: &BrowserManagerConfig, profile: &Path) -> Vec<String> {
    let mut args = vec![
        format!("--remote-debugging-port={}", config.debug_port),
        format!("--user-data-dir={}", profile.display()),
        format!("--window-size={},{}", config.viewport_width, config.viewport_height),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
        "--disable-background-networking".to_string(),
        "--disable-sync".to_string(),
    ];
    if config.headless {
        args.push("--headless=new".to_string());
    }
    args
}

/// Start Chrome. The child is killed when its handle drops.
pub(super) fn spawn(config: &BrowserManagerConfig) -> Result<Child, BrowserError> {
    let binary = locate().ok_or(BrowserError::ChromeNotFound)?;
    let profile = config.resolved_profile_dir();
    if let Err(e) = std::fs::create_dir_all(&profile) {
        warn!(profile = %profile.display(), "Cannot create Chrome profile directory: {}", e);
    }

    let child = Command::new(&binary)
        .args(launch_args(config, &profile))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", binary.display(), e)))?;

    info!(
        pid = ?child.id(),
        binary = %binary.display(),
        headless = config.headless,
        "Launched Chrome"
    );
    Ok(child)
}
