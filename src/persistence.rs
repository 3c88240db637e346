//! Filesystem locations and window state

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::config::clock::GEOMETRY_FILE_NAME;

pub const SETTINGS_FILE_NAME: &str = "clock_app.ini";

/// Get the directory holding settings, geometry and window state
/// - If running from source (binary path contains "target") or CLOCK_APP_DEV is set: ./tmp/clock-app
/// - If installed (binary path elsewhere): ~/.config/clock-app
pub fn get_data_dir() -> PathBuf {
    let use_local_storage = std::env::var("CLOCK_APP_DEV").is_ok()
        || std::env::current_exe()
            .map(|p| p.iter().any(|c| c == "target"))
            .unwrap_or(false);

    if use_local_storage {
        let mut path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        path.push("tmp");
        path.push("clock-app");
        path
    } else {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("clock-app")
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    let dir = get_data_dir();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn settings_path() -> PathBuf {
    get_data_dir().join(SETTINGS_FILE_NAME)
}

/// Geometry lives next to the settings file
pub fn geometry_path(settings: &Path) -> PathBuf {
    settings
        .parent()
        .map_or_else(|| PathBuf::from(GEOMETRY_FILE_NAME), |dir| dir.join(GEOMETRY_FILE_NAME))
}

/// Clock images and language files: CLOCK_APP_ASSETS, else ./assets
pub fn assets_dir() -> PathBuf {
    std::env::var_os("CLOCK_APP_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

pub fn lang_dir(assets: &Path) -> PathBuf {
    assets.join("lang")
}

pub fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

fn window_state_path() -> PathBuf {
    get_data_dir().join("window_state.json")
}

pub fn load_window_state() -> Option<WindowState> {
    read_window_state(&window_state_path())
}

fn read_window_state(path: &Path) -> Option<WindowState> {
    let content = fs::read_to_string(path).ok()?;
    let state = serde_json::from_str::<WindowState>(&content).ok()?;
    (state.width > 0 && state.height > 0).then_some(state)
}

pub fn save_window_state(state: WindowState) -> std::io::Result<()> {
    let dir = ensure_data_dir()?;
    write_window_state(&dir.join("window_state.json"), state)
}

fn write_window_state(path: &Path, state: WindowState) -> std::io::Result<()> {
    let payload = serde_json::to_string_pretty(&state).map_err(std::io::Error::other)?;
    fs::write(path, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_sits_next_to_settings() {
        let settings = Path::new("/tmp/x/clock_app.ini");
        assert_eq!(geometry_path(settings), PathBuf::from("/tmp/x/clock_pivots.json"));
    }

    #[test]
    fn test_window_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window_state.json");
        let state = WindowState {
            x: 10,
            y: -4,
            width: 640,
            height: 480,
        };
        write_window_state(&path, state).unwrap();
        assert_eq!(read_window_state(&path), Some(state));

        fs::write(&path, r#"{"x":0,"y":0,"width":0,"height":10}"#).unwrap();
        assert_eq!(read_window_state(&path), None);
    }
}
