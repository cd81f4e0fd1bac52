use std::{fs, io::ErrorKind, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;

use crate::config::{Config, Pointer, Source};

pub fn save_path() -> PathBuf {
    save_dir().join("pen-cursor.conf")
}

pub fn save_dir() -> PathBuf {
    if let Some(override_path) = std::env::var_os("CONFIG_PATH") {
        return PathBuf::from(override_path);
    }

    let Some(dirs) = ProjectDirs::from("", "", "pen-cursor") else {
        return std::env::current_dir().unwrap_or_else(|_| {
            PathBuf::from_str(".").expect("hardcoded string should be a valid path")
        });
    };

    dirs.config_local_dir().to_owned()
}

/// Loads the saved configuration, falling back to defaults when there is
/// no config file yet.
pub fn load() -> Config {
    let path = save_path();
    match fs::read_to_string(&path) {
        Ok(text) => parse(&text),
        Err(err) if err.kind() == ErrorKind::NotFound => Config::default(),
        Err(err) => {
            warn!("Could not read {}: {err}. Using defaults.", path.display());
            Config::default()
        }
    }
}

pub fn save(config: &Config) -> Result<PathBuf> {
    let dir = save_dir();
    fs::create_dir_all(&dir).with_context(|| format!("could not create {}", dir.display()))?;

    let path = save_path();
    fs::write(&path, render(config))
        .with_context(|| format!("could not write {}", path.display()))?;

    Ok(path)
}

/// Key = value lines; `#` starts a comment. Unknown keys and unusable
/// values are warned about and skipped.
fn parse(text: &str) -> Config {
    let mut config = Config::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!("Ignoring malformed config line {line:?}.");
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "tablet" => config.tablet = value.to_owned(),
            "aspect_ratio" => match value.parse() {
                Ok(ratio) => config.aspect_ratio = Some(ratio),
                Err(err) => warn!("Ignoring aspect_ratio: {err}."),
            },
            "driver" => config.driver = value.to_owned(),
            "screen_height" => match value.parse() {
                Ok(0) | Err(_) => warn!("Ignoring screen_height {value:?}."),
                Ok(height) => config.screen_height = Some(height),
            },
            "source" => match value {
                "driver" => config.source = Source::Driver,
                "stdin" => config.source = Source::Stdin,
                other => warn!("Unknown source {other:?} in config."),
            },
            "pointer" => set_pointer(&mut config, value),
            other => warn!("Unknown config key {other:?}."),
        }
    }

    config
}

fn set_pointer(config: &mut Config, value: &str) {
    match value {
        "none" => config.pointer = Pointer::None,
        #[cfg(all(target_os = "linux", feature = "x11"))]
        "x11" => config.pointer = Pointer::X11,
        #[cfg(target_os = "windows")]
        "sendinput" => config.pointer = Pointer::SendInput,
        other => warn!("Unknown pointer {other:?} in config."),
    }
}

fn render(config: &Config) -> String {
    let mut out = String::new();
    out.push_str("# pen-cursor configuration\n");
    out.push_str(&format!("tablet = {}\n", config.tablet));
    match config.aspect_ratio {
        Some(ratio) => out.push_str(&format!("aspect_ratio = {ratio}\n")),
        None => out.push_str("# aspect_ratio = 16:9\n"),
    }
    out.push_str(&format!("driver = {}\n", config.driver));
    match config.screen_height {
        Some(height) => out.push_str(&format!("screen_height = {height}\n")),
        None => out.push_str("# screen_height = 1080\n"),
    }
    out.push_str(&format!("source = {}\n", source_key(config.source)));
    out.push_str(&format!("pointer = {}\n", pointer_key(config.pointer)));
    out
}

fn source_key(source: Source) -> &'static str {
    match source {
        Source::Driver => "driver",
        Source::Stdin => "stdin",
    }
}

fn pointer_key(pointer: Pointer) -> &'static str {
    match pointer {
        Pointer::None => "none",
        #[cfg(all(target_os = "linux", feature = "x11"))]
        Pointer::X11 => "x11",
        #[cfg(target_os = "windows")]
        Pointer::SendInput => "sendinput",
    }
}
