use std::fmt::Display;

use crate::tablets::AspectRatio;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tablet model served by the driver, used for the aspect-ratio lookup.
    pub tablet: String,
    /// Digitizer ratio override; takes precedence over the model lookup.
    pub aspect_ratio: Option<AspectRatio>,
    /// Command line that launches the tablet driver.
    pub driver: String,
    /// Host screen height in pixels; queried from the display when unset.
    pub screen_height: Option<u32>,

    pub source: Source,
    pub pointer: Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Spawn the driver subprocess and read its standard output.
    Driver,
    /// Read protocol lines from this process's standard input.
    Stdin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    None,
    #[cfg(all(target_os = "linux", feature = "x11"))]
    X11,
    #[cfg(target_os = "windows")]
    SendInput,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tablet: "Galaxy Note 4".into(),
            aspect_ratio: None,
            driver: "networktablet".into(),
            screen_height: None,
            source: Source::Driver,
            #[cfg(all(target_os = "linux", feature = "x11"))]
            pointer: Pointer::X11,
            #[cfg(target_os = "windows")]
            pointer: Pointer::SendInput,
            #[cfg(not(any(all(target_os = "linux", feature = "x11"), target_os = "windows")))]
            pointer: Pointer::None,
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Source::Driver => "Driver subprocess",
            Source::Stdin => "Standard input",
        })
    }
}

impl Display for Pointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Pointer::None => "Null",
            #[cfg(all(target_os = "linux", feature = "x11"))]
            Pointer::X11 => "X11 (XTest)",
            #[cfg(target_os = "windows")]
            Pointer::SendInput => "Win32 SendInput",
        })
    }
}
