#[cfg(target_os = "windows")]
pub mod win32;
#[cfg(all(target_os = "linux", feature = "x11"))]
pub mod x11;

use anyhow::{Result, bail};
use log::debug;

use crate::config::{self, Config};

#[cfg(target_os = "windows")]
use crate::pointer::win32::SendInputPointer;
#[cfg(all(target_os = "linux", feature = "x11"))]
use crate::pointer::x11::X11Pointer;

#[derive(Debug)]
pub enum Pointer {
    /// Dummy pointer, tracks position and button state but drives no display.
    Null(NullPointer),
    /// Drives the X11 pointer through the XTest extension.
    #[cfg(all(target_os = "linux", feature = "x11"))]
    X11(X11Pointer),
    /// Injects events with the Win32 SendInput API.
    #[cfg(target_os = "windows")]
    SendInput(SendInputPointer),
}

pub fn create_pointer(config: &Config) -> Result<Pointer> {
    Ok(match config.pointer {
        config::Pointer::None => Pointer::Null(NullPointer::default()),
        #[cfg(all(target_os = "linux", feature = "x11"))]
        config::Pointer::X11 => Pointer::X11(X11Pointer::open()?),
        #[cfg(target_os = "windows")]
        config::Pointer::SendInput => Pointer::SendInput(SendInputPointer::new()),
    })
}

impl Pointer {
    /// Current absolute pointer position on the host screen.
    pub fn position(&self) -> Result<(i32, i32)> {
        match self {
            Pointer::Null(null_pointer) => null_pointer.position(),
            #[cfg(all(target_os = "linux", feature = "x11"))]
            Pointer::X11(x11_pointer) => x11_pointer.position(),
            #[cfg(target_os = "windows")]
            Pointer::SendInput(send_input) => send_input.position(),
        }
    }

    /// Pixel height of the host display.
    pub fn screen_height(&self) -> Result<u32> {
        match self {
            Pointer::Null(null_pointer) => Ok(null_pointer.height),
            #[cfg(all(target_os = "linux", feature = "x11"))]
            Pointer::X11(x11_pointer) => x11_pointer.screen_height(),
            #[cfg(target_os = "windows")]
            Pointer::SendInput(send_input) => send_input.screen_height(),
        }
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        match self {
            Pointer::Null(null_pointer) => {
                null_pointer.move_to(x, y);
                Ok(())
            }
            #[cfg(all(target_os = "linux", feature = "x11"))]
            Pointer::X11(x11_pointer) => x11_pointer.move_to(x, y),
            #[cfg(target_os = "windows")]
            Pointer::SendInput(send_input) => send_input.move_to(x, y),
        }
    }

    pub fn set_primary(&mut self, pressed: bool) -> Result<()> {
        match self {
            Pointer::Null(null_pointer) => {
                null_pointer.set_primary(pressed);
                Ok(())
            }
            #[cfg(all(target_os = "linux", feature = "x11"))]
            Pointer::X11(x11_pointer) => x11_pointer.set_primary(pressed),
            #[cfg(target_os = "windows")]
            Pointer::SendInput(send_input) => send_input.set_primary(pressed),
        }
    }
}

#[derive(Debug)]
pub struct NullPointer {
    pub pos: (i32, i32),
    pub pressed: bool,
    /// Reported screen height; there is no display to ask.
    pub height: u32,
    /// When set, position queries report an error instead of `pos`.
    pub pos_fails: bool,
}

impl Default for NullPointer {
    fn default() -> Self {
        Self {
            pos: (0, 0),
            pressed: false,
            height: 1080,
            pos_fails: false,
        }
    }
}

impl NullPointer {
    fn position(&self) -> Result<(i32, i32)> {
        if self.pos_fails {
            bail!("no position to report");
        }
        Ok(self.pos)
    }

    fn move_to(&mut self, x: i32, y: i32) {
        debug!("pointer -> ({x}, {y})");
        self.pos = (x, y);
    }

    fn set_primary(&mut self, pressed: bool) {
        if self.pressed != pressed {
            debug!("primary button {}", if pressed { "down" } else { "up" });
        }
        self.pressed = pressed;
    }
}
