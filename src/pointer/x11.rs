use std::fmt::Debug;
use std::os::raw::c_int;
use std::ptr::null;

use anyhow::{Result, bail};
use log::info;
use x11::{xlib, xtest};

const TRUE: c_int = 1;
const FALSE: c_int = 0;

/// X11 button code for the left (primary) button.
const PRIMARY_CODE: u32 = 1;

pub struct X11Pointer {
    display: *mut xlib::Display,
    root: xlib::Window,
    screen: c_int,
    last_move: Option<(i32, i32)>,
    last_primary: Option<bool>,
}

impl X11Pointer {
    pub fn open() -> Result<Self> {
        let display = unsafe { xlib::XOpenDisplay(null()) };
        if display.is_null() {
            bail!("could not open X display (is DISPLAY set?)");
        }

        let screen = unsafe { xlib::XDefaultScreen(display) };
        let root = unsafe { xlib::XRootWindow(display, screen) };

        info!("Connected to X display.");

        Ok(Self {
            display,
            root,
            screen,
            last_move: None,
            last_primary: None,
        })
    }

    pub fn position(&self) -> Result<(i32, i32)> {
        let mut root_return = 0u64;
        let mut child_return = 0u64;
        let mut root_x: c_int = 0;
        let mut root_y: c_int = 0;
        let mut win_x: c_int = 0;
        let mut win_y: c_int = 0;
        let mut mask: u32 = 0;

        let result = unsafe {
            xlib::XQueryPointer(
                self.display,
                self.root,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };

        if result == FALSE {
            bail!("XQueryPointer failed");
        }

        Ok((root_x, root_y))
    }

    pub fn screen_height(&self) -> Result<u32> {
        let height = unsafe { xlib::XDisplayHeight(self.display, self.screen) };
        if height <= 0 {
            bail!("XDisplayHeight returned {height}");
        }
        Ok(height as u32)
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        if self.last_move == Some((x, y)) {
            return Ok(());
        }

        let result = unsafe { xtest::XTestFakeMotionEvent(self.display, self.screen, x, y, 0) };
        unsafe { xlib::XFlush(self.display) };

        if result == 0 {
            bail!("XTestFakeMotionEvent failed");
        }

        self.last_move = Some((x, y));
        Ok(())
    }

    pub fn set_primary(&mut self, pressed: bool) -> Result<()> {
        if self.last_primary == Some(pressed) {
            return Ok(());
        }

        let is_press = if pressed { TRUE } else { FALSE };
        let result =
            unsafe { xtest::XTestFakeButtonEvent(self.display, PRIMARY_CODE, is_press, 0) };
        unsafe { xlib::XFlush(self.display) };

        if result == 0 {
            bail!("XTestFakeButtonEvent failed");
        }

        self.last_primary = Some(pressed);
        Ok(())
    }
}

impl Debug for X11Pointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("X11Pointer { /* fields */ }")
    }
}

impl Drop for X11Pointer {
    fn drop(&mut self) {
        unsafe { xlib::XCloseDisplay(self.display) };
    }
}
