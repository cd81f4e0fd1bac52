use std::mem::size_of;

use anyhow::{Context, Result, bail};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_MOUSE, MOUSE_EVENT_FLAGS, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_LEFTDOWN,
    MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_VIRTUALDESK, MOUSEINPUT, SendInput,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYSCREEN, SM_CYVIRTUALSCREEN,
};

#[derive(Debug, Default)]
pub struct SendInputPointer {
    last_move: Option<(i32, i32)>,
    last_primary: Option<bool>,
}

impl SendInputPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Result<(i32, i32)> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }.context("GetCursorPos failed")?;
        Ok((point.x, point.y))
    }

    pub fn screen_height(&self) -> Result<u32> {
        let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
        if height <= 0 {
            bail!("GetSystemMetrics(SM_CYSCREEN) returned {height}");
        }
        Ok(height as u32)
    }

    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        if self.last_move == Some((x, y)) {
            return Ok(());
        }

        let width = unsafe { GetSystemMetrics(SM_CXVIRTUALSCREEN) };
        let height = unsafe { GetSystemMetrics(SM_CYVIRTUALSCREEN) };
        if width <= 0 || height <= 0 {
            bail!("could not read virtual screen metrics");
        }

        sim_mouse_event(
            MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_VIRTUALDESK,
            normalized(x, width),
            normalized(y, height),
        )?;

        self.last_move = Some((x, y));
        Ok(())
    }

    pub fn set_primary(&mut self, pressed: bool) -> Result<()> {
        if self.last_primary == Some(pressed) {
            return Ok(());
        }

        let flags = if pressed {
            MOUSEEVENTF_LEFTDOWN
        } else {
            MOUSEEVENTF_LEFTUP
        };
        sim_mouse_event(flags, 0, 0)?;

        self.last_primary = Some(pressed);
        Ok(())
    }
}

/// Maps a pixel coordinate onto the 0..65535 range SendInput expects
/// for absolute moves.
fn normalized(value: i32, extent: i32) -> i32 {
    let clamped = i64::from(value).clamp(0, i64::from(extent) - 1);
    (((clamped + 1) * 65535) / i64::from(extent)) as i32
}

fn sim_mouse_event(flags: MOUSE_EVENT_FLAGS, dx: i32, dy: i32) -> Result<()> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    let inputs = [input];
    let sent = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };
    if sent != 1 {
        bail!("SendInput injected {sent} of 1 events");
    }

    Ok(())
}
