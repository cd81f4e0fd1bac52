use std::collections::HashMap;

use anyhow::Result;

use crate::event::Event;
use crate::pointer::Pointer;
use crate::tablets::AspectRatio;

/// Button id of the hover/proximity channel reported by the driver.
pub const HOVER_CHANNEL: i32 = -1;
/// Button id of the pen tip, forwarded as the primary mouse button.
pub const PRIMARY_BUTTON: i32 = 0;

/// Extent of the device coordinate space per axis.
const DEVICE_EXTENT: f64 = 65536.0;

#[derive(Debug)]
pub struct PositionManager {
    xscale: f64,
    screen_height: f64,
    buttons: HashMap<i32, i32>,
    track: Option<Track>,
}

/// Anchor pair and current target, present exactly while tracking.
#[derive(Debug)]
struct Track {
    anchor_pen: (i32, i32),
    anchor_mouse: (i32, i32),
    target: (f64, f64),
}

impl PositionManager {
    pub fn new(ratio: AspectRatio, screen_height: u32) -> Self {
        Self {
            xscale: ratio.xscale(),
            screen_height: f64::from(screen_height),
            buttons: HashMap::new(),
            track: None,
        }
    }

    /// Latest latched status of a button channel, 0 if never seen.
    pub fn button(&self, id: i32) -> i32 {
        self.buttons.get(&id).copied().unwrap_or(0)
    }

    /// Screen coordinates the pointer should sit at, present while tracking.
    pub fn target(&self) -> Option<(f64, f64)> {
        self.track.as_ref().map(|track| track.target)
    }

    /// Feeds one event through the hover state machine.
    ///
    /// Button events latch their channel's status first. Tracking begins on
    /// the first position event with the hover channel latched at exactly 1;
    /// each later position event moves the target relative to the anchors
    /// captured at that moment. Once the channel reports 0, the next event
    /// of either kind drops the anchors and the target.
    ///
    /// The only fallible step is querying the host pointer for a fresh
    /// anchor, and it runs before tracking state is touched.
    pub fn consume(&mut self, event: Event, pointer: &Pointer) -> Result<()> {
        if let Event::Button { id, status } = event {
            self.buttons.insert(id, status);
        }

        if self.button(HOVER_CHANNEL) == 0 {
            self.track = None;
            return Ok(());
        }

        let Event::Position { x, y, .. } = event else {
            return Ok(());
        };

        if let Some(track) = self.track.as_mut() {
            let (ax, ay) = track.anchor_pen;
            let (mx, my) = track.anchor_mouse;
            let dx = f64::from(mx)
                + (f64::from(x) - f64::from(ax)) * self.xscale * self.screen_height
                    / DEVICE_EXTENT;
            let dy =
                f64::from(my) + (f64::from(y) - f64::from(ay)) * self.screen_height / DEVICE_EXTENT;
            track.target = (dx, dy);
        } else if self.button(HOVER_CHANNEL) == 1 {
            let anchor_mouse = pointer.position()?;
            self.track = Some(Track {
                anchor_pen: (x, y),
                anchor_mouse,
                target: (f64::from(anchor_mouse.0), f64::from(anchor_mouse.1)),
            });
        }

        Ok(())
    }
}
