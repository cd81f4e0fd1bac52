use anyhow::{Context, Result};
use log::{debug, error, info};

use crate::config::Config;
use crate::pointer::{Pointer, create_pointer};
use crate::position::{PRIMARY_BUTTON, PositionManager};
use crate::protocol::parse_line;
use crate::source::create_source;
use crate::tablets::{self, AspectRatio};

/// Bridges the driver's event stream onto the host pointer until the
/// stream ends. Construction errors (unknown tablet, unreachable display,
/// missing driver binary) surface before the first line is read.
pub fn run(config: &Config) -> Result<()> {
    let ratio = resolve_ratio(config)?;

    let mut pointer = create_pointer(config)?;

    let screen_height = match config.screen_height {
        Some(height) => height,
        None => pointer
            .screen_height()
            .context("could not determine screen height")?,
    };

    info!(
        "Tablet {:?} ({ratio}), screen height {screen_height}px.",
        config.tablet
    );
    info!("Source: {}; pointer: {}.", config.source, config.pointer);

    let mut manager = PositionManager::new(ratio, screen_height);
    let mut source = create_source(config)?;

    while let Some(line) = source.read_line() {
        if let Err(err) = step(&line, &mut manager, &mut pointer) {
            error!("Could not process line: {err:#}");
        }
    }

    info!("Event stream ended.");
    Ok(())
}

/// An explicit `aspect_ratio` entry wins; otherwise the tablet name must
/// be in the registry.
fn resolve_ratio(config: &Config) -> Result<AspectRatio> {
    match config.aspect_ratio {
        Some(ratio) => Ok(ratio),
        None => Ok(tablets::lookup(&config.tablet)?),
    }
}

/// Handles one line: parse, update the manager, sync the host pointer.
/// Unparseable lines are skipped; the stream keeps going.
fn step(line: &str, manager: &mut PositionManager, pointer: &mut Pointer) -> Result<()> {
    let event = match parse_line(line) {
        Ok(event) => event,
        Err(err) => {
            debug!("Skipping line {line:?}: {err}");
            return Ok(());
        }
    };

    debug!("{event:?}");
    manager.consume(event, pointer)?;

    if let Some((x, y)) = manager.target() {
        pointer.move_to(x.round() as i32, y.round() as i32)?;
    }

    pointer.set_primary(manager.button(PRIMARY_BUTTON) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::NullPointer;

    fn null_state(pointer: &Pointer) -> &NullPointer {
        let Pointer::Null(null_pointer) = pointer else {
            unreachable!()
        };
        null_pointer
    }

    #[test]
    fn ratio_override_bypasses_the_registry() {
        let mut config = Config::default();
        config.tablet = "Mystery Slate".to_string();
        assert!(resolve_ratio(&config).is_err());

        config.aspect_ratio = Some(AspectRatio::new(21, 9));
        assert_eq!(resolve_ratio(&config).unwrap(), AspectRatio::new(21, 9));
    }

    #[test]
    fn ratio_override_wins_over_the_registry() {
        let mut config = Config::default();
        assert_eq!(resolve_ratio(&config).unwrap(), AspectRatio::new(16, 9));

        config.aspect_ratio = Some(AspectRatio::new(4, 3));
        assert_eq!(resolve_ratio(&config).unwrap(), AspectRatio::new(4, 3));
    }

    #[test]
    fn drag_session_moves_the_pointer() {
        let mut pointer = Pointer::Null(NullPointer::default());
        let mut manager = PositionManager::new(AspectRatio::new(2, 1), 1024);

        step("sent button: -1, 1", &mut manager, &mut pointer).unwrap();
        step(".x: 0, y: 0, pressure: 0", &mut manager, &mut pointer).unwrap();
        step(".x: 32768, y: 0, pressure: 20", &mut manager, &mut pointer).unwrap();
        step("sent button: 0, 1", &mut manager, &mut pointer).unwrap();

        let state = null_state(&pointer);
        assert_eq!(state.pos, (1024, 0));
        assert!(state.pressed);
    }

    #[test]
    fn tip_release_reaches_the_pointer() {
        let mut pointer = Pointer::Null(NullPointer::default());
        let mut manager = PositionManager::new(AspectRatio::new(16, 9), 1080);

        step("sent button: 0, 1", &mut manager, &mut pointer).unwrap();
        assert!(null_state(&pointer).pressed);

        step("sent button: 0, 0", &mut manager, &mut pointer).unwrap();
        assert!(!null_state(&pointer).pressed);
    }

    #[test]
    fn bad_lines_change_nothing() {
        let mut pointer = Pointer::Null(NullPointer {
            pos: (50, 60),
            ..NullPointer::default()
        });
        let mut manager = PositionManager::new(AspectRatio::new(16, 9), 1080);

        step("sent button: -1, 1", &mut manager, &mut pointer).unwrap();
        step(".x: 100, y: 100, pressure: 0", &mut manager, &mut pointer).unwrap();
        let before = null_state(&pointer).pos;
        assert_eq!(before, (50, 60));

        step("garbage line", &mut manager, &mut pointer).unwrap();
        step(".x: oops, y: 0, pressure: 0", &mut manager, &mut pointer).unwrap();

        assert_eq!(null_state(&pointer).pos, before);
        assert!(manager.target().is_some());
    }

    #[test]
    fn motion_without_hover_leaves_the_pointer_alone() {
        let mut pointer = Pointer::Null(NullPointer::default());
        let mut manager = PositionManager::new(AspectRatio::new(16, 9), 1080);

        step(".x: 30000, y: 30000, pressure: 0", &mut manager, &mut pointer).unwrap();

        assert_eq!(null_state(&pointer).pos, (0, 0));
        assert_eq!(manager.target(), None);
    }
}
