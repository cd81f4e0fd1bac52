use std::io::{self, ErrorKind, Lines, StdinLock};

use log::warn;

#[derive(Debug)]
pub struct StdinSource {
    lines: Lines<StdinLock<'static>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: io::stdin().lines(),
        }
    }

    pub fn read_line(&mut self) -> Option<String> {
        loop {
            match self.lines.next()? {
                Ok(line) => return Some(line),
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    warn!("Skipping unreadable line: {err}");
                }
                Err(err) => {
                    warn!("Stdin read failed: {err}");
                    return None;
                }
            }
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}
