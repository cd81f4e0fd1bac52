pub mod driver;
pub mod stdin;

use anyhow::Result;

use crate::config::{self, Config};
use crate::source::{driver::DriverSource, stdin::StdinSource};

#[derive(Debug)]
pub enum Source {
    /// Spawns the tablet driver and reads its standard output.
    Driver(DriverSource),
    /// Reads protocol lines from this process's standard input.
    Stdin(StdinSource),
}

pub fn create_source(config: &Config) -> Result<Source> {
    Ok(match config.source {
        config::Source::Driver => Source::Driver(DriverSource::spawn(&config.driver)?),
        config::Source::Stdin => Source::Stdin(StdinSource::new()),
    })
}

impl Source {
    /// Next line of the event stream, or None once it ends.
    pub fn read_line(&mut self) -> Option<String> {
        match self {
            Source::Driver(driver_source) => driver_source.read_line(),
            Source::Stdin(stdin_source) => stdin_source.read_line(),
        }
    }
}
