use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Context, Result, bail};
use log::{info, warn};

#[derive(Debug)]
pub struct DriverSource {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl DriverSource {
    /// Launches the driver command and attaches to its standard output.
    ///
    /// The command is split on whitespace; the first word is the program,
    /// the rest are its arguments.
    pub fn spawn(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace();
        let Some(program) = words.next() else {
            bail!("driver command is empty");
        };

        let mut child = Command::new(program)
            .args(words)
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("could not launch {program:?}; did you build the driver?"))?;

        info!("Driver running (pid {}).", child.id());

        let stdout = child.stdout.take().context("driver has no stdout handle")?;

        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
        })
    }

    pub fn read_line(&mut self) -> Option<String> {
        loop {
            match self.lines.next()? {
                Ok(line) => return Some(line),
                // A line that is not UTF-8 is dropped like any other bad line.
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    warn!("Skipping unreadable line: {err}");
                }
                Err(err) => {
                    warn!("Driver stream read failed: {err}");
                    return None;
                }
            }
        }
    }
}

impl Drop for DriverSource {
    fn drop(&mut self) {
        // The driver has no shutdown command; it stops with the session.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn reads_spawned_process_output() {
        let mut source = DriverSource::spawn("echo sent button: -1, 1").unwrap();
        assert_eq!(source.read_line(), Some("sent button: -1, 1".to_owned()));
        assert_eq!(source.read_line(), None);
    }

    #[test]
    #[cfg(unix)]
    fn unreadable_bytes_do_not_end_the_stream() {
        let mut source = DriverSource::spawn(r"printf \377\nok\n").unwrap();
        assert_eq!(source.read_line(), Some("ok".to_owned()));
        assert_eq!(source.read_line(), None);
    }

    #[test]
    fn missing_binary_names_the_usual_cause() {
        let err = DriverSource::spawn("./networktablet-that-is-not-built").unwrap_err();
        assert!(format!("{err:#}").contains("did you build the driver?"));
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = DriverSource::spawn("   ").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
