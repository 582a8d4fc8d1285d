//! Console input collected before capture starts: output directory, delay
//! between frames, start confirmation.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{Error, XResult};

/// Supplies the output directory.
pub trait DirectoryChooser {
    /// `Ok(None)` when the user cancels
    fn choose(&mut self) -> XResult<Option<PathBuf>>;
}

/// A directory known in advance, e.g. from the command line
#[derive(Debug, Clone)]
pub struct FixedDirectory(pub PathBuf);

impl DirectoryChooser for FixedDirectory {
    fn choose(&mut self) -> XResult<Option<PathBuf>> {
        if self.0.is_dir() {
            Ok(Some(self.0.clone()))
        } else {
            Err(Error::InvalidArgument(format!(
                "{} is not a directory",
                self.0.display()
            )))
        }
    }
}

/// Asks for the directory on a terminal until an existing one is entered.
/// An empty answer cancels.
pub struct PromptDirectoryChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptDirectoryChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> DirectoryChooser for PromptDirectoryChooser<R, W> {
    fn choose(&mut self) -> XResult<Option<PathBuf>> {
        loop {
            write!(self.output, "Output directory: ")?;
            self.output.flush()?;

            let Some(line) = read_line(&mut self.input)? else {
                writeln!(self.output, "user cancelled")?;
                return Ok(None);
            };
            if line.is_empty() {
                writeln!(self.output, "user cancelled")?;
                return Ok(None);
            }

            let path = PathBuf::from(line);
            if path.is_dir() {
                return Ok(Some(path));
            }
            writeln!(self.output, "{} is not an existing directory", path.display())?;
        }
    }
}

/// Asks for the delay between frames in seconds until a valid number is entered.
pub fn prompt_delay<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> XResult<u64> {
    loop {
        write!(output, "Interval between frames (seconds): ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Err(Error::InvalidArgument("no interval given".to_string()));
        };
        match line.parse::<u64>() {
            Ok(delay) => return Ok(delay),
            Err(_) => writeln!(output, "{line:?} is not a whole number of seconds")?,
        }
    }
}

/// Blocks until the user presses Enter
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> XResult<()> {
    writeln!(output, "Press Enter to start capture")?;
    output.flush()?;
    read_line(input)?;
    Ok(())
}

/// Trimmed line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> XResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
