//! Interactive confirmation before running a script.
//!
//! Confirmation only happens when stdin is a terminal; automation that
//! pipes or closes stdin is never blocked. A single keystroke decides:
//! Enter accepts, everything else declines.

use std::collections::VecDeque;
use std::io::{self, IsTerminal, Read, Write};

use crossterm::terminal;

use crate::error::Result;

/// Largest keystroke read in one go (multi-byte keys and escape sequences).
const KEY_BUFFER_LEN: usize = 8;
/// Byte produced by Ctrl-C in raw mode.
const ETX: u8 = 0x03;

/// Prompt shown before waiting for a key.
pub const PROMPT: &str = "Press Enter to run, q to cancel: ";

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The operator accepted, or no terminal was attached.
    Accepted,
    /// The operator declined.
    Declined,
}

/// Source of single raw keystrokes.
pub trait KeyReader {
    /// Whether an interactive terminal is attached.
    fn is_terminal(&self) -> bool;

    /// Block until one keystroke arrives and return its bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_key(&mut self) -> io::Result<Vec<u8>>;
}

/// Reads keystrokes from the controlling terminal on stdin.
#[derive(Debug, Default)]
pub struct TerminalKeyReader;

impl TerminalKeyReader {
    /// Create a reader for the process's stdin.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl KeyReader for TerminalKeyReader {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_key(&mut self) -> io::Result<Vec<u8>> {
        let _raw = RawModeGuard::enable()?;
        let mut buf = [0u8; KEY_BUFFER_LEN];
        let n = io::stdin().lock().read(&mut buf)?;
        Ok(buf[..n].to_vec())
    }
}

/// Keeps the terminal in raw mode until dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("Failed to restore terminal mode: {e}");
        }
    }
}

/// A [`KeyReader`] that replays scripted keystrokes.
///
/// # Examples
///
/// ```
/// use cwdeploy::confirm::{confirm, Confirmation, ScriptedKeys};
///
/// let mut keys = ScriptedKeys::terminal([b"\r".to_vec()]);
/// let mut out = Vec::new();
/// assert_eq!(confirm(&mut keys, &mut out).unwrap(), Confirmation::Accepted);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    terminal: bool,
    keys: VecDeque<Vec<u8>>,
    reads: usize,
}

impl ScriptedKeys {
    /// A reader that behaves like an attached terminal.
    #[must_use]
    pub fn terminal(keys: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self {
            terminal: true,
            keys: keys.into_iter().collect(),
            reads: 0,
        }
    }

    /// A reader with no terminal attached.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    /// How many keystrokes have been requested.
    #[must_use]
    pub const fn reads(&self) -> usize {
        self.reads
    }
}

impl KeyReader for ScriptedKeys {
    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn read_key(&mut self) -> io::Result<Vec<u8>> {
        self.reads += 1;
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left"))
    }
}

/// Interpret one keystroke. Only Enter (CR or LF) accepts.
///
/// # Examples
///
/// ```
/// use cwdeploy::confirm::{interpret_keystroke, Confirmation};
///
/// assert_eq!(interpret_keystroke(b"\r"), Confirmation::Accepted);
/// assert_eq!(interpret_keystroke(b"\n"), Confirmation::Accepted);
/// assert_eq!(interpret_keystroke(b"q"), Confirmation::Declined);
/// assert_eq!(interpret_keystroke(b"y"), Confirmation::Declined);
/// ```
#[must_use]
pub fn interpret_keystroke(bytes: &[u8]) -> Confirmation {
    match bytes.first().copied() {
        Some(b'q' | b'Q' | ETX) => Confirmation::Declined,
        Some(b'\r' | b'\n') => Confirmation::Accepted,
        _ => Confirmation::Declined,
    }
}

/// Ask the operator to confirm, writing the prompt to `out`.
///
/// Without a terminal the prompt is skipped and the answer is
/// [`Confirmation::Accepted`].
///
/// # Errors
///
/// Returns an error if the prompt cannot be written or the key cannot be
/// read.
pub fn confirm<K, W>(keys: &mut K, out: &mut W) -> Result<Confirmation>
where
    K: KeyReader + ?Sized,
    W: Write + ?Sized,
{
    if !keys.is_terminal() {
        log::debug!("stdin is not a terminal; skipping confirmation");
        return Ok(Confirmation::Accepted);
    }

    write!(out, "{PROMPT}")?;
    out.flush()?;

    let key = keys.read_key()?;
    writeln!(out)?;

    Ok(interpret_keystroke(&key))
}
