//! Interactive password input.
//!
//! Input is hidden when stdin is a terminal that lets us turn echo off;
//! otherwise the prompt falls back to visible input.

use std::io::{self, BufRead, IsTerminal, Write};

use secrecy::SecretString;

const VISIBLE_PROMPT: &str = "Enter password (visible): ";
const HIDDEN_PROMPT: &str = "Enter password (hidden): ";

/// Git Bash sets `MSYSTEM` and an xterm-like `TERM`, and its terminal does
/// not honour echo suppression.
pub fn running_in_git_bash() -> bool {
    is_git_bash(
        std::env::var("MSYSTEM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn is_git_bash(msystem: Option<&str>, term: Option<&str>) -> bool {
    msystem.is_some_and(|m| !m.is_empty())
        && term.is_some_and(|t| t.to_lowercase().contains("xterm"))
}

pub fn prompt_password(visible: bool) -> io::Result<SecretString> {
    if visible || running_in_git_bash() || !io::stdin().is_terminal() {
        return read_visible();
    }

    match read_hidden() {
        Ok(password) => Ok(password),
        Err(e) => {
            tracing::warn!("Cannot hide input, falling back to visible prompt: {}", e);
            read_visible()
        }
    }
}

fn read_visible() -> io::Result<SecretString> {
    show_prompt(VISIBLE_PROMPT)?;
    read_line().map(|line| SecretString::new(line.into()))
}

/// Puts the terminal back the way it was found when dropped.
#[cfg(unix)]
struct EchoGuard {
    fd: std::os::fd::RawFd,
    original: libc::termios,
}

#[cfg(unix)]
impl EchoGuard {
    fn disable_echo(fd: std::os::fd::RawFd) -> io::Result<Self> {
        use std::mem::MaybeUninit;

        let mut original = MaybeUninit::<libc::termios>::uninit();
        // SAFETY: `fd` is the process stdin and tcgetattr fills `original` on success.
        if unsafe { libc::tcgetattr(fd, original.as_mut_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: initialized by the successful tcgetattr above.
        let original = unsafe { original.assume_init() };

        let mut silent = original;
        silent.c_lflag &= !libc::ECHO;
        silent.c_lflag |= libc::ECHONL;
        // SAFETY: `silent` is a valid termios copied from the current settings.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &silent) } != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(Self { fd, original })
    }
}

#[cfg(unix)]
impl Drop for EchoGuard {
    fn drop(&mut self) {
        // SAFETY: restores the settings read in `disable_echo`.
        if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &self.original) } != 0 {
            tracing::warn!(
                "Failed to restore terminal echo: {}",
                io::Error::last_os_error()
            );
        }
    }
}

/// Reads a line with echo turned off.
///
/// The terminal is restored on every return path, panics included. A signal
/// that kills the process (Ctrl-C) skips `Drop`, so echo stays off until the
/// shell resets it (`stty echo`).
#[cfg(unix)]
fn read_hidden() -> io::Result<SecretString> {
    use std::os::fd::AsRawFd;

    let _guard = EchoGuard::disable_echo(io::stdin().as_raw_fd())?;
    show_prompt(HIDDEN_PROMPT)?;
    read_line().map(|line| SecretString::new(line.into()))
}

#[cfg(not(unix))]
fn read_hidden() -> io::Result<SecretString> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "echo suppression is only available on unix terminals",
    ))
}

fn show_prompt(prompt: &str) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    stderr.write_all(prompt.as_bytes())?;
    stderr.flush()
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no password entered",
        ));
    }
    Ok(strip_line_ending(line))
}

/// Removes the line terminator only; other whitespace is part of the password.
fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
