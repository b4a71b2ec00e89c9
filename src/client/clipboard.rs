//! Copying the displayed short link to the system clipboard.

use base64::{Engine as _, engine::general_purpose};
use std::io::{self, Write};

use super::view::ShortenView;

/// Acknowledgment shown after a successful copy.
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

/// Destination for copied text.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// Clipboard that asks the terminal emulator to store the text using the
/// OSC 52 escape sequence. Works over SSH and without a display server.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        let encoded = general_purpose::STANDARD.encode(text);
        write!(self.out, "\x1b]52;c;{}\x07", encoded)?;
        self.out.flush()
    }
}

/// Copies the link text exactly as it is displayed.
///
/// Returns the acknowledgment to show.
pub fn copy_link(view: &ShortenView, clipboard: &mut impl Clipboard) -> io::Result<&'static str> {
    clipboard.copy(&view.link_text)?;
    Ok(COPIED_MESSAGE)
}
