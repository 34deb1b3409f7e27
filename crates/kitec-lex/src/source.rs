//! Character source for the lexer.
//!
//! [`Source`] walks a byte buffer one character at a time while tracking
//! line and column numbers. The input is treated as a sequence of
//! single-byte characters; `\n` separates lines, `\r` is ordinary
//! whitespace.

use kitec_util::Position;

/// A character reader with one character of lookahead.
///
/// The reader always sits *on* a character: [`Source::current`] returns it
/// (or `None` once the input is exhausted) and [`Source::position`] is its
/// location. Construction performs the initial fetch, so the first
/// character of a non-empty input is immediately visible at 1:1.
pub struct Source {
    bytes: Vec<u8>,

    /// Index of the byte *after* the current character.
    index: usize,

    current: Option<char>,

    /// Position of the current character.
    position: Position,
}

impl Source {
    /// Creates a reader over the given input and fetches its first
    /// character.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        let mut source = Self {
            bytes: input.into(),
            index: 0,
            current: None,
            position: Position::new(1, 0),
        };
        source.fetch();
        source
    }

    /// The character the reader currently sits on, or `None` at end of
    /// text.
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Position of the current character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Consumes the current character and fetches the next one.
    ///
    /// Crossing a newline bumps the line counter and restarts the column at
    /// 1 for the following character. Advancing at end of text keeps
    /// sliding the column, so the end-of-text position is one past the last
    /// character.
    pub fn advance(&mut self) {
        if self.current == Some('\n') {
            self.position.line += 1;
            self.position.column = 0;
        }
        self.fetch();
    }

    fn fetch(&mut self) {
        self.current = self.bytes.get(self.index).map(|&b| b as char);
        if self.current.is_some() {
            self.index += 1;
        }
        self.position.column += 1;
    }
}
