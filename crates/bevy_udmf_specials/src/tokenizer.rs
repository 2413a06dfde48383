//! Byte-buffer tokenizer for embedded script sources.
//!
//! Splits a raw script blob into tokens: runs of non-whitespace characters,
//! single-character tokens for each configured special character, and
//! quoted strings (returned without their quotes). `//` line comments and
//! `/* */` block comments are skipped, even when `/` is itself a special
//! character. Everything is lossy-decoded as UTF-8; script sources are
//! ASCII in practice.

/// Streaming tokenizer over a byte buffer.
pub struct Tokenizer<'a> {
    data: &'a [u8],
    pos: usize,
    special: Vec<u8>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            special: Vec::new(),
        }
    }

    /// Configure the single-character tokens that break up runs.
    pub fn with_special_characters(mut self, chars: &[u8]) -> Self {
        self.special = chars.to_vec();
        self
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.data.len() && self.data[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.data[self.pos..].starts_with(b"//") {
                while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else if self.data[self.pos..].starts_with(b"/*") {
                self.pos += 2;
                while self.pos < self.data.len() && !self.data[self.pos..].starts_with(b"*/") {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.data.len());
            } else {
                return;
            }
        }
    }

    /// The next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<String> {
        self.skip_whitespace_and_comments();
        if self.pos >= self.data.len() {
            return None;
        }

        let c = self.data[self.pos];
        if self.special.contains(&c) {
            self.pos += 1;
            return Some((c as char).to_string());
        }

        if c == b'"' {
            self.pos += 1;
            let start = self.pos;
            while self.pos < self.data.len() && self.data[self.pos] != b'"' {
                self.pos += 1;
            }
            let token = &self.data[start..self.pos];
            self.pos = (self.pos + 1).min(self.data.len());
            return Some(String::from_utf8_lossy(token).into_owned());
        }

        let start = self.pos;
        while self.pos < self.data.len() {
            let c = self.data[self.pos];
            if c.is_ascii_whitespace() || c == b'"' || self.special.contains(&c) {
                break;
            }
            self.pos += 1;
        }
        Some(String::from_utf8_lossy(&self.data[start..self.pos]).into_owned())
    }

    /// Discard the next token.
    pub fn skip_token(&mut self) {
        let _ = self.next_token();
    }

    /// Collect tokens until `end` is consumed (exclusive) or input runs out.
    pub fn tokens_until(&mut self, end: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            if token == end {
                break;
            }
            tokens.push(token);
        }
        tokens
    }
}
