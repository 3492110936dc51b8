use std::collections::VecDeque;

/// A single command-line argument after tokenization.
///
/// `name` is present for `--flag` style arguments (with the leading dashes
/// stripped), `value` for positional arguments or the right-hand side of
/// `--flag=value`. Both are present when a flag carried a value, either
/// attached with `=` or consumed via lookahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl Argument {
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
        }
    }

    pub fn positional(value: impl Into<String>) -> Self {
        Self {
            name: None,
            value: Some(value.into()),
        }
    }

    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

/// Returns true when the tolerant-mode sentinel appears anywhere in the raw
/// argument list.
///
/// This runs as an independent pass before dispatch because the sentinel
/// softens the handling of every other argument, including ones that appear
/// before it.
pub fn tolerant_mode_requested(args: &[String]) -> bool {
    args.iter()
        .any(|arg| arg.trim_start_matches('-') == "skip-bad-args")
}

/// Turns the raw argument list into a stream of [`Argument`] tokens.
///
/// Consumes the input left to right. A single raw element usually produces
/// one token, but a bare `--define` may consume the following element as its
/// value and emit two tokens, so tokenized output is buffered.
pub struct Tokenizer<'a> {
    args: &'a [String],
    cursor: usize,
    token_buffer: VecDeque<Argument>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            args,
            cursor: 0,
            token_buffer: Default::default(),
        }
    }

    /// Tokenize the raw element at the cursor, buffering whatever it
    /// produces. Advances past a consumed lookahead element as well.
    fn buffer_next_element(&mut self) {
        let raw = &self.args[self.cursor];
        self.cursor += 1;

        if raw.trim().is_empty() {
            return;
        }

        if !raw.starts_with('-') {
            self.token_buffer.push_back(Argument::positional(raw));
            return;
        }

        let stripped = raw.trim_start_matches('-');
        match stripped.split_once('=') {
            // `--name=value`; anything after the first `=` is kept verbatim
            // so defines like `--define=AAA=0==1` survive intact.
            Some((name, value)) => self.token_buffer.push_back(Argument::pair(name, value)),
            None => {
                if stripped == "define" && self.cursor < self.args.len() {
                    // `--define` takes its value from the next element. The
                    // element is consumed either way; it only becomes the
                    // value if it doesn't look like another flag.
                    let lookahead = &self.args[self.cursor];
                    self.cursor += 1;
                    if !lookahead.starts_with("--") {
                        self.token_buffer
                            .push_back(Argument::pair(stripped, lookahead));
                    }
                }

                // The bare token is emitted even when the lookahead produced
                // a combined one, matching the historical behavior.
                self.token_buffer.push_back(Argument::flag(stripped));
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Argument;

    fn next(&mut self) -> Option<Self::Item> {
        while self.token_buffer.is_empty() && self.cursor < self.args.len() {
            self.buffer_next_element();
        }

        self.token_buffer.pop_front()
    }
}
