//! Splits a raw Windows command line into argument tokens.
//!
//! The rules are the historical `argv` ones, not the POSIX shell ones:
//!
//! - space, tab, CR and LF separate tokens;
//! - `"` toggles quote mode and is never copied, there is no backslash escaping;
//! - outside of quotes, the first `--` ends tokenization. Whatever follows it (minus leading
//!   whitespace) is the payload command line, and is kept as a view into the raw input so it
//!   reaches process creation exactly as it was typed.

use std::{fmt, ops::Range};

/// Characters that end a token outside of quote mode.
const fn is_separator_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Owned list of argument tokens.
///
/// All tokens share a single character buffer, `bounds` holds where each one lives in it.
/// Both are reserved once from the input length, so building the list never reallocates and
/// dropping it releases everything at once.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    storage: String,
    bounds: Vec<Range<usize>>,
}

impl ArgumentList {
    /// Reserves room for the worst case of `len` input bytes: every other character a
    /// one-character token.
    fn for_input_len(len: usize) -> Self {
        Self {
            storage: String::with_capacity(len),
            bounds: Vec::with_capacity(len.div_ceil(2) + 1),
        }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Token at `index`, `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        let range = self.bounds.get(index)?;
        self.storage.get(range.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.bounds
            .iter()
            .filter_map(|range| self.storage.get(range.clone()))
    }
}

impl fmt::Debug for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The part of the raw command line that follows the `--` separator.
///
/// This is never copied: it is the suffix of the raw input starting at [`Self::offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadCommandLine<'a> {
    offset: usize,
    text: &'a str,
}

impl<'a> PayloadCommandLine<'a> {
    /// Builds the payload view starting at `offset` in `raw`.
    ///
    /// Returns `None` when `offset` is past the end of `raw` or not on a character boundary.
    pub fn at(raw: &'a str, offset: usize) -> Option<Self> {
        raw.get(offset..).map(|text| Self { offset, text })
    }

    /// Byte offset of the payload inside the raw command line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// `true` when nothing follows the separator.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for PayloadCommandLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// Output of [`tokenize`].
#[derive(Debug)]
pub struct Tokenized<'a> {
    pub arguments: ArgumentList,
    /// `None` when the command line has no `--` separator.
    pub payload: Option<PayloadCommandLine<'a>>,
}

/// Tokenizer state for a single pass over the raw command line.
struct Tokenizer {
    arguments: ArgumentList,
    in_quote: bool,
    /// Start of the token being built in `arguments.storage`, `None` while in whitespace.
    current: Option<usize>,
}

impl Tokenizer {
    fn new(len: usize) -> Self {
        Self {
            arguments: ArgumentList::for_input_len(len),
            in_quote: false,
            current: None,
        }
    }

    /// Opens a new token slot unless one is already open.
    fn enter_token(&mut self) {
        if self.current.is_none() {
            self.current = Some(self.arguments.storage.len());
        }
    }

    fn push(&mut self, c: char) {
        self.enter_token();
        self.arguments.storage.push(c);
    }

    /// Closes the open token, if any.
    fn end_token(&mut self) {
        if let Some(start) = self.current.take() {
            let end = self.arguments.storage.len();
            self.arguments.bounds.push(start..end);
        }
    }

    fn finish(mut self) -> ArgumentList {
        self.end_token();
        self.arguments
    }
}

/// Offset of the first non-whitespace character at or after `from`, or `raw.len()`.
fn skip_whitespace(raw: &str, from: usize) -> usize {
    raw.get(from..)
        .and_then(|rest| rest.find(|c: char| !is_separator_whitespace(c)))
        .map_or(raw.len(), |skipped| from + skipped)
}

/// Splits `raw` into arguments and locates the payload command line.
///
/// Tokenization stops at the first `--` seen outside of quotes, even in the middle of a token
/// (which is kept as it stands).
#[tracing::instrument(level = "trace", ret)]
pub fn tokenize(raw: &str) -> Tokenized<'_> {
    let mut tokenizer = Tokenizer::new(raw.len());
    let mut payload = None;

    let mut chars = raw.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if tokenizer.in_quote {
            if c == '"' {
                tokenizer.in_quote = false;
            } else {
                tokenizer.push(c);
            }
            continue;
        }

        match c {
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                // Both dashes are one byte each.
                payload = PayloadCommandLine::at(raw, skip_whitespace(raw, index + 2));
                break;
            }
            '"' => {
                tokenizer.in_quote = true;
                tokenizer.enter_token();
            }
            c if is_separator_whitespace(c) => tokenizer.end_token(),
            c => tokenizer.push(c),
        }
    }

    Tokenized {
        arguments: tokenizer.finish(),
        payload,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tokens(raw: &str) -> Vec<String> {
        tokenize(raw).arguments.iter().map(str::to_owned).collect()
    }

    #[rstest]
    #[case("", &[])]
    #[case("   \t\r\n", &[])]
    #[case("foo", &["foo"])]
    #[case("foo \"a b\" c", &["foo", "a b", "c"])]
    #[case("a\"b c\"d e", &["ab cd", "e"])]
    #[case("\"\" x", &["", "x"])]
    #[case("\"unterminated -- quote", &["unterminated -- quote"])]
    #[case("\"C:\\Program Files\\runcpu.exe\" -a f", &["C:\\Program Files\\runcpu.exe", "-a", "f"])]
    #[case("one\ttwo\r\nthree", &["one", "two", "three"])]
    #[case("back\\\"slash\"", &["back\\slash"])]
    #[case("-a -d", &["-a", "-d"])]
    fn splits_tokens(#[case] raw: &str, #[case] expected: &[&str]) {
        assert_eq!(tokens(raw), expected);
        assert!(tokenize(raw).payload.is_none());
    }

    #[test]
    fn payload_after_separator() {
        let raw = "foo -a 3 -- notepad.exe";
        let Tokenized { arguments, payload } = tokenize(raw);

        assert_eq!(arguments.iter().collect::<Vec<_>>(), ["foo", "-a", "3"]);

        let payload = payload.expect("separator present");
        assert_eq!(payload.as_str(), "notepad.exe");
        assert_eq!(payload.offset(), raw.find('n').expect("has an n"));
    }

    #[test]
    fn separator_without_payload() {
        let Tokenized { arguments, payload } = tokenize("-- ");

        assert!(arguments.is_empty());
        let payload = payload.expect("separator present");
        assert!(payload.is_empty());
        assert_eq!(payload.offset(), 3);
    }

    #[test]
    fn separator_inside_token_ends_it() {
        let Tokenized { arguments, payload } = tokenize("foo--bar baz");

        assert_eq!(arguments.iter().collect::<Vec<_>>(), ["foo"]);
        assert_eq!(payload.map(|p| p.as_str()), Some("bar baz"));
    }

    #[test]
    fn quoted_separator_is_literal() {
        let Tokenized { arguments, payload } = tokenize("x \"--\" -- y");

        assert_eq!(arguments.iter().collect::<Vec<_>>(), ["x", "--"]);
        assert_eq!(payload.map(|p| p.as_str()), Some("y"));
    }

    #[test]
    fn single_dash_is_a_token() {
        assert_eq!(tokens("x - -y"), ["x", "-", "-y"]);
    }

    #[test]
    fn non_ascii_tokens() {
        assert_eq!(tokens("привет \"мир 世界\""), ["привет", "мир 世界"]);
    }

    #[test]
    fn payload_view_rejects_bad_offsets() {
        assert!(PayloadCommandLine::at("abc", 4).is_none());
        assert!(PayloadCommandLine::at("é", 1).is_none());
        assert!(PayloadCommandLine::at("abc", 3).is_some_and(|p| p.is_empty()));
    }

    #[test]
    fn argument_list_get() {
        let arguments = tokenize("a bb ccc").arguments;

        assert_eq!(arguments.len(), 3);
        assert_eq!(arguments.get(1), Some("bb"));
        assert_eq!(arguments.get(3), None);
    }
}
