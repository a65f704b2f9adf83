//! Tokenizer: raw strings → typed tokens, argument files expanded in place.

use std::fs;
use std::path::PathBuf;

use crate::args::cursor::ArgCursor;
use crate::config::ParserConfig;
use crate::error::ParseError;

/// A lexed command-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `--name` or `-n`.
    OptionName(String),
    /// `--name=value`, `-n=value` or `-nvalue`.
    OptionNameWithValue(String, String),
    /// Anything that is not an option.
    BareValue(String),
}

impl Token {
    /// The option name carried by this token, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Token::OptionName(name) | Token::OptionNameWithValue(name, _) => Some(name),
            Token::BareValue(_) => None,
        }
    }
}

/// Prefix an option name with the dashes matching its length.
pub fn dashed(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{}", name)
    } else {
        format!("--{}", name)
    }
}

/// Whether `name` is acceptable as a long option name.
pub fn is_valid_long_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        }
        _ => false,
    }
}

/// Lex a single raw argument. Argument-file references are not handled here.
pub fn lex(raw: &str) -> Result<Token, ParseError> {
    let illegal = || ParseError::OptionName {
        token: raw.to_string(),
    };

    if raw.is_empty() {
        return Err(illegal());
    }

    if let Some(rest) = raw.strip_prefix("--") {
        let (name, value) = match rest.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (rest, None),
        };
        if !is_valid_long_name(name) {
            return Err(illegal());
        }
        return Ok(match value {
            Some(value) => Token::OptionNameWithValue(name.to_string(), value.to_string()),
            None => Token::OptionName(name.to_string()),
        });
    }

    if let Some(rest) = raw.strip_prefix('-') {
        let Some(short) = rest.chars().next() else {
            return Err(illegal());
        };
        if !short.is_ascii_alphanumeric() {
            return Err(illegal());
        }
        let tail = &rest[short.len_utf8()..];
        let name = short.to_string();
        return Ok(if tail.is_empty() {
            Token::OptionName(name)
        } else {
            let value = tail.strip_prefix('=').unwrap_or(tail);
            Token::OptionNameWithValue(name, value.to_string())
        });
    }

    Ok(Token::BareValue(raw.to_string()))
}

/// Lazy, single-pass token stream over an [`ArgCursor`].
///
/// Stops for good after the first error; the failing argument stays in the
/// cursor so [`Tokenizer::take_remaining`] returns it verbatim.
#[derive(Debug)]
pub struct Tokenizer {
    cursor: ArgCursor,
    file_marker: char,
    max_file_depth: usize,
    failed: bool,
}

impl Tokenizer {
    pub fn new(cursor: ArgCursor, config: &ParserConfig) -> Self {
        Self {
            cursor,
            file_marker: config.file_marker(),
            max_file_depth: config.max_file_depth,
            failed: false,
        }
    }

    /// Drain every raw argument not turned into a token yet.
    pub fn take_remaining(&mut self) -> Vec<String> {
        self.cursor.take_remaining()
    }

    /// Next token together with the argument it was lexed from.
    pub fn next_raw(&mut self) -> Option<Result<(Token, String), ParseError>> {
        if self.failed {
            return None;
        }

        loop {
            let raw = self.cursor.peek()?.to_string();

            if let Some(reference) = raw.strip_prefix(self.file_marker) {
                if let Err(err) = self.expand_file(reference) {
                    self.failed = true;
                    return Some(Err(err));
                }
                continue;
            }

            return match lex(&raw) {
                Ok(token) => {
                    self.cursor.advance();
                    Some(Ok((token, raw)))
                }
                Err(err) => {
                    self.failed = true;
                    Some(Err(err))
                }
            };
        }
    }

    fn expand_file(&mut self, reference: &str) -> Result<(), ParseError> {
        let path = PathBuf::from(reference);
        let read_error = |source| ParseError::ArgumentFileRead {
            path: path.clone(),
            source,
        };

        let canonical = fs::canonicalize(&path).map_err(read_error)?;
        let mut chain = self.cursor.include_chain().to_vec();
        if chain.contains(&canonical) {
            return Err(ParseError::ArgumentFileCycle { path: path.clone() });
        }
        if chain.len() >= self.max_file_depth {
            return Err(ParseError::ArgumentFileDepth {
                path: path.clone(),
                limit: self.max_file_depth,
            });
        }

        let content = fs::read_to_string(&canonical).map_err(read_error)?;
        let lines: Vec<String> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(String::from)
            .collect();

        tracing::debug!(
            "Expanding argument file {} ({} arguments)",
            canonical.display(),
            lines.len()
        );
        self.cursor.advance();
        chain.push(canonical);
        self.cursor.push_file(chain, lines);
        Ok(())
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_raw().map(|lexed| lexed.map(|(token, _)| token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<Token> {
        let config = ParserConfig::default();
        Tokenizer::new(ArgCursor::new(args.iter().copied()), &config)
            .map(|t| t.unwrap())
            .collect()
    }

    #[test]
    fn test_long_forms() {
        assert_eq!(
            tokens(&["--name", "--name=value", "--name="]),
            vec![
                Token::OptionName("name".into()),
                Token::OptionNameWithValue("name".into(), "value".into()),
                Token::OptionNameWithValue("name".into(), "".into()),
            ]
        );
    }

    #[test]
    fn test_short_forms() {
        assert_eq!(
            tokens(&["-n", "-n=value", "-nvalue", "-n=a=b"]),
            vec![
                Token::OptionName("n".into()),
                Token::OptionNameWithValue("n".into(), "value".into()),
                Token::OptionNameWithValue("n".into(), "value".into()),
                Token::OptionNameWithValue("n".into(), "a=b".into()),
            ]
        );
    }

    #[test]
    fn test_bare_values() {
        assert_eq!(
            tokens(&["value", "a b", "x=y"]),
            vec![
                Token::BareValue("value".into()),
                Token::BareValue("a b".into()),
                Token::BareValue("x=y".into()),
            ]
        );
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        for raw in ["", "-", "--", "---name", "--=value", "-=x", "-?"] {
            assert!(
                matches!(lex(raw), Err(ParseError::OptionName { .. })),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_failure_stops_stream_and_keeps_tail() {
        let config = ParserConfig::default();
        let mut tokenizer = Tokenizer::new(ArgCursor::new(["--a", "--", "--b"]), &config);

        assert_eq!(tokenizer.next().unwrap().unwrap(), Token::OptionName("a".into()));
        assert!(tokenizer.next().unwrap().is_err());
        assert!(tokenizer.next().is_none());
        assert_eq!(tokenizer.take_remaining(), vec!["--", "--b"]);
    }

    #[test]
    fn test_next_raw_keeps_typed_text() {
        let config = ParserConfig::default();
        let mut tokenizer = Tokenizer::new(ArgCursor::new(["-nvalue", "--b=2"]), &config);

        let (token, raw) = tokenizer.next_raw().unwrap().unwrap();
        assert_eq!(token, Token::OptionNameWithValue("n".into(), "value".into()));
        assert_eq!(raw, "-nvalue");

        let (token, raw) = tokenizer.next_raw().unwrap().unwrap();
        assert_eq!(token, Token::OptionNameWithValue("b".into(), "2".into()));
        assert_eq!(raw, "--b=2");
        assert!(tokenizer.next_raw().is_none());
    }
}
