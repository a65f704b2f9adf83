//! Token collator: token stream → `(name, [values])` records.

use crate::args::tokenizer::{Token, Tokenizer};
use crate::error::ParseError;

/// An option name together with the values attributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgOptionAndValues {
    pub name: String,
    pub values: Vec<String>,
    /// The arguments folded into this record, as typed.
    pub raw: Vec<String>,
}

/// Pull-based collator over a [`Tokenizer`].
///
/// Bare values following a name, and `--name=value` tokens repeating the same
/// name, are folded into one record. The first token with a different name is
/// held back as the start of the next record.
#[derive(Debug)]
pub struct Collator {
    tokens: Tokenizer,
    /// Token read ahead while closing the previous record, with its raw text.
    pending: Option<(Token, String)>,
    /// Record interrupted by a tokenizer failure.
    partial: Option<ArgOptionAndValues>,
    done: bool,
}

impl Collator {
    pub fn new(tokens: Tokenizer) -> Self {
        Self {
            tokens,
            pending: None,
            partial: None,
            done: false,
        }
    }

    /// Every argument not collated into an emitted record, verbatim.
    ///
    /// The interrupted record or the read-ahead token come first, followed by
    /// the tokenizer's raw input.
    pub fn take_remaining(&mut self) -> Vec<String> {
        let mut remaining = Vec::new();
        if let Some(partial) = self.partial.take() {
            remaining.extend(partial.raw);
        }
        if let Some((_, raw)) = self.pending.take() {
            remaining.push(raw);
        }
        remaining.extend(self.tokens.take_remaining());
        remaining
    }

    fn fail(&mut self, err: ParseError) -> Option<Result<ArgOptionAndValues, ParseError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl Iterator for Collator {
    type Item = Result<ArgOptionAndValues, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (first, first_raw) = match self.pending.take() {
            Some(lexed) => lexed,
            None => match self.tokens.next_raw()? {
                Ok(lexed) => lexed,
                Err(err) => return self.fail(err),
            },
        };

        let (name, mut values) = match first {
            Token::OptionName(name) => (name, Vec::new()),
            Token::OptionNameWithValue(name, value) => (name, vec![value]),
            Token::BareValue(value) => {
                let err = ParseError::OptionName { token: value.clone() };
                self.pending = Some((Token::BareValue(value), first_raw));
                return self.fail(err);
            }
        };
        let mut raw = vec![first_raw];

        loop {
            match self.tokens.next_raw() {
                None => break,
                Some(Ok((Token::BareValue(value), text))) => {
                    values.push(value);
                    raw.push(text);
                }
                Some(Ok((Token::OptionNameWithValue(next, value), text))) if next == name => {
                    values.push(value);
                    raw.push(text);
                }
                Some(Ok(lexed)) => {
                    self.pending = Some(lexed);
                    break;
                }
                Some(Err(err)) => {
                    self.partial = Some(ArgOptionAndValues { name, values, raw });
                    return self.fail(err);
                }
            }
        }

        Some(Ok(ArgOptionAndValues { name, values, raw }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::cursor::ArgCursor;
    use crate::config::ParserConfig;

    fn collator(args: &[&str]) -> Collator {
        Collator::new(Tokenizer::new(
            ArgCursor::new(args.iter().copied()),
            &ParserConfig::default(),
        ))
    }

    fn record(name: &str, values: &[&str]) -> (String, Vec<String>) {
        (
            name.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        )
    }

    fn collect(c: Collator) -> Vec<(String, Vec<String>)> {
        c.map(|r| r.unwrap()).map(|r| (r.name, r.values)).collect()
    }

    fn next_record(c: &mut Collator) -> (String, Vec<String>) {
        let r = c.next().unwrap().unwrap();
        (r.name, r.values)
    }

    #[test]
    fn test_values_fold_under_one_name() {
        let records = collect(collator(&["--input", "a.txt", "b.txt", "--input=c.txt", "-v"]));
        assert_eq!(
            records,
            vec![record("input", &["a.txt", "b.txt", "c.txt"]), record("v", &[])]
        );
    }

    #[test]
    fn test_repeated_bare_name_starts_new_record() {
        let records = collect(collator(&["--in", "a", "--in", "b"]));
        assert_eq!(records, vec![record("in", &["a"]), record("in", &["b"])]);
    }

    #[test]
    fn test_leading_value_is_rejected() {
        let mut c = collator(&["stray", "--name", "x"]);
        match c.next() {
            Some(Err(ParseError::OptionName { token })) => assert_eq!(token, "stray"),
            other => panic!("Expected OptionName error, got {:?}", other),
        }
        assert!(c.next().is_none());
        assert_eq!(c.take_remaining(), vec!["stray", "--name", "x"]);
    }

    #[test]
    fn test_take_remaining_after_emitted_record() {
        let mut c = collator(&["--a", "1", "--b=2", "3", "--c"]);
        assert_eq!(next_record(&mut c), record("a", &["1"]));
        assert_eq!(c.take_remaining(), vec!["--b=2", "3", "--c"]);
    }

    #[test]
    fn test_take_remaining_restores_interrupted_record() {
        let mut c = collator(&["--first", "x", "--name", "v1", "-", "tail"]);
        assert_eq!(next_record(&mut c), record("first", &["x"]));
        assert!(c.next().unwrap().is_err());
        assert!(c.next().is_none());
        assert_eq!(c.take_remaining(), vec!["--name", "v1", "-", "tail"]);
    }

    #[test]
    fn test_take_remaining_keeps_short_name_as_typed() {
        let mut c = collator(&["-n", "v", "--"]);
        assert!(c.next().unwrap().is_err());
        assert_eq!(c.take_remaining(), vec!["-n", "v", "--"]);
    }

    #[test]
    fn test_record_keeps_arguments_as_typed() {
        let mut c = collator(&["-nvalue", "-n=x", "y", "--b"]);
        let r = c.next().unwrap().unwrap();
        assert_eq!(r.values, vec!["value", "x", "y"]);
        assert_eq!(r.raw, vec!["-nvalue", "-n=x", "y"]);
    }

    #[test]
    fn test_take_remaining_keeps_typed_forms() {
        let mut c = collator(&["--a", "--b=2", "-nvalue", "v", "--"]);
        assert_eq!(next_record(&mut c), record("a", &[]));
        assert_eq!(next_record(&mut c), record("b", &["2"]));
        assert!(c.next().unwrap().is_err());
        assert_eq!(c.take_remaining(), vec!["-nvalue", "v", "--"]);
    }
}
