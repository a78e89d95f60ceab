use std::fmt::Display;

use crate::error::ScriptError;
use nom::{
    error::{ContextError, ErrorKind, ParseError},
    InputLength,
};

/// A nom error that keeps the alternative which got furthest into the input.
///
/// The first entry is where parsing stopped, the later ones are the frames it was reached
/// through, innermost first.
#[derive(Debug, PartialEq)]
pub struct GreedyError<I> {
    trail: Vec<(I, Reason)>,
}

#[derive(Debug, PartialEq)]
enum Reason {
    Context(&'static str),
    Nom(ErrorKind),
    Char(char),
}

impl<I: InputLength> GreedyError<I> {
    fn new(input: I, reason: Reason) -> Self {
        GreedyError {
            trail: vec![(input, reason)],
        }
    }

    fn push(mut self, input: I, reason: Reason) -> Self {
        self.trail.push((input, reason));
        self
    }

    /// Input left over where parsing stopped
    fn remaining(&self) -> usize {
        self.trail
            .first()
            .map_or(usize::MAX, |(input, _)| input.input_len())
    }
}

impl Display for GreedyError<&str> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let context = self.trail.iter().find_map(|(_, reason)| match reason {
            Reason::Context(ctx) => Some(*ctx),
            _ => None,
        });
        if let Some(ctx) = context {
            write!(f, "in {}: ", ctx)?;
        }
        match self.trail.first() {
            Some((input, Reason::Char(c))) => {
                write!(f, "expected '{}' at {:?}", c, excerpt(input))
            }
            Some((input, _)) if input.is_empty() => f.write_str("unexpected end of line"),
            Some((input, _)) => write!(f, "unexpected {:?}", excerpt(input)),
            None => f.write_str("invalid command"),
        }
    }
}

impl From<nom::Err<GreedyError<&str>>> for ScriptError {
    fn from(error: nom::Err<GreedyError<&str>>) -> Self {
        match error {
            nom::Err::Error(e) | nom::Err::Failure(e) => ScriptError::Syntax(e.to_string()),
            nom::Err::Incomplete(_) => ScriptError::Syntax("incomplete line".to_owned()),
        }
    }
}

fn excerpt(input: &str) -> String {
    input.chars().take(20).collect()
}

impl<I: InputLength> ParseError<I> for GreedyError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self::new(input, Reason::Nom(kind))
    }

    fn append(input: I, kind: ErrorKind, other: Self) -> Self {
        other.push(input, Reason::Nom(kind))
    }

    fn from_char(input: I, c: char) -> Self {
        Self::new(input, Reason::Char(c))
    }

    /// Of two failed alternatives the one with less input left explains the line best: it
    /// matched the keyword and broke inside the command body.
    fn or(self, other: Self) -> Self {
        if self.remaining() < other.remaining() {
            self
        } else {
            other
        }
    }
}

impl<I: InputLength> ContextError<I> for GreedyError<I> {
    fn add_context(input: I, ctx: &'static str, other: Self) -> Self {
        other.push(input, Reason::Context(ctx))
    }
}
