use crate::{error::TheoryError, types::*};
use std::collections::HashSet;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// The role a symbol plays in an expression, encoded in theory tables as `0` (constant), `1`
/// (prefix unary), `-1` (postfix unary) or `2` (infix binary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(Serialize, Deserialize),
    serde(try_from = "i8", into = "i8")
)]
pub enum Arity {
    Constant,
    Prefix,
    Postfix,
    Binary,
}

impl Arity {
    /// The number of operands a symbol of this arity is applied to
    pub fn operands(self) -> usize {
        match self {
            Arity::Constant => 0,
            Arity::Prefix | Arity::Postfix => 1,
            Arity::Binary => 2,
        }
    }

    pub fn is_unary(self) -> bool {
        self.operands() == 1
    }
}

impl TryFrom<i8> for Arity {
    type Error = TheoryError;

    fn try_from(arity: i8) -> Result<Self, TheoryError> {
        match arity {
            0 => Ok(Arity::Constant),
            1 => Ok(Arity::Prefix),
            -1 => Ok(Arity::Postfix),
            2 => Ok(Arity::Binary),
            a => Err(TheoryError::InvalidArity(a)),
        }
    }
}

impl From<Arity> for i8 {
    fn from(arity: Arity) -> i8 {
        match arity {
            Arity::Constant => 0,
            Arity::Prefix => 1,
            Arity::Postfix => -1,
            Arity::Binary => 2,
        }
    }
}

/// The surface a expression is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// What the user types; parseable again
    Text,
    Display,
    Markdown,
    Latex,
}

/// A operator or constant of a theory
///
/// `text` is the token the parser recognizes, the other forms are only used for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub display: String,
    pub text: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub markdown: Option<String>,
    pub latex: String,
    pub arity: Arity,
}

impl Symbol {
    /// Creates a symbol whose display, markdown and latex forms all equal `text`
    pub fn new(id: SymbolId, name: &str, text: &str, arity: Arity) -> Self {
        Symbol {
            id,
            name: name.to_owned(),
            display: text.to_owned(),
            text: text.to_owned(),
            markdown: None,
            latex: text.to_owned(),
            arity,
        }
    }

    pub fn with_display(mut self, display: &str) -> Self {
        self.display = display.to_owned();
        self
    }

    pub fn with_markdown(mut self, markdown: &str) -> Self {
        self.markdown = Some(markdown.to_owned());
        self
    }

    pub fn with_latex(mut self, latex: &str) -> Self {
        self.latex = latex.to_owned();
        self
    }

    pub fn form(&self, form: Form) -> &str {
        match form {
            Form::Text => &self.text,
            Form::Display => &self.display,
            Form::Markdown => self.markdown.as_deref().unwrap_or(&self.text),
            Form::Latex => &self.latex,
        }
    }
}

/// The rendering of the equality sign of a theory
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Equality {
    pub display: String,
    pub markdown: String,
    pub latex: String,
}

impl Equality {
    pub fn new(display: &str, latex: &str) -> Self {
        Equality {
            display: display.to_owned(),
            markdown: display.to_owned(),
            latex: latex.to_owned(),
        }
    }

    pub fn form(&self, form: Form) -> &str {
        match form {
            Form::Text | Form::Display => &self.display,
            Form::Markdown => &self.markdown,
            Form::Latex => &self.latex,
        }
    }
}

impl Default for Equality {
    fn default() -> Self {
        Equality::new("=", "=")
    }
}

/// The validated symbols of one theory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    equality: Equality,
}

fn is_reserved(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '(' || c == ')' || c.is_whitespace()
}

impl SymbolTable {
    /// Checks that ids are unique and disjoint from variables and parentheses and that surface
    /// texts are unique and can not be confused with variables.
    ///
    /// # Example
    /// ```
    /// use stepwise::symbol::{Arity, Equality, Symbol, SymbolTable};
    ///
    /// let table = SymbolTable::new(
    ///     vec![Symbol::new('|', "Union", "∪", Arity::Binary)],
    ///     Equality::default(),
    /// );
    /// assert!(table.is_ok());
    ///
    /// let table = SymbolTable::new(
    ///     vec![Symbol::new('|', "Or", "or", Arity::Binary)],
    ///     Equality::default(),
    /// );
    /// assert!(table.is_err());
    /// ```
    pub fn new(symbols: Vec<Symbol>, equality: Equality) -> Result<Self, TheoryError> {
        let mut ids = HashSet::new();
        let mut texts = HashSet::new();
        for symbol in symbols.iter() {
            if is_reserved(symbol.id) {
                return Err(TheoryError::ReservedId(symbol.id));
            }
            if symbol.text.is_empty() || symbol.text.chars().any(is_reserved) {
                return Err(TheoryError::ReservedText(symbol.text.clone()));
            }
            if !ids.insert(symbol.id) {
                return Err(TheoryError::DuplicateId(symbol.id));
            }
            if !texts.insert(symbol.text.as_str()) {
                return Err(TheoryError::DuplicateText(symbol.text.clone()));
            }
        }
        Ok(SymbolTable { symbols, equality })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn equality(&self) -> &Equality {
        &self.equality
    }

    pub fn by_id(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.id == id)
    }

    pub fn by_text(&self, text: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.text == text)
    }

    pub fn arity(&self, id: SymbolId) -> Option<Arity> {
        self.by_id(id).map(|s| s.arity)
    }

    pub fn constants<'a>(&'a self) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(|s| s.arity == Arity::Constant)
    }

    pub fn unary_operators<'a>(&'a self) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(|s| s.arity.is_unary())
    }

    pub fn binary_operators<'a>(&'a self) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.symbols.iter().filter(|s| s.arity == Arity::Binary)
    }

    pub fn is_constant(&self, id: SymbolId) -> bool {
        self.arity(id) == Some(Arity::Constant)
    }

    pub fn is_binary(&self, id: SymbolId) -> bool {
        self.arity(id) == Some(Arity::Binary)
    }
}
