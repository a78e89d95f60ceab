//! Turning expression strings into [`Expression`]s and back.
//!
//! Parsing happens in three passes over the input with all whitespace removed and a outer pair
//! of parentheses added:
//!
//! 1. lexing translates the surface tokens of the theory (`∪`, `¬`, ...) into the internal ids
//!    of their symbols, collecting every character that is neither a token, a letter nor a
//!    parenthesis,
//! 2. the parentheses are checked to be balanced,
//! 3. a recursive descent builds the tree.
//!
//! The grammar does not know about precedence. Unary operators bind tighter than binary ones, but
//! two binary operators on the same level of parentheses are always rejected, so `A ∩ B ∪ C` and
//! even `A ∩ B ∩ C` have to be written with explicit parentheses.

use crate::{
    error::ParseError,
    expression::{is_variable, Expression},
    symbol::{Arity, Form, SymbolTable},
    types::*,
};
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{anychar, satisfy},
    combinator::{all_consuming, map},
    error::Error,
    multi::many0,
    IResult,
};

/// How tightly a rendered expression is bound, reported by [`Parser::unparse`] so that callers
/// know whether it needs parentheses when embedded into a larger expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Atom = 0,
    Unary = 1,
    Binary = 2,
}

enum Lexeme {
    Token(SymbolId),
    Unexpected(char),
}

/// A parser for the expressions of one theory.
///
/// Every theory owns its parser; parsers share no state, so parsing in one theory can never be
/// affected by another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parser {
    table: SymbolTable,
}

impl Parser {
    pub fn new(table: SymbolTable) -> Self {
        Parser { table }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }

    /// Parses a expression written with the surface tokens of this parser's theory.
    ///
    /// # Errors
    /// * UnexpectedCharacters - if the input contains characters that are not part of a token,
    /// a letter or a parenthesis
    /// * UnmatchedOpen, UnmatchedClose - if the parentheses are not balanced
    /// * Unparseable - if the input does not form a expression
    ///
    /// # Example
    /// ```
    /// use stepwise::{theories, Theory};
    /// use stepwise::error::ParseError;
    ///
    /// let theory = Theory::new(theories::set_theory()).unwrap();
    /// let parser = theory.parser();
    /// assert_eq!(parser.parse("A ∪ Bᶜ").unwrap().to_string(), "(A | !(B))");
    /// assert_eq!(parser.parse("A ∩ (B"), Err(ParseError::UnmatchedOpen));
    /// assert_eq!(parser.parse("A ∩ B ∪ C"), Err(ParseError::Unparseable));
    /// ```
    pub fn parse(&self, input: &str) -> Result<Expression, ParseError> {
        let ids = self.lex(input)?;
        check_parens(&ids)?;
        let expression = self.parse_primary(&ids).ok_or(ParseError::Unparseable)?;
        debug!("parsed {:?} as {}", input, expression);
        Ok(expression)
    }

    /// Strips whitespace, wraps the input in parentheses and translates tokens to ids
    fn lex(&self, input: &str) -> Result<Vec<SymbolId>, ParseError> {
        let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let (_, lexemes) = all_consuming(many0(alt((
            map(|i| self.token(i), Lexeme::Token),
            map(anychar, Lexeme::Unexpected),
        ))))(stripped.as_str())
        .map_err(|_: nom::Err<Error<&str>>| ParseError::Unparseable)?;

        let mut ids = Vec::with_capacity(lexemes.len() + 2);
        let mut unexpected = Vec::new();
        ids.push('(');
        for lexeme in lexemes {
            match lexeme {
                Lexeme::Token(id) => ids.push(id),
                Lexeme::Unexpected(c) => unexpected.push(c),
            }
        }
        ids.push(')');
        if unexpected.is_empty() {
            Ok(ids)
        } else {
            Err(ParseError::UnexpectedCharacters(unexpected))
        }
    }

    fn token<'a>(&self, input: &'a str) -> IResult<&'a str, SymbolId> {
        for symbol in self.table.symbols() {
            let parsed: IResult<&str, &str> = tag(symbol.text.as_str())(input);
            if let Ok((rest, _)) = parsed {
                return Ok((rest, symbol.id));
            }
        }
        satisfy(|c| is_variable(c) || c == '(' || c == ')')(input)
    }

    /// Leaves, unary applications and parenthesized expressions
    fn parse_primary(&self, s: &[SymbolId]) -> Option<Expression> {
        match s {
            [] => None,
            [c] if is_variable(*c) || self.table.is_constant(*c) => Some(Expression::leaf(*c)),
            [_] => None,
            [first, .., last] => {
                for op in self.table.unary_operators() {
                    let operand = match op.arity {
                        Arity::Prefix if *first == op.id => self.parse_primary(&s[1..]),
                        Arity::Postfix if *last == op.id => self.parse_primary(&s[..s.len() - 1]),
                        _ => None,
                    };
                    if let Some(operand) = operand {
                        return Some(Expression::unary(op.id, operand));
                    }
                }
                if *first == '(' && *last == ')' && encloses(s) {
                    self.parse_expression(&s[1..s.len() - 1])
                } else {
                    None
                }
            }
        }
    }

    /// A primary expression or exactly one binary operator between two primary expressions
    fn parse_expression(&self, s: &[SymbolId]) -> Option<Expression> {
        if let Some(expression) = self.parse_primary(s) {
            return Some(expression);
        }
        let mut depth = 0i32;
        let mut split = None;
        for (i, &c) in s.iter().enumerate() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                c if depth == 0 && self.table.is_binary(c) => {
                    if split.is_some() {
                        return None;
                    }
                    split = Some(i);
                }
                _ => {}
            }
        }
        let i = split?;
        let left = self.parse_primary(&s[..i])?;
        let right = self.parse_primary(&s[i + 1..])?;
        Some(Expression::binary(s[i], left, right))
    }

    /// Renders a expression for the given target. Binary operands of unary or binary operators
    /// are always parenthesized, nothing else is.
    ///
    /// # Example
    /// ```
    /// use stepwise::{theories, Form, Theory};
    ///
    /// let theory = Theory::new(theories::set_theory()).unwrap();
    /// let parser = theory.parser();
    /// let e = parser.parse("((A∪B)ᶜ) ∩ ∅").unwrap();
    /// assert_eq!(parser.unparse(&e, Form::Text).0, "(A ∪ B)ᶜ ∩ ∅");
    /// assert_eq!(parser.unparse(&e, Form::Latex).0, "(A \\cup B)^{c} \\cap \\emptyset");
    /// ```
    pub fn unparse(&self, expression: &Expression, form: Form) -> (String, Rank) {
        let root = expression.root();
        match expression.children() {
            [] => (self.render_symbol(root, form), Rank::Atom),
            [operand] => {
                let operand = parenthesize(self.unparse(operand, form));
                let op = self.render_symbol(root, form);
                let text = if self.table.arity(root) == Some(Arity::Postfix) {
                    operand + &op
                } else if form == Form::Latex && ends_with_command(&op) && starts_alphabetic(&operand) {
                    format!("{} {}", op, operand)
                } else {
                    op + &operand
                };
                (text, Rank::Unary)
            }
            [left, right] => {
                let left = parenthesize(self.unparse(left, form));
                let right = parenthesize(self.unparse(right, form));
                (
                    format!("{} {} {}", left, self.render_symbol(root, form), right),
                    Rank::Binary,
                )
            }
            _ => (expression.to_string(), Rank::Atom),
        }
    }

    fn render_symbol(&self, id: SymbolId, form: Form) -> String {
        if is_variable(id) {
            return id.to_string();
        }
        match self.table.by_id(id) {
            Some(symbol) => symbol.form(form).to_owned(),
            None => id.to_string(),
        }
    }
}

fn parenthesize((text, rank): (String, Rank)) -> String {
    if rank == Rank::Binary {
        format!("({})", text)
    } else {
        text
    }
}

/// `\neg` followed by `p` has to be separated to stay a valid command
fn ends_with_command(op: &str) -> bool {
    op.starts_with('\\') && op.chars().last().map_or(false, |c| c.is_ascii_alphabetic())
}

fn starts_alphabetic(s: &str) -> bool {
    s.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
}

/// Tests whether the first parenthesis of `s` is closed by its last one
fn encloses(s: &[SymbolId]) -> bool {
    let mut depth = 0i32;
    for (i, &c) in s.iter().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return i == s.len() - 1;
        }
    }
    false
}

fn check_parens(ids: &[SymbolId]) -> Result<(), ParseError> {
    let mut depth = 0i32;
    for &c in ids {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(ParseError::UnmatchedClose);
        }
    }
    if depth > 0 {
        Err(ParseError::UnmatchedOpen)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{theories, Theory};
    use quickcheck::{Arbitrary, Gen};

    fn set_theory() -> Parser {
        Theory::new(theories::set_theory()).unwrap().parser().clone()
    }

    fn prop_logic() -> Parser {
        Theory::new(theories::propositional_logic())
            .unwrap()
            .parser()
            .clone()
    }

    fn bool_alg() -> Parser {
        Theory::new(theories::boolean_algebra())
            .unwrap()
            .parser()
            .clone()
    }

    fn text(parser: &Parser, e: &Expression) -> String {
        parser.unparse(e, Form::Text).0
    }

    /// A random expression over the propositional logic signature, where negation is prefix
    #[derive(Clone, Debug)]
    struct Formula(Expression);

    fn into_logic(e: Expression) -> Expression {
        let root = match e.root() {
            '-' => '>',
            '+' => '~',
            c => c,
        };
        let mut children = e.children().iter().cloned().map(into_logic);
        match (children.next(), children.next()) {
            (None, _) => Expression::leaf(root),
            (Some(operand), None) => Expression::unary(root, operand),
            (Some(left), Some(right)) => Expression::binary(root, left, right),
        }
    }

    impl Arbitrary for Formula {
        fn arbitrary(g: &mut Gen) -> Self {
            Formula(into_logic(Expression::arbitrary(g)))
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            Box::new(self.0.shrink().map(into_logic).map(Formula))
        }
    }

    quickcheck! {
        fn unparse_then_parse(e: Expression) -> bool {
            let parser = set_theory();
            parser.parse(&text(&parser, &e)) == Ok(e)
        }

        fn unparse_then_parse_prefix(f: Formula) -> bool {
            let parser = prop_logic();
            parser.parse(&text(&parser, &f.0)) == Ok(f.0)
        }
    }

    #[test]
    fn leaves() {
        let parser = set_theory();
        assert_eq!(parser.parse("A"), Ok(Expression::leaf('A')));
        assert_eq!(parser.parse(" ∅ "), Ok(Expression::leaf('0')));
        assert_eq!(parser.parse("((x))"), Ok(Expression::leaf('x')));
    }

    #[test]
    fn binary() {
        let parser = set_theory();
        assert_eq!(
            parser.parse("A∪A"),
            Ok(Expression::binary(
                '|',
                Expression::leaf('A'),
                Expression::leaf('A')
            ))
        );
        assert_eq!(
            parser.parse("(A ∪ B) \\ (A ∩ B)").unwrap().to_string(),
            "((A | B) - (A & B))"
        );
    }

    #[test]
    fn unary_binds_tighter() {
        let parser = prop_logic();
        assert_eq!(parser.parse("¬p ∧ q").unwrap().to_string(), "(!(p) & q)");
        assert_eq!(parser.parse("¬(p ∧ q)").unwrap().to_string(), "!((p & q))");
        assert_eq!(parser.parse("¬¬p").unwrap().to_string(), "!(!(p))");
        let parser = set_theory();
        assert_eq!(parser.parse("A ∪ Bᶜ").unwrap().to_string(), "(A | !(B))");
        assert_eq!(parser.parse("Aᶜᶜ").unwrap().to_string(), "!(!(A))");
    }

    #[test]
    fn ambiguous_operators() {
        let parser = set_theory();
        assert_eq!(parser.parse("A ∩ B ∪ C"), Err(ParseError::Unparseable));
        assert_eq!(parser.parse("A ∩ B ∩ C"), Err(ParseError::Unparseable));
        assert!(parser.parse("(A ∩ B) ∪ C").is_ok());
    }

    #[test]
    fn malformed() {
        let parser = set_theory();
        assert_eq!(parser.parse(""), Err(ParseError::Unparseable));
        assert_eq!(parser.parse("AB"), Err(ParseError::Unparseable));
        assert_eq!(parser.parse("A ∪"), Err(ParseError::Unparseable));
        assert_eq!(parser.parse("∪ A"), Err(ParseError::Unparseable));
        assert_eq!(parser.parse("()"), Err(ParseError::Unparseable));
        assert_eq!(parser.parse("ᶜA"), Err(ParseError::Unparseable));
    }

    #[test]
    fn parentheses() {
        let parser = set_theory();
        assert_eq!(parser.parse("A ∩ (B"), Err(ParseError::UnmatchedOpen));
        assert_eq!(parser.parse("A) ∩ B"), Err(ParseError::UnmatchedClose));
        assert_eq!(parser.parse("A))"), Err(ParseError::UnmatchedClose));
        // the outer parentheses added while lexing pair these up
        assert_eq!(parser.parse(")A("), Err(ParseError::Unparseable));
        let e = parser.parse("(A ∪ B) ∩ (C)").unwrap();
        assert_eq!(e.to_string(), "((A | B) & C)");
    }

    #[test]
    fn unexpected_characters() {
        let parser = set_theory();
        assert_eq!(
            parser.parse("A$B"),
            Err(ParseError::UnexpectedCharacters(vec!['$']))
        );
        assert_eq!(
            parser.parse("A$B").unwrap_err().to_string(),
            "Unexpected characters: $"
        );
        // ids are not tokens
        assert_eq!(
            parser.parse("A | B"),
            Err(ParseError::UnexpectedCharacters(vec!['|']))
        );
        assert_eq!(
            parser.parse("0 ∧ 1"),
            Err(ParseError::UnexpectedCharacters(vec!['0', '∧', '1']))
        );
    }

    #[test]
    fn theories_are_independent() {
        let set = set_theory();
        let logic = prop_logic();
        assert!(logic.parse("p ∧ ¬q").is_ok());
        assert!(set.parse("p ∧ ¬q").is_err());
        assert!(set.parse("A ∩ Bᶜ").is_ok());
        assert!(logic.parse("A ∩ Bᶜ").is_err());
    }

    #[test]
    fn boolean_complement_is_postfix() {
        let parser = bool_alg();
        let e = parser.parse("(x ∨ y)' ∧ 1").unwrap();
        assert_eq!(e.to_string(), "(!((x | y)) & 1)");
        assert_eq!(text(&parser, &e), "(x ∨ y)' ∧ 1");
    }

    #[test]
    fn unparse_forms() {
        let parser = set_theory();
        let e = parser.parse("Aᶜ ∪ 𝓤").unwrap();
        assert_eq!(parser.unparse(&e, Form::Text), ("Aᶜ ∪ 𝓤".to_owned(), Rank::Binary));
        assert_eq!(parser.unparse(&e, Form::Display).0, "A∁ ∪ 𝓤");
        assert_eq!(parser.unparse(&e, Form::Latex).0, "A^{c} \\cup \\mathcal{U}");
        assert_eq!(
            parser.unparse(&Expression::leaf('B'), Form::Latex),
            ("B".to_owned(), Rank::Atom)
        );

        let parser = prop_logic();
        let e = parser.parse("¬(p → q) ↔ ¬⊥").unwrap();
        assert_eq!(text(&parser, &e), "¬(p → q) ↔ ¬⊥");
        assert_eq!(
            parser.unparse(&e, Form::Latex).0,
            "\\neg(p \\rightarrow q) \\leftrightarrow \\neg\\bot"
        );
        assert_eq!(parser.unparse(&parser.parse("¬p").unwrap(), Form::Latex).0, "\\neg p");
        assert_eq!(
            parser.unparse(&parser.parse("¬p").unwrap(), Form::Text),
            ("¬p".to_owned(), Rank::Unary)
        );
    }

    #[test]
    fn nested_binary_is_parenthesized() {
        let parser = set_theory();
        let e = parser.parse("((A ∪ B) ∩ C) \\ ((D))").unwrap();
        assert_eq!(text(&parser, &e), "((A ∪ B) ∩ C) \\ D");
    }
}
