use crate::{expression::Expression, types::*};
use thiserror::Error;

/// An error which is produced when an expression string can not be turned into an [`Expression`]
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("Unexpected characters: {}", join_chars(.0))]
    UnexpectedCharacters(Vec<char>),
    #[error("Unmatched '('")]
    UnmatchedOpen,
    #[error("Unmatched ')'")]
    UnmatchedClose,
    #[error("Unable to parse expression")]
    Unparseable,
}

fn join_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// An error which is produced when a pattern does not match a concrete expression
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MatchError {
    #[error("expected `{0}` but found `{1}`")]
    OperatorMismatch(SymbolId, SymbolId),
    #[error("`{0}` expects {1} operands but found {2}")]
    ArityMismatch(SymbolId, usize, usize),
    #[error("variable `{0}` is bound to {1} but would also have to be {2}")]
    VariableMismatch(SymbolId, Expression, Expression),
}

/// An error which is produced when a proof step is not a single application of the chosen rule
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StepError {
    #[error("No rule has been applied")]
    NoRuleApplied,
    #[error("Too many changes have been made. Please only apply the rule in one place")]
    TooManyChanges,
    #[error("The chosen rule does not apply")]
    RuleDoesNotApply,
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
    #[error("Rule validation error: {0}")]
    Malformed(String),
}

/// An error which is produced when a symbol table violates its invariants
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TheoryError {
    #[error("symbol id `{0}` is used more than once")]
    DuplicateId(SymbolId),
    #[error("symbol text `{0}` is used more than once")]
    DuplicateText(String),
    #[error("symbol id `{0}` collides with a variable or a parenthesis")]
    ReservedId(SymbolId),
    #[error("symbol text `{0}` is empty or contains letters, parentheses or whitespace")]
    ReservedText(String),
    #[error("unsupported arity {0}")]
    InvalidArity(i8),
}

/// An error which is produced when filling or querying a [`TheoryRegistry`][crate::TheoryRegistry]
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RegistryError {
    #[error(transparent)]
    Theory(#[from] TheoryError),
    #[error("Theory '{0}' not found")]
    TheoryNotFound(String),
    #[error("Theory '{0}' is already registered")]
    NameCollision(String),
}

/// An error which is produced by a [`Proof`][crate::Proof] session
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ProofError {
    #[error("Please enter an expression")]
    EmptyExpression,
    #[error("Please select a rule")]
    NoRuleSelected,
    #[error("Error in previous: {0}")]
    Previous(ParseError),
    #[error("Error in expression: {0}")]
    Expression(ParseError),
    #[error("Rule '{0}' is not enabled for this problem")]
    RuleDisabled(String),
    #[error("There is no step {0}")]
    StepNotFound(usize),
    #[error(transparent)]
    Step(#[from] StepError),
}

/// An error which is produced while running a proof script
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScriptError {
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("No theory has been selected")]
    NoTheory,
    #[error("No proof has been started")]
    NoProof,
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Proof(#[from] ProofError),
}
