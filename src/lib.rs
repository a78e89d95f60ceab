//! `stepwise` checks equational proofs that are written one rewrite at a time. A proof starts at
//! the left hand side of an equation and every step names a law of the theory and the expression
//! it leads to. `stepwise` accepts the step only if exactly one subexpression was rewritten by
//! that law, read either from left to right or from right to left.
//!
//! # Main data structures
//!
//! ## Expressions
//! An [`Expression`] is a tree of symbol ids: leaves are variables (ASCII letters) or constants,
//! inner nodes are unary or binary operators. Inside the sides of a law lowercase letters are
//! pattern variables, so `x ∪ x = x` matches `A ∪ A` as well as `(B ∩ C) ∪ (B ∩ C)`.
//!
//! ## Theories
//! A [`Theory`] bundles a [`SymbolTable`], its own [`Parser`] and the laws of the theory. Three
//! theories are shipped in [`theories`]: set theory, boolean algebra and propositional logic.
//! Every theory owns its parser, so working in one theory never changes how another one parses.
//!
//! Problems may bring their own laws. A theory holds the laws of at most one problem at a time;
//! loading the laws of another problem replaces them.
//!
//! ## Proofs
//! A [`Proof`] records validated steps for a [`Problem`] and can be exported for formatting.
//! With the `serialization` feature problems can be read from JSON and proofs can be written as
//! line based scripts, see [`serialization`].
//!
//! # Example
//! ```
//! use stepwise::{theories, Theory};
//!
//! let theory = Theory::new(theories::set_theory()).unwrap();
//! let from = theory.parse("(A ∪ A) ∩ B").unwrap();
//! let to = theory.parse("A ∩ B").unwrap();
//! assert!(theory.validate_step(&from, &to, "idem1").success());
//! ```

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod error;
pub mod expression;
pub mod parser;
pub mod pattern;
mod problem;
mod proof;
mod registry;
pub mod rewrite;
mod rule;
#[cfg(feature = "serialization")]
pub mod serialization;
pub mod symbol;
pub mod theories;
mod theory;
mod types;

pub use expression::Expression;
pub use parser::{Parser, Rank};
pub use pattern::{instantiate_pattern, match_pattern, Bindings, Substitution};
pub use problem::*;
pub use proof::*;
pub use registry::*;
pub use rewrite::{apply_pattern_rule, count_differences};
pub use rule::*;
pub use symbol::{Arity, Equality, Form, Symbol, SymbolTable};
pub use theory::*;
pub use types::*;
