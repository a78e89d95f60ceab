use crate::{error::MatchError, expression::Expression, types::*};
use std::collections::BTreeMap;

/// Tests whether the given node is a pattern variable, i.e. a leaf named by a lowercase letter
pub fn is_pattern_variable(node: &Expression) -> bool {
    node.is_leaf() && node.root().is_ascii_lowercase()
}

/// A `Substitution` maps pattern variables to expressions.
///
/// This is intented to be used together with [`Expression::substitute`].
pub trait Substitution {
    /// Get the stored substitution for the pattern variable `var`. Or `None` if the variable
    /// should not be replaced.
    fn substitution_opt(&self, var: SymbolId) -> Option<&Expression>;
}

/// The bindings collected while matching a pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    bound: BTreeMap<SymbolId, Expression>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: SymbolId) -> Option<&Expression> {
        self.bound.get(&var)
    }

    /// Marks `var` to be substituted by `expr`, returning the previous binding
    pub fn insert(&mut self, var: SymbolId, expr: Expression) -> Option<Expression> {
        self.bound.insert(var, expr)
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Expression)> {
        self.bound.iter().map(|(v, e)| (*v, e))
    }
}

impl Substitution for Bindings {
    fn substitution_opt(&self, var: SymbolId) -> Option<&Expression> {
        self.get(var)
    }
}

impl Expression {
    /// Extends `bindings` so that `pattern.substitute(bindings) == *self`.
    ///
    /// The first occurence of a pattern variable binds it to a copy of the matched subtree,
    /// later occurences have to match that binding exactly. Matching is positional: `x ∪ y`
    /// against `B ∪ A` binds `x` to `B` and never tries the swapped pairing. On failure
    /// `bindings` may hold the partial result.
    ///
    /// # Errors
    /// * OperatorMismatch - if a non-variable node of `pattern` has a different root
    /// * ArityMismatch - if a non-variable node of `pattern` has a different number of children
    /// * VariableMismatch - if a pattern variable would have to be bound to two different
    /// expressions
    ///
    /// # Example
    /// ```
    /// use stepwise::{Bindings, Expression};
    /// use stepwise::error::MatchError;
    ///
    /// let (a, b) = (Expression::leaf('A'), Expression::leaf('B'));
    /// let x = Expression::leaf('x');
    /// let pattern = Expression::binary('|', x.clone(), x.clone());
    ///
    /// let mut bindings = Bindings::new();
    /// assert_eq!(Expression::binary('|', a.clone(), a.clone()).unify(&pattern, &mut bindings), Ok(()));
    /// assert_eq!(bindings.get('x'), Some(&a));
    ///
    /// let mut bindings = Bindings::new();
    /// assert_eq!(
    ///     Expression::binary('|', a.clone(), b.clone()).unify(&pattern, &mut bindings),
    ///     Err(MatchError::VariableMismatch('x', a.clone(), b.clone()))
    /// );
    /// ```
    pub fn unify(&self, pattern: &Expression, bindings: &mut Bindings) -> Result<(), MatchError> {
        if is_pattern_variable(pattern) {
            let var = pattern.root();
            return match bindings.get(var) {
                Some(old) if old == self => Ok(()),
                Some(old) => Err(MatchError::VariableMismatch(var, old.clone(), self.clone())),
                None => {
                    bindings.insert(var, self.clone());
                    Ok(())
                }
            };
        }
        if pattern.root() != self.root() {
            return Err(MatchError::OperatorMismatch(pattern.root(), self.root()));
        }
        if pattern.children().len() != self.children().len() {
            return Err(MatchError::ArityMismatch(
                pattern.root(),
                pattern.children().len(),
                self.children().len(),
            ));
        }
        for (p, c) in pattern.children().iter().zip(self.children().iter()) {
            c.unify(p, bindings)?;
        }
        Ok(())
    }

    /// Use the given substitution on this pattern to create a new expression. Pattern variables
    /// without a substitution are kept as they are.
    ///
    /// # Example
    /// ```
    /// use stepwise::{Bindings, Expression};
    ///
    /// let mut bindings = Bindings::new();
    /// bindings.insert('x', Expression::leaf('A'));
    /// let pattern = Expression::binary('&', Expression::leaf('x'), Expression::leaf('y'));
    /// assert_eq!(
    ///     pattern.substitute(&bindings),
    ///     Expression::binary('&', Expression::leaf('A'), Expression::leaf('y'))
    /// );
    /// ```
    pub fn substitute<S: Substitution>(&self, substitution: &S) -> Expression {
        if is_pattern_variable(self) {
            if let Some(e) = substitution.substitution_opt(self.root()) {
                return e.clone();
            }
        }
        Expression::new(
            self.root(),
            self.children()
                .iter()
                .map(|c| c.substitute(substitution))
                .collect(),
        )
    }
}

/// Matches `pattern` against `concrete`, collecting the bindings of its pattern variables
pub fn match_pattern(pattern: &Expression, concrete: &Expression, bindings: &mut Bindings) -> bool {
    concrete.unify(pattern, bindings).is_ok()
}

/// Replaces the bound pattern variables of `pattern`
pub fn instantiate_pattern(pattern: &Expression, bindings: &Bindings) -> Expression {
    pattern.substitute(bindings)
}
