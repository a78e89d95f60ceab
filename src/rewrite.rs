//! Checking that one expression follows from another by a single rule application.
//!
//! A valid step rewrites exactly one subexpression with one rule, read either left to right or
//! right to left. Everything outside the rewritten subexpression has to stay as it was.

use crate::{
    error::StepError,
    expression::Expression,
    pattern::{instantiate_pattern, match_pattern, Bindings},
};
use log::debug;

/// The two sides of a rule, already parsed into patterns
#[derive(Debug, Clone, Copy)]
pub struct Rewrite<'a> {
    pub lhs: &'a Expression,
    pub rhs: &'a Expression,
}

impl<'a> Rewrite<'a> {
    pub fn new(lhs: &'a Expression, rhs: &'a Expression) -> Self {
        Rewrite { lhs, rhs }
    }

    /// The same rule read from right to left
    pub fn reversed(self) -> Self {
        Rewrite {
            lhs: self.rhs,
            rhs: self.lhs,
        }
    }

    /// Decides whether `to` is `from` with one subexpression rewritten by this rule in either
    /// direction.
    ///
    /// # Errors
    /// * NoRuleApplied - if `from` and `to` are equal
    /// * TooManyChanges - if `from` and `to` differ in more than one place
    /// * RuleDoesNotApply - if they differ in one place but the rule does not explain it
    pub fn apply(self, from: &Expression, to: &Expression) -> Result<(), StepError> {
        if from == to {
            return Err(StepError::NoRuleApplied);
        }
        if self.apply_in_direction(from, to).is_ok()
            || self.reversed().apply_in_direction(from, to).is_ok()
        {
            return Ok(());
        }
        match count_differences(from, to) {
            0 => Err(StepError::NoRuleApplied),
            1 => Err(StepError::RuleDoesNotApply),
            n => {
                debug!("{} places differ between {} and {}", n, from, to);
                Err(StepError::TooManyChanges)
            }
        }
    }

    /// Descends along the single path on which `from` and `to` differ and tries the rule at
    /// every node of that path.
    pub fn apply_in_direction(self, from: &Expression, to: &Expression) -> Result<(), StepError> {
        let mut bindings = Bindings::new();
        if match_pattern(self.lhs, from, &mut bindings)
            && instantiate_pattern(self.rhs, &bindings) == *to
        {
            debug!("rule applies at {}", from);
            return Ok(());
        }
        if from.root() != to.root() || from.children().len() != to.children().len() {
            return Err(StepError::RuleDoesNotApply);
        }
        let mut differing = from
            .children()
            .iter()
            .zip(to.children().iter())
            .filter(|(f, t)| f != t);
        match (differing.next(), differing.next()) {
            (None, _) => Err(StepError::NoRuleApplied),
            (Some((f, t)), None) => self.apply_in_direction(f, t),
            (Some(_), Some(_)) => Err(StepError::RuleDoesNotApply),
        }
    }
}

/// Checks the step `from` to `to` against the rule `lhs = rhs`
///
/// # Example
/// ```
/// use stepwise::{apply_pattern_rule, Expression};
/// use stepwise::error::StepError;
///
/// let x = Expression::leaf('x');
/// let a = Expression::leaf('A');
/// let lhs = Expression::binary('|', x.clone(), x.clone());
///
/// let aa = Expression::binary('|', a.clone(), a.clone());
/// assert_eq!(apply_pattern_rule(&aa, &a, &lhs, &x), Ok(()));
/// assert_eq!(apply_pattern_rule(&a, &aa, &lhs, &x), Ok(()));
/// assert_eq!(apply_pattern_rule(&a, &a, &lhs, &x), Err(StepError::NoRuleApplied));
/// ```
pub fn apply_pattern_rule(
    from: &Expression,
    to: &Expression,
    lhs: &Expression,
    rhs: &Expression,
) -> Result<(), StepError> {
    Rewrite::new(lhs, rhs).apply(from, to)
}

/// Counts the places in which two expressions differ. A place is a pair of subtrees whose roots
/// or number of children differ.
///
/// # Example
/// ```
/// use stepwise::{count_differences, Expression};
///
/// let ab = Expression::binary('&', Expression::leaf('A'), Expression::leaf('B'));
/// let cd = Expression::binary('&', Expression::leaf('C'), Expression::leaf('D'));
/// let or = Expression::binary('|', Expression::leaf('A'), Expression::leaf('B'));
/// assert_eq!(count_differences(&ab, &ab), 0);
/// assert_eq!(count_differences(&ab, &cd), 2);
/// assert_eq!(count_differences(&ab, &or), 1);
/// ```
pub fn count_differences(a: &Expression, b: &Expression) -> usize {
    if a == b {
        0
    } else if a.root() != b.root() || a.children().len() != b.children().len() {
        1
    } else {
        a.children()
            .iter()
            .zip(b.children().iter())
            .map(|(x, y)| count_differences(x, y))
            .sum()
    }
}
