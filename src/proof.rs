use crate::{
    error::{ProofError, StepError},
    problem::Problem,
    rule::RuleDefinition,
    theory::Theory,
};
use log::debug;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A validated expression together with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ProofStep {
    pub expression: String,
    pub rule: RuleDefinition,
}

/// A finished or unfinished proof as handed to formatters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ProofExport {
    pub title: String,
    pub description: String,
    pub lhs: String,
    pub rhs: String,
    pub expressions: Vec<String>,
    /// The display text of the rule of each step
    pub rules: Vec<String>,
    pub theory: String,
}

/// A proof of `problem.lhs = problem.rhs` built one step at a time.
///
/// Steps are only recorded after they have been validated against the theory, so every recorded
/// expression can be parsed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    problem: Problem,
    steps: Vec<ProofStep>,
}

impl Proof {
    pub fn new(problem: Problem) -> Self {
        Proof {
            problem,
            steps: Vec::new(),
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// The expression the next step starts from
    pub fn previous_expression(&self) -> &str {
        self.steps
            .last()
            .map_or(&self.problem.lhs, |step| &step.expression)
    }

    /// Validates `expression` as a consequence of the previous expression by `rule` and records
    /// it.
    ///
    /// # Errors
    /// * EmptyExpression - if `expression` is blank
    /// * NoRuleSelected - if `rule` is empty
    /// * Previous, Expression - if the previous or the new expression does not parse
    /// * RuleDisabled - if the problem does not allow `rule`
    /// * Step - if the theory rejects the step
    pub fn add_step(
        &mut self,
        theory: &Theory,
        expression: &str,
        rule: &str,
    ) -> Result<&ProofStep, ProofError> {
        let step = self.check(theory, self.previous_expression(), expression, rule)?;
        self.steps.push(step);
        Ok(&self.steps[self.steps.len() - 1])
    }

    /// Replaces step `index`, validated against the expression before it. All later steps are
    /// dropped.
    ///
    /// # Errors
    /// * StepNotFound - if there is no step `index`
    /// * everything [`add_step`](#method.add_step) reports
    pub fn edit_step(
        &mut self,
        theory: &Theory,
        index: usize,
        expression: &str,
        rule: &str,
    ) -> Result<&ProofStep, ProofError> {
        if index >= self.steps.len() {
            return Err(ProofError::StepNotFound(index));
        }
        let previous = match index {
            0 => &self.problem.lhs,
            i => &self.steps[i - 1].expression,
        };
        let step = self.check(theory, previous, expression, rule)?;
        self.steps.truncate(index);
        self.steps.push(step);
        Ok(&self.steps[index])
    }

    /// Removes step `index` and every step after it
    pub fn delete_step(&mut self, index: usize) -> Result<(), ProofError> {
        if index >= self.steps.len() {
            return Err(ProofError::StepNotFound(index));
        }
        self.steps.truncate(index);
        Ok(())
    }

    /// Tests whether the last step has arrived at the right hand side
    pub fn is_complete(&self, theory: &Theory) -> bool {
        let last = match self.steps.last() {
            Some(step) => &step.expression,
            None => return false,
        };
        match (theory.parse(last), theory.parse(&self.problem.rhs)) {
            (Ok(last), Ok(rhs)) => last == rhs,
            _ => false,
        }
    }

    pub fn export(&self, theory: &Theory) -> ProofExport {
        ProofExport {
            title: self.problem.name.clone(),
            description: self.problem.description.clone(),
            lhs: self.problem.lhs.clone(),
            rhs: self.problem.rhs.clone(),
            expressions: self.steps.iter().map(|s| s.expression.clone()).collect(),
            rules: self.steps.iter().map(|s| s.rule.text.clone()).collect(),
            theory: theory.name().to_owned(),
        }
    }

    fn check(
        &self,
        theory: &Theory,
        previous: &str,
        expression: &str,
        rule: &str,
    ) -> Result<ProofStep, ProofError> {
        let expression: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
        if expression.is_empty() {
            return Err(ProofError::EmptyExpression);
        }
        if rule.is_empty() {
            return Err(ProofError::NoRuleSelected);
        }
        let from = theory.parse(previous).map_err(ProofError::Previous)?;
        let to = theory.parse(&expression).map_err(ProofError::Expression)?;
        if let Some(definition) = theory.rule_definition(rule) {
            if !self.problem.allows(definition) {
                return Err(ProofError::RuleDisabled(rule.to_owned()));
            }
        }
        let report = theory.validate_step(&from, &to, rule);
        debug!("step {:?} by {}: {:?}", expression, rule, report.outcome);
        report.outcome?;
        let rule = report
            .rule
            .ok_or_else(|| StepError::UnknownRule(rule.to_owned()))?;
        Ok(ProofStep { expression, rule })
    }
}
