use std::fmt;

use log::{debug, info};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_until},
    character::complete::{char, space0, space1},
    combinator::{all_consuming, cut, map, rest, verify},
    error::context,
    sequence::separated_pair,
    IResult,
};

use crate::{
    error::ScriptError,
    problem::Problem,
    proof::{Proof, ProofStep},
    registry::TheoryRegistry,
    rule::CustomLaw,
};

use super::error::GreedyError;

/// One line of a proof script
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    /// `theory <key>`
    Theory(String),
    /// `law <name>: <lhs> = <rhs>`
    Law(CustomLaw),
    /// `prove <lhs> = <rhs>`
    Prove(String, String),
    /// `step <rule>: <expression>`
    Step(String, String),
}

/// What running a command did, for reporting
///
/// Selecting a theory or starting a proof ends the running proof, which is handed back.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Outcome {
    TheorySelected(Option<Proof>),
    LawAdded,
    ProofStarted(Option<Proof>),
    StepAdded(ProofStep),
}

/// The state a script builds up while it is run
#[derive(Debug, Default)]
pub struct Session {
    theory: Option<String>,
    laws: Vec<CustomLaw>,
    proof: Option<Proof>,
    started: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theory(&self) -> Option<&str> {
        self.theory.as_deref()
    }

    pub fn proof(&self) -> Option<&Proof> {
        self.proof.as_ref()
    }

    pub fn finish(self) -> Option<Proof> {
        self.proof
    }

    /// Law names can be used in steps in place of the generated rule names
    fn resolve_rule(&self, rule: &str, problem: &Problem) -> String {
        self.laws
            .iter()
            .find(|law| law.name == rule)
            .map_or_else(|| rule.to_owned(), |law| law.rule_name(&problem.id()))
    }
}

impl Command {
    /// Parses one line. Blank lines and lines starting with `#` yield `None`.
    pub fn parse(input: &str) -> Result<Option<Self>, nom::Err<GreedyError<&str>>> {
        let line = input.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (_, command) = cut(all_consuming(alt((
            context("theory", Self::parse_theory),
            context("law", Self::parse_law),
            context("prove", Self::parse_prove),
            context("step", Self::parse_step),
        ))))(line)?;
        Ok(Some(command))
    }

    fn parse_theory(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tag("theory")(input)?;
        let (input, _) = space1(input)?;
        cut(map(take_till1(|c: char| c.is_whitespace()), |name: &str| {
            Command::Theory(name.to_owned())
        }))(input)
    }

    fn parse_law(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tag("law")(input)?;
        let (input, _) = space1(input)?;
        cut(Self::parse_law_body)(input)
    }

    fn parse_law_body(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, name) = verify(take_until(":"), |s: &str| !s.trim().is_empty())(input)?;
        let (input, _) = char(':')(input)?;
        let (input, (lhs, rhs)) = Self::parse_equation(input)?;
        Ok((input, Command::Law(CustomLaw::new(name.trim(), &lhs, &rhs))))
    }

    fn parse_prove(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tag("prove")(input)?;
        let (input, _) = space1(input)?;
        cut(map(Self::parse_equation, |(lhs, rhs)| Command::Prove(lhs, rhs)))(input)
    }

    fn parse_step(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tag("step")(input)?;
        let (input, _) = space1(input)?;
        cut(Self::parse_step_body)(input)
    }

    fn parse_step_body(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, rule) = take_till1(|c: char| c == ':' || c.is_whitespace())(input)?;
        let (input, _) = space0(input)?;
        let (input, _) = char(':')(input)?;
        let (input, expression) = verify(rest, |s: &str| !s.trim().is_empty())(input)?;
        Ok((
            input,
            Command::Step(rule.to_owned(), expression.trim().to_owned()),
        ))
    }

    /// `<lhs> = <rhs>`; `=` is never part of an expression
    fn parse_equation(input: &str) -> IResult<&str, (String, String), GreedyError<&str>> {
        map(
            separated_pair(
                verify(take_until("="), |s: &str| !s.trim().is_empty()),
                char('='),
                verify(rest, |s: &str| !s.trim().is_empty() && !s.contains('=')),
            ),
            |(lhs, rhs): (&str, &str)| (lhs.trim().to_owned(), rhs.trim().to_owned()),
        )(input)
    }

    /// Runs this command against `registry`, advancing `session`
    ///
    /// # Errors
    /// * NoTheory - if a law or a proof comes before any `theory` line
    /// * NoProof - if a step comes before any `prove` line
    /// * Registry - if the selected theory does not exist
    /// * Proof - if a step is rejected
    pub fn apply(
        self,
        registry: &mut TheoryRegistry,
        session: &mut Session,
    ) -> Result<Outcome, ScriptError> {
        match self {
            Command::Theory(name) => {
                let theory = registry.get_mut(&name)?;
                theory.clear_problem_context();
                info!("using theory {}", name);
                session.theory = Some(name);
                session.laws.clear();
                Ok(Outcome::TheorySelected(session.proof.take()))
            }
            Command::Law(law) => {
                if session.theory.is_none() {
                    return Err(ScriptError::NoTheory);
                }
                debug!("law {}: {} = {}", law.name, law.lhs, law.rhs);
                session.laws.push(law);
                Ok(Outcome::LawAdded)
            }
            Command::Prove(lhs, rhs) => {
                let name = session.theory.as_deref().ok_or(ScriptError::NoTheory)?;
                let theory = registry.get_mut(name)?;
                session.started += 1;
                let mut problem = Problem::new(0, session.started, name, &lhs, &rhs);
                problem.name = format!("{} = {}", lhs, rhs);
                problem.custom_laws = Some(session.laws.clone());
                theory.begin(&problem);
                Ok(Outcome::ProofStarted(
                    session.proof.replace(Proof::new(problem)),
                ))
            }
            Command::Step(rule, expression) => {
                let name = session.theory.as_deref().ok_or(ScriptError::NoTheory)?;
                let theory = registry.get(name)?;
                let proof = session.proof.as_ref().ok_or(ScriptError::NoProof)?;
                let rule = session.resolve_rule(&rule, proof.problem());
                let proof = session.proof.as_mut().ok_or(ScriptError::NoProof)?;
                let step = proof.add_step(theory, &expression, &rule)?;
                Ok(Outcome::StepAdded(step.clone()))
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Theory(name) => write!(f, "theory {}", name),
            Command::Law(law) => write!(f, "law {}: {} = {}", law.name, law.lhs, law.rhs),
            Command::Prove(lhs, rhs) => write!(f, "prove {} = {}", lhs, rhs),
            Command::Step(rule, expression) => write!(f, "step {}: {}", rule, expression),
        }
    }
}
