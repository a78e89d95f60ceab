use crate::{
    error::{ParseError, StepError},
    expression::Expression,
    parser::Parser,
    rewrite::Rewrite,
    types::*,
};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

pub const BASIC: Level = 0;
pub const DEFINITION: Level = 1;
pub const DERIVED: Level = 2;
pub const CUSTOM: Level = 99;

/// A named law `lhs = rhs` of a theory. Lowercase letters in `lhs` and `rhs` are pattern
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RuleDefinition {
    pub name: String,
    pub text: String,
    #[cfg_attr(feature = "serialization", serde(rename = "LHS"))]
    pub lhs: String,
    #[cfg_attr(feature = "serialization", serde(rename = "RHS"))]
    pub rhs: String,
    pub level: Level,
}

/// The groups rules are listed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleCategory {
    Basic,
    Definitions,
    Derived,
    ProblemSpecific,
}

impl RuleDefinition {
    pub fn new(name: &str, text: &str, lhs: &str, rhs: &str, level: Level) -> Self {
        RuleDefinition {
            name: name.to_owned(),
            text: text.to_owned(),
            lhs: lhs.to_owned(),
            rhs: rhs.to_owned(),
            level,
        }
    }

    pub fn category(&self) -> RuleCategory {
        match self.level {
            BASIC => RuleCategory::Basic,
            DEFINITION => RuleCategory::Definitions,
            CUSTOM => RuleCategory::ProblemSpecific,
            _ => RuleCategory::Derived,
        }
    }
}

/// A problem specific law as it appears in problem data. Both `lhs` and `LHS` (and `rhs` and
/// `RHS`) are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CustomLaw {
    pub name: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub text: Option<String>,
    #[cfg_attr(feature = "serialization", serde(alias = "LHS"))]
    pub lhs: String,
    #[cfg_attr(feature = "serialization", serde(alias = "RHS"))]
    pub rhs: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub theory: Option<String>,
}

impl CustomLaw {
    pub fn new(name: &str, lhs: &str, rhs: &str) -> Self {
        CustomLaw {
            name: name.to_owned(),
            text: None,
            lhs: lhs.to_owned(),
            rhs: rhs.to_owned(),
            theory: None,
        }
    }

    /// The name the compiled law is registered under while `problem` is active, e.g.
    /// `custom_3.2_absorption_law`
    pub fn rule_name(&self, problem: &str) -> String {
        let name = self
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        format!("custom_{}_{}", problem, name)
    }

    /// The definition this law is listed with while `problem` is active
    pub fn definition(&self, problem: &str) -> RuleDefinition {
        let text = if self.name.is_empty() {
            self.text.clone().unwrap_or_default()
        } else {
            self.name.clone()
        };
        RuleDefinition {
            name: self.rule_name(problem),
            text,
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            level: CUSTOM,
        }
    }

    /// Laws without a theory apply to every theory
    pub fn applies_to(&self, theory: &str) -> bool {
        self.theory.as_deref().map_or(true, |t| t == theory)
    }
}

/// Where a compiled rule comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOrigin {
    BuiltIn,
    Problem(String),
}

/// A rule whose sides have been parsed into patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub definition: RuleDefinition,
    pub lhs: Expression,
    pub rhs: Expression,
    pub origin: RuleOrigin,
}

impl CompiledRule {
    /// Parses both sides of `definition`, failing with the error of the first side that does
    /// not parse
    pub fn compile(
        parser: &Parser,
        definition: RuleDefinition,
        origin: RuleOrigin,
    ) -> Result<Self, ParseError> {
        let lhs = parser.parse(&definition.lhs)?;
        let rhs = parser.parse(&definition.rhs)?;
        Ok(CompiledRule {
            definition,
            lhs,
            rhs,
            origin,
        })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn is_custom(&self) -> bool {
        self.origin != RuleOrigin::BuiltIn
    }

    pub fn problem(&self) -> Option<&str> {
        match &self.origin {
            RuleOrigin::BuiltIn => None,
            RuleOrigin::Problem(id) => Some(id),
        }
    }

    pub fn rewrite(&self) -> Rewrite<'_> {
        Rewrite::new(&self.lhs, &self.rhs)
    }

    /// Checks that `to` follows from `from` by one application of this rule
    pub fn check(&self, from: &Expression, to: &Expression) -> Result<(), StepError> {
        self.rewrite().apply(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_names() {
        let law = CustomLaw::new("Absorption  of\tUnion", "(A ∪ B) ∩ A", "A");
        assert_eq!(law.rule_name("3.2"), "custom_3.2_absorption_of_union");
        let definition = law.definition("3.2");
        assert_eq!(definition.level, CUSTOM);
        assert_eq!(definition.text, "Absorption  of\tUnion");
        assert_eq!(definition.category(), RuleCategory::ProblemSpecific);
    }

    #[test]
    fn categories() {
        assert_eq!(
            RuleDefinition::new("a", "a", "x", "x", BASIC).category(),
            RuleCategory::Basic
        );
        assert_eq!(
            RuleDefinition::new("a", "a", "x", "x", DEFINITION).category(),
            RuleCategory::Definitions
        );
        assert_eq!(
            RuleDefinition::new("a", "a", "x", "x", 7).category(),
            RuleCategory::Derived
        );
    }

    #[test]
    fn compile_reports_the_failing_side() {
        let parser = Parser::new(crate::theories::set_theory().symbol_table().unwrap());
        let origin = || RuleOrigin::Problem("1.1".to_owned());
        let rule = |lhs, rhs| RuleDefinition::new("r", "r", lhs, rhs, CUSTOM);

        let compiled = CompiledRule::compile(&parser, rule("x ∪ x", "x"), origin()).unwrap();
        assert_eq!(compiled.problem(), Some("1.1"));
        assert_eq!(
            CompiledRule::compile(&parser, rule("(x ∪ x", "x"), origin()),
            Err(ParseError::UnmatchedOpen)
        );
        assert_eq!(
            CompiledRule::compile(&parser, rule("x", "x ∪"), origin()),
            Err(ParseError::Unparseable)
        );
    }

    #[test]
    fn theory_filter() {
        let mut law = CustomLaw::new("l", "A", "A");
        assert!(law.applies_to("bool_alg"));
        law.theory = Some("set_theory".to_owned());
        assert!(law.applies_to("set_theory"));
        assert!(!law.applies_to("bool_alg"));
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn custom_law_keys() {
        let lower: CustomLaw =
            serde_json::from_str(r#"{"name": "Absorption", "lhs": "(A ∪ B) ∩ A", "rhs": "A"}"#)
                .unwrap();
        let upper: CustomLaw = serde_json::from_str(
            r#"{"name": "Absorption", "LHS": "(A ∪ B) ∩ A", "RHS": "A", "theory": "set_theory"}"#,
        )
        .unwrap();
        assert_eq!(lower.lhs, upper.lhs);
        assert_eq!(lower.rhs, upper.rhs);
        assert_eq!(upper.theory.as_deref(), Some("set_theory"));
    }
}
