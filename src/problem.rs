use crate::rule::{CustomLaw, RuleCategory, RuleDefinition};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// An equation to be proven, as it appears in problem sets
///
/// `enabled_rules` takes precedence over `disabled_rules`; without either every rule of the
/// theory may be used. A problem that lists `custom_laws`, even none, becomes the active
/// problem of its theory when a proof of it begins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Problem {
    pub week: u32,
    pub number: u32,
    pub theory: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serialization", serde(rename = "LHS"))]
    pub lhs: String,
    #[cfg_attr(feature = "serialization", serde(rename = "RHS"))]
    pub rhs: String,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub hints: Vec<String>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub enabled_rules: Option<Vec<String>>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub disabled_rules: Option<Vec<String>>,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub custom_laws: Option<Vec<CustomLaw>>,
}

impl Problem {
    pub fn new(week: u32, number: u32, theory: &str, lhs: &str, rhs: &str) -> Self {
        Problem {
            week,
            number,
            theory: theory.to_owned(),
            lhs: lhs.to_owned(),
            rhs: rhs.to_owned(),
            ..Default::default()
        }
    }

    /// `<week>.<number>`, the key custom laws are registered under
    pub fn id(&self) -> String {
        format!("{}.{}", self.week, self.number)
    }

    /// Tests whether `rule` may be used in a proof of this problem.
    ///
    /// An enabled entry matches a rule by its full name or by the part before the first `_`, so
    /// `dem` enables both `dem_or` and `dem_and`. The problem's own laws are always allowed.
    ///
    /// # Example
    /// ```
    /// use stepwise::{Problem, RuleDefinition};
    ///
    /// let mut problem = Problem::new(3, 1, "prop_logic", "p", "p");
    /// problem.enabled_rules = Some(vec!["dem".to_owned(), "comm_or".to_owned()]);
    /// let rule = |name| RuleDefinition::new(name, "", "p", "p", 0);
    /// assert!(problem.allows(&rule("dem_or")));
    /// assert!(problem.allows(&rule("comm_or")));
    /// assert!(!problem.allows(&rule("comm_and")));
    /// ```
    pub fn allows(&self, rule: &RuleDefinition) -> bool {
        if rule.category() == RuleCategory::ProblemSpecific {
            return true;
        }
        if let Some(enabled) = &self.enabled_rules {
            let prefix = rule.name.split('_').next().unwrap_or_default();
            enabled.iter().any(|r| *r == rule.name || r == prefix)
        } else if let Some(disabled) = &self.disabled_rules {
            !disabled.iter().any(|r| *r == rule.name)
        } else {
            true
        }
    }
}

/// A collection of problems
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ProblemSet {
    pub problems: Vec<Problem>,
}

impl ProblemSet {
    /// Reads a `{ "problems": [...] }` document. Unknown keys are ignored.
    #[cfg(feature = "serialization")]
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Finds a problem by its [`id`](Problem::id)
    pub fn get(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id() == id)
    }

    /// The problems of `week`, ordered by number
    pub fn week(&self, week: u32) -> Vec<&Problem> {
        let mut problems: Vec<_> = self.problems.iter().filter(|p| p.week == week).collect();
        problems.sort_by_key(|p| p.number);
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{BASIC, CUSTOM};

    fn rule(name: &str) -> RuleDefinition {
        RuleDefinition::new(name, name, "x", "x", BASIC)
    }

    #[test]
    fn ids() {
        assert_eq!(Problem::new(3, 2, "set_theory", "A", "A").id(), "3.2");
    }

    #[test]
    fn rule_filters() {
        let mut problem = Problem::new(1, 1, "set_theory", "A", "A");
        assert!(problem.allows(&rule("idem1")));

        problem.disabled_rules = Some(vec!["idem1".to_owned()]);
        assert!(!problem.allows(&rule("idem1")));
        assert!(problem.allows(&rule("idem2")));

        // enabled rules win over disabled ones
        problem.enabled_rules = Some(vec!["idem1".to_owned(), "assoc".to_owned()]);
        assert!(problem.allows(&rule("idem1")));
        assert!(!problem.allows(&rule("idem2")));
        assert!(problem.allows(&rule("assoc_or")));
        assert!(!problem.allows(&rule("assoc1")));

        let custom = RuleDefinition::new("custom_1.1_law", "Law", "A", "A", CUSTOM);
        assert!(problem.allows(&custom));
    }

    #[test]
    fn lookups() {
        let set = ProblemSet {
            problems: vec![
                Problem::new(2, 3, "set_theory", "A", "A"),
                Problem::new(3, 1, "set_theory", "A", "A"),
                Problem::new(2, 1, "prop_logic", "p", "p"),
            ],
        };
        assert_eq!(set.get("3.1").map(|p| p.week), Some(3));
        assert!(set.get("3.2").is_none());
        let numbers: Vec<_> = set.week(2).iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn from_json() {
        let set = ProblemSet::from_json(
            r#"{
                "problems": [
                    {
                        "week": 3,
                        "number": 2,
                        "theory": "set_theory",
                        "name": "Showcase: Custom Laws",
                        "description": "We can now add custom laws.",
                        "LHS": "(A ∪ B) ∩ A",
                        "RHS": "A",
                        "enabledRules": ["idem1", "idem2"],
                        "customLaws": [
                            {
                                "name": "Absorption",
                                "text": "Absorption of ∩ over ∪",
                                "lhs": "(A ∪ B) ∩ A",
                                "rhs": "A",
                                "theory": "set_theory"
                            }
                        ]
                    },
                    {
                        "week": 2,
                        "number": 1,
                        "theory": "prop_logic",
                        "LHS": "p → q",
                        "RHS": "¬p ∨ q",
                        "hints": ["Use the definition of implication"]
                    }
                ]
            }"#,
        )
        .unwrap();
        let problem = &set.problems[0];
        assert_eq!(problem.id(), "3.2");
        assert_eq!(problem.lhs, "(A ∪ B) ∩ A");
        assert_eq!(problem.enabled_rules.as_ref().map(|r| r.len()), Some(2));
        let laws = problem.custom_laws.as_ref().unwrap();
        assert_eq!(laws[0].text.as_deref(), Some("Absorption of ∩ over ∪"));
        assert!(set.problems[1].custom_laws.is_none());
        assert_eq!(set.problems[1].hints.len(), 1);
        assert!(set.problems[1].disabled_rules.is_none());

        assert!(ProblemSet::from_json(r#"{"problems": [{"week": 1}]}"#).is_err());
    }
}
