use crate::{
    error::{ParseError, StepError, TheoryError},
    expression::Expression,
    parser::Parser,
    problem::Problem,
    rule::{CompiledRule, CustomLaw, RuleCategory, RuleDefinition, RuleOrigin},
    symbol::{Equality, Form, Symbol, SymbolTable},
    types::*,
};
use log::{debug, error, info};
use std::collections::BTreeMap;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// The key and the human readable description of a theory
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TheoryInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
}

impl TheoryInfo {
    pub fn new(name: &str, display_name: &str, description: &str) -> Self {
        TheoryInfo {
            name: name.to_owned(),
            display_name: display_name.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// The static data a [`Theory`] is built from
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct TheoryDefinition {
    pub info: TheoryInfo,
    pub symbols: Vec<Symbol>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub equality: Equality,
    pub rules: Vec<RuleDefinition>,
}

impl TheoryDefinition {
    pub fn symbol_table(&self) -> Result<SymbolTable, TheoryError> {
        SymbolTable::new(self.symbols.clone(), self.equality.clone())
    }
}

/// The compiled rules of a theory together with the problem whose custom laws they include.
///
/// Rules only become visible through [`compile`](#method.compile); the two transitions leave the
/// cache either uncompiled or with the problem's custom rules removed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleCache {
    Uncompiled {
        problem: Option<String>,
    },
    Compiled {
        problem: Option<String>,
        rules: Vec<CompiledRule>,
    },
}

impl Default for RuleCache {
    fn default() -> Self {
        RuleCache::Uncompiled { problem: None }
    }
}

impl RuleCache {
    fn problem(&self) -> Option<&str> {
        match self {
            RuleCache::Uncompiled { problem } | RuleCache::Compiled { problem, .. } => {
                problem.as_deref()
            }
        }
    }

    fn rules(&self) -> &[CompiledRule] {
        match self {
            RuleCache::Uncompiled { .. } => &[],
            RuleCache::Compiled { rules, .. } => rules,
        }
    }

    /// Drops everything compiled so far, the next compilation includes the laws of `problem`
    fn load_problem(self, problem: String) -> Self {
        RuleCache::Uncompiled {
            problem: Some(problem),
        }
    }

    /// Removes the active problem's custom rules and leaves no problem active
    fn clear_problem(self) -> Self {
        match self {
            RuleCache::Uncompiled { .. } => RuleCache::Uncompiled { problem: None },
            RuleCache::Compiled { rules, .. } => RuleCache::Compiled {
                problem: None,
                rules: rules.into_iter().filter(|r| !r.is_custom()).collect(),
            },
        }
    }

    /// Compiles the built-in rules followed by the laws of the active problem. Rules that fail
    /// to parse are logged and left out.
    fn compile(
        self,
        parser: &Parser,
        theory: &str,
        builtin: &[RuleDefinition],
        laws: &BTreeMap<String, Vec<CustomLaw>>,
    ) -> Self {
        let problem = match self {
            RuleCache::Uncompiled { problem } => problem,
            compiled => return compiled,
        };
        let mut rules = Vec::with_capacity(builtin.len());
        for definition in builtin.iter() {
            match CompiledRule::compile(parser, definition.clone(), RuleOrigin::BuiltIn) {
                Ok(rule) => rules.push(rule),
                Err(e) => error!(
                    "skipping rule {} of {} ({} = {}): {}",
                    definition.name, theory, definition.lhs, definition.rhs, e
                ),
            }
        }
        if let Some(id) = problem.as_deref() {
            for law in laws.get(id).into_iter().flatten() {
                if !law.applies_to(theory) {
                    debug!("law {:?} belongs to another theory", law.name);
                    continue;
                }
                let definition = law.definition(id);
                let name = definition.name.clone();
                match CompiledRule::compile(parser, definition, RuleOrigin::Problem(id.to_owned()))
                {
                    Ok(rule) => rules.push(rule),
                    Err(e) => error!(
                        "skipping custom law {} of problem {} ({} = {}): {}",
                        name, id, law.lhs, law.rhs, e
                    ),
                }
            }
        }
        info!(
            "compiled {} rules for {} (problem {:?})",
            rules.len(),
            theory,
            problem
        );
        RuleCache::Compiled { problem, rules }
    }
}

/// The result of checking one proof step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: Result<(), StepError>,
    /// The definition of the chosen rule, if it exists
    pub rule: Option<RuleDefinition>,
    pub is_custom: bool,
    pub is_problem_specific: bool,
}

impl StepReport {
    fn failure(error: StepError) -> Self {
        StepReport {
            outcome: Err(error),
            rule: None,
            is_custom: false,
            is_problem_specific: false,
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&StepError> {
        self.outcome.as_ref().err()
    }
}

/// A algebraic theory: its symbols, its own parser and its rules, plus the custom laws of at
/// most one active problem.
///
/// # Example
/// ```
/// use stepwise::{theories, Theory};
/// use stepwise::error::StepError;
///
/// let theory = Theory::new(theories::set_theory()).unwrap();
/// let from = theory.parse("A∪A").unwrap();
/// let to = theory.parse("A").unwrap();
/// assert!(theory.validate_step(&from, &to, "idem1").success());
///
/// let from = theory.parse("A∪B").unwrap();
/// assert_eq!(
///     theory.validate_step(&from, &to, "idem1").outcome,
///     Err(StepError::RuleDoesNotApply)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Theory {
    info: TheoryInfo,
    parser: Parser,
    builtin: Vec<RuleDefinition>,
    laws: BTreeMap<String, Vec<CustomLaw>>,
    cache: RuleCache,
}

impl Theory {
    /// Validates the symbol table of `definition` and compiles its rules
    ///
    /// # Errors
    /// Any [`TheoryError`] raised by [`SymbolTable::new`]
    pub fn new(definition: TheoryDefinition) -> Result<Self, TheoryError> {
        let table = definition.symbol_table()?;
        let mut theory = Theory {
            info: definition.info,
            parser: Parser::new(table),
            builtin: definition.rules,
            laws: BTreeMap::new(),
            cache: RuleCache::default(),
        };
        theory.compile();
        Ok(theory)
    }

    fn compile(&mut self) {
        let cache = std::mem::take(&mut self.cache);
        self.cache = cache.compile(&self.parser, &self.info.name, &self.builtin, &self.laws);
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> &TheoryInfo {
        &self.info
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.parser.symbols()
    }

    pub fn equality(&self) -> &Equality {
        self.symbols().equality()
    }

    pub fn parse(&self, input: &str) -> Result<Expression, ParseError> {
        self.parser.parse(input)
    }

    /// Renders `expression` without reporting its rank
    pub fn render(&self, expression: &Expression, form: Form) -> String {
        self.parser.unparse(expression, form).0
    }

    /// Renders `lhs = rhs` with the equality sign of this theory
    ///
    /// # Example
    /// ```
    /// use stepwise::{theories, Form, Theory};
    ///
    /// let theory = Theory::new(theories::propositional_logic()).unwrap();
    /// let lhs = theory.parse("p → q").unwrap();
    /// let rhs = theory.parse("¬p ∨ q").unwrap();
    /// assert_eq!(theory.render_equation(&lhs, &rhs, Form::Text), "p → q ≡ ¬p ∨ q");
    /// assert_eq!(
    ///     theory.render_equation(&lhs, &rhs, Form::Latex),
    ///     "p \\rightarrow q \\equiv \\neg p \\lor q"
    /// );
    /// ```
    pub fn render_equation(&self, lhs: &Expression, rhs: &Expression, form: Form) -> String {
        format!(
            "{} {} {}",
            self.render(lhs, form),
            self.equality().form(form),
            self.render(rhs, form)
        )
    }

    /// Checks that `to` follows from `from` by a single application of the rule `rule_name`,
    /// read in either direction.
    ///
    /// Expressions that are not made of this theory's symbols are reported as
    /// `StepError::Malformed` instead of being matched.
    pub fn validate_step(&self, from: &Expression, to: &Expression, rule_name: &str) -> StepReport {
        let rule = match self.compiled_rule(rule_name) {
            Some(rule) => rule,
            None => return StepReport::failure(StepError::UnknownRule(rule_name.to_owned())),
        };
        let table = self.symbols();
        let outcome = if !from.is_well_formed(table) {
            Err(StepError::Malformed(format!("invalid expression {}", from)))
        } else if !to.is_well_formed(table) {
            Err(StepError::Malformed(format!("invalid expression {}", to)))
        } else if !rule.lhs.is_well_formed(table) || !rule.rhs.is_well_formed(table) {
            Err(StepError::Malformed(format!("invalid rule {}", rule.name())))
        } else {
            rule.check(from, to)
        };
        debug!("{} by {}: {:?}", from, rule_name, outcome);
        StepReport {
            outcome,
            rule: Some(rule.definition.clone()),
            is_custom: rule.is_custom(),
            is_problem_specific: rule.problem().is_some() && rule.problem() == self.current_problem(),
        }
    }

    /// Makes `problem` the active problem with `laws` as its custom rules, replacing the custom
    /// rules of any other problem. The stored laws of `problem` are overwritten, so loading it
    /// with no laws leaves it active without custom rules. Clearing the context keeps them
    /// stored.
    pub fn load_problem_custom_laws(&mut self, problem: &str, laws: Vec<CustomLaw>) {
        info!("loading {} custom laws for problem {}", laws.len(), problem);
        self.laws.insert(problem.to_owned(), laws);
        let cache = std::mem::take(&mut self.cache);
        self.cache = cache.load_problem(problem.to_owned());
        self.compile();
    }

    /// Removes the custom rules of the active problem
    pub fn clear_problem_context(&mut self) {
        if let Some(problem) = self.current_problem() {
            info!("clearing problem {}", problem);
        }
        let cache = std::mem::take(&mut self.cache);
        self.cache = cache.clear_problem();
        self.compile();
    }

    /// Switches to `problem`: clears the previous context and, if the problem lists custom laws
    /// (even none), makes it the active problem
    pub fn begin(&mut self, problem: &Problem) {
        self.clear_problem_context();
        if let Some(laws) = &problem.custom_laws {
            self.load_problem_custom_laws(&problem.id(), laws.clone());
        }
    }

    pub fn current_problem(&self) -> Option<&str> {
        self.cache.problem()
    }

    fn compiled_rule(&self, name: &str) -> Option<&CompiledRule> {
        self.cache.rules().iter().find(|r| r.name() == name)
    }

    /// Built-in rules followed by the custom rules of the active problem
    pub fn available_rules(&self) -> Vec<&RuleDefinition> {
        self.cache.rules().iter().map(|r| &r.definition).collect()
    }

    pub fn rules_by_category(&self) -> BTreeMap<RuleCategory, Vec<&RuleDefinition>> {
        let mut categories: BTreeMap<_, Vec<_>> = BTreeMap::new();
        for rule in self.available_rules() {
            categories.entry(rule.category()).or_default().push(rule);
        }
        categories
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.available_rules()
            .into_iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    pub fn rules_by_level(&self, level: Level) -> Vec<&RuleDefinition> {
        self.available_rules()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    /// Looks up a available rule, falling back to built-in rules that failed to compile
    pub fn rule_definition(&self, name: &str) -> Option<&RuleDefinition> {
        self.compiled_rule(name)
            .map(|r| &r.definition)
            .or_else(|| self.builtin.iter().find(|r| r.name == name))
    }

    /// The raw laws of the active problem
    pub fn custom_laws(&self) -> &[CustomLaw] {
        self.current_problem()
            .and_then(|p| self.laws.get(p))
            .map_or(&[], |laws| laws.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rule::{BASIC, CUSTOM, DEFINITION},
        theories,
    };

    fn set_theory() -> Theory {
        Theory::new(theories::set_theory()).unwrap()
    }

    fn check(theory: &Theory, from: &str, to: &str, rule: &str) -> Result<(), StepError> {
        let from = theory.parse(from).unwrap();
        let to = theory.parse(to).unwrap();
        theory.validate_step(&from, &to, rule).outcome
    }

    fn absorption() -> CustomLaw {
        CustomLaw::new("Absorption", "(A ∪ B) ∩ A", "A")
    }

    #[test]
    fn idempotence_scenarios() {
        let theory = set_theory();
        assert_eq!(check(&theory, "A∪A", "A", "idem1"), Ok(()));
        assert_eq!(
            check(&theory, "A∪B", "A", "idem1"),
            Err(StepError::RuleDoesNotApply)
        );
        assert_eq!(
            check(&theory, "(A∪A)∩(B∪B)", "A∩B", "idem1"),
            Err(StepError::TooManyChanges)
        );
        assert_eq!(
            check(&theory, "A∪A", "A∪A", "idem1"),
            Err(StepError::NoRuleApplied)
        );
    }

    #[test]
    fn rules_in_context() {
        let theory = set_theory();
        assert_eq!(check(&theory, "C ∩ (A \\ B)", "C ∩ (A ∩ Bᶜ)", "defdiff"), Ok(()));
        assert_eq!(check(&theory, "(Aᶜᶜ ∪ B)ᶜ", "(A ∪ B)ᶜ", "dblc"), Ok(()));
        assert_eq!(check(&theory, "(A ∪ B)ᶜ", "Aᶜ ∩ Bᶜ", "dem1"), Ok(()));
        assert_eq!(check(&theory, "Aᶜ ∩ Bᶜ", "(A ∪ B)ᶜ", "dem1"), Ok(()));
        assert_eq!(
            check(&theory, "(A ∪ B)ᶜ", "Aᶜ ∪ Bᶜ", "dem1"),
            Err(StepError::RuleDoesNotApply)
        );
    }

    #[test]
    fn unknown_rule() {
        let theory = set_theory();
        let a = theory.parse("A").unwrap();
        let report = theory.validate_step(&a, &a, "idem9");
        assert_eq!(report.outcome, Err(StepError::UnknownRule("idem9".to_owned())));
        assert_eq!(report.rule, None);
        assert_eq!(report.error().unwrap().to_string(), "Unknown rule: idem9");
    }

    #[test]
    fn foreign_expressions_are_malformed() {
        let theory = set_theory();
        let a = Expression::leaf('A');
        let bad = Expression::binary('>', a.clone(), a.clone());
        let report = theory.validate_step(&bad, &a, "idem1");
        assert!(matches!(report.outcome, Err(StepError::Malformed(_))));
        assert!(report
            .error()
            .unwrap()
            .to_string()
            .starts_with("Rule validation error: "));
    }

    #[test]
    fn custom_law_lifecycle() {
        let mut theory = set_theory();
        let builtin = theory.rule_names().len();
        assert_eq!(theory.current_problem(), None);

        theory.load_problem_custom_laws("3.2", vec![absorption()]);
        assert_eq!(theory.current_problem(), Some("3.2"));
        assert_eq!(theory.rule_names().len(), builtin + 1);
        let report = theory.validate_step(
            &theory.parse("(A ∪ B) ∩ A").unwrap(),
            &theory.parse("A").unwrap(),
            "custom_3.2_absorption",
        );
        assert!(report.success());
        assert!(report.is_custom);
        assert!(report.is_problem_specific);
        assert_eq!(report.rule.unwrap().level, CUSTOM);
        assert_eq!(theory.custom_laws(), &[absorption()][..]);

        theory.load_problem_custom_laws("3.3", vec![CustomLaw::new("Other", "A", "B")]);
        assert!(theory.rule_definition("custom_3.2_absorption").is_none());
        assert!(theory.rule_definition("custom_3.3_other").is_some());

        theory.clear_problem_context();
        assert_eq!(theory.current_problem(), None);
        assert_eq!(theory.rule_names().len(), builtin);
        assert!(theory.custom_laws().is_empty());
        assert_eq!(
            check(&theory, "A", "B", "custom_3.3_other"),
            Err(StepError::UnknownRule("custom_3.3_other".to_owned()))
        );

        // stored laws survive clearing
        assert!(theory.laws.contains_key("3.3"));

        // loading again replaces them
        theory.load_problem_custom_laws("3.3", Vec::new());
        assert_eq!(theory.current_problem(), Some("3.3"));
        assert!(theory.custom_laws().is_empty());
        assert!(theory.rule_definition("custom_3.3_other").is_none());
        assert_eq!(theory.rule_names().len(), builtin);
    }

    #[test]
    fn laws_of_other_theories_are_ignored() {
        let mut theory = set_theory();
        let mut law = CustomLaw::new("Logic", "A", "B");
        law.theory = Some("prop_logic".to_owned());
        theory.load_problem_custom_laws("1.1", vec![law, absorption()]);
        assert_eq!(theory.custom_laws().len(), 2);
        assert!(theory.rule_definition("custom_1.1_logic").is_none());
        assert!(theory.rule_definition("custom_1.1_absorption").is_some());
    }

    #[test]
    fn unparseable_laws_are_skipped() {
        let mut theory = set_theory();
        theory.load_problem_custom_laws(
            "1.1",
            vec![CustomLaw::new("Broken", "A ∪", "A"), absorption()],
        );
        assert!(theory.rule_definition("custom_1.1_broken").is_none());
        assert!(theory.rule_definition("custom_1.1_absorption").is_some());
    }

    #[test]
    fn begin_switches_problems() {
        let mut theory = set_theory();
        let mut with_laws = Problem::new(3, 2, "set_theory", "(A ∪ B) ∩ A", "A");
        with_laws.custom_laws = Some(vec![absorption()]);
        theory.begin(&with_laws);
        assert_eq!(theory.current_problem(), Some("3.2"));

        let without_laws = Problem::new(3, 3, "set_theory", "A", "A");
        theory.begin(&without_laws);
        assert_eq!(theory.current_problem(), None);
        assert!(theory.rule_definition("custom_3.2_absorption").is_none());

        let mut no_laws = Problem::new(3, 4, "set_theory", "A", "A");
        no_laws.custom_laws = Some(Vec::new());
        theory.begin(&no_laws);
        assert_eq!(theory.current_problem(), Some("3.4"));
        assert!(theory.custom_laws().is_empty());
        assert_eq!(theory.rule_names().len(), 23);
    }

    #[test]
    fn listings() {
        let mut theory = set_theory();
        theory.load_problem_custom_laws("3.2", vec![absorption()]);
        let names = theory.rule_names();
        assert_eq!(names[0], "assoc1");
        assert_eq!(names.last(), Some(&"custom_3.2_absorption"));

        let categories = theory.rules_by_category();
        assert_eq!(categories[&RuleCategory::Basic].len(), 10);
        assert_eq!(categories[&RuleCategory::Definitions].len(), 2);
        assert_eq!(categories[&RuleCategory::Derived].len(), 11);
        assert_eq!(categories[&RuleCategory::ProblemSpecific].len(), 1);

        assert_eq!(theory.rules_by_level(BASIC).len(), 10);
        let definitions: Vec<_> = theory
            .rules_by_level(DEFINITION)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(definitions, vec!["defdiff", "defsd"]);
        assert_eq!(
            theory.rule_definition("idem1").map(|r| r.text.as_str()),
            Some("Idempotence of Union")
        );
    }

    #[test]
    fn cache_transitions() {
        let cache = RuleCache::default().load_problem("1.1".to_owned());
        assert_eq!(cache.problem(), Some("1.1"));
        assert!(cache.rules().is_empty());
        assert_eq!(cache.clear_problem(), RuleCache::default());
    }
}
