use crate::{
    rule::{RuleDefinition, BASIC, DEFINITION, DERIVED},
    symbol::{Arity, Equality, Symbol},
    theory::{TheoryDefinition, TheoryInfo},
};

pub fn propositional_logic() -> TheoryDefinition {
    TheoryDefinition {
        info: TheoryInfo::new(
            "prop_logic",
            "Propositional Logic",
            "Propositional logic is the branch of logic that studies how truth values of whole \
             statements (propositions) combine and relate using logical connectives like AND, \
             OR, and NOT.",
        ),
        symbols: vec![
            Symbol::new('0', "False", "⊥", Arity::Constant).with_latex("\\bot"),
            Symbol::new('1', "True", "⊤", Arity::Constant).with_latex("\\top"),
            Symbol::new('!', "Negation", "¬", Arity::Prefix).with_latex("\\neg"),
            Symbol::new('|', "Disjunction", "∨", Arity::Binary).with_latex("\\lor"),
            Symbol::new('&', "Conjunction", "∧", Arity::Binary).with_latex("\\land"),
            Symbol::new('>', "Implication", "→", Arity::Binary).with_latex("\\rightarrow"),
            Symbol::new('~', "Biconditional", "↔", Arity::Binary).with_latex("\\leftrightarrow"),
        ],
        equality: Equality::new("≡", "\\equiv"),
        rules: vec![
            RuleDefinition::new("assoc_or", "Associativity of OR", "(p ∨ q) ∨ r", "p ∨ (q ∨ r)", BASIC),
            RuleDefinition::new("assoc_and", "Associativity of AND", "(p ∧ q) ∧ r", "p ∧ (q ∧ r)", BASIC),
            RuleDefinition::new("comm_or", "Commutativity of OR", "p ∨ q", "q ∨ p", BASIC),
            RuleDefinition::new("comm_and", "Commutativity of AND", "p ∧ q", "q ∧ p", BASIC),
            RuleDefinition::new("dist_and_or", "Distributivity of AND over OR", "p ∧ (q ∨ r)", "(p ∧ q) ∨ (p ∧ r)", BASIC),
            RuleDefinition::new("dist_or_and", "Distributivity of OR over AND", "p ∨ (q ∧ r)", "(p ∨ q) ∧ (p ∨ r)", BASIC),
            RuleDefinition::new("id_or", "Identity of OR", "p ∨ ⊥", "p", BASIC),
            RuleDefinition::new("id_and", "Identity of AND", "p ∧ ⊤", "p", BASIC),
            RuleDefinition::new("comp_or", "Complement with OR", "p ∨ ¬p", "⊤", BASIC),
            RuleDefinition::new("comp_and", "Complement with AND", "p ∧ ¬p", "⊥", BASIC),
            RuleDefinition::new("impl_def", "Definition of Implication", "p → q", "¬p ∨ q", DEFINITION),
            RuleDefinition::new("bicond_def", "Definition of Bi-implication", "p ↔ q", "(p → q) ∧ (q → p)", DEFINITION),
            RuleDefinition::new("idem_or", "Idempotence of OR", "p ∨ p", "p", DERIVED),
            RuleDefinition::new("idem_and", "Idempotence of AND", "p ∧ p", "p", DERIVED),
            RuleDefinition::new("dbl_neg", "Double negation", "¬¬p", "p", DERIVED),
            RuleDefinition::new("ann_or", "Annihilation of OR", "p ∨ ⊤", "⊤", DERIVED),
            RuleDefinition::new("ann_and", "Annihilation of AND", "p ∧ ⊥", "⊥", DERIVED),
            RuleDefinition::new("dem_or", "De Morgan's, ¬ over OR", "¬(p ∨ q)", "¬p ∧ ¬q", DERIVED),
            RuleDefinition::new("dem_and", "De Morgan's, ¬ over AND", "¬(p ∧ q)", "¬p ∨ ¬q", DERIVED),
            RuleDefinition::new("comp_false", "Complement of ⊥", "¬⊥", "⊤", DERIVED),
            RuleDefinition::new("comp_true", "Complement of ⊤", "¬⊤", "⊥", DERIVED),
            RuleDefinition::new("abs_and_or", "Absorption of AND over OR", "p ∧ (p ∨ q)", "p", DERIVED),
            RuleDefinition::new("abs_or_and", "Absorption of OR over AND", "p ∨ (p ∧ q)", "p", DERIVED),
        ],
    }
}
