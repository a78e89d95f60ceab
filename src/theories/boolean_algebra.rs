use crate::{
    rule::{RuleDefinition, BASIC, DERIVED},
    symbol::{Arity, Equality, Symbol},
    theory::{TheoryDefinition, TheoryInfo},
};

pub fn boolean_algebra() -> TheoryDefinition {
    TheoryDefinition {
        info: TheoryInfo::new(
            "bool_alg",
            "Boolean Algebra",
            "Boolean algebra with ∨, ∧, ' operators and constants 0, 1",
        ),
        symbols: vec![
            Symbol::new('0', "Zero", "0", Arity::Constant),
            Symbol::new('1', "One", "1", Arity::Constant),
            Symbol::new('!', "Complement", "'", Arity::Postfix),
            Symbol::new('|', "Boolean OR", "∨", Arity::Binary).with_latex("\\lor"),
            Symbol::new('&', "Boolean AND", "∧", Arity::Binary).with_latex("\\land"),
        ],
        equality: Equality::default(),
        rules: vec![
            RuleDefinition::new("assoc_or", "Associativity of OR", "(x ∨ y) ∨ z", "x ∨ (y ∨ z)", BASIC),
            RuleDefinition::new("assoc_and", "Associativity of AND", "(x ∧ y) ∧ z", "x ∧ (y ∧ z)", BASIC),
            RuleDefinition::new("comm_or", "Commutativity of OR", "x ∨ y", "y ∨ x", BASIC),
            RuleDefinition::new("comm_and", "Commutativity of AND", "x ∧ y", "y ∧ x", BASIC),
            RuleDefinition::new("dist_and_or", "Distributivity of AND over OR", "x ∧ (y ∨ z)", "(x ∧ y) ∨ (x ∧ z)", BASIC),
            RuleDefinition::new("dist_or_and", "Distributivity of OR over AND", "x ∨ (y ∧ z)", "(x ∨ y) ∧ (x ∨ z)", BASIC),
            RuleDefinition::new("id_or", "Identity of OR", "x ∨ 0", "x", BASIC),
            RuleDefinition::new("id_and", "Identity of AND", "x ∧ 1", "x", BASIC),
            RuleDefinition::new("comp_or", "Complement with OR", "x ∨ x'", "1", BASIC),
            RuleDefinition::new("comp_and", "Complement with AND", "x ∧ x'", "0", BASIC),
            RuleDefinition::new("idem_or", "Idempotence of OR", "x ∨ x", "x", DERIVED),
            RuleDefinition::new("idem_and", "Idempotence of AND", "x ∧ x", "x", DERIVED),
            RuleDefinition::new("dbl_comp", "Double complement", "x''", "x", DERIVED),
            RuleDefinition::new("ann_or", "Annihilation of OR", "x ∨ 1", "1", DERIVED),
            RuleDefinition::new("ann_and", "Annihilation of AND", "x ∧ 0", "0", DERIVED),
            RuleDefinition::new("dem_or", "De Morgan's, ' over OR", "(x ∨ y)'", "x' ∧ y'", DERIVED),
            RuleDefinition::new("dem_and", "De Morgan's, ' over AND", "(x ∧ y)'", "x' ∨ y'", DERIVED),
            RuleDefinition::new("comp_zero", "Complement of 0", "0'", "1", DERIVED),
            RuleDefinition::new("comp_one", "Complement of 1", "1'", "0", DERIVED),
        ],
    }
}
