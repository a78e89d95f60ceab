use crate::{
    rule::{RuleDefinition, BASIC, DEFINITION, DERIVED},
    symbol::{Arity, Equality, Symbol},
    theory::{TheoryDefinition, TheoryInfo},
};

pub fn set_theory() -> TheoryDefinition {
    TheoryDefinition {
        info: TheoryInfo::new(
            "set_theory",
            "Set Theory",
            "Set theory is the mathematical study of collections of objects, called sets, and \
             the relationships between them",
        ),
        symbols: vec![
            Symbol::new('0', "Empty set", "∅", Arity::Constant).with_latex("\\emptyset"),
            Symbol::new('1', "Universal set", "𝓤", Arity::Constant).with_latex("\\mathcal{U}"),
            Symbol::new('!', "Complement", "ᶜ", Arity::Postfix)
                .with_display("∁")
                .with_latex("^{c}"),
            Symbol::new('|', "Union", "∪", Arity::Binary).with_latex("\\cup"),
            Symbol::new('&', "Intersection", "∩", Arity::Binary).with_latex("\\cap"),
            Symbol::new('-', "Set difference", "\\", Arity::Binary).with_latex("\\setminus"),
            Symbol::new('+', "Symmetric difference", "⊕", Arity::Binary).with_latex("\\oplus"),
        ],
        equality: Equality::default(),
        rules: vec![
            RuleDefinition::new("assoc1", "Associativity of Union", "(x ∪ y) ∪ z", "x ∪ (y ∪ z)", BASIC),
            RuleDefinition::new("assoc2", "Associativity of Intersection", "(x ∩ y) ∩ z", "x ∩ (y ∩ z)", BASIC),
            RuleDefinition::new("comm1", "Commutativity of Union", "x ∪ y", "y ∪ x", BASIC),
            RuleDefinition::new("comm2", "Commutativity of Intersection", "x ∩ y", "y ∩ x", BASIC),
            RuleDefinition::new("dist1", "Distributivity of Intersection over Union", "x ∩ (y ∪ z)", "(x ∩ y) ∪ (x ∩ z)", BASIC),
            RuleDefinition::new("dist2", "Distributivity of Union over Intersection", "x ∪ (y ∩ z)", "(x ∪ y) ∩ (x ∪ z)", BASIC),
            RuleDefinition::new("id1", "Identity of Union", "x ∪ ∅", "x", BASIC),
            RuleDefinition::new("id2", "Identity of Intersection", "x ∩ 𝓤", "x", BASIC),
            RuleDefinition::new("comp1", "Complement with Union", "x ∪ xᶜ", "𝓤", BASIC),
            RuleDefinition::new("comp2", "Complement with Intersection", "x ∩ xᶜ", "∅", BASIC),
            RuleDefinition::new("defdiff", "Definition of Set Difference", "x \\ y", "x ∩ yᶜ", DEFINITION),
            RuleDefinition::new("defsd", "Definition of Symmetric Difference", "x ⊕ y", "(x \\ y) ∪ (y \\ x)", DEFINITION),
            RuleDefinition::new("idem1", "Idempotence of Union", "x ∪ x", "x", DERIVED),
            RuleDefinition::new("idem2", "Idempotence of Intersection", "x ∩ x", "x", DERIVED),
            RuleDefinition::new("dblc", "Double complement", "xᶜᶜ", "x", DERIVED),
            RuleDefinition::new("dem1", "De Morgan's, ᶜ over ∪", "(x ∪ y)ᶜ", "xᶜ ∩ yᶜ", DERIVED),
            RuleDefinition::new("dem2", "De Morgan's, ᶜ over ∩", "(x ∩ y)ᶜ", "xᶜ ∪ yᶜ", DERIVED),
            RuleDefinition::new("ann1", "Annihilation of ∪", "x ∪ 𝓤", "𝓤", DERIVED),
            RuleDefinition::new("ann2", "Annihilation of ∩", "x ∩ ∅", "∅", DERIVED),
            RuleDefinition::new("abs1", "Absorption law 1", "x ∪ (x ∩ y)", "x", DERIVED),
            RuleDefinition::new("abs2", "Absorption law 2", "x ∩ (x ∪ y)", "x", DERIVED),
            RuleDefinition::new("cemp", "Complement of ∅", "∅ᶜ", "𝓤", DERIVED),
            RuleDefinition::new("cuni", "Complement of 𝓤", "𝓤ᶜ", "∅", DERIVED),
        ],
    }
}
