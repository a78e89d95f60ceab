/// Type alias for the internal single-character id of a symbol or variable (see
/// [`Expression`][crate::Expression])
pub type SymbolId = char;

/// Type alias for the grouping level of a rule (see [`RuleDefinition`][crate::RuleDefinition])
pub type Level = u8;
