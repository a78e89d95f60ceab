//! The theories shipped with `stepwise`.

mod boolean_algebra;
mod propositional_logic;
mod set_theory;

pub use boolean_algebra::boolean_algebra;
pub use propositional_logic::propositional_logic;
pub use set_theory::set_theory;

use crate::theory::TheoryDefinition;

/// All shipped theories, keyed by [`TheoryInfo::name`][crate::TheoryInfo]
pub fn builtin() -> Vec<TheoryDefinition> {
    vec![set_theory(), boolean_algebra(), propositional_logic()]
}
