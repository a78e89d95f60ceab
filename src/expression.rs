use crate::{symbol::SymbolTable, types::*};
use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A node of an expression tree.
///
/// A node without children is a variable (an ASCII letter) or a constant of the theory. Nodes
/// with one or two children are applications of a unary or binary operator. Equality is
/// structural and order sensitive, so `A ∪ B` and `B ∪ A` are different expressions.
///
/// Expressions are never modified in place; [`replace`](#method.replace) and
/// [`substitute`](#method.substitute) build new trees.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Expression {
    root: SymbolId,
    children: Vec<Expression>,
}

impl Expression {
    pub fn new(root: SymbolId, children: Vec<Expression>) -> Self {
        Expression { root, children }
    }

    pub fn leaf(root: SymbolId) -> Self {
        Self::new(root, Vec::new())
    }

    pub fn unary(operator: SymbolId, operand: Expression) -> Self {
        Self::new(operator, vec![operand])
    }

    pub fn binary(operator: SymbolId, left: Expression, right: Expression) -> Self {
        Self::new(operator, vec![left, right])
    }

    pub fn root(&self) -> SymbolId {
        self.root
    }

    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_unary(&self) -> bool {
        self.children.len() == 1
    }

    pub fn is_binary(&self) -> bool {
        self.children.len() == 2
    }

    /// Tests whether this is a leaf named by a letter
    pub fn is_variable(&self) -> bool {
        self.is_leaf() && is_variable(self.root)
    }

    /// Returns the set of variables occuring in this expression
    ///
    /// # Example
    /// ```
    /// use stepwise::Expression;
    ///
    /// let e = Expression::binary(
    ///     '|',
    ///     Expression::leaf('A'),
    ///     Expression::binary('&', Expression::leaf('0'), Expression::leaf('A')),
    /// );
    /// assert_eq!(e.variables().into_iter().collect::<Vec<_>>(), vec!['A']);
    /// ```
    pub fn variables(&self) -> BTreeSet<SymbolId> {
        let mut variables = BTreeSet::new();
        self.traverse(&mut |node| {
            if node.is_variable() {
                variables.insert(node.root);
            }
        });
        variables
    }

    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    pub fn leaves(&self) -> Vec<&Expression> {
        self.find_nodes(|node| node.is_leaf())
    }

    /// Calls `f` on every node, children before their parent
    pub fn traverse<F: FnMut(&Expression)>(&self, f: &mut F) {
        for child in self.children.iter() {
            child.traverse(f);
        }
        f(self)
    }

    /// Returns all nodes satisfying `predicate`, parents before their children
    pub fn find_nodes<P: Fn(&Expression) -> bool>(&self, predicate: P) -> Vec<&Expression> {
        let mut found = Vec::new();
        self.collect_nodes(&predicate, &mut found);
        found
    }

    fn collect_nodes<'a, P: Fn(&Expression) -> bool>(
        &'a self,
        predicate: &P,
        found: &mut Vec<&'a Expression>,
    ) {
        if predicate(self) {
            found.push(self);
        }
        for child in self.children.iter() {
            child.collect_nodes(predicate, found);
        }
    }

    /// Replaces every occurence of `target` by `replacement`.
    ///
    /// Occurences are found top down, so a replaced subtree is not searched again.
    ///
    /// # Example
    /// ```
    /// use stepwise::Expression;
    ///
    /// let a = Expression::leaf('A');
    /// let b = Expression::leaf('B');
    /// let e = Expression::binary('|', a.clone(), Expression::unary('!', a.clone()));
    /// assert_eq!(
    ///     e.replace(&a, &b),
    ///     Expression::binary('|', b.clone(), Expression::unary('!', b.clone()))
    /// );
    /// ```
    pub fn replace(&self, target: &Expression, replacement: &Expression) -> Expression {
        if self == target {
            return replacement.clone();
        }
        Expression {
            root: self.root,
            children: self
                .children
                .iter()
                .map(|c| c.replace(target, replacement))
                .collect(),
        }
    }

    /// Checks that every node is either a variable or a symbol of `table` applied to as many
    /// operands as its arity demands
    pub fn is_well_formed(&self, table: &SymbolTable) -> bool {
        let arity_fits = match table.arity(self.root) {
            Some(arity) => arity.operands() == self.children.len(),
            None => self.is_variable(),
        };
        arity_fits && self.children.iter().all(|c| c.is_well_formed(table))
    }

    /// Polish notation over internal ids, e.g. `| A ! B`
    pub fn to_prefix(&self) -> String {
        let mut s = self.root.to_string();
        for child in self.children.iter() {
            s.push(' ');
            s.push_str(&child.to_prefix());
        }
        s
    }

    /// Reverse polish notation over internal ids, e.g. `A B ! |`
    pub fn to_postfix(&self) -> String {
        let mut s = String::new();
        for child in self.children.iter() {
            s.push_str(&child.to_postfix());
            s.push(' ');
        }
        s.push(self.root);
        s
    }
}

/// Internal representation for debugging: `(A | !(B))`
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.children.as_slice() {
            [] => write!(f, "{}", self.root),
            [operand] => write!(f, "{}({})", self.root, operand),
            [left, right] => write!(f, "({} {} {})", left, self.root, right),
            children => {
                write!(f, "{}(", self.root)?;
                for (i, child) in children.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Tests whether the given id names a variable
///
/// # Example
/// ```
/// use stepwise::expression::is_variable;
///
/// assert!(is_variable('A'));
/// assert!(is_variable('x'));
/// assert!(!is_variable('|'));
/// assert!(!is_variable('0'));
/// ```
pub fn is_variable(id: SymbolId) -> bool {
    id.is_ascii_alphabetic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theories;
    use quickcheck::{Arbitrary, Gen};

    /// Random expressions over the set theory signature
    impl Arbitrary for Expression {
        fn arbitrary(g: &mut Gen) -> Self {
            fn build(g: &mut Gen, depth: usize) -> Expression {
                let choice = if depth == 0 {
                    *g.choose(&[0u8, 1]).unwrap()
                } else {
                    *g.choose(&[0u8, 1, 2, 3, 3]).unwrap()
                };
                match choice {
                    0 => Expression::leaf(*g.choose(&['A', 'B', 'C', 'x', 'y']).unwrap()),
                    1 => Expression::leaf(*g.choose(&['0', '1']).unwrap()),
                    2 => Expression::unary('!', build(g, depth - 1)),
                    _ => Expression::binary(
                        *g.choose(&['|', '&', '-', '+']).unwrap(),
                        build(g, depth - 1),
                        build(g, depth - 1),
                    ),
                }
            }
            let depth = usize::arbitrary(g) % 5;
            build(g, depth)
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            Box::new(self.children.clone().into_iter())
        }
    }

    fn sample() -> Expression {
        // (A | B) & !(A)
        Expression::binary(
            '&',
            Expression::binary('|', Expression::leaf('A'), Expression::leaf('B')),
            Expression::unary('!', Expression::leaf('A')),
        )
    }

    quickcheck! {
        fn clone_is_equal(e: Expression) -> bool {
            let copy = e.clone();
            copy == e && !std::ptr::eq(&copy, &e)
        }

        fn replace_self_is_identity(e: Expression) -> bool {
            e.replace(&e, &e) == e
        }

        fn generated_expressions_are_well_formed(e: Expression) -> bool {
            e.is_well_formed(&theories::set_theory().symbol_table().unwrap())
        }
    }

    #[test]
    fn shape() {
        let e = sample();
        assert!(e.is_binary());
        assert!(e.children()[1].is_unary());
        assert!(e.children()[0].children()[0].is_leaf());
        assert_eq!(e.height(), 2);
        assert_eq!(e.node_count(), 6);
        assert_eq!(e.leaves().len(), 3);
        assert_eq!(e.variables().into_iter().collect::<Vec<_>>(), vec!['A', 'B']);
    }

    #[test]
    fn order_matters() {
        let ab = Expression::binary('|', Expression::leaf('A'), Expression::leaf('B'));
        let ba = Expression::binary('|', Expression::leaf('B'), Expression::leaf('A'));
        assert_ne!(ab, ba);
    }

    #[test]
    fn traversal_orders() {
        let e = sample();
        let mut post = String::new();
        e.traverse(&mut |node| post.push(node.root()));
        assert_eq!(post, "AB|A!&");
        let pre: String = e.find_nodes(|_| true).iter().map(|n| n.root()).collect();
        assert_eq!(pre, "&|AB!A");
    }

    #[test]
    fn notations() {
        let e = sample();
        assert_eq!(e.to_string(), "((A | B) & !(A))");
        assert_eq!(e.to_prefix(), "& | A B ! A");
        assert_eq!(e.to_postfix(), "A B | A ! &");
    }

    #[test]
    fn replace_all_occurences() {
        let e = sample();
        let a = Expression::leaf('A');
        let c = Expression::leaf('C');
        let replaced = e.replace(&a, &c);
        assert_eq!(replaced.to_string(), "((C | B) & !(C))");
        assert_eq!(e.to_string(), "((A | B) & !(A))");
    }

    #[test]
    fn well_formed() {
        let table = &theories::set_theory().symbol_table().unwrap();
        assert!(sample().is_well_formed(table));
        let bad_arity = Expression::unary('|', Expression::leaf('A'));
        assert!(!bad_arity.is_well_formed(table));
        let unknown = Expression::leaf('?');
        assert!(!unknown.is_well_formed(table));
        let applied_variable = Expression::unary('A', Expression::leaf('B'));
        assert!(!applied_variable.is_well_formed(table));
    }
}
