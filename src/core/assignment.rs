//! Candidate assignments and their canonical rendering.
//!
//! An assignment holds one value per feature, positioned in catalog order.
//! It is created fresh for every enumerated tuple, mutated only by null
//! actions while it is evaluated, and then rendered into the slash-joined
//! string that doubles as the deduplication key.

use std::fmt;

use crate::util::Symbol;

/// Separator placed between feature values in a rendered configuration.
pub const SEPARATOR: &str = "/";

/// Text a nulled feature renders as.
pub const NULL_TOKEN: &str = "None";

/// The current value of one feature inside an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// A code drawn from the feature's domain.
    Code(Symbol),
    /// The feature was cleared by a null action.
    Null,
}

impl Value {
    /// The text this value renders as.
    pub fn as_str(&self) -> &str {
        match self {
            Value::Code(code) => code.as_str(),
            Value::Null => NULL_TOKEN,
        }
    }

    /// Exact-equality test against a literal from a condition or an
    /// allowed-values list.
    ///
    /// A nulled value matches the literal `None`, the same text it renders as.
    pub fn matches(&self, literal: Symbol) -> bool {
        match self {
            Value::Code(code) => *code == literal,
            Value::Null => literal == NULL_TOKEN,
        }
    }

    /// Membership test against an allowed-values list.
    pub fn is_one_of(&self, allowed: &[Symbol]) -> bool {
        allowed.iter().any(|literal| self.matches(*literal))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate configuration: a value for every feature, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    values: Vec<Value>,
}

impl Assignment {
    /// Build an assignment from codes listed in catalog order.
    pub fn from_codes(codes: impl IntoIterator<Item = Symbol>) -> Self {
        Assignment {
            values: codes.into_iter().map(Value::Code).collect(),
        }
    }

    /// Current value of the feature at `index`.
    ///
    /// Indices come from a validated catalog, so they are always in range for
    /// assignments produced from that catalog.
    pub fn get(&self, index: usize) -> Value {
        self.values[index]
    }

    /// Clear the feature at `index`, returning the updated assignment.
    pub fn with_null(mut self, index: usize) -> Self {
        self.values[index] = Value::Null;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render the assignment in catalog order, joined with [`SEPARATOR`].
    ///
    /// Nulled features render as [`NULL_TOKEN`], so assignments that differ
    /// only in features a null action cleared render identically.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                out.push_str(SEPARATOR);
            }
            out.push_str(value.as_str());
        }
        out
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(codes: &[&str]) -> Assignment {
        Assignment::from_codes(codes.iter().map(Symbol::new))
    }

    #[test]
    fn test_render_joins_in_order() {
        assert_eq!(assignment(&["x", "p", "1"]).render(), "x/p/1");
        assert_eq!(assignment(&["only"]).render(), "only");
    }

    #[test]
    fn test_null_renders_as_none() {
        let a = assignment(&["x", "q"]).with_null(1);
        assert_eq!(a.render(), "x/None");
        assert!(a.get(1).is_null());
    }

    #[test]
    fn test_nulled_assignments_collapse() {
        let first = assignment(&["x", "p"]).with_null(1);
        let second = assignment(&["x", "q"]).with_null(1);
        assert_eq!(first.render(), second.render());
        assert_eq!(first, second);
    }

    #[test]
    fn test_value_matching() {
        let code = Value::Code(Symbol::new("p"));
        assert!(code.matches(Symbol::new("p")));
        assert!(!code.matches(Symbol::new("q")));

        assert!(Value::Null.matches(Symbol::new(NULL_TOKEN)));
        assert!(!Value::Null.matches(Symbol::new("p")));
    }

    #[test]
    fn test_is_one_of() {
        let allowed = [Symbol::new("p"), Symbol::new("q")];
        assert!(Value::Code(Symbol::new("q")).is_one_of(&allowed));
        assert!(!Value::Code(Symbol::new("r")).is_one_of(&allowed));
        assert!(!Value::Null.is_one_of(&allowed));
        assert!(!Value::Code(Symbol::new("p")).is_one_of(&[]));
    }
}
