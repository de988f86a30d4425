//! Filter conditions and sort orders for children listings.

use std::collections::BTreeMap;
use std::fmt;

/// Boolean operator linking a term to the rest of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => f.write_str("and"),
            Combinator::Or => f.write_str("or"),
        }
    }
}

/// A single `field operator value` term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub field: String,
    pub op: String,
    pub value: String,
}

impl Term {
    pub fn new(field: impl Into<String>, op: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            field: field.into(),
            op: op.into(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Term {
    // The operator is passed through untouched, spacing included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op, self.value)
    }
}

/// Filter expression sent as the `where` parameter of a listing.
///
/// A condition is one term, optionally linked to a nested condition.
/// Grouping is entirely decided by how the chain is built:
///
/// ```
/// use alfresco_client::Condition;
///
/// let c = Condition::new("isFolder", "=", true).and(Condition::new("isFile", "=", false));
/// assert_eq!(c.to_string(), "( isFolder=true and ( ( isFile=false ) ) )");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Term(Term),
    Combine {
        term: Term,
        combinator: Combinator,
        next: Box<Condition>,
    },
}

impl Condition {
    /// Create a single-term condition
    pub fn new(field: impl Into<String>, op: impl Into<String>, value: impl fmt::Display) -> Self {
        Condition::Term(Term::new(field, op, value))
    }

    /// Replace this condition with a single term, dropping any link
    pub fn filter(self, field: impl Into<String>, op: impl Into<String>, value: impl fmt::Display) -> Self {
        Condition::new(field, op, value)
    }

    /// Link `other` with `and`, replacing any previous link
    pub fn and(self, other: Condition) -> Self {
        self.link(Combinator::And, other)
    }

    /// Link `other` with `or`, replacing any previous link
    pub fn or(self, other: Condition) -> Self {
        self.link(Combinator::Or, other)
    }

    pub fn term(&self) -> &Term {
        match self {
            Condition::Term(term) => term,
            Condition::Combine { term, .. } => term,
        }
    }

    fn link(self, combinator: Combinator, other: Condition) -> Self {
        let term = match self {
            Condition::Term(term) => term,
            Condition::Combine { term, .. } => term,
        };
        Condition::Combine {
            term,
            combinator,
            next: Box::new(other),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Term(term) => write!(f, "( {} )", term),
            Condition::Combine {
                term,
                combinator,
                next,
            } => write!(f, "( {} {} ( {} ) )", term, combinator, next),
        }
    }
}

/// Sort direction for an `orderBy` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ASC"),
            SortDirection::Desc => f.write_str("DESC"),
        }
    }
}

/// Ordered list of sort keys, rendered as `field=DIR,field=DIR`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    keys: Vec<(String, SortDirection)>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(self, field: impl Into<String>) -> Self {
        self.push(field, SortDirection::Asc)
    }

    pub fn desc(self, field: impl Into<String>) -> Self {
        self.push(field, SortDirection::Desc)
    }

    /// Append a key; a field already present keeps its position and takes the new direction
    pub fn push(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        let field = field.into();
        match self.keys.iter_mut().find(|(f, _)| *f == field) {
            Some(existing) => existing.1 = direction,
            None => self.keys.push((field, direction)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[(String, SortDirection)] {
        &self.keys
    }
}

impl<S: Into<String>> FromIterator<(S, SortDirection)> for OrderBy {
    fn from_iter<I: IntoIterator<Item = (S, SortDirection)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(OrderBy::new(), |order, (field, dir)| order.push(field, dir))
    }
}

impl From<BTreeMap<String, SortDirection>> for OrderBy {
    fn from(map: BTreeMap<String, SortDirection>) -> Self {
        map.into_iter().collect()
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, direction)) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", field, direction)?;
        }
        Ok(())
    }
}
