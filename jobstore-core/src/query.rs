//! Predicate algebra and query construction for document stores.
//!
//! Filters are expressed as a small tagged tree ([`Predicate`]) that backends
//! translate into their own query language through a [`PredicateVisitor`].
//! Keeping the tree store-independent lets the filter logic be tested without
//! a running database.
//!
//! # Query Building
//!
//! ```ignore
//! use jobstore_core::query::{Query, Filter, SortDirection};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("location", "NYC"))
//!     .limit(10)
//!     .offset(0)
//!     .sort("_id", SortDirection::Asc)
//!     .build();
//! ```
//!
//! # Filter Expression API
//!
//! - Comparison: `eq`, `contains`
//! - Logical: `and`, `or`
//! - Unrestricted: `all`

use bson::Bson;

use crate::{error::StoreError, page::PageWindow};

/// Sort direction for query results.
#[derive(Debug, Clone, PartialEq)]
pub enum SortDirection {
    /// Ascending order (A to Z, 0 to 9, earliest to latest).
    Asc,
    /// Descending order (Z to A, 9 to 0, latest to earliest).
    Desc,
}

/// Sort specification for query results.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    /// The field name to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// Field comparison operators for predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    /// Exact equality.
    Eq,
    /// Case-insensitive substring match on string fields.
    Contains,
}

/// A filter expression evaluated by the store to select documents.
///
/// Two predicates built from the same inputs compare equal, which is what
/// makes filter construction testable in isolation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Predicate {
    /// Matches every document.
    #[default]
    All,
    /// All nested predicates must match.
    And(Vec<Predicate>),
    /// At least one nested predicate must match.
    Or(Vec<Predicate>),
    /// Field comparison.
    Field {
        /// The field name to compare.
        field: String,
        /// The comparison operator.
        op: FieldOp,
        /// The value to compare against.
        value: Bson,
    },
}

impl Predicate {
    /// Creates a field comparison predicate.
    pub fn field(field: String, op: FieldOp, value: Bson) -> Self {
        Predicate::Field { field, op, value }
    }

    /// Returns `true` when this predicate places no restriction on the result.
    pub fn is_all(&self) -> bool {
        matches!(self, Predicate::All)
    }

    /// Combines this predicate with another using logical AND.
    ///
    /// `All` is the identity element, and an existing conjunction is extended
    /// instead of nested.
    pub fn and(self, other: Predicate) -> Self {
        match (self, other) {
            (Predicate::All, other) => other,
            (this, Predicate::All) => this,
            (Predicate::And(mut list), other) => {
                list.push(other);
                Predicate::And(list)
            }
            (this, other) => Predicate::And(vec![this, other]),
        }
    }

    /// Combines this predicate with another using logical OR.
    ///
    /// If this predicate is already a disjunction, the other one is appended.
    pub fn or(self, other: Predicate) -> Self {
        match self {
            Predicate::Or(mut list) => {
                list.push(other);
                Predicate::Or(list)
            }
            _ => Predicate::Or(vec![self, other]),
        }
    }
}

/// Helper for constructing predicates.
///
/// ```ignore
/// use jobstore_core::query::Filter;
///
/// let expr = Filter::eq("location", "NYC")
///     .and(Filter::or([Filter::eq("title", "Engineer"), Filter::eq("companyName", "Engineer")]));
/// ```
pub struct Filter;

impl Filter {
    /// Matches every document.
    pub fn all() -> Predicate {
        Predicate::All
    }

    /// Matches documents where the field equals the value.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Predicate {
        Predicate::field(field.into(), FieldOp::Eq, value.into())
    }

    /// Matches documents where the string field contains the value, ignoring case.
    pub fn contains(field: impl Into<String>, value: impl Into<Bson>) -> Predicate {
        Predicate::field(field.into(), FieldOp::Contains, value.into())
    }

    /// Matches documents satisfying every predicate.
    pub fn and(exprs: impl IntoIterator<Item = Predicate>) -> Predicate {
        Predicate::And(exprs.into_iter().collect())
    }

    /// Matches documents satisfying any predicate.
    pub fn or(exprs: impl IntoIterator<Item = Predicate>) -> Predicate {
        Predicate::Or(exprs.into_iter().collect())
    }
}

/// A structured query: predicate plus skip/limit and ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Predicate selecting the documents.
    pub filter: Predicate,
    /// Maximum number of documents to return.
    pub limit: Option<u64>,
    /// Number of leading matches to discard.
    pub offset: Option<u64>,
    /// Sort specification for results.
    pub sort: Option<Sort>,
}

impl Query {
    /// Creates a query matching every document with no paging or ordering.
    pub fn new() -> Self {
        Query::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the predicate for this query.
    pub fn filter(mut self, filter: Predicate) -> Self {
        self.query.filter = filter;
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: u64) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets the number of documents to skip.
    pub fn offset(mut self, offset: u64) -> Self {
        self.query.offset = Some(offset);
        self
    }

    /// Applies a resolved page window as skip/limit.
    pub fn window(self, window: PageWindow) -> Self {
        self.offset(window.skip).limit(window.limit)
    }

    /// Sets the sort specification for the query results.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.query.sort = Some(Sort { field: field.into(), direction });
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}

/// Walks a [`Predicate`] tree, producing a backend-specific output.
pub trait PredicateVisitor {
    type Output;
    type Error: Into<StoreError>;

    fn visit_all(&mut self) -> Result<Self::Output, Self::Error>;
    fn visit_and(&mut self, exprs: &[Predicate]) -> Result<Self::Output, Self::Error>;
    fn visit_or(&mut self, exprs: &[Predicate]) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error>;

    fn visit(&mut self, expr: &Predicate) -> Result<Self::Output, Self::Error> {
        match expr {
            Predicate::All => self.visit_all(),
            Predicate::And(exprs) => self.visit_and(exprs),
            Predicate::Or(exprs) => self.visit_or(exprs),
            Predicate::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_treats_all_as_identity() {
        let eq = Filter::eq("location", "NYC");

        assert_eq!(Filter::all().and(eq.clone()), eq);
        assert_eq!(eq.clone().and(Filter::all()), eq);
    }

    #[test]
    fn and_extends_existing_conjunction() {
        let expr = Filter::eq("a", 1).and(Filter::eq("b", 2)).and(Filter::eq("c", 3));

        match expr {
            Predicate::And(list) => assert_eq!(list.len(), 3),
            other => panic!("expected conjunction, got {other:?}"),
        }
    }

    #[test]
    fn or_extends_existing_disjunction() {
        let expr = Filter::eq("a", 1).or(Filter::eq("b", 2)).or(Filter::eq("c", 3));

        assert_eq!(
            expr,
            Filter::or([Filter::eq("a", 1), Filter::eq("b", 2), Filter::eq("c", 3)])
        );
    }

    #[test]
    fn builder_applies_page_window() {
        let query = Query::builder()
            .window(PageWindow { skip: 3, limit: 2 })
            .sort("_id", SortDirection::Asc)
            .build();

        assert_eq!(query.offset, Some(3));
        assert_eq!(query.limit, Some(2));
        assert!(query.filter.is_all());
        assert_eq!(query.sort.unwrap().field, "_id");
    }
}
