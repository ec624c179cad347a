//! Translation from jobstore predicates to MongoDB filter documents.

use bson::{Bson, Document, doc};

use jobstore_core::{
    error::StoreError,
    query::{FieldOp, Predicate, PredicateVisitor},
};

/// Translates predicates into MongoDB's native filter syntax.
pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    /// Translates a whole predicate tree.
    pub(crate) fn translate(expr: &Predicate) -> Result<Document, StoreError> {
        MongoQueryTranslator.visit(expr)
    }
}

impl PredicateVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = StoreError;

    fn visit_all(&mut self) -> Result<Self::Output, Self::Error> {
        Ok(doc! {})
    }

    fn visit_and(&mut self, exprs: &[Predicate]) -> Result<Self::Output, Self::Error> {
        // MongoDB rejects an empty $and, and an empty conjunction restricts nothing.
        if exprs.is_empty() {
            return Ok(doc! {});
        }

        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_or(&mut self, exprs: &[Predicate]) -> Result<Self::Output, Self::Error> {
        // An empty disjunction matches nothing.
        if exprs.is_empty() {
            return Ok(doc! { "_id": { "$exists": false } });
        }

        Ok(doc! {
            "$or": exprs
                .iter()
                .map(|expr| self.visit(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Bson,
    ) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::Contains => match value {
                    Bson::String(s) => doc! { "$regex": regex::escape(s), "$options": "i" },
                    Bson::Array(arr) => doc! { "$all": arr },
                    _ => return Err(StoreError::Query(
                        "Contains operator requires a string or array value".to_string(),
                    )),
                },
            }
        })
    }
}
