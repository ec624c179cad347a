//! Core traits for entity representation and serialization.
//!
//! An entity is a schema-defined record stored one-to-one with a document in a
//! homogeneous collection. The store assigns its identifier on insert; entities
//! carry it back in an optional `_id` field once they have been read.

use bson::{Bson, Document as BsonDocument, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Name of the identifier field every stored document carries.
pub const ID_FIELD: &str = "_id";

/// Core trait that all entities stored through a typed collection must implement.
///
/// # Example
///
/// ```ignore
/// use jobstore_core::document::Document;
/// use bson::oid::ObjectId;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// pub struct User {
///     #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
///     pub id: Option<ObjectId>,
///     pub username: String,
/// }
///
/// impl Document for User {
///     fn collection_name() -> &'static str {
///         "users"
///     }
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the default collection name for this entity type.
    ///
    /// Deployments may still bind the entity to another collection through
    /// [`Connection::typed_collection_named`](crate::connection::Connection::typed_collection_named).
    fn collection_name() -> &'static str;
}

/// Extension trait converting entities to and from BSON.
///
/// Automatically implemented for every [`Document`].
pub trait DocumentExt: Document {
    /// Serializes this entity into a BSON document ready for insertion.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the entity does not serialize to a document.
    fn to_bson_document(&self) -> StoreResult<BsonDocument>;

    /// Creates an entity from a stored BSON value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if the value does not match the entity schema.
    fn from_bson(bson: Bson) -> StoreResult<Self>;
}

impl<D: Document> DocumentExt for D {
    fn to_bson_document(&self) -> StoreResult<BsonDocument> {
        match serialize_to_bson(self)? {
            Bson::Document(document) => Ok(document),
            other => Err(StoreError::Serialization(format!(
                "expected a document for collection {}, got {:?}",
                D::collection_name(),
                other.element_type(),
            ))),
        }
    }

    fn from_bson(bson: Bson) -> StoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
        id: Option<ObjectId>,
        text: String,
    }

    impl Document for Note {
        fn collection_name() -> &'static str {
            "notes"
        }
    }

    #[test]
    fn unsaved_entity_serializes_without_id() {
        let doc = Note { id: None, text: "hello".into() }
            .to_bson_document()
            .unwrap();

        assert!(!doc.contains_key(ID_FIELD));
        assert_eq!(doc.get_str("text").unwrap(), "hello");
    }

    #[test]
    fn stored_document_deserializes_with_id() {
        let id = ObjectId::new();
        let note = Note::from_bson(Bson::Document(bson::doc! { "_id": id, "text": "x" })).unwrap();

        assert_eq!(note.id, Some(id));
    }

    #[test]
    fn schema_mismatch_is_a_serialization_error() {
        let err = Note::from_bson(Bson::Document(bson::doc! { "text": 5 })).unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
