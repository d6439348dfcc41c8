//! Typed query filters for the users collection.
//!
//! Each repository operation names its filter here instead of assembling
//! ad-hoc documents, so field names live in one place.

use mongodb::bson::Document;
use mongodb::bson::oid::ObjectId;

use super::documents::{ID_FIELD, NAME_FIELD};

/// Selection applied to the users collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UserFilter<'a> {
    /// Every document.
    All,
    /// Documents whose `name` equals the value exactly.
    ByName(&'a str),
    /// The document with this identifier.
    ById(ObjectId),
}

impl UserFilter<'_> {
    pub(crate) fn into_document(self) -> Document {
        let mut filter = Document::new();
        match self {
            Self::All => {}
            Self::ByName(name) => {
                filter.insert(NAME_FIELD, name);
            }
            Self::ById(id) => {
                filter.insert(ID_FIELD, id);
            }
        }
        filter
    }
}
