//! Stored document shape for users.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{NewUser, User, UserId};

pub(crate) const ID_FIELD: &str = "_id";
pub(crate) const NAME_FIELD: &str = "name";

/// One document in the users collection.
///
/// `_id` is omitted on insert so the store assigns it. The collection has no
/// schema, so a stored document missing `name` or `email` reads as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<ObjectId>,
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
}

impl From<&NewUser> for UserDocument {
    fn from(user: &NewUser) -> Self {
        Self {
            id: None,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserPersistenceError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let UserDocument { id, name, email } = document;
        let id = id.ok_or_else(|| UserPersistenceError::decode("document has no _id"))?;
        Ok(Self::new(user_id_from(id), NewUser { name, email }))
    }
}

pub(crate) fn user_id_from(id: ObjectId) -> UserId {
    UserId::from_bytes(id.bytes())
}

pub(crate) fn object_id_from(id: &UserId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}
