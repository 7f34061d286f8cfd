use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to another remote object by class name and object id.
///
/// This is how a nested object travels on the wire; the referenced object's
/// fields are not carried.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pointer {
    #[serde(rename = "className")]
    pub class_name: String,
    #[serde(rename = "objectId")]
    pub object_id: String,
}

impl Pointer {
    pub fn new(class_name: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            object_id: object_id.into(),
        }
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pointer({}/{})", self.class_name, self.object_id)
    }
}

/// Reference to a file stored by the backend.
///
/// `url` is absent until the file has been uploaded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ParseFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }

    /// Returns `true` once the backend has assigned a URL.
    pub fn is_uploaded(&self) -> bool {
        self.url.is_some()
    }
}

/// A many-to-many relation from an object field to objects of one class.
///
/// The target class is learned from the server and may be unknown for a
/// freshly created relation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseRelation {
    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub target_class: Option<String>,
}

impl ParseRelation {
    pub fn new(target_class: impl Into<String>) -> Self {
        Self {
            target_class: Some(target_class.into()),
        }
    }

    /// A relation whose target class is not yet known.
    pub fn untyped() -> Self {
        Self::default()
    }
}
