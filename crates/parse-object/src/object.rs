use std::any::Any;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parse_types::{ParseValue, Pointer};

use crate::error::{ObjectError, ObjectResult};
use crate::field::field_value;
use crate::traits::RemoteObject;

/// The generic remote object: a class name, server-assigned metadata and a
/// map of typed fields.
///
/// Fields only ever hold valid [`ParseValue`]s: both `put` and `put_any` run
/// the supported-type check before storing anything.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseObject {
    class_name: String,
    object_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    data: BTreeMap<String, ParseValue>,
    dirty: bool,
}

impl ParseObject {
    /// Create an empty, unsaved object of the given class.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            object_id: None,
            created_at: None,
            updated_at: None,
            data: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Class the object belongs to, e.g. `GameScore` or `_User`.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub(crate) fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = class_name.into();
    }

    /// Server-assigned identifier; `None` until saved.
    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    /// Assign the server identifier.
    pub fn set_object_id(&mut self, object_id: impl Into<String>) {
        self.object_id = Some(object_id.into());
    }

    /// When the server created the object; `None` until saved.
    pub fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }

    /// Record the server creation time.
    pub fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
    }

    /// When the server last updated the object.
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> {
        self.updated_at.as_ref()
    }

    /// Record the server update time.
    pub fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ParseValue> {
        self.data.get(key)
    }

    /// Convenience for string fields.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParseValue::as_str)
    }

    /// Set a field, rejecting values the protocol cannot carry.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<ParseValue>) -> ObjectResult<()> {
        let key = key.into();
        let value = value.into();
        if !value.is_valid() {
            return Err(ObjectError::InvalidValue {
                type_name: value.type_name(),
                key,
            });
        }
        self.insert(key, value);
        Ok(())
    }

    /// Set a field from a value of any Rust type.
    ///
    /// The value is accepted only if it is one of the supported types.
    /// Remote objects are stored as pointers and must have an object id.
    pub fn put_any(&mut self, key: impl Into<String>, value: &dyn Any) -> ObjectResult<()> {
        let key = key.into();
        let value = field_value(&key, value)?;
        self.insert(key, value);
        Ok(())
    }

    /// Store a value already known to be valid.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: ParseValue) {
        self.data.insert(key.into(), value);
        self.dirty = true;
    }

    /// Remove a field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<ParseValue> {
        let removed = self.data.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Whether a field named `key` is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Field names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Number of fields set.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no fields are set.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when there are local changes the server has not seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the object as changed or in sync with the server.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// True once any field data is present.
    pub fn is_data_available(&self) -> bool {
        !self.data.is_empty()
    }

    /// A reference to this object for storing in another object's field.
    pub fn to_pointer(&self) -> ObjectResult<Pointer> {
        let id = self
            .object_id
            .as_ref()
            .ok_or_else(|| ObjectError::MissingObjectId(self.class_name.clone()))?;
        Ok(Pointer::new(self.class_name.clone(), id.clone()))
    }
}

impl RemoteObject for ParseObject {
    fn object(&self) -> &ParseObject {
        self
    }

    fn object_mut(&mut self) -> &mut ParseObject {
        self
    }
}
