//! Supported-type check for values entering object fields.
//!
//! Extends the value-level gate with remote objects, which a field stores
//! as a pointer to the object.

use std::any::Any;

use parse_types::ParseValue;

use crate::error::{ObjectError, ObjectResult};
use crate::object::ParseObject;
use crate::role::ParseRole;
use crate::traits::RemoteObject;
use crate::user::ParseUser;

/// Returns `true` if `value` can be stored in an object field.
///
/// Remote objects count as supported whether or not they have been saved;
/// storing an unsaved one still fails for lack of an object id.
pub fn is_valid_type(value: &dyn Any) -> bool {
    remote_object(value).is_some() || parse_types::is_valid_type(value)
}

/// Convert a caller value into what a field stores under `key`.
pub(crate) fn field_value(key: &str, value: &dyn Any) -> ObjectResult<ParseValue> {
    if let Some(object) = remote_object(value) {
        return Ok(ParseValue::Pointer(object.to_pointer()?));
    }
    ParseValue::from_any(value).ok_or_else(|| ObjectError::UnsupportedType {
        key: key.to_owned(),
    })
}

/// The base object of a remote object passed by value or as a trait object.
fn remote_object(value: &dyn Any) -> Option<&ParseObject> {
    if let Some(object) = value.downcast_ref::<ParseObject>() {
        return Some(object);
    }
    if let Some(user) = value.downcast_ref::<ParseUser>() {
        return Some(user.object());
    }
    if let Some(role) = value.downcast_ref::<ParseRole>() {
        return Some(role.object());
    }
    value
        .downcast_ref::<Box<dyn RemoteObject>>()
        .map(|boxed| boxed.object())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ObjectRegistry;

    fn saved(class_name: &str, id: &str) -> ParseObject {
        let mut obj = ParseObject::new(class_name);
        obj.set_object_id(id);
        obj
    }

    #[test]
    fn remote_objects_are_supported() {
        assert!(is_valid_type(&saved("Player", "p1")));
        assert!(is_valid_type(&ParseUser::new()));
        assert!(is_valid_type(&ParseRole::with_name("Admins").unwrap()));
        let boxed: Box<dyn RemoteObject> = ObjectRegistry::with_defaults().create("GameScore");
        assert!(is_valid_type(&boxed));
    }

    #[test]
    fn plain_values_use_the_value_gate() {
        struct Opaque;
        assert!(is_valid_type(&vec!["a", "b"]));
        assert!(is_valid_type(&42i64));
        assert!(!is_valid_type(&Opaque));
    }

    #[test]
    fn remote_objects_become_pointers() {
        let value = field_value("owner", &saved("Player", "p1")).unwrap();
        assert_eq!(
            value.as_pointer().map(|p| (p.class_name.as_str(), p.object_id.as_str())),
            Some(("Player", "p1"))
        );

        let mut boxed: Box<dyn RemoteObject> = ObjectRegistry::with_defaults().create("users");
        boxed.object_mut().set_object_id("u1");
        let value = field_value("author", &boxed).unwrap();
        assert_eq!(
            value.as_pointer().map(|p| p.class_name.as_str()),
            Some("_User")
        );
    }

    #[test]
    fn unsaved_remote_object_needs_an_id() {
        let err = field_value("owner", &ParseObject::new("Player")).unwrap_err();
        assert!(matches!(err, ObjectError::MissingObjectId(ref class) if class == "Player"));
    }

    #[test]
    fn unsupported_value_names_the_key() {
        let err = field_value("c", &'c').unwrap_err();
        assert!(matches!(err, ObjectError::UnsupportedType { ref key } if key == "c"));
    }
}
