use parse_types::constants::{class_names, fields};
use parse_types::{ParseRelation, ParseValue};

use crate::error::{ObjectError, ObjectResult};
use crate::object::ParseObject;
use crate::traits::RemoteObject;

/// A named group of users (`_Role`) used for access control.
///
/// A role relates to the users it contains and to child roles whose members
/// inherit its permissions.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseRole {
    object: ParseObject,
}

impl ParseRole {
    pub fn new() -> Self {
        Self {
            object: ParseObject::new(class_names::ROLE),
        }
    }

    /// Create an unsaved role with the given name.
    pub fn with_name(name: impl Into<String>) -> ObjectResult<Self> {
        let mut role = Self::new();
        role.set_name(name)?;
        Ok(role)
    }

    pub fn name(&self) -> Option<&str> {
        self.object.get_str(fields::NAME)
    }

    /// Set the role name. The name is fixed once the role has been saved.
    pub fn set_name(&mut self, name: impl Into<String>) -> ObjectResult<()> {
        let name = name.into();
        if self.object.object_id().is_some() && self.name().is_some() {
            return Err(ObjectError::RoleNameImmutable);
        }
        if !is_valid_role_name(&name) {
            return Err(ObjectError::InvalidRoleName(name));
        }
        self.object.insert(fields::NAME, ParseValue::String(name));
        Ok(())
    }

    /// The users belonging to this role.
    pub fn users(&self) -> ParseRelation {
        self.relation(fields::USERS, class_names::USER)
    }

    /// The child roles inheriting this role's permissions.
    pub fn roles(&self) -> ParseRelation {
        self.relation(fields::ROLES, class_names::ROLE)
    }

    fn relation(&self, key: &str, target_class: &str) -> ParseRelation {
        self.object
            .get(key)
            .and_then(ParseValue::as_relation)
            .cloned()
            .unwrap_or_else(|| ParseRelation::new(target_class))
    }
}

impl Default for ParseRole {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteObject for ParseRole {
    fn object(&self) -> &ParseObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ParseObject {
        &mut self.object
    }
}

fn is_valid_role_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_role_has_role_class() {
        let role = ParseRole::new();
        assert_eq!(role.object().class_name(), "_Role");
        assert_eq!(role.name(), None);
    }

    #[test]
    fn valid_names() {
        for name in ["Administrators", "moderators_2", "Power Users", "a-b"] {
            let role = ParseRole::with_name(name).unwrap();
            assert_eq!(role.name(), Some(name));
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", "admins!", "r\u{f4}le", "a/b"] {
            assert!(matches!(
                ParseRole::with_name(name),
                Err(ObjectError::InvalidRoleName(_))
            ));
        }
    }

    #[test]
    fn name_is_fixed_after_save() {
        let mut role = ParseRole::with_name("Moderators").unwrap();
        role.set_name("Mods").unwrap();
        role.object_mut().set_object_id("r1");
        assert!(matches!(role.set_name("Other"), Err(ObjectError::RoleNameImmutable)));
        assert_eq!(role.name(), Some("Mods"));
    }

    #[test]
    fn relations_default_to_expected_targets() {
        let role = ParseRole::new();
        assert_eq!(role.users().target_class.as_deref(), Some("_User"));
        assert_eq!(role.roles().target_class.as_deref(), Some("_Role"));
    }
}
