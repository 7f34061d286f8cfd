use parse_types::constants::{class_names, fields};
use parse_types::ParseValue;
use serde_json::Value;

use crate::object::ParseObject;
use crate::traits::RemoteObject;

/// A user account (`_User`).
///
/// Username and email are ordinary fields. The password is write-only: it is
/// held as a field so it can be sent on sign-up, and the server never
/// returns it. The session token is kept outside the field map.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseUser {
    object: ParseObject,
    session_token: Option<String>,
}

impl ParseUser {
    pub fn new() -> Self {
        Self {
            object: ParseObject::new(class_names::USER),
            session_token: None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.object.get_str(fields::USERNAME)
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.object
            .insert(fields::USERNAME, ParseValue::String(username.into()));
    }

    pub fn email(&self) -> Option<&str> {
        self.object.get_str(fields::EMAIL)
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.object
            .insert(fields::EMAIL, ParseValue::String(email.into()));
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.object
            .insert(fields::PASSWORD, ParseValue::String(password.into()));
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.session_token = Some(token.into());
    }

    /// Returns `true` if the user holds a session token.
    pub fn is_authenticated(&self) -> bool {
        self.session_token.is_some()
    }
}

impl Default for ParseUser {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteObject for ParseUser {
    fn object(&self) -> &ParseObject {
        &self.object
    }

    fn object_mut(&mut self) -> &mut ParseObject {
        &mut self.object
    }

    fn absorb_field(&mut self, key: &str, value: &Value) -> bool {
        match key {
            fields::SESSION_TOKEN => {
                self.session_token = value.as_str().map(str::to_owned);
                true
            }
            // Never stored from server data.
            fields::PASSWORD => true,
            _ => false,
        }
    }
}
