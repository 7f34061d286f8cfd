//! Names the backend assigns special meaning to.

/// Base URL of the hosted REST API.
pub const API_ENDPOINT: &str = "https://api.parse.com";
/// REST API version segment.
pub const API_VERSION: &str = "1";

/// Class names of the built-in object classes.
pub mod class_names {
    pub const USER: &str = "_User";
    pub const ROLE: &str = "_Role";
    pub const SESSION: &str = "_Session";
    pub const INSTALLATION: &str = "_Installation";
}

/// Endpoint aliases under which the built-in classes are addressed.
pub mod endpoints {
    pub const USERS: &str = "users";
    pub const ROLES: &str = "roles";
    pub const SESSIONS: &str = "sessions";
    pub const INSTALLATIONS: &str = "installations";
}

/// Field names used in object JSON.
pub mod fields {
    pub const OBJECT_ID: &str = "objectId";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const CLASS_NAME: &str = "className";
    pub const TYPE: &str = "__type";

    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const EMAIL: &str = "email";
    pub const SESSION_TOKEN: &str = "sessionToken";

    pub const NAME: &str = "name";
    pub const USERS: &str = "users";
    pub const ROLES: &str = "roles";
}

/// Header names carrying the application credentials.
pub mod headers {
    pub const APPLICATION_ID: &str = "X-Parse-Application-Id";
    pub const CLIENT_KEY: &str = "X-Parse-Client-Key";
}

/// `__type` discriminators of typed JSON values.
pub mod type_tags {
    pub const DATE: &str = "Date";
    pub const BYTES: &str = "Bytes";
    pub const POINTER: &str = "Pointer";
    pub const FILE: &str = "File";
    pub const GEO_POINT: &str = "GeoPoint";
    pub const RELATION: &str = "Relation";
}
