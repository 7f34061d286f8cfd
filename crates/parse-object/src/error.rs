use parse_types::TypeError;

/// Errors from object field access and decoding.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// The value's Rust type is not one the protocol can transport.
    #[error("unsupported value type for field `{key}`")]
    UnsupportedType { key: String },

    /// The value has a supported type but cannot be transported
    /// (e.g. a NaN float).
    #[error("invalid {type_name} value for field `{key}`")]
    InvalidValue { key: String, type_name: &'static str },

    /// The operation needs a saved object.
    #[error("object of class {0} has no object id")]
    MissingObjectId(String),

    /// Role names are restricted to alphanumerics, `_`, `-` and spaces.
    #[error("invalid role name: {0:?}")]
    InvalidRoleName(String),

    /// A saved role keeps its name.
    #[error("role name cannot be changed once the role is saved")]
    RoleNameImmutable,

    /// Server data for an object must be a JSON object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A metadata field has the wrong shape.
    #[error("malformed field `{key}`: {reason}")]
    MalformedField { key: String, reason: String },

    /// A field value could not be decoded.
    #[error("value error: {0}")]
    Type(#[from] TypeError),
}

/// Result alias for object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;
