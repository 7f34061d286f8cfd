//! Parse REST SDK.
//!
//! Ties the value layer (`parse-types`) and the object layer
//! (`parse-object`) to the application's credentials. This is the main
//! entry point for applications.
//!
//! Credentials can be held explicitly in a [`ParseConfig`] handed to a
//! [`ParseClient`], or stored once per process with [`global::initialize`].

pub mod client;
pub mod config;
pub mod error;
pub mod global;

pub use client::ParseClient;
pub use config::{Credentials, ParseConfig};
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use parse_object::{
    is_valid_type, ObjectRegistry, ParseObject, ParseRole, ParseUser, Persistable, RemoteObject,
};
pub use parse_types::{
    decode_date, encode_date, GeoPoint, Null, ParseFile, ParseRelation, ParseValue,
    Pointer,
};
