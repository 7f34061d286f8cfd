//! Value types for the Parse REST SDK.
//!
//! This crate defines everything that can travel inside a Parse object field
//! and the rules for putting it on the wire. Every other SDK crate depends on
//! `parse-types`.
//!
//! # Key Types
//!
//! - [`ParseValue`] — Closed set of values the protocol can transport
//! - [`is_valid_type`] — Dynamic gate deciding whether an arbitrary Rust value is transportable
//! - [`encode_date`] / [`decode_date`] — Wire date codec (`yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`)
//! - [`GeoPoint`] — Latitude/longitude pair
//! - [`Pointer`] — Reference to another remote object
//! - [`ParseFile`] — Reference to an uploaded file
//! - [`ParseRelation`] — Many-to-many relation to objects of another class

pub mod constants;
pub mod date;
pub mod error;
pub mod geo;
pub mod reference;
pub mod value;

pub use date::{decode_date, encode_date, DATE_FORMAT};
pub use error::{TypeError, TypeResult};
pub use geo::GeoPoint;
pub use reference::{ParseFile, ParseRelation, Pointer};
pub use value::{is_valid_type, Null, Number, ParseValue};
