//! Remote objects for the Parse REST SDK.
//!
//! Server data is turned into objects through an [`ObjectRegistry`]: the
//! class-name tag the server reports picks a constructor, and unknown tags
//! fall back to the generic [`ParseObject`]. Built-in specializations are
//! [`ParseUser`] and [`ParseRole`]; applications register their own types
//! the same way.
//!
//! # Object Types
//!
//! - [`ParseObject`] -- class name, metadata and a map of typed fields
//! - [`ParseUser`] -- `_User`, addressed as `users` or `_User`
//! - [`ParseRole`] -- `_Role`, addressed as `roles` or `_Role`
//!
//! Every type implements [`RemoteObject`], which exposes the base object so
//! generic code works on all of them; `downcast_ref` recovers the concrete
//! type.
//!
//! # Design Rules
//!
//! 1. Creation never fails: the registry always has a default constructor.
//! 2. Fields hold only values the wire protocol can carry; remote objects
//!    are stored as pointers.
//! 3. Decoded objects start clean; local edits mark them dirty.

pub mod decode;
pub mod error;
pub mod field;
pub mod object;
pub mod registry;
pub mod role;
pub mod traits;
pub mod user;

// Re-export primary types at crate root for ergonomic imports.
pub use decode::{apply_json, decode_object};
pub use error::{ObjectError, ObjectResult};
pub use field::is_valid_type;
pub use object::ParseObject;
pub use registry::{ObjectConstructor, ObjectRegistry};
pub use role::ParseRole;
pub use traits::{AsAny, Persistable, RemoteObject};
pub use user::ParseUser;
