use std::any::Any;
use std::fmt;

use serde_json::Value;

use crate::object::ParseObject;

/// Upcast to `Any` so trait objects can be downcast to their concrete type.
///
/// Blanket-implemented for every `'static` type; implementors of
/// [`RemoteObject`] never write it by hand.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A remote object: the generic [`ParseObject`] or one of its
/// specializations.
///
/// Every implementation exposes its base object, so code written against
/// the generic shape works unchanged on users, roles and custom types.
/// Implementations must be cheap to construct: the registry builds one for
/// every object the server returns.
pub trait RemoteObject: AsAny + Send + Sync + fmt::Debug {
    /// The base object holding class name, metadata and fields.
    fn object(&self) -> &ParseObject;

    /// Mutable access to the base object.
    fn object_mut(&mut self) -> &mut ParseObject;

    /// Offer a server field to the specialization before it is stored as a
    /// plain field. Return `true` if the field was consumed.
    ///
    /// The default consumes nothing.
    fn absorb_field(&mut self, _key: &str, _value: &Value) -> bool {
        false
    }
}

impl dyn RemoteObject {
    /// The class name of the underlying object.
    pub fn class_name(&self) -> &str {
        self.object().class_name()
    }

    /// Returns `true` if the concrete type is `T`.
    pub fn is<T: RemoteObject>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    pub fn downcast_ref<T: RemoteObject>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }

    pub fn downcast_mut<T: RemoteObject>(&mut self) -> Option<&mut T> {
        AsAny::as_any_mut(self).downcast_mut::<T>()
    }

    /// Take ownership of the concrete type. Returns `None` if the object is
    /// not a `T`.
    pub fn downcast<T: RemoteObject>(self: Box<Self>) -> Option<Box<T>> {
        AsAny::into_any(self).downcast::<T>().ok()
    }
}

/// An entity that tracks whether it has unsaved changes.
///
/// Saving is the transport layer's job; this only records state.
pub trait Persistable {
    /// `true` if a change has been made that has not been saved.
    fn is_dirty(&self) -> bool;

    fn set_dirty(&mut self, dirty: bool);

    /// `true` if the entity holds any field data, saved or not.
    fn is_data_available(&self) -> bool;
}

impl<T: RemoteObject + ?Sized> Persistable for T {
    fn is_dirty(&self) -> bool {
        self.object().is_dirty()
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.object_mut().set_dirty(dirty);
    }

    fn is_data_available(&self) -> bool {
        self.object().is_data_available()
    }
}
