use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use parse_types::constants::{class_names, endpoints};
use tracing::{debug, trace};

use crate::object::ParseObject;
use crate::role::ParseRole;
use crate::traits::RemoteObject;
use crate::user::ParseUser;

/// Builds an object instance for a class-name tag. The tag is passed so a
/// single constructor can serve several classes.
pub type ObjectConstructor = Arc<dyn Fn(&str) -> Box<dyn RemoteObject> + Send + Sync>;

struct Entries {
    by_tag: HashMap<String, ObjectConstructor>,
    default: ObjectConstructor,
}

/// Class-name tag → constructor table used to instantiate server data.
///
/// The registry always holds a default constructor, so [`create`] never
/// fails: tags with no entry of their own produce a generic
/// [`ParseObject`] stamped with the tag. Registering a tag again replaces
/// its constructor.
///
/// Registration is expected at start-up; lookups take a read lock and may
/// run from any number of threads.
///
/// [`create`]: ObjectRegistry::create
pub struct ObjectRegistry {
    entries: RwLock<Entries>,
}

impl ObjectRegistry {
    /// A registry with only the generic default entry.
    pub fn empty() -> Self {
        Self {
            entries: RwLock::new(Entries {
                by_tag: HashMap::new(),
                default: Arc::new(|class_name: &str| -> Box<dyn RemoteObject> {
                    Box::new(ParseObject::new(class_name))
                }),
            }),
        }
    }

    /// A registry seeded with the built-in user and role classes, each under
    /// both its endpoint alias and its class name.
    pub fn with_defaults() -> Self {
        let registry = Self::empty();
        for tag in [endpoints::USERS, class_names::USER] {
            registry.register(tag, |_: &str| -> Box<dyn RemoteObject> {
                Box::new(ParseUser::new())
            });
        }
        for tag in [endpoints::ROLES, class_names::ROLE] {
            registry.register(tag, |_: &str| -> Box<dyn RemoteObject> {
                Box::new(ParseRole::new())
            });
        }
        registry
    }

    /// The process-wide registry, seeded with the built-ins on first use.
    pub fn global() -> &'static ObjectRegistry {
        static GLOBAL: OnceLock<ObjectRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_defaults)
    }

    /// Register `constructor` for `tag`, replacing any previous entry.
    pub fn register<F>(&self, tag: impl Into<String>, constructor: F)
    where
        F: Fn(&str) -> Box<dyn RemoteObject> + Send + Sync + 'static,
    {
        let tag = tag.into();
        debug!(tag = %tag, "registering object constructor");
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.by_tag.insert(tag, Arc::new(constructor));
    }

    /// Replace the constructor used for tags with no entry of their own.
    pub fn register_default<F>(&self, constructor: F)
    where
        F: Fn(&str) -> Box<dyn RemoteObject> + Send + Sync + 'static,
    {
        debug!("replacing default object constructor");
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.default = Arc::new(constructor);
    }

    /// Remove the entry for `tag`. Returns `true` if one existed.
    pub fn unregister(&self, tag: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.by_tag.remove(tag).is_some()
    }

    /// Returns `true` if `tag` has its own entry (the default does not count).
    pub fn is_registered(&self, tag: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.by_tag.contains_key(tag)
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut tags: Vec<String> = entries.by_tag.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Instantiate the object type registered for `class_name`, falling back
    /// to the default constructor.
    pub fn create(&self, class_name: &str) -> Box<dyn RemoteObject> {
        // Clone the constructor out so it runs without the lock held.
        let constructor = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.by_tag.get(class_name) {
                Some(constructor) => Arc::clone(constructor),
                None => {
                    trace!(class_name, "no registered constructor, using default");
                    Arc::clone(&entries.default)
                }
            }
        };
        constructor(class_name)
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
