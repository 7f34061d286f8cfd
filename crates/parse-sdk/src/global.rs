//! Process-wide application credentials.
//!
//! For callers that prefer initializing once at start-up over passing a
//! [`ParseConfig`](crate::ParseConfig) around. The pair is stored as one
//! `Arc` and replaced as a unit, so readers see either the old or the new
//! credentials, never a mix.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::config::Credentials;

static CREDENTIALS: RwLock<Option<Arc<Credentials>>> = RwLock::new(None);

/// Store the application credentials, replacing any previous ones.
///
/// Contents are not validated.
pub fn initialize(application_id: impl Into<String>, client_key: impl Into<String>) {
    let credentials = Arc::new(Credentials::new(application_id, client_key));
    debug!(application_id = %credentials.application_id, "initializing global credentials");
    *CREDENTIALS.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials);
}

/// The current credentials, or `None` if [`initialize`] was never called.
pub fn credentials() -> Option<Arc<Credentials>> {
    CREDENTIALS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

pub fn application_id() -> Option<String> {
    credentials().map(|c| c.application_id.clone())
}

pub fn client_key() -> Option<String> {
    credentials().map(|c| c.client_key.clone())
}

pub fn is_initialized() -> bool {
    credentials().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use std::thread;

    // The holder is process-wide, so everything touching it lives in this
    // one test.
    #[test]
    fn lifecycle() {
        assert!(!is_initialized());
        assert_eq!(application_id(), None);
        assert_eq!(client_key(), None);

        initialize("app-1", "key-1");
        assert_eq!(application_id().as_deref(), Some("app-1"));
        assert_eq!(client_key().as_deref(), Some("key-1"));

        // Later calls overwrite; empty strings are accepted as-is.
        initialize("", "key-2");
        assert_eq!(application_id().as_deref(), Some(""));
        assert_eq!(client_key().as_deref(), Some("key-2"));

        ParseConfig::new("app-3", "key-3").install_global();
        assert_eq!(credentials().as_deref(), Some(&Credentials::new("app-3", "key-3")));

        // Concurrent readers only ever see a complete pair.
        let writers: Vec<_> = (0..4)
            .map(|i| thread::spawn(move || initialize(format!("app-{i}"), format!("key-{i}"))))
            .collect();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                thread::spawn(|| {
                    for _ in 0..100 {
                        let c = credentials().unwrap();
                        let app = c.application_id.trim_start_matches("app-");
                        let key = c.client_key.trim_start_matches("key-");
                        assert_eq!(app, key);
                    }
                })
            })
            .collect();
        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
        assert!(is_initialized());
    }
}
