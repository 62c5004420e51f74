//! Bearer credential sources for outgoing requests.
//!
//! The client never acquires or refreshes credentials; it asks its
//! [`TokenProvider`] for the current token before each request.

use std::sync::RwLock;

pub trait TokenProvider: Send + Sync {
    /// The bearer token to attach, or `None` to send the request unauthenticated.
    fn bearer_token(&self) -> Option<String>;
}

/// A token fixed at construction, typically read from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A token that can be replaced at runtime, e.g. after a successful login.
#[derive(Debug, Default)]
pub struct SessionToken(RwLock<Option<String>>);

impl SessionToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts with `token`; blank tokens start empty.
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        Self(RwLock::new(token.filter(|t| !t.is_empty())))
    }

    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.0.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.0.write() {
            *slot = None;
        }
    }
}

impl TokenProvider for SessionToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.read().ok().and_then(|slot| slot.clone())
    }
}
