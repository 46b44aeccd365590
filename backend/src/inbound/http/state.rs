//! Shared application state handed to HTTP handlers.

use std::sync::Arc;

use crate::domain::ports::{Notifier, Storage};

/// Port implementations shared across workers via `web::Data`.
#[derive(Clone)]
pub struct HttpState {
    /// Active persistence backend.
    pub storage: Arc<dyn Storage>,
    /// Active notification sink.
    pub notifier: Arc<dyn Notifier>,
}

impl HttpState {
    /// Bundle the configured port implementations for handler injection.
    pub fn new(storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>) -> Self {
        Self { storage, notifier }
    }
}
