// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use pinmap_api::UpdateAddressBody;
use pinmap_model::{AddressId, AddressRecord, Candidate};
use std::fmt::{Display, Formatter};

/// Single failure signal at the client boundary. Transport failures,
/// non-success statuses and malformed bodies all collapse into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub message: String,
}

impl ApiFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ApiFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation failed: {}", self.message)
    }
}

impl std::error::Error for ApiFailure {}

/// Remote address collection, as seen from the client.
#[async_trait]
pub trait AddressApi: Send + Sync {
    async fn list(&self) -> Result<Vec<AddressRecord>, ApiFailure>;
    async fn create(&self, candidate: &Candidate) -> Result<AddressRecord, ApiFailure>;
    async fn update(
        &self,
        id: AddressId,
        body: &UpdateAddressBody,
    ) -> Result<AddressRecord, ApiFailure>;
    async fn delete(&self, id: AddressId) -> Result<(), ApiFailure>;
}

/// Transient user-visible notification sink.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that only reaches the diagnostic log. Useful headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(message, "notification");
    }

    fn error(&self, message: &str) {
        tracing::warn!(message, "notification");
    }
}
