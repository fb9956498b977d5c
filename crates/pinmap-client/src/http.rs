// SPDX-License-Identifier: Apache-2.0

use crate::api::{AddressApi, ApiFailure};
use async_trait::async_trait;
use pinmap_api::UpdateAddressBody;
use pinmap_model::{AddressId, AddressRecord, Candidate};

/// `AddressApi` over the REST surface.
pub struct HttpAddressApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAddressApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/addresses", self.base_url)
    }

    fn record_url(&self, id: AddressId) -> String {
        format!("{}/api/addresses/{id}", self.base_url)
    }
}

fn transport(e: reqwest::Error) -> ApiFailure {
    ApiFailure::new(e.to_string())
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiFailure> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiFailure::new(format!("server returned {status}")))
    }
}

#[async_trait]
impl AddressApi for HttpAddressApi {
    async fn list(&self) -> Result<Vec<AddressRecord>, ApiFailure> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(transport)?;
        check_status(response)?.json().await.map_err(transport)
    }

    async fn create(&self, candidate: &Candidate) -> Result<AddressRecord, ApiFailure> {
        let response = self
            .client
            .post(self.collection_url())
            .json(candidate)
            .send()
            .await
            .map_err(transport)?;
        check_status(response)?.json().await.map_err(transport)
    }

    async fn update(
        &self,
        id: AddressId,
        body: &UpdateAddressBody,
    ) -> Result<AddressRecord, ApiFailure> {
        let response = self
            .client
            .patch(self.record_url(id))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response)?.json().await.map_err(transport)
    }

    async fn delete(&self, id: AddressId) -> Result<(), ApiFailure> {
        let response = self
            .client
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(transport)?;
        check_status(response)?;
        Ok(())
    }
}
