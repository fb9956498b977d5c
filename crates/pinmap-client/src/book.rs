// SPDX-License-Identifier: Apache-2.0

use crate::api::{AddressApi, ApiFailure, Notifier};
use pinmap_api::UpdateAddressBody;
use pinmap_model::{AddressId, AddressRecord, Candidate};
use tracing::warn;

/// Rollback command captured when an optimistic mutation is issued and
/// applied only if the remote call fails.
#[derive(Debug, Clone)]
enum Rollback {
    RestoreVisibility { id: AddressId, prior: bool },
    RestoreAll(Vec<AddressRecord>),
}

impl Rollback {
    fn apply(self, records: &mut Vec<AddressRecord>) {
        match self {
            Self::RestoreVisibility { id, prior } => {
                if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                    record.visible = prior;
                }
            }
            Self::RestoreAll(snapshot) => *records = snapshot,
        }
    }
}

/// Local mirror of the remote address collection.
///
/// Toggle, rename and delete apply locally first and roll back on a failed
/// request; add waits for the server because the server assigns the id.
/// Overlapping requests for the same record are not serialized: the last
/// response to land wins.
#[derive(Debug, Default)]
pub struct AddressBook {
    records: Vec<AddressRecord>,
}

impl AddressBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: AddressId) -> Option<&AddressRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Ids currently rendered on the map.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<AddressId> {
        self.records
            .iter()
            .filter(|r| r.visible)
            .map(|r| r.id)
            .collect()
    }

    /// Replaces local state with the server's collection.
    pub async fn refresh(&mut self, api: &dyn AddressApi) -> Result<(), ApiFailure> {
        self.records = api.list().await?;
        Ok(())
    }

    /// Flips `visible` immediately, then confirms with the server. On
    /// failure only the flag is reverted; nothing is retried.
    pub async fn toggle_visibility(
        &mut self,
        api: &dyn AddressApi,
        notifier: &dyn Notifier,
        id: AddressId,
    ) {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return;
        };
        let prior = record.visible;
        record.visible = !prior;
        let rollback = Rollback::RestoreVisibility { id, prior };

        if let Err(e) = api.update(id, &UpdateAddressBody::visibility(!prior)).await {
            warn!(id = %id, error = %e, "visibility update failed, reverting");
            rollback.apply(&mut self.records);
            notifier.error("Failed to update visibility");
        }
    }

    /// Removes the record immediately, restoring the full prior collection
    /// (original positions included) if the server refuses.
    pub async fn delete(&mut self, api: &dyn AddressApi, notifier: &dyn Notifier, id: AddressId) {
        if self.get(id).is_none() {
            return;
        }
        let rollback = Rollback::RestoreAll(self.records.clone());
        self.records.retain(|r| r.id != id);

        match api.delete(id).await {
            Ok(()) => notifier.success("Address deleted"),
            Err(e) => {
                warn!(id = %id, error = %e, "delete failed, restoring snapshot");
                rollback.apply(&mut self.records);
                notifier.error("Failed to delete address");
            }
        }
    }

    /// Renames immediately and confirms with the server. An empty or
    /// unchanged name performs no mutation and issues no request.
    pub async fn rename(
        &mut self,
        api: &dyn AddressApi,
        notifier: &dyn Notifier,
        id: AddressId,
        new_name: &str,
    ) {
        let new_name = new_name.trim();
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return;
        };
        if new_name.is_empty() || new_name == record.name {
            return;
        }
        let rollback = Rollback::RestoreAll(self.records.clone());
        if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
            record.name = new_name.to_string();
        }

        match api.update(id, &UpdateAddressBody::renamed(new_name)).await {
            Ok(_) => notifier.success("Address renamed"),
            Err(e) => {
                warn!(id = %id, error = %e, "rename failed, restoring snapshot");
                rollback.apply(&mut self.records);
                notifier.error("Failed to rename address");
            }
        }
    }

    /// Non-optimistic create: local state changes only once the server has
    /// echoed the record back with its assigned id. The error propagates so
    /// the add dialog can stay open.
    pub async fn add(
        &mut self,
        api: &dyn AddressApi,
        candidate: &Candidate,
    ) -> Result<AddressId, ApiFailure> {
        match api.create(candidate).await {
            Ok(record) => {
                let id = record.id;
                self.records.push(record);
                Ok(id)
            }
            Err(e) => {
                warn!(name = %candidate.name, error = %e, "create failed");
                Err(e)
            }
        }
    }
}
