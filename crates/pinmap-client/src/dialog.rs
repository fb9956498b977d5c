// SPDX-License-Identifier: Apache-2.0

use crate::api::{AddressApi, Notifier};
use crate::book::AddressBook;
use pinmap_model::Candidate;

/// What the dialog should do after a confirm attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Close,
    KeepOpen,
}

/// Add-address dialog state: at most one geocoded candidate at a time.
#[derive(Debug, Default)]
pub struct AddDialog {
    selected: Option<Candidate>,
}

impl AddDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.as_ref()
    }

    /// Picking a new autocomplete result replaces any earlier selection.
    pub fn select(&mut self, candidate: Candidate) {
        self.selected = Some(candidate);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Hands the selected candidate to the address book. On success the
    /// selection is cleared and the dialog closes; on failure the candidate
    /// is kept and the dialog stays open with its own error surfaced.
    pub async fn confirm(
        &mut self,
        book: &mut AddressBook,
        api: &dyn AddressApi,
        notifier: &dyn Notifier,
    ) -> ConfirmOutcome {
        let Some(candidate) = self.selected.clone() else {
            return ConfirmOutcome::KeepOpen;
        };
        match book.add(api, &candidate).await {
            Ok(_) => {
                self.selected = None;
                notifier.success("Address added");
                ConfirmOutcome::Close
            }
            Err(_) => {
                notifier.error("Failed to add address");
                ConfirmOutcome::KeepOpen
            }
        }
    }
}
