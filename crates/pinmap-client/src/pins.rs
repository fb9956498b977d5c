// SPDX-License-Identifier: Apache-2.0

use pinmap_model::AddressId;
use std::collections::BTreeSet;

/// Why a popup close happened. Threaded through every close so reconciling
/// the pinned set never mistakes its own closes for user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The user dismissed the popup.
    User,
    /// The reconciler closed it to match the pinned set.
    Reconcile,
}

/// The map layer holding markers and their popups.
///
/// `close` must deliver the given reason back through whatever closed-event
/// path the host has, so `PinBoard::handle_popup_closed` sees it.
pub trait PopupHost {
    fn marker_ids(&self) -> Vec<AddressId>;
    fn is_open(&self, id: AddressId) -> bool;
    fn open(&mut self, id: AddressId);
    fn close(&mut self, id: AddressId, reason: CloseReason);
}

/// Pinned-popup state: which markers are held open, and whether the
/// persistent-label mode is active at all.
#[derive(Debug, Default)]
pub struct PinBoard {
    pinned: BTreeSet<AddressId>,
    persistent: bool,
}

impl PinBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn persistent(&self) -> bool {
        self.persistent
    }

    #[must_use]
    pub fn is_pinned(&self, id: AddressId) -> bool {
        self.pinned.contains(&id)
    }

    #[must_use]
    pub fn pinned(&self) -> &BTreeSet<AddressId> {
        &self.pinned
    }

    /// Turning the mode on pins nothing by itself; turning it off clears
    /// the pinned set and force-closes every open popup.
    pub fn set_persistent(&mut self, on: bool, host: &mut dyn PopupHost) {
        if self.persistent == on {
            return;
        }
        self.persistent = on;
        if !on {
            self.pinned.clear();
        }
        self.reconcile(host);
    }

    /// A marker click while the mode is on toggles pinned membership.
    pub fn marker_clicked(&mut self, id: AddressId, host: &mut dyn PopupHost) {
        if !self.persistent {
            return;
        }
        if !self.pinned.remove(&id) {
            self.pinned.insert(id);
        }
        self.reconcile(host);
    }

    /// Closed-event sink. A user close while the mode is on unpins that
    /// address; reconciler closes must not.
    pub fn handle_popup_closed(&mut self, id: AddressId, reason: CloseReason) {
        if reason == CloseReason::User && self.persistent {
            self.pinned.remove(&id);
        }
    }

    /// Drives popups to match the pinned set: opens every pinned marker
    /// whose popup is shut, closes every open popup that is not pinned.
    pub fn reconcile(&self, host: &mut dyn PopupHost) {
        for id in host.marker_ids() {
            let pinned = self.pinned.contains(&id);
            let open = host.is_open(id);
            if pinned && !open {
                host.open(id);
            } else if !pinned && open {
                host.close(id, CloseReason::Reconcile);
            }
        }
    }
}
