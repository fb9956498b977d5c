// SPDX-License-Identifier: Apache-2.0

use pinmap_client::{CloseReason, PinBoard, PopupHost};
use pinmap_model::AddressId;
use std::collections::BTreeSet;

/// Marker layer double that records every close with its reason.
struct FakeHost {
    markers: Vec<AddressId>,
    open: BTreeSet<AddressId>,
    closes: Vec<(AddressId, CloseReason)>,
}

impl FakeHost {
    fn new(ids: &[u64]) -> Self {
        Self {
            markers: ids.iter().copied().map(AddressId::new).collect(),
            open: BTreeSet::new(),
            closes: Vec::new(),
        }
    }
}

impl PopupHost for FakeHost {
    fn marker_ids(&self) -> Vec<AddressId> {
        self.markers.clone()
    }

    fn is_open(&self, id: AddressId) -> bool {
        self.open.contains(&id)
    }

    fn open(&mut self, id: AddressId) {
        self.open.insert(id);
    }

    fn close(&mut self, id: AddressId, reason: CloseReason) {
        self.open.remove(&id);
        self.closes.push((id, reason));
    }
}

const A: AddressId = AddressId::new(1);
const B: AddressId = AddressId::new(2);

#[test]
fn enabling_persistent_mode_pins_nothing() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.set_persistent(true, &mut host);
    assert!(board.pinned().is_empty());
    assert!(host.open.is_empty());
}

#[test]
fn pinning_two_markers_keeps_both_open() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.set_persistent(true, &mut host);
    board.marker_clicked(A, &mut host);
    board.marker_clicked(B, &mut host);
    assert!(host.is_open(A));
    assert!(host.is_open(B));
    assert_eq!(board.pinned().len(), 2);
}

#[test]
fn unpinning_one_marker_closes_only_its_popup() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.set_persistent(true, &mut host);
    board.marker_clicked(A, &mut host);
    board.marker_clicked(B, &mut host);

    board.marker_clicked(A, &mut host);

    assert!(!host.is_open(A));
    assert!(host.is_open(B));
    assert!(!board.is_pinned(A));
    assert!(board.is_pinned(B));
}

#[test]
fn disabling_persistent_mode_closes_everything_and_clears_set() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.set_persistent(true, &mut host);
    board.marker_clicked(A, &mut host);
    board.marker_clicked(B, &mut host);

    board.set_persistent(false, &mut host);

    assert!(host.open.is_empty());
    assert!(board.pinned().is_empty());
    assert!(host
        .closes
        .iter()
        .all(|(_, reason)| *reason == CloseReason::Reconcile));
}

#[test]
fn user_close_unpins_only_that_address() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.set_persistent(true, &mut host);
    board.marker_clicked(A, &mut host);
    board.marker_clicked(B, &mut host);

    // The user dismisses A's popup directly on the map.
    host.close(A, CloseReason::User);
    board.handle_popup_closed(A, CloseReason::User);

    assert!(!board.is_pinned(A));
    assert!(board.is_pinned(B));
    assert!(host.is_open(B));
}

#[test]
fn reconcile_closes_do_not_unpin() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.set_persistent(true, &mut host);
    board.marker_clicked(A, &mut host);

    // The host echoes a reconciler-issued close back as an event.
    board.handle_popup_closed(A, CloseReason::Reconcile);

    assert!(board.is_pinned(A));
}

#[test]
fn clicks_without_persistent_mode_pin_nothing() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.marker_clicked(A, &mut host);
    assert!(board.pinned().is_empty());
    assert!(!host.is_open(A));
}

#[test]
fn user_close_with_mode_off_is_ignored() {
    let mut board = PinBoard::new();
    board.handle_popup_closed(A, CloseReason::User);
    assert!(board.pinned().is_empty());
}

#[test]
fn reconcile_reopens_externally_closed_pinned_popups() {
    let mut host = FakeHost::new(&[1, 2]);
    let mut board = PinBoard::new();
    board.set_persistent(true, &mut host);
    board.marker_clicked(A, &mut host);

    // Something else shut the popup without unpinning.
    host.open.remove(&A);
    board.reconcile(&mut host);

    assert!(host.is_open(A));
}
