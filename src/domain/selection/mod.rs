// SPDX-License-Identifier: MPL-2.0
//! Multi-selection state machine.
//!
//! Every item id is either in the [`SelectionSet`] or not; there is no
//! intermediate state. The set is shared by all category tabs and is only
//! mutated from user input, never from fetch completions.
//!
//! # Tap dispatch
//!
//! | selection | item      | action                   |
//! |-----------|-----------|--------------------------|
//! | empty     | leaf      | [`TapAction::OpenPreview`] |
//! | empty     | container | [`TapAction::Navigate`]    |
//! | non-empty | leaf      | [`TapAction::Toggled`]     |
//! | non-empty | container | [`TapAction::Ignored`]     |

use crate::domain::media::{ItemId, MediaItem};
use std::collections::HashSet;
use std::path::PathBuf;

/// Outcome of a tap or long press on an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapAction {
    /// The item's membership was flipped; `selected` is the new membership.
    Toggled { id: ItemId, selected: bool },
    /// Show the item in the picker's preview.
    OpenPreview(ItemId),
    /// Browse into the container at this path.
    Navigate(PathBuf),
    /// Nothing happens (e.g. tapping a folder while selecting).
    Ignored,
}

/// Set of selected item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ItemId>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns the new membership.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops every id for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&ItemId) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }

    /// Interprets a tap on `item` according to the current selection.
    pub fn tap(&mut self, item: &MediaItem) -> TapAction {
        match (self.is_empty(), item.is_container) {
            (true, false) => TapAction::OpenPreview(item.id.clone()),
            (true, true) => TapAction::Navigate(item.path.clone()),
            (false, false) => self.toggle_item(item),
            (false, true) => TapAction::Ignored,
        }
    }

    /// Interprets a long press: toggles leaves regardless of selection state.
    pub fn long_press(&mut self, item: &MediaItem) -> TapAction {
        if item.is_container {
            return TapAction::Ignored;
        }
        self.toggle_item(item)
    }

    fn toggle_item(&mut self, item: &MediaItem) -> TapAction {
        let selected = self.toggle(&item.id);
        TapAction::Toggled {
            id: item.id.clone(),
            selected,
        }
    }

    /// Builds the result sequence without clearing the set.
    ///
    /// Walks `loaded` in order and keeps every selected, selectable item for
    /// which `is_available` holds. An id reachable twice is reported once.
    pub fn materialize<'a, I, F>(&self, loaded: I, mut is_available: F) -> Vec<MediaItem>
    where
        I: IntoIterator<Item = &'a MediaItem>,
        F: FnMut(&MediaItem) -> bool,
    {
        let mut seen = HashSet::new();
        loaded
            .into_iter()
            .filter(|item| item.is_selectable() && self.contains(&item.id))
            .filter(|item| seen.insert(item.id.clone()))
            .filter(|item| is_available(*item))
            .cloned()
            .collect()
    }

    /// Terminal transition: materializes the result, then clears the set.
    pub fn confirm<'a, I, F>(&mut self, loaded: I, is_available: F) -> Vec<MediaItem>
    where
        I: IntoIterator<Item = &'a MediaItem>,
        F: FnMut(&MediaItem) -> bool,
    {
        let result = self.materialize(loaded, is_available);
        self.clear();
        result
    }
}
