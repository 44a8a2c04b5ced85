#![forbid(unsafe_code)]

//! The ordered tab collection and its per-tab tags.
//!
//! [`TabStack`] keeps tabs and their [`Tag`]s in two parallel vectors owned
//! by the engine. Renderers receive them by reference; nothing is global.
//!
//! # Invariants
//!
//! 1. `tabs.len() == tags.len()` at all times.
//! 2. Tab ids are unique.
//! 3. The selected index, if any, is in range.

use tabstack_core::{Result, TabStackError};

use crate::iter::ItemIter;
use crate::tab::{Tab, TabId, Tag};

/// A tab together with its index and current tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabItem<'a> {
    pub index: usize,
    pub tab: &'a Tab,
    pub tag: &'a Tag,
}

/// Ordered tabs with parallel layout tags.
#[derive(Debug, Clone, Default)]
pub struct TabStack {
    tabs: Vec<Tab>,
    tags: Vec<Tag>,
    selected: Option<usize>,
}

impl TabStack {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from tabs in order.
    ///
    /// # Errors
    /// `InvalidArgument` if two tabs share an id.
    pub fn with_tabs(tabs: impl IntoIterator<Item = Tab>) -> Result<Self> {
        let mut stack = Self::new();
        for tab in tabs {
            stack.push(tab)?;
        }
        Ok(stack)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    #[must_use]
    pub fn tab(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    #[must_use]
    pub fn tag(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    pub fn tag_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.tags.get_mut(index)
    }

    /// All tags in index order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Index of the tab with `id`.
    #[must_use]
    pub fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Index of the tab with `id`, or `InvalidArgument`.
    pub fn require_index(&self, id: TabId) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| TabStackError::invalid(format!("unknown {id}")))
    }

    /// Tag of the tab with `id`.
    #[must_use]
    pub fn tag_of(&self, id: TabId) -> Option<&Tag> {
        self.index_of(id).and_then(|index| self.tags.get(index))
    }

    #[inline]
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_tab(&self) -> Option<&Tab> {
        self.selected.and_then(|index| self.tabs.get(index))
    }

    /// Insert `tab` at `index`, shifting later tabs.
    ///
    /// The first tab inserted into an empty collection becomes selected.
    ///
    /// # Errors
    /// `InvalidArgument` if `index > len()` or the id is already present.
    pub fn insert(&mut self, index: usize, tab: Tab) -> Result<()> {
        if index > self.tabs.len() {
            return Err(TabStackError::invalid(format!(
                "insert index {index} out of range for {} tabs",
                self.tabs.len()
            )));
        }
        if self.index_of(tab.id).is_some() {
            return Err(TabStackError::invalid(format!("duplicate {}", tab.id)));
        }
        self.tabs.insert(index, tab);
        self.tags.insert(index, Tag::default());
        self.selected = match self.selected {
            None => Some(index),
            Some(selected) if selected >= index => Some(selected + 1),
            keep => keep,
        };
        Ok(())
    }

    /// Append `tab`.
    ///
    /// # Errors
    /// `InvalidArgument` if the id is already present.
    pub fn push(&mut self, tab: Tab) -> Result<()> {
        self.insert(self.tabs.len(), tab)
    }

    /// Remove the tab with `id`, returning its former index.
    ///
    /// Removing the selected tab selects its successor, or its predecessor
    /// when it was the last tab.
    ///
    /// # Errors
    /// `InvalidArgument` if no tab has `id`.
    pub fn remove(&mut self, id: TabId) -> Result<(usize, Tab)> {
        let index = self.require_index(id)?;
        let tab = self.tabs.remove(index);
        self.tags.remove(index);
        self.selected = match self.selected {
            _ if self.tabs.is_empty() => None,
            Some(selected) if selected > index => Some(selected - 1),
            Some(selected) if selected == index => Some(index.min(self.tabs.len() - 1)),
            keep => keep,
        };
        Ok((index, tab))
    }

    /// Remove every tab.
    pub fn clear(&mut self) -> Vec<Tab> {
        self.tags.clear();
        self.selected = None;
        std::mem::take(&mut self.tabs)
    }

    /// Select the tab with `id`, returning the previously selected index.
    ///
    /// # Errors
    /// `InvalidArgument` if no tab has `id`.
    pub fn select(&mut self, id: TabId) -> Result<Option<usize>> {
        let index = self.require_index(id)?;
        Ok(self.selected.replace(index))
    }

    /// All tabs in ascending index order.
    pub fn items(&self) -> impl Iterator<Item = TabItem<'_>> {
        self.walk(ItemIter::new(self.len()))
    }

    /// Tabs in the order produced by `iter`.
    pub fn walk(&self, iter: ItemIter) -> impl Iterator<Item = TabItem<'_>> {
        iter.filter_map(move |index| {
            Some(TabItem {
                index,
                tab: self.tabs.get(index)?,
                tag: self.tags.get(index)?,
            })
        })
    }

    /// Overwrite the tag at `index`, returning whether it changed.
    pub(crate) fn set_tag(&mut self, index: usize, tag: Tag) -> bool {
        match self.tags.get_mut(index) {
            Some(current) if *current != tag => {
                *current = tag;
                true
            }
            _ => false,
        }
    }
}
