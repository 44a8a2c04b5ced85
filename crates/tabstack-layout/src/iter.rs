#![forbid(unsafe_code)]

//! Index iteration over the currently known tabs.
//!
//! Layout passes walk tabs forward (toward higher indices) or in reverse,
//! starting anywhere in the collection. [`ItemIter`] yields indices only, so
//! a pass can read a predecessor's tag and write the current one without
//! holding a borrow across the walk.
//!
//! ```
//! use tabstack_layout::ItemIter;
//!
//! let forward: Vec<usize> = ItemIter::new(5).start(2).collect();
//! assert_eq!(forward, vec![2, 3, 4]);
//!
//! let backward: Vec<usize> = ItemIter::new(5).reverse(true).start(2).collect();
//! assert_eq!(backward, vec![2, 1, 0]);
//! ```

/// Iterator over tab indices with a configurable direction and start.
#[derive(Debug, Clone)]
pub struct ItemIter {
    count: usize,
    reverse: bool,
    start: Option<usize>,
    next: Option<usize>,
    started: bool,
}

impl ItemIter {
    /// Iterate all `count` indices in ascending order.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            reverse: false,
            start: None,
            next: None,
            started: false,
        }
    }

    /// Walk toward index 0 instead of toward the last index.
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Begin at `index` instead of the first index in walking order.
    ///
    /// An out-of-range start yields nothing.
    #[must_use]
    pub fn start(mut self, index: usize) -> Self {
        self.start = Some(index);
        self
    }

    /// Neighbor visited just before `index` in walking order.
    ///
    /// This is the tab a pass treats as "predecessor" of the current
    /// item: `index - 1` when walking forward, `index + 1` in reverse.
    #[must_use]
    pub fn neighbor_of(&self, index: usize) -> Option<usize> {
        if self.reverse {
            (index + 1 < self.count).then_some(index + 1)
        } else {
            index.checked_sub(1)
        }
    }

    fn first(&self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let first = match self.start {
            Some(start) => start,
            None if self.reverse => self.count - 1,
            None => 0,
        };
        (first < self.count).then_some(first)
    }
}

impl Iterator for ItemIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if !self.started {
            self.started = true;
            self.next = self.first();
        }
        let current = self.next?;
        self.next = if self.reverse {
            current.checked_sub(1)
        } else {
            (current + 1 < self.count).then_some(current + 1)
        };
        Some(current)
    }
}
