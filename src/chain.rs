//! The design philosophy underlying `vote_chain` is pedagogical: every module
//! isolates one idea behind tamper-evident chaining so it can be studied alone.
//! Singly linked, prepend-oriented block chain.
//!
//! The [`Chain`] keeps its links in a slot arena and threads them together with
//! `next` indices.  New blocks are prepended at the head, so traversal runs
//! newest-first while display runs oldest-first.  [`Chain::render`] bridges the
//! two without touching the stored links, and [`Chain::reverse`] flips the
//! traversal order in place when a caller wants the structure itself turned
//! around.  The chain remembers which way it currently points, so rendering
//! and new additions keep creation order after any number of reversals.
//!
//! Links are addressed through [`BlockId`] handles.  A handle carries the
//! generation of its slot, so handles to released blocks are rejected rather
//! than silently resolving to whatever block reused the slot.

use std::fmt;

use crate::block::Block;
use crate::error::ChainError;
use crate::report::BlockSummary;

/// Handle to a block held by a [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    index: usize,
    generation: u32,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Link {
    block: Block,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    link: Option<Link>,
}

/// Ordered, append-only history of blocks.
///
/// A chain is either empty or has a defined head block.  All operations run
/// to completion on the calling thread; sharing a chain across threads needs
/// external synchronisation.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    slots: Vec<Slot>,
    // Capacity is kept at or above `slots.len()` so releasing never allocates.
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    // Set while traversal runs oldest-first, i.e. after an odd number of reversals.
    oldest_first: bool,
}

impl Chain {
    /// Creates a chain with no blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when the chain holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// `true` while traversal starts at the oldest block.
    pub fn is_oldest_first(&self) -> bool {
        self.oldest_first
    }

    /// Block at the head of the traversal order.
    pub fn head(&self) -> Option<&Block> {
        self.head.and_then(|index| self.link(index)).map(|l| &l.block)
    }

    /// Handle of the head block.
    pub fn head_id(&self) -> Option<BlockId> {
        self.head.map(|index| self.id_at(index))
    }

    /// Looks up a block by handle.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.resolve(id).ok().and_then(|index| self.link(index)).map(|l| &l.block)
    }

    /// Records `block` as the most recent addition.
    ///
    /// While traversal runs newest-first the block becomes the new head.
    /// After a [`reverse`](Chain::reverse) it is linked after the tail
    /// instead, so creation order is kept either way.
    pub fn prepend(&mut self, block: Block) -> Result<BlockId, ChainError> {
        if self.oldest_first {
            if let Some(tail) = self.tail {
                let tail_id = self.id_at(tail);
                return self.insert_after(tail_id, block);
            }
        }
        let id = self.allocate(Link {
            block,
            next: self.head,
        })?;
        self.head = Some(id.index);
        if self.tail.is_none() {
            self.tail = Some(id.index);
        }
        Ok(id)
    }

    /// Inserts `block` directly after the block addressed by `id` in
    /// traversal order.
    ///
    /// No digests are relinked: keeping `previous_hash` consistent is up to
    /// the caller when inserting out of append order.
    pub fn insert_after(&mut self, id: BlockId, block: Block) -> Result<BlockId, ChainError> {
        let index = self.resolve(id)?;
        let next = self.link(index).and_then(|l| l.next);
        let new_id = self.allocate(Link { block, next })?;
        if let Some(link) = self.link_mut(index) {
            link.next = Some(new_id.index);
        }
        if self.tail == Some(index) {
            self.tail = Some(new_id.index);
        }
        Ok(new_id)
    }

    /// Removes the block that directly follows the head.
    ///
    /// Chains with fewer than two blocks are left untouched and yield
    /// [`ChainError::NoSuccessor`].
    pub fn remove_first_after_head(&mut self) -> Result<Block, ChainError> {
        let no_successor = ChainError::NoSuccessor { len: self.len };
        let head = self.head.ok_or_else(|| no_successor.clone())?;
        let second = self
            .link(head)
            .and_then(|l| l.next)
            .ok_or_else(|| no_successor.clone())?;
        let after = self.link(second).and_then(|l| l.next);
        let removed = self.release(second).ok_or(no_successor)?;
        if let Some(link) = self.link_mut(head) {
            link.next = after;
        }
        if self.tail == Some(second) {
            self.tail = Some(head);
        }
        Ok(removed)
    }

    /// Removes and returns the head block, if any.
    pub fn pop_head(&mut self) -> Option<Block> {
        let head = self.head?;
        self.head = self.link(head).and_then(|l| l.next);
        if self.head.is_none() {
            self.tail = None;
        }
        self.release(head)
    }

    /// Flips the traversal order in place.
    ///
    /// Only `next` indices are rewritten; no link is allocated or moved.
    /// Applying it twice restores the original order.  Rendering and later
    /// additions follow the flip, so neither depends on how often the chain
    /// was reversed.
    pub fn reverse(&mut self) {
        let mut previous = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Some(link) = self.link_mut(index) else {
                break;
            };
            cursor = std::mem::replace(&mut link.next, previous);
            previous = Some(index);
        }
        self.tail = self.head;
        self.head = previous;
        self.oldest_first = !self.oldest_first;
    }

    /// Releases every block.  Outstanding handles become invalid and the
    /// traversal order returns to newest-first.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.link.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
        // Lowest indices are handed out first after a clear.
        self.free.reverse();
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.oldest_first = false;
    }

    /// Blocks in traversal order, starting at the head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: self.entries(),
        }
    }

    /// Handles and blocks in traversal order, starting at the head.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            chain: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Blocks in creation order, oldest first, whatever the traversal order.
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &Block> + ExactSizeIterator {
        let mut blocks: Vec<&Block> = self.iter().collect();
        if !self.oldest_first {
            blocks.reverse();
        }
        blocks.into_iter()
    }

    /// Summaries of every block, oldest first, with depth counted from the
    /// oldest block.
    ///
    /// Rendering reads the chain without relinking it, so the chain keeps
    /// its current traversal order and stays usable afterwards.
    pub fn render(&self) -> Vec<BlockSummary> {
        self.chronological()
            .enumerate()
            .map(|(depth, block)| BlockSummary::new(depth, block))
            .collect()
    }

    fn id_at(&self, index: usize) -> BlockId {
        BlockId {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn link(&self, index: usize) -> Option<&Link> {
        self.slots.get(index).and_then(|slot| slot.link.as_ref())
    }

    fn link_mut(&mut self, index: usize) -> Option<&mut Link> {
        self.slots.get_mut(index).and_then(|slot| slot.link.as_mut())
    }

    fn resolve(&self, id: BlockId) -> Result<usize, ChainError> {
        match self.slots.get(id.index) {
            Some(slot) if slot.generation == id.generation && slot.link.is_some() => Ok(id.index),
            _ => Err(ChainError::UnknownBlock(id)),
        }
    }

    fn allocate(&mut self, link: Link) -> Result<BlockId, ChainError> {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].link = Some(link);
                index
            }
            None => {
                self.slots.try_reserve(1)?;
                let wanted = self.slots.len() + 1 - self.free.len();
                self.free.try_reserve(wanted)?;
                self.slots.push(Slot {
                    generation: 0,
                    link: Some(link),
                });
                self.slots.len() - 1
            }
        };
        self.len += 1;
        Ok(self.id_at(index))
    }

    fn release(&mut self, index: usize) -> Option<Block> {
        let slot = self.slots.get_mut(index)?;
        let link = slot.link.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        Some(link.block)
    }
}

/// Iterator over `(handle, block)` pairs in traversal order.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    chain: &'a Chain,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (BlockId, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let link = self.chain.link(index)?;
        self.cursor = link.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((self.chain.id_at(index), &link.block))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Entries<'_> {}

/// Iterator over blocks in traversal order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    entries: Entries<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|(_, block)| block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Block;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::GENESIS_PREVIOUS_HASH;
    use proptest::prelude::*;

    fn block(tag: &str) -> Block {
        Block::new(0, tag.len() as u64, tag)
    }

    fn built(tags: &[&str]) -> Chain {
        let mut chain = Chain::new();
        for tag in tags {
            chain.prepend(block(tag)).unwrap();
        }
        chain
    }

    fn traversal(chain: &Chain) -> Vec<String> {
        chain.iter().map(|b| b.transaction().to_string()).collect()
    }

    fn rendered(chain: &Chain) -> Vec<String> {
        chain.render().into_iter().map(|s| s.transaction).collect()
    }

    #[test]
    fn test_new_chain_is_empty() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert!(chain.head().is_none());
        assert!(chain.render().is_empty());
    }

    #[test]
    fn test_prepend_puts_newest_at_head() {
        let chain = built(&["A", "B", "C"]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.head().unwrap().transaction(), "C");
        assert_eq!(traversal(&chain), ["C", "B", "A"]);
    }

    #[test]
    fn test_render_is_oldest_first_and_non_destructive() {
        let chain = built(&["A", "B", "C"]);
        let summaries = chain.render();
        assert_eq!(rendered(&chain), ["A", "B", "C"]);
        let depths: Vec<usize> = summaries.iter().map(|s| s.depth).collect();
        assert_eq!(depths, [0, 1, 2]);
        // Construction order survives rendering.
        assert_eq!(traversal(&chain), ["C", "B", "A"]);
        assert_eq!(rendered(&chain), ["A", "B", "C"]);
    }

    #[test]
    fn test_reverse_flips_traversal() {
        let mut chain = built(&["A", "B", "C"]);
        chain.reverse();
        assert_eq!(traversal(&chain), ["A", "B", "C"]);
        assert_eq!(chain.head().unwrap().transaction(), "A");
        chain.reverse();
        assert_eq!(traversal(&chain), ["C", "B", "A"]);
    }

    #[test]
    fn test_render_after_reverse_stays_oldest_first() {
        let mut chain = built(&["A", "B", "C"]);
        chain.reverse();
        assert!(chain.is_oldest_first());
        let summaries = chain.render();
        let order: Vec<(String, usize)> = summaries
            .into_iter()
            .map(|s| (s.transaction, s.depth))
            .collect();
        assert_eq!(
            order,
            [("A".to_string(), 0), ("B".to_string(), 1), ("C".to_string(), 2)]
        );
        assert_eq!(traversal(&chain), ["A", "B", "C"]);
    }

    #[test]
    fn test_prepend_after_reverse_keeps_creation_order() {
        let mut chain = built(&["A", "B", "C"]);
        chain.reverse();
        chain.prepend(block("D")).unwrap();
        assert_eq!(traversal(&chain), ["A", "B", "C", "D"]);
        assert_eq!(rendered(&chain), ["A", "B", "C", "D"]);

        chain.reverse();
        assert!(!chain.is_oldest_first());
        chain.prepend(block("E")).unwrap();
        assert_eq!(traversal(&chain), ["E", "D", "C", "B", "A"]);
        assert_eq!(rendered(&chain), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_tail_follows_removal_and_insertion() {
        let mut chain = built(&["A", "B"]);
        assert_eq!(chain.remove_first_after_head().unwrap().transaction(), "A");
        chain.reverse();
        chain.prepend(block("C")).unwrap();
        assert_eq!(traversal(&chain), ["B", "C"]);

        let c = chain.entries().nth(1).unwrap().0;
        chain.insert_after(c, block("D")).unwrap();
        chain.prepend(block("E")).unwrap();
        assert_eq!(rendered(&chain), ["B", "C", "D", "E"]);

        chain.pop_head().unwrap();
        chain.pop_head().unwrap();
        chain.pop_head().unwrap();
        chain.pop_head().unwrap();
        assert!(chain.is_empty());
        chain.prepend(block("F")).unwrap();
        chain.prepend(block("G")).unwrap();
        assert_eq!(rendered(&chain), ["F", "G"]);
    }

    #[test]
    fn test_clear_resets_orientation() {
        let mut chain = built(&["A", "B"]);
        chain.reverse();
        chain.clear();
        assert!(!chain.is_oldest_first());
        chain.prepend(block("X")).unwrap();
        chain.prepend(block("Y")).unwrap();
        assert_eq!(traversal(&chain), ["Y", "X"]);
        assert_eq!(rendered(&chain), ["X", "Y"]);
    }

    #[test]
    fn test_reverse_of_empty_and_single() {
        let mut empty = Chain::new();
        empty.reverse();
        assert!(empty.is_empty());

        let mut single = built(&["A"]);
        single.reverse();
        assert_eq!(traversal(&single), ["A"]);
    }

    #[test]
    fn test_insert_after_links_into_middle() {
        let mut chain = Chain::new();
        chain.prepend(block("A")).unwrap();
        let b = chain.prepend(block("B")).unwrap();
        chain.prepend(block("C")).unwrap();
        let x = chain.insert_after(b, block("X")).unwrap();
        assert_eq!(traversal(&chain), ["C", "B", "X", "A"]);
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.get(x).unwrap().transaction(), "X");
    }

    #[test]
    fn test_insert_after_tail() {
        let mut chain = Chain::new();
        let a = chain.prepend(block("A")).unwrap();
        chain.insert_after(a, block("Z")).unwrap();
        assert_eq!(traversal(&chain), ["A", "Z"]);
    }

    #[test]
    fn test_insert_after_rejects_stale_handle() {
        let mut chain = built(&["A"]);
        let b = chain.prepend(block("B")).unwrap();
        let a_id = chain.entries().nth(1).unwrap().0;
        chain.pop_head().unwrap();
        assert_eq!(
            chain.insert_after(b, block("X")),
            Err(ChainError::UnknownBlock(b))
        );
        // The freed slot is reused, yet the old handle stays invalid.
        let c = chain.prepend(block("C")).unwrap();
        assert_ne!(b, c);
        assert!(chain.get(b).is_none());
        assert_eq!(chain.get(c).unwrap().transaction(), "C");
        assert_eq!(chain.get(a_id).unwrap().transaction(), "A");
    }

    #[test]
    fn test_remove_first_after_head() {
        let mut chain = built(&["A", "B", "C"]);
        let removed = chain.remove_first_after_head().unwrap();
        assert_eq!(removed.transaction(), "B");
        assert_eq!(traversal(&chain), ["C", "A"]);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_remove_first_after_head_on_short_chains() {
        let mut empty = Chain::new();
        assert_eq!(
            empty.remove_first_after_head(),
            Err(ChainError::NoSuccessor { len: 0 })
        );
        assert!(empty.is_empty());

        let mut single = built(&["A"]);
        assert_eq!(
            single.remove_first_after_head(),
            Err(ChainError::NoSuccessor { len: 1 })
        );
        assert_eq!(traversal(&single), ["A"]);
    }

    #[test]
    fn test_pop_head_down_to_empty() {
        let mut chain = built(&["A", "B"]);
        assert_eq!(chain.pop_head().unwrap().transaction(), "B");
        assert_eq!(chain.pop_head().unwrap().transaction(), "A");
        assert!(chain.pop_head().is_none());
        assert!(chain.is_empty());
    }

    #[test]
    fn test_clear_then_prepend() {
        let tags: Vec<String> = (0..10).map(|i| format!("vote-{i}")).collect();
        let mut chain = Chain::new();
        let mut ids = Vec::new();
        for tag in &tags {
            ids.push(chain.prepend(block(tag)).unwrap());
        }
        assert_eq!(chain.len(), 10);
        chain.clear();
        assert!(chain.is_empty());
        assert!(chain.render().is_empty());
        assert!(ids.iter().all(|id| chain.get(*id).is_none()));

        let genesis = Block::new(GENESIS_PREVIOUS_HASH, 7, "fresh");
        chain.prepend(genesis.clone()).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.head(), Some(&genesis));
        assert_eq!(rendered(&chain), ["fresh"]);
    }

    #[test]
    fn test_iterators_report_exact_length() {
        let chain = built(&["A", "B", "C", "D"]);
        assert_eq!(chain.iter().len(), 4);
        assert_eq!(chain.entries().len(), 4);
        assert_eq!((&chain).into_iter().count(), 4);
        assert_eq!(chain.chronological().len(), 4);
    }

    proptest! {
        #[test]
        fn prop_render_preserves_append_order(tags in proptest::collection::vec("[A-Z]{1,4}", 0..24)) {
            let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let chain = built(&refs);
            prop_assert_eq!(rendered(&chain), tags.clone());
        }

        #[test]
        fn prop_render_ignores_reversals(
            tags in proptest::collection::vec("[A-Z]{1,4}", 0..24),
            flips in 0usize..5,
        ) {
            let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let mut chain = built(&refs);
            for _ in 0..flips {
                chain.reverse();
            }
            prop_assert_eq!(rendered(&chain), tags.clone());
        }

        #[test]
        fn prop_reverse_is_self_inverse(tags in proptest::collection::vec("[a-z]{1,3}", 0..24)) {
            let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let mut chain = built(&refs);
            let before = traversal(&chain);
            chain.reverse();
            chain.reverse();
            prop_assert_eq!(traversal(&chain), before);
        }
    }
}
