extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

/// Stable handle to a node stored in an [`Arena`].
///
/// A slot stays valid from the moment a value is allocated until it is
/// released, no matter how often the node is relinked between chains. Caches
/// keep one slot per key as the key's order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

impl Slot {
    /// Handle for entries whose policy keeps no ordering metadata.
    pub(crate) const DETACHED: Slot = Slot(usize::MAX);
}

/// A node in the arena.
///
/// `value` is `None` while the node sits on the free list.
struct Node<T> {
    value: Option<T>,
    prev: Option<Slot>,
    next: Option<Slot>,
}

/// Head, tail and length of one doubly linked chain living inside an [`Arena`].
///
/// Chains hold no values themselves. Several chains can share one arena, which
/// lets a node move from one chain to another without changing its slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chain {
    head: Option<Slot>,
    tail: Option<Slot>,
    len: usize,
}

impl Chain {
    /// The first (most recently attached at the front) node.
    #[inline]
    pub(crate) fn front(&self) -> Option<Slot> {
        self.head
    }

    /// The last node.
    #[inline]
    pub(crate) fn back(&self) -> Option<Slot> {
        self.tail
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Slab of doubly linked nodes addressed by [`Slot`] indices.
///
/// Nodes live in a `Vec`; `prev`/`next` links are slot indices rather than
/// pointers, so relinking is O(1) and needs no `unsafe`. Released slots are
/// recycled by later allocations.
pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
    free: Vec<Slot>,
    len: usize,
}

impl<T> Arena<T> {
    /// Creates an arena with room for `capacity` nodes before reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live (allocated, not yet released) nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` in a detached node and returns its slot.
    ///
    /// The node is not part of any chain until it is attached.
    pub(crate) fn alloc(&mut self, value: T) -> Slot {
        let node = Node {
            value: Some(value),
            prev: None,
            next: None,
        };
        self.len += 1;
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                Slot(self.nodes.len() - 1)
            }
        }
    }

    /// Takes the value out of `slot` and recycles the slot.
    ///
    /// The node must already be unlinked from its chain.
    pub(crate) fn release(&mut self, slot: Slot) -> Option<T> {
        let value = self.nodes.get_mut(slot.0)?.value.take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub(crate) fn get(&self, slot: Slot) -> Option<&T> {
        self.nodes.get(slot.0)?.value.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.nodes.get_mut(slot.0)?.value.as_mut()
    }

    /// Links a detached node in front of `chain`'s head.
    pub(crate) fn push_front(&mut self, chain: &mut Chain, slot: Slot) {
        let old_head = chain.head;
        {
            let node = &mut self.nodes[slot.0];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => self.nodes[head.0].prev = Some(slot),
            None => chain.tail = Some(slot),
        }
        chain.head = Some(slot);
        chain.len += 1;
    }

    /// Detaches `slot` from `chain` without releasing it.
    ///
    /// `slot` must currently be linked into `chain`.
    pub(crate) fn unlink(&mut self, chain: &mut Chain, slot: Slot) {
        let (prev, next) = {
            let node = &mut self.nodes[slot.0];
            (node.prev.take(), node.next.take())
        };
        match prev {
            Some(prev) => self.nodes[prev.0].next = next,
            None => chain.head = next,
        }
        match next {
            Some(next) => self.nodes[next.0].prev = prev,
            None => chain.tail = prev,
        }
        chain.len -= 1;
    }

    /// Moves a linked node to the front of its chain.
    pub(crate) fn move_to_front(&mut self, chain: &mut Chain, slot: Slot) {
        if chain.head == Some(slot) {
            return;
        }
        self.unlink(chain, slot);
        self.push_front(chain, slot);
    }

    /// Iterates `chain` from front to back.
    pub(crate) fn iter<'a>(&'a self, chain: &Chain) -> Iter<'a, T> {
        Iter {
            nodes: &self.nodes,
            cursor: chain.head,
            remaining: chain.len,
            forward: true,
        }
    }

    /// Iterates `chain` from back to front.
    pub(crate) fn iter_rev<'a>(&'a self, chain: &Chain) -> Iter<'a, T> {
        Iter {
            nodes: &self.nodes,
            cursor: chain.tail,
            remaining: chain.len,
            forward: false,
        }
    }

    /// Drops every node. Chains pointing into this arena must be reset too.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("slots", &self.nodes.len())
            .field("free", &self.free.len())
            .finish()
    }
}

/// Iterator over the values of one chain.
pub(crate) struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    cursor: Option<Slot>,
    remaining: usize,
    forward: bool,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Slot, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let node = self.nodes.get(slot.0)?;
        self.cursor = if self.forward { node.next } else { node.prev };
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref().map(|value| (slot, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// A doubly linked list over a private [`Arena`].
///
/// The front holds the most recently attached value. FIFO, LIFO, LRU and MRU
/// orderings are all expressed as "push to the front, take from one end".
///
/// # Examples
///
/// ```ignore
/// use policy_cache::list::List;
///
/// let mut list = List::with_capacity(3);
/// let a = list.push_front("a");
/// list.push_front("b");
/// list.move_to_front(a);
/// assert_eq!(list.pop_back(), Some("b"));
/// ```
pub(crate) struct List<T> {
    arena: Arena<T>,
    chain: Chain,
}

impl<T> List<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        List {
            arena: Arena::with_capacity(capacity),
            chain: Chain::default(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.chain.len()
    }

    /// Adds a value to the front of the list and returns its slot.
    pub(crate) fn push_front(&mut self, value: T) -> Slot {
        let slot = self.arena.alloc(value);
        self.arena.push_front(&mut self.chain, slot);
        slot
    }

    /// Removes the first (most recently attached) value.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let slot = self.chain.front()?;
        self.remove(slot)
    }

    /// Removes the last (least recently attached) value.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let slot = self.chain.back()?;
        self.remove(slot)
    }

    /// Removes the value at `slot`.
    ///
    /// Returns `None` if the slot holds no live value.
    pub(crate) fn remove(&mut self, slot: Slot) -> Option<T> {
        self.arena.get(slot)?;
        self.arena.unlink(&mut self.chain, slot);
        self.arena.release(slot)
    }

    pub(crate) fn move_to_front(&mut self, slot: Slot) {
        if self.arena.get(slot).is_some() {
            self.arena.move_to_front(&mut self.chain, slot);
        }
    }

    pub(crate) fn front(&self) -> Option<&T> {
        self.arena.get(self.chain.front()?)
    }

    pub(crate) fn back(&self) -> Option<&T> {
        self.arena.get(self.chain.back()?)
    }

    /// Values from front to back.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.arena.iter(&self.chain).map(|(_, value)| value)
    }

    /// Values from back to front.
    pub(crate) fn iter_rev(&self) -> impl Iterator<Item = &T> + '_ {
        self.arena.iter_rev(&self.chain).map(|(_, value)| value)
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.chain = Chain::default();
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.chain.len())
            .field("arena", &self.arena)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect<T: Copy>(list: &List<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_and_pop_both_ends() {
        let mut list = List::with_capacity(4);
        list.push_front(0);
        list.push_front(1);
        list.push_front(2);
        assert_eq!(collect(&list), alloc::vec![2, 1, 0]);
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(0));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::with_capacity(3);
        let a = list.push_front('a');
        let b = list.push_front('b');
        list.push_front('c');
        list.move_to_front(a);
        assert_eq!(collect(&list), alloc::vec!['a', 'c', 'b']);
        list.move_to_front(a);
        assert_eq!(collect(&list), alloc::vec!['a', 'c', 'b']);
        list.move_to_front(b);
        assert_eq!(collect(&list), alloc::vec!['b', 'a', 'c']);
        assert_eq!(list.iter_rev().copied().collect::<Vec<_>>(), alloc::vec!['c', 'a', 'b']);
    }

    #[test]
    fn test_remove_middle_keeps_links() {
        let mut list = List::with_capacity(3);
        list.push_front(1);
        let middle = list.push_front(2);
        list.push_front(3);
        assert_eq!(list.remove(middle), Some(2));
        assert_eq!(list.remove(middle), None);
        assert_eq!(collect(&list), alloc::vec![3, 1]);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_released_slots_are_reused() {
        let mut list = List::with_capacity(2);
        let first = list.push_front(10);
        list.push_front(20);
        list.remove(first);
        let reused = list.push_front(30);
        assert_eq!(reused, first);
        assert_eq!(list.arena.get(reused), Some(&30));
        assert_eq!(list.arena.len(), 2);
    }

    #[test]
    fn test_shared_arena_chains() {
        let mut arena = Arena::with_capacity(4);
        let mut left = Chain::default();
        let mut right = Chain::default();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        arena.push_front(&mut left, a);
        arena.push_front(&mut left, b);

        arena.unlink(&mut left, a);
        arena.push_front(&mut right, a);

        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
        assert_eq!(left.front(), Some(b));
        assert_eq!(right.back(), Some(a));
        assert_eq!(arena.get(a), Some(&"a"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut list = List::with_capacity(2);
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        list.push_front(3);
        assert_eq!(collect(&list), alloc::vec![3]);
    }
}
