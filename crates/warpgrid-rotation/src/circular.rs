//! Circular sequence — an ordered, doubly linked list with wrap-around
//! navigation.
//!
//! Nodes live in a slot arena and link to each other by index instead of
//! by reference. A [`Handle`] names one node; it stays valid across
//! unrelated insertions and removals. Removing a node bumps its slot's
//! generation, so a handle kept past removal resolves to nothing rather
//! than to whatever later reuses the slot.

use std::fmt;

/// Stable reference to one node of a [`CircularList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Ordered sequence whose ends wrap around for navigation purposes.
pub struct CircularList<T> {
    slots: Vec<Slot<T>>,
    /// Vacated slot indices, reused before the arena grows.
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> CircularList<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<Handle> {
        self.head.map(|index| self.handle(index))
    }

    pub fn last(&self) -> Option<Handle> {
        self.tail.map(|index| self.handle(index))
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.node(handle).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.node.as_mut().map(|node| &mut node.value)
    }

    /// The node after `handle`, or the first node when `handle` is the last.
    ///
    /// Returns `None` only when `handle` no longer names a live node.
    pub fn next_or_first(&self, handle: Handle) -> Option<Handle> {
        let node = self.node(handle)?;
        node.next.or(self.head).map(|index| self.handle(index))
    }

    /// The node before `handle`, or the last node when `handle` is the first.
    pub fn previous_or_last(&self, handle: Handle) -> Option<Handle> {
        let node = self.node(handle)?;
        node.prev.or(self.tail).map(|index| self.handle(index))
    }

    pub fn push_back(&mut self, value: T) -> Handle {
        self.link(value, self.tail, None)
    }

    pub fn push_front(&mut self, value: T) -> Handle {
        self.link(value, None, self.head)
    }

    /// Insert `value` immediately before `anchor`.
    ///
    /// Returns `None` (and drops nothing) if `anchor` is stale.
    pub fn insert_before(&mut self, anchor: Handle, value: T) -> Option<Handle> {
        let prev = self.node(anchor)?.prev;
        Some(self.link(value, prev, Some(anchor.index)))
    }

    /// Insert `value` immediately after `anchor`.
    pub fn insert_after(&mut self, anchor: Handle, value: T) -> Option<Handle> {
        let next = self.node(anchor)?.next;
        Some(self.link(value, Some(anchor.index), next))
    }

    /// Unlink the node named by `handle` and hand back its value.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);

        match node.prev {
            Some(prev) => self.set_next(prev, node.next),
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.set_prev(next, node.prev),
            None => self.tail = node.prev,
        }
        self.len -= 1;
        Some(node.value)
    }

    /// First node, in sequence order, whose value satisfies `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<Handle>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter()
            .find(|(_, value)| predicate(value))
            .map(|(handle, _)| handle)
    }

    /// Iterate `(handle, value)` pairs from first to last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Mutable access to every value, in storage order rather than
    /// sequence order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.node.as_mut().map(|node| &mut node.value))
    }

    fn handle(&self, index: usize) -> Handle {
        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn node(&self, handle: Handle) -> Option<&Node<T>> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn link(&mut self, value: T, prev: Option<usize>, next: Option<usize>) -> Handle {
        let node = Node { value, prev, next };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        match prev {
            Some(prev) => self.set_next(prev, Some(index)),
            None => self.head = Some(index),
        }
        match next {
            Some(next) => self.set_prev(next, Some(index)),
            None => self.tail = Some(index),
        }
        self.len += 1;
        self.handle(index)
    }

    fn set_next(&mut self, index: usize, next: Option<usize>) {
        if let Some(node) = self.slots.get_mut(index).and_then(|s| s.node.as_mut()) {
            node.next = next;
        }
    }

    fn set_prev(&mut self, index: usize, prev: Option<usize>) {
        if let Some(node) = self.slots.get_mut(index).and_then(|s| s.node.as_mut()) {
            node.prev = prev;
        }
    }
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for CircularList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, v)| v)).finish()
    }
}

/// Iterator over a [`CircularList`] in sequence order. Does not wrap.
pub struct Iter<'a, T> {
    list: &'a CircularList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = self.list.slots.get(index)?.node.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((self.list.handle(index), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
