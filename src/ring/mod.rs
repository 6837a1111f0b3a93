use std::fmt::{Debug, Formatter};

use crate::ring::cursor::Cursor;
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// The slot index of the sentinel node. The sentinel is created together
/// with the ring and occupies slot 0 for the whole lifetime of the ring.
pub(crate) const SENTINEL: usize = 0;

/// Marks the end of the free list.
const NIL: usize = usize::MAX;

/// The `Ring` is a circular doubly-linked list of key/info pairs, threaded
/// through a permanent sentinel node. It allows inserting and removing
/// nodes at any given position in constant time. In compromise, looking up
/// a key takes *O*(*n*) time.
///
/// Nodes are stored in a slot arena owned by the ring. Freed slots are
/// recycled through an intrusive free list, so the index of a live node —
/// and therefore every [`Cursor`] naming it — stays valid across unrelated
/// insertions and removals.
///
/// # Naming Conventions
///
/// - `begin`: the first real node, or the sentinel if the ring is empty;
/// - `end`: always the sentinel, even in an empty ring;
/// - `past`/`next`: the backward and forward link of a node.
pub struct Ring<K, I> {
    pub(crate) slots: Vec<Slot<K, I>>,
    free: usize,
    len: usize,
}

/// One arena slot: either a live node of the chain, or a vacancy on the
/// free list awaiting reuse.
pub(crate) enum Slot<K, I> {
    Occupied(Node<K, I>),
    Free { next_free: usize },
}

pub(crate) struct Node<K, I> {
    pub(crate) key: K,
    pub(crate) info: I,
    pub(crate) past: usize,
    pub(crate) next: usize,
}

// Arena and splice primitives. Every public mutation funnels through
// `link` and `unlink`.
impl<K, I> Ring<K, I> {
    /// Borrow the node in slot `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is out of range or names a freed slot, i.e. the
    /// caller supplied a stale cursor.
    pub(crate) fn node(&self, at: usize) -> &Node<K, I> {
        match self.slots.get(at) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("cursor does not point to a live node of this ring"),
        }
    }

    pub(crate) fn node_mut(&mut self, at: usize) -> &mut Node<K, I> {
        match self.slots.get_mut(at) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("cursor does not point to a live node of this ring"),
        }
    }

    /// Store `node` in a slot, reusing the free list before growing the
    /// arena. Allocation failure is fatal, as everywhere in this crate.
    fn allocate(&mut self, node: Node<K, I>) -> usize {
        if self.free == NIL {
            self.slots.push(Slot::Occupied(node));
            return self.slots.len() - 1;
        }
        let at = self.free;
        match std::mem::replace(&mut self.slots[at], Slot::Occupied(node)) {
            Slot::Free { next_free } => self.free = next_free,
            Slot::Occupied(_) => unreachable!("free list points at a live slot"),
        }
        at
    }

    /// Allocate a node holding `(key, info)` and splice it between `before`
    /// and `after`.
    ///
    /// `before` and `after` must be adjacent in the chain (only checked in
    /// `#[cfg(debug_assertions)]`); all callers splice at positions read
    /// from the chain itself, which guarantees adjacency.
    fn link(&mut self, before: usize, after: usize, key: K, info: I) -> usize {
        #[cfg(debug_assertions)]
        self.assert_adjacent(before, after);
        let at = self.allocate(Node {
            key,
            info,
            past: before,
            next: after,
        });
        self.node_mut(before).next = at;
        self.node_mut(after).past = at;
        self.len += 1;
        at
    }

    /// Splice the node in slot `at` out of the chain, free its slot, and
    /// return its successor together with the extracted pair. Returns
    /// `None` — and leaves the ring untouched — if `at` is the sentinel:
    /// the sentinel is never removable.
    ///
    /// This is the single removal primitive under `pop_front`, `erase` and
    /// the owning iterator.
    fn unlink(&mut self, at: usize) -> Option<(usize, K, I)> {
        if at == SENTINEL {
            return None;
        }
        let node = match self.slots.get_mut(at) {
            Some(slot @ Slot::Occupied(_)) => {
                let next_free = self.free;
                match std::mem::replace(slot, Slot::Free { next_free }) {
                    Slot::Occupied(node) => node,
                    Slot::Free { .. } => unreachable!(),
                }
            }
            _ => panic!("cursor does not point to a live node of this ring"),
        };
        self.free = at;
        self.node_mut(node.past).next = node.next;
        self.node_mut(node.next).past = node.past;
        self.len -= 1;
        Some((node.next, node.key, node.info))
    }

    /// Remove the front node and return its pair, or `None` if the ring is
    /// empty. Used by the owning iterator.
    pub(crate) fn take_front(&mut self) -> Option<(K, I)> {
        let first = self.node(SENTINEL).next;
        self.unlink(first).map(|(_, key, info)| (key, info))
    }

    /// Remove the back node and return its pair, or `None` if the ring is
    /// empty. Used by the owning iterator.
    pub(crate) fn take_back(&mut self) -> Option<(K, I)> {
        let last = self.node(SENTINEL).past;
        self.unlink(last).map(|(_, key, info)| (key, info))
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, before: usize, after: usize) {
        assert_eq!(self.node(before).next, after);
        assert_eq!(self.node(after).past, before);
    }
}

impl<K: Default, I: Default> Ring<K, I> {
    /// Create an empty `Ring`.
    ///
    /// The sentinel node is created eagerly, holding the default key and
    /// info values, linked to itself in both directions.
    ///
    /// # Examples
    /// ```
    /// use bi_ring::Ring;
    /// let ring: Ring<u32, String> = Ring::new();
    /// assert!(ring.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `Ring` with room for `capacity` nodes (besides the
    /// sentinel) before the arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(Slot::Occupied(Node {
            key: K::default(),
            info: I::default(),
            past: SENTINEL,
            next: SENTINEL,
        }));
        Self {
            slots,
            free: NIL,
            len: 0,
        }
    }
}

impl<K, I> Ring<K, I> {
    /// Returns the number of live nodes, not counting the sentinel.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// assert_eq!(ring.len(), 0);
    ///
    /// ring.push_front(1, "one");
    /// assert_eq!(ring.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the `Ring` holds no nodes besides the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// assert!(ring.is_empty());
    ///
    /// ring.push_front(1, "one");
    /// assert!(!ring.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a node first in the ring and returns a cursor to it. The new
    /// node becomes `begin()`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    ///
    /// let at = ring.push_front(2, "two");
    /// assert_eq!(at, ring.begin());
    ///
    /// ring.push_front(1, "one");
    /// assert_eq!(ring.key(ring.begin()), &1);
    /// ```
    pub fn push_front(&mut self, key: K, info: I) -> Cursor {
        let first = self.node(SENTINEL).next;
        Cursor(self.link(SENTINEL, first, key, info))
    }

    /// Removes the node at `begin()` and returns a cursor to the node that
    /// is now `begin()` — the sentinel if the ring became (or already was)
    /// empty. Popping an empty ring is a no-op.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(2, "two");
    /// ring.push_front(1, "one");
    ///
    /// let now_front = ring.pop_front();
    /// assert_eq!(now_front, ring.begin());
    /// assert_eq!(ring.key(now_front), &2);
    ///
    /// ring.pop_front();
    /// assert_eq!(ring.pop_front(), ring.end());
    /// assert!(ring.is_empty());
    /// ```
    pub fn pop_front(&mut self) -> Cursor {
        let first = self.node(SENTINEL).next;
        self.erase(Cursor(first))
    }

    /// Inserts a new node immediately before `at` and returns a cursor to
    /// it. Inserting before `begin()` of an empty ring produces the
    /// degenerate one-node ring, adjacent to the sentinel on both sides.
    ///
    /// `at` must be a live cursor of this ring. A stale cursor panics; a
    /// live cursor obtained from a different ring is a logic error with an
    /// unspecified (but memory-safe) result.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// let first = ring.begin();
    /// let at = ring.insert(first, 2, "two");
    /// assert_eq!(at, ring.begin());
    ///
    /// // Splice before the current front: [1, 2].
    /// let front = ring.begin();
    /// ring.insert(front, 1, "one");
    /// let keys: Vec<i32> = ring.iter().map(|(key, _)| *key).collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn insert(&mut self, at: Cursor, key: K, info: I) -> Cursor {
        let before = self.node(at.0).past;
        Cursor(self.link(before, at.0, key, info))
    }

    /// Removes the node at `at` and returns a cursor to its successor.
    /// Erasing `end()` is a no-op that returns `end()`: the sentinel is
    /// never removable.
    ///
    /// `at` must be a live cursor of this ring; see [`Ring::insert`].
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(3, 'c');
    /// ring.push_front(2, 'b');
    /// ring.push_front(1, 'a');
    ///
    /// let second = ring.next(ring.begin());
    /// let after = ring.erase(second);
    /// assert_eq!(ring.key(after), &3);
    /// assert_eq!(ring.len(), 2);
    ///
    /// // The sentinel stays put.
    /// let end = ring.end();
    /// assert_eq!(ring.erase(end), ring.end());
    /// assert_eq!(ring.len(), 2);
    /// ```
    pub fn erase(&mut self, at: Cursor) -> Cursor {
        match self.unlink(at.0) {
            Some((successor, ..)) => Cursor(successor),
            None => self.end(),
        }
    }

    /// Removes all nodes from the `Ring`, restoring the empty
    /// sentinel-only state. Cursors issued before the call are invalidated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(2, "two");
    /// ring.push_front(1, "one");
    ///
    /// ring.clear();
    /// assert_eq!(ring.len(), 0);
    /// assert_eq!(ring.begin(), ring.end());
    /// ```
    pub fn clear(&mut self) {
        self.slots.truncate(1);
        self.free = NIL;
        self.len = 0;
        let sentinel = self.node_mut(SENTINEL);
        sentinel.past = SENTINEL;
        sentinel.next = SENTINEL;
    }

    /// Provides a forward iterator of `(&key, &info)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(2, "two");
    /// ring.push_front(1, "one");
    ///
    /// let mut iter = ring.iter();
    /// assert_eq!(iter.next(), Some((&1, &"one")));
    /// assert_eq!(iter.next(), Some((&2, &"two")));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, I> {
        Iter::new(self)
    }

    /// Provides a forward iterator of `(&key, &mut info)` pairs. Keys are
    /// not mutable during iteration; mutate them through
    /// [`Ring::key_mut`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(2, 20);
    /// ring.push_front(1, 10);
    ///
    /// for (_, info) in ring.iter_mut() {
    ///     *info += 1;
    /// }
    ///
    /// let infos: Vec<i32> = ring.iter().map(|(_, info)| *info).collect();
    /// assert_eq!(infos, [11, 21]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, I> {
        IterMut::new(self)
    }
}

impl<K: Debug, I: Debug> Debug for Ring<K, I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: Default, I: Default> Default for Ring<K, I> {
    fn default() -> Self {
        Self::new()
    }
}

// Ensure that `Ring` and its read-only iterators are covariant in their
// type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: Ring<&'static str, &'static str>) -> Ring<&'a str, &'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str, &'static str>) -> Iter<'i, &'a str, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str, &'static str>) -> IntoIter<&'a str, &'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::ring::Ring;
    use std::cell::RefCell;

    #[test]
    fn ring_create() {
        let mut ring = Ring::<i32, i32>::new();
        assert!(ring.is_empty());
        ring.push_front(1, 10);
        assert!(!ring.is_empty());
        assert_eq!(ring.pop_front(), ring.end());
        assert!(ring.is_empty());
    }

    #[test]
    fn ring_drop_releases_every_node() {
        #[derive(Debug, Default)]
        struct DropChecker<'a> {
            value: i32,
            dropped: Option<&'a RefCell<Vec<i32>>>,
        }
        impl<'a> Drop for DropChecker<'a> {
            fn drop(&mut self) {
                if let Some(dropped) = self.dropped {
                    dropped.borrow_mut().push(self.value);
                }
            }
        }

        let dropped = RefCell::new(Vec::new());
        let mut ring = Ring::new();
        for value in 1..=3 {
            ring.push_front(
                value,
                DropChecker {
                    value,
                    dropped: Some(&dropped),
                },
            );
        }
        drop(ring);
        let mut seen = dropped.borrow().clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn ring_push_and_pop() {
        let mut ring = Ring::new();
        assert_eq!(ring.pop_front(), ring.end());

        ring.push_front(1, "one");
        ring.push_front(2, "two");
        ring.push_front(3, "three");
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.key(ring.begin()), &3);

        assert_eq!(ring.pop_front(), ring.begin());
        assert_eq!(ring.key(ring.begin()), &2);
        ring.pop_front();
        ring.pop_front();
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.pop_front(), ring.end());
        assert_eq!(ring.len(), 0);
    }

    #[test]
    fn ring_insert_and_erase() {
        let mut ring = Ring::new();

        // Inserting at `begin()` of an empty ring makes the one-node ring.
        let first = ring.begin();
        let at = ring.insert(first, "b", 2);
        assert_eq!(at, ring.begin());
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.past(at), ring.end());
        assert_eq!(ring.next(at), ring.end());

        let front = ring.begin();
        ring.insert(front, "a", 1);
        let back = ring.end();
        ring.insert(back, "c", 3);
        let keys: Vec<&str> = ring.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["a", "b", "c"]);

        let second = ring.next(ring.begin());
        let after = ring.erase(second);
        assert_eq!(ring.key(after), &"c");
        assert_eq!(ring.next(ring.begin()), after);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn ring_erase_sentinel_is_noop() {
        let mut ring = Ring::new();
        ring.push_front(1, ());
        let end = ring.end();
        assert_eq!(ring.erase(end), ring.end());
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.key(ring.begin()), &1);
    }

    #[test]
    fn ring_slot_reuse_keeps_live_cursors_valid() {
        let mut ring = Ring::new();
        let a = ring.push_front(1, "a");
        let b = ring.push_front(2, "b");
        let c = ring.push_front(3, "c");

        // Free the middle node, then allocate again: the freed slot is
        // recycled, while `a` and `c` must still name their nodes.
        ring.erase(b);
        let d = ring.push_front(4, "d");
        assert_eq!(b, d);
        assert_eq!(ring.key(a), &1);
        assert_eq!(ring.key(c), &3);
        assert_eq!(ring.key(d), &4);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    #[should_panic(expected = "cursor does not point to a live node")]
    fn ring_stale_cursor_panics() {
        let mut ring = Ring::new();
        let at = ring.push_front(1, "one");
        ring.erase(at);
        ring.key(at);
    }

    #[test]
    fn ring_clear_restores_empty_state() {
        let mut ring = Ring::new();
        for value in 0..10 {
            ring.push_front(value, value * 2);
        }
        ring.clear();
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.begin(), ring.end());
        assert_eq!(ring.next(ring.end()), ring.end());
        assert_eq!(ring.past(ring.end()), ring.end());

        // The ring is fully usable after clearing.
        ring.push_front(7, 14);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.key(ring.begin()), &7);
    }

    #[test]
    fn ring_debug_renders_entries() {
        let mut ring = Ring::new();
        ring.push_front(2, "b");
        ring.push_front(1, "a");
        assert_eq!(format!("{:?}", ring), r#"[(1, "a"), (2, "b")]"#);
    }
}
