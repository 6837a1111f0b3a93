use crate::ring::{Ring, SENTINEL};

/// A position inside a [`Ring`]: one slot of the ring's arena.
///
/// A `Cursor` is a plain copyable token — it does not borrow the ring, and
/// it never owns the node it names. Navigation and dereference go through
/// the ring, so a `&Ring` gives read-only access and a `&mut Ring` gives
/// mutable access through the very same token.
///
/// Two cursors are equal iff they name the same slot. Because slot indices
/// are stable for the lifetime of a node, erasing a node invalidates only
/// the cursors that named that node; all others remain valid.
///
/// # Examples
///
/// Here is a simple example showing how cursors move. (The sentinel node
/// of the ring is denoted by `#`.)
///
/// ```
/// use bi_ring::Ring;
///
/// // Create a ring: [ A B C #]
/// let mut ring = Ring::new();
/// ring.push_front('C', 3);
/// ring.push_front('B', 2);
/// ring.push_front('A', 1);
///
/// // A cursor at the front: [|A B C #]
/// let mut at = ring.begin();
/// assert_eq!(ring.key(at), &'A');
///
/// // Move forward: [ A|B C #]
/// at = ring.next(at);
/// assert_eq!(ring.key(at), &'B');
///
/// // Moves are cyclic through the sentinel: advancing from C reaches #,
/// // advancing once more wraps to A.
/// at = ring.next(ring.next(at));
/// assert_eq!(at, ring.end());
/// assert_eq!(ring.next(at), ring.begin());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(pub(crate) usize);

impl<K, I> Ring<K, I> {
    /// Returns a cursor to the first real node, or to the sentinel if the
    /// ring is empty — so `begin() == end()` characterises emptiness.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// assert_eq!(ring.begin(), ring.end());
    ///
    /// ring.push_front(1, "one");
    /// assert_ne!(ring.begin(), ring.end());
    /// assert_eq!(ring.key(ring.begin()), &1);
    /// ```
    #[inline]
    pub fn begin(&self) -> Cursor {
        Cursor(self.node(SENTINEL).next)
    }

    /// Returns the cursor to the sentinel node. Unlike `begin`, the result
    /// never changes: the sentinel is always present, even in an empty
    /// ring.
    #[inline]
    pub fn end(&self) -> Cursor {
        Cursor(SENTINEL)
    }

    /// Returns the cursor one step forward of `at`, wrapping through the
    /// sentinel: advancing from the last real node reaches `end()`, and
    /// advancing from `end()` reaches `begin()`. On an empty ring every
    /// move stays at `end()`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is stale (its node was erased).
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
    /// let second = ring.next(ring.begin());
    /// assert_eq!(ring.key(second), &2);
    /// assert_eq!(ring.next(second), ring.end());
    /// assert_eq!(ring.next(ring.end()), ring.begin());
    /// ```
    #[inline]
    pub fn next(&self, at: Cursor) -> Cursor {
        Cursor(self.node(at.0).next)
    }

    /// Returns the cursor one step backward of `at`, wrapping through the
    /// sentinel: stepping back from `begin()` reaches `end()`, and stepping
    /// back from `end()` reaches the last real node.
    ///
    /// # Panics
    ///
    /// Panics if `at` is stale (its node was erased).
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
    /// assert_eq!(ring.past(ring.begin()), ring.end());
    /// let last = ring.past(ring.end());
    /// assert_eq!(ring.key(last), &2);
    /// ```
    #[inline]
    pub fn past(&self, at: Cursor) -> Cursor {
        Cursor(self.node(at.0).past)
    }

    /// Borrows the key of the node at `at`.
    ///
    /// Dereferencing `end()` is *not* an error: it yields the sentinel's
    /// default-constructed key. Callers iterating cyclically rely on this
    /// to detect that the ring is exhausted without a separate check.
    ///
    /// # Panics
    ///
    /// Panics if `at` is stale (its node was erased).
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(7, "seven");
    /// assert_eq!(ring.key(ring.begin()), &7);
    /// assert_eq!(ring.key(ring.end()), &0);
    /// ```
    #[inline]
    pub fn key(&self, at: Cursor) -> &K {
        &self.node(at.0).key
    }

    /// Borrows the info of the node at `at`. Dereferencing `end()` yields
    /// the sentinel's default-constructed info; see [`Ring::key`].
    ///
    /// # Panics
    ///
    /// Panics if `at` is stale (its node was erased).
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(7, "seven");
    /// assert_eq!(ring.info(ring.begin()), &"seven");
    /// assert_eq!(ring.info(ring.end()), &"");
    /// ```
    #[inline]
    pub fn info(&self, at: Cursor) -> &I {
        &self.node(at.0).info
    }

    /// Mutably borrows the key of the node at `at`.
    ///
    /// The sentinel is reachable here like everywhere else: writing
    /// through `end()` clobbers the default value that later sentinel
    /// dereferences observe. Doing so is a caller error, not checked.
    ///
    /// # Panics
    ///
    /// Panics if `at` is stale (its node was erased).
    #[inline]
    pub fn key_mut(&mut self, at: Cursor) -> &mut K {
        &mut self.node_mut(at.0).key
    }

    /// Mutably borrows the info of the node at `at`. The caveat about
    /// writing through `end()` on [`Ring::key_mut`] applies here as well.
    ///
    /// # Panics
    ///
    /// Panics if `at` is stale (its node was erased).
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(1, 10);
    /// *ring.info_mut(ring.begin()) = 11;
    /// assert_eq!(ring.info(ring.begin()), &11);
    /// ```
    #[inline]
    pub fn info_mut(&mut self, at: Cursor) -> &mut I {
        &mut self.node_mut(at.0).info
    }
}

#[cfg(test)]
mod tests {
    use crate::ring::Ring;

    #[test]
    fn empty_ring_cursors_stay_at_end() {
        let ring: Ring<i32, String> = Ring::new();
        assert_eq!(ring.begin(), ring.end());
        assert_eq!(ring.next(ring.begin()), ring.end());
        assert_eq!(ring.past(ring.begin()), ring.end());
        assert_eq!(ring.next(ring.end()), ring.end());
        assert_eq!(ring.past(ring.end()), ring.end());
    }

    #[test]
    fn sentinel_dereference_yields_defaults() {
        let ring: Ring<i32, String> = Ring::new();
        assert_eq!(ring.key(ring.end()), &0);
        assert_eq!(ring.info(ring.end()), &String::new());
    }

    #[test]
    fn wraparound_in_both_directions() {
        let mut ring = Ring::new();
        ring.push_front(3, 'c');
        ring.push_front(2, 'b');
        ring.push_front(1, 'a');

        assert_eq!(ring.past(ring.begin()), ring.end());
        assert_eq!(ring.next(ring.end()), ring.begin());
        assert_eq!(ring.key(ring.past(ring.end())), &3);

        // A full forward lap visits every node and the sentinel once.
        let mut at = ring.begin();
        let mut seen = Vec::new();
        loop {
            at = ring.next(at);
            if at == ring.begin() {
                break;
            }
            seen.push(*ring.key(at));
        }
        assert_eq!(seen, [2, 3, 0]);
    }

    #[test]
    fn cursor_equality_is_slot_identity() {
        let mut ring = Ring::new();
        let a = ring.push_front(1, "one");
        let b = ring.push_front(1, "one");
        // Equal contents, distinct nodes.
        assert_ne!(a, b);
        assert_eq!(a, ring.next(b));
        assert_eq!(b, ring.begin());
    }

    #[test]
    fn key_and_info_are_mutable_through_cursors() {
        let mut ring = Ring::new();
        let at = ring.push_front(1, "one".to_string());
        *ring.key_mut(at) = 9;
        ring.info_mut(at).push_str(" node");
        assert_eq!(ring.key(at), &9);
        assert_eq!(ring.info(at), "one node");
    }
}
