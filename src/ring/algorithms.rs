use crate::ring::cursor::Cursor;
use crate::ring::{Ring, SENTINEL};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

impl<K, I> Ring<K, I> {
    /// Returns a cursor to the first node (in front-to-back order) whose
    /// key compares equal to `key`, or `end()` if no node matches. The
    /// scan never visits the sentinel and never mutates the ring.
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
    /// let hit = ring.find(&2);
    /// assert_eq!(ring.info(hit), &"two");
    /// assert_eq!(ring.find(&9), ring.end());
    /// ```
    pub fn find(&self, key: &K) -> Cursor
    where
        K: PartialEq,
    {
        let mut at = self.node(SENTINEL).next;
        while at != SENTINEL {
            let node = self.node(at);
            if node.key == *key {
                return Cursor(at);
            }
            at = node.next;
        }
        self.end()
    }

    /// Returns `true` if the ring holds a node with the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bi_ring::Ring;
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(1, "one");
    ///
    /// assert!(ring.contains_key(&1));
    /// assert!(!ring.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.find(key) != self.end()
    }
}

impl<K: PartialEq, I: PartialEq> PartialEq for Ring<K, I> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<K: Eq, I: Eq> Eq for Ring<K, I> {}

impl<K: PartialOrd, I: PartialOrd> PartialOrd for Ring<K, I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<K: Ord, I: Ord> Ord for Ring<K, I> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// Deep copy: the clone rebuilds the chain front to back into a fresh
/// arena and never aliases the source's nodes.
impl<K, I> Clone for Ring<K, I>
where
    K: Clone + Default,
    I: Clone + Default,
{
    fn clone(&self) -> Self {
        let mut ring = Ring::with_capacity(self.len());
        ring.extend(self.iter().map(|(key, info)| (key.clone(), info.clone())));
        ring
    }

    /// Clears `self`, then rebuilds it from `source` front to back.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().map(|(key, info)| (key.clone(), info.clone())));
    }
}

impl<K: Hash, I: Hash> Hash for Ring<K, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for (key, info) in self {
            key.hash(state);
            info.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

/// The diagnostic dump: each live node as `Key: <k>, Info: <i>`, one line
/// per node in front-to-back order, omitting the sentinel. Not a parseable
/// format; no compatibility guarantee.
impl<K: fmt::Display, I: fmt::Display> fmt::Display for Ring<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, info) in self.iter() {
            writeln!(f, "Key: {}, Info: {}", key, info)?;
        }
        Ok(())
    }
}
