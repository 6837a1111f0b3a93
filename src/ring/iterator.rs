use crate::ring::{Ring, Slot, SENTINEL};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;

/// An iterator over the key/info pairs of a `Ring`.
///
/// It walks a half-open range of chain slots `start..end`, where `start`
/// is inclusive and `end` (the sentinel) is not, so it is fused and
/// non-cyclic — unlike cursor navigation, it never wraps around.
///
/// # Examples
///
/// ```compile_fail
/// use bi_ring::Ring;
///
/// let mut ring = Ring::new();
/// ring.push_front(1, "one");
/// let mut iter = ring.iter();
///
/// // Won't compile, because the ring is already borrowed immutably.
/// ring.push_front(0, "zero");
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, K: 'a, I: 'a> {
    ring: &'a Ring<K, I>,
    start: usize,
    end: usize,
    len: usize,
}

impl<'a, K: 'a, I: 'a> Iter<'a, K, I> {
    pub(crate) fn new(ring: &'a Ring<K, I>) -> Self {
        Self {
            ring,
            start: ring.node(SENTINEL).next,
            end: SENTINEL,
            len: ring.len(),
        }
    }
}

impl<'a, K: 'a, I: 'a> Clone for Iter<'a, K, I> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            start: self.start,
            end: self.end,
            len: self.len,
        }
    }
}

impl<'a, K: fmt::Debug + 'a, I: fmt::Debug + 'a> fmt::Debug for Iter<'a, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        let mut at = self.start;
        while at != self.end {
            let node = self.ring.node(at);
            f.field(&(&node.key, &node.info));
            at = node.next;
        }
        f.finish()
    }
}

impl<'a, K: 'a, I: 'a> Iterator for Iter<'a, K, I> {
    type Item = (&'a K, &'a I);

    /// Yield `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let node = self.ring.node(self.start);
        self.start = node.next;
        self.len -= 1;
        Some((&node.key, &node.info))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, K: 'a, I: 'a> DoubleEndedIterator for Iter<'a, K, I> {
    /// Reset the iterating range to `start..(end.past)` and yield `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end = self.ring.node(self.end).past;
        let node = self.ring.node(self.end);
        self.len -= 1;
        Some((&node.key, &node.info))
    }
}

impl<'a, K: 'a, I: 'a> ExactSizeIterator for Iter<'a, K, I> {}

impl<'a, K: 'a, I: 'a> FusedIterator for Iter<'a, K, I> {}

/// A mutable iterator over the key/info pairs of a `Ring`, yielding
/// `(&key, &mut info)`.
///
/// `start..end` denotes the remaining subrange of the chain, as in
/// [`Iter`]. Keys stay immutable during iteration so that a key cannot
/// change while `find` results are being cached by the caller; mutate keys
/// through [`Ring::key_mut`] instead.
///
/// Though the `IterMut` holds only a raw pointer to the slot arena, it
/// *borrows* (mutably) from the ring; a phantom marker of
/// `&'a mut Ring<K, I>` keeps the ring unreadable while it lives.
///
/// # Examples
///
/// ```compile_fail
/// use bi_ring::Ring;
///
/// let mut ring = Ring::new();
/// ring.push_front(1, "one");
/// let mut iter = ring.iter_mut();
/// println!("{:?}", ring.len());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, K: 'a, I: 'a> {
    slots: *mut Slot<K, I>,
    start: usize,
    end: usize,
    len: usize,
    _marker: PhantomData<&'a mut Ring<K, I>>,
}

impl<'a, K: 'a, I: 'a> IterMut<'a, K, I> {
    pub(crate) fn new(ring: &'a mut Ring<K, I>) -> Self {
        let start = ring.node(SENTINEL).next;
        let len = ring.len();
        Self {
            slots: ring.slots.as_mut_ptr(),
            start,
            end: SENTINEL,
            len,
            _marker: PhantomData,
        }
    }

    /// Borrow the node in slot `at` for the remaining lifetime of the
    /// borrow of the ring.
    ///
    /// # Safety
    ///
    /// `at` must be a live chain slot, and no other reference to that slot
    /// may be alive. Each chain slot is visited at most once per
    /// iteration, so the references handed out never overlap.
    unsafe fn node_mut<'b>(&mut self, at: usize) -> &'b mut crate::ring::Node<K, I> {
        match &mut *self.slots.add(at) {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!("ring chain links a freed slot"),
        }
    }
}

impl<'a, K: fmt::Debug + 'a, I: fmt::Debug + 'a> fmt::Debug for IterMut<'a, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut at = self.start;
        while at != self.end {
            // SAFETY: `start..end` is a valid chain range, and shared reads
            // of slots not currently lent out are fine.
            let node = match unsafe { &*self.slots.add(at) } {
                Slot::Occupied(node) => node,
                Slot::Free { .. } => unreachable!("ring chain links a freed slot"),
            };
            f.field(&(&node.key, &node.info));
            at = node.next;
        }
        f.finish()
    }
}

impl<'a, K: 'a, I: 'a> Iterator for IterMut<'a, K, I> {
    type Item = (&'a K, &'a mut I);

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start` is a live chain slot not yielded before.
        let node = unsafe { self.node_mut(self.start) };
        self.start = node.next;
        self.len -= 1;
        Some((&node.key, &mut node.info))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, K: 'a, I: 'a> DoubleEndedIterator for IterMut<'a, K, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `end.past` is a live chain slot not yielded before.
        let node = unsafe {
            let past = match &*self.slots.add(self.end) {
                Slot::Occupied(node) => node.past,
                Slot::Free { .. } => unreachable!("ring chain links a freed slot"),
            };
            self.end = past;
            self.node_mut(past)
        };
        self.len -= 1;
        Some((&node.key, &mut node.info))
    }
}

impl<'a, K: 'a, I: 'a> ExactSizeIterator for IterMut<'a, K, I> {}

impl<'a, K: 'a, I: 'a> FusedIterator for IterMut<'a, K, I> {}

unsafe impl<K: Sync, I: Send> Send for IterMut<'_, K, I> {}

unsafe impl<K: Sync, I: Sync> Sync for IterMut<'_, K, I> {}

/// An owning iterator over the key/info pairs of a `Ring`.
///
/// This `struct` is created by the [`into_iter`] method on [`Ring`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: Ring::into_iter
pub struct IntoIter<K, I> {
    ring: Ring<K, I>,
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for IntoIter<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("ring", &self.ring).finish()
    }
}

impl<K, I> Iterator for IntoIter<K, I> {
    type Item = (K, I);

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.take_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<K, I> DoubleEndedIterator for IntoIter<K, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.take_back()
    }
}

impl<K, I> ExactSizeIterator for IntoIter<K, I> {}

impl<K, I> FusedIterator for IntoIter<K, I> {}

impl<K, I> IntoIterator for Ring<K, I> {
    type Item = (K, I);
    type IntoIter = IntoIter<K, I>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { ring: self }
    }
}

impl<'a, K, I> IntoIterator for &'a Ring<K, I> {
    type Item = (&'a K, &'a I);
    type IntoIter = Iter<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, I> IntoIterator for &'a mut Ring<K, I> {
    type Item = (&'a K, &'a mut I);
    type IntoIter = IterMut<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: Default, I: Default> FromIterator<(K, I)> for Ring<K, I> {
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut ring = Ring::new();
        ring.extend(iter);
        ring
    }
}

/// Appends each pair before `end()`, preserving iteration order.
impl<K, I> Extend<(K, I)> for Ring<K, I> {
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        let end = self.end();
        iter.into_iter().for_each(|(key, info)| {
            self.insert(end, key, info);
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::ring::Ring;
    use std::iter::FromIterator;

    fn sample() -> Ring<i32, char> {
        Ring::from_iter(vec![(1, 'a'), (2, 'b'), (3, 'c')])
    }

    #[test]
    fn iter_front_to_back() {
        let ring = sample();
        let mut iter = ring.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some((&1, &'a')));
        assert_eq!(iter.next(), Some((&2, &'b')));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some((&3, &'c')));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None); // Fused and non-cyclic
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn iter_from_both_ends() {
        let ring = sample();
        let mut iter = ring.iter();
        assert_eq!(iter.next(), Some((&1, &'a')));
        assert_eq!(iter.next_back(), Some((&3, &'c')));
        assert_eq!(iter.next_back(), Some((&2, &'b')));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_last_is_back() {
        let ring = sample();
        assert_eq!(ring.iter().last(), Some((&3, &'c')));
        assert_eq!(ring.iter().rev().collect::<Vec<_>>().first(), Some(&(&3, &'c')));
    }

    #[test]
    fn iter_mut_updates_infos() {
        let mut ring = sample();
        for (key, info) in ring.iter_mut() {
            if *key != 2 {
                *info = '_';
            }
        }
        assert_eq!(
            Vec::from_iter(ring),
            vec![(1, '_'), (2, 'b'), (3, '_')]
        );
    }

    #[test]
    fn iter_mut_backwards() {
        let mut ring = sample();
        let mut iter = ring.iter_mut();
        assert_eq!(iter.next_back().map(|(k, i)| (*k, *i)), Some((3, 'c')));
        assert_eq!(iter.next().map(|(k, i)| (*k, *i)), Some((1, 'a')));
        assert_eq!(iter.next_back().map(|(k, i)| (*k, *i)), Some((2, 'b')));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn into_iter_drains_owned_pairs() {
        let ring = sample();
        let mut iter = ring.into_iter();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(iter.next(), Some((1, 'a')));
        assert_eq!(iter.next_back(), Some((3, 'c')));
        assert_eq!(iter.next(), Some((2, 'b')));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn from_iter_preserves_order() {
        let ring = sample();
        let keys: Vec<i32> = ring.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, [1, 2, 3]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn extend_appends_at_the_back() {
        let mut ring = sample();
        ring.extend(vec![(4, 'd')]);
        assert_eq!(ring.key(ring.past(ring.end())), &4);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn iter_debug_walks_remaining_range() {
        let ring = sample();
        let mut iter = ring.iter();
        iter.next();
        assert_eq!(format!("{:?}", iter), "Iter((2, 'b'), (3, 'c'))");
    }
}
