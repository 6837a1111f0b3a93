//! An experimental, fully safe formulation of the keyed ring built on
//! branded cells instead of an arena: ownership of each entry is split
//! into two static halves, one per incoming link. Kept private as a
//! testbed; the public `Ring` does not depend on it.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct Ring<'id, K, I> {
    links: [Option<EntryPtr<'id, K, I>>; 2],
}

struct Entry<'id, K, I> {
    links: [Option<EntryPtr<'id, K, I>>; 2],
    key: K,
    info: I,
}

type EntryPtr<'id, K, I> = Half<GhostCell<'id, Entry<'id, K, I>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id, K, I> Entry<'id, K, I> {
    fn new(key: K, info: I) -> Self {
        let links = [None, None];
        Self { links, key, info }
    }
}

impl<'id, K, I> Default for Ring<'id, K, I> {
    fn default() -> Self {
        let links = [None, None];
        Self { links }
    }
}

impl<'id, K, I> Ring<'id, K, I> {
    const FRONT: usize = 0;
    const BACK: usize = 1;

    fn front_ptr(&self) -> Option<&EntryPtr<'id, K, I>> {
        self.links[Self::FRONT].as_ref()
    }

    fn push_at(&mut self, side: usize, key: K, info: I, token: &mut GhostToken<'id>) {
        let oppo = 1 - side;
        let (left, right) = Full::split(Full::new(GhostCell::new(Entry::new(key, info))));
        match self.links[side].take() {
            Some(this_side) => {
                this_side.deref().borrow_mut(token).links[oppo] = Some(left);
                right.deref().borrow_mut(token).links[side] = Some(this_side);
            }
            None => self.links[oppo] = Some(left),
        }
        self.links[side] = Some(right);
    }

    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Option<(K, I)> {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let right = self.links[side].take()?;
        let left = match right.deref().borrow_mut(token).links[side].take() {
            Some(this_side) => {
                let left = this_side.deref().borrow_mut(token).links[oppo]
                    .take()
                    .unwrap();
                self.links[side] = Some(this_side);
                left
            }
            None => self.links[oppo].take().unwrap(),
        };
        let entry = Full::into_box(Full::join(left, right)).into_inner();
        Some((entry.key, entry.info))
    }
}

impl<'id, K, I> Ring<'id, K, I> {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn is_empty(&self) -> bool {
        self.front_ptr().is_none()
    }
    pub fn push_front(&mut self, key: K, info: I, token: &mut GhostToken<'id>) {
        self.push_at(Self::FRONT, key, info, token);
    }
    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<(K, I)> {
        self.pop_at(Self::FRONT, token)
    }
    pub fn push_back(&mut self, key: K, info: I, token: &mut GhostToken<'id>) {
        self.push_at(Self::BACK, key, info, token);
    }
    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<(K, I)> {
        self.pop_at(Self::BACK, token)
    }
    pub fn front_key<'a>(&'a self, token: &'a GhostToken<'id>) -> Option<&'a K> {
        self.front_ptr().map(|ptr| &ptr.deref().borrow(token).key)
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::Ring;
    use ghost_cell::GhostToken;

    #[test]
    fn ring_push_pop_keyed() {
        GhostToken::new(|mut token| {
            let mut ring = Ring::new();
            assert!(ring.is_empty());
            ring.push_back(1, "one", &mut token);
            ring.push_front(2, "two", &mut token);
            assert_eq!(ring.front_key(&token), Some(&2));
            assert!(!ring.is_empty());
            assert_eq!(ring.pop_back(&mut token), Some((1, "one")));
            assert_eq!(ring.pop_front(&mut token), Some((2, "two")));
            assert!(ring.is_empty());
        })
    }
}
