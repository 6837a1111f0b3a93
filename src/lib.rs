//! This crate provides a circular doubly-linked list ("ring") keyed by a
//! user-supplied key type and carrying an associated payload ("info") type.
//!
//! The [`Ring`] allows inserting and removing nodes at any given position in
//! constant time, addressed by lightweight [`Cursor`] tokens. In compromise,
//! looking a key up ([`Ring::find`]) takes *O*(*n*) time.
//!
//! Here is a quick example showing how the ring works.
//!
//! ```
//! use bi_ring::Ring;
//!
//! let mut ring = Ring::new();
//! ring.push_front(3, "three");
//! ring.push_front(2, "two");
//! ring.push_front(1, "one");
//!
//! // Front-to-back order is the reverse of the push order.
//! let keys: Vec<i32> = ring.iter().map(|(key, _)| *key).collect();
//! assert_eq!(keys, [1, 2, 3]);
//!
//! // Cursors wrap around through the sentinel.
//! let last = ring.past(ring.end());
//! assert_eq!(ring.key(last), &3);
//! assert_eq!(ring.next(last), ring.end());
//! assert_eq!(ring.next(ring.end()), ring.begin());
//! ```
//!
//! # Memory Layout
//!
//! Nodes live in a slot arena owned by the ring; slot 0 is the **sentinel**,
//! a permanent boundary node that never holds caller data. The `past` and
//! `next` fields of every node (the sentinel included) are slot indices, so
//! the chain is cyclic by construction and no link is ever absent:
//!
//! ```text
//!          ┌───────────────────────────────────────────────────┐
//!          ↓                                                   │
//!    ╔═══════════╗      ╔═══════════╗        ┌───────────┐     │
//!    ║   next    ║ ───→ ║   next    ║ ─ ┄ ─→ │   next    │ ────┘
//!    ╟───────────╢      ╟───────────╢        ├───────────┤
//! ┌─ ║   past    ║ ←─── ║   past    ║ ←─ ┄ ─ │   past    │
//! │  ╟───────────╢      ╟───────────╢        ├───────────┤
//! │  ║ key, info ║      ║ key, info ║        ┊ defaults  ┊
//! │  ╚═══════════╝      ╚═══════════╝        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │    first node         next node             sentinel
//! └─────────────────────────────────────────────────↑ (slot 0)
//! ```
//!
//! In an empty ring the sentinel links to itself in both directions, so
//! [`Ring::begin`] equals [`Ring::end`] and every cursor move stays put.
//! The sentinel holds the *default* key and info values, and dereferencing
//! [`Ring::end`] yields them rather than failing — callers loop until they
//! observe the sentinel to detect that the ring is exhausted.
//!
//! # Cursors
//!
//! A [`Cursor`] is a copyable token naming one slot of one ring. It carries
//! no borrow: navigation and dereference go through the ring
//! ([`Ring::next`], [`Ring::past`], [`Ring::key`], [`Ring::info`]), so
//! read-only access needs only `&Ring` and mutation needs `&mut Ring`.
//! Removing a node invalidates only the cursors that named it; all other
//! cursors remain valid.
//!
//! A cursor is only meaningful for the ring that issued it. Handing a
//! cursor to a *different* ring is a logic error: it is memory safe, but it
//! addresses whichever node (if any) happens to occupy that slot there.
//! Using a cursor after its node was erased panics.
//!
//! # Iteration
//!
//! Iterating over a ring is by the [`Iter`] and [`IterMut`] iterators.
//! These are double-ended iterators and iterate the ring like an array
//! (fused and non-cyclic), yielding key/info pairs front to back.
//! [`IterMut`] provides mutability of the info values (but not the keys,
//! and not the linked structure of the ring).
//!
//! ```
//! use bi_ring::Ring;
//! use std::iter::FromIterator;
//!
//! let mut ring = Ring::from_iter(vec![(1, 10), (2, 20), (3, 30)]);
//! let mut iter = ring.iter();
//! assert_eq!(iter.next(), Some((&1, &10)));
//! assert_eq!(iter.next_back(), Some((&3, &30)));
//!
//! ring.iter_mut().for_each(|(_, info)| *info += 1);
//! assert_eq!(Vec::from_iter(ring), vec![(1, 11), (2, 21), (3, 31)]);
//! ```
//!
//! # Diagnostics
//!
//! When the key and info types are printable, the ring renders a plain
//! textual dump, one `Key: <k>, Info: <i>` line per live node in
//! front-to-back order, omitting the sentinel. The dump is meant for eyes,
//! not parsers, and carries no compatibility guarantee.
//!
//! ```
//! use bi_ring::Ring;
//!
//! let mut ring = Ring::new();
//! ring.push_front(2, "second");
//! ring.push_front(1, "first");
//! assert_eq!(ring.to_string(), "Key: 1, Info: first\nKey: 2, Info: second\n");
//! ```

#[doc(inline)]
pub use ring::cursor::Cursor;
#[doc(inline)]
pub use ring::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use ring::Ring;

pub mod ring;

mod experiments;
