//! This crate provides a doubly-linked list with owned nodes, implemented
//! as a ring closed by a single ghost node, with the node storage managed
//! by a pluggable allocator.
//!
//! The [`List`] allows inserting, removing elements at any given position in
//! constant time. In compromise, accessing or mutating elements at any
//! position takes *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use ring_list::List;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(0); // insert 0 at the beginning of the list
//! assert_eq!(cursor.current(), Some(&1));
//! assert_eq!(cursor.view(), &List::from_iter([0, 1, 2, 3, 4]));
//!
//! cursor.seek_to(3).unwrap(); // move the cursor to position 3
//! assert_eq!(cursor.remove(), Some(3)); // and remove that element
//! assert_eq!(cursor.view(), &List::from_iter([0, 1, 2, 4]));
//!
//! cursor.push_front(5); // pushing front to the list is also allowed
//! assert_eq!(cursor.view(), &List::from_iter([5, 0, 1, 2, 4]));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────┐
//!          ↓                                             Ghost node      │
//!    ╔═══════════╗        ╔═══════════╗                  ┌───────────┐   │
//!    ║   next    ║ ─────→ ║   next    ║ ─────→ ┄┄ ─────→ │   next    │ ──┘
//!    ╟───────────╢        ╟───────────╢   Node 1, 2, ... ├───────────┤
//! ┌─ ║   prev    ║ ←───── ║   prev    ║ ←───── ┄┄ ←───── │   prev    │
//! │  ╟───────────╢        ╟───────────╢                  ├───────────┤
//! │  ║  Some(T)  ║        ║  Some(T)  ║                  │   None    │
//! │  ╚═══════════╝        ╚═══════════╝                  └───────────┘
//! │      Node 0                                              ↑   ↑
//! └──────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                  │
//! ║   ghost   ║ ─────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╟───────────╢
//! ║   alloc   ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `ghost` that points to the ghost node;
//! - a length field `len` holding the number of elements;
//! - an allocator `alloc` that provides and reclaims the storage of every
//!   node. It defaults to the global allocator and can be replaced through
//!   [`List::new_in`] by anything implementing the [`Allocator`] trait of
//!   [`allocator_api2`].
//!
//! Every node of the list `List<T>` is heap-allocated and contains:
//! - the `next` pointer that points to the next node (or the ghost node if
//!   it is the last element in the list);
//! - the `prev` pointer that points to the previous node (or the ghost node
//!   if it is the first element in the list);
//! - a value slot, `Some` for every element and `None` for the ghost node.
//!   The slot tag is what distinguishes the ghost; no casting between node
//!   representations is involved anywhere.
//!
//! Initially, there is only the ghost node in an empty list, of which the
//! `next` and `prev` pointers point to itself.
//!
//! As elements are inserted, `ghost.next` points to the first element, and
//! `ghost.prev` points to the last element of the list.
//!
//! In convention, in a list with length *n*, the nodes are indexed by 0, 1,
//! ..., *n* - 1, and the ghost node is always indexed by *n*. (In an empty
//! list, the ghost node is indexed by 0, which is equal to its length 0.)
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These
//! are double-ended iterators and iterate the list like an array (fused and
//! non-cyclic). [`IterMut`] provides mutability of the elements (but not of
//! the linked structure of the list).
//!
//! ## Examples
//!
//! ```
//! use ring_list::List;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursor Views
//!
//! Beside iteration, the cursors [`Cursor`] and [`CursorMut`] provide more
//! flexible ways of viewing a list.
//!
//! As the names suggest, they are like cursors and can move forward or
//! backward over the list. In a list with length *n*, there are *n* + 1
//! valid locations for the cursor, indexed by 0, 1, ..., *n*, where *n* is
//! the ghost node of the list.
//!
//! The checked moves [`move_next`] and [`move_prev`] refuse to cross the
//! ghost node and report [`Error::GhostBoundary`] instead; the cyclic moves
//! wrap around. Dereferencing the ghost position yields `None`, never an
//! invalid access.
//!
//! An immutable cursor can also be used as an iterator, which is cyclic and
//! not fused.
//!
//! **Warning**: Though cursor iterators have a method `rev`, they **DO
//! NOT** behave as double-ended iterators. Instead, they create a new
//! iterator that reverses the moving direction of the cursor.
//!
//! ## Examples
//!
//! ```
//! use ring_list::List;
//!
//! let list = List::from_iter([1, 2, 3]);
//! // Create a cursor iterator
//! let mut cursor_iter = list.cursor_start().into_iter();
//! assert_eq!(cursor_iter.next(), Some(&1));
//! assert_eq!(cursor_iter.next(), Some(&2));
//! assert_eq!(cursor_iter.next(), Some(&3));
//! assert_eq!(cursor_iter.next(), None);
//! assert_eq!(cursor_iter.next(), Some(&1)); // Not fused and cyclic
//!
//! // Create a cursor back iterator which reverses the moving direction
//! // of the cursor
//! let mut cursor_iter = cursor_iter.rev();
//! assert_eq!(cursor_iter.next(), Some(&1)); // Iterate in reversed direction
//! assert_eq!(cursor_iter.next(), None); // Pass through the ghost node boundary
//! assert_eq!(cursor_iter.next(), Some(&3)); // Reaches the ghost node
//! ```
//!
//! # Cursor Mutations
//!
//! [`CursorMut`] provides many useful ways to mutate the list in any
//! position.
//! - [`insert`]: insert a new item at the cursor;
//! - [`remove`]: remove the item at the cursor;
//! - [`backspace`]: remove the item before the cursor;
//! - [`split`]: split the list into a new one, from the cursor position to
//!   the end;
//! - [`splice`]: splice another list before the cursor position;
//!
//! ## Examples
//!
//! ```
//! use ring_list::List;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(5); // becomes [5, 1, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! assert!(cursor.seek_forward(2).is_ok());
//! assert_eq!(cursor.remove(), Some(3)); // becomes [5, 1, 2, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(cursor.backspace(), Some(2)); // becomes [5, 1, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
//! ```
//!
//! See more functions in [`CursorMut`].
//!
//! # Structural algorithms
//!
//! Three operations restructure the ring without ever copying values
//! around:
//! - [`List::reverse`] relinks every node in place;
//! - [`List::dedup`] removes adjacent equal elements, releasing exactly the
//!   dropped nodes;
//! - [`Clone::clone_from`] overwrites elements in place and asks the
//!   allocator only for the difference in lengths.
//!
//! # Errors
//!
//! Fallible operations report the [`Error`] enum. The infallible insertion
//! API aborts on allocation failure exactly like the standard containers;
//! `try_`-variants surface [`Error::Alloc`] and leave the list untouched.
//!
//! [`Allocator`]: allocator_api2::alloc::Allocator
//! [`move_next`]: crate::list::cursor::Cursor::move_next
//! [`move_prev`]: crate::list::cursor::Cursor::move_prev
//! [`insert`]: crate::list::cursor::CursorMut::insert
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`backspace`]: crate::list::cursor::CursorMut::backspace
//! [`split`]: crate::list::cursor::CursorMut::split
//! [`splice`]: crate::list::cursor::CursorMut::splice

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use list::cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use list::iterator::{Drain, DrainFilter, IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod error;
pub mod list;
