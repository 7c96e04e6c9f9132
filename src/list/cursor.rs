use core::alloc::Layout;
use core::fmt;
use core::fmt::Formatter;
use core::ptr::NonNull;

use allocator_api2::alloc::{handle_alloc_error, Allocator, Global};

use crate::error::Error;
use crate::list::{alloc, List, Node};

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can freely seek
/// back-and-forth.
///
/// In a list with length *n*, there are *n* + 1 valid locations for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the ghost node of the
/// list. The ghost position is the one past the last element, and, walking
/// cyclically, also the one before the first.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost node of
/// the list is denoted by `#`).
/// ```
/// use ring_list::List;
///
/// // Create a list: [ A B C D #]
/// let list = List::from_iter(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #] (index = 0)
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #] (index = 1)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#] (index = 4)
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
///
/// // Move cursor backward: [ A B C|D #] (index = 3)
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Some(&'D'));
///
/// // Create a cursor in the end and move forward: [ A B C D|#] (index = 4)
/// let mut cursor = list.cursor_end();
/// assert!(cursor.move_next().is_err());
/// // Move cursor forward, cyclically: [|A B C D #] (index = 0)
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
pub struct Cursor<'a, T: 'a, A: Allocator = Global> {
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a List<T, A>,
}

impl<'a, T: 'a, A: Allocator> Clone for Cursor<'a, T, A> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            current: self.current,
            list: self.list,
        }
    }
}

/// Compare cursors by their position.
///
/// Only cursors that belong to the same list and have the same position are
/// considered equal.
///
/// # Examples
/// ```
/// use ring_list::List;
///
/// let list = List::from_iter([1, 2, 3]);
/// let cursor1 = list.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// // The same list, and the same position.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next_cyclic();
/// // The same list, but different positions.
/// assert_ne!(cursor1, cursor2);
///
/// let another_list = list.clone();
/// let cursor3 = another_list.cursor_start();
/// // Different list, different positions.
/// assert_ne!(cursor1, cursor3);
/// ```
impl<'a, T: 'a, A: Allocator> PartialEq for Cursor<'a, T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.current == other.current
    }
}

impl<'a, T: 'a, A: Allocator> Eq for Cursor<'a, T, A> {}

/// Compare cursors by their position.
///
/// Only cursors belonging to the same list can compare, so it is
/// `PartialOrd` but not `Ord`.
///
/// # Examples
/// ```
/// use ring_list::List;
///
/// let list = List::from_iter([1, 2, 3]);
/// let cursor1 = list.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// cursor2.move_next_cyclic();
/// // They belong to the same list, can compare.
/// assert!(cursor1 < cursor2);
///
/// let another_list = list.clone();
/// let cursor3 = another_list.cursor_end();
/// // They belong to different lists, cannot compare.
/// assert_eq!(cursor1.partial_cmp(&cursor3), None);
/// ```
impl<'a, T: 'a, A: Allocator> PartialOrd for Cursor<'a, T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        if !self.same_list_with(other) {
            return None;
        }
        Some(self.index().cmp(&other.index()))
    }
}

/// A cursor position also compares equal to a mutable cursor position over
/// the same list at the same node.
impl<'a, 'b, T, A: Allocator> PartialEq<CursorMut<'b, T, A>> for Cursor<'a, T, A> {
    fn eq(&self, other: &CursorMut<'b, T, A>) -> bool {
        core::ptr::eq(self.list, &*other.list) && self.current == other.current
    }
}

impl<'a, 'b, T, A: Allocator> PartialEq<Cursor<'b, T, A>> for CursorMut<'a, T, A> {
    fn eq(&self, other: &Cursor<'b, T, A>) -> bool {
        core::ptr::eq(&*self.list, other.list) && self.current == other.current
    }
}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek
/// back-and-forth, and can safely mutate the list during iteration. This is
/// because it holds the unique borrow of its list: while the cursor lives,
/// no other reference into the list can exist, so removing the node under a
/// foreign reference is not expressible. What the original pointer-based
/// designs leave undefined (using a position whose node was erased) is
/// simply rejected by the borrow checker here.
///
/// For convenience, [`CursorMut::view`] temporarily re-borrows the list
/// immutably.
///
/// # Examples
///
/// ```compile_fail
/// use ring_list::List;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a, A: Allocator = Global> {
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T, A>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a, A: Allocator> $CURSOR<'a, T, A> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.list.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.next` is always valid in a closed ring.
                unsafe { self.current.as_ref().next }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.prev` is always valid in a closed ring.
                unsafe { self.current.as_ref().prev }
            }

            /// Move the cursor forward by given steps, without checking
            /// whether it passes through the ghost node.
            ///
            /// It is unsafe because if the move passes through the ghost
            /// node, the index becomes invalid.
            unsafe fn seek_forward_fast(&mut self, steps: usize) {
                self.index += steps;
                (0..steps).for_each(|_| self.current = self.next_node());
            }

            /// Move the cursor backward by given steps, without checking
            /// whether it passes through the ghost node.
            ///
            /// It is unsafe because if the move passes through the ghost
            /// node, the index becomes invalid.
            unsafe fn seek_backward_fast(&mut self, steps: usize) {
                self.index -= steps;
                (0..steps).for_each(|_| self.current = self.prev_node());
            }
        }

        impl<'a, T: 'a, A: Allocator> $CURSOR<'a, T, A> {
            /// Return the index of the cursor, where the ghost node has
            /// index `len`.
            pub fn index(&self) -> usize {
                self.index
            }

            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Move the cursor to the next position, where passing through
            /// the ghost node is allowed.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from_iter([1, 2, 3]);
            /// let mut cursor = list.cursor_end();
            ///
            /// // The cursor is at the ghost node
            /// assert_eq!(cursor.previous(), Some(&3));
            /// cursor.move_next_cyclic();
            ///
            /// // The cursor is now at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                if self.is_ghost_node() {
                    self.index = 0;
                } else {
                    self.index += 1;
                }
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the ghost node is allowed.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from_iter([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// // The cursor is at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            /// cursor.move_prev_cyclic();
            ///
            /// // The cursor is now at the ghost node
            /// assert_eq!(cursor.previous(), Some(&3));
            /// ```
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                if self.is_front_node() {
                    self.index = self.list.len();
                } else {
                    self.index -= 1;
                }
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return
            /// [`Error::GhostBoundary`] when that would pass through the
            /// ghost node.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from_iter([1, 2, 3]);
            /// let mut cursor = list.cursor_end();
            ///
            /// // The cursor is at the ghost node
            /// assert_eq!(cursor.previous(), Some(&3));
            ///
            /// // Forbid moving past the ghost node
            /// assert!(cursor.move_next().is_err());
            ///
            /// // The cursor is still at the ghost node
            /// assert_eq!(cursor.previous(), Some(&3));
            /// ```
            pub fn move_next(&mut self) -> Result<(), Error> {
                if !self.is_empty() && !self.is_ghost_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err(Error::GhostBoundary)
            }

            /// Move the cursor to the previous position, or return
            /// [`Error::GhostBoundary`] when that would pass through the
            /// ghost node.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from_iter([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// // The cursor is at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            ///
            /// // Forbid moving before the first node
            /// assert!(cursor.move_prev().is_err());
            ///
            /// // The cursor is still at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_prev(&mut self) -> Result<(), Error> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err(Error::GhostBoundary)
            }

            /// Move the cursor forward by given steps, or return an error
            /// when passing through the ghost node would happen.
            ///
            /// If an error occurs, the cursor stays at the ghost node.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), Error> {
                (0..steps).try_for_each(|_| self.move_next())
            }

            /// Move the cursor backward by given steps, or return an error
            /// when passing through the ghost node would happen.
            ///
            /// If an error occurs, the cursor stays at the first node.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), Error> {
                (0..steps).try_for_each(|_| self.move_prev())
            }

            /// Move the cursor to the given position `target`, or return
            /// [`Error::OutOfBounds`] when `target > len`.
            ///
            /// If an error occurs, the cursor stays put. The walk takes the
            /// shorter direction, counted from the current position or from
            /// whichever list end is nearer.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use ring_list::List;
            ///
            /// let list = List::from_iter([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// assert!(cursor.seek_to(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// // Forbid moving to a nonexistent place
            /// assert!(cursor.seek_to(5).is_err());
            ///
            /// // The cursor is still at the third node
            /// assert_eq!(cursor.current(), Some(&3));
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<(), Error> {
                let len = self.list.len();
                if target > len {
                    return Err(Error::OutOfBounds { index: target, len });
                }
                // The move never crosses the ghost node: every branch stays
                // within the index range 0..=len.
                if target == self.index {
                } else if target == 0 {
                    self.move_to_start();
                } else if target == len {
                    self.move_to_end();
                } else if target > self.index {
                    if target - self.index <= len - target {
                        unsafe { self.seek_forward_fast(target - self.index) };
                    } else {
                        self.move_to_end();
                        unsafe { self.seek_backward_fast(len - target) };
                    }
                } else if self.index - target <= target {
                    unsafe { self.seek_backward_fast(self.index - target) };
                } else {
                    self.move_to_start();
                    unsafe { self.seek_forward_fast(target) };
                }
                Ok(())
            }

            /// Set the cursor to the start of the list (i.e. the first
            /// node).
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.list.front_node();
            }

            /// Set the cursor to the end of the list (i.e. the ghost node).
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.list.len();
                self.current = self.list.ghost_node();
            }
        }

        impl<'a, T: fmt::Debug + 'a, A: Allocator> fmt::Debug for $CURSOR<'a, T, A> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.current())
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a, A: Allocator> Cursor<'a, T, A> {
    pub(crate) fn new(list: &'a List<T, A>, current: NonNull<Node<T>>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        core::ptr::eq(self.list, other.list)
    }

    /// Return a reference to the element under the cursor, or `None` if the
    /// cursor is located at the ghost node.
    ///
    /// The reference is borrowed from the list, not from the cursor, so it
    /// stays usable while the cursor keeps moving.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor(0).current(), Some(&1));
    /// assert_eq!(list.cursor(1).current(), Some(&2));
    /// assert_eq!(list.cursor(2).current(), Some(&3));
    /// assert_eq!(list.cursor(3).current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: the node is alive for the whole lifetime of the list
        // borrow, and only the ghost node has an empty value slot.
        unsafe { self.current.as_ref().value.as_ref() }
    }

    /// Return a reference to the element before the cursor, or `None` if
    /// the cursor is located at the first node.
    ///
    /// This is useful when using the cursor as a reversed cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor(0).previous(), None);
    /// assert_eq!(list.cursor(1).previous(), Some(&1));
    /// assert_eq!(list.cursor(2).previous(), Some(&2));
    /// assert_eq!(list.cursor(3).previous(), Some(&3));
    /// ```
    pub fn previous(&self) -> Option<&'a T> {
        // SAFETY: as for `current`; at the first node the previous node is
        // the ghost, whose empty value slot yields `None`.
        unsafe { self.prev_node().as_ref().value.as_ref() }
    }
}

impl<'a, T: 'a, A: Allocator> CursorMut<'a, T, A> {
    pub(crate) fn new(list: &'a mut List<T, A>, current: NonNull<Node<T>>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Insert a new item before the given node `next`.
    ///
    /// It is unsafe because it does not check whether `next` belongs to the
    /// list the cursor points into.
    unsafe fn insert_before(&mut self, next: NonNull<Node<T>>, item: T) -> Result<(), Error> {
        let node = alloc::new_node(&self.list.alloc, Some(item))?;
        self.list.attach_node(next.as_ref().prev, next, node);
        Ok(())
    }
}

// Methods that do not change the linking structure of the list.
impl<'a, T: 'a, A: Allocator> CursorMut<'a, T, A> {
    /// Return a reference to the element under the cursor, or `None` if the
    /// cursor is located at the ghost node.
    pub fn current(&self) -> Option<&T> {
        // SAFETY: only the ghost node has an empty value slot.
        unsafe { self.current.as_ref().value.as_ref() }
    }

    /// Return a mutable reference to the element under the cursor, or
    /// `None` if the cursor is located at the ghost node.
    ///
    /// The borrow is tied to the cursor, so the element cannot be removed
    /// while the reference is live.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// let mut cursor = list.cursor_mut(0);
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the ghost node.
    /// assert!(list.cursor_mut(3).current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // SAFETY: the cursor holds the unique list borrow; only the ghost
        // node has an empty value slot.
        unsafe { (*self.current.as_ptr()).value.as_mut() }
    }

    /// Return a reference to the element before the cursor, or `None` if
    /// the cursor is located at the first node.
    pub fn previous(&self) -> Option<&T> {
        // SAFETY: at the first node the previous node is the ghost, whose
        // empty value slot yields `None`.
        unsafe { self.prev_node().as_ref().value.as_ref() }
    }

    /// Return a mutable reference to the element before the cursor, or
    /// `None` if the cursor is located at the first node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// let mut cursor = list.cursor_mut(3);
    /// *cursor.previous_mut().unwrap() *= 5;
    /// assert_eq!(cursor.previous(), Some(&15));
    ///
    /// // Cannot mutate the ghost node.
    /// assert!(list.cursor_mut(0).previous_mut().is_none());
    /// ```
    pub fn previous_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as for `current_mut`.
        unsafe { (*self.prev_node().as_ptr()).value.as_mut() }
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T, A> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Temporarily view the list via an immutable reference.
    ///
    /// This is useful where the list is not able to be read while a mutable
    /// cursor is being used.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// // Temporarily view the list
    /// assert_eq!(cursor.view().back(), Some(&3));
    ///
    /// cursor.insert(4);
    /// assert_eq!(Vec::from_iter(list), vec![4, 1, 2, 3]);
    /// ```
    pub fn view(&self) -> &List<T, A> {
        self.list
    }
}

// Methods that might change the linking structure of the list.
impl<'a, T: 'a, A: Allocator> CursorMut<'a, T, A> {
    /// Add an element first in the list.
    ///
    /// It is the same as [`List::push_front`], except it avoids another
    /// mutable borrow of the list while the mutable cursor is being used.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end_mut();
    ///
    /// cursor.insert(4);
    /// cursor.push_front(0);
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.previous(), Some(&4));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn push_front(&mut self, item: T) {
        self.list.push_front(item);
        self.index += 1;
    }

    /// Remove the first element and return it, or `None` if the list is
    /// empty.
    ///
    /// It is the same as [`List::pop_front`], except it avoids another
    /// mutable borrow of the list while the mutable cursor is being used.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end_mut();
    ///
    /// cursor.insert(4); // becomes [1, 2, 3, 4], points to # (the ghost node)
    /// assert_eq!(cursor.previous(), Some(&4));
    /// assert_eq!(cursor.pop_front(), Some(1)); // becomes [2, 3, 4], points to #
    /// assert_eq!(cursor.index(), 3);
    /// assert_eq!(cursor.previous(), Some(&4));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![2, 3, 4]);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let at_front = self.is_front_node();
        let item = self.list.pop_front();
        if at_front {
            // the node under the cursor went away; its successor is the
            // new front and keeps index 0
            self.current = self.list.front_node();
        } else {
            self.index -= 1;
        }
        item
    }

    /// Append an element to the back of the list.
    ///
    /// It is the same as [`List::push_back`], except it avoids another
    /// mutable borrow of the list while the mutable cursor is being used.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// cursor.insert(0);
    /// cursor.push_back(4);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn push_back(&mut self, item: T) {
        self.list.push_back(item);
        if self.is_ghost_node() {
            // the ghost index tracks the length
            self.index += 1;
        }
    }

    /// Remove the last element from the list and return it, or `None` if
    /// it is empty.
    ///
    /// It is the same as [`List::pop_back`], except it avoids another
    /// mutable borrow of the list while the mutable cursor is being used.
    /// A cursor located at the last element is left at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// cursor.insert(0);
    /// assert_eq!(cursor.pop_back(), Some(3));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2]);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        if self.is_ghost_node() {
            // the ghost index tracks the length
            self.index -= 1;
        } else if self.current == self.list.back_node() {
            // the node under the cursor goes away; its position becomes
            // the ghost position of the shortened list
            self.current = self.list.ghost_node();
        }
        self.list.pop_back()
    }

    /// Add an element before the cursor position.
    ///
    /// After insertion, the cursor stays at the same node but its `index`
    /// becomes `index + 1`; the new element is at `previous()`.
    ///
    /// Aborts via [`handle_alloc_error`] if the allocator fails; see
    /// [`CursorMut::try_insert`] for the propagating variant.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1);
    ///
    /// cursor.insert(4); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.index(), 2);
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.insert(5); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.previous(), Some(&5));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, item: T) {
        if self.try_insert(item).is_err() {
            handle_alloc_error(Layout::new::<Node<T>>());
        }
    }

    /// Add an element before the cursor position, or return
    /// [`Error::Alloc`] if no node storage could be acquired.
    ///
    /// On failure the list and the cursor are left exactly as they were,
    /// and the element is dropped.
    pub fn try_insert(&mut self, item: T) -> Result<(), Error> {
        // SAFETY: `self.current` is a valid node of the list.
        unsafe { self.insert_before(self.current, item)? };
        self.index += 1;
        Ok(())
    }

    /// Remove the element at the cursor and return it, or return `None`
    /// if the cursor is at the ghost node. After removal, the cursor
    /// is moved to the next node.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_mut(5);
    ///
    /// assert_eq!(cursor.remove(), Some(5)); // becomes [0, 1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.current(), Some(&6));
    ///
    /// cursor.move_to_start();
    /// assert_eq!(cursor.remove(), Some(0)); // becomes [1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 0);
    /// assert_eq!(cursor.current(), Some(&1));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    /// assert_eq!(cursor.index(), 8);
    /// assert_eq!(cursor.current(), None);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 6, 7, 8, 9]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: `self.current` is a valid value node of the list; after
        // detaching, its storage is consumed exactly once.
        unsafe {
            let node = self.list.detach_node(self.current);
            self.current = node.as_ref().next;
            alloc::take_node(&self.list.alloc, node)
        }
    }

    /// Remove the element before the cursor and return it, or return `None`
    /// if the cursor is at the first node. After removal, the cursor is not
    /// moved, but its `index` becomes `index - 1`.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_mut(5);
    ///
    /// assert_eq!(cursor.backspace(), Some(4)); // becomes [0, 1, 2, 3, 5, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 4);
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// cursor.move_to_start();
    /// assert_eq!(cursor.backspace(), None);
    /// assert_eq!(cursor.index(), 0);
    /// assert_eq!(cursor.current(), Some(&0));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.backspace(), Some(9)); // becomes [0, 1, 2, 3, 5, 6, 7, 8]
    /// assert_eq!(cursor.index(), 8);
    /// assert_eq!(cursor.current(), None);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 5, 6, 7, 8]);
    /// ```
    pub fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok().and_then(|_| self.remove())
    }

    /// Splice another list between the current node and its previous node.
    ///
    /// The other list's nodes are reused as they are; its allocator must be
    /// interchangeable with this list's.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([0, 1, 7, 8, 9]);
    /// let list2 = List::from_iter([2, 3, 4, 5, 6]);
    /// let mut cursor = list.cursor_mut(2);
    ///
    /// cursor.splice(list2);
    /// assert_eq!(cursor.current(), Some(&7));
    /// assert_eq!(cursor.index(), 7);
    ///
    /// assert_eq!(Vec::from_iter(list), Vec::from_iter(0..10));
    /// ```
    pub fn splice(&mut self, other: List<T, A>) {
        if let Some(detached) = other.into_detached() {
            self.index += detached.len;
            // SAFETY: `current.prev` and `current` are valid nodes of the
            // list, and they are adjacent.
            unsafe {
                self.list
                    .attach_nodes(self.prev_node(), self.current, detached);
            }
        }
    }
}

impl<'a, T: 'a, A: Allocator + Clone> CursorMut<'a, T, A> {
    /// Split the list into two after the current element (inclusive). This
    /// will return a new list consisting of everything after the cursor
    /// (inclusive), with the original list retaining everything before
    /// (exclusive).
    ///
    /// If the cursor is pointing at the ghost node, `None` will be
    /// returned.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_mut(5);
    ///
    /// let list2 = cursor.split().unwrap();
    /// assert_eq!(cursor.current(), None);
    /// assert_eq!(cursor.index(), 5);
    ///
    /// assert_eq!(Vec::from_iter(list2), vec![5, 6, 7, 8, 9]);
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn split(&mut self) -> Option<List<T, A>> {
        if self.is_ghost_node() {
            return None;
        }
        let len = self.list.len - self.index;
        // After splitting, the cursor is left at the ghost node.
        let current = core::mem::replace(&mut self.current, self.list.ghost_node());
        // SAFETY: `current` is a value node, so `current..=back` is a valid
        // range of the list.
        let detached = unsafe { self.list.detach_nodes(current, self.list.back_node(), len) };
        Some(List::from_detached_in(detached, self.list.alloc.clone()))
    }

    /// Split the list into two before the current element (exclusive). This
    /// will return a new list consisting of everything before the cursor
    /// (exclusive), with the original list retaining everything after
    /// (inclusive).
    ///
    /// If the cursor is pointing at the front node, `None` will be
    /// returned.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_mut(5);
    ///
    /// let list2 = cursor.split_before().unwrap();
    /// assert_eq!(cursor.current(), Some(&5));
    /// assert_eq!(cursor.index(), 0);
    ///
    /// assert_eq!(Vec::from_iter(list2), vec![0, 1, 2, 3, 4]);
    /// assert_eq!(Vec::from_iter(list), vec![5, 6, 7, 8, 9]);
    /// ```
    pub fn split_before(&mut self) -> Option<List<T, A>> {
        if self.is_front_node() {
            return None;
        }
        // The current node becomes a front node, so its index drops to 0.
        let len = core::mem::replace(&mut self.index, 0);
        // SAFETY: `current` is not the front node, so `front..=current.prev`
        // is a valid range of the list.
        let detached =
            unsafe { self.list.detach_nodes(self.list.front_node(), self.prev_node(), len) };
        Some(List::from_detached_in(detached, self.list.alloc.clone()))
    }
}

/// `CursorIter` provides a cursor-like iterator that is cyclic and not
/// fused: after yielding `None` at the ghost node, it starts over from the
/// front.
///
/// If you are looking for container-like iterators, see [`Iter`] and
/// [`IterMut`].
///
/// A mutable counterpart is deliberately absent: a cyclic iterator revisits
/// nodes, so handing out long-lived `&mut` items twice would alias.
///
/// [`Iter`]: crate::Iter
/// [`IterMut`]: crate::IterMut
///
/// # Examples
///
/// ```
/// use ring_list::List;
///
/// let list = List::from_iter([1, 2, 3]);
/// // Create a cursor iterator
/// let mut cursor_iter = list.cursor_start().into_iter();
/// assert_eq!(cursor_iter.next(), Some(&1));
/// assert_eq!(cursor_iter.next(), Some(&2));
/// assert_eq!(cursor_iter.next(), Some(&3));
/// assert_eq!(cursor_iter.next(), None);
/// assert_eq!(cursor_iter.next(), Some(&1)); // Not fused and cyclic
///
/// // Convert back to a cursor
/// let cursor = cursor_iter.into_cursor();
/// assert_eq!(cursor.current(), Some(&2));
/// ```
pub struct CursorIter<'a, T: 'a, A: Allocator = Global> {
    pub(crate) cursor: Cursor<'a, T, A>,
}

/// `CursorBackIter` is largely the same as [`CursorIter`], except that the
/// cursor moves in the opposite direction.
///
/// # Examples
///
/// ```
/// use ring_list::List;
///
/// let list = List::from_iter([1, 2, 3]);
/// // Create a cursor back iterator
/// let mut cursor_iter = list.cursor_end().into_iter().rev();
/// assert_eq!(cursor_iter.next(), Some(&3));
/// assert_eq!(cursor_iter.next(), Some(&2));
/// assert_eq!(cursor_iter.next(), Some(&1));
/// assert_eq!(cursor_iter.next(), None);
/// assert_eq!(cursor_iter.next(), Some(&3)); // Not fused and cyclic
///
/// // Convert back to a cursor
/// let cursor = cursor_iter.into_cursor();
/// assert_eq!(cursor.previous(), Some(&2));
/// ```
pub struct CursorBackIter<'a, T: 'a, A: Allocator = Global> {
    pub(crate) cursor: Cursor<'a, T, A>,
}

impl<'a, T: 'a, A: Allocator> CursorIter<'a, T, A> {
    pub fn into_cursor(self) -> Cursor<'a, T, A> {
        self.cursor
    }
    /// Reverse the moving direction of the underlying cursor.
    pub fn rev(self) -> CursorBackIter<'a, T, A> {
        CursorBackIter {
            cursor: self.cursor,
        }
    }
    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.current()
    }
}

impl<'a, T: 'a, A: Allocator> CursorBackIter<'a, T, A> {
    pub fn into_cursor(self) -> Cursor<'a, T, A> {
        self.cursor
    }
    /// Reverse the moving direction of the underlying cursor.
    pub fn rev(self) -> CursorIter<'a, T, A> {
        CursorIter {
            cursor: self.cursor,
        }
    }
    pub fn peek(&self) -> Option<&'a T> {
        self.cursor.previous()
    }
}

impl<'a, T: 'a, A: Allocator> From<CursorIter<'a, T, A>> for Cursor<'a, T, A> {
    fn from(cursor_iter: CursorIter<'a, T, A>) -> Self {
        cursor_iter.into_cursor()
    }
}

impl<'a, T: 'a, A: Allocator> From<CursorMut<'a, T, A>> for Cursor<'a, T, A> {
    fn from(cursor: CursorMut<'a, T, A>) -> Self {
        cursor.into_cursor()
    }
}

unsafe impl<T: Sync, A: Allocator + Sync> Send for Cursor<'_, T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for Cursor<'_, T, A> {}

unsafe impl<T: Send, A: Allocator + Send> Send for CursorMut<'_, T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for CursorMut<'_, T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Send for CursorIter<'_, T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for CursorIter<'_, T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Send for CursorBackIter<'_, T, A> {}

unsafe impl<T: Sync, A: Allocator + Sync> Sync for CursorBackIter<'_, T, A> {}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use crate::Error;

    #[test]
    fn checked_moves_stop_at_the_ghost() {
        let list = List::from_iter([1, 2, 3]);

        let mut cursor = list.cursor_start();
        assert_eq!(cursor.move_prev(), Err(Error::GhostBoundary));
        assert_eq!(cursor.current(), Some(&1));

        assert_eq!(cursor.seek_forward(3), Ok(()));
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.move_next(), Err(Error::GhostBoundary));
        assert_eq!(cursor.index(), 3);

        let empty = List::<i32>::new();
        let mut cursor = empty.cursor_start();
        assert_eq!(cursor.move_next(), Err(Error::GhostBoundary));
        assert_eq!(cursor.move_prev(), Err(Error::GhostBoundary));
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn cyclic_moves_pass_the_ghost() {
        let list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_end();

        cursor.move_next_cyclic();
        assert_eq!(cursor.current(), Some(&1));
        assert_eq!(cursor.index(), 0);

        cursor.move_prev_cyclic();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn seek_to_takes_the_short_way() {
        let list = List::from_iter(0..10);
        let mut cursor = list.cursor_start();

        for target in [0, 9, 5, 10, 1, 8, 0] {
            assert_eq!(cursor.seek_to(target), Ok(()));
            assert_eq!(cursor.index(), target);
            assert_eq!(cursor.current(), list.iter().nth(target));
        }

        assert_eq!(
            cursor.seek_to(11),
            Err(Error::OutOfBounds { index: 11, len: 10 })
        );
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn insert_keeps_the_cursor_on_its_node() {
        let mut list = List::from_iter([1, 3]);
        let mut cursor = list.cursor_mut(1);

        cursor.insert(2);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.current(), Some(&3));
        assert_eq!(cursor.previous(), Some(&2));

        assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    }

    #[test]
    fn remove_moves_to_the_successor() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_mut(1);

        assert_eq!(cursor.remove(), Some(2));
        assert_eq!(cursor.current(), Some(&3));
        assert_eq!(cursor.index(), 1);

        assert_eq!(list.len(), 2);
        assert_eq!(Vec::from_iter(list), vec![1, 3]);
    }

    #[test]
    fn erase_at_begin_exposes_the_second_element() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_start_mut();

        assert_eq!(cursor.remove(), Some(1));
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(list.len(), 2);
        assert_eq!(list.front(), Some(&2));
    }

    #[test]
    fn remove_a_range_by_repetition() {
        let mut list = List::from_iter(0..6);
        let mut cursor = list.cursor_mut(2);

        // removing twice at one position takes out the range 2..4; the
        // cursor index never moves, the successors slide under it
        let mut removed = Vec::new();
        for _ in 0..2 {
            removed.push(cursor.remove().unwrap());
        }
        assert_eq!(removed, vec![2, 3]);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.current(), Some(&4));

        assert_eq!(Vec::from_iter(list), vec![0, 1, 4, 5]);
    }

    #[test]
    fn pop_back_repositions_a_cursor_on_the_last_node() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_mut(2);

        assert_eq!(cursor.pop_back(), Some(3));
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.index(), cursor.view().len());

        assert_eq!(cursor.pop_back(), Some(2));
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn push_back_keeps_the_ghost_index_in_step() {
        let mut list = List::from_iter([1]);
        let mut cursor = list.cursor_end_mut();

        assert_eq!(cursor.index(), 1);
        cursor.push_back(2);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.previous(), Some(&2));
    }

    #[test]
    fn mutable_and_immutable_cursors_compare() {
        let mut list = List::from_iter([1, 2, 3]);

        let cursor_mut = list.cursor_mut(1);
        {
            let frozen = cursor_mut.as_cursor();
            assert_eq!(frozen.index(), 1);
            assert!(cursor_mut == frozen);
            assert!(frozen == cursor_mut);
        }

        let plain = cursor_mut.into_cursor();
        assert_eq!(plain.index(), 1);
        assert_eq!(plain.current(), Some(&2));
    }

    #[test]
    fn split_and_splice_round_trip() {
        let mut list = List::from_iter(0..10);
        let mut cursor = list.cursor_mut(5);

        let tail = cursor.split().unwrap();
        assert_eq!(cursor.current(), None);
        cursor.splice(tail);
        assert_eq!(Vec::from_iter(list), Vec::from_iter(0..10));
    }

    #[test]
    fn split_before_leaves_the_cursor_at_the_front() {
        let mut list = List::from_iter(0..4);
        let mut cursor = list.cursor_mut(2);

        let head = cursor.split_before().unwrap();
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(Vec::from_iter(head), vec![0, 1]);
        assert_eq!(Vec::from_iter(list), vec![2, 3]);
    }

    #[test]
    fn backspace_removes_before_the_cursor() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut cursor = list.cursor_end_mut();

        assert_eq!(cursor.backspace(), Some(3));
        assert_eq!(cursor.backspace(), Some(2));
        assert_eq!(cursor.backspace(), Some(1));
        assert_eq!(cursor.backspace(), None);
        assert!(cursor.is_empty());
    }
}
