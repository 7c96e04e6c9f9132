//! Node storage: allocator-mediated acquisition and release of ring nodes.
//!
//! Storage and value lifetime are handled in separate steps on purpose:
//! acquiring raw space, writing the record, taking the value back out and
//! returning the space are each their own call, so the list can pair them
//! differently per operation (removal takes the value and frees in one
//! place, [`release_node`] drops in place during teardown, and the link
//! algorithms never touch storage at all).
//!
//! Requesting `Layout::new::<Node<T>>()` from the element allocator is what
//! rebinds it to the node record: the same allocator instance serves any
//! node type without a dedicated node-allocator parameter.

use core::alloc::Layout;
use core::ptr::{self, NonNull};

use allocator_api2::alloc::Allocator;

use crate::error::Error;
use crate::list::Node;

/// Acquire storage for exactly one node and initialize it self-linked with
/// the given value slot (`None` makes a ghost node).
///
/// Self-linking keeps every link field valid from the first instant; callers
/// that splice the node into a ring overwrite the links right away, and the
/// ghost node is born in exactly the empty-ring state it needs.
///
/// On failure nothing is linked anywhere and [`Error::Alloc`] is returned.
pub(crate) fn new_node<T, A: Allocator>(
    alloc: &A,
    value: Option<T>,
) -> Result<NonNull<Node<T>>, Error> {
    let storage = allocate_node(alloc)?;
    // SAFETY: `storage` is freshly acquired, properly sized and aligned for
    // one `Node<T>`, and not yet reachable from any ring.
    unsafe {
        ptr::write(
            storage.as_ptr(),
            Node {
                next: storage,
                prev: storage,
                value,
            },
        );
    }
    Ok(storage)
}

/// Acquire raw, uninitialized storage for exactly one node.
pub(crate) fn allocate_node<T, A: Allocator>(alloc: &A) -> Result<NonNull<Node<T>>, Error> {
    let storage = alloc.allocate(node_layout::<T>())?;
    Ok(storage.cast())
}

/// Take the value out of a detached node and return its storage.
///
/// # Safety
///
/// `node` must have been produced by [`new_node`] with this allocator (or an
/// interchangeable clone of it), must already be detached from any ring, and
/// must not be reachable or used afterwards.
pub(crate) unsafe fn take_node<T, A: Allocator>(alloc: &A, node: NonNull<Node<T>>) -> Option<T> {
    let record = ptr::read(node.as_ptr());
    alloc.deallocate(node.cast(), node_layout::<T>());
    record.value
}

/// Drop a detached node in place and return its storage.
///
/// Neither step can fail; element types with failing destructors are outside
/// the container's element contract.
///
/// # Safety
///
/// Same contract as [`take_node`].
pub(crate) unsafe fn release_node<T, A: Allocator>(alloc: &A, node: NonNull<Node<T>>) {
    ptr::drop_in_place(node.as_ptr());
    alloc.deallocate(node.cast(), node_layout::<T>());
}

#[inline]
fn node_layout<T>() -> Layout {
    Layout::new::<Node<T>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocator_api2::alloc::Global;

    #[test]
    fn node_round_trip() {
        let node = new_node(&Global, Some(7_i32)).unwrap();
        unsafe {
            assert_eq!(node.as_ref().next, node);
            assert_eq!(node.as_ref().prev, node);
            assert_eq!(take_node(&Global, node), Some(7));
        }
    }

    #[test]
    fn ghost_has_no_value() {
        let ghost = new_node::<i32, _>(&Global, None).unwrap();
        unsafe {
            assert!(ghost.as_ref().value.is_none());
            release_node(&Global, ghost);
        }
    }
}
