use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::mem;

use allocator_api2::alloc::Allocator;

use crate::list::{alloc, List};

impl<T: PartialEq, A: Allocator> PartialEq for List<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq, A: Allocator> Eq for List<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for List<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord, A: Allocator> Ord for List<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for List<T, A> {
    fn clone(&self) -> Self {
        let mut list = List::new_in(self.alloc.clone());
        list.extend(self.iter().cloned());
        list
    }

    /// Overwrite `self` with the elements of `source`, reusing as many of
    /// the existing nodes as possible.
    ///
    /// The node count only changes by the length difference: the allocator
    /// is asked for `source.len() - self.len()` fresh nodes when `source` is
    /// longer, and handed back `self.len() - source.len()` nodes when it is
    /// shorter. Allocation is the one thing here that can fail, so the
    /// fewer calls, the better.
    ///
    /// The overlap is walked from the back of both lists, which makes the
    /// *leading* nodes of a longer `self` the ones that are released.
    fn clone_from(&mut self, source: &Self) {
        let shared = usize::min(self.len, source.len);
        let mut dst = self.back_node();
        let mut src = source.back_node();
        for _ in 0..shared {
            // SAFETY: both walks stay within the `shared` back-most value
            // nodes of their lists, which all hold values.
            unsafe {
                if let (Some(value), Some(elt)) =
                    ((*dst.as_ptr()).value.as_mut(), src.as_ref().value.as_ref())
                {
                    value.clone_from(elt);
                }
                dst = dst.as_ref().prev;
                src = src.as_ref().prev;
            }
        }
        // `src` now rests on the last element of the prefix of `source`
        // that found no node to reuse (or on the ghost).
        while src != source.ghost_node() {
            // SAFETY: `src` is a value node of `source`.
            let elt = unsafe { src.as_ref().value.as_ref() };
            if let Some(elt) = elt {
                self.push_front(elt.clone());
            }
            src = unsafe { src.as_ref().prev };
        }
        while self.len > source.len {
            self.pop_front();
        }
    }
}

impl<T: Hash, A: Allocator> Hash for List<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T, A: Allocator> List<T, A> {
    /// Returns `true` if the `List` contains an element equal to the given
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Reverses the order of the elements, in place.
    ///
    /// No node is allocated, released or moved; only the link fields
    /// change. Every node of the ring, the ghost included, swaps its
    /// `next` and `prev`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// list.reverse();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        let mut node = ghost;
        loop {
            // SAFETY: every link of a closed ring is a valid node; the walk
            // follows the pre-swap `next` links, visiting each node once.
            let next = unsafe { node.as_ref().next };
            unsafe {
                let current = &mut *node.as_ptr();
                mem::swap(&mut current.next, &mut current.prev);
            }
            node = next;
            if node == ghost {
                break;
            }
        }
    }

    /// Removes every element that compares equal to the element right after
    /// it, so only one element of each run of adjacent equal elements is
    /// left.
    ///
    /// The scan runs from the back, so it is the *last* element of a run
    /// that survives. Equal elements that are not adjacent are all kept;
    /// sort first for a full deduplication.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory,
    /// with one allocator release per removed element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter([1, 2, 2, 3, 3, 3]);
    ///
    /// list.dedup();
    ///
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3]);
    /// ```
    pub fn dedup(&mut self)
    where
        T: PartialEq,
    {
        self.dedup_by(|a, b| a == b)
    }

    /// Removes every element for which `same_bucket(earlier, later)` returns
    /// `true` for it and the element right after it, keeping the back-most
    /// element of each run.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_list::List;
    ///
    /// let mut list = List::from_iter(["foo", "FOO", "bar"]);
    ///
    /// list.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    ///
    /// assert_eq!(Vec::from_iter(list), vec!["FOO", "bar"]);
    /// ```
    pub fn dedup_by<F>(&mut self, mut same_bucket: F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        let ghost = self.ghost_node();
        let mut kept = self.back_node();
        while kept != ghost {
            let earlier = unsafe { kept.as_ref().prev };
            if earlier == ghost {
                break;
            }
            // SAFETY: `kept` and `earlier` are value nodes, so both value
            // slots are filled.
            let in_same_run = unsafe {
                match (earlier.as_ref().value.as_ref(), kept.as_ref().value.as_ref()) {
                    (Some(a), Some(b)) => same_bucket(a, b),
                    _ => false,
                }
            };
            if in_same_run {
                // SAFETY: `earlier` is a value node of this list; detaching
                // it leaves `kept` in place with a new predecessor.
                unsafe {
                    let node = self.detach_node(earlier);
                    alloc::release_node(&self.alloc, node);
                }
            } else {
                kept = earlier;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::list::test_alloc::CountingAlloc;
    use crate::List;
    use itertools::Itertools;
    use rand::prelude::*;

    #[test]
    fn reverse_three_elements() {
        let mut list = List::from_iter([1, 2, 3]);
        list.reverse();
        assert_eq!(list.len(), 3);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![3, 2, 1]);
        list.assert_ring();
    }

    #[test]
    fn reverse_is_an_involution() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in [0usize, 1, 2, 3, 17, 100] {
            let values: Vec<u32> = (0..len).map(|_| rng.gen_range(0..50)).collect();
            let mut list = List::from_iter(values.iter().copied());
            list.reverse();
            assert_eq!(
                Vec::from_iter(list.iter().copied()),
                Vec::from_iter(values.iter().rev().copied())
            );
            list.reverse();
            assert_eq!(Vec::from_iter(list.iter().copied()), values);
            list.assert_ring();
        }
    }

    #[test]
    fn dedup_keeps_one_per_run() {
        let mut list = List::new();
        for x in [1, 2, 2, 3, 3, 3] {
            list.push_back(x);
        }
        assert_eq!(list.len(), 6);

        list.dedup();
        assert_eq!(list.len(), 3);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3]);
        list.assert_ring();
    }

    #[test]
    fn dedup_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let len = rng.gen_range(0..30);
            let values: Vec<u8> = (0..len).map(|_| rng.gen_range(0..4)).collect();

            let mut once = List::from_iter(values.iter().copied());
            once.dedup();
            let mut twice = once.clone();
            twice.dedup();
            assert_eq!(once, twice);

            // value-wise, a single pass agrees with the usual dedup
            let expected: Vec<u8> = values.iter().copied().dedup().collect();
            assert_eq!(Vec::from_iter(once.iter().copied()), expected);
            once.assert_ring();
        }
    }

    #[test]
    fn dedup_keeps_the_last_of_each_run() {
        // identity is the part of the element that equality ignores
        #[derive(Clone, Debug)]
        struct Tagged {
            key: u32,
            tag: &'static str,
        }
        impl PartialEq for Tagged {
            fn eq(&self, other: &Self) -> bool {
                self.key == other.key
            }
        }

        let mut list = List::from_iter([
            Tagged { key: 1, tag: "a" },
            Tagged { key: 1, tag: "b" },
            Tagged { key: 2, tag: "c" },
            Tagged { key: 2, tag: "d" },
            Tagged { key: 2, tag: "e" },
        ]);
        list.dedup();

        let tags: Vec<_> = list.iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec!["b", "e"]);
    }

    #[test]
    fn dedup_ignores_non_adjacent_duplicates() {
        let mut list = List::from_iter([1, 2, 1, 2, 1]);
        list.dedup();
        assert_eq!(Vec::from_iter(list), vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn clone_is_deep() {
        let mut list = List::from_iter([1, 2, 3]);
        let mut copy = list.clone();
        assert_eq!(list, copy);

        copy.push_back(4);
        *copy.front_mut().unwrap() = 9;
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 2, 3]);

        list.pop_front();
        assert_eq!(Vec::from_iter(copy), vec![9, 2, 3, 4]);
    }

    #[test]
    fn clone_from_matches_plain_clone() {
        for this_len in 0..6usize {
            for source_len in 0..6usize {
                let mut this = List::from_iter(0..this_len as i32);
                let source = List::from_iter((0..source_len as i32).map(|x| x + 100));
                this.clone_from(&source);
                assert_eq!(this, source);
                assert_eq!(this.len(), source.len());
                this.assert_ring();
            }
        }
    }

    #[test]
    fn clone_from_a_shorter_source_only_releases() {
        let alloc = CountingAlloc::default();
        let mut this = List::new_in(alloc.clone());
        this.extend([1, 2, 3, 4, 5]);
        let mut source = List::new_in(alloc.clone());
        source.extend([9, 9]);

        let allocated = alloc.allocated();
        let released = alloc.released();
        this.clone_from(&source);

        assert_eq!(Vec::from_iter(this.iter().copied()), vec![9, 9]);
        assert_eq!(alloc.allocated() - allocated, 0);
        assert_eq!(alloc.released() - released, 3);
    }

    #[test]
    fn clone_from_a_longer_source_only_allocates() {
        let alloc = CountingAlloc::default();
        let mut this = List::new_in(alloc.clone());
        this.extend([1, 2]);
        let mut source = List::new_in(alloc.clone());
        source.extend([9, 9, 9, 9]);

        let allocated = alloc.allocated();
        let released = alloc.released();
        this.clone_from(&source);

        assert_eq!(Vec::from_iter(this.iter().copied()), vec![9, 9, 9, 9]);
        assert_eq!(alloc.allocated() - allocated, 2);
        assert_eq!(alloc.released() - released, 0);
    }

    #[test]
    fn clone_from_an_equal_length_source_touches_no_node() {
        let alloc = CountingAlloc::default();
        let mut this = List::new_in(alloc.clone());
        this.extend([1, 2, 3]);
        let mut source = List::new_in(alloc.clone());
        source.extend([7, 8, 9]);

        let allocated = alloc.allocated();
        let released = alloc.released();
        this.clone_from(&source);

        assert_eq!(Vec::from_iter(this.iter().copied()), vec![7, 8, 9]);
        assert_eq!(alloc.allocated(), allocated);
        assert_eq!(alloc.released(), released);
    }

    #[test]
    fn list_ordering() {
        let a = List::from_iter([1, 2, 3]);
        let b = List::from_iter([1, 2, 4]);
        let c = List::from_iter([1, 2]);
        assert!(a < b);
        assert!(c < a);
        assert_eq!(a.cmp(&a.clone()), core::cmp::Ordering::Equal);
    }

    #[test]
    fn list_hash_agrees_with_equality() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let a = List::from_iter([1, 2, 3]);
        let b = List::from_iter([1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}
