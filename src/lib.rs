//! An indexed minimum-priority queue over the dense element universe `[0, n)`.
//!
//! Elements are small integers used directly as indices, which lets the heap
//! find any element's slot in O(1) and change its priority in O(log n).
//!
//! ```rust
//! use idxheap::IndexedMinHeap;
//!
//! let mut heap = IndexedMinHeap::new(5);
//! heap.insert_all(vec![(0, 3), (1, 1), (2, 4), (3, 2), (4, 5)])?;
//! heap.change_priority(4, 0)?;
//!
//! assert_eq!(heap.extract_min()?, 4);
//! assert_eq!(heap.extract_min()?, 1);
//! assert!(!heap.insert(0, 9)?);
//! assert_eq!(heap.get_priority(0)?, &3);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod graph;
mod indexed_min_heap;

pub use indexed_min_heap::IndexedMinHeap;
