use anyhow::{bail, Result};

/// A slot in the heap. `priority` is used to order slots (smallest = highest priority).
#[derive(Debug, Clone)]
struct HeapNode<P> {
    element: usize,
    priority: P,
}

/// An indexed min-heap over the fixed element universe `[0, n)`.
///
/// Elements are plain integers used directly as indices into a position
/// table, so every lookup is a single array access. The smallest `priority`
/// is at the "top".
///
/// Priorities only need `PartialOrd`, which admits floats. A NaN priority
/// compares neither less nor greater than anything, so it never moves and
/// the order it ends up in is unspecified.
#[derive(Debug, Clone)]
pub struct IndexedMinHeap<P> {
    /// The actual heap storage (array-based).
    nodes: Vec<HeapNode<P>>,
    /// Maps element -> index in the `nodes` vector, `None` when absent.
    positions: Vec<Option<usize>>,
}

impl<P: PartialOrd> IndexedMinHeap<P> {
    /// Creates an empty heap accepting elements in `[0, n)`.
    pub fn new(n: usize) -> Self {
        Self {
            nodes: Vec::new(),
            positions: vec![None; n],
        }
    }

    /// Returns the size `n` of the element universe.
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of items in the heap.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `element` is in the heap. Elements outside the
    /// universe are never contained.
    pub fn contains(&self, element: usize) -> bool {
        matches!(self.positions.get(element), Some(Some(_)))
    }

    /// Inserts a new `(element, priority)` pair.
    ///
    /// Returns `Ok(false)` without touching the heap if `element` is already
    /// present; its stored priority is kept. Fails if `element` is outside
    /// the universe.
    pub fn insert(&mut self, element: usize, priority: P) -> Result<bool> {
        self.check_element(element)?;
        if self.contains(element) {
            return Ok(false);
        }
        let idx = self.nodes.len();
        self.nodes.push(HeapNode { element, priority });
        self.positions[element] = Some(idx);
        self.bubble_up(idx);
        Ok(true)
    }

    /// Inserts a batch of `(element, priority)` pairs, skipping elements that
    /// are already present or repeated earlier in the batch.
    ///
    /// When no element of the batch is present yet, the pairs are appended
    /// as-is and the whole array is heapified in one O(len) pass. Otherwise
    /// each pair goes through [`insert`](Self::insert). Either way the result
    /// is the same; only the cost differs.
    ///
    /// Every element is range-checked before the heap is modified. Returns
    /// the number of pairs added.
    pub fn insert_all<I>(&mut self, pairs: I) -> Result<usize>
    where
        I: IntoIterator<Item = (usize, P)>,
    {
        let pairs: Vec<(usize, P)> = pairs.into_iter().collect();
        if let Some(&(element, _)) = pairs.iter().find(|(e, _)| *e >= self.capacity()) {
            self.check_element(element)?;
        }

        if pairs.iter().any(|(e, _)| self.contains(*e)) {
            let mut added = 0;
            for (element, priority) in pairs {
                if self.insert(element, priority)? {
                    added += 1;
                }
            }
            return Ok(added);
        }

        let before = self.nodes.len();
        for (element, priority) in pairs {
            // Slots are provisional until heapify rebuilds the index.
            if self.positions[element].is_some() {
                continue;
            }
            self.positions[element] = Some(self.nodes.len());
            self.nodes.push(HeapNode { element, priority });
        }
        self.heapify();
        Ok(self.nodes.len() - before)
    }

    /// Returns the element with the smallest priority without removing it.
    pub fn peek_min(&self) -> Result<usize> {
        self.peek_min_entry().map(|(element, _)| element)
    }

    /// Returns the minimum `(element, priority)` without removing it.
    pub fn peek_min_entry(&self) -> Result<(usize, &P)> {
        match self.nodes.first() {
            Some(node) => Ok((node.element, &node.priority)),
            None => bail!("peek_min called on an empty heap"),
        }
    }

    /// Removes and returns the element with the smallest priority.
    pub fn extract_min(&mut self) -> Result<usize> {
        self.extract_min_entry().map(|(element, _)| element)
    }

    /// Removes and returns the `(element, priority)` with the smallest priority.
    pub fn extract_min_entry(&mut self) -> Result<(usize, P)> {
        let Some(last) = self.nodes.pop() else {
            bail!("extract_min called on an empty heap");
        };
        let min_node = if self.nodes.is_empty() {
            last
        } else {
            std::mem::replace(&mut self.nodes[0], last)
        };
        self.positions[min_node.element] = None;

        // Now bubble down the new root
        if !self.nodes.is_empty() {
            self.positions[self.nodes[0].element] = Some(0);
            self.bubble_down(0);
        }

        Ok((min_node.element, min_node.priority))
    }

    /// Returns the priority currently stored for `element`.
    pub fn get_priority(&self, element: usize) -> Result<&P> {
        self.check_element(element)?;
        match self.positions[element] {
            Some(idx) => Ok(&self.nodes[idx].priority),
            None => bail!("element {element} is not in the heap"),
        }
    }

    /// Changes the priority of `element` if it is present.
    ///
    /// Returns `Ok(false)` if the element is absent. A lower priority moves
    /// the entry toward the root, a higher one toward the leaves, and an
    /// equal one leaves the heap as it is.
    pub fn change_priority(&mut self, element: usize, new_priority: P) -> Result<bool> {
        self.check_element(element)?;
        let Some(idx) = self.positions[element] else {
            return Ok(false);
        };
        let node = &mut self.nodes[idx];
        if new_priority < node.priority {
            node.priority = new_priority;
            self.bubble_up(idx);
        } else if new_priority > node.priority {
            node.priority = new_priority;
            self.bubble_down(idx);
        }
        Ok(true)
    }

    /// Removes every entry, keeping the universe size.
    pub fn clear(&mut self) {
        for node in self.nodes.drain(..) {
            self.positions[node.element] = None;
        }
    }

    /// Iterates over `(element, priority)` in heap-slot order, not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &P)> + '_ {
        self.nodes.iter().map(|node| (node.element, &node.priority))
    }

    /// Verifies heap order and the consistency of the position index.
    /// Returns an error naming the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        for (idx, node) in self.nodes.iter().enumerate() {
            let recorded = self.positions.get(node.element).copied().flatten();
            if recorded != Some(idx) {
                bail!(
                    "element {} sits in slot {idx} but the index records {recorded:?}",
                    node.element
                );
            }
            if idx > 0 {
                let parent_idx = (idx - 1) / 2;
                if node.priority < self.nodes[parent_idx].priority {
                    bail!("slot {idx} has a smaller priority than its parent slot {parent_idx}");
                }
            }
        }
        let present = self.positions.iter().filter(|slot| slot.is_some()).count();
        if present != self.nodes.len() {
            bail!(
                "index marks {present} elements present but the heap holds {}",
                self.nodes.len()
            );
        }
        Ok(())
    }

    fn check_element(&self, element: usize) -> Result<()> {
        if element >= self.capacity() {
            bail!(
                "element {element} is outside the universe [0, {})",
                self.capacity()
            );
        }
        Ok(())
    }

    // Helper: restore heap order over the whole array, then rebuild the index.
    fn heapify(&mut self) {
        for idx in (0..self.nodes.len() / 2).rev() {
            self.bubble_down_unindexed(idx);
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            self.positions[node.element] = Some(idx);
        }
    }

    // Helper: swap two slots and record both new positions.
    fn swap_nodes(&mut self, a: usize, b: usize) {
        self.nodes.swap(a, b);
        self.positions[self.nodes[a].element] = Some(a);
        self.positions[self.nodes[b].element] = Some(b);
    }

    // Helper: bubble up from `idx` if heap property is violated.
    fn bubble_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent_idx = (idx - 1) / 2;
            if self.nodes[idx].priority < self.nodes[parent_idx].priority {
                self.swap_nodes(idx, parent_idx);
                idx = parent_idx;
            } else {
                break;
            }
        }
    }

    // Helper: bubble down from `idx` if children have smaller priority.
    fn bubble_down(&mut self, mut idx: usize) {
        while let Some(smallest) = self.smaller_child(idx) {
            self.swap_nodes(idx, smallest);
            idx = smallest;
        }
    }

    // Helper: same as `bubble_down` but leaves `positions` stale.
    fn bubble_down_unindexed(&mut self, mut idx: usize) {
        while let Some(smallest) = self.smaller_child(idx) {
            self.nodes.swap(idx, smallest);
            idx = smallest;
        }
    }

    // Helper: the child of `idx` to swap with, if one is smaller than it.
    fn smaller_child(&self, idx: usize) -> Option<usize> {
        let len = self.nodes.len();
        let left_child = 2 * idx + 1;
        let right_child = 2 * idx + 2;
        let mut smallest = idx;

        if left_child < len && self.nodes[left_child].priority < self.nodes[smallest].priority {
            smallest = left_child;
        }
        if right_child < len && self.nodes[right_child].priority < self.nodes[smallest].priority {
            smallest = right_child;
        }
        (smallest != idx).then_some(smallest)
    }
}
