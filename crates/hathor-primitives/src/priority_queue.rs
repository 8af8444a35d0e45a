//! Generic binary-heap priority queue.
//!
//! Max-heap over `(priority, value)` nodes, used by the wallet layer for
//! UTXO candidate selection.  The heap invariant is that a parent node is
//! never lower priority than either child.

/// A single entry in the queue: a priority paired with an arbitrary value.
#[derive(Clone, Debug, PartialEq)]
pub struct PqNode<P, T> {
    /// Ordering key. Higher priorities pop first.
    pub priority: P,
    /// The carried value.
    pub value: T,
}

impl<P, T> PqNode<P, T> {
    /// Create a new node.
    pub fn new(priority: P, value: T) -> Self {
        PqNode { priority, value }
    }
}

/// A binary max-heap priority queue.
///
/// `pop` removes and returns the highest-priority node; ties break
/// arbitrarily. Popping an empty queue returns `None` rather than failing.
pub struct PriorityQueue<P: PartialOrd + Copy, T> {
    heap: Vec<PqNode<P, T>>,
}

impl<P: PartialOrd + Copy, T> PriorityQueue<P, T> {
    /// Create a new empty queue.
    pub fn new() -> Self {
        PriorityQueue { heap: Vec::new() }
    }

    /// Return the number of queued nodes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert a node, restoring the heap invariant.
    ///
    /// # Arguments
    /// * `node` - The node to insert.
    pub fn push(&mut self, node: PqNode<P, T>) {
        self.heap.push(node);
        self.sift_up(self.heap.len() - 1);
    }

    /// Insert every node from an iterator.
    ///
    /// # Arguments
    /// * `nodes` - The nodes to insert.
    pub fn add<I: IntoIterator<Item = PqNode<P, T>>>(&mut self, nodes: I) {
        for node in nodes {
            self.push(node);
        }
    }

    /// Return a reference to the highest-priority node without removing it.
    pub fn peek(&self) -> Option<&PqNode<P, T>> {
        self.heap.first()
    }

    /// Remove and return the highest-priority node.
    ///
    /// # Returns
    /// `Some(node)` with the top of the heap, or `None` if the queue is empty.
    pub fn pop(&mut self) -> Option<PqNode<P, T>> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let top = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        top
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx].priority > self.heap[parent].priority {
                self.heap.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut largest = idx;
            if left < len && self.heap[left].priority > self.heap[largest].priority {
                largest = left;
            }
            if right < len && self.heap[right].priority > self.heap[largest].priority {
                largest = right;
            }
            if largest == idx {
                break;
            }
            self.heap.swap(idx, largest);
            idx = largest;
        }
    }
}

impl<P: PartialOrd + Copy, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        Self::new()
    }
}
