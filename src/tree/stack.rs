//! LIFO work list used to walk trees without recursion.

/// Stack of pending work items.
///
/// Training and prediction both push `(node, subset)` pairs here instead of
/// recursing, so the traversal depth is bounded by heap memory rather than
/// the call stack. Popping or peeking an empty stack yields `None`.
#[derive(Debug, Clone)]
pub struct WorkStack<T> {
    items: Vec<T>,
    high_water_mark: usize,
}

impl<T> WorkStack<T> {
    /// Create an empty stack
    pub fn new() -> Self {
        WorkStack {
            items: Vec::new(),
            high_water_mark: 0,
        }
    }

    /// Create an empty stack with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        WorkStack {
            items: Vec::with_capacity(capacity),
            high_water_mark: 0,
        }
    }

    /// Push an item on top of the stack
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.high_water_mark = self.high_water_mark.max(self.items.len());
    }

    /// Remove and return the top item
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The top item, without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of pending items
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are pending.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every pending item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Largest number of items held at once since creation
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }
}

impl<T> Default for WorkStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for WorkStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
