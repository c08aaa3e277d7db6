use std::fmt;
use std::num::NonZeroUsize;

/// Stable handle to a node in a [`List`].
///
/// A handle stays valid until the node it names is removed. After that the
/// slot may be reused for a different value, so callers must drop the handle
/// at the same time they remove the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A node in the doubly linked list.
///
/// Links are slot indices into the owning list's arena.
struct Node<T> {
    val: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly linked list backed by an arena of slots.
///
/// Nodes are addressed by [`NodeId`] instead of pointers, so the list and
/// whatever index refers into it never share ownership of a node. Vacant
/// slots are recycled through a free list, which keeps the arena at most
/// `cap` slots long.
///
/// The front of the list is the most recently attached node.
pub(crate) struct List<T> {
    /// Maximum number of items the list can hold.
    cap: NonZeroUsize,
    /// Current number of items in the list.
    len: usize,
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> List<T> {
    /// Creates a new List that holds at most `cap` items.
    pub(crate) fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Returns the maximum number of items the list can hold.
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    /// Returns the current number of items in the list.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the list is at capacity.
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Unlinks the node at `idx` from its neighbours. The slot stays occupied.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Links an already detached node in as the new head.
    fn attach(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        } else {
            return;
        }

        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns the handle of the new node, or `None` if the list is full.
    pub(crate) fn add(&mut self, v: T) -> Option<NodeId> {
        if self.is_full() {
            return None;
        }

        let node = Node {
            val: v,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.attach(idx);
        self.len += 1;
        Some(NodeId(idx))
    }

    /// Moves a node to the front of the list.
    ///
    /// Returns false if `id` does not name a live node.
    pub(crate) fn move_to_front(&mut self, id: NodeId) -> bool {
        if self.node(id.0).is_none() {
            return false;
        }
        if self.head != Some(id.0) {
            self.detach(id.0);
            self.attach(id.0);
        }
        true
    }

    /// Removes the node named by `id` and returns its value.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        self.node(id.0)?;
        self.detach(id.0);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.val)
    }

    /// Removes the last (least recently used) item from the list.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    /// Removes the first (most recently used) item from the list.
    #[cfg(test)]
    pub(crate) fn remove_first(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(NodeId(head))
    }

    /// Replaces the value held by `id`, returning the old value.
    ///
    /// The node keeps its position in the list.
    pub(crate) fn update(&mut self, id: NodeId, v: T) -> Option<T> {
        let node = self.node_mut(id.0)?;
        Some(std::mem::replace(&mut node.val, v))
    }

    /// Returns a reference to the value held by `id`.
    pub(crate) fn get_value(&self, id: NodeId) -> Option<&T> {
        self.node(id.0).map(|node| &node.val)
    }

    /// Returns the handle of the last (least recently used) node.
    #[cfg(test)]
    pub(crate) fn last(&self) -> Option<NodeId> {
        self.tail.map(NodeId)
    }

    /// Iterates values from front (most recent) to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Clears the list, removing all entries.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("capacity", &self.cap)
            .field("length", &self.len)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_construct_and_cap() {
        let list = List::<u32>::new(NonZeroUsize::new(3).unwrap());
        assert_eq!(list.cap().get(), 3);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(list.last().is_none());
    }

    #[test]
    fn test_add_items() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());
        let node1 = list.add(10).unwrap();
        let node2 = list.add(20).unwrap();
        assert_eq!(list.len(), 2);
        assert_ne!(node1, node2);
        // Should fail to add when at capacity
        assert!(list.add(30).is_none());
        assert_eq!(list.len(), 2);
        assert_eq!(collect(&list), [20, 10]);
    }

    #[test]
    fn test_update_item_keeps_position() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());
        let node = list.add(10).unwrap();
        list.add(20).unwrap();
        assert_eq!(list.update(node, 99), Some(10));
        assert_eq!(list.get_value(node), Some(&99));
        assert_eq!(collect(&list), [20, 99]);
    }

    #[test]
    fn test_remove_first_and_last() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());

        assert!(list.remove_first().is_none());
        assert!(list.remove_last().is_none());

        list.add(10).unwrap();
        list.add(20).unwrap();
        list.add(30).unwrap();
        assert_eq!(list.len(), 3);

        // front is the most recent add
        assert_eq!(list.remove_first(), Some(30));
        assert_eq!(list.remove_last(), Some(10));
        assert_eq!(list.len(), 1);
        assert_eq!(list.remove_first(), Some(20));
        assert!(list.is_empty());
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());

        let node1 = list.add(10).unwrap();
        let node2 = list.add(20).unwrap();
        list.add(30).unwrap();

        assert!(list.move_to_front(node1));
        assert_eq!(collect(&list), [10, 30, 20]);
        assert_eq!(list.last(), Some(node2));

        // already at the front
        assert!(list.move_to_front(node1));
        assert_eq!(collect(&list), [10, 30, 20]);
    }

    #[test]
    fn test_remove_middle_relinks_neighbours() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());
        list.add(10).unwrap();
        let middle = list.add(20).unwrap();
        list.add(30).unwrap();

        assert_eq!(list.remove(middle), Some(20));
        assert_eq!(collect(&list), [30, 10]);
        assert_eq!(list.remove(middle), None);
        assert!(!list.move_to_front(middle));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());
        list.add(1).unwrap();
        list.add(2).unwrap();
        for i in 3..100 {
            list.remove_last().unwrap();
            list.add(i).unwrap();
        }
        assert_eq!(list.slots.len(), 2);
        assert_eq!(collect(&list), [99, 98]);
    }

    #[test]
    fn test_clear() {
        let mut list = List::<u32>::new(NonZeroUsize::new(3).unwrap());
        list.add(10).unwrap();
        list.add(20).unwrap();
        list.add(30).unwrap();

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(list.iter().next().is_none());

        list.add(40).unwrap();
        assert_eq!(collect(&list), [40]);
    }

    #[test]
    fn test_is_empty_and_is_full() {
        let mut list = List::<u32>::new(NonZeroUsize::new(2).unwrap());

        assert!(list.is_empty());
        assert!(!list.is_full());

        list.add(10).unwrap();
        assert!(!list.is_empty());
        assert!(!list.is_full());

        list.add(20).unwrap();
        assert!(list.is_full());

        list.remove_first();
        assert!(!list.is_full());

        list.remove_first();
        assert!(list.is_empty());
    }

    #[test]
    fn test_list_string_values() {
        let mut list = List::<String>::new(NonZeroUsize::new(2).unwrap());
        let node = list.add(String::from("one")).unwrap();
        list.add(String::from("two")).unwrap();

        let old = list.update(node, String::from("three")).unwrap();
        assert_eq!(old, "one");
        assert_eq!(list.get_value(node).map(String::as_str), Some("three"));
        assert_eq!(list.iter().len(), 2);
    }
}
