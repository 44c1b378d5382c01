//! Singly linked list whose nodes live in an [`Arena`].
//!
//! The list never owns its nodes; it only tracks the head, the tail and the
//! number of elements. Copying an `IntrusiveList` is shallow: both copies
//! share the same node chain, and each copy keeps its own length so that
//! iteration over an older copy stops where that copy ended.

use std::{cell::Cell, fmt::Debug, iter::FusedIterator};

use crate::alloc::Arena;

pub struct ListNode<'a, T> {
    data: T,
    next: Cell<Option<&'a ListNode<'a, T>>>,
}

impl<'a, T> ListNode<'a, T> {
    pub fn new(data: T) -> Self {
        ListNode {
            data,
            next: Cell::new(None),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

pub struct IntrusiveList<'a, T> {
    head: Option<&'a ListNode<'a, T>>,
    tail: Option<&'a ListNode<'a, T>>,
    len: usize,
}

impl<'a, T> IntrusiveList<'a, T> {
    pub const fn new() -> Self {
        IntrusiveList {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Builds a list by allocating one node per item.
    pub fn from_iter_in<I>(arena: &'a Arena, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = IntrusiveList::new();
        for item in items {
            list.emplace_back(arena, item);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Option<&'a T> {
        self.head.map(|node| &node.data)
    }

    pub fn back(&self) -> Option<&'a T> {
        self.tail.map(|node| &node.data)
    }

    /// Attaches a freshly allocated node in front of the head.
    pub fn push_front(&mut self, node: &'a ListNode<'a, T>) {
        node.next.set(self.head);
        self.head = Some(node);
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.len += 1;
    }

    /// Attaches a freshly allocated node after the tail.
    pub fn push_back(&mut self, node: &'a ListNode<'a, T>) {
        node.next.set(None);
        match self.tail {
            Some(tail) => tail.next.set(Some(node)),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Detaches the head. The node's memory stays with the arena.
    pub fn pop_front(&mut self) -> Option<&'a T> {
        let head = self.head?;
        self.len -= 1;
        if self.len == 0 {
            self.head = None;
            self.tail = None;
        } else {
            self.head = head.next.get();
        }
        Some(&head.data)
    }

    pub fn emplace_front(&mut self, arena: &'a Arena, data: T) {
        let node = arena.alloc(ListNode::new(data));
        self.push_front(node);
    }

    pub fn emplace_back(&mut self, arena: &'a Arena, data: T) {
        let node = arena.alloc(ListNode::new(data));
        self.push_back(node);
    }

    /// Iterates from the head. Each call starts over.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter {
            next: self.head,
            remaining: self.len,
        }
    }
}

impl<'a, T> Clone for IntrusiveList<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for IntrusiveList<'a, T> {}

impl<'a, T> Default for IntrusiveList<'a, T> {
    fn default() -> Self {
        IntrusiveList::new()
    }
}

impl<'a, T: Debug> Debug for IntrusiveList<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a ListNode<'a, T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.next?;
        self.remaining -= 1;
        self.next = node.next.get();
        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for IntrusiveList<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'l, T> IntoIterator for &'l IntrusiveList<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
