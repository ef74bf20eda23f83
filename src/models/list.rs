//! Host list with externally allocated nodes
//!
//! The host keeps locally funded items in a circular doubly-linked list
//! whose nodes come from its own allocator service. `HostList` keeps that
//! shape: the list owns only its sentinel links, while the nodes live in a
//! [`NodeAllocator`] that is borrowed for every call. Links are generational
//! slab handles instead of addresses, so a handle to a released node is
//! rejected rather than dereferenced. Several lists may share one allocator;
//! every node records the list that owns it and a handle from another list
//! is rejected as well.

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// How a list element is disposed of during teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipKind {
    /// The element is a counted handle; teardown releases one reference
    Shared,
    /// The element is owned outright; teardown finalizes it
    Owned,
}

/// Values that can be stored in a [`HostList`]
///
/// The ownership kind is fixed per type, so teardown picks release or
/// finalize without inspecting values at runtime.
pub trait ListElement: Sized {
    const OWNERSHIP: OwnershipKind;

    /// Give up the list's hold on the value
    fn dispose(self) {
        drop(self);
    }
}

impl<T: ?Sized> ListElement for Rc<T> {
    const OWNERSHIP: OwnershipKind = OwnershipKind::Shared;
}

impl<T: ?Sized> ListElement for Box<T> {
    const OWNERSHIP: OwnershipKind = OwnershipKind::Owned;
}

/// Handle to a node slot in a [`NodeAllocator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex {
    slot: u32,
    generation: u32,
}

/// Identity of one [`HostList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(u64);

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

impl ListId {
    fn next() -> Self {
        Self(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A single list node
#[derive(Debug)]
pub struct ListNode<T> {
    owner: ListId,
    next: Option<NodeIndex>,
    previous: Option<NodeIndex>,
    value: Option<T>,
}

impl<T> ListNode<T> {
    /// The node's value, if it still holds one
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The list this node belongs to
    pub fn owner(&self) -> ListId {
        self.owner
    }
}

/// Allocator service that owns list nodes
pub trait NodeAllocator<T> {
    /// Store a node and return its handle
    fn allocate(&mut self, node: ListNode<T>) -> NodeIndex;

    /// Release a node, returning it if the handle was live
    fn deallocate(&mut self, index: NodeIndex) -> Option<ListNode<T>>;

    /// Borrow a live node
    fn node(&self, index: NodeIndex) -> Option<&ListNode<T>>;

    /// Mutably borrow a live node
    fn node_mut(&mut self, index: NodeIndex) -> Option<&mut ListNode<T>>;

    /// Release every live node owned by `owner`
    fn deallocate_owned_by(&mut self, owner: ListId) -> Vec<ListNode<T>>;
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<ListNode<T>>,
}

/// Generational slab implementing [`NodeAllocator`]
#[derive(Debug)]
pub struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of nodes currently allocated
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }
}

impl<T> NodeAllocator<T> for NodeArena<T> {
    fn allocate(&mut self, node: ListNode<T>) -> NodeIndex {
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.node = Some(node);
            return NodeIndex {
                slot,
                generation: entry.generation,
            };
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeIndex {
            slot,
            generation: 0,
        }
    }

    fn deallocate(&mut self, index: NodeIndex) -> Option<ListNode<T>> {
        let entry = self.slots.get_mut(index.slot as usize)?;
        if entry.generation != index.generation {
            return None;
        }

        let node = entry.node.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(index.slot);
        Some(node)
    }

    fn node(&self, index: NodeIndex) -> Option<&ListNode<T>> {
        let entry = self.slots.get(index.slot as usize)?;
        if entry.generation != index.generation {
            return None;
        }
        entry.node.as_ref()
    }

    fn node_mut(&mut self, index: NodeIndex) -> Option<&mut ListNode<T>> {
        let entry = self.slots.get_mut(index.slot as usize)?;
        if entry.generation != index.generation {
            return None;
        }
        entry.node.as_mut()
    }

    fn deallocate_owned_by(&mut self, owner: ListId) -> Vec<ListNode<T>> {
        let mut released = Vec::new();

        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if !entry.node.as_ref().is_some_and(|node| node.owner == owner) {
                continue;
            }
            if let Some(node) = entry.node.take() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(slot as u32);
                released.push(node);
            }
        }

        released
    }
}

/// A node handle [`HostList::unlink`] refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The handle no longer refers to a live node
    #[error("stale list node handle (slot {}, generation {})", .0.slot, .0.generation)]
    StaleNode(NodeIndex),

    /// The node is live but belongs to another list
    #[error("list node (slot {}, generation {}) belongs to another list", .0.slot, .0.generation)]
    ForeignNode(NodeIndex),
}

/// Counts reported by [`HostList::teardown`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeardownSummary {
    /// Nodes returned to the allocator
    pub nodes: usize,
    /// Shared values whose reference was released
    pub released: usize,
    /// Owned values that were finalized
    pub finalized: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Sentinel {
    next: Option<NodeIndex>,
    previous: Option<NodeIndex>,
}

/// Ordered list over nodes owned by a [`NodeAllocator`]
///
/// A `HostList` that is dropped without [`teardown`](HostList::teardown)
/// leaves its nodes in the allocator.
#[derive(Debug)]
pub struct HostList<T> {
    id: ListId,
    root: Sentinel,
    _marker: PhantomData<T>,
}

impl<T> Default for HostList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HostList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            id: ListId::next(),
            root: Sentinel::default(),
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    /// Whether the list has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.next.is_none()
    }

    /// Count the nodes by walking the list
    pub fn len<A>(&self, allocator: &A) -> usize
    where
        A: NodeAllocator<T> + ?Sized,
    {
        let mut count = 0;
        let mut cursor = self.root.next;

        while let Some(index) = cursor {
            let Some(node) = allocator.node(index) else {
                break;
            };
            count += 1;
            cursor = node.next;
        }

        count
    }

    /// Iterate values from front to back
    pub fn iter<'a, A>(&self, allocator: &'a A) -> Iter<'a, T, A>
    where
        A: NodeAllocator<T> + ?Sized,
    {
        Iter {
            allocator,
            cursor: self.root.next,
            _marker: PhantomData,
        }
    }

    /// Append a value at the back of the list
    pub fn push_back<A>(&mut self, allocator: &mut A, value: T) -> NodeIndex
    where
        A: NodeAllocator<T> + ?Sized,
    {
        let index = allocator.allocate(ListNode {
            owner: self.id,
            next: None,
            previous: self.root.previous,
            value: Some(value),
        });

        match self.root.previous.and_then(|tail| allocator.node_mut(tail)) {
            Some(tail) => tail.next = Some(index),
            None => self.root.next = Some(index),
        }
        self.root.previous = Some(index);

        index
    }

    /// Find the handle of the first value matching `predicate`
    pub fn find<A, F>(&self, allocator: &A, mut predicate: F) -> Option<NodeIndex>
    where
        A: NodeAllocator<T> + ?Sized,
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.root.next;

        while let Some(index) = cursor {
            let node = allocator.node(index)?;
            if node.value.as_ref().is_some_and(&mut predicate) {
                return Some(index);
            }
            cursor = node.next;
        }

        None
    }

    /// Unlink a node in O(1) and hand back its value
    ///
    /// Handles to released nodes and to nodes of other lists are refused
    /// without touching either list.
    pub fn unlink<A>(&mut self, allocator: &mut A, index: NodeIndex) -> Result<Option<T>, ListError>
    where
        A: NodeAllocator<T> + ?Sized,
    {
        let owner = allocator
            .node(index)
            .map(ListNode::owner)
            .ok_or(ListError::StaleNode(index))?;
        if owner != self.id {
            return Err(ListError::ForeignNode(index));
        }
        let node = allocator.deallocate(index).ok_or(ListError::StaleNode(index))?;

        match node.previous.and_then(|previous| allocator.node_mut(previous)) {
            Some(previous) => previous.next = node.next,
            None => self.root.next = node.next,
        }
        match node.next.and_then(|next| allocator.node_mut(next)) {
            Some(next) => next.previous = node.previous,
            None => self.root.previous = node.previous,
        }

        Ok(node.value)
    }
}

impl<T: ListElement> HostList<T> {
    /// Dispose of every value and return every node to the allocator
    ///
    /// Shared values have one reference released, owned values are
    /// finalized. If a link is broken, the nodes past it are swept from the
    /// allocator by owner, so the list is empty and none of its nodes stay
    /// allocated afterwards.
    pub fn teardown<A>(&mut self, allocator: &mut A) -> TeardownSummary
    where
        A: NodeAllocator<T> + ?Sized,
    {
        let mut summary = TeardownSummary::default();
        let mut cursor = self.root.next;

        while let Some(index) = cursor {
            let owned = allocator.node(index).is_some_and(|node| node.owner == self.id);
            let node = if owned { allocator.deallocate(index) } else { None };
            let Some(node) = node else {
                for node in allocator.deallocate_owned_by(self.id) {
                    summary.dispose(node);
                }
                break;
            };
            cursor = node.next;
            summary.dispose(node);
        }

        self.root = Sentinel::default();
        summary
    }
}

impl TeardownSummary {
    fn dispose<T: ListElement>(&mut self, node: ListNode<T>) {
        self.nodes += 1;

        if let Some(value) = node.value {
            match T::OWNERSHIP {
                OwnershipKind::Shared => self.released += 1,
                OwnershipKind::Owned => self.finalized += 1,
            }
            value.dispose();
        }
    }
}

/// Forward iterator over a [`HostList`]
pub struct Iter<'a, T, A: ?Sized> {
    allocator: &'a A,
    cursor: Option<NodeIndex>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: 'a, A> Iterator for Iter<'a, T, A>
where
    A: NodeAllocator<T> + ?Sized,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let allocator = self.allocator;
        loop {
            let index = self.cursor?;
            let node = allocator.node(index)?;
            self.cursor = node.next;
            if let Some(value) = node.value.as_ref() {
                return Some(value);
            }
        }
    }
}
