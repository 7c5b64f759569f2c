#![forbid(unsafe_code)]

//! Singly linked chain with a sentinel head.
//!
//! Nodes live in an arena and link to each other through [`NodeId`] handles.
//! A handle carries the generation of the arena entry it was issued for, so a
//! commit that outlives its node (deleted, or the chain re-initialized) is
//! recognized as stale instead of touching whatever reused the entry.
//!
//! Invariant: walking from the sentinel, the `n`-th data node has rank `n`.
//! Every splice and unlink renumbers the tail before returning.

use linviz_core::{MutationError, StructureKind};

use crate::{CommitTiming, DeferredCommit, ElementView, Structure, checked_index};

/// Label carried by the sentinel head.
pub const SENTINEL_LABEL: &str = "head";

/// Stable handle to an arena entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    slot: u32,
    generation: u32,
}

/// A chain node. The sentinel has rank `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    value: String,
    index: isize,
    highlighted: bool,
    next: Option<NodeId>,
}

impl Node {
    fn new(value: String, index: isize) -> Self {
        Self {
            value,
            index,
            highlighted: false,
            next: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Rank among data nodes, `-1` for the sentinel.
    pub fn index(&self) -> isize {
        self.index
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}

#[derive(Debug, Clone)]
struct Entry {
    generation: u32,
    node: Option<Node>,
}

/// Deferred half of a chain mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainCommit {
    /// Drop the highlight of a freshly spliced node.
    Settle { node: NodeId },
    /// Unlink and release the node, then renumber its successors.
    Unlink { node: NodeId },
    /// Store a new value.
    Replace { node: NodeId, value: String },
}

impl ChainCommit {
    pub fn node(&self) -> NodeId {
        match self {
            Self::Settle { node } | Self::Unlink { node } | Self::Replace { node, .. } => *node,
        }
    }
}

/// Sentinel-headed chain of data nodes.
#[derive(Debug, Clone)]
pub struct NodeChain {
    entries: Vec<Entry>,
    free: Vec<u32>,
    sentinel: NodeId,
    len: usize,
}

impl Default for NodeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeChain {
    /// Chain holding only the sentinel.
    pub fn new() -> Self {
        let mut chain = Self {
            entries: Vec::new(),
            free: Vec::new(),
            sentinel: NodeId {
                slot: 0,
                generation: 0,
            },
            len: 0,
        };
        chain.sentinel = chain.alloc(Node::new(SENTINEL_LABEL.to_owned(), -1));
        chain
    }

    pub fn sentinel(&self) -> NodeId {
        self.sentinel
    }

    /// First data node, if any.
    pub fn first(&self) -> Option<NodeId> {
        self.node(self.sentinel).and_then(|n| n.next)
    }

    /// Look up a live node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.entries
            .get(id.slot as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.entries
            .get_mut(id.slot as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.node.as_mut())
    }

    /// Data nodes in chain order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            cursor: self.first(),
        }
    }

    /// Data node at `rank`, found by walking from the first node.
    pub fn node_at(&self, rank: usize) -> Option<NodeId> {
        self.iter().nth(rank).map(|(id, _)| id)
    }

    /// Last data node, or the sentinel for an empty chain.
    fn tail(&self) -> NodeId {
        self.iter().last().map_or(self.sentinel, |(id, _)| id)
    }

    /// Node whose `next` is `target`.
    fn predecessor_of(&self, target: NodeId) -> Option<NodeId> {
        let mut cursor = self.sentinel;
        loop {
            let next = self.node(cursor)?.next?;
            if next == target {
                return Some(cursor);
            }
            cursor = next;
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.entries[slot as usize];
                entry.node = Some(node);
                NodeId {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                let slot = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    slot,
                    generation: 0,
                }
            }
        }
    }

    /// Release an entry; outstanding handles to it go stale.
    fn release(&mut self, id: NodeId) -> Option<Node> {
        let entry = self.entries.get_mut(id.slot as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        let node = entry.node.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(id.slot);
        Some(node)
    }

    /// Release every node, sentinel included, walking the chain in order,
    /// then start over with a fresh sentinel.
    fn clear(&mut self) {
        let mut cursor = Some(self.sentinel);
        while let Some(id) = cursor {
            cursor = self.release(id).and_then(|n| n.next);
        }
        self.len = 0;
        self.sentinel = self.alloc(Node::new(SENTINEL_LABEL.to_owned(), -1));
    }

    /// Assign consecutive ranks from `start` onward, beginning at `first_rank`.
    fn renumber_from(&mut self, start: Option<NodeId>, first_rank: isize) {
        let mut cursor = start;
        let mut rank = first_rank;
        while let Some(id) = cursor {
            let Some(node) = self.node_mut(id) else {
                break;
            };
            node.index = rank;
            rank += 1;
            cursor = node.next;
        }
    }

    fn append_all(&mut self, values: impl IntoIterator<Item = String>) {
        let mut tail = self.sentinel;
        for value in values {
            let id = self.alloc(Node::new(value, self.len as isize));
            if let Some(node) = self.node_mut(tail) {
                node.next = Some(id);
            }
            tail = id;
            self.len += 1;
        }
    }

    fn data_node_at(&self, index: isize) -> Result<(usize, NodeId), MutationError> {
        if self.len == 0 {
            return Err(MutationError::EmptyStructure);
        }
        let rank = checked_index(index, self.len)?;
        let id = self
            .node_at(rank)
            .ok_or(MutationError::InvalidIndex { index, len: self.len })?;
        Ok((rank, id))
    }

    fn highlight(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.highlighted = true;
        }
    }
}

impl Structure for NodeChain {
    const KIND: StructureKind = StructureKind::Chain;
    type Commit = ChainCommit;

    fn initialize_len(&mut self, len: isize) {
        self.clear();
        let len = len.max(0) as usize;
        self.append_all((0..len).map(|i| format!("node{i}")));
        linviz_core::debug!(len, "chain initialized");
    }

    fn initialize_values<V: AsRef<str>>(&mut self, values: &[V]) {
        self.clear();
        self.append_all(values.iter().map(|v| v.as_ref().to_owned()));
        linviz_core::debug!(len = self.len, "chain initialized");
    }

    fn insert(
        &mut self,
        after: isize,
        value: String,
    ) -> Result<DeferredCommit<ChainCommit>, MutationError> {
        let len = self.len;
        let invalid = move || MutationError::InvalidIndex { index: after, len };
        let predecessor = match after {
            i if i < -1 => return Err(invalid()),
            -1 => self.sentinel,
            i if i as usize >= len => self.tail(),
            i => self.node_at(i as usize).ok_or_else(invalid)?,
        };
        let (rank, successor) = match self.node(predecessor) {
            Some(p) => (p.index + 1, p.next),
            None => return Err(invalid()),
        };

        let mut node = Node::new(value, rank);
        node.highlighted = true;
        node.next = successor;
        let id = self.alloc(node);
        if let Some(p) = self.node_mut(predecessor) {
            p.next = Some(id);
        }
        self.renumber_from(successor, rank + 1);
        self.len += 1;

        linviz_core::trace!(rank, len = self.len, "node spliced");
        Ok(DeferredCommit {
            anim_index: rank as usize,
            commit: ChainCommit::Settle { node: id },
            timing: CommitTiming::Settle,
        })
    }

    fn delete(&mut self, index: isize) -> Result<DeferredCommit<ChainCommit>, MutationError> {
        let (rank, id) = self.data_node_at(index)?;
        self.highlight(id);
        Ok(DeferredCommit {
            anim_index: rank,
            commit: ChainCommit::Unlink { node: id },
            timing: CommitTiming::Apply,
        })
    }

    fn modify(
        &mut self,
        index: isize,
        value: String,
    ) -> Result<DeferredCommit<ChainCommit>, MutationError> {
        let (rank, id) = self.data_node_at(index)?;
        self.highlight(id);
        Ok(DeferredCommit {
            anim_index: rank,
            commit: ChainCommit::Replace { node: id, value },
            timing: CommitTiming::Apply,
        })
    }

    fn apply(&mut self, commit: ChainCommit) -> bool {
        match commit {
            ChainCommit::Settle { node } => match self.node_mut(node) {
                Some(n) => {
                    n.highlighted = false;
                    true
                }
                None => {
                    linviz_core::debug!(?node, "settle for released node ignored");
                    false
                }
            },
            ChainCommit::Replace { node, value } => match self.node_mut(node) {
                Some(n) => {
                    n.value = value;
                    n.highlighted = false;
                    true
                }
                None => {
                    linviz_core::warn!(?node, "dropping modify for released node");
                    false
                }
            },
            ChainCommit::Unlink { node } => {
                let Some(predecessor) = self.predecessor_of(node) else {
                    linviz_core::warn!(?node, "dropping delete for unlinked node");
                    return false;
                };
                let Some(removed) = self.release(node) else {
                    return false;
                };
                let rank = match self.node_mut(predecessor) {
                    Some(p) => {
                        p.next = removed.next;
                        p.index + 1
                    }
                    None => return false,
                };
                self.renumber_from(removed.next, rank);
                self.len -= 1;
                linviz_core::trace!(rank, len = self.len, "node unlinked");
                true
            }
        }
    }

    fn values(&self) -> Vec<String> {
        self.iter().map(|(_, n)| n.value.clone()).collect()
    }

    fn size(&self) -> usize {
        self.len
    }

    fn layout_count(&self) -> usize {
        self.len
    }

    fn elements(&self) -> Vec<ElementView> {
        self.iter()
            .enumerate()
            .map(|(rank, (_, n))| ElementView {
                index: rank,
                value: n.value.clone(),
                occupied: true,
                highlighted: n.highlighted,
            })
            .collect()
    }
}

/// Iterator over data nodes in chain order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    chain: &'a NodeChain,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.chain.node(id)?;
        self.cursor = node.next;
        Some((id, node))
    }
}
