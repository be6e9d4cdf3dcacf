//! Category hierarchy integrity checks.
//!
//! A category table is supposed to form a forest: every record points at
//! another record as its parent, or at the root sentinel. Two kinds of
//! structural corruption show up in real sites:
//! - dangling references: a parent id no record in the table carries
//! - loops: parent chains that never reach the root
//!
//! The functions here only classify records. They never mutate the
//! snapshot, never touch storage, and never format output.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record identifier inside one snapshot. SQLite rowids fit in here.
pub type NodeId = i64;

/// Reserved parent value meaning "top of tree, no parent".
///
/// A legitimate record can never carry this id; snapshot construction
/// enforces that.
pub const ROOT: NodeId = 0;

/// One record of a hierarchical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the snapshot
    pub id: NodeId,
    /// Parent record id, or [`ROOT`]
    pub parent_id: NodeId,
    /// Display name, carried through for reporting only
    pub name: String,
}

impl Node {
    /// Build a node.
    pub fn new(id: NodeId, parent_id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
        }
    }
}

/// Construction errors for [`Snapshot`].
///
/// Both variants are caller-contract violations. They are rejected at the
/// boundary so the validator can never silently misclassify records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// Two records carried the same id
    #[error("duplicate record id {0} in snapshot")]
    DuplicateId(NodeId),
    /// A record carried the reserved root sentinel as its id
    #[error("record id {ROOT} collides with the root sentinel")]
    ReservedId,
}

/// Point-in-time copy of one hierarchical table, keyed by record id.
///
/// Built once by the caller, then handed read-only to the validator
/// functions. Iteration is in ascending id order, so everything derived
/// from a snapshot is deterministic for a fixed input.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    nodes: BTreeMap<NodeId, Node>,
}

impl Snapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, rejecting duplicate and reserved ids.
    pub fn insert(&mut self, node: Node) -> Result<(), SnapshotError> {
        if node.id == ROOT {
            return Err(SnapshotError::ReservedId);
        }
        if self.nodes.contains_key(&node.id) {
            return Err(SnapshotError::DuplicateId(node.id));
        }
        self.nodes.insert(node.id, node);
        Ok(())
    }

    /// Build a snapshot from a row iterator.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self, SnapshotError> {
        let mut snapshot = Self::new();
        for node in nodes {
            snapshot.insert(node)?;
        }
        Ok(snapshot)
    }

    /// Look up a record by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Whether a record with this id is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Records in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}

/// Find records whose parent id resolves to nothing.
///
/// A record is dangling when its parent is neither [`ROOT`] nor the id of
/// another record in the snapshot. An empty snapshot yields an empty set.
pub fn find_dangling_parents(snapshot: &Snapshot) -> BTreeSet<NodeId> {
    snapshot
        .nodes()
        .filter(|node| node.parent_id != ROOT && !snapshot.contains(node.parent_id))
        .map(|node| node.id)
        .collect()
}

/// Classification state of one record during [`find_cycles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    /// Not reached by any walk yet
    Unvisited,
    /// Part of the chain the current walk is following
    OnCurrentPath,
    /// Proven to reach the root
    ResolvedRoot,
    /// Proven to sit on a loop, or to feed into one
    ResolvedCycle,
}

/// Find records whose parent chain never reaches the root.
///
/// Every record is walked up its parent chain exactly once. The walk ends
/// when it reaches the root, a record classified on an earlier walk, a
/// parent id absent from the snapshot, or a record already on the current
/// chain. In the loop cases the entire chain just walked is reported:
/// a chain feeding into a loop is stuck exactly like the loop itself and
/// gets flagged for the same repair.
///
/// A record that is its own parent is a one-record loop, not an error.
pub fn find_cycles(snapshot: &Snapshot) -> BTreeSet<NodeId> {
    // State table parallel to the snapshot; the caller's data stays untouched.
    let mut states: BTreeMap<NodeId, WalkState> = snapshot
        .nodes()
        .map(|node| (node.id, WalkState::Unvisited))
        .collect();
    let mut cycles = BTreeSet::new();

    for start in snapshot.nodes() {
        if states.get(&start.id) != Some(&WalkState::Unvisited) {
            continue;
        }

        // The chain walked so far, in visited order.
        let mut path = vec![start.id];
        states.insert(start.id, WalkState::OnCurrentPath);
        let mut current = start;

        let looping = loop {
            if current.parent_id == ROOT {
                // Top level.
                break false;
            }
            let Some(parent) = snapshot.get(current.parent_id) else {
                // Dangling parent: the chain ends without looping back.
                break false;
            };
            let parent_state = states
                .get(&parent.id)
                .copied()
                .unwrap_or(WalkState::Unvisited);
            match parent_state {
                WalkState::OnCurrentPath => {
                    // Loop detected.
                    break true;
                }
                WalkState::ResolvedCycle => {
                    // The parent is stuck in a known loop, so every record
                    // on the chain feeding into it is stuck as well.
                    break true;
                }
                WalkState::ResolvedRoot => {
                    // Already proven to reach the root on an earlier walk.
                    break false;
                }
                WalkState::Unvisited => {
                    // Continue following the path.
                    current = parent;
                    states.insert(current.id, WalkState::OnCurrentPath);
                    path.push(current.id);
                }
            }
        };

        let resolved = if looping {
            WalkState::ResolvedCycle
        } else {
            WalkState::ResolvedRoot
        };
        for id in path {
            states.insert(id, resolved);
            if looping {
                cycles.insert(id);
            }
        }
    }

    cycles
}
