use core::fmt;
use core::num::NonZeroU8;

use crate::constants::{PHYSICAL_NODES, PLANET_ROW, SPACE_ROW, TOTAL_NODES};

/// Compact node identifier.
///
/// Nodes are labelled 1..=15 in thermal-analysis reports (13 physical nodes,
/// then the planet and deep space); the label is stored directly, so the
/// 0-based row in a temperature vector is `number - 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonZeroU8);

impl NodeId {
    pub const PLANET: NodeId = NodeId::from_row_const(PLANET_ROW);
    pub const SPACE: NodeId = NodeId::from_row_const(SPACE_ROW);

    const fn from_row_const(row: usize) -> Self {
        match NonZeroU8::new(row as u8 + 1) {
            Some(n) => Self(n),
            None => panic!("row+1 is nonzero"),
        }
    }

    /// Create an id from its 1-based report label, if it names a node.
    pub fn from_number(number: u8) -> Option<Self> {
        if (number as usize) > TOTAL_NODES {
            return None;
        }
        NonZeroU8::new(number).map(Self)
    }

    /// Create an id from a 0-based row index.
    pub fn from_row(row: usize) -> Option<Self> {
        if row >= TOTAL_NODES {
            return None;
        }
        Some(Self::from_row_const(row))
    }

    /// 1-based report label.
    pub fn number(self) -> u8 {
        self.0.get()
    }

    /// 0-based row in temperature vectors and coupling matrices.
    pub fn row(self) -> usize {
        self.0.get() as usize - 1
    }

    /// True for the 13 integrated nodes, false for the environment sources.
    pub fn is_physical(self) -> bool {
        self.row() < PHYSICAL_NODES
    }

    /// Iterate the physical nodes in their fixed update order.
    pub fn physical() -> impl Iterator<Item = NodeId> {
        (0..PHYSICAL_NODES).map(Self::from_row_const)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.number())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
