//! Post-run reporting: per-node extremes and allowable-temperature checks.

use ot_core::{NodeId, k_to_c};
use ot_project::LimitDef;

use crate::history::TemperatureHistory;

/// Maximum and minimum temperature of one physical node over a run [K].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeExtremes {
    pub node: NodeId,
    pub max_k: f64,
    pub min_k: f64,
}

impl NodeExtremes {
    pub fn max_c(&self) -> f64 {
        k_to_c(self.max_k)
    }

    pub fn min_c(&self) -> f64 {
        k_to_c(self.min_k)
    }
}

/// Extremes of nodes 1..13, in node order.
pub fn node_extremes(history: &TemperatureHistory) -> Vec<NodeExtremes> {
    NodeId::physical()
        .map(|node| {
            let row = history.matrix().row(node.row());
            NodeExtremes {
                node,
                max_k: row.max(),
                min_k: row.min(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStatus {
    Within,
    BelowMin,
    AboveMax,
    /// Both limits exceeded during the run.
    OutsideBoth,
}

impl LimitStatus {
    pub fn is_ok(self) -> bool {
        self == LimitStatus::Within
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LimitStatus::Within => "ok",
            LimitStatus::BelowMin => "below min",
            LimitStatus::AboveMax => "above max",
            LimitStatus::OutsideBoth => "outside both",
        }
    }
}

/// One allowable-flight-temperature check, all values in °C.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitCheck {
    pub node: NodeId,
    pub label: String,
    pub min_c: f64,
    pub max_c: f64,
    pub observed_min_c: f64,
    pub observed_max_c: f64,
    pub status: LimitStatus,
}

/// Compare extremes against allowable flight temperatures.
///
/// Limits naming a node outside 1..13 are skipped.
pub fn check_limits(extremes: &[NodeExtremes], limits: &[LimitDef]) -> Vec<LimitCheck> {
    limits
        .iter()
        .filter_map(|limit| {
            let ext = extremes.iter().find(|e| e.node.number() == limit.node)?;
            let (lo, hi) = (ext.min_c(), ext.max_c());
            let status = match (lo < limit.min_c, hi > limit.max_c) {
                (false, false) => LimitStatus::Within,
                (true, false) => LimitStatus::BelowMin,
                (false, true) => LimitStatus::AboveMax,
                (true, true) => LimitStatus::OutsideBoth,
            };
            Some(LimitCheck {
                node: ext.node,
                label: limit.label.clone(),
                min_c: limit.min_c,
                max_c: limit.max_c,
                observed_min_c: lo,
                observed_max_c: hi,
                status,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn history() -> TemperatureHistory {
        // node n: min 273.15 + n, max 273.15 + 10n
        let data = DMatrix::from_fn(15, 3, |r, c| {
            let n = (r + 1) as f64;
            match c {
                0 => 273.15 + n,
                1 => 273.15 + 10.0 * n,
                _ => 273.15 + 5.0 * n,
            }
        });
        TemperatureHistory::from_matrix(data, 1.0).unwrap()
    }

    #[test]
    fn extremes_cover_physical_nodes_only() {
        let ext = node_extremes(&history());
        assert_eq!(ext.len(), 13);
        assert_eq!(ext[0].node.number(), 1);
        assert_relative_eq!(ext[11].max_c(), 120.0, epsilon = 1e-9);
        assert_relative_eq!(ext[11].min_c(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn limit_status() {
        let ext = node_extremes(&history());
        let limits = vec![
            LimitDef {
                node: 12,
                label: "OBC".into(),
                min_c: -25.0,
                max_c: 65.0,
            },
            LimitDef {
                node: 1,
                label: "panel".into(),
                min_c: 0.0,
                max_c: 20.0,
            },
            LimitDef {
                node: 2,
                label: "cold".into(),
                min_c: 5.0,
                max_c: 10.0,
            },
            LimitDef {
                node: 14,
                label: "planet".into(),
                min_c: 0.0,
                max_c: 1.0,
            },
        ];
        let checks = check_limits(&ext, &limits);
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0].status, LimitStatus::AboveMax);
        assert_eq!(checks[1].status, LimitStatus::Within);
        assert!(checks[1].status.is_ok());
        assert_eq!(checks[2].status, LimitStatus::OutsideBoth);
    }
}
