//! Temperature history: one column of 15 temperatures per time step.

use nalgebra::DMatrix;
use ot_core::NodeId;
use ot_core::constants::TOTAL_NODES;

use crate::error::{SimError, SimResult};

/// `15 × steps` matrix of temperatures [K], column `p` at `t = p·Δt`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureHistory {
    data: DMatrix<f64>,
    dt_s: f64,
}

impl TemperatureHistory {
    /// Allocate `steps` columns and fill column 0 with `initial`.
    pub(crate) fn new(initial: &[f64; TOTAL_NODES], steps: usize, dt_s: f64) -> Self {
        let mut data = DMatrix::zeros(TOTAL_NODES, steps);
        if steps > 0 {
            data.column_mut(0).copy_from_slice(initial);
        }
        Self { data, dt_s }
    }

    /// Rebuild a history from stored data.
    pub fn from_matrix(data: DMatrix<f64>, dt_s: f64) -> SimResult<Self> {
        if data.nrows() != TOTAL_NODES {
            return Err(SimError::InvalidArg {
                what: "history must have 15 rows",
            });
        }
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return Err(SimError::InvalidArg {
                what: "history time step must be positive",
            });
        }
        Ok(Self { data, dt_s })
    }

    pub fn steps(&self) -> usize {
        self.data.ncols()
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Elapsed time of column `p`.
    pub fn time_s(&self, p: usize) -> f64 {
        p as f64 * self.dt_s
    }

    pub fn times(&self) -> Vec<f64> {
        (0..self.steps()).map(|p| self.time_s(p)).collect()
    }

    /// All 15 temperatures at step `p`.
    pub fn column(&self, p: usize) -> &[f64] {
        &self.data.as_slice()[p * TOTAL_NODES..(p + 1) * TOTAL_NODES]
    }

    pub fn get(&self, id: NodeId, p: usize) -> f64 {
        self.data[(id.row(), p)]
    }

    /// Temperature series of one node over the run.
    pub fn node_series(&self, id: NodeId) -> Vec<f64> {
        self.data.row(id.row()).iter().copied().collect()
    }

    /// Previous column (read-only) and column `p` (writable), `p ≥ 1`.
    pub(crate) fn step_columns(&mut self, p: usize) -> (&[f64], &mut [f64]) {
        let (head, tail) = self.data.as_mut_slice().split_at_mut(p * TOTAL_NODES);
        (&head[(p - 1) * TOTAL_NODES..], &mut tail[..TOTAL_NODES])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial() -> [f64; TOTAL_NODES] {
        let mut t = [0.0; TOTAL_NODES];
        for (i, v) in t.iter_mut().enumerate() {
            *v = 270.0 + i as f64;
        }
        t
    }

    #[test]
    fn column_zero_holds_initial_vector() {
        let h = TemperatureHistory::new(&initial(), 4, 2.0);
        assert_eq!(h.column(0), &initial());
        assert_eq!(h.steps(), 4);
        assert_eq!(h.times(), vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn step_columns_are_adjacent() {
        let mut h = TemperatureHistory::new(&initial(), 3, 1.0);
        {
            let (prev, next) = h.step_columns(1);
            assert_eq!(prev.len(), TOTAL_NODES);
            next.copy_from_slice(prev);
            next[0] = 1.0;
        }
        let id = NodeId::from_number(1).unwrap();
        assert_eq!(h.node_series(id), vec![270.0, 1.0, 0.0]);
        assert_eq!(h.get(NodeId::SPACE, 1), 284.0);
    }

    #[test]
    fn from_matrix_checks_rows() {
        assert!(TemperatureHistory::from_matrix(DMatrix::zeros(13, 2), 1.0).is_err());
        assert!(TemperatureHistory::from_matrix(DMatrix::zeros(15, 2), 0.0).is_err());
        assert!(TemperatureHistory::from_matrix(DMatrix::zeros(15, 2), 1.0).is_ok());
    }
}
