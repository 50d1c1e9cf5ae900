//! Fixed-step time integrators.

use ot_core::constants::PHYSICAL_NODES;
use rayon::prelude::*;

use crate::balance::NodeBalance;

/// Advances the physical rows of a temperature vector by one step.
pub trait Integrator {
    /// Write the physical rows of `next` from `prev` only.
    ///
    /// Environment rows of `next` are left to the caller.
    fn step(
        &self,
        balance: &NodeBalance<'_>,
        theta_deg: f64,
        dt_s: f64,
        prev: &[f64],
        next: &mut [f64],
    );
}

/// Explicit (forward) Euler with a synchronous node update.
///
/// Every node reads the previous column only, so evaluation order has no
/// effect and the parallel path is bit-identical to the serial one.
#[derive(Clone, Debug, Default)]
pub struct ForwardEuler {
    pub parallel: bool,
}

impl Integrator for ForwardEuler {
    fn step(
        &self,
        balance: &NodeBalance<'_>,
        theta_deg: f64,
        dt_s: f64,
        prev: &[f64],
        next: &mut [f64],
    ) {
        let physical = &mut next[..PHYSICAL_NODES];
        if self.parallel {
            physical.par_iter_mut().enumerate().for_each(|(row, slot)| {
                *slot = balance.next_temperature(row, theta_deg, prev, dt_s);
            });
        } else {
            for (row, slot) in physical.iter_mut().enumerate() {
                *slot = balance.next_temperature(row, theta_deg, prev, dt_s);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{CasePreset, CaseSelector};
    use crate::network::ThermalNetwork;
    use ot_core::constants::TOTAL_NODES;
    use ot_project::reference_model;

    #[test]
    fn step_is_jacobi_not_gauss_seidel() {
        let model = reference_model();
        let net = ThermalNetwork::from_model(&model).unwrap();
        let preset = CasePreset::select(&model, CaseSelector::Hot).unwrap();
        let balance = NodeBalance::new(&net, &preset);

        let prev = preset.initial;
        let mut next = [0.0; TOTAL_NODES];
        ForwardEuler::default().step(&balance, 42.0, 1.0, &prev, &mut next);

        for row in 0..PHYSICAL_NODES {
            assert_eq!(next[row], balance.next_temperature(row, 42.0, &prev, 1.0));
        }
        assert_eq!(next[13], 0.0);
        assert_eq!(next[14], 0.0);
    }

    #[test]
    fn parallel_step_matches_serial() {
        let model = reference_model();
        let net = ThermalNetwork::from_model(&model).unwrap();
        let preset = CasePreset::select(&model, CaseSelector::Cold).unwrap();
        let balance = NodeBalance::new(&net, &preset);

        let mut serial = [0.0; TOTAL_NODES];
        let mut parallel = [0.0; TOTAL_NODES];
        ForwardEuler { parallel: false }.step(&balance, 250.0, 1.0, &preset.initial, &mut serial);
        ForwardEuler { parallel: true }.step(&balance, 250.0, 1.0, &preset.initial, &mut parallel);
        assert_eq!(serial, parallel);
    }
}
