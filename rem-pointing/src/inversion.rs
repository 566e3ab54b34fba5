//! Inverting a pointing model: which position must be commanded so that the
//! telescope ends up on a given target.
//!
//! The search starts from the target itself and repeatedly steps by half of
//! the remaining forward error. Batches are iterated in lock-step and only
//! stop once every element is within tolerance, so all elements of a batch
//! see the same number of iterations.

use log::{debug, warn};

use crate::coords::{wrap_pm_180, Horizontal};
use crate::terms::PointingModel;

pub const TOL_AZ: f64 = 1e-5;
pub const TOL_ALT: f64 = 1e-5;
pub const MAX_ITER: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Inversion {
    pub coords: Vec<Horizontal>,
    pub converged: bool,
    pub iterations: usize,
}

/// Commanded position whose forward model lands on `target`, plus whether
/// the search converged.
///
/// A non-finite forward error (a target at the zenith, say) never counts as
/// converged.
pub fn find_original_coord<M: PointingModel + ?Sized>(
    model: &M,
    target: Horizontal,
) -> (Horizontal, bool) {
    let inv = find_original_coords(model, &[target]);
    (inv.coords[0], inv.converged)
}

pub fn find_original_coords<M: PointingModel + ?Sized>(
    model: &M,
    targets: &[Horizontal],
) -> Inversion {
    let mut trial = targets.to_vec();
    let mut iterations = 0;

    while iterations < MAX_ITER {
        let mut all_within = true;
        let mut stepped = Vec::with_capacity(trial.len());
        for (t, target) in trial.iter().zip(targets) {
            let reached = model.apply(*t);
            let daz = wrap_pm_180(reached.az - target.az);
            let dalt = reached.alt - target.alt;
            if !(daz.abs() < TOL_AZ && dalt.abs() < TOL_ALT) {
                all_within = false;
            }
            stepped.push(Horizontal::new(t.az - daz / 2.0, t.alt - dalt / 2.0));
        }
        iterations += 1;
        trial = stepped;

        if all_within {
            debug!(
                "inversion of {} position(s) converged after {} iteration(s)",
                targets.len(),
                iterations
            );
            return Inversion {
                coords: trial,
                converged: true,
                iterations,
            };
        }
    }

    warn!(
        "inversion of {} position(s) did not converge within {} iterations",
        targets.len(),
        MAX_ITER
    );
    Inversion {
        coords: trial,
        converged: false,
        iterations,
    }
}
