//! Derivative-free minimisation of the calibration objective.
//!
//! The fit driver only relies on the [`Minimizer`] trait; [`NelderMead`] is
//! the implementation the shell uses. It runs the dimension-adaptive simplex
//! (Gao & Han, 2012), which behaves much better than the textbook
//! coefficients once a model has more than a handful of parameters, and
//! restarts from the best vertex until a restart stops improving.

use log::debug;
use nalgebra::DVector;

#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

pub trait Minimizer {
    fn minimize(&self, f: &dyn Fn(&[f64]) -> f64, initial: &[f64]) -> Minimum;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMead {
    /// Iteration budget shared by the first run and all restarts.
    pub max_iterations: usize,
    /// Spread of objective values across the simplex at convergence.
    pub tolerance: f64,
    /// Largest vertex distance from the best vertex at convergence.
    pub x_tolerance: f64,
    /// Edge length of the starting simplex.
    pub initial_step: f64,
    pub max_restarts: usize,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 20_000,
            tolerance: 1e-12,
            x_tolerance: 1e-9,
            initial_step: 0.01,
            max_restarts: 10,
        }
    }
}

struct Simplex {
    vertices: Vec<DVector<f64>>,
    values: Vec<f64>,
}

impl Simplex {
    fn around(f: &dyn Fn(&[f64]) -> f64, start: &DVector<f64>, step: f64) -> Self {
        let n = start.len();
        let mut vertices = Vec::with_capacity(n + 1);
        vertices.push(start.clone());
        for i in 0..n {
            let mut v = start.clone();
            v[i] += step;
            vertices.push(v);
        }
        let values = vertices.iter().map(|v| f(v.as_slice())).collect();
        Self { vertices, values }
    }

    fn sort(&mut self) {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        self.vertices = order.iter().map(|&i| self.vertices[i].clone()).collect();
        self.values = order.iter().map(|&i| self.values[i]).collect();
    }

    fn value_spread(&self) -> f64 {
        let last = self.values.len() - 1;
        (self.values[last] - self.values[0]).abs()
    }

    fn size(&self) -> f64 {
        let best = &self.vertices[0];
        self.vertices[1..]
            .iter()
            .map(|v| (v - best).amax())
            .fold(0.0, f64::max)
    }

    fn centroid(&self) -> DVector<f64> {
        let n = self.vertices.len() - 1;
        let mut c = DVector::zeros(self.vertices[0].len());
        for v in &self.vertices[..n] {
            c += v;
        }
        c / n as f64
    }

    fn replace_worst(&mut self, vertex: DVector<f64>, value: f64) {
        let last = self.vertices.len() - 1;
        self.vertices[last] = vertex;
        self.values[last] = value;
    }
}

impl NelderMead {
    fn run(
        &self,
        f: &dyn Fn(&[f64]) -> f64,
        start: &DVector<f64>,
        budget: usize,
    ) -> (DVector<f64>, f64, usize, bool) {
        let n = start.len();
        let dim = n as f64;
        let (alpha, gamma, rho, sigma) = (1.0, 1.0 + 2.0 / dim, 0.75 - 1.0 / (2.0 * dim), 1.0 - 1.0 / dim);

        let mut simplex = Simplex::around(f, start, self.initial_step);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < budget {
            simplex.sort();
            if simplex.value_spread() <= self.tolerance && simplex.size() <= self.x_tolerance {
                converged = true;
                break;
            }
            iterations += 1;

            let c = simplex.centroid();
            let worst = simplex.vertices[n].clone();
            let f_worst = simplex.values[n];
            let f_best = simplex.values[0];
            let f_second = simplex.values[n - 1];

            let xr = &c + (&c - &worst) * alpha;
            let fr = f(xr.as_slice());

            if fr < f_best {
                let xe = &c + (&xr - &c) * gamma;
                let fe = f(xe.as_slice());
                if fe < fr {
                    simplex.replace_worst(xe, fe);
                } else {
                    simplex.replace_worst(xr, fr);
                }
                continue;
            }
            if fr < f_second {
                simplex.replace_worst(xr, fr);
                continue;
            }

            if fr < f_worst {
                let xc = &c + (&xr - &c) * rho;
                let fc = f(xc.as_slice());
                if fc <= fr {
                    simplex.replace_worst(xc, fc);
                    continue;
                }
            } else {
                let xc = &c + (&worst - &c) * rho;
                let fc = f(xc.as_slice());
                if fc < f_worst {
                    simplex.replace_worst(xc, fc);
                    continue;
                }
            }

            let best = simplex.vertices[0].clone();
            for i in 1..=n {
                let shrunk = &best + (&simplex.vertices[i] - &best) * sigma;
                simplex.values[i] = f(shrunk.as_slice());
                simplex.vertices[i] = shrunk;
            }
        }

        simplex.sort();
        (simplex.vertices[0].clone(), simplex.values[0], iterations, converged)
    }
}

impl Minimizer for NelderMead {
    fn minimize(&self, f: &dyn Fn(&[f64]) -> f64, initial: &[f64]) -> Minimum {
        if initial.is_empty() {
            return Minimum {
                point: Vec::new(),
                value: f(initial),
                iterations: 0,
                converged: true,
            };
        }

        let start = DVector::from_column_slice(initial);
        let (mut best, mut value, mut total, mut converged) =
            self.run(f, &start, self.max_iterations);

        for restart in 0..self.max_restarts {
            if total >= self.max_iterations {
                break;
            }
            let (x, v, iters, conv) = self.run(f, &best, self.max_iterations - total);
            total += iters;
            let improved = value - v > self.tolerance;
            debug!(
                "simplex restart {}: {:.6e} -> {:.6e} after {} iterations",
                restart + 1,
                value,
                v,
                iters
            );
            if v <= value {
                best = x;
                value = v;
                converged = conv;
            }
            if !improved {
                break;
            }
        }

        Minimum {
            point: best.as_slice().to_vec(),
            value,
            iterations: total,
            converged,
        }
    }
}
