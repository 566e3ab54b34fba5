pub mod commands;
pub mod coords;
pub mod distance;
pub mod error;
pub mod flavor;
pub mod inversion;
pub mod minimizer;
pub mod model;
pub mod objective;
pub mod observation;
pub mod offsets;
pub mod parser;
pub mod plot;
pub mod session;
pub mod site;
pub mod solver;
pub mod terms;

pub use coords::Horizontal;
pub use distance::angular_distance;
pub use error::{Error, Result};
pub use flavor::ModelFlavor;
pub use inversion::{find_original_coord, find_original_coords};
pub use minimizer::{Minimizer, NelderMead};
pub use model::Coefficients;
pub use observation::CalibrationSample;
pub use solver::{fit_model, FitResult};
pub use terms::PointingModel;
