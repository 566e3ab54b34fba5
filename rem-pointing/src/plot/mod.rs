pub mod residuals;
pub mod terminal;
