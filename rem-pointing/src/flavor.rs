use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which pointing model a coefficient set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFlavor {
    Simple,
    #[default]
    Classic,
    Full,
    Extra,
}

impl ModelFlavor {
    pub const ALL: [ModelFlavor; 4] = [
        ModelFlavor::Simple,
        ModelFlavor::Classic,
        ModelFlavor::Full,
        ModelFlavor::Extra,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelFlavor::Simple => "simple",
            ModelFlavor::Classic => "classic",
            ModelFlavor::Full => "full",
            ModelFlavor::Extra => "extra",
        }
    }

    pub fn parameter_names(&self) -> &'static [&'static str] {
        use crate::terms::{Classic, Extra, Full, Parameters, Simple};
        match self {
            ModelFlavor::Simple => Simple::PARAMETER_NAMES,
            ModelFlavor::Classic => Classic::PARAMETER_NAMES,
            ModelFlavor::Full => Full::PARAMETER_NAMES,
            ModelFlavor::Extra => Extra::PARAMETER_NAMES,
        }
    }

    pub fn arity(&self) -> usize {
        self.parameter_names().len()
    }
}

impl fmt::Display for ModelFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelFlavor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(ModelFlavor::Simple),
            "classic" => Ok(ModelFlavor::Classic),
            "full" => Ok(ModelFlavor::Full),
            "extra" => Ok(ModelFlavor::Extra),
            _ => Err(Error::UnknownFlavor(s.to_string())),
        }
    }
}
