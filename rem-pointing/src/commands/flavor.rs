use crate::error::{Error, Result};
use crate::flavor::ModelFlavor;
use crate::session::Session;
use super::{Command, CommandOutput};

pub struct Flavor;

impl Command for Flavor {
    fn name(&self) -> &str { "FLAVOR" }
    fn description(&self) -> &str { "Show or select the pointing model flavor" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        match args {
            [] => Ok(CommandOutput::Text(format!(
                "Model flavor: {} ({} coefficients: {})",
                session.flavor(),
                session.flavor().arity(),
                session.flavor().parameter_names().join(" "),
            ))),
            [name] => {
                let flavor: ModelFlavor = name.parse()?;
                session.set_flavor(flavor);
                Ok(CommandOutput::Text(format!(
                    "Model flavor set to {}, {} coefficients zeroed",
                    flavor,
                    flavor.arity()
                )))
            }
            _ => Err(Error::Parse("FLAVOR takes at most one name".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_current_flavor() {
        let mut session = Session::new();
        match Flavor.execute(&mut session, &[]).unwrap() {
            CommandOutput::Text(s) => {
                assert!(s.contains("classic"));
                assert!(s.contains("NPAE"));
            }
            _ => panic!("expected Text output"),
        }
    }

    #[test]
    fn switching_flavor_zeroes_model() {
        let mut session = Session::new();
        session.model.set("AN", 1.0).unwrap();
        Flavor.execute(&mut session, &["Extra"]).unwrap();
        assert_eq!(session.flavor(), ModelFlavor::Extra);
        assert_eq!(session.model.values(), vec![0.0; 17]);
    }

    #[test]
    fn unknown_flavor_leaves_model_alone() {
        let mut session = Session::new();
        session.model.set("AN", 1.0).unwrap();
        assert!(Flavor.execute(&mut session, &["tpoint"]).is_err());
        assert_eq!(session.model.get("AN").unwrap(), 1.0);
    }
}
