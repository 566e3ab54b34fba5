use crate::error::{Error, Result};
use crate::parser::parse_f64;
use crate::session::Session;
use super::{Command, CommandOutput};

pub struct Set;

impl Command for Set {
    fn name(&self) -> &str { "SET" }
    fn description(&self) -> &str { "Set one coefficient (degrees)" }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let [name, value] = args else {
            return Err(Error::Parse("SET requires a parameter name and a value".into()));
        };
        let value = parse_f64(value, name)?;
        session.model.set(name, value)?;
        session.last_fit = None;
        Ok(CommandOutput::Text(format!(
            "{} = {:.6}",
            name.to_uppercase(),
            value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_named_coefficient() {
        let mut session = Session::new();
        Set.execute(&mut session, &["tf", "-0.125"]).unwrap();
        assert_eq!(session.model.get("TF").unwrap(), -0.125);
    }

    #[test]
    fn unknown_name_errors() {
        let mut session = Session::new();
        let err = Set.execute(&mut session, &["C5", "1"]).unwrap_err();
        assert!(matches!(err, Error::UnknownParameter { .. }));
    }

    #[test]
    fn needs_two_args() {
        let mut session = Session::new();
        assert!(Set.execute(&mut session, &["AN"]).is_err());
        assert!(Set.execute(&mut session, &["AN", "x"]).is_err());
    }
}
