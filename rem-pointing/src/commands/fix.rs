use super::{Command, CommandOutput};
use crate::error::{Error, Result};
use crate::session::Session;

pub struct Fix;
pub struct Unfix;

impl Command for Fix {
    fn name(&self) -> &str {
        "FIX"
    }
    fn description(&self) -> &str {
        "Hold coefficients at their current values during fit"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(Error::Parse("FIX requires parameter names or ALL".into()));
        }
        if args[0].eq_ignore_ascii_case("ALL") {
            session.model.fix_all();
            return Ok(CommandOutput::Text(format!(
                "Fixed all {} coefficients",
                session.model.parameter_count()
            )));
        }
        check_names(session, args)?;
        for name in args {
            session.model.fix(name);
        }
        Ok(CommandOutput::Text(format!("Fixed: {}", upper(args))))
    }
}

impl Command for Unfix {
    fn name(&self) -> &str {
        "UNFIX"
    }
    fn description(&self) -> &str {
        "Allow coefficients to be fitted"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        if args.is_empty() {
            return Err(Error::Parse("UNFIX requires parameter names or ALL".into()));
        }
        if args[0].eq_ignore_ascii_case("ALL") {
            session.model.unfix_all();
            return Ok(CommandOutput::Text(format!(
                "Unfixed all {} coefficients",
                session.model.parameter_count()
            )));
        }
        check_names(session, args)?;
        for name in args {
            session.model.unfix(name);
        }
        Ok(CommandOutput::Text(format!("Unfixed: {}", upper(args))))
    }
}

/// All-or-nothing: an unknown name leaves every flag as it was.
fn check_names(session: &Session, args: &[&str]) -> Result<()> {
    for name in args {
        if session.model.index_of(name).is_none() {
            return Err(Error::UnknownParameter {
                flavor: session.flavor(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn upper(args: &[&str]) -> String {
    args.iter()
        .map(|a| a.to_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_and_unfix_names() {
        let mut session = Session::new();
        Fix.execute(&mut session, &["an", "AE"]).unwrap();
        assert_eq!(session.model.free_count(), 5);
        Unfix.execute(&mut session, &["AN"]).unwrap();
        assert_eq!(session.model.free_count(), 6);
    }

    #[test]
    fn fix_all_and_unfix_all() {
        let mut session = Session::new();
        Fix.execute(&mut session, &["all"]).unwrap();
        assert_eq!(session.model.free_count(), 0);
        Unfix.execute(&mut session, &["ALL"]).unwrap();
        assert_eq!(session.model.free_count(), 7);
    }

    #[test]
    fn unknown_name_changes_nothing() {
        let mut session = Session::new();
        assert!(Fix.execute(&mut session, &["AN", "C5"]).is_err());
        assert_eq!(session.model.free_count(), 7);
    }

    #[test]
    fn requires_args() {
        let mut session = Session::new();
        assert!(Fix.execute(&mut session, &[]).is_err());
        assert!(Unfix.execute(&mut session, &[]).is_err());
    }
}
