pub mod apply;
pub mod clist;
pub mod correct;
pub mod fit;
pub mod fix;
pub mod flavor;
pub mod gdist;
pub mod gscat;
pub mod help;
pub mod indat;
pub mod inmod;
pub mod mask;
pub mod outl;
pub mod outmod;
pub mod reset;
pub mod set;
pub mod show;
pub mod slist;

use crate::error::{Error, Result};
use crate::session::Session;

/// Every command name the shell understands, for completion and HELP.
pub const COMMAND_NAMES: &[&str] = &[
    "APPLY", "CLIST", "CORRECT", "FIT", "FIX", "FLAVOR", "GDIST", "GSCAT", "HELP", "INDAT",
    "INMOD", "MASK", "OUTL", "OUTMOD", "QUIT", "RESET", "SET", "SHOW", "SLIST", "UNFIX", "UNMASK",
];

#[derive(Debug)]
pub enum CommandOutput {
    Text(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Coefficients(CoefficientDisplay),
    Quit,
    None,
}

#[derive(Debug)]
pub struct CoefficientDisplay {
    pub flavor: String,
    pub names: Vec<String>,
    pub values: Vec<f64>,
    pub fixed: Vec<bool>,
    /// RMS of the last fit in arcseconds, if there is one.
    pub rms: Option<f64>,
    pub converged: Option<bool>,
}

impl CoefficientDisplay {
    pub fn from_session(session: &Session) -> Self {
        Self {
            flavor: session.flavor().to_string(),
            names: session
                .model
                .parameter_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            values: session.model.values(),
            fixed: session.model.fixed_flags().to_vec(),
            rms: session.last_fit.as_ref().map(|f| f.rms_arcsec),
            converged: session.last_fit.as_ref().map(|f| f.converged),
        }
    }
}

pub trait Command {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput>;
}

pub fn dispatch(session: &mut Session, input: &str) -> Result<CommandOutput> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(CommandOutput::None);
    }
    let cmd_name = parts[0].to_uppercase();
    let args = &parts[1..];
    match cmd_name.as_str() {
        "APPLY" => apply::Apply.execute(session, args),
        "CLIST" => clist::Clist.execute(session, args),
        "CORRECT" => correct::Correct.execute(session, args),
        "FIT" => fit::Fit.execute(session, args),
        "FIX" => fix::Fix.execute(session, args),
        "FLAVOR" => flavor::Flavor.execute(session, args),
        "GDIST" => gdist::Gdist.execute(session, args),
        "GSCAT" => gscat::Gscat.execute(session, args),
        "HELP" => help::Help.execute(session, args),
        "INDAT" => indat::Indat.execute(session, args),
        "INMOD" => inmod::Inmod.execute(session, args),
        "MASK" => mask::Mask.execute(session, args),
        "OUTL" => outl::Outl.execute(session, args),
        "OUTMOD" => outmod::Outmod.execute(session, args),
        "QUIT" | "EXIT" => Ok(CommandOutput::Quit),
        "RESET" => reset::Reset.execute(session, args),
        "SET" => set::Set.execute(session, args),
        "SHOW" => show::Show.execute(session, args),
        "SLIST" => slist::Slist.execute(session, args),
        "UNFIX" => fix::Unfix.execute(session, args),
        "UNMASK" => mask::Unmask.execute(session, args),
        _ => Err(Error::Parse(format!("unknown command: {}", parts[0]))),
    }
}

/// Expects exactly one filename argument.
pub(crate) fn single_path<'a>(cmd: &str, args: &[&'a str]) -> Result<&'a str> {
    match args {
        [path] => Ok(*path),
        [] => Err(Error::Parse(format!("{} requires a filename", cmd))),
        _ => Err(Error::Parse(format!("{} takes a single filename", cmd))),
    }
}
