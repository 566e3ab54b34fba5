use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Help;

impl Command for Help {
    fn name(&self) -> &str {
        "HELP"
    }
    fn description(&self) -> &str {
        "Show available commands"
    }

    fn execute(&self, _session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        if let Some(cmd) = args.first() {
            Ok(CommandOutput::Text(command_help(cmd)))
        } else {
            Ok(CommandOutput::Text(general_help()))
        }
    }
}

fn command_help(cmd: &str) -> String {
    match cmd.to_uppercase().as_str() {
        "FLAVOR" => "FLAVOR [simple|classic|full|extra]\n  Show or select the model flavor\n  Selecting a flavor zeroes all coefficients and fixed flags".into(),
        "INDAT" => "INDAT <file>\n  Load calibration samples\n  One sample per line: cmd_az cmd_alt obs_az obs_alt (degrees)\n  Lines starting with # or ! are comments".into(),
        "INMOD" => "INMOD <file>\n  Load model file (FLAVOR line, NAME value lines, END)".into(),
        "OUTMOD" => "OUTMOD <file>\n  Save model file".into(),
        "SET" => "SET <param> <value>\n  Set one coefficient in degrees".into(),
        "FIT" => "FIT\n  Minimise the summed angular residual over the free coefficients".into(),
        "CLIST" => "CLIST\n  List coefficients, fixed ones marked with *".into(),
        "RESET" => "RESET\n  Zero all coefficients".into(),
        "FIX" => "FIX <param> [param...] | FIX ALL\n  Hold coefficients at their current values during fit".into(),
        "UNFIX" => "UNFIX <param> [param...] | UNFIX ALL\n  Allow fixed coefficients to be fitted".into(),
        "SLIST" => "SLIST\n  List samples with residuals in arcsec (* = masked)".into(),
        "MASK" => "MASK <n> [n...] | MASK <n>-<m> | MASK ALL\n  Exclude samples from fit".into(),
        "UNMASK" => "UNMASK <n> [n...] | UNMASK <n>-<m> | UNMASK ALL\n  Include masked samples".into(),
        "OUTL" => "OUTL <sigma> [M]\n  Find samples whose residual exceeds sigma * RMS (M to mask)".into(),
        "CORRECT" => "CORRECT <az> <alt>\n  Where the telescope points when commanded to az/alt".into(),
        "APPLY" => "APPLY <az> <alt>\n  Position to command so the telescope lands on az/alt".into(),
        "GSCAT" => "GSCAT\n  Terminal scatter plot of residuals (dAlt vs dX)".into(),
        "GDIST" => "GDIST\n  Terminal histogram of residual magnitudes".into(),
        "SHOW" => "SHOW\n  Display session state".into(),
        "HELP" => "HELP [command]\n  Show help for a command".into(),
        "QUIT" => "QUIT\n  Exit the program".into(),
        _ => format!("Unknown command: {}", cmd),
    }
}

fn general_help() -> String {
    "\
Commands:
  FLAVOR [name]       Show/select model flavor
  INDAT <file>        Load calibration samples
  INMOD <file>        Load model
  OUTMOD <file>       Save model

  SET <param> <val>   Set one coefficient
  FIT                 Fit model
  CLIST               List coefficients
  RESET               Zero all coefficients
  FIX <params>        Fix coefficients during fit
  UNFIX <params>      Unfix coefficients

  SLIST               List samples
  MASK <n>            Exclude samples
  UNMASK <n>          Include samples
  OUTL <sigma>        Find/mask outliers

  CORRECT <az> <alt>  Actual position for a commanded one
  APPLY <az> <alt>    Commanded position for a target

  GSCAT               Scatter plot of residuals
  GDIST               Histogram of residuals

  SHOW                Display session state
  HELP [cmd]          Show help
  QUIT                Exit

Type HELP <command> for details."
        .to_string()
}
