use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use rem_pointing::commands::{self, CoefficientDisplay, CommandOutput, COMMAND_NAMES};
use rem_pointing::session::Session;
use rem_pointing::ModelFlavor;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

/// Interactive fitting of REM telescope pointing models.
#[derive(Parser, Debug)]
#[command(name = "rem-pointing", version, about)]
struct Args {
    /// Model flavor to start with (simple, classic, full, extra)
    #[arg(long)]
    flavor: Option<ModelFlavor>,

    /// Model file to load at startup
    #[arg(long)]
    inmod: Option<String>,

    /// Calibration samples to load at startup
    #[arg(long)]
    indat: Option<String>,

    /// Run a command and exit instead of starting the prompt. Repeatable.
    #[arg(short = 'e', long = "execute")]
    execute: Vec<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".rem_pointing_history")
}

struct PointingHelper {
    commands: Vec<String>,
    parameters: Vec<String>,
    flavors: Vec<String>,
}

impl PointingHelper {
    fn new() -> Self {
        let mut parameters: Vec<String> = ModelFlavor::ALL
            .iter()
            .flat_map(|f| f.parameter_names().iter().map(|s| s.to_string()))
            .collect();
        parameters.sort();
        parameters.dedup();
        parameters.push("ALL".to_string());
        Self {
            commands: COMMAND_NAMES.iter().map(|s| s.to_string()).collect(),
            parameters,
            flavors: ModelFlavor::ALL.iter().map(|f| f.name().to_string()).collect(),
        }
    }
}

fn split_path_prefix(partial: &str) -> (&Path, &str) {
    if partial.is_empty() {
        return (Path::new("."), "");
    }
    let path = Path::new(partial);
    if partial.ends_with(std::path::is_separator) {
        return (path, "");
    }
    match (path.parent(), path.file_name()) {
        (Some(p), Some(f)) => {
            let dir = if p.as_os_str().is_empty() { Path::new(".") } else { p };
            (dir, f.to_str().unwrap_or(""))
        }
        _ => (Path::new("."), partial),
    }
}

fn complete_path(partial: &str) -> Vec<Pair> {
    let (dir, prefix) = split_path_prefix(partial);
    let Ok(entries) = fs::read_dir(dir) else {
        return vec![];
    };
    let base = match partial.rfind(std::path::is_separator) {
        Some(i) => partial[..=i].to_string(),
        None => String::new(),
    };
    entries
        .filter_map(|e| e.ok())
        .filter_map(|e| build_path_pair(&e, prefix, &base))
        .collect()
}

fn build_path_pair(entry: &fs::DirEntry, prefix: &str, base: &str) -> Option<Pair> {
    let name = entry.file_name().into_string().ok()?;
    if !name.starts_with(prefix) {
        return None;
    }
    let suffix = if entry.path().is_dir() { std::path::MAIN_SEPARATOR_STR } else { "" };
    Some(Pair {
        display: format!("{}{}", name, suffix),
        replacement: format!("{}{}{}", base, name, suffix),
    })
}

fn complete_word(candidates: &[String], prefix: &str, upper: bool) -> Vec<Pair> {
    let prefix = if upper { prefix.to_uppercase() } else { prefix.to_lowercase() };
    candidates
        .iter()
        .filter(|c| c.starts_with(&prefix))
        .map(|c| Pair { display: c.clone(), replacement: c.clone() })
        .collect()
}

impl Completer for PointingHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let up_to = &line[..pos];
        let words: Vec<&str> = up_to.split_whitespace().collect();
        let start = up_to.rfind(char::is_whitespace).map_or(0, |i| i + 1);
        let partial = if up_to.ends_with(' ') { "" } else { words.last().copied().unwrap_or("") };

        if words.is_empty() || (words.len() == 1 && !up_to.ends_with(' ')) {
            return Ok((start, complete_word(&self.commands, partial, true)));
        }
        let matches = match words[0].to_uppercase().as_str() {
            "INDAT" | "INMOD" | "OUTMOD" => complete_path(partial),
            "FIX" | "UNFIX" | "SET" => complete_word(&self.parameters, partial, true),
            "FLAVOR" => complete_word(&self.flavors, partial, false),
            "HELP" => complete_word(&self.commands, partial, true),
            _ => return Ok((pos, vec![])),
        };
        Ok((start, matches))
    }
}

impl Hinter for PointingHelper {
    type Hint = String;
}
impl Highlighter for PointingHelper {}
impl Validator for PointingHelper {}
impl Helper for PointingHelper {}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Applies the startup flags in the same order a user would type them.
fn startup(session: &mut Session, args: &Args) -> rem_pointing::Result<()> {
    use rem_pointing::commands::Command;

    if let Some(flavor) = args.flavor {
        session.set_flavor(flavor);
        debug!("starting with {} model", flavor);
    }
    if let Some(path) = &args.inmod {
        print_output(commands::inmod::Inmod.execute(session, &[path.as_str()])?);
    }
    if let Some(path) = &args.indat {
        print_output(commands::indat::Indat.execute(session, &[path.as_str()])?);
    }
    Ok(())
}

fn run_batch(session: &mut Session, lines: &[String]) -> ExitCode {
    for line in lines {
        println!(">> {}", line);
        match commands::dispatch(session, line) {
            Ok(CommandOutput::Quit) => break,
            Ok(output) => print_output(output),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_interactive(session: &mut Session) -> ExitCode {
    println!("rem-pointing v{}", env!("CARGO_PKG_VERSION"));
    println!("Type HELP for commands, Ctrl-D to exit\n");

    let mut rl = match Editor::with_config(
        rustyline::Config::builder()
            .auto_add_history(true)
            .build(),
    ) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize editor: {}", e);
            return ExitCode::FAILURE;
        }
    };
    rl.set_helper(Some(PointingHelper::new()));

    let history = history_path();
    if rl.load_history(&history).is_err() {
        debug!("no history at {}", history.display());
    }

    loop {
        let prompt = format!("{}> ", session.flavor());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match commands::dispatch(session, line) {
                    Ok(CommandOutput::Quit) => {
                        println!("Bye!");
                        break;
                    }
                    Ok(output) => print_output(output),
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Bye!");
                break;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(&history) {
        debug!("could not save history: {}", e);
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut session = Session::new();
    if let Err(e) = startup(&mut session, &args) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if args.execute.is_empty() {
        run_interactive(&mut session)
    } else {
        run_batch(&mut session, &args.execute)
    }
}

fn print_output(output: CommandOutput) {
    match output {
        CommandOutput::Text(s) => println!("{}", s),
        CommandOutput::Table { headers, rows } => print_table(&headers, &rows),
        CommandOutput::Coefficients(display) => print_coefficients(&display),
        CommandOutput::Quit | CommandOutput::None => {}
    }
}

fn print_coefficients(display: &CoefficientDisplay) {
    println!("\n  {} model\n", display.flavor);
    println!("       coeff           value (deg)      arcsec\n");
    for (i, name) in display.names.iter().enumerate() {
        let mark = if display.fixed[i] { "*" } else { " " };
        println!(
            "{:3} {} {:>6}    {:>14.8}  {:>10.2}",
            i + 1,
            mark,
            name,
            display.values[i],
            display.values[i] * 3600.0,
        );
    }
    match (display.rms, display.converged) {
        (Some(rms), Some(false)) => println!("\nSky RMS = {:.2}\" (not converged)\n", rms),
        (Some(rms), _) => println!("\nSky RMS = {:.2}\"\n", rms),
        _ => println!(),
    }
}

fn print_table(headers: &[String], rows: &[Vec<String>]) {
    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            let hw = headers[i].len();
            let rw = rows
                .iter()
                .map(|r| r.get(i).map_or(0, |s| s.len()))
                .max()
                .unwrap_or(0);
            hw.max(rw)
        })
        .collect();

    for (i, h) in headers.iter().enumerate() {
        print!("{:>width$}  ", h, width = widths[i]);
    }
    println!();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            print!("{:>width$}  ", cell, width = widths.get(i).copied().unwrap_or(0));
        }
        println!();
    }
}
