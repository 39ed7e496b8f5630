// enigma-cli: argument handling and the message session for the `enigma` tool.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process;

use enigma_core::EnigmaError;
use enigma_machine::config::MachineConfig;
use enigma_machine::constants::DEFAULT_CONFIG;
use enigma_machine::format::group_fives;
use enigma_machine::settings::Settings;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "ENIGMA_CONFIG";

/// Error type for a CLI session.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Enigma(#[from] EnigmaError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A message line appeared before any settings line.
    #[error("first line must be a settings line")]
    MissingSettings,
}

/// Where the machine configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The built-in Naval M4 rotor set.
    Default,
    File(PathBuf),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub verbose: bool,
    pub config: ConfigSource,
    /// Message input file; stdin if absent.
    pub input: Option<PathBuf>,
    /// Output file; stdout if absent.
    pub output: Option<PathBuf>,
}

/// Parse the command line (without the program name).
///
/// The configuration is taken from, in order: `--default`, `-c/--config PATH`,
/// the first positional argument, or `env_config` (the value of
/// [`CONFIG_ENV`]). The remaining positionals are the input and output files,
/// so with the environment variable set and no positional CONFIG the
/// session reads stdin.
pub fn parse_args(args: &[String], env_config: Option<String>) -> Result<CliArgs, String> {
    let mut verbose = false;
    let mut use_default = false;
    let mut config_flag: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix("--config=") {
            config_flag = Some(val.to_string());
            continue;
        }
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "--default" => use_default = true,
            "-c" | "--config" => {
                let Some(val) = args.get(i + 1) else {
                    return Err(format!("{arg} requires a value"));
                };
                config_flag = Some(val.clone());
                skip_next = true;
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(format!("unknown option {s}"));
            }
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let config = if use_default {
        ConfigSource::Default
    } else if let Some(path) = config_flag {
        ConfigSource::File(PathBuf::from(path))
    } else if let Some(path) = positional.next().or(env_config) {
        ConfigSource::File(PathBuf::from(path))
    } else {
        return Err("no configuration file given (use CONFIG, --config or --default)".to_string());
    };

    let input = positional.next().map(PathBuf::from);
    let output = positional.next().map(PathBuf::from);
    if positional.next().is_some() {
        return Err("too many arguments: expected at most CONFIG INPUT OUTPUT".to_string());
    }

    Ok(CliArgs {
        verbose,
        config,
        input,
        output,
    })
}

/// Read and parse the machine configuration.
pub fn load_config(source: &ConfigSource) -> Result<MachineConfig, String> {
    match source {
        ConfigSource::Default => MachineConfig::parse(DEFAULT_CONFIG).map_err(|e| e.to_string()),
        ConfigSource::File(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("could not open {}: {}", path.display(), e))?;
            MachineConfig::parse(&text).map_err(|e| format!("{}: {}", path.display(), e))
        }
    }
}

/// Run a message session.
///
/// Leading blank lines are skipped; the first other line must be a settings
/// line (`* ...`). Each later settings line reconfigures the machine. Every
/// other line is a message: its whitespace is removed, it is converted and
/// written in groups of five. Blank message lines produce blank output lines.
pub fn run<R: BufRead, W: Write>(
    config: &MachineConfig,
    input: R,
    output: &mut W,
    verbose: bool,
) -> Result<(), CliError> {
    let mut machine = config.machine()?;
    let mut configured = false;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.starts_with('*') {
            let settings = Settings::parse(trimmed, config.num_rotors())?;
            settings.apply(&mut machine)?;
            configured = true;
            if verbose {
                eprintln!(
                    "[enigma] rotors {} setting {} plugboard {}",
                    settings.rotors().join(" "),
                    machine.settings(),
                    machine.plugboard()
                );
            }
            continue;
        }
        if !configured {
            if trimmed.is_empty() {
                continue;
            }
            return Err(CliError::MissingSettings);
        }

        let msg: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = machine.convert(&msg)?;
        writeln!(output, "{}", group_fives(&converted))?;
    }
    Ok(())
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
