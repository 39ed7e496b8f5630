// enigma: encrypt and decrypt messages with a configured rotor machine.
//
// Usage:
//   enigma [OPTIONS] [CONFIG] [INPUT [OUTPUT]]
//
// Options:
//   -c, --config PATH   Machine configuration file (or set ENIGMA_CONFIG)
//   --default           Use the built-in Naval M4 rotor set
//   -v, --verbose       Report each applied settings line on stderr
//   -h, --help          Print help

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

fn open_input(path: Option<&Path>) -> Box<dyn BufRead> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = File::open(p)
                .unwrap_or_else(|e| enigma_cli::fatal(&format!("could not open {}: {e}", p.display())));
            Box::new(BufReader::new(file))
        }
        _ => Box::new(BufReader::new(io::stdin())),
    }
}

fn open_output(path: Option<&Path>) -> Box<dyn Write> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = File::create(p)
                .unwrap_or_else(|e| enigma_cli::fatal(&format!("could not open {}: {e}", p.display())));
            Box::new(BufWriter::new(file))
        }
        _ => Box::new(BufWriter::new(io::stdout())),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if enigma_cli::wants_help(&args) {
        println!("enigma: Enigma rotor machine simulator.");
        println!();
        println!("Usage: enigma [OPTIONS] [CONFIG] [INPUT [OUTPUT]]");
        println!();
        println!("Reads settings lines (\"* B BETA III IV I AXLE (HQ) (EX)\") and messages");
        println!("from INPUT (default stdin) and writes converted messages to OUTPUT");
        println!("(default stdout) in groups of five letters.");
        println!();
        println!("Options:");
        println!("  -c, --config PATH   Machine configuration file (or set {})", enigma_cli::CONFIG_ENV);
        println!("  --default           Use the built-in Naval M4 rotor set");
        println!("  -v, --verbose       Report each applied settings line on stderr");
        println!("  -h, --help          Print this help");
        return;
    }

    let env_config = std::env::var(enigma_cli::CONFIG_ENV).ok();
    let opts = enigma_cli::parse_args(&args, env_config).unwrap_or_else(|e| enigma_cli::fatal(&e));
    let config = enigma_cli::load_config(&opts.config).unwrap_or_else(|e| enigma_cli::fatal(&e));

    let input = open_input(opts.input.as_deref());
    let mut output = open_output(opts.output.as_deref());

    if let Err(e) = enigma_cli::run(&config, input, &mut output, opts.verbose) {
        let _ = output.flush();
        enigma_cli::fatal(&e.to_string());
    }
    if let Err(e) = output.flush() {
        enigma_cli::fatal(&format!("failed to write output: {e}"));
    }
}
