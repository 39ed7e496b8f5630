//! Message session tests: settings lines, message lines and output grouping.

use std::io::Cursor;

use enigma_cli::{CliError, run};
use enigma_core::EnigmaError;
use enigma_machine::config::MachineConfig;
use enigma_machine::constants::DEFAULT_CONFIG;

fn session(input: &str) -> Result<String, CliError> {
    let config = MachineConfig::parse(DEFAULT_CONFIG).unwrap();
    let mut out = Vec::new();
    run(&config, Cursor::new(input), &mut out, false)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn hiawatha_encrypts_in_groups() {
    let input = "\
* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
FROM his shoUlder Hiawatha
Took the camera of rosewood
Made of sliding folding rosewood
";
    let expected = "\
QVPQS OKOIL PUBKJ ZPISF XDW
BHCNS CXNUO AATZX SRCFY DGU
FLPNX GXIXT YJUJR CAUGE UNCFM KUF
";
    assert_eq!(session(input).unwrap(), expected);
}

#[test]
fn hiawatha_decrypts() {
    let input = "\
* B BETA III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
QVPQS OKOIL PUBKJ ZPISF XDW
BHCNS CXNUO AATZX SRCFY DGU
";
    let expected = "\
FROMH ISSHO ULDER HIAWA THA
TOOKT HECAM ERAOF ROSEW OOD
";
    assert_eq!(session(input).unwrap(), expected);
}

#[test]
fn blank_lines_are_preserved() {
    let input = "\n* B BETA I II III AAAA (AQ) (EP)\nHELLO WORLD\n\nHELLO\n";
    let out = session(input).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "IHBDQ QMTQZ");
    assert_eq!(lines[1], "");
}

#[test]
fn settings_line_resets_machine() {
    let input = "\
* B BETA I II III AAAA (AQ) (EP)
HELLOWORLD
* B BETA I II III AAAA (AQ) (EP)
HELLOWORLD
";
    assert_eq!(session(input).unwrap(), "IHBDQ QMTQZ\nIHBDQ QMTQZ\n");
}

#[test]
fn empty_input_is_ok() {
    assert_eq!(session("").unwrap(), "");
}

#[test]
fn message_before_settings_fails() {
    assert!(matches!(
        session("HELLO\n* B BETA I II III AAAA\n"),
        Err(CliError::MissingSettings)
    ));
}

#[test]
fn settings_errors_propagate() {
    assert!(matches!(
        session("* B BETA I II IX AAAA\nHELLO\n"),
        Err(CliError::Enigma(EnigmaError::UnknownRotor(_)))
    ));
    assert!(matches!(
        session("* B BETA I II III AAA\nHELLO\n"),
        Err(CliError::Enigma(EnigmaError::SettingLength { .. }))
    ));
}

#[test]
fn bad_message_symbol_fails() {
    let err = session("* B BETA I II III AAAA\nHELLO, WORLD\n").unwrap_err();
    assert!(matches!(err, CliError::Enigma(EnigmaError::SymbolOutOfRange(','))));
    assert_eq!(err.to_string(), "character ',' out of range");
}
