// WASM bindings for the Enigma machine simulator.
//
// Provides a `WasmEnigma` class exported via wasm-bindgen that owns a
// configured `Machine`. Rotor state is serialized to JavaScript values
// using serde-wasm-bindgen.
//
// Usage from JavaScript:
//
//   const enigma = new WasmEnigma();              // built-in M4 rotors
//   const custom = new WasmEnigma(configText);    // or a configuration file's text
//   enigma.configure("* B BETA III IV I AXLE (HQ) (EX) (IP) (TR) (BY)");
//   enigma.convert("FROMHISSHOULDERHIAWATHA");    // => "QVPQSOKOILPUBKJZPISFXDW"
//   enigma.convertGrouped("TOOK THE CAMERA");      // => "BHCNS CXNUO AAT"
//   enigma.rotors();    // => [{ name: "B", kind: "Reflector", setting: "A", ... }, ...]

use serde::Serialize;
use wasm_bindgen::prelude::*;

use enigma_core::EnigmaError;
use enigma_machine::config::MachineConfig;
use enigma_machine::constants::DEFAULT_CONFIG;
use enigma_machine::format::group_fives;
use enigma_machine::settings::Settings;
use enigma_machine::{Machine, Rotor, RotorKind};

// ============================================================================
// Serde-serializable DTO types for JS interop
// ============================================================================

/// Serializable snapshot of one machine slot.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRotor {
    slot: usize,
    name: String,
    kind: String,
    setting: String,
    notches: String,
    at_notch: bool,
}

fn kind_to_string(kind: &RotorKind) -> String {
    match kind {
        RotorKind::Reflector => "Reflector".to_string(),
        RotorKind::Fixed => "Fixed".to_string(),
        RotorKind::Moving { .. } => "Moving".to_string(),
    }
}

fn rotor_to_js(slot: usize, rotor: &Rotor) -> JsRotor {
    let symbols = rotor.spec().alphabet().symbols();
    JsRotor {
        slot,
        name: rotor.name().to_string(),
        kind: kind_to_string(rotor.spec().kind()),
        setting: rotor.setting_symbol().to_string(),
        notches: rotor.spec().notches().iter().map(|&i| symbols[i]).collect(),
        at_notch: rotor.at_notch(),
    }
}

fn enigma_error_to_js(e: EnigmaError) -> JsError {
    JsError::new(&e.to_string())
}

// ============================================================================
// WasmEnigma
// ============================================================================

/// Enigma rotor machine for WebAssembly.
#[wasm_bindgen]
pub struct WasmEnigma {
    config: MachineConfig,
    machine: Machine,
}

#[wasm_bindgen]
impl WasmEnigma {
    /// Create a machine from configuration text, or from the built-in
    /// Naval M4 rotor set if `config_text` is omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(config_text: Option<String>) -> Result<WasmEnigma, JsError> {
        let text = config_text.as_deref().unwrap_or(DEFAULT_CONFIG);
        let config = MachineConfig::parse(text).map_err(enigma_error_to_js)?;
        let machine = config.machine().map_err(enigma_error_to_js)?;
        Ok(WasmEnigma { config, machine })
    }

    /// Apply a settings line such as `* B BETA III IV I AXLE (HQ) (EX)`.
    pub fn configure(&mut self, settings_line: &str) -> Result<(), JsError> {
        let settings = Settings::parse(settings_line, self.config.num_rotors())
            .map_err(enigma_error_to_js)?;
        settings.apply(&mut self.machine).map_err(enigma_error_to_js)
    }

    /// Convert a message, ignoring whitespace. The machine state carries
    /// over to the next call.
    pub fn convert(&mut self, msg: &str) -> Result<String, JsError> {
        let msg: String = msg.chars().filter(|c| !c.is_whitespace()).collect();
        self.machine.convert(&msg).map_err(enigma_error_to_js)
    }

    /// Convert a message and format it in groups of five symbols.
    #[wasm_bindgen(js_name = "convertGrouped")]
    pub fn convert_grouped(&mut self, msg: &str) -> Result<String, JsError> {
        self.convert(msg).map(|out| group_fives(&out))
    }

    /// Current settings of the non-reflector slots, e.g. `"AXLE"`.
    pub fn settings(&self) -> String {
        self.machine.settings()
    }

    /// Snapshot of every slot: name, kind, setting, notches and whether the
    /// rotor is at a notch.
    pub fn rotors(&self) -> Result<JsValue, JsError> {
        let js_rotors: Vec<JsRotor> = self
            .machine
            .rotors()
            .iter()
            .enumerate()
            .map(|(slot, r)| rotor_to_js(slot, r))
            .collect();
        serde_wasm_bindgen::to_value(&js_rotors).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Names of all rotors in the catalog, in configuration order.
    #[wasm_bindgen(js_name = "availableRotors")]
    pub fn available_rotors(&self) -> Vec<String> {
        self.config
            .catalog()
            .iter()
            .map(|spec| spec.name().to_string())
            .collect()
    }
}
