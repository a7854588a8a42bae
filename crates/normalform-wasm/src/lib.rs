use normalform::{ConversionConfig, ConversionJson, Converter, ErrorJson, OutcomeJson, EXAMPLES};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct NormalFormWasm;

#[derive(Serialize, Deserialize, Default)]
pub struct ConvertOptions {
    pub max_nodes: Option<usize>, // node budget (default: 100000, 0 disables it)
    pub timeout_ms: Option<u32>,
}

impl ConvertOptions {
    fn from_js(options_js: JsValue) -> Result<Self, JsValue> {
        if options_js.is_undefined() || options_js.is_null() {
            return Ok(ConvertOptions::default());
        }
        serde_wasm_bindgen::from_value(options_js)
            .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
    }

    fn config(&self) -> ConversionConfig {
        let mut config = ConversionConfig::default();
        match self.max_nodes {
            Some(0) => config.max_nodes = None,
            Some(n) => config.max_nodes = Some(n),
            None => {}
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout = Some(Duration::from_millis(ms as u64));
        }
        config
    }
}

#[wasm_bindgen]
impl NormalFormWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        NormalFormWasm
    }

    /// Convert a formula; the error value is an `ErrorJson` object
    #[wasm_bindgen]
    pub fn convert(&self, input: &str, options_js: JsValue) -> Result<JsValue, JsValue> {
        let options = ConvertOptions::from_js(options_js)?;
        let converter = Converter::new(options.config());

        match converter.convert(input) {
            Ok(result) => {
                web_sys::console::log_1(
                    &format!("Converted into {} clauses", result.clauses.len()).into(),
                );
                serde_wasm_bindgen::to_value(&ConversionJson::from(&result))
                    .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
            }
            Err(e) => {
                let error = ErrorJson::from(&e);
                Err(serde_wasm_bindgen::to_value(&error)
                    .unwrap_or_else(|_| JsValue::from_str(&error.message)))
            }
        }
    }

    /// Same as `convert`, as a JSON string
    #[wasm_bindgen]
    pub fn convert_json(&self, input: &str, options_js: JsValue) -> Result<String, JsError> {
        let options = ConvertOptions::from_js(options_js)
            .map_err(|_| JsError::new("Invalid options"))?;
        let outcome = Converter::new(options.config()).convert(input);
        serde_json::to_string(&OutcomeJson::from(&outcome))
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen]
    pub fn validate(&self, input: &str) -> Result<String, JsError> {
        // Just parse and return success/error for validation
        match normalform::parse(input) {
            Ok(parsed) => Ok(format!(
                "Valid {} formula with {} predicates",
                parsed.formula.kind(),
                parsed.predicates.len()
            )),
            Err(e) => Err(JsError::new(&e.to_string())),
        }
    }

    #[wasm_bindgen]
    pub fn examples(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&EXAMPLES.to_vec())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

impl Default for NormalFormWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();
}
