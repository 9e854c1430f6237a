//! JavaScript bindings.

use wasm_bindgen::prelude::*;

use crate::assign::{AssignConfig, AssignRunner};
use crate::model::Problem;

/// Runs the engine on a serialized [`Problem`] and optional [`AssignConfig`].
///
/// Configuration errors are thrown as strings.
#[wasm_bindgen(js_name = assignTeams)]
pub fn assign_teams(problem: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let problem: Problem = serde_wasm_bindgen::from_value(problem)?;
    let config: AssignConfig = if config.is_undefined() || config.is_null() {
        AssignConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    let result = AssignRunner::run(&problem, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(serde_wasm_bindgen::to_value(&result)?)
}
