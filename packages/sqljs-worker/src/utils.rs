use js_sys::Reflect;
use wasm_bindgen::prelude::*;

pub(crate) fn describe_js_value(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    // Same text as JavaScript's String(n)
    if let Some(n) = value.as_f64() {
        if let Ok(text) = js_sys::Number::from(n).to_string(10) {
            return String::from(text);
        }
    }
    // Thrown plain objects shaped like errors
    if value.is_object() {
        if let Some(message) = Reflect::get(value, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
        {
            return message;
        }
    }
    format!("{value:?}")
}
