use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong on this page. All of these are caught at the
/// event-handler boundary and turned into a fixed user-facing message; none
/// of them propagate past a handler.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("browser context unavailable")]
    NoWindow,

    #[error("expected element missing: {0}")]
    MissingElement(String),

    #[error("dom operation failed: {0}")]
    Dom(String),

    #[error("network request failed: {0}")]
    Transport(String),

    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl PageError {
    pub fn dom(value: JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }

    pub fn transport(value: JsValue) -> Self {
        Self::Transport(format!("{value:?}"))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
