use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// One-shot `setTimeout`. The closure frees itself after it runs.
pub(super) fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) -> Result<i32, String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    let cb = Closure::once_into_js(f);
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
        )
        .map_err(|_| "setTimeout failed".to_string())
}

pub(super) fn clear_timeout(handle: i32) {
    if let Some(w) = web_sys::window() {
        w.clear_timeout_with_handle(handle);
    }
}
