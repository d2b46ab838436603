/// Writes one line to the browser console, or to stderr off the web.
pub fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());

    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{message}");
}

macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::logging::log(&format!($($t)*))
    };
}
