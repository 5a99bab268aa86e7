//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend
//! - Whether the ad SDK exists
//! - Back navigation policy

/// What the app should do after a back-navigation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Left a game and returned to the home menu
    ReturnedHome,
    /// Already at home; the host should close the app
    Exit,
}

/// Install the logger for this target. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the logger for this target. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Ads only run inside the mobile app build
pub fn supports_ads() -> bool {
    cfg!(any(target_os = "android", target_os = "ios"))
}
