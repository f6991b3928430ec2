#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "macos")]
pub use macos::{activate_window, get_active_window_info, paste, WindowInfo};

#[cfg(not(target_os = "macos"))]
mod fallback;
#[cfg(not(target_os = "macos"))]
pub use fallback::{activate_window, get_active_window_info, paste, WindowInfo};
