use anyhow::Result;

/// 焦点回切目前只在 macOS 上实现，其他平台为空实现
#[derive(Debug, Clone)]
pub struct WindowInfo;

pub fn get_active_window_info() -> Option<WindowInfo> {
    None
}

pub fn activate_window(_window_info: &WindowInfo) {}

pub fn paste() -> Result<()> {
    Ok(())
}
