use anyhow::Result;
use tauri::{
    utils::config::WindowConfig, AppHandle, Manager, WebviewUrl, WebviewWindow, Window,
    WindowEvent,
};
use tauri_plugin_positioner::{Position, WindowExt};

/// 两个窗口共用的基础配置：无边框、透明、创建时不可见
fn gen_basic_config() -> WindowConfig {
    let mut config = WindowConfig::default();
    config.resizable = false;
    config.transparent = true;
    config.decorations = false;
    config.visible = false;

    config
}

fn create_window(app_handle: &AppHandle, config: &WindowConfig) -> Result<WebviewWindow> {
    let window = tauri::WebviewWindowBuilder::from_config(app_handle, config)?.build()?;

    #[cfg(target_os = "macos")]
    if let Err(e) = window_vibrancy::apply_vibrancy(
        &window,
        window_vibrancy::NSVisualEffectMaterial::HudWindow,
        None,
        Some(12.0),
    ) {
        log::warn!("Failed to apply window vibrancy: {}", e);
    }

    #[cfg(target_os = "windows")]
    if let Err(e) = window_vibrancy::apply_blur(&window, Some((18, 18, 18, 125))) {
        log::warn!("Failed to apply window blur: {}", e);
    }

    Ok(window)
}

/// 创建主窗口（历史记录列表，对应前端 `/` 路由）
pub fn create_main_window(app_handle: &AppHandle) -> Result<WebviewWindow> {
    let mut config = gen_basic_config();
    config.title = "Multipaste".to_string();
    config.label = "main".to_string();
    config.width = 400_f64;
    config.min_height = Some(400_f64);
    config.url = WebviewUrl::App("/".into());

    create_window(app_handle, &config)
}

/// 创建设置窗口（对应前端 `/settings` 路由）
pub fn create_settings_window(app_handle: &AppHandle) -> Result<WebviewWindow> {
    let mut config = gen_basic_config();
    config.title = "Settings".to_string();
    config.label = "settings".to_string();
    config.width = 180_f64;
    config.height = 165_f64;
    config.y = Some(0_f64);
    config.url = WebviewUrl::App("/settings".into());

    create_window(app_handle, &config)
}

/// 在托盘位置显示设置窗口
pub fn show_settings_window(app_handle: &AppHandle) -> Result<()> {
    let window = match app_handle.get_webview_window("settings") {
        Some(window) => window,
        None => create_settings_window(app_handle)?,
    };
    window.move_window(Position::TrayCenter)?;
    window.show()?;
    window.set_focus()?;
    Ok(())
}

/// 窗口失去焦点即关闭，下次唤醒重新创建
pub fn on_window_event(window: &Window, event: &WindowEvent) {
    match event {
        WindowEvent::Focused(focused) => {
            if !focused {
                if let Err(e) = window.close() {
                    log::warn!("Failed to close window on blur: {}", e);
                }
            }
        }
        _ => (),
    }
}
