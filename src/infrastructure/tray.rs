use log::warn;
use tauri::{
    tray::{TrayIconBuilder, TrayIconEvent},
    App,
};

use crate::infrastructure::window;

/// 创建托盘图标，点击时在托盘位置弹出设置窗口
pub fn init(app: &App) -> tauri::Result<()> {
    let mut builder = TrayIconBuilder::with_id("multipaste-tray").tooltip("Multipaste");
    if let Some(icon) = app.default_window_icon() {
        builder = builder.icon(icon.clone());
    }

    builder
        .on_tray_icon_event(|tray_icon, event| {
            // 让 positioner 插件记录托盘位置，TrayCenter 才有意义
            tauri_plugin_positioner::on_tray_event(tray_icon.app_handle(), &event);
            match event {
                TrayIconEvent::Click { .. } => {
                    if let Err(e) = window::show_settings_window(tray_icon.app_handle()) {
                        warn!("Failed to show settings window: {}", e);
                    }
                }
                _ => {}
            }
        })
        .build(app)?;

    Ok(())
}
