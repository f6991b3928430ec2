use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use tauri::{App, AppHandle, Manager};
use tauri_plugin_global_shortcut::{Builder, Code, Modifiers, ShortcutState};

use crate::application::PasteService;

/// 注册全局快捷键
///
/// Ctrl+V 唤醒主窗口，Ctrl+F 唤醒并聚焦搜索框。
/// 注册失败（按键被占用）由调用方决定是否继续启动
pub fn init(app: &App) -> Result<()> {
    app.handle().plugin(
        Builder::new()
            .with_shortcuts(["ctrl+v", "ctrl+f"])?
            .with_handler(move |app_handle, shortcut, event| {
                if event.state() != ShortcutState::Pressed {
                    return;
                }
                if !shortcut.mods.contains(Modifiers::CONTROL) {
                    return;
                }

                let service = app_handle.state::<Arc<PasteService>>();
                match shortcut.key {
                    Code::KeyV => {
                        if let Err(e) = service.awake(app_handle) {
                            warn!("Failed to awake main window: {}", e);
                        }
                    }
                    Code::KeyF => {
                        if let Err(e) = service.search_focus(app_handle) {
                            warn!("Failed to focus search: {}", e);
                        }
                    }
                    _ => {}
                }
            })
            .build(),
    )?;

    info!("Global shortcuts registered: ctrl+v, ctrl+f");
    Ok(())
}

/// 注销所有全局快捷键
///
/// 应用退出前必须调用，快捷键的生命周期不能超出应用本身
pub fn shutdown(app_handle: &AppHandle) {
    use tauri_plugin_global_shortcut::GlobalShortcutExt;

    if let Err(e) = app_handle.global_shortcut().unregister_all() {
        warn!("Failed to unregister global shortcuts: {}", e);
    } else {
        info!("Global shortcuts unregistered");
    }
}
