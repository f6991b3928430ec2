use std::sync::Arc;
use tauri::{AppHandle, State};

use crate::config::Setting;
use crate::error::AppError;
use crate::infrastructure::storage::ClipboardRecordManager;

// 获取当前配置
#[tauri::command]
pub async fn get_setting() -> Result<Setting, String> {
    Ok(Setting::get_instance())
}

// 更新开机自启动
//
// 先切换系统的自启动状态，成功后才落盘，失败时配置保持不变
#[tauri::command]
pub async fn update_auto_start(
    auto_start: bool,
    app_handle: AppHandle,
) -> Result<(), String> {
    #[cfg(desktop)]
    {
        use tauri_plugin_autostart::ManagerExt as _;

        let autolaunch = app_handle.autolaunch();
        let enabled = autolaunch.is_enabled().unwrap_or(false);
        if auto_start && !enabled {
            autolaunch
                .enable()
                .map_err(|e| format!("开启自启动失败: {}", e))?;
        } else if !auto_start && enabled {
            autolaunch
                .disable()
                .map_err(|e| format!("关闭自启动失败: {}", e))?;
        }
    }
    let mut setting = Setting::get_instance();
    setting.auto_start = auto_start;
    setting.save(None).map_err(AppError::from)?;
    Ok(())
}

// 更新最大历史记录数并立即淘汰超出的记录
#[tauri::command]
pub async fn update_max_items(
    max_items: u64,
    store: State<'_, Arc<ClipboardRecordManager>>,
) -> Result<(), String> {
    store.set_max_records(max_items).map_err(AppError::from)?;

    let mut setting = Setting::get_instance();
    setting.max_items = max_items;
    setting.save(None).map_err(AppError::from)?;
    Ok(())
}
