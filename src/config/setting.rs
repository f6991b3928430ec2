use super::utils::get_setting_path;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// 默认最大历史记录数
pub const DEFAULT_MAX_ITEMS: u64 = 200;

// 全局设置实例
pub static SETTING: Lazy<RwLock<Setting>> = Lazy::new(|| RwLock::new(Setting::default()));

/// 应用设置
///
/// 与前端约定的 `Config` 结构一致：开机自启 + 最大保留条数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub auto_start: bool,
    pub max_items: u64,
}

impl Default for Setting {
    fn default() -> Self {
        Self {
            auto_start: false,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl Setting {
    /// 获取当前设置的克隆
    pub fn get_instance() -> Self {
        SETTING.read().unwrap().clone()
    }

    /// 加载设置
    ///
    /// 如果指定了设置文件路径，则从该路径加载设置
    /// 否则从默认配置目录加载设置；文件不存在时写入并返回默认设置
    pub fn load(setting_path: Option<PathBuf>) -> Result<Self> {
        let _setting_path = if let Some(path) = setting_path {
            path
        } else {
            get_setting_path()?
        };

        if let Some(setting_str) = fs::read_to_string(&_setting_path).ok() {
            let setting: Setting =
                serde_json::from_str(&setting_str).with_context(|| "无法解析设置文件")?;

            // 更新全局设置
            SETTING.write().unwrap().clone_from(&setting);

            Ok(setting)
        } else {
            // 如果设置文件不存在，则创建默认设置并保存
            let default_setting = Setting::default();
            default_setting.save(Some(_setting_path))?;
            Ok(default_setting)
        }
    }

    /// 保存设置
    ///
    /// 如果指定了设置文件路径，则保存到该路径
    /// 否则保存到默认配置目录
    pub fn save(&self, setting_path: Option<PathBuf>) -> Result<()> {
        let _setting_path = if let Some(path) = setting_path {
            path
        } else {
            get_setting_path()?
        };

        // 确保目录存在
        if let Some(parent) = _setting_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let setting_str = serde_json::to_string_pretty(self)?;

        fs::write(&_setting_path, setting_str)
            .with_context(|| format!("无法写入设置文件: {:?}", _setting_path))?;
        // 更新全局设置
        SETTING.write().unwrap().clone_from(self);

        Ok(())
    }
}
