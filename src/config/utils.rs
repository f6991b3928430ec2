use crate::utils::env::is_development;
use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// 获取配置目录
///
/// 开发环境和生产环境使用不同的配置目录，避免数据混淆
pub fn get_config_dir() -> Result<PathBuf> {
    let base_dir =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;

    let config_dir = if is_development() {
        base_dir.join("multipaste-dev")
    } else {
        base_dir.join("multipaste")
    };

    Ok(config_dir)
}

/// 获取设置文件路径
///
/// 优先从环境变量中获取，如果没有设置环境变量，则从系统配置目录中获取
pub fn get_setting_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("MULTIPASTE_SETTING_PATH") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("setting.json"))
}

/// 获取数据库文件路径
///
/// 优先从环境变量中获取，测试时可以指向临时目录
pub fn get_database_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("MULTIPASTE_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("multipaste.db"))
}

/// 获取图片存储目录
pub fn get_image_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var("MULTIPASTE_IMAGE_DIR") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("images"))
}
