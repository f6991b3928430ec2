use crate::config::get_image_dir;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 图片文件存储
///
/// 图片记录的内容落在文件系统，数据库只保存文件名
pub struct ImageStore {
    image_dir: PathBuf,
}

impl ImageStore {
    /// 在指定目录创建图片存储
    pub fn new(image_dir: PathBuf) -> Result<Self> {
        if !image_dir.exists() {
            fs::create_dir_all(&image_dir)
                .with_context(|| format!("Failed to create image dir: {:?}", image_dir))?;
        }
        Ok(Self { image_dir })
    }

    /// 使用默认配置目录创建图片存储
    pub fn from_config() -> Result<Self> {
        Self::new(get_image_dir()?)
    }

    /// 保存 PNG 内容，返回文件名
    pub fn store(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let file_path = self.image_dir.join(file_name);
        fs::write(&file_path, bytes)
            .with_context(|| format!("Failed to write image: {:?}", file_path))?;
        info!("Image content stored at: {:?}", file_path);
        Ok(file_name.to_string())
    }

    /// 文件名对应的绝对路径
    pub fn path_of(&self, file_name: &Path) -> PathBuf {
        self.image_dir.join(file_name)
    }

    /// 删除图片文件，文件不存在时静默成功
    pub fn delete(&self, file_name: &Path) -> Result<()> {
        let file_path = self.image_dir.join(file_name);
        if file_path.exists() {
            fs::remove_file(&file_path)
                .with_context(|| format!("Failed to delete image: {:?}", file_path))?;
            info!("Image deleted: {:?}", file_path);
        }
        Ok(())
    }
}
