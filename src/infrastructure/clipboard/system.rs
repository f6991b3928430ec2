use anyhow::{Context, Result};
use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContext, RustImageData};
use std::path::Path;

/// 系统剪贴板写入端口
///
/// 粘贴服务通过该端口回写内容，测试中可以替换为内存实现
pub trait ClipboardPort: Send + Sync {
    /// 写入文本
    fn write_text(&self, text: &str) -> Result<()>;

    /// 写入图片（PNG 文件）
    fn write_image(&self, image_path: &Path) -> Result<()>;
}

/// 基于 clipboard-rs 的系统剪贴板
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    // 每次操作新建上下文，避免跨线程持有
    fn context() -> Result<ClipboardContext> {
        ClipboardContext::new().map_err(|e| anyhow::anyhow!("Failed to open clipboard: {}", e))
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardPort for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        Self::context()?
            .set_text(text.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to set clipboard text: {}", e))
    }

    fn write_image(&self, image_path: &Path) -> Result<()> {
        if !image_path.exists() {
            anyhow::bail!("Image path {} does not exist", image_path.display());
        }
        let path_str = image_path
            .to_str()
            .with_context(|| format!("Invalid image path: {:?}", image_path))?;
        let image_data = RustImageData::from_path(path_str)
            .map_err(|e| anyhow::anyhow!("Failed to read image data: {}", e))?;
        Self::context()?
            .set_image(image_data)
            .map_err(|e| anyhow::anyhow!("Failed to set clipboard image: {}", e))
    }
}
