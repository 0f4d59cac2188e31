//! 解释生成服务 - 业务能力层
//!
//! 对模型的单次调用。任何错误都在这里转换为 `None`，不向上传播，
//! 一道题失败不会影响整批。没有重试。

use tracing::{debug, warn};

use crate::clients::TextGenerator;

/// 解释生成服务
pub struct ExplanationService<'a> {
    client: &'a dyn TextGenerator,
}

impl<'a> ExplanationService<'a> {
    pub fn new(client: &'a dyn TextGenerator) -> Self {
        Self { client }
    }

    /// 调用模型，失败时返回 `None`
    pub async fn fetch(&self, prompt: &str) -> Option<String> {
        match self.client.generate(prompt).await {
            Ok(text) => {
                debug!("模型 {} 返回 {} 字符", self.client.model_name(), text.len());
                Some(text)
            }
            Err(e) => {
                warn!("生成解释失败: {}", e);
                None
            }
        }
    }
}
