//! 响应解析 - 业务能力层
//!
//! 从模型返回的自由文本中取出 `<explanation>` 和 `<key_takeaways>` 两个标签块。
//! 每个标签独立扫描，取第一个匹配，不支持嵌套，标签顺序任意。
//! `<analysis>` 块只是给模型思考用的，扫描前先整块删除，
//! 其中提到的标签名不会被当作输出。

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::services::prompt_builder::{ANALYSIS_TAG, EXPLANATION_TAG, KEY_TAKEAWAYS_TAG};

/// 生成失败时的兜底解释
pub const FALLBACK_EXPLANATION: &str = "Nie udało się wygenerować wyjaśnienia.";

static ANALYSIS_BLOCK: LazyLock<Regex> = LazyLock::new(|| tag_pattern(ANALYSIS_TAG));
static EXPLANATION_BLOCK: LazyLock<Regex> = LazyLock::new(|| tag_pattern(EXPLANATION_TAG));
static KEY_TAKEAWAYS_BLOCK: LazyLock<Regex> = LazyLock::new(|| tag_pattern(KEY_TAKEAWAYS_TAG));

fn tag_pattern(tag: &str) -> Regex {
    let tag = regex::escape(tag);
    // 标签名来自常量，模式总是合法的
    Regex::new(&format!(r"(?s)<{tag}>(.*?)</{tag}>")).expect("tag pattern is a valid regex")
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub explanation: String,
    pub key_takeaways: Vec<String>,
    /// 是否找到了 `<explanation>` 块
    pub explanation_found: bool,
}

impl Extracted {
    /// 服务调用失败时的结果
    pub fn fallback() -> Self {
        Self {
            explanation: FALLBACK_EXPLANATION.to_string(),
            key_takeaways: Vec::new(),
            explanation_found: false,
        }
    }
}

/// 解析模型响应；`None` 表示服务调用没有结果
pub fn extract(response: Option<&str>) -> Extracted {
    let Some(response) = response else {
        return Extracted::fallback();
    };

    let visible = strip_analysis(response);
    let explanation = find_block(&EXPLANATION_BLOCK, &visible).map(str::trim);
    let key_takeaways = find_block(&KEY_TAKEAWAYS_BLOCK, &visible)
        .map(split_takeaways)
        .unwrap_or_default();

    Extracted {
        explanation: explanation
            .unwrap_or(FALLBACK_EXPLANATION)
            .to_string(),
        key_takeaways,
        explanation_found: explanation.is_some(),
    }
}

/// 取出第一个标签块的内部文本
pub fn find_block<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 删除所有 `<analysis>` 块
fn strip_analysis(text: &str) -> Cow<'_, str> {
    ANALYSIS_BLOCK.replace_all(text, "")
}

/// 按行拆分要点，去掉空行
fn split_takeaways(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
