//! 题目 JSON 文件的读写
//!
//! 输出使用 4 空格缩进，非 ASCII 字符原样写入。
//! 写入是一次性完成的，但没有做临时文件 + rename 的原子替换，
//! 写到一半进程崩溃会损坏文件。

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::FileError;
use crate::models::question::Question;

/// 从 JSON 文件加载全部题目
pub async fn load_questions(path: &Path) -> Result<Vec<Question>, FileError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FileError::read_failed(path.display().to_string(), e))?;

    let questions: Vec<Question> = serde_json::from_str(&content)
        .map_err(|e| FileError::json(path.display().to_string(), e))?;

    info!(
        "成功加载 {} 道题目: {}",
        questions.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(questions)
}

/// 把全部题目序列化为格式化的 JSON 文本
pub fn questions_to_json(questions: &[Question]) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    questions.serialize(&mut serializer)?;
    // serde_json 只输出合法 UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 覆盖写入全部题目
pub async fn save_questions(path: &Path, questions: &[Question]) -> Result<(), FileError> {
    let json = questions_to_json(questions)
        .map_err(|e| FileError::json(path.display().to_string(), e))?;

    fs::write(path, json)
        .await
        .map_err(|e| FileError::write_failed(path.display().to_string(), e))?;

    info!("已写入 {} 道题目: {}", questions.len(), path.display());
    Ok(())
}
