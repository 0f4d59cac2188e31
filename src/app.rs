//! 两个入口的完整流程
//!
//! - 转换：文本 → 解析 → 写 JSON（解析失败时不写任何文件）
//! - 补充：读 JSON → 批量补充 → 覆盖写回

use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::clients::{OpenAiCompatClient, TextGenerator};
use crate::config::Config;
use crate::error::{AppResult, FileError};
use crate::models::{load_questions, save_questions, Question};
use crate::orchestrator::{EnrichReport, Enricher, LogSink, ProgressSink};
use crate::parser::parse_questions;
use crate::utils::logging;

/// 把题库文本转换为 JSON 文件，返回题目数量
pub async fn convert_file(input: &Path, output: &Path) -> AppResult<usize> {
    let content = fs::read_to_string(input)
        .await
        .map_err(|e| FileError::read_failed(input.display().to_string(), e))?;

    let questions: Vec<Question> = parse_questions(&content)?;
    save_questions(output, &questions).await?;

    Ok(questions.len())
}

/// 读取 JSON，补充后覆盖写回
pub async fn enrich_file(path: &Path, enricher: &Enricher) -> AppResult<EnrichReport> {
    let questions = load_questions(path).await?;
    let (questions, report) = enricher.enrich_all(questions).await;
    save_questions(path, &questions).await?;
    Ok(report)
}

/// 转换入口
pub async fn run_conversion(config: &Config) -> AppResult<usize> {
    logging::log_startup("题库文本转换", None);

    let count = convert_file(
        Path::new(&config.input_text_path),
        Path::new(&config.questions_json_path),
    )
    .await?;

    logging::log_conversion_complete(count, &config.questions_json_path);
    Ok(count)
}

/// 补充入口，使用真实的模型客户端
pub async fn run_enrichment(config: &Config) -> AppResult<EnrichReport> {
    let client: Arc<dyn TextGenerator> = Arc::new(OpenAiCompatClient::new(config));
    let sink: Arc<dyn ProgressSink> = Arc::new(LogSink::new(config.verbose_logging));
    let enricher = Enricher::from_config(config, client, sink);

    logging::log_startup("题目解释生成", Some(enricher.workers()));

    let report = enrich_file(Path::new(&config.questions_json_path), &enricher).await?;

    logging::print_final_stats(&report, &config.questions_json_path);
    Ok(report)
}
