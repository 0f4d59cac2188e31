//! 批量补充 - 编排层
//!
//! ## 职责
//!
//! 把整批题目分派到固定大小的 worker 池，每个 worker 独立完成
//! 提示词 → 模型调用 → 响应解析 → 写回 的流程。
//!
//! ## 保证
//!
//! - 输出与输入等长，第 i 个结果对应第 i 个输入，与完成顺序无关
//! - 一道题失败（包括任务 panic）只会让这道题得到兜底结果
//! - worker 之间只共享模型客户端（只读）和进度 sink

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::clients::TextGenerator;
use crate::config::Config;
use crate::models::Question;
use crate::orchestrator::progress::{EnrichOutcome, Position, ProgressSink};
use crate::services::{build_prompt, extract, ExplanationService, Extracted, PromptOptions};

/// 批量补充器
pub struct Enricher {
    client: Arc<dyn TextGenerator>,
    sink: Arc<dyn ProgressSink>,
    options: PromptOptions,
    workers: usize,
    only_missing: bool,
}

/// 整批的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichReport {
    pub total: usize,
    pub generated: usize,
    pub fallback: usize,
    pub skipped: usize,
}

impl EnrichReport {
    fn record(&mut self, outcome: EnrichOutcome) {
        if outcome.is_fallback() {
            self.fallback += 1;
        } else if outcome == EnrichOutcome::Skipped {
            self.skipped += 1;
        } else {
            self.generated += 1;
        }
    }
}

impl Enricher {
    pub fn new(
        client: Arc<dyn TextGenerator>,
        sink: Arc<dyn ProgressSink>,
        options: PromptOptions,
        workers: usize,
    ) -> Self {
        Self {
            client,
            sink,
            options,
            workers: workers.max(1),
            only_missing: false,
        }
    }

    /// 按配置创建
    pub fn from_config(
        config: &Config,
        client: Arc<dyn TextGenerator>,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self::new(client, sink, PromptOptions::from(config), config.worker_count())
            .only_missing(config.only_missing)
    }

    /// 只补充缺失或兜底的题目
    pub fn only_missing(mut self, only_missing: bool) -> Self {
        self.only_missing = only_missing;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// 补充全部题目，返回同序的结果
    pub async fn enrich_all(&self, questions: Vec<Question>) -> (Vec<Question>, EnrichReport) {
        let total = questions.len();
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut report = EnrichReport {
            total,
            ..Default::default()
        };

        info!(
            "📋 共 {} 道题目，使用 {} 个 worker，模型: {}",
            total,
            self.workers,
            self.client.model_name()
        );

        let mut backups = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);

        for (idx, question) in questions.into_iter().enumerate() {
            let position = Position {
                index: idx + 1,
                total,
            };

            if self.only_missing && question.has_generated_explanation() {
                self.sink
                    .question_finished(position, &question, EnrichOutcome::Skipped);
                backups.push((position, question));
                handles.push(None);
                continue;
            }

            let client = Arc::clone(&self.client);
            let sink = Arc::clone(&self.sink);
            let options = self.options.clone();
            let semaphore = Arc::clone(&semaphore);
            backups.push((position, question.clone()));

            handles.push(Some(tokio::spawn(async move {
                // 信号量不会被关闭
                let _permit = semaphore.acquire_owned().await.ok();
                enrich_one(client.as_ref(), sink.as_ref(), &options, position, question).await
            })));
        }

        let joined = join_all(handles.into_iter().map(|handle| async move {
            match handle {
                Some(handle) => Some(handle.await),
                None => None,
            }
        }))
        .await;

        let mut results = Vec::with_capacity(total);
        for ((position, mut backup), joined) in backups.into_iter().zip(joined) {
            let (question, outcome) = match joined {
                None => (backup, EnrichOutcome::Skipped),
                Some(Ok(done)) => done,
                Some(Err(e)) => {
                    error!("{} 任务执行失败: {}", position, e);
                    let fallback = Extracted::fallback();
                    backup.apply_enrichment(fallback.explanation, fallback.key_takeaways);
                    self.sink
                        .question_finished(position, &backup, EnrichOutcome::ServiceFailed);
                    (backup, EnrichOutcome::ServiceFailed)
                }
            };
            report.record(outcome);
            results.push(question);
        }

        (results, report)
    }
}

/// 处理单道题
pub async fn enrich_one(
    client: &dyn TextGenerator,
    sink: &dyn ProgressSink,
    options: &PromptOptions,
    position: Position,
    mut question: Question,
) -> (Question, EnrichOutcome) {
    sink.question_started(position, &question);

    let prompt = build_prompt(&question, options);
    let response = ExplanationService::new(client).fetch(&prompt).await;

    let extracted = extract(response.as_deref());
    let outcome = match (&response, extracted.explanation_found) {
        (None, _) => EnrichOutcome::ServiceFailed,
        (Some(_), false) => EnrichOutcome::MissingExplanation,
        (Some(_), true) => EnrichOutcome::Generated,
    };

    question.apply_enrichment(extracted.explanation, extracted.key_takeaways);
    sink.question_finished(position, &question, outcome);

    (question, outcome)
}
