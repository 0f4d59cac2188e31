//! 进度输出
//!
//! 所有 worker 共享同一个 sink。`LogSink` 用互斥锁包住每道题的整块输出，
//! 不同 worker 的行不会交错。

use std::sync::Mutex;
use tracing::{info, warn};

use crate::models::Question;
use crate::utils::logging::truncate_text;

/// 单道题的补充结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichOutcome {
    /// 成功生成解释
    Generated,
    /// 模型有返回，但缺少 `<explanation>` 块
    MissingExplanation,
    /// 服务调用失败
    ServiceFailed,
    /// 已有解释，本次跳过
    Skipped,
}

impl EnrichOutcome {
    /// 是否使用了兜底解释
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::MissingExplanation | Self::ServiceFailed)
    }
}

/// 题目在整批中的位置（从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub total: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目 {}/{}]", self.index, self.total)
    }
}

/// 进度输出接口
pub trait ProgressSink: Send + Sync {
    /// 开始处理一道题
    fn question_started(&self, position: Position, question: &Question);

    /// 一道题处理结束，`question` 已经写入了结果
    fn question_finished(&self, position: Position, question: &Question, outcome: EnrichOutcome);
}

/// 基于 tracing 的默认输出
pub struct LogSink {
    lock: Mutex<()>,
    /// 解释预览的最大字符数，`None` 表示完整输出
    preview_len: Option<usize>,
}

impl LogSink {
    pub fn new(verbose: bool) -> Self {
        Self {
            lock: Mutex::new(()),
            preview_len: if verbose { None } else { Some(120) },
        }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ProgressSink for LogSink {
    fn question_started(&self, position: Position, question: &Question) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        info!("{} Question: {}", position, question);
    }

    fn question_finished(&self, position: Position, question: &Question, outcome: EnrichOutcome) {
        let explanation = question.explanation.as_deref().unwrap_or_default();
        let explanation = match self.preview_len {
            Some(max_len) => truncate_text(explanation, max_len),
            None => explanation.to_string(),
        };
        let takeaways = question.key_takeaways.as_deref().unwrap_or_default();

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match outcome {
            EnrichOutcome::Generated => info!("{} ✓ 解释已生成", position),
            EnrichOutcome::MissingExplanation => {
                warn!("{} ⚠️ 响应中没有 <explanation> 块，使用兜底文本", position)
            }
            EnrichOutcome::ServiceFailed => warn!("{} ❌ 模型调用失败，使用兜底文本", position),
            EnrichOutcome::Skipped => {
                info!("{} ⏭️ 已有解释，跳过: {}", position, question);
                return;
            }
        }
        info!("{} Explanation: {}", position, explanation);
        info!("{} Key Takeaways: {:?}", position, takeaways);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    /// 把日志收集到内存里
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// 行里的 `[题目 i/N]` 前缀
    fn position_of(line: &str) -> Option<&str> {
        let start = line.find("[题目 ")?;
        let end = start + line[start..].find(']')?;
        Some(&line[start..=end])
    }

    #[test]
    fn test_position_display() {
        let position = Position { index: 3, total: 10 };
        assert_eq!(position.to_string(), "[题目 3/10]");
    }

    #[test]
    fn test_outcome_is_fallback() {
        assert!(EnrichOutcome::ServiceFailed.is_fallback());
        assert!(EnrichOutcome::MissingExplanation.is_fallback());
        assert!(!EnrichOutcome::Generated.is_fallback());
        assert!(!EnrichOutcome::Skipped.is_fallback());
    }

    #[test]
    fn test_log_sink_does_not_panic_without_subscriber() {
        let sink = LogSink::new(true);
        let mut question = Question::new(1, "t", Vec::new());
        let position = Position { index: 1, total: 1 };

        sink.question_started(position, &question);
        question.apply_enrichment("e".into(), vec!["- k".into()]);
        sink.question_finished(position, &question, EnrichOutcome::Generated);
        sink.question_finished(position, &question, EnrichOutcome::Skipped);
    }

    #[test]
    fn test_concurrent_blocks_do_not_interleave() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;
        let total = THREADS * PER_THREAD;

        let capture = Capture::default();
        let writer = capture.clone();
        let dispatch = tracing::Dispatch::new(
            tracing_subscriber::fmt()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .with_target(false)
                .without_time()
                .finish(),
        );
        let sink = LogSink::new(true);

        std::thread::scope(|scope| {
            for thread in 0..THREADS {
                let sink = &sink;
                let dispatch = &dispatch;
                scope.spawn(move || {
                    let _default = tracing::dispatcher::set_default(dispatch);
                    for n in 0..PER_THREAD {
                        let index = thread * PER_THREAD + n + 1;
                        let position = Position { index, total };
                        let mut question = Question::new(index as u32, "Pytanie", Vec::new());

                        sink.question_started(position, &question);
                        question.apply_enrichment(
                            format!("explanation {}", index),
                            vec![format!("- point {}", index)],
                        );
                        sink.question_finished(position, &question, EnrichOutcome::Generated);
                    }
                });
            }
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        // 每道题 4 行：Question / ✓ / Explanation / Key Takeaways
        assert_eq!(lines.len(), total * 4);

        let mut finished = 0;
        for (i, line) in lines.iter().enumerate() {
            if !line.ends_with("✓ 解释已生成") {
                continue;
            }
            finished += 1;
            let position = position_of(line).unwrap();
            assert!(
                lines[i + 1].contains(&format!("{} Explanation: explanation", position)),
                "line after {:?} was {:?}",
                line,
                lines[i + 1]
            );
            assert!(
                lines[i + 2].contains(&format!("{} Key Takeaways:", position)),
                "second line after {:?} was {:?}",
                line,
                lines[i + 2]
            );
        }
        assert_eq!(finished, total);
    }
}
