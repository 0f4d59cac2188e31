//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `enrichment` - 批量补充器
//! - 固定大小的 worker 池（Semaphore + tokio::spawn）
//! - 按输入下标收集结果，保持顺序
//! - 单题失败隔离，使用兜底结果
//!
//! ### `progress` - 进度输出
//! - 所有 worker 共享的唯一可变资源
//! - 以题目为单位互斥输出，避免行交错
//!
//! ## 层次关系
//!
//! ```text
//! enrichment (处理 Vec<Question>)
//!     ↓
//! services (能力层：prompt / explanation / extract)
//!     ↓
//! clients (TextGenerator)
//! ```

pub mod enrichment;
pub mod progress;

pub use enrichment::{enrich_one, EnrichReport, Enricher};
pub use progress::{EnrichOutcome, LogSink, Position, ProgressSink};
