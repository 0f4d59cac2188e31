//! # Quiz Explainer
//!
//! 把题库文本转换为结构化的题目 JSON，并调用大模型为每道题生成解释和要点
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models / Parser）
//! - `parser/` - 题库文本的切分与解析，格式错误直接中止
//! - `models/` - `Question` / `Answer` 以及 JSON 文件读写
//!
//! ### ② 外部客户端（Clients）
//! - `TextGenerator` - 模型调用的抽象，进程内只创建一个
//! - `OpenAiCompatClient` - 基于 async-openai 的实现
//!
//! ### ③ 业务能力层（Services）
//! - 只处理单个 Question
//! - `prompt_builder` - 构建提示词
//! - `explanation_service` - 调用模型，错误转为 `None`
//! - `response_extractor` - 从自由文本中取出标签块
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/enrichment` - worker 池批量补充，保持输入顺序
//! - `orchestrator/progress` - 互斥的进度输出
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{OpenAiCompatClient, TextGenerator};
pub use config::Config;
pub use error::{AppError, AppResult, LlmError, ParseError};
pub use models::{Answer, Question};
pub use orchestrator::{EnrichOutcome, EnrichReport, Enricher, LogSink, ProgressSink};
pub use parser::parse_questions;
pub use services::{build_prompt, extract, PromptOptions, FALLBACK_EXPLANATION};
