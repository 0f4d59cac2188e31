use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "QUIZ_CONFIG";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 原始题库文本
    pub input_text_path: String,
    /// 题目 JSON 文件（转换输出，同时也是补充阶段的输入与输出）
    pub questions_json_path: String,
    /// 并发 worker 数量，`None` 表示按 CPU 核数
    pub workers: Option<usize>,
    /// 只补充缺失或兜底的题目
    pub only_missing: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 提示词配置 ---
    pub target_language: String,
    pub course_subject: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_text_path: "pyta.dat".to_string(),
            questions_json_path: "questions.json".to_string(),
            workers: None,
            only_missing: false,
            verbose_logging: false,
            target_language: "Polish".to_string(),
            course_subject: "Fundamentals of Cybersecurity".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 4096,
        }
    }
}

impl Config {
    /// 读取配置：可选的 TOML 文件 + 环境变量覆盖
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_env_overrides()
    }

    /// 只使用默认值 + 环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// 用 `lookup` 返回的值覆盖字段，`lookup` 按环境变量名查询
    pub fn with_overrides(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            input_text_path: lookup("INPUT_TEXT_PATH").unwrap_or(self.input_text_path),
            questions_json_path: lookup("QUESTIONS_JSON_PATH")
                .unwrap_or(self.questions_json_path),
            workers: parse_var(&lookup, "WORKERS", "usize")?.or(self.workers),
            only_missing: parse_var(&lookup, "ONLY_MISSING", "bool")?
                .unwrap_or(self.only_missing),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
            target_language: lookup("TARGET_LANGUAGE").unwrap_or(self.target_language),
            course_subject: lookup("COURSE_SUBJECT").unwrap_or(self.course_subject),
            llm_api_key: lookup("GOOGLE_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: parse_var(&lookup, "LLM_TEMPERATURE", "f32")?
                .unwrap_or(self.llm_temperature),
            llm_max_tokens: parse_var(&lookup, "LLM_MAX_TOKENS", "u32")?
                .unwrap_or(self.llm_max_tokens),
        })
    }

    /// 实际使用的 worker 数量（至少为 1）
    pub fn worker_count(&self) -> usize {
        self.workers
            .unwrap_or_else(default_worker_count)
            .max(1)
    }
}

/// 默认按硬件并行度设置 worker 数量
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var_name) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        },
        None => Ok(None),
    }
}
