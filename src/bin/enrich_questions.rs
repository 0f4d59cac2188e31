use anyhow::{Context, Result};
use quiz_explainer::{app, utils::logging, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    app::run_enrichment(&config)
        .await
        .with_context(|| format!("生成解释失败: {}", config.questions_json_path))?;

    Ok(())
}
