use anyhow::{Context, Result};
use quiz_explainer::{app, utils::logging, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    app::run_conversion(&config)
        .await
        .with_context(|| format!("转换失败: {}", config.input_text_path))?;

    Ok(())
}
