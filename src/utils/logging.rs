/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::orchestrator::EnrichReport;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `stage`: 阶段名称
/// - `workers`: worker 数量（转换阶段为 `None`）
pub fn log_startup(stage: &str, workers: Option<usize>) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 {} - {}",
        stage,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(workers) = workers {
        info!("📊 并发 worker 数: {}", workers);
    }
    info!("{}", "=".repeat(60));
}

/// 打印转换结果
pub fn log_conversion_complete(count: usize, output_path: &str) {
    info!("{}", "─".repeat(60));
    info!("✓ 已解析 {} 道题目", count);
    info!("💾 已保存至: {}", output_path);
    info!("{}", "─".repeat(60));
}

/// 打印补充阶段的最终统计信息
///
/// # 参数
/// - `report`: 整批统计
/// - `output_path`: 输出文件路径
pub fn print_final_stats(report: &EnrichReport, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 生成: {}/{}", report.generated, report.total);
    info!("❌ 兜底: {}", report.fallback);
    if report.skipped > 0 {
        info!("⏭️ 跳过: {}", report.skipped);
    }
    info!("{}", "=".repeat(60));
    info!("\n文件已更新: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
