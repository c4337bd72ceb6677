use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// 初始化全局日志：级别由 `RUST_LOG` 控制 (默认 `info`)，输出到标准错误。
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
