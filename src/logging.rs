use std::io;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// 警告・補足ログを標準エラーに出す
///
/// 進捗表示は標準出力の println! で行うため、ここではタイムスタンプを付けない。
pub fn configure_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let stderr_log = fmt::layer()
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(filter);

    // テストなどで二重初期化された場合は無視
    let _ = tracing_subscriber::registry().with(stderr_log).try_init();
}
