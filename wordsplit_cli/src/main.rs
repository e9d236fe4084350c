mod cli;
mod error;
mod render;

use tracing_subscriber::EnvFilter;

fn main() {
    // 默认只输出 warn，可用 RUST_LOG 覆盖；日志走 stderr，不干扰结果输出
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
