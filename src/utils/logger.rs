use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// 日誌與互動提示共用同一個終端，固定單行緊湊格式且不印時間戳
pub fn init_cli_logger(verbose: bool) {
    let default_directives = if verbose {
        "where_next=debug,info"
    } else {
        "where_next=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let format_layer = fmt::layer().with_target(false).without_time().compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(format_layer)
        .init();
}
