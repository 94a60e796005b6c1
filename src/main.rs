use clap::Parser;
use std::io::{self, Write};
use where_next::adapters::toast::ToastReceiver;
use where_next::config::toml_config::TomlConfig;
use where_next::utils::{logger, validation::Validate};
use where_next::{
    toast_channel, CliConfig, CountryCatalog, CountryCode, EffectiveConfig,
    HttpSuggestionProvider, RenderState, SuggestionOrchestrator, ToastChannel, ViewState,
};

type CliOrchestrator = SuggestionOrchestrator<HttpSuggestionProvider, CountryCatalog, ToastChannel>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting where-next");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    // 載入設定檔（若有指定）
    let file_config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => {
                    if let Err(e) = config.validate() {
                        tracing::error!("❌ Config file validation failed: {}", e);
                        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                        eprintln!("❌ {}", e.user_friendly_message());
                        std::process::exit(1);
                    }
                    Some(config)
                }
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => None,
    };

    let config = args.resolve(file_config.as_ref());

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("📡 Suggestion service: {}", config.endpoint);

    // 準備國家對照表
    let catalog = match build_catalog(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!("❌ Country table could not be loaded: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::info!("🗂️ Country table ready with {} entries", catalog.len());

    display_config_summary(&args, &config, &catalog);

    if args.dry_run {
        perform_dry_run(&args, &config, &catalog);
        return Ok(());
    }

    // 建立流程核心
    let (toast_tx, mut toast_rx) = toast_channel();
    let provider = HttpSuggestionProvider::new(&config);
    let mut orchestrator = SuggestionOrchestrator::new(provider, catalog.clone(), toast_tx);

    if args.interactive {
        run_interactive(&mut orchestrator, &mut toast_rx, &catalog).await?;
        return Ok(());
    }

    run_once(&mut orchestrator, &mut toast_rx, &args.visited).await
}

fn build_catalog(config: &EffectiveConfig) -> where_next::Result<CountryCatalog> {
    match &config.countries_file {
        Some(path) => {
            tracing::info!("🗂️ Loading country table from: {}", path);
            CountryCatalog::from_file(path)
        }
        None => CountryCatalog::bundled(),
    }
}

/// 把使用者輸入整理成代碼清單。大小寫在顯示層統一轉大寫，核心不做正規化
fn parse_codes(raw: &[String]) -> Vec<CountryCode> {
    raw.iter()
        .flat_map(|chunk| chunk.split(','))
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(|code| CountryCode::new(code.to_ascii_uppercase()))
        .collect()
}

async fn run_once(
    orchestrator: &mut CliOrchestrator,
    toasts: &mut ToastReceiver,
    visited: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    orchestrator.set_selection(parse_codes(visited));

    let outcome = orchestrator.submit().await;

    for toast in toasts.drain() {
        println!("🔔 {}", toast.text);
    }

    match outcome {
        Ok(()) => {
            let render = orchestrator.render_state();
            if render.view == ViewState::Results {
                print_results(&render);
                Ok(())
            } else {
                // 空選擇被守門擋下，提示已在上面印出
                eprintln!("💡 Pass --visited with at least one country code, e.g. --visited FR,JP");
                std::process::exit(2);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Suggestion request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                where_next::utils::error::ErrorSeverity::Low => 0, // 警告，但成功
                where_next::utils::error::ErrorSeverity::Medium => 2, // 重試錯誤
                where_next::utils::error::ErrorSeverity::High => 1, // 處理錯誤
                where_next::utils::error::ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run_interactive(
    orchestrator: &mut CliOrchestrator,
    toasts: &mut ToastReceiver,
    catalog: &CountryCatalog,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🌍 Where next? Type the codes of countries you have visited, then 'go'.");
    println!("   Commands: go | list | again | quit");

    let stdin = io::stdin();
    loop {
        for toast in toasts.drain() {
            println!("🔔 {}", toast.text);
        }

        match orchestrator.view() {
            ViewState::Selecting => {
                let selection = orchestrator.selection();
                if selection.is_empty() {
                    print!("visited> ");
                } else {
                    let joined = selection
                        .iter()
                        .map(|code| code.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    print!("visited [{}]> ", joined);
                }
            }
            ViewState::Results => print!("(again/quit)> "),
            // submit 在迴圈內同步等待，提示時不會停在這個狀態
            ViewState::Loading => print!("...> "),
        }
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let input = line.trim();

        match input {
            "quit" | "exit" | "q" => break,
            "" => continue,
            "list" => print_catalog(catalog),
            "go" | "submit" => {
                if orchestrator.view() == ViewState::Results {
                    println!("💡 Type 'again' to start a new search first.");
                    continue;
                }
                println!("🔎 Finding destinations ...");
                if orchestrator.submit().await.is_err() {
                    // 失敗已轉成提示訊息，下一輪開頭印出
                    continue;
                }
                for toast in toasts.drain() {
                    println!("🔔 {}", toast.text);
                }
                let render = orchestrator.render_state();
                if render.view == ViewState::Results {
                    print_results(&render);
                }
            }
            "again" | "reset" => {
                orchestrator.reset();
                println!("🔄 Starting over.");
            }
            _ => {
                if orchestrator.view() == ViewState::Results {
                    println!("💡 Commands here: again | quit");
                    continue;
                }
                orchestrator.set_selection(parse_codes(&[input.to_string()]));
                let selection = orchestrator.selection();
                println!("✅ Selected {} country(ies)", selection.len());

                let unknown: Vec<&str> = selection
                    .iter()
                    .filter(|code| catalog.get(code).is_none())
                    .map(|code| code.as_str())
                    .collect();
                if !unknown.is_empty() {
                    println!(
                        "⚠️ Not in the country table (sent as-is): {}",
                        unknown.join(", ")
                    );
                }
            }
        }
    }

    println!("👋 Until the next trip!");
    Ok(())
}

fn print_results(render: &RenderState) {
    if render.suggestions.is_empty() {
        println!("🤔 No new destinations to suggest this time.");
        return;
    }

    println!("🌍 Where next? Here are your suggestions:");
    for info in &render.suggestions {
        println!(
            "  {} {} ({}) - {}",
            info.emoji, info.name, info.code, info.reference_url
        );
    }
}

fn print_catalog(catalog: &CountryCatalog) {
    println!("🗂️ Known countries ({}):", catalog.len());
    for info in catalog.all() {
        println!("  {} {}  {}", info.code, info.emoji, info.name);
    }
}

fn display_config_summary(args: &CliConfig, config: &EffectiveConfig, catalog: &CountryCatalog) {
    println!("📋 Configuration Summary:");
    println!("  Endpoint: {}", config.endpoint);
    println!("  Timeout: {}s", config.timeout_seconds);
    println!("  Max suggestions: {}", config.max_suggestions);
    match &config.countries_file {
        Some(path) => println!("  Country table: {} ({} entries)", path, catalog.len()),
        None => println!("  Country table: built-in ({} entries)", catalog.len()),
    }
    println!(
        "  Mode: {}",
        if args.dry_run {
            "dry run"
        } else if args.interactive {
            "interactive session"
        } else {
            "one-shot lookup"
        }
    );
    println!();
}

fn perform_dry_run(args: &CliConfig, config: &EffectiveConfig, catalog: &CountryCatalog) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Suggestion Service:");
    println!("  Endpoint: {}", config.endpoint);
    println!(
        "  Authentication: {}",
        if config.api_key.is_some() {
            "Bearer token configured"
        } else {
            "none"
        }
    );
    println!("  Timeout: {}s", config.timeout_seconds);
    println!("  Max suggestions: {}", config.max_suggestions);

    println!();
    println!("🗂️ Country Table:");
    match &config.countries_file {
        Some(path) => println!("  Source: {}", path),
        None => println!("  Source: built-in"),
    }
    println!("  Entries: {}", catalog.len());

    println!();
    println!("✏️ Selection Preview:");
    let codes = parse_codes(&args.visited);
    if codes.is_empty() {
        println!("  (nothing selected yet)");
    } else {
        for code in &codes {
            match catalog.get(code) {
                Some(info) => println!("  {} {} {}", code, info.emoji, info.name),
                None => println!("  {} (not in the country table, sent as-is)", code),
            }
        }
    }

    println!();
    println!("✅ Dry run complete. Remove --dry-run to call the service.");
}
