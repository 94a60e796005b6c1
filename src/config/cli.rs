use crate::config::toml_config::TomlConfig;
use crate::config::EffectiveConfig;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "where-next")]
#[command(about = "Suggest where to travel next based on countries you have visited")]
pub struct CliConfig {
    /// Country codes you have already visited, e.g. FR,JP
    #[arg(long, value_delimiter = ',')]
    pub visited: Vec<String>,

    /// Suggestion service endpoint (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Bearer token for the suggestion service
    #[arg(long)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// How many suggestions to ask for
    #[arg(long)]
    pub max_suggestions: Option<usize>,

    /// Country table file (.json or .csv) replacing the built-in one
    #[arg(long)]
    pub countries_file: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Stay in an interactive session instead of a single lookup
    #[arg(long, short)]
    pub interactive: bool,

    /// Validate configuration and show what would run, without calling the service
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

impl CliConfig {
    /// 命令列旗標優先,其次設定檔,最後內建預設值
    pub fn resolve(&self, file: Option<&TomlConfig>) -> EffectiveConfig {
        let defaults = EffectiveConfig::default();

        EffectiveConfig {
            endpoint: self
                .endpoint
                .clone()
                .or_else(|| file.map(|f| f.api_endpoint().to_string()))
                .unwrap_or(defaults.endpoint),
            api_key: self
                .api_key
                .clone()
                .or_else(|| file.and_then(|f| f.api_key().map(|key| key.to_string()))),
            timeout_seconds: self
                .timeout_seconds
                .or_else(|| file.and_then(|f| f.service.timeout_seconds))
                .unwrap_or(defaults.timeout_seconds),
            max_suggestions: self
                .max_suggestions
                .or_else(|| file.and_then(|f| f.service.max_suggestions))
                .unwrap_or(defaults.max_suggestions),
            countries_file: self
                .countries_file
                .clone()
                .or_else(|| file.and_then(|f| f.countries_file().map(|path| path.to_string()))),
        }
    }
}
