use clap::Parser;
use serde::Deserialize;
use std::sync::{Arc, OnceLock};

static CONFIG: OnceLock<Arc<Config>> = OnceLock::new();

#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
thread_local! {
    static TEST_CONFIG: Mutex<Option<Arc<Config>>> = const { Mutex::new(None) };
}

/// Default gap allowed between the keys of a sequence, matching the engine's own default.
pub const DEFAULT_SEQUENCE_TIMEOUT_MS: u64 = 1000;

/// Also deserializable from a camelCase options object, for hosts without a
/// process environment. Missing fields take their defaults.
#[derive(Parser, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default = "Config::new_for_test", rename_all = "camelCase")]
#[command(name = "mousetrap")]
#[command(about = "Typed keyboard shortcut bindings", long_about = None)]
pub struct Config {
    #[arg(short = 'd', long, env = "MOUSETRAP_DEBUG", help = "Enable debug logging")]
    pub debug: bool,

    #[arg(
        long = "sequence-timeout-ms",
        env = "MOUSETRAP_SEQUENCE_TIMEOUT_MS",
        default_value_t = DEFAULT_SEQUENCE_TIMEOUT_MS,
        help = "Maximum pause between the keys of a sequence before it is abandoned"
    )]
    pub sequence_timeout_ms: u64,

    #[arg(
        long = "require-pause",
        env = "MOUSETRAP_REQUIRE_PAUSE",
        help = "Refuse engines built without the pause/unpause extension"
    )]
    pub require_pause: bool,

    #[arg(
        long = "require-record",
        env = "MOUSETRAP_REQUIRE_RECORD",
        help = "Refuse engines built without the record extension"
    )]
    pub require_record: bool,

    #[arg(
        long = "default-scope",
        env = "MOUSETRAP_DEFAULT_SCOPE",
        help = "Query selector the default handle listens on instead of the whole document"
    )]
    pub default_scope: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Build from `.env`, `.env.local` and the process environment.
    ///
    /// Command-line arguments are ignored: the facade is a library and the
    /// host program owns its own arguments.
    pub fn new() -> Self {
        let _ = dotenv::dotenv();
        let _ = dotenv::from_filename(".env.local");

        let mut config = Config::try_parse_from(["mousetrap"]).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid environment configuration: {}", e);
            Config::new_for_test()
        });

        config.validate();
        config
    }

    pub fn new_for_test() -> Self {
        Config {
            debug: false,
            sequence_timeout_ms: DEFAULT_SEQUENCE_TIMEOUT_MS,
            require_pause: false,
            require_record: false,
            default_scope: None,
        }
    }

    pub fn initialize() -> Arc<Config> {
        let config = Arc::new(Config::new());
        if CONFIG.set(config.clone()).is_err() {
            log::error!("Config already initialized - keeping the first one");
        }
        Self::global()
    }

    /// Seed the global config with an explicit value instead of the
    /// environment. Fails with the config already in place if one was
    /// loaded first.
    pub fn install(mut config: Config) -> Result<Arc<Config>, Arc<Config>> {
        config.validate();
        let config = Arc::new(config);
        match CONFIG.set(config.clone()) {
            Ok(()) => Ok(config),
            Err(_) => Err(CONFIG.get().cloned().unwrap_or(config)),
        }
    }

    pub fn global() -> Arc<Config> {
        #[cfg(test)]
        {
            TEST_CONFIG.with(|test_config| {
                if let Ok(config_lock) = test_config.lock() {
                    if let Some(config) = config_lock.as_ref() {
                        return config.clone();
                    }
                }

                match CONFIG.get() {
                    Some(config) => config.clone(),
                    None => Arc::new(Config::new_for_test()),
                }
            })
        }

        #[cfg(not(test))]
        {
            CONFIG.get_or_init(|| Arc::new(Config::new())).clone()
        }
    }

    pub fn set_global_for_test(config: Arc<Config>) -> Result<(), Arc<Config>> {
        #[cfg(test)]
        {
            TEST_CONFIG.with(|test_config| {
                if let Ok(mut config_lock) = test_config.lock() {
                    *config_lock = Some(config);
                    Ok(())
                } else {
                    Err(config)
                }
            })
        }

        #[cfg(not(test))]
        {
            CONFIG.set(config)
        }
    }

    fn validate(&mut self) {
        if self.sequence_timeout_ms == 0 {
            log::warn!(
                "Sequence timeout of 0ms would drop every sequence, using {}ms",
                DEFAULT_SEQUENCE_TIMEOUT_MS
            );
            self.sequence_timeout_ms = DEFAULT_SEQUENCE_TIMEOUT_MS;
        }

        if self
            .default_scope
            .as_deref()
            .is_some_and(|scope| scope.trim().is_empty())
        {
            self.default_scope = None;
        }
    }
}
