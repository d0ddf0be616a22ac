use log::LevelFilter;

/// Environment variable holding an `env_logger` filter, e.g. `HUSH_LOG=debug`.
pub const LOG_ENV: &str = "HUSH_LOG";

/// Sends `log` records to stderr. `debug` overrides whatever `HUSH_LOG` says.
pub fn init(debug: bool) {
    let env = env_logger::Env::new().filter_or(LOG_ENV, "warn");
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    // A second init (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}
