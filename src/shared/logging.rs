//! tracing subscriber setup. Logs go to stderr so stdout stays clean for command output.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. `-v` flags win over MEDIC_LOG.
pub fn init(verbosity: u8, env_directive: Option<&str>) {
    let directive = filter_directive(verbosity, env_directive);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid MEDIC_LOG directive '{directive}': {e}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    });

    // A subscriber may already be installed (e.g. in tests); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter_directive(verbosity: u8, env_directive: Option<&str>) -> String {
    match (verbosity, env_directive) {
        (0, Some(directive)) => directive.to_string(),
        (0, None) => DEFAULT_DIRECTIVE.to_string(),
        (1, _) => "info".to_string(),
        _ => "debug".to_string(),
    }
}
