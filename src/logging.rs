use tracing::Level;

/// Map `-v` occurrences to a maximum log level. Warnings are always shown.
pub fn level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Logs go to stderr; stdout is reserved for
/// the confirmation line.
pub fn init(verbosity: u8) {
    let result = tracing_subscriber::fmt()
        .with_max_level(level(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if result.is_err() {
        tracing::debug!("Global tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Level::WARN)]
    #[case(1, Level::INFO)]
    #[case(2, Level::DEBUG)]
    #[case(3, Level::TRACE)]
    #[case(9, Level::TRACE)]
    fn verbosity(#[case] count: u8, #[case] expected: Level) {
        assert_eq!(level(count), expected);
    }
}
