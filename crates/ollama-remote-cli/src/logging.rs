// Logging and verbosity control

use std::sync::atomic::{AtomicU8, Ordering};

use tracing_subscriber::EnvFilter;

/// Global verbosity level
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Errors only
    Quiet = 0,
    /// Warnings and errors
    Normal = 1,
    /// Request lifecycle
    Verbose = 2,
    /// Every HTTP call
    VeryVerbose = 3,
    /// Everything, including dependencies
    Trace = 4,
}

impl VerbosityLevel {
    /// Map `-q` and repeated `-v` flags to a level
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return VerbosityLevel::Quiet;
        }
        match verbose {
            0 => VerbosityLevel::Normal,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Get the current verbosity level
    pub fn current() -> Self {
        match VERBOSITY.load(Ordering::Relaxed) {
            0 => VerbosityLevel::Quiet,
            1 => VerbosityLevel::Normal,
            2 => VerbosityLevel::Verbose,
            3 => VerbosityLevel::VeryVerbose,
            _ => VerbosityLevel::Trace,
        }
    }

    /// Set the verbosity level
    pub fn set(level: Self) {
        VERBOSITY.store(level as u8, Ordering::Relaxed);
    }

    /// Default `tracing` filter for this level
    pub fn filter_directive(&self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "info",
            VerbosityLevel::VeryVerbose => "debug",
            VerbosityLevel::Trace => "trace",
        }
    }
}

/// Initialize logging based on CLI flags
///
/// Logs go to stderr so command output on stdout stays pipeable. `RUST_LOG`
/// overrides the flag-derived filter. Safe to call more than once.
pub fn init_logging(verbose: u8, quiet: bool) -> VerbosityLevel {
    let level = VerbosityLevel::from_flags(verbose, quiet);
    VerbosityLevel::set(level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(level >= VerbosityLevel::VeryVerbose)
        .try_init();

    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(VerbosityLevel::from_flags(0, false), VerbosityLevel::Normal);
        assert_eq!(VerbosityLevel::from_flags(1, false), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::from_flags(2, false), VerbosityLevel::VeryVerbose);
        assert_eq!(VerbosityLevel::from_flags(7, false), VerbosityLevel::Trace);
        assert_eq!(VerbosityLevel::from_flags(3, true), VerbosityLevel::Quiet);
    }

    #[test]
    fn test_filter_directives() {
        assert_eq!(VerbosityLevel::Quiet.filter_directive(), "error");
        assert_eq!(VerbosityLevel::Normal.filter_directive(), "warn");
        assert_eq!(VerbosityLevel::Trace.filter_directive(), "trace");
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        assert_eq!(init_logging(1, false), VerbosityLevel::Verbose);
        assert_eq!(VerbosityLevel::current(), VerbosityLevel::Verbose);

        assert_eq!(init_logging(0, true), VerbosityLevel::Quiet);
        assert_eq!(VerbosityLevel::current(), VerbosityLevel::Quiet);
    }
}
