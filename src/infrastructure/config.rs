use crate::application::{DEFAULT_ITEMS_PER_PAGE, RegistrationTimings};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Browse a course catalog and register for a course from the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "coursedeck", version, about)]
pub struct Config {
    /// Course list to load: a local JSON file or an http(s) URL
    #[arg(long, default_value = "courses.json")]
    pub source: String,

    /// Courses shown per page
    #[arg(long, default_value_t = DEFAULT_ITEMS_PER_PAGE as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: u32,

    /// Milliseconds the simulated registration takes
    #[arg(long, default_value_t = 1500)]
    pub submit_delay_ms: u64,

    /// Milliseconds the success message stays before the form resets
    #[arg(long, default_value_t = 3000)]
    pub success_delay_ms: u64,

    /// Write logs to this file (the terminal is owned by the interface)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn items_per_page(&self) -> usize {
        self.per_page as usize
    }

    pub fn timings(&self) -> RegistrationTimings {
        RegistrationTimings {
            submit_delay: Duration::from_millis(self.submit_delay_ms),
            success_display: Duration::from_millis(self.success_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_constants() {
        let config = Config::try_parse_from(["coursedeck"]).unwrap();
        assert_eq!(config.source, "courses.json");
        assert_eq!(config.items_per_page(), 6);
        assert_eq!(config.timings(), RegistrationTimings::default());
        assert!(config.log_file.is_none());
        assert_eq!(config.verbose, 0);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "coursedeck",
            "--source",
            "https://example.com/courses.json",
            "--per-page",
            "10",
            "--submit-delay-ms",
            "10",
            "--log-file",
            "coursedeck.log",
            "-vv",
        ])
        .unwrap();
        assert_eq!(config.source, "https://example.com/courses.json");
        assert_eq!(config.items_per_page(), 10);
        assert_eq!(config.timings().submit_delay, Duration::from_millis(10));
        assert_eq!(config.log_file, Some(PathBuf::from("coursedeck.log")));
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        assert!(Config::try_parse_from(["coursedeck", "--per-page", "0"]).is_err());
    }
}
