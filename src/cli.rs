//! Command-line interface parsing for Amiibo of the Day
//!
//! This module handles parsing of CLI arguments using clap, including the
//! widget-style selection parameter `"<selector>[;<interval-hours>]"`.

use clap::Parser;
use std::path::PathBuf;

use crate::select::Selector;

/// Prefix that pins the selection to one named item
pub const PINNED_PREFIX: char = '#';

/// Update interval applied when none is given or the given one is invalid
pub const DEFAULT_INTERVAL_HOURS: u32 = 24;

/// Amiibo of the Day - show a deterministic random amiibo in your terminal
#[derive(Parser, Debug)]
#[command(name = "amiiboday")]
#[command(about = "Show the amiibo of the day in your terminal")]
#[command(version)]
pub struct Cli {
    /// Selection parameter in the form "<selector>[;<interval-hours>]"
    ///
    /// Examples:
    ///   amiiboday           # a new random amiibo every day
    ///   amiiboday "151"     # a new random amiibo from the first 151 every day
    ///   amiiboday "151;8"   # the same, changing every 8 hours
    ///   amiiboday "#Mario"  # always Mario
    ///   amiiboday ";1"      # a new random amiibo every hour
    #[arg(allow_hyphen_values = true)]
    pub param: Option<String>,

    /// Use a custom cache directory instead of the platform default
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Selection configuration derived from the parameter string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionParams {
    /// How the item of the day is chosen
    pub selector: Selector,
    /// Hours per update interval, in [1,24]
    pub interval_hours: u32,
}

impl SelectionParams {
    /// Parses a `"<selector>[;<interval-hours>]"` parameter string
    ///
    /// An empty or unparsable selector means the full random range; a
    /// leading `#` pins the selection to the rest of the token as a name.
    /// The interval must be an integer in [1,24]; anything else falls back
    /// to 24.
    pub fn parse(param: &str) -> Self {
        let mut parts = param.splitn(2, ';');
        let selector_part = parts.next().unwrap_or_default();
        let interval_hours = parts
            .next()
            .and_then(|part| part.trim().parse::<u32>().ok())
            .filter(|hours| (1..=24).contains(hours))
            .unwrap_or(DEFAULT_INTERVAL_HOURS);

        let selector = if let Some(name) = selector_part.strip_prefix(PINNED_PREFIX) {
            Selector::Pinned(name.to_string())
        } else if let Ok(bound) = selector_part.trim().parse::<i64>() {
            Selector::Bound(bound)
        } else {
            Selector::Full
        };

        Self {
            selector,
            interval_hours,
        }
    }

    /// Builds the selection configuration from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self::parse(cli.param.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_param_defaults_to_full_range_daily() {
        let params = SelectionParams::parse("");
        assert_eq!(params.selector, Selector::Full);
        assert_eq!(params.interval_hours, 24);
    }

    #[test]
    fn test_parse_bound_and_interval() {
        let params = SelectionParams::parse("151;8");
        assert_eq!(params.selector, Selector::Bound(151));
        assert_eq!(params.interval_hours, 8);
    }

    #[test]
    fn test_parse_bound_only() {
        let params = SelectionParams::parse("151");
        assert_eq!(params.selector, Selector::Bound(151));
        assert_eq!(params.interval_hours, 24);
    }

    #[test]
    fn test_parse_pinned_name() {
        let params = SelectionParams::parse("#Mario");
        assert_eq!(params.selector, Selector::Pinned("Mario".to_string()));
        assert_eq!(params.interval_hours, 24);
    }

    #[test]
    fn test_parse_pinned_name_with_interval() {
        let params = SelectionParams::parse("#Mario;3");
        assert_eq!(params.selector, Selector::Pinned("Mario".to_string()));
        assert_eq!(params.interval_hours, 3);
    }

    #[test]
    fn test_parse_hourly_with_empty_selector() {
        let params = SelectionParams::parse(";1");
        assert_eq!(params.selector, Selector::Full);
        assert_eq!(params.interval_hours, 1);
    }

    #[test]
    fn test_parse_interval_out_of_range_falls_back() {
        for param in ["151;0", "151;25", "151;-3", "151;abc", "151;"] {
            let params = SelectionParams::parse(param);
            assert_eq!(params.interval_hours, 24, "param {:?}", param);
            assert_eq!(params.selector, Selector::Bound(151));
        }
    }

    #[test]
    fn test_parse_unparsable_selector_is_full_range() {
        let params = SelectionParams::parse("abc;8");
        assert_eq!(params.selector, Selector::Full);
        assert_eq!(params.interval_hours, 8);
    }

    #[test]
    fn test_parse_negative_bound_is_kept_for_range_check() {
        // Out-of-range bounds fall back to the full range at selection time
        let params = SelectionParams::parse("-5");
        assert_eq!(params.selector, Selector::Bound(-5));
    }

    #[test]
    fn test_parse_bare_pin_prefix_pins_the_empty_name() {
        let params = SelectionParams::parse("#");
        assert_eq!(params.selector, Selector::Pinned(String::new()));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["amiiboday"]);
        assert!(cli.param.is_none());
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_cli_parse_param_and_cache_dir() {
        let cli = Cli::parse_from(["amiiboday", "--cache-dir", "/tmp/amiibo", "#Mario;8"]);
        assert_eq!(cli.param.as_deref(), Some("#Mario;8"));
        assert_eq!(cli.cache_dir.as_deref(), Some(std::path::Path::new("/tmp/amiibo")));
    }

    #[test]
    fn test_cli_parse_accepts_negative_param() {
        let cli = Cli::parse_from(["amiiboday", "-5"]);
        assert_eq!(cli.param.as_deref(), Some("-5"));
    }

    #[test]
    fn test_from_cli_without_param_is_full_range_daily() {
        let cli = Cli::parse_from(["amiiboday"]);
        let params = SelectionParams::from_cli(&cli);
        assert_eq!(params.selector, Selector::Full);
        assert_eq!(params.interval_hours, 24);
    }
}
