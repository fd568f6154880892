use std::process;

use moonview::{Color, Easing, MoonConfig, MoonError, MoonWindow};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
struct Args {
    title: String,
    fill: Color,
    outline: Color,
    diameter: u32,
    easing: Easing,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            title: "Moon".to_string(),
            fill: Color::YELLOW,
            outline: Color::DARK_GRAY,
            diameter: 80,
            easing: Easing::AccelerateDecelerate,
        }
    }
}

/// Parses command-line flags. A malformed value for a known flag is an
/// error; unknown flags and flags missing their value are skipped.
fn parse_args<I>(args: I) -> Result<Args, MoonError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let flag = match arg.as_str() {
            "--linear" => {
                parsed.easing = Easing::Linear;
                continue;
            }
            "--title" => "--title",
            "--fill" => "--fill",
            "--outline" => "--outline",
            "--diameter" => "--diameter",
            other => {
                warn!(argument = other, "ignoring unknown argument");
                continue;
            }
        };
        let Some(value) = args.next() else {
            warn!(flag, "missing value, keeping default");
            continue;
        };
        match flag {
            "--title" => parsed.title = value,
            "--fill" => parsed.fill = value.parse()?,
            "--outline" => parsed.outline = value.parse()?,
            _ => {
                parsed.diameter = value
                    .parse()
                    .map_err(|_| MoonError::InvalidArgument { flag, value })?;
            }
        }
    }
    Ok(parsed)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            error!(%err, "invalid arguments");
            process::exit(2);
        }
    };

    let config = MoonConfig::builder()
        .title(args.title)
        .fill_color(args.fill)
        .outline_color(args.outline)
        .preferred_diameter_dp(args.diameter)
        .easing(args.easing)
        .build();

    if let Err(err) = MoonWindow::new(config).show() {
        error!(%err, "moonview exited");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        assert_eq!(parse_args(args(&[])).unwrap(), Args::default());
    }

    #[test]
    fn known_flags_are_applied() {
        let parsed = parse_args(args(&[
            "--title", "Full", "--fill", "FF123456", "--diameter", "120", "--linear",
        ]))
        .unwrap();
        assert_eq!(parsed.title, "Full");
        assert_eq!(parsed.fill, Color(0xFF12_3456));
        assert_eq!(parsed.outline, Color::DARK_GRAY);
        assert_eq!(parsed.diameter, 120);
        assert_eq!(parsed.easing, Easing::Linear);
    }

    #[test]
    fn malformed_values_are_rejected_alike() {
        let err = parse_args(args(&["--fill", "yellow"])).unwrap_err();
        assert!(matches!(err, MoonError::InvalidColor(_)));

        let err = parse_args(args(&["--diameter", "big"])).unwrap_err();
        assert!(matches!(
            err,
            MoonError::InvalidArgument { flag: "--diameter", ref value } if value == "big"
        ));
        assert!(parse_args(args(&["--diameter", "-5"])).is_err());
    }

    #[test]
    fn unknown_and_dangling_flags_are_skipped() {
        let parsed = parse_args(args(&["--verbose", "--diameter"])).unwrap();
        assert_eq!(parsed, Args::default());
    }
}
