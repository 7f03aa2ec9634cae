//! Commands for the `kata_report` binary.

/// Available CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    /// Print every kata entity's validation report.
    Report,
    /// Print the reports as JSON.
    Json,
    /// List registered capabilities in registration order.
    List,
    /// Enforce the validation policy and fail on violations.
    Check,
    /// Show version information.
    Version,
}

impl std::fmt::Display for CliCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Report => write!(f, "report"),
            Self::Json => write!(f, "json"),
            Self::List => write!(f, "list"),
            Self::Check => write!(f, "check"),
            Self::Version => write!(f, "version"),
        }
    }
}

/// Parse a CLI command from a string.
pub fn parse_command(cmd: &str) -> Option<CliCommand> {
    match cmd {
        "report" => Some(CliCommand::Report),
        "json" | "--json" => Some(CliCommand::Json),
        "list" | "ls" => Some(CliCommand::List),
        "check" => Some(CliCommand::Check),
        "version" | "--version" | "-v" => Some(CliCommand::Version),
        _ => None,
    }
}

/// Parse the first argument, defaulting to `report` when none is given.
pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = String>,
{
    match args.into_iter().next() {
        None => Ok(CliCommand::Report),
        Some(arg) => parse_command(&arg).ok_or_else(|| {
            format!(
                "unknown command '{}' (expected report, json, list, check or version)",
                arg
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("report"), Some(CliCommand::Report));
        assert_eq!(parse_command("--json"), Some(CliCommand::Json));
        assert_eq!(parse_command("ls"), Some(CliCommand::List));
        assert_eq!(parse_command("-v"), Some(CliCommand::Version));
        assert_eq!(parse_command("train"), None);
    }

    #[test]
    fn test_parse_args_defaults_to_report() {
        assert_eq!(parse_args(Vec::new()), Ok(CliCommand::Report));
        assert_eq!(
            parse_args(vec!["check".to_string(), "extra".to_string()]),
            Ok(CliCommand::Check)
        );
        assert!(parse_args(vec!["nope".to_string()]).is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for cmd in [
            CliCommand::Report,
            CliCommand::Json,
            CliCommand::List,
            CliCommand::Check,
            CliCommand::Version,
        ] {
            assert_eq!(parse_command(&cmd.to_string()), Some(cmd));
        }
    }
}
