/// One line of operator input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Create {
        filename: String,
        content: String,
    },
    Stage {
        method: String,
        username: String,
        local_path: String,
        relative_path: String,
    },
    RefreshMethods,
    LogsOn,
    LogsOff,
    Show,
    Help,
    Quit,
}

/// Parses a non-empty input line. Arity is checked here; field content is
/// left to the validation layer, so `create notes.txt` parses with empty
/// content and is rejected downstream.
pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let trimmed = line.trim();
    let (head, rest) = split_head(trimmed);
    match head {
        "create" => {
            let (filename, content) = split_head(rest);
            if filename.is_empty() {
                return Err("usage: create <filename> [content]".to_string());
            }
            Ok(ShellCommand::Create {
                filename: filename.to_string(),
                content: content.to_string(),
            })
        }
        "stage" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            if args.len() != 4 {
                return Err(
                    "usage: stage <method> <username> <local-path> <relative-path>".to_string()
                );
            }
            Ok(ShellCommand::Stage {
                method: args[0].to_string(),
                username: args[1].to_string(),
                local_path: args[2].to_string(),
                relative_path: args[3].to_string(),
            })
        }
        "methods" => Ok(ShellCommand::RefreshMethods),
        "logs" => match rest {
            "on" => Ok(ShellCommand::LogsOn),
            "off" => Ok(ShellCommand::LogsOff),
            _ => Err("usage: logs on|off".to_string()),
        },
        "show" => Ok(ShellCommand::Show),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

pub const HELP_TEXT: &str = "\
Commands:
  create <filename> [content]                      create a file on the storage
  stage <method> <username> <local> <relative>     stage data with an allowed method
  methods                                          re-fetch the allowed staging methods
  logs on|off                                      start or stop the live log tail
  show                                             print the panel
  help                                             this text
  quit                                             leave the console";

// First whitespace-separated word and the rest of the line with its
// interior spacing intact.
fn split_head(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_keeps_content_spacing() {
        let parsed = parse("create notes.txt two  spaced words").expect("parse ok");
        assert_eq!(
            parsed,
            ShellCommand::Create {
                filename: "notes.txt".to_string(),
                content: "two  spaced words".to_string(),
            }
        );
    }

    #[test]
    fn create_without_content_parses_empty() {
        let parsed = parse("create notes.txt").expect("parse ok");
        assert_eq!(
            parsed,
            ShellCommand::Create {
                filename: "notes.txt".to_string(),
                content: String::new(),
            }
        );
    }

    #[test]
    fn create_without_filename_is_a_usage_error() {
        assert!(parse("create").is_err());
    }

    #[test]
    fn stage_requires_all_four_arguments() {
        assert!(parse("stage rsync alice /data/a").is_err());
        let parsed = parse("stage rsync alice /data/a b/c").expect("parse ok");
        assert_eq!(
            parsed,
            ShellCommand::Stage {
                method: "rsync".to_string(),
                username: "alice".to_string(),
                local_path: "/data/a".to_string(),
                relative_path: "b/c".to_string(),
            }
        );
    }

    #[test]
    fn logs_takes_on_or_off() {
        assert_eq!(parse("logs on").expect("parse ok"), ShellCommand::LogsOn);
        assert_eq!(parse("logs off").expect("parse ok"), ShellCommand::LogsOff);
        assert!(parse("logs").is_err());
        assert!(parse("logs maybe").is_err());
    }

    #[test]
    fn quit_has_an_exit_alias() {
        assert_eq!(parse("quit").expect("parse ok"), ShellCommand::Quit);
        assert_eq!(parse("exit").expect("parse ok"), ShellCommand::Quit);
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse("launch").unwrap_err();
        assert!(err.contains("launch"));
    }
}
