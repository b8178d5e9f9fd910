use std::io;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Select(String),
    Email(String),
    Submit,
    Signup { email: String, activity: String },
    Remove(usize),
    Unregister { email: String, activity: String },
    Help,
    Exit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  list | refresh                 - Show activities
  select <activity>              - Choose an activity in the signup form
  email <address>                - Enter an email in the signup form
  submit                         - Submit the signup form
  signup <email> <activity>      - Fill in and submit the signup form
  remove <n>                     - Remove participant number <n>
  unregister <email> <activity>  - Remove a participant by email
  help                           - Show this list
  exit                           - Exit the program";

/// Splits `"<email> <activity name with spaces>"`.
fn email_and_activity(rest: &str, usage: &'static str) -> Result<(String, String), CommandError> {
    let (email, activity) = rest
        .split_once(char::is_whitespace)
        .ok_or(CommandError::Usage(usage))?;
    let activity = activity.trim();
    if activity.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok((email.to_string(), activity.to_string()))
}

fn required(rest: &str, usage: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(rest.to_string())
    }
}

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_lowercase().as_str() {
            "list" | "refresh" => Command::Refresh,
            "select" => Command::Select(required(rest, "select <activity>")?),
            "email" => Command::Email(required(rest, "email <address>")?),
            "submit" => Command::Submit,
            "signup" => {
                let (email, activity) = email_and_activity(rest, "signup <email> <activity>")?;
                Command::Signup { email, activity }
            }
            "remove" => {
                let index = rest
                    .parse()
                    .map_err(|_| CommandError::Usage("remove <n>"))?;
                Command::Remove(index)
            }
            "unregister" => {
                let (email, activity) =
                    email_and_activity(rest, "unregister <email> <activity>")?;
                Command::Unregister { email, activity }
            }
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };

        Ok(Some(command))
    }
}

/// One read from the terminal.
#[derive(Debug)]
pub enum Input {
    Command(Command),
    Blank,
    Invalid(CommandError),
    /// The line could not be read, e.g. it was not UTF-8. Reading can go on.
    Unreadable(io::Error),
    Closed,
}

impl Input {
    pub fn from_read(read: io::Result<Option<String>>) -> Self {
        match read {
            Ok(Some(line)) => match Command::parse(&line) {
                Ok(Some(command)) => Input::Command(command),
                Ok(None) => Input::Blank,
                Err(e) => Input::Invalid(e),
            },
            Ok(None) => Input::Closed,
            Err(e) => Input::Unreadable(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("list"), Ok(Some(Command::Refresh)));
        assert_eq!(Command::parse("  REFRESH "), Ok(Some(Command::Refresh)));
        assert_eq!(Command::parse("submit"), Ok(Some(Command::Submit)));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Exit)));
        assert_eq!(Command::parse(""), Ok(None));
    }

    #[test]
    fn test_parse_activity_names_with_spaces() {
        assert_eq!(
            Command::parse("select Chess Club"),
            Ok(Some(Command::Select("Chess Club".into())))
        );
        assert_eq!(
            Command::parse("signup b@x.com Chess Club"),
            Ok(Some(Command::Signup {
                email: "b@x.com".into(),
                activity: "Chess Club".into(),
            }))
        );
        assert_eq!(
            Command::parse("unregister a@x.com   Chess Club"),
            Ok(Some(Command::Unregister {
                email: "a@x.com".into(),
                activity: "Chess Club".into(),
            }))
        );
    }

    #[test]
    fn test_parse_remove() {
        assert_eq!(Command::parse("remove 3"), Ok(Some(Command::Remove(3))));
        assert_eq!(
            Command::parse("remove three"),
            Err(CommandError::Usage("remove <n>"))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("signup b@x.com"),
            Err(CommandError::Usage("signup <email> <activity>"))
        );
        assert_eq!(
            Command::parse("email"),
            Err(CommandError::Usage("email <address>"))
        );
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }

    #[test]
    fn test_input_from_read() {
        assert!(matches!(
            Input::from_read(Ok(Some("remove 2".into()))),
            Input::Command(Command::Remove(2))
        ));
        assert!(matches!(Input::from_read(Ok(Some("  ".into()))), Input::Blank));
        assert!(matches!(
            Input::from_read(Ok(Some("dance".into()))),
            Input::Invalid(CommandError::Unknown(_))
        ));
        assert!(matches!(Input::from_read(Ok(None)), Input::Closed));
    }

    #[test]
    fn test_unreadable_line_does_not_close_input() {
        let err = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        match Input::from_read(Err(err)) {
            Input::Unreadable(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("expected unreadable input, got {:?}", other),
        }
    }
}
