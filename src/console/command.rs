use std::time::Duration;

/// The closed set of commands the terminal understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Clear,
    Help,
    FlipCoin,
    Fortune,
    ExitVim,
    Credits,
    /// Matches any input starting with `persona`
    Persona,
    /// Matches any input starting with `stop`
    Stop,
    /// Matches any input starting with `act dance`
    ActDance,
}

enum Rule {
    Exact,
    Prefix,
}

/// Dispatch order; the first matching rule wins.
const RULES: &[(Command, &str, Rule)] = &[
    (Command::Clear, "clear", Rule::Exact),
    (Command::Help, "help", Rule::Exact),
    (Command::FlipCoin, "flip coin", Rule::Exact),
    (Command::Fortune, "fortune", Rule::Exact),
    (Command::ExitVim, "exit vim", Rule::Exact),
    (Command::Credits, "credits", Rule::Exact),
    (Command::Persona, "persona", Rule::Prefix),
    (Command::Stop, "stop", Rule::Prefix),
    (Command::ActDance, "act dance", Rule::Prefix),
];

impl Command {
    /// Case- and surrounding-whitespace-insensitive lookup. Arguments after a
    /// prefix command are accepted and ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let normalized = line.trim().to_lowercase();
        RULES
            .iter()
            .find(|(_, keyword, rule)| match rule {
                Rule::Exact => normalized == *keyword,
                Rule::Prefix => normalized.starts_with(keyword),
            })
            .map(|(command, _, _)| *command)
    }

    pub fn keyword(self) -> &'static str {
        RULES
            .iter()
            .find(|(command, _, _)| *command == self)
            .map(|(_, keyword, _)| *keyword)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Text,
    Gif,
    Error,
}

/// One entry of the terminal's output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub kind: ResultKind,
    pub content: String,
    pub duration: Option<Duration>,
}

impl CommandResult {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Text,
            content: content.into(),
            duration: None,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::Error,
            content: content.into(),
            duration: None,
        }
    }

    pub fn gif(content: impl Into<String>, duration: Duration) -> Self {
        Self {
            kind: ResultKind::Gif,
            content: content.into(),
            duration: Some(duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_commands_ignore_case_and_padding() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("  HELP \t"), Some(Command::Help));
        assert_eq!(Command::parse("Flip Coin"), Some(Command::FlipCoin));
        assert_eq!(Command::parse("exit vim"), Some(Command::ExitVim));
        assert_eq!(Command::parse("help me"), None);
        assert_eq!(Command::parse("flip  coin"), None);
    }

    #[test]
    fn prefix_commands_accept_arguments() {
        assert_eq!(Command::parse("persona 5 royal"), Some(Command::Persona));
        assert_eq!(Command::parse("STOP the music"), Some(Command::Stop));
        assert_eq!(Command::parse("act dance now"), Some(Command::ActDance));
        assert_eq!(Command::parse("act"), None);
    }

    #[test]
    fn unknown_input_is_none() {
        assert_eq!(Command::parse("sudo rm -rf /"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn keywords_round_trip() {
        for (command, keyword, _) in RULES {
            assert_eq!(command.keyword(), *keyword);
            assert_eq!(Command::parse(keyword), Some(*command));
        }
    }

    #[test]
    fn result_constructors() {
        let gif = CommandResult::gif("dance", Duration::from_secs(5));
        assert_eq!(gif.kind, ResultKind::Gif);
        assert_eq!(gif.duration, Some(Duration::from_secs(5)));
        assert_eq!(CommandResult::error("x").kind, ResultKind::Error);
        assert_eq!(CommandResult::text("x").duration, None);
    }
}
