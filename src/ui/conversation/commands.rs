use std::str::FromStr;

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands that can be invoked by starting a message with a leading slash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Look up the receipt status of a transaction hash
    Tx,
    /// Show the canned questions and commands
    Help,
    /// Hide the chat panel
    Close,
    /// Exit the application
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: SlashCommand,
    pub argument: Option<String>,
}

impl ParsedCommand {
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }
}

impl SlashCommand {
    /// User-visible description shown in help.
    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Tx => "check a transaction by hash",
            SlashCommand::Help => "list what I can answer",
            SlashCommand::Close => "hide the chat panel",
            SlashCommand::Quit => "exit finbot",
        }
    }

    /// Command string without the leading '/'.
    pub fn command(self) -> &'static str {
        self.into()
    }

    pub fn usage(self) -> String {
        match self {
            SlashCommand::Tx => "/tx <hash>".to_string(),
            other => format!("/{}", other.command()),
        }
    }
}

/// Parse `/name [argument]`. Unknown names are not commands and go through
/// normal routing.
pub fn parse_slash_command(input: &str) -> Option<ParsedCommand> {
    let rest = input.trim().strip_prefix('/')?;
    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, Some(argument.trim())),
        None => (rest, None),
    };

    let command = SlashCommand::from_str(&name.to_lowercase()).ok()?;
    let argument = argument.filter(|a| !a.is_empty()).map(str::to_string);
    Some(ParsedCommand { command, argument })
}

/// Help text listing the canned queries and every slash command
pub fn help_text(queries: &[&str]) -> String {
    let mut text = String::from("You can ask me:\n");
    for query in queries {
        text.push_str(&format!("• {}\n", query));
    }
    text.push_str("\nAnything else goes to the AI model.\n\nCommands:\n");
    for command in SlashCommand::iter() {
        text.push_str(&format!("• {} - {}\n", command.usage(), command.description()));
    }
    text.trim_end().to_string()
}
