//! Grouping of path tokens into commands

use super::lexer::{lex, Token};

/// A single path command letter with the numbers that followed it
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub command: char,
    pub params: Vec<f64>,
}

impl PathCommand {
    pub fn new(command: char, params: Vec<f64>) -> Self {
        Self { command, params }
    }

    /// `Z` or `z`
    pub fn is_close(&self) -> bool {
        self.command.eq_ignore_ascii_case(&'z')
    }

    pub fn is_relative(&self) -> bool {
        self.command.is_ascii_lowercase()
    }
}

/// Split path data into commands, in source order.
///
/// Numbers before the first command letter are discarded. A command with no
/// numbers is dropped, except close commands which never take any.
/// Repeated parameter groups stay on one command: `L 1 2 3 4` yields a
/// single `L` carrying four numbers.
pub fn tokenize(path_data: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();
    let mut current: Option<PathCommand> = None;

    for (token, _) in lex(path_data) {
        match token {
            Token::Command(letter) => {
                if let Some(done) = current.take() {
                    push_command(&mut commands, done);
                }
                current = Some(PathCommand::new(letter, Vec::new()));
            }
            Token::Number(n) => {
                if let Some(cmd) = current.as_mut() {
                    cmd.params.push(n);
                }
            }
        }
    }

    if let Some(done) = current {
        push_command(&mut commands, done);
    }

    commands
}

fn push_command(commands: &mut Vec<PathCommand>, cmd: PathCommand) {
    if cmd.params.is_empty() && !cmd.is_close() {
        log::debug!("dropping '{}' with no parameters", cmd.command);
        return;
    }
    commands.push(cmd);
}
