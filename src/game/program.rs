use super::command::Command;

/// The player's program: commands in the order they will be replayed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Remove and return the most recently added command
    pub fn undo(&mut self) -> Option<Command> {
        self.commands.pop()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn get(&self, index: usize) -> Option<Command> {
        self.commands.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn as_slice(&self) -> &[Command] {
        &self.commands
    }

    /// The last `n` commands, or all of them if there are fewer
    pub fn tail(&self, n: usize) -> &[Command] {
        let start = self.commands.len().saturating_sub(n);
        &self.commands[start..]
    }
}

impl FromIterator<Command> for CommandQueue {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}
