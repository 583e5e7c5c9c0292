//! External command description and captured output.

use std::fmt;

/// A program plus its ordered arguments.
///
/// Built by the ffmpeg command builders and handed to
/// [`MediaTools::run`](super::MediaTools::run); nothing is executed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag and its value.
    pub fn flag(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    /// Insert arguments right after the program name.
    pub fn prepend_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut front: Vec<String> = args.into_iter().map(Into::into).collect();
        front.append(&mut self.args);
        self.args = front;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Value following `flag`, if present.
    #[cfg(test)]
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Program and arguments as one token list.
    pub fn tokens(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Shell-style rendering for logs and error messages.
    pub fn command_line(&self) -> String {
        self.tokens()
            .into_iter()
            .map(quote_token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote_token(token: &str) -> String {
    if token.is_empty() || token.contains(|c: char| c.is_whitespace() || c == '"') {
        format!("\"{}\"", token.replace('"', "\\\""))
    } else {
        token.to_string()
    }
}

/// Exit status and captured text of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or -1 if the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepend_goes_after_program() {
        let cmd = ToolCommand::new("ffmpeg")
            .flag("-i", "in.mp4")
            .prepend_args(["-hwaccel", "opencl"]);
        assert_eq!(cmd.tokens(), vec!["ffmpeg", "-hwaccel", "opencl", "-i", "in.mp4"]);
    }

    #[test]
    fn command_line_quotes_spaces() {
        let cmd = ToolCommand::new("ffmpeg").flag("-i", "my clip.mp4").arg("-y");
        assert_eq!(cmd.command_line(), "ffmpeg -i \"my clip.mp4\" -y");
    }

    #[test]
    fn value_of_finds_flag_value() {
        let cmd = ToolCommand::new("ffmpeg").flag("-b:v", "7715k");
        assert_eq!(cmd.value_of("-b:v"), Some("7715k"));
        assert_eq!(cmd.value_of("-ac"), None);
    }
}
