//! Local-process backend
//!
//! Spawns a generation command (for example `ollama run <model>`), writes
//! the rendered prompt to its stdin, and streams its stdout back one line
//! per fragment with the line break restored.

use std::io::{BufRead, BufReader, Lines, Write};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::backend::{CompletionBackend, CompletionRequest, FragmentStream};
use crate::error::{ClientError, Result};
use crate::message::Message;

/// Backend that streams the stdout of a spawned local process
#[derive(Debug, Clone)]
pub struct CommandBackend {
    argv: Vec<String>,
}

impl CommandBackend {
    /// Create a backend around `argv`; `{model}` in any argument expands to
    /// the request's model identifier
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl CompletionBackend for CommandBackend {
    fn name(&self) -> &str {
        "command"
    }

    fn stream_completion(&self, request: &CompletionRequest) -> Result<FragmentStream> {
        let argv: Vec<String> = self
            .argv
            .iter()
            .map(|arg| arg.replace("{model}", &request.model))
            .collect();
        let (program, args) = argv.split_first().ok_or_else(|| {
            ClientError::Config("command backend requires a program name".to_string())
        })?;

        log::debug!("spawning generation command: {argv:?}");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // TODO: feed stdin from a helper thread so multi-kilobyte prompts
        // cannot deadlock against a full pipe.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(render_prompt(&request.messages).as_bytes())?;
        }

        let stdout = child.stdout.take().ok_or_else(|| {
            ClientError::Backend("child process stdout unavailable".to_string())
        })?;

        Ok(Box::new(CommandFragments {
            lines: BufReader::new(stdout).lines(),
            child,
        }))
    }
}

/// Flatten a history into the plain-text prompt the child reads on stdin.
fn render_prompt(messages: &[Message]) -> String {
    let mut prompt = messages
        .iter()
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    prompt.push('\n');
    prompt
}

struct CommandFragments {
    lines: Lines<BufReader<ChildStdout>>,
    child: Child,
}

impl Iterator for CommandFragments {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self.lines.next() {
            Some(Ok(mut line)) => {
                line.push('\n');
                Some(line)
            }
            Some(Err(err)) => {
                log::warn!("command backend read failed: {err}");
                let _ = self.child.wait();
                None
            }
            None => {
                let _ = self.child.wait();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_renders_history_in_order() {
        let prompt = render_prompt(&[
            Message::system("Be brief."),
            Message::user("What time is it?"),
        ]);
        assert_eq!(prompt, "Be brief.\nWhat time is it?\n");
    }

    #[cfg(unix)]
    #[test]
    fn cat_echoes_the_prompt_back() {
        let backend = CommandBackend::new(vec!["cat".to_string()]);
        let request = CompletionRequest::new(vec![Message::user("Hi there.")], "unused");
        let fragments: Vec<String> = backend.stream_completion(&request).unwrap().collect();
        assert_eq!(fragments, vec!["Hi there.\n"]);
    }

    #[cfg(unix)]
    #[test]
    fn model_placeholder_expands_into_argv() {
        let backend = CommandBackend::new(vec!["echo".to_string(), "model={model}".to_string()]);
        let request = CompletionRequest::new(Vec::new(), "tiny-llm");
        let fragments: Vec<String> = backend.stream_completion(&request).unwrap().collect();
        assert_eq!(fragments, vec!["model=tiny-llm\n"]);
    }

    #[cfg(unix)]
    #[test]
    fn missing_program_surfaces_as_an_error() {
        let backend = CommandBackend::new(vec!["streamcut-no-such-binary".to_string()]);
        let request = CompletionRequest::new(Vec::new(), "unused");
        assert!(backend.stream_completion(&request).is_err());
    }
}
