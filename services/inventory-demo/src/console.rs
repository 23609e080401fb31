//! 控制台

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// 控制台输入输出
pub trait Console {
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// 输出提示并读取一行，输入结束时返回 `None`
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// 标准输入输出
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// 控制台输出记录，可在控制台被移交后继续读取
#[derive(Debug, Clone, Default)]
pub struct ConsoleTranscript {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ConsoleTranscript {
    fn push(&self, line: String) {
        self.lines.lock().push(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }
}

/// 按脚本回放输入的控制台
#[derive(Debug)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: ConsoleTranscript,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> (Self, ConsoleTranscript)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transcript = ConsoleTranscript::default();
        let console = Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: transcript.clone(),
        };
        (console, transcript)
    }
}

impl Console for ScriptedConsole {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let input = self.inputs.pop_front();
        self.transcript
            .push(format!("{}{}", prompt, input.as_deref().unwrap_or("")));
        Ok(input)
    }
}
