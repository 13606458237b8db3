//! Terminal output formatting with colors
//!
//! Handlers write through the [`Output`] sink so tests can capture or silence them.
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;

use crate::domain::HostEntry;

/// Sink for everything a command reports to the user.
pub trait Output {
    /// Success banner.
    fn success(&mut self, msg: &str);

    /// Failure banner.
    fn error(&mut self, msg: &str);

    /// Plain line (data, counts).
    fn info(&mut self, msg: &str);

    /// Summary block for one host entry.
    fn host(&mut self, entry: &HostEntry);
}

/// `(label, value)` rows describing an entry, in display order.
pub fn host_fields(entry: &HostEntry) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    if let Some(hostname) = &entry.hostname {
        fields.push(("HostName".to_string(), hostname.clone()));
    }
    if let Some(user) = &entry.user {
        fields.push(("User".to_string(), user.clone()));
    }
    fields.push(("Port".to_string(), entry.effective_port().to_string()));
    for line in entry.extra.iter().filter(|l| !l.is_empty() && !l.starts_with('#')) {
        let (key, value) = line
            .split_once(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or((line.as_str(), ""));
        fields.push((key.to_string(), value.trim_start_matches('=').trim().to_string()));
    }
    fields
}

/// Colored output on stdout, errors on stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl Output for TerminalOutput {
    fn success(&mut self, msg: &str) {
        println!("{} {}", "✓".green(), msg.bold());
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}: {}", "error".red().bold(), msg);
    }

    fn info(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn host(&mut self, entry: &HostEntry) {
        println!("  {}", entry.aliases.iter().join(" ").cyan().bold());
        for (label, value) in host_fields(entry) {
            println!("      {:<12} {}", label.dimmed(), value);
        }
        println!();
    }
}

/// Records output as plain lines.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    pub lines: Vec<String>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl Output for CapturedOutput {
    fn success(&mut self, msg: &str) {
        self.lines.push(format!("ok: {msg}"));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(format!("error: {msg}"));
    }

    fn info(&mut self, msg: &str) {
        self.lines.push(msg.to_string());
    }

    fn host(&mut self, entry: &HostEntry) {
        self.lines.push(format!("host: {}", entry.aliases.iter().join(" ")));
        for (label, value) in host_fields(entry) {
            self.lines.push(format!("  {label} {value}"));
        }
    }
}
