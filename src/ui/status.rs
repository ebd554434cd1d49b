use colored::Colorize;
use std::fmt::Display;

/// Semantic level of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Print a status line to stderr, coloured by level
pub fn set_status(text: impl Display, level: StatusLevel) {
    let line = match level {
        StatusLevel::Info => text.to_string().normal(),
        StatusLevel::Success => text.to_string().green(),
        StatusLevel::Warning => format!("Warning: {}", text).yellow(),
        StatusLevel::Error => format!("Error: {}", text).red().bold(),
    };
    eprintln!("{}", line);
}

/// Print an error with its title and details
pub fn show_error(title: impl Display, message: impl Display, details: impl Display) {
    eprintln!("{}", title.to_string().red().bold());
    eprintln!("{}", message);
    let details = details.to_string();
    if !details.is_empty() {
        eprintln!("\n{}", details.dimmed());
    }
}
