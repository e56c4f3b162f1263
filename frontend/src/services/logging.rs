use std::cell::Cell;

use shared::LogLevel;

thread_local! {
    static MIN_LEVEL: Cell<LogLevel> = Cell::new(LogLevel::Info);
}

pub struct Logger;

impl Logger {
    /// Set the lowest level that reaches the console
    pub fn init(level: LogLevel) {
        MIN_LEVEL.with(|min| min.set(level));
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, component, message);
    }

    fn enabled(level: LogLevel) -> bool {
        MIN_LEVEL.with(|min| level >= min.get())
    }

    fn log(level: LogLevel, component: &str, message: &str) {
        if !Self::enabled(level) {
            return;
        }
        let line = format_line(level, component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}

fn format_line(level: LogLevel, component: &str, message: &str) -> String {
    format!("[{}] {}: {}", level, component, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(LogLevel::Error, "CategoryEditor", "PATCH failed"),
            "[ERROR] CategoryEditor: PATCH failed"
        );
    }

    #[test]
    fn test_level_filter() {
        Logger::init(LogLevel::Warn);
        assert!(!Logger::enabled(LogLevel::Info));
        assert!(Logger::enabled(LogLevel::Warn));
        assert!(Logger::enabled(LogLevel::Error));

        Logger::init(LogLevel::Debug);
        assert!(Logger::enabled(LogLevel::Debug));
    }
}
