use std::io::{StdoutLock, Write};

pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
}

/// Write one timestamped line to stderr and mirror it to the debug log file.
pub fn emit(color: &str, args: std::fmt::Arguments<'_>) {
    let time = chrono::Utc::now().format("%H:%M:%S%.3f");
    let line = args.to_string();
    {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "{}{} | {}{}{}{}", cc::LIGHT_GRAY, time, cc::RESET, color, line, cc::RESET);
    }
    crate::libs::lookup::save_log_to_file(&line);
}

#[macro_export]
macro_rules! log {
    // log!(cc::RED, "hello");
    ($color:expr, $fmt:literal $(,)?) => {
        $crate::libs::writing::emit($color, format_args!($fmt))
    };
    // log!(cc::GREEN, "swap: {} -> {}", a, b);
    ($color:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::libs::writing::emit($color, format_args!($fmt, $($arg)+))
    };
    // log!("hello");
    ($fmt:literal $(,)?) => {
        $crate::libs::writing::emit($crate::libs::writing::cc::LIGHT_GRAY, format_args!($fmt))
    };
    // log!("price: {}", p);
    ($fmt:literal, $($arg:tt)+) => {
        $crate::libs::writing::emit($crate::libs::writing::cc::LIGHT_GRAY, format_args!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::libs::writing::emit($crate::libs::writing::cc::ORANGE, format_args!($($arg)*))
    };
}

/// Command results go to stdout so they can be piped; logs stay on stderr.
pub struct Colors<'a> {
    lock: StdoutLock<'a>,
}

impl<'a> Colors<'a> {
    pub fn new(lock: StdoutLock<'a>) -> Self {
        Self { lock }
    }

    pub fn cprint(&mut self, text: &str, color: &str) {
        let _ = writeln!(self.lock, "{}{}{}", color, text, cc::RESET);
    }

    pub fn print(&mut self, text: &str) {
        let _ = writeln!(self.lock, "{}", text);
    }
}
