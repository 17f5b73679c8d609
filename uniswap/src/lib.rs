pub mod writing {
    pub mod cc {
        pub const RED: &str         = "\x1b[31m";
        pub const GREEN: &str       = "\x1b[32m";
        pub const YELLOW: &str      = "\x1b[33m";
        pub const CYAN: &str        = "\x1b[36m";
        pub const RESET: &str       = "\x1b[0m";
        pub const LIGHT_GRAY: &str  = "\x1b[38;5;245m";
        pub const LIGHT_GREEN: &str = "\x1b[92m";
    }

    pub mod logging {
        use std::{fmt::Arguments, fs::OpenOptions, io::Write, path::Path};

        use super::cc;

        // DFK_LOG_PATH moves router logs into a file; stderr otherwise.
        pub fn emit(color: &str, args: Arguments<'_>) {
            let time = chrono::Utc::now().format("%H:%M:%S%.3f");
            let Ok(path) = std::env::var("DFK_LOG_PATH") else {
                eprintln!("{time} | {color}{args}{}", cc::RESET);
                return;
            };
            if let Some(parent) = Path::new(&path).parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
                let _ = writeln!(f, "{time} | {args}");
            }
        }
    }

    #[macro_export]
    macro_rules! log {
        ($color:expr, $msg:literal) => {
            $crate::writing::logging::emit($color, format_args!($msg))
        };
        ($color:expr, $fmt:literal, $($arg:tt)+) => {
            $crate::writing::logging::emit($color, format_args!($fmt, $($arg)+))
        };
        ($msg:literal) => {
            $crate::writing::logging::emit($crate::writing::cc::LIGHT_GRAY, format_args!($msg))
        };
        ($fmt:literal, $($arg:tt)+) => {
            $crate::writing::logging::emit($crate::writing::cc::LIGHT_GRAY, format_args!($fmt, $($arg)+))
        };
    }
}

pub mod dfk;
pub mod plug;
