/// write a line to the given stream, optionally painted with a `colored` method
#[macro_export]
macro_rules! emit {
    ($stream:ident, $paint:ident, $($arg:tt)*) => {{
        use colored::Colorize;
        use std::io::{self, Write};
        let _ = writeln!(io::$stream(), "{}", format!($($arg)*).$paint());
    }};
    ($stream:ident, $($arg:tt)*) => {{
        use std::io::{self, Write};
        let _ = writeln!(io::$stream(), $($arg)*);
    }};
}

/// yellow, stderr
#[macro_export]
macro_rules! warning {
    ($fmt:literal $(, $($arg:tt)*)?) => {
        $crate::emit!(stderr, yellow, $fmt $(, $($arg)*)?)
    };
    ($expr:expr) => {
        $crate::emit!(stderr, yellow, "{}", $expr)
    };
}

/// red, stderr
#[macro_export]
macro_rules! error {
    ($fmt:literal $(, $($arg:tt)*)?) => {
        $crate::emit!(stderr, red, $fmt $(, $($arg)*)?)
    };
    ($expr:expr) => {
        $crate::emit!(stderr, red, "{}", $expr)
    };
}

/// green, stdout
#[macro_export]
macro_rules! status {
    ($fmt:literal $(, $($arg:tt)*)?) => {
        $crate::emit!(stdout, green, $fmt $(, $($arg)*)?)
    };
    ($expr:expr) => {
        $crate::emit!(stdout, green, "{}", $expr)
    };
}

/// plain, stdout
#[macro_export]
macro_rules! info {
    () => {
        $crate::emit!(stdout, "")
    };
    ($fmt:literal $(, $($arg:tt)*)?) => {
        $crate::emit!(stdout, $fmt $(, $($arg)*)?)
    };
    ($expr:expr) => {
        $crate::emit!(stdout, "{}", $expr)
    };
}

/// turn off colors when asked to (`colored` already honours NO_COLOR and non-terminals)
pub fn configure_colors(no_color: bool) {
    if no_color {
        colored::control::set_override(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::{SHOULD_COLORIZE, set_override, unset_override};

    #[test]
    fn test_only_no_color_flag_overrides() {
        // an earlier decision (forced on here) is left alone without the flag
        set_override(true);
        configure_colors(false);
        assert!(SHOULD_COLORIZE.should_colorize());

        configure_colors(true);
        assert!(!SHOULD_COLORIZE.should_colorize());

        unset_override();
    }
}
