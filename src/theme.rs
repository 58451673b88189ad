use std::io::{self, IsTerminal};

use nu_ansi_term::Style;

pub mod catppuccin {
    use nu_ansi_term::Color;
    pub struct Mocha;
    impl Mocha {
        pub const SURFACE2: Color = Color::Rgb(108, 112, 134);
        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
    }
}

use catppuccin::Mocha;

/// Paint `text` when stderr is a terminal; pass it through untouched otherwise.
fn paint_stderr(style: Style, text: &str) -> String {
    if io::stderr().is_terminal() {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn error_label() -> String {
    paint_stderr(Mocha::RED.bold(), "error:")
}

pub fn caret(text: &str) -> String {
    paint_stderr(Mocha::PEACH.bold(), text)
}

pub fn location(text: &str) -> String {
    paint_stderr(Style::new().fg(Mocha::SURFACE2), text)
}
