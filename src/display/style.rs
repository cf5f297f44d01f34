//! Rendering style
//!
//! Output comes in two flavours carrying the same information: a plain one
//! framed with `+`, `-` and `|`, and a decorated one that drops the borders
//! and relies on ANSI colours instead. Renderers receive a [`Style`] and ask it
//! for separators and colouring; they never probe the terminal themselves.

use std::io::IsTerminal;

use colored::{Color, ColoredString, Colorize};

/// Text attributes applied in decorated mode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Paint {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub dimmed: bool,
    pub reversed: bool,
}

impl Paint {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            italic: false,
            dimmed: false,
            reversed: false,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn dimmed(mut self) -> Self {
        self.dimmed = true;
        self
    }

    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

/// How output is framed and coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    bordered: bool,
    color: bool,
}

impl Style {
    /// Bordered ASCII output without escape sequences
    pub const fn plain() -> Self {
        Self {
            bordered: true,
            color: false,
        }
    }

    /// Borderless output highlighted with ANSI colours
    ///
    /// Escape sequences are only emitted once colours are enabled for the
    /// process, which [`Style::detect`] does.
    pub const fn decorated() -> Self {
        Self {
            bordered: false,
            color: true,
        }
    }

    /// Pick a style for standard output
    ///
    /// Colours are used only on a terminal, when `NO_COLOR` is unset, `TERM`
    /// is not `dumb` and the caller did not ask for plain output.
    pub fn detect(force_plain: bool) -> Self {
        let stdout_tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let dumb_term = std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false);

        if force_plain || !stdout_tty || no_color || dumb_term {
            Self::plain()
        } else {
            // The terminal was checked here, colored must not check again.
            colored::control::set_override(true);
            Self::decorated()
        }
    }

    pub fn is_bordered(&self) -> bool {
        self.bordered
    }

    pub fn uses_color(&self) -> bool {
        self.color
    }

    /// Vertical column separator
    pub fn vertical(&self) -> &'static str {
        if self.bordered {
            "|"
        } else {
            " "
        }
    }

    /// Horizontal rule `+---+` of the given total width, empty when borderless
    pub fn rule(&self, width: usize) -> String {
        if self.bordered {
            format!("+{}+", "-".repeat(width.saturating_sub(2)))
        } else {
            String::new()
        }
    }

    /// Apply `paint` to `text`; a passthrough when colours are off
    pub fn paint(&self, text: &str, paint: Paint) -> String {
        if !self.color {
            return text.to_string();
        }

        let mut styled = ColoredString::from(text);
        if let Some(color) = paint.fg {
            styled = styled.color(color);
        }
        if let Some(color) = paint.bg {
            styled = styled.on_color(color);
        }
        if paint.bold {
            styled = styled.bold();
        }
        if paint.italic {
            styled = styled.italic();
        }
        if paint.dimmed {
            styled = styled.dimmed();
        }
        if paint.reversed {
            styled = styled.reversed();
        }
        styled.to_string()
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(text, Paint::new().bold())
    }

    pub fn italic(&self, text: &str) -> String {
        self.paint(text, Paint::new().italic())
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, Paint::new().dimmed())
    }

    pub fn inverse(&self, text: &str) -> String {
        self.paint(text, Paint::new().reversed())
    }
}
