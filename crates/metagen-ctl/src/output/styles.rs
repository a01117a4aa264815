//! Style constants and clap help styling.

use anstyle::{AnsiColor, Color, Effects, Style};

pub(crate) const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

pub(crate) const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

pub(crate) const DIM: Style = Style::new().effects(Effects::DIMMED);

const HEADING: Style = Style::new()
    .fg_color(Some(Color::Ansi(AnsiColor::Green)))
    .effects(Effects::BOLD);

const LITERAL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

/// Help output in the same palette as command output.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(HEADING)
        .usage(HEADING)
        .literal(LITERAL)
        .placeholder(LITERAL)
        .error(ERROR.effects(Effects::BOLD))
        .valid(SUCCESS)
        .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
}
