use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

/// Return the border style for a block depending on focus.
///
pub fn block_border_style(theme: &Theme, active: bool) -> Style {
    if active {
        active_block_border_style(theme)
    } else {
        normal_block_border_style(theme)
    }
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the highlighted row of a list or table.
///
pub fn highlighted_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for active list items.
///
pub fn active_list_item_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.primary.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

pub fn accent_text_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.accent.to_color())
        .add_modifier(Modifier::BOLD)
}

pub fn success_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.success.to_color())
        .add_modifier(Modifier::BOLD)
}

pub fn warning_style(theme: &Theme) -> Style {
    Style::default().fg(theme.warning.to_color())
}

pub fn error_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.error.to_color())
        .add_modifier(Modifier::BOLD)
}
