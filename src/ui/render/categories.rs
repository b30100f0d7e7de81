use super::Frame;
use crate::state::{Focus, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render the category list, with the name input below it while adding or
/// renaming a category.
///
pub fn categories(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let focus = state.current_focus();

    let (list_area, input_area) = if focus == Focus::CategoryInput {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(size);
        (parts[0], Some(parts[1]))
    } else {
        (size, None)
    };

    let filtered = state.query().category;
    let mut items: Vec<ListItem> = state
        .categories()
        .categories()
        .iter()
        .map(|category| {
            let style = if Some(category.id) == filtered {
                styling::active_list_item_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(category.name.clone(), style)))
        })
        .collect();
    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            "No categories found",
            styling::muted_text_style(theme),
        )));
    }

    let block = Block::default()
        .title(Span::styled(
            "Categories",
            styling::active_block_title_style(),
        ))
        .borders(Borders::ALL)
        .border_style(styling::block_border_style(theme, focus == Focus::Categories));
    let list = List::new(items)
        .block(block)
        .highlight_style(styling::highlighted_item_style(theme));
    let mut list_state = ListState::default();
    if focus == Focus::Categories && !state.categories().categories().is_empty() {
        list_state.select(Some(state.get_category_index()));
    }
    frame.render_stateful_widget(list, list_area, &mut list_state);

    if let Some(input_area) = input_area {
        let form = state.category_form();
        let title = match form.editing() {
            Some(category) => format!("Rename '{}'", category.name),
            None => "New Category".to_string(),
        };
        let title = if form.is_submitting() {
            format!("{} (saving...)", title)
        } else {
            title
        };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(form.input.clone(), styling::normal_text_style(theme)),
            Span::styled("_", styling::muted_text_style(theme)),
        ]))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(styling::active_block_border_style(theme)),
        );
        frame.render_widget(input, input_area);
    }
}
