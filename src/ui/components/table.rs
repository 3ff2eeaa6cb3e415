//! Scrollable table component with selection support.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::Text,
    widgets::{
        Cell, HighlightSpacing, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Table as RatatuiTable, TableState,
    },
};
use std::cell::RefCell;

use crate::ui::views::traits::{CustomWidgetContext, CustomWidgetRef};

/// Scrollable single-line-row table with optional headers, row selection,
/// and a right aligned scrollbar.
pub struct Table {
    headers: Option<Vec<String>>,
    items: Vec<Vec<String>>,
    column_sizes: Vec<u16>,
    table_state: RefCell<TableState>,
    scroll_state: RefCell<ScrollbarState>,
}

impl Table {
    pub fn new(items: Vec<Vec<String>>, headers: Option<Vec<String>>, column_sizes: Vec<u16>) -> Self {
        let scroll_height = items.len().saturating_sub(1);

        Self {
            headers,
            column_sizes,
            items,
            table_state: RefCell::new(TableState::new()),
            scroll_state: RefCell::new(ScrollbarState::new(scroll_height)),
        }
    }

    /// Updates the table items, clamping selection when the list shrinks.
    /// Returns the selected index if one is set afterwards.
    pub fn update_items(&mut self, items: Vec<Vec<String>>) -> Option<usize> {
        let mut selected = self.table_state.borrow().selected();

        if let Some(current) = selected {
            if items.is_empty() {
                selected = None;
                self.table_state.borrow_mut().select(None);
            } else if current >= items.len() {
                let new_idx = items.len() - 1;
                selected = Some(new_idx);
                self.table_state.borrow_mut().select(selected);
                let new_scroll_state = self.scroll_state.borrow_mut().position(new_idx);
                self.scroll_state = RefCell::new(new_scroll_state);
            }
        }

        self.items = items;
        selected
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.borrow().selected()
    }

    /// Moves selection to the next row without wrapping.
    pub fn next(&mut self) -> usize {
        let i = match self.table_state.borrow().selected() {
            Some(i) => {
                if i + 1 >= self.items.len() {
                    self.items.len().saturating_sub(1)
                } else {
                    i + 1
                }
            }
            None => 0,
        };

        self.select(i);
        i
    }

    /// Moves selection to the previous row without wrapping.
    pub fn previous(&mut self) -> usize {
        let i = match self.table_state.borrow().selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };

        self.select(i);
        i
    }

    fn select(&mut self, i: usize) {
        self.table_state.borrow_mut().select(Some(i));
        let new_scroll_state = self.scroll_state.borrow().position(i);
        self.scroll_state = RefCell::new(new_scroll_state);
    }
}

impl CustomWidgetRef for Table {
    fn render_ref(&self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        // main table view + right aligned scrollbar
        let table_rects =
            Layout::horizontal([Constraint::Percentage(100), Constraint::Length(3)]).split(area);

        let header = self.headers.as_ref().map(|hs| {
            let header_style = Style::default()
                .fg(ctx.app.colors.header_fg)
                .add_modifier(Modifier::BOLD);

            hs.iter()
                .map(|h| Cell::from(format!(" {h}")))
                .collect::<Row>()
                .style(header_style)
                .height(1)
        });

        let selected_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(ctx.app.colors.selected_row_fg);

        let rows = self
            .items
            .iter()
            .map(|row| {
                row.iter()
                    .map(|content| Cell::from(Text::from(format!(" {content}"))))
                    .collect::<Row>()
                    .style(
                        Style::new()
                            .fg(ctx.app.colors.row_fg)
                            .bg(ctx.app.colors.buffer_bg),
                    )
                    .height(1)
            })
            .collect::<Vec<_>>();

        // the final column consumes all remaining space rather than
        // truncating at its configured size
        let constraints = self
            .column_sizes
            .iter()
            .enumerate()
            .map(|(i, w)| {
                if i == self.column_sizes.len() - 1 {
                    Constraint::Min(*w)
                } else {
                    Constraint::Length(*w)
                }
            })
            .collect::<Vec<Constraint>>();

        let mut table = RatatuiTable::new(rows, constraints)
            .row_highlight_style(selected_style)
            .highlight_spacing(HighlightSpacing::Always);

        if let Some(header) = header {
            table = table.header(header);
        }

        StatefulWidget::render(
            table,
            table_rects[0],
            buf,
            &mut self.table_state.borrow_mut(),
        );

        // keep the scrollbar clear of any surrounding border
        let scroll_area = table_rects[1].inner(Margin {
            vertical: 1,
            horizontal: 1,
        });

        if scroll_area.width >= 1 && scroll_area.height >= 1 {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(Style::new().fg(ctx.app.colors.border_color));

            StatefulWidget::render(
                scrollbar,
                scroll_area,
                buf,
                &mut self.scroll_state.borrow_mut(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use crate::store::{app::AppStore, todo::TodoStore, users::UsersState};
    use crate::ui::colors::Theme;

    use super::*;

    fn items(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![format!("row-{i}")]).collect()
    }

    #[test]
    fn test_next_does_not_wrap() {
        let mut table = Table::new(items(2), None, vec![10]);

        assert_eq!(table.next(), 0);
        assert_eq!(table.next(), 1);
        assert_eq!(table.next(), 1);
    }

    #[test]
    fn test_previous_does_not_wrap() {
        let mut table = Table::new(items(2), None, vec![10]);

        table.next();
        table.next();
        assert_eq!(table.previous(), 0);
        assert_eq!(table.previous(), 0);
    }

    #[test]
    fn test_update_items_clamps_selection() {
        let mut table = Table::new(items(3), None, vec![10]);

        table.next();
        table.next();
        table.next();
        assert_eq!(table.selected(), Some(2));

        let selected = table.update_items(items(1));
        assert_eq!(selected, Some(0));
        assert_eq!(table.selected(), Some(0));
    }

    #[test]
    fn test_update_items_clears_selection_when_empty() {
        let mut table = Table::new(items(2), None, vec![10]);

        table.next();
        let selected = table.update_items(Vec::new());
        assert_eq!(selected, None);
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn test_renders_headers_and_rows() {
        let table = Table::new(items(3), Some(vec!["NAME".to_string()]), vec![20]);

        let app = AppStore::new(Theme::Blue).get_state();
        let todos = TodoStore::new().get_state();
        let users = UsersState::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();

        terminal
            .draw(|frame| {
                let ctx = CustomWidgetContext {
                    app: &app,
                    todos: &todos,
                    users: &users,
                    app_area: frame.area(),
                };

                table.render_ref(frame.area(), frame.buffer_mut(), &ctx);
            })
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("row-0"));
        assert!(rendered.contains("row-2"));
    }
}
