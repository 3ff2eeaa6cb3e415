use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::views::traits::{CustomWidget, CustomWidgetContext};

/// One-row status line above a table, e.g. the remaining-todo count or the
/// search progress text.
pub struct Header {
    title: String,
}

impl Header {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl CustomWidget for Header {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext)
    where
        Self: Sized,
    {
        let span = Span::from(self.title).style(
            Style::default()
                .fg(ctx.app.colors.label)
                .add_modifier(Modifier::BOLD),
        );

        Line::from(span).render(area, buf)
    }
}

#[cfg(test)]
#[path = "./header_tests.rs"]
mod tests;
