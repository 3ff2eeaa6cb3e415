use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::ui::views::traits::{CustomWidget, CustomWidgetContext};

const SEPARATOR: &str = " | ";

/// Bottom bar listing the key bindings available right now. Built from
/// segments so the global bindings and the active view's legend can be
/// joined uniformly.
pub struct InfoFooter {
    segments: Vec<String>,
}

impl InfoFooter {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl CustomWidget for InfoFooter {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext)
    where
        Self: Sized,
    {
        let mut spans: Vec<Span> = Vec::new();

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                spans.push(
                    Span::from(SEPARATOR).style(Style::new().fg(ctx.app.colors.border_color)),
                );
            }
            spans.push(Span::from(segment.as_str()));
        }

        let footer = Paragraph::new(Line::from(spans))
            .style(
                Style::new()
                    .fg(ctx.app.colors.row_fg)
                    .bg(ctx.app.colors.buffer_bg),
            )
            .centered()
            .block(
                Block::bordered().border_style(Style::new().fg(ctx.app.colors.border_color)),
            );

        footer.render(area, buf)
    }
}

#[cfg(test)]
#[path = "./footer_tests.rs"]
mod tests;
