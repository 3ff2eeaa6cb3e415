use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::views::traits::{CustomStatefulWidget, CustomWidgetContext};

// drawn after the value while the input is accepting keystrokes, since the
// real cursor is hidden during the render loop
const CURSOR: &str = "█";

/// State for a single-line text input. The cursor is always at the end of
/// the value; editing views push and pop characters directly.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub editing: bool,
    pub value: String,
}

/// Labelled single-line text input rendered as one row.
pub struct Input {
    label: String,
}

impl Input {
    pub fn new(label: &str) -> Self {
        Self {
            label: String::from(label),
        }
    }
}

impl CustomStatefulWidget for Input {
    type State = InputState;

    fn render(
        self,
        area: Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
        ctx: &CustomWidgetContext,
    ) where
        Self: Sized,
    {
        let label_style = Style::default()
            .fg(ctx.app.colors.label)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::from(format!("{}: ", self.label)).style(label_style)];

        if state.editing {
            let value_style = Style::default().fg(ctx.app.colors.input_editing);
            spans.push(Span::from(state.value.as_str()).style(value_style));
            spans.push(Span::from(CURSOR).style(value_style));
        } else {
            spans.push(Span::from(state.value.as_str()));
        }

        Line::from(spans).render(area, buf);
    }
}

#[cfg(test)]
#[path = "./input_tests.rs"]
mod tests;
