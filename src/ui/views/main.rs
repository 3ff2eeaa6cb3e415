use std::{collections::HashMap, rc::Rc, sync::Arc};

use ratatui::{
    crossterm::event::{Event as CrossTermEvent, KeyCode},
    layout::{Constraint, Layout, Rect},
    style::{palette::tailwind, Style},
    text::Line,
    widgets::{Block, BorderType, Clear as ClearWidget, Padding, Paragraph, Widget, WidgetRef},
};

use crate::actions::ActionCreator;
use crate::store::{action::Action, app::ViewID, dispatcher::Dispatcher};
use crate::ui::{components::footer::InfoFooter, data_source::UsersDataSource};

use super::{
    todos::TodosView,
    traits::{CustomWidget, CustomWidgetContext, CustomWidgetRef, EventHandler, View},
    users::UsersView,
    view_select::ViewSelect,
};

const DEFAULT_PADDING: Padding = Padding::horizontal(2);

pub struct MainView {
    dispatcher: Arc<Dispatcher>,
    sub_views: HashMap<ViewID, Box<dyn View>>,
}

impl MainView {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        action_creator: Arc<ActionCreator>,
        data_source: UsersDataSource,
    ) -> Self {
        let mut sub_views: HashMap<ViewID, Box<dyn View>> = HashMap::new();

        let todos = Box::new(TodosView::new(Arc::clone(&dispatcher)));
        let users = Box::new(UsersView::new(
            Arc::clone(&dispatcher),
            action_creator,
            data_source,
        ));
        let view_select = Box::new(ViewSelect::new(
            vec![ViewID::Todos, ViewID::Users],
            2,
            Arc::clone(&dispatcher),
        ));

        sub_views.insert(todos.id(), todos);
        sub_views.insert(users.id(), users);
        sub_views.insert(view_select.id(), view_select);

        Self {
            dispatcher,
            sub_views,
        }
    }

    /// Gives every view a chance to pull in background work. Returns true
    /// when any of them wants a redraw.
    pub fn tick(&self) -> bool {
        let mut dirty = false;
        for view in self.sub_views.values() {
            dirty |= view.tick();
        }
        dirty
    }

    fn render_buffer_bg(
        &self,
        area: Rect,
        buf: &mut ratatui::prelude::Buffer,
        ctx: &CustomWidgetContext,
    ) {
        let block = Block::new()
            .style(Style::new().bg(ctx.app.colors.buffer_bg))
            .padding(DEFAULT_PADDING);
        block.render(area, buf);
    }

    fn get_top_section_areas(&self, area: Rect) -> Rc<[Rect]> {
        Layout::horizontal([
            Constraint::Percentage(20),
            Constraint::Percentage(100),
            Constraint::Percentage(20),
        ])
        .split(area)
    }

    fn render_top(
        &self,
        sections: Rc<[Rect]>,
        buf: &mut ratatui::prelude::Buffer,
        ctx: &CustomWidgetContext,
    ) {
        let logo = Paragraph::new("\nfluxterm").style(Style::new().fg(ctx.app.colors.border_color));
        let logo_block: Block<'_> = Block::bordered()
            .border_style(Style::new().fg(ctx.app.colors.border_color))
            .border_type(BorderType::Double)
            .padding(DEFAULT_PADDING);
        let logo_inner_area = logo_block.inner(sections[0]);

        logo_block.render(sections[0], buf);
        logo.render_ref(logo_inner_area, buf);

        let current_view = Paragraph::new(format!("\n{} ▼", ctx.app.view_id))
            .style(Style::new().fg(ctx.app.colors.border_color));
        let current_view_block = Block::bordered()
            .border_style(Style::new().fg(ctx.app.colors.border_color))
            .border_type(BorderType::Double)
            .padding(DEFAULT_PADDING);
        let current_view_inner_area = current_view_block.inner(sections[2]);

        current_view_block.render(sections[2], buf);
        current_view.render_ref(current_view_inner_area, buf);
    }

    fn render_middle_view(
        &self,
        view: &dyn View,
        area: Rect,
        buf: &mut ratatui::prelude::Buffer,
        ctx: &CustomWidgetContext,
    ) {
        let block: Block<'_> = Block::bordered()
            .border_style(Style::new().fg(ctx.app.colors.border_color))
            .border_type(BorderType::Plain)
            .padding(DEFAULT_PADDING);
        let inner_area = block.inner(area);
        block.render(area, buf);
        view.render_ref(inner_area, buf, ctx);
    }

    fn render_view_select_popover(
        &self,
        area: Rect,
        buf: &mut ratatui::prelude::Buffer,
        ctx: &CustomWidgetContext,
    ) {
        if let Some(view_select) = self.sub_views.get(&ViewID::ViewSelect) {
            view_select.render_ref(area, buf, ctx);
        }
    }

    fn render_error_popover(
        &self,
        area: Rect,
        buf: &mut ratatui::prelude::Buffer,
        ctx: &CustomWidgetContext,
    ) {
        if let Some(msg) = &ctx.users.error {
            let block = Block::bordered()
                .border_type(BorderType::Double)
                .border_style(
                    Style::new()
                        .fg(tailwind::RED.c600)
                        .bg(ctx.app.colors.buffer_bg),
                )
                .padding(Padding::uniform(2))
                .style(Style::default().bg(ctx.app.colors.buffer_bg));
            let inner_area = block.inner(area);
            let [msg_area, exit_area] = Layout::vertical([
                Constraint::Percentage(100), // msg
                Constraint::Length(1),       // exit
            ])
            .areas(inner_area);

            let message = Line::from(format!("Error: {}", msg));
            let exit = Paragraph::new("Press enter to clear error").centered();
            ClearWidget.render(area, buf);
            block.render(area, buf);
            message.render(msg_area, buf);
            exit.render(exit_area, buf);
        }
    }

    fn render_footer(
        &self,
        legend: &str,
        area: Rect,
        buf: &mut ratatui::prelude::Buffer,
        ctx: &CustomWidgetContext,
    ) {
        let mut segments = vec!["(q) quit".to_string(), "(v) change view".to_string()];

        if !legend.is_empty() {
            segments.push(legend.to_string());
        }

        let footer = InfoFooter::new(segments);
        footer.render(area, buf, ctx);
    }
}

/// Rect sized to the given percentages of `area` and centered within it.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

impl CustomWidgetRef for MainView {
    fn render_ref(&self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        // consists of 3 vertical rectangles (top, middle, bottom)
        let page_areas = Layout::vertical([
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

        let view = match self.sub_views.get(&ctx.app.view_id) {
            Some(view) => view,
            None => return,
        };
        let legend = view.legend(ctx);

        // render background for entire display
        self.render_buffer_bg(area, buf, ctx);
        // logo & view select
        let top_section_areas = self.get_top_section_areas(page_areas[0]);
        let top_section_areas_clone = Rc::clone(&top_section_areas);
        self.render_top(top_section_areas, buf, ctx);
        // view
        self.render_middle_view(view.as_ref(), page_areas[1], buf, ctx);
        // legend for current view
        self.render_footer(legend, page_areas[2], buf, ctx);

        // view selection
        if ctx.app.render_view_select {
            let mut select_area = top_section_areas_clone[2];
            select_area.height = (self.sub_views.len() * 3).try_into().unwrap_or(9);

            let select_block = Block::bordered()
                .border_style(Style::new().fg(ctx.app.colors.border_color))
                .border_type(BorderType::Double);

            let select_inner_area = select_block.inner(select_area);

            select_block.render(select_area, buf);

            ClearWidget.render(select_inner_area, buf);
            self.render_buffer_bg(select_inner_area, buf, ctx);
            self.render_view_select_popover(select_inner_area, buf, ctx);
        }

        // popover for search failures, rendered last so it layers on top
        self.render_error_popover(centered_rect(area, 50, 40), buf, ctx);
    }
}

impl EventHandler for MainView {
    fn process_event(&self, evt: &CrossTermEvent, ctx: &CustomWidgetContext) -> bool {
        if ctx.app.render_view_select {
            if let Some(select_view) = self.sub_views.get(&ViewID::ViewSelect) {
                return select_view.process_event(evt, ctx);
            }
            return false;
        }

        if ctx.users.error.is_some() {
            if let CrossTermEvent::Key(key) = evt {
                if key.code == KeyCode::Enter {
                    self.dispatcher.dispatch(Action::SetSearchError(None));
                }
            }
            return true;
        }

        let mut handled = match self.sub_views.get(&ctx.app.view_id) {
            Some(view) => view.process_event(evt, ctx),
            None => false,
        };

        if !handled {
            if let CrossTermEvent::Key(key) = evt {
                if key.code == KeyCode::Char('v') {
                    handled = true;
                    self.dispatcher.dispatch(Action::ToggleViewSelect);
                }
            }
        }

        handled
    }
}

#[cfg(test)]
#[path = "./main_tests.rs"]
mod tests;
