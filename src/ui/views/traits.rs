use ratatui::{crossterm::event::Event as CrossTermEvent, layout::Rect};

use crate::store::{
    app::{AppState, ViewID},
    todo::TodoState,
    users::UsersState,
};

pub trait EventHandler {
    fn process_event(&self, evt: &CrossTermEvent, ctx: &CustomWidgetContext) -> bool;
}

/// Snapshot of every store's state passed to components and views on each
/// render.
pub struct CustomWidgetContext<'a> {
    pub app: &'a AppState,
    pub todos: &'a TodoState,
    pub users: &'a UsersState,
    // total area for the entire application - useful for calculating
    // popover areas
    pub app_area: Rect,
}

pub trait CustomWidget {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext);
}

pub trait CustomWidgetRef {
    fn render_ref(&self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext);
}

pub trait CustomStatefulWidget {
    type State;

    fn render(
        self,
        area: Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
        ctx: &CustomWidgetContext,
    );
}

pub trait View: EventHandler + CustomWidgetRef {
    fn id(&self) -> ViewID;
    fn legend(&self, _ctx: &CustomWidgetContext) -> &str {
        ""
    }
    /// Called on every loop iteration regardless of input. Returns true
    /// when the view has fresh data and wants a redraw.
    fn tick(&self) -> bool {
        false
    }
}
