use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, palette::tailwind},
    text::Line,
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use tracing::debug;

use crate::{
    actions::{Action, ActionSender, CompAction},
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{Component, EventHandlingStatus, Focus, WidgetExt};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum ButtonVariant {
    /// Filled with the accent color.
    #[default]
    Solid,
    /// Accent-colored border, transparent body.
    Outline,
    /// Bare accent-colored label.
    Text,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    fn padding(self) -> Padding {
        match self {
            ButtonSize::Small => Padding::horizontal(1),
            ButtonSize::Medium => Padding::horizontal(2),
            ButtonSize::Large => Padding::horizontal(4),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ButtonAction {
    SwitchFocus(Focus),
    Press,

    /// the event owner should pay attention to
    Pressed,
}

/// A pressable control: a pure mapping from variant/size/state to a styled
/// block, plus press notifications.
///
/// Presses are suppressed while the button is disabled or loading.
#[derive(Clone, Debug)]
pub struct Button {
    id: u64,
    title: String,
    variant: ButtonVariant,
    size: ButtonSize,
    color: Color,
    disabled: bool,
    loading: bool,
    focus: Focus,
    spinner: usize,

    tx: ActionSender,
}

impl Button {
    pub fn new<T: Into<String>>(id: u64, title: T, tx: ActionSender) -> Self {
        Self {
            id,
            title: title.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            color: tailwind::BLUE.c500,
            disabled: false,
            loading: false,
            focus: Focus::default(),
            spinner: 0,
            tx,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn switch_focus_action(&self, focus: Focus) -> Action {
        self.action(ButtonAction::SwitchFocus(focus))
    }

    pub fn parse_pressed_action(&self, action: &Action) -> bool {
        matches!(self.unwrap_action(action), Some(ButtonAction::Pressed))
    }

    pub fn get_help_msg(&self) -> HelpMsg {
        let mut msg = HelpMsg::default();
        if matches!(self.focus, Focus::Focused) && !self.disabled && !self.loading {
            msg.push(HelpEntry::new(KeyCode::Enter, "press"));
        }
        msg
    }

    fn action(&self, action: ButtonAction) -> Action {
        Action::Comp((CompAction::Button(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<ButtonAction> {
        if let Action::Comp((CompAction::Button(action), id)) = action {
            if *id == self.id {
                return Some(action.clone());
            }
        }
        None
    }

    fn label(&self) -> String {
        if self.loading {
            format!("{} {}", SPINNER_FRAMES[self.spinner], self.title)
        } else if matches!(self.focus, Focus::Focused) {
            format!("▸ {}", self.title)
        } else {
            self.title.clone()
        }
    }
}

impl WidgetExt for Button {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let accent = if self.disabled {
            Color::DarkGray
        } else {
            self.color
        };

        let mut block = Block::default().padding(self.size.padding());
        let mut style = match self.variant {
            ButtonVariant::Solid => Style::default()
                .bg(accent)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Outline => {
                block = block
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(accent));
                Style::default().fg(accent)
            }
            ButtonVariant::Text => Style::default().fg(accent),
        };
        if matches!(self.focus, Focus::Focused) {
            style = style.add_modifier(Modifier::BOLD);
        }

        let button = Paragraph::new(Line::raw(self.label()))
            .alignment(Alignment::Center)
            .style(style)
            .block(block);
        frame.render_widget(button, area);
    }
}

impl Component for Button {
    fn handle_events(&mut self, event: &Event) -> EventHandlingStatus {
        if matches!(self.focus, Focus::Idle) {
            return EventHandlingStatus::Ignored;
        }
        let Event::Key(key) = event else {
            return EventHandlingStatus::Ignored;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.tx.send(self.action(ButtonAction::Press));
                EventHandlingStatus::Consumed
            }
            _ => EventHandlingStatus::Ignored,
        }
    }

    fn update(&mut self, action: &Action) {
        if matches!(action, Action::Tick) && self.loading {
            self.spinner = (self.spinner + 1) % SPINNER_FRAMES.len();
            return;
        }
        let Some(action) = self.unwrap_action(action) else {
            return;
        };
        match action {
            ButtonAction::SwitchFocus(focus) => self.focus = focus,
            ButtonAction::Press => {
                if !self.disabled && !self.loading {
                    debug!("Button {:?} pressed", self.title);
                    self.tx.send(self.action(ButtonAction::Pressed));
                }
            }
            ButtonAction::Pressed => {}
        }
    }
}

#[cfg(test)]
mod test {
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::utils::key_events::test_utils::{get_char_evt, get_key_evt};

    use super::*;

    fn get_test_button() -> (Button, UnboundedReceiver<Action>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let mut button = Button::new(7, "Press Me", tx.into());
        let focus = button.switch_focus_action(Focus::Focused);
        button.update(&focus);
        (button, rx)
    }

    fn pump(button: &mut Button, rx: &mut UnboundedReceiver<Action>, event: Event) -> usize {
        let _ = button.handle_events(&event);
        let mut presses = 0;
        while let Ok(action) = rx.try_recv() {
            if button.parse_pressed_action(&action) {
                presses += 1;
            }
            button.update(&action);
        }
        presses
    }

    #[test]
    fn press_notifies_owner_exactly_once() {
        let (mut button, mut rx) = get_test_button();
        assert_eq!(pump(&mut button, &mut rx, get_key_evt(KeyCode::Enter)), 1);
        assert_eq!(pump(&mut button, &mut rx, get_char_evt(' ')), 1);
        assert_eq!(pump(&mut button, &mut rx, get_char_evt('x')), 0);
    }

    #[test]
    fn disabled_and_loading_suppress_presses() {
        let (mut button, mut rx) = get_test_button();
        button.set_disabled(true);
        assert_eq!(pump(&mut button, &mut rx, get_key_evt(KeyCode::Enter)), 0);

        button.set_disabled(false);
        button.set_loading(true);
        assert_eq!(pump(&mut button, &mut rx, get_key_evt(KeyCode::Enter)), 0);

        button.set_loading(false);
        assert_eq!(pump(&mut button, &mut rx, get_key_evt(KeyCode::Enter)), 1);
    }

    #[test]
    fn idle_button_ignores_activation() {
        let (mut button, mut rx) = get_test_button();
        let idle = button.switch_focus_action(Focus::Idle);
        button.update(&idle);
        assert_eq!(
            button.handle_events(&get_key_evt(KeyCode::Enter)),
            EventHandlingStatus::Ignored
        );
        drop(rx);
    }

    #[test]
    fn spinner_advances_only_while_loading() {
        let (mut button, _rx) = get_test_button();
        button.update(&Action::Tick);
        assert_eq!(button.spinner, 0);

        button.set_loading(true);
        button.update(&Action::Tick);
        button.update(&Action::Tick);
        assert_eq!(button.spinner, 2);
    }

    #[test]
    fn test_render_variants() {
        fn label_cell_bg(t: &Terminal<TestBackend>) -> Color {
            let cell = t
                .backend()
                .buffer()
                .content()
                .iter()
                .find(|&c| c.symbol() == "P")
                .unwrap();
            cell.bg
        }

        let (mut button, _rx) = get_test_button();
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| button.render(frame, frame.area()))
            .unwrap();
        assert_eq!(label_cell_bg(&terminal), tailwind::BLUE.c500);

        let mut outline = button.clone().with_variant(ButtonVariant::Outline);
        terminal
            .draw(|frame| outline.render(frame, frame.area()))
            .unwrap();
        assert_eq!(label_cell_bg(&terminal), Color::Reset);

        button.set_disabled(true);
        terminal
            .draw(|frame| button.render(frame, frame.area()))
            .unwrap();
        assert_eq!(label_cell_bg(&terminal), Color::DarkGray);
    }
}
