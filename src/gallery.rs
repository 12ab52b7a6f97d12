use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use strum::IntoEnumIterator;
use tui_uikit::{
    actions::{Action, ActionSender},
    component::{
        Component, EventHandlingStatus, Focus, WidgetExt,
        autocomplete::{AutocompleteInput, Presentation},
        button::Button,
        skeleton::{Skeleton, SkeletonAnimation},
    },
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use crate::config::Config;

/// The showcase screen: one of every widget, with focus cycling between the
/// interactive ones.
pub struct Gallery {
    focus: GalleryFocus,

    button: Button,
    skeletons: Vec<Skeleton>,
    dropdown: AutocompleteInput,
    modal: AutocompleteInput,

    last_selected: Option<String>,
    press_count: u32,

    tx: ActionSender,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GalleryFocus {
    Button,
    Dropdown,
    Modal,
}

impl GalleryFocus {
    fn next(self) -> Self {
        match self {
            GalleryFocus::Button => GalleryFocus::Dropdown,
            GalleryFocus::Dropdown => GalleryFocus::Modal,
            GalleryFocus::Modal => GalleryFocus::Button,
        }
    }
    fn prev(self) -> Self {
        match self {
            GalleryFocus::Button => GalleryFocus::Modal,
            GalleryFocus::Dropdown => GalleryFocus::Button,
            GalleryFocus::Modal => GalleryFocus::Dropdown,
        }
    }
}

impl Gallery {
    pub fn new(config: &Config, tx: ActionSender) -> Self {
        let candidates = config.gallery.candidates.clone();
        Self {
            focus: GalleryFocus::Button,
            button: Button::new(rand::random::<u64>(), "Press Me", tx.clone()),
            skeletons: SkeletonAnimation::iter().map(Skeleton::new).collect(),
            dropdown: AutocompleteInput::new(
                rand::random::<u64>(),
                candidates.clone(),
                "Dropdown lookup",
                tx.clone(),
            ),
            modal: AutocompleteInput::new(
                rand::random::<u64>(),
                candidates,
                "Modal lookup",
                tx.clone(),
            )
            .with_presentation(Presentation::modal()),
            last_selected: None,
            press_count: 0,
            tx,
        }
    }

    pub fn init(&mut self) {
        self.sync_focus();
    }

    pub fn handle_events(&mut self, event: &Event) -> EventHandlingStatus {
        // the focused widget gets first refusal
        let status = match self.focus {
            GalleryFocus::Button => self.button.handle_events(event),
            GalleryFocus::Dropdown => self.dropdown.handle_events(event),
            GalleryFocus::Modal => self.modal.handle_events(event),
        };
        if matches!(status, EventHandlingStatus::Consumed) {
            return EventHandlingStatus::Consumed;
        }

        let Event::Key(key) = event else {
            return EventHandlingStatus::Ignored;
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.focus = self.focus.next();
                self.sync_focus();
                EventHandlingStatus::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.focus = self.focus.prev();
                self.sync_focus();
                EventHandlingStatus::Consumed
            }
            KeyCode::Char('q') => {
                self.tx.send(Action::Quit);
                EventHandlingStatus::Consumed
            }
            _ => EventHandlingStatus::Ignored,
        }
    }

    pub fn update(&mut self, action: &Action) {
        if let Some(value) = self
            .dropdown
            .parse_selected_action(action)
            .or_else(|| self.modal.parse_selected_action(action))
        {
            self.last_selected = Some(value);
        }
        if self.button.parse_pressed_action(action) {
            self.press_count += 1;
        }

        self.button.update(action);
        for skeleton in &mut self.skeletons {
            skeleton.update(action);
        }
        self.dropdown.update(action);
        self.modal.update(action);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, button_area, skeleton_area, dropdown_area, modal_area, _, help_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(9),
                Constraint::Length(4),
                Constraint::Fill(1),
                Constraint::Length(3),
            ])
            .areas(area);

        self.render_header(frame, header_area);

        let [button_slot, _] =
            Layout::horizontal([Constraint::Length(20), Constraint::Fill(1)]).areas(button_area);
        self.button.render(frame, button_slot);

        let columns = Layout::horizontal(vec![
            Constraint::Ratio(1, self.skeletons.len() as u32);
            self.skeletons.len()
        ])
        .spacing(2)
        .split(skeleton_area);
        for (skeleton, column) in self.skeletons.iter_mut().zip(columns.iter()) {
            skeleton.render(frame, *column);
        }

        self.dropdown.render(frame, dropdown_area);
        self.render_help(frame, help_area);
        // last: its overlay floats above everything else
        self.modal.render(frame, modal_area);
    }

    fn sync_focus(&mut self) {
        let focus_for = |here| {
            if self.focus == here {
                Focus::Focused
            } else {
                Focus::Idle
            }
        };
        self.tx
            .send(self.button.switch_focus_action(focus_for(GalleryFocus::Button)));
        self.tx
            .send(self.dropdown.switch_focus_action(focus_for(GalleryFocus::Dropdown)));
        self.tx
            .send(self.modal.switch_focus_action(focus_for(GalleryFocus::Modal)));
    }

    /// Whether the focused widget is in the middle of an interaction that
    /// captures the keyboard.
    fn capturing(&self) -> bool {
        self.dropdown.is_editing() || self.modal.is_editing() || self.modal.overlay_visible()
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let status = format!(
            "Presses: {} | Last pick: {}",
            self.press_count,
            self.last_selected.as_deref().unwrap_or("-")
        );
        frame.render_widget(
            Paragraph::new(status)
                .block(
                    Block::default()
                        .title("tui-uikit gallery")
                        .title_alignment(Alignment::Center)
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                )
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center),
            area,
        );
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let mut help = match self.focus {
            GalleryFocus::Button => self.button.get_help_msg(),
            GalleryFocus::Dropdown => self.dropdown.get_help_msg(),
            GalleryFocus::Modal => self.modal.get_help_msg(),
        };
        if !self.capturing() {
            help.extend(
                &vec![
                    HelpEntry::new_plain("j/k", "switch widget"),
                    HelpEntry::new_plain("q", "quit"),
                ]
                .into(),
            );
        }
        help.render(frame, area);
    }
}
