use std::cmp::min;

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, palette::tailwind},
    text::Line,
    widgets::{
        Block, BorderType, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Padding,
        Paragraph,
    },
};
use tracing::debug;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    actions::{Action, ActionSender, CompAction},
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
    utils::key_events::KeyEvent,
};

use super::{Component, EventHandlingStatus, Focus, WidgetExt};

/// Case-insensitive substring lookup over `candidates`, preserving their
/// relative order.
///
/// An empty `query` yields an empty result: the widget never offers the whole
/// candidate set under an untouched field.
pub fn filter_candidates(candidates: &[String], query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// How filtered candidates are surfaced.
///
/// Overlay visibility only exists in modal presentation; dropdown mode
/// renders its inline list from a predicate and carries no extra state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Presentation {
    /// Inline list right below the field, shown whenever matches exist.
    Dropdown,
    /// Full-screen overlay behind an explicit open trigger.
    Modal { visible: bool },
}

impl Presentation {
    /// Modal presentation with the overlay initially closed.
    pub fn modal() -> Self {
        Presentation::Modal { visible: false }
    }
}

#[derive(Clone, Debug)]
pub struct AutocompleteCtrlKeys {
    edit_keys: Vec<KeyEvent>,
    commit_keys: Vec<KeyEvent>,
    exit_keys: Vec<KeyEvent>,
    open_keys: Vec<KeyEvent>,
}

impl Default for AutocompleteCtrlKeys {
    fn default() -> Self {
        Self {
            edit_keys: vec![KeyCode::Enter.into()],
            commit_keys: vec![KeyCode::Enter.into()],
            exit_keys: vec![KeyCode::Esc.into()],
            open_keys: vec![KeyCode::Tab.into()],
        }
    }
}

impl AutocompleteCtrlKeys {
    pub fn with_edit_keys(mut self, edit_keys: Vec<KeyEvent>) -> Self {
        self.edit_keys = edit_keys;
        self
    }
    pub fn with_commit_keys(mut self, commit_keys: Vec<KeyEvent>) -> Self {
        self.commit_keys = commit_keys;
        self
    }
    pub fn with_exit_keys(mut self, exit_keys: Vec<KeyEvent>) -> Self {
        self.exit_keys = exit_keys;
        self
    }
    pub fn with_open_keys(mut self, open_keys: Vec<KeyEvent>) -> Self {
        self.open_keys = open_keys;
        self
    }
}

#[derive(Clone, Debug)]
pub enum AutocompleteAction {
    SwitchFocus(Focus),
    StartEditing,
    StopEditing,
    HandleKey(KeyEvent),
    HandlePaste(String),
    ListUp,
    ListDown,
    OpenOverlay,
    Dismiss,
    Select(String),

    /// the event owner should pay attention to
    Selected(String),
}

/// A text input with suggestion lookup.
///
/// Set the focus state: send a [`AutocompleteInput::switch_focus_action`]
/// Action. Get the committed value: parse an action with
/// [`AutocompleteInput::parse_selected_action`].
///
/// The widget owns the raw text and the candidates filtered from it; the
/// caller-supplied candidate set is never mutated. Matches are surfaced per
/// [`Presentation`]: an inline dropdown, or an overlay behind an open
/// trigger that is only offered while matches exist.
#[derive(Clone, Debug)]
pub struct AutocompleteInput {
    id: u64,
    input: Input,
    candidates: Vec<String>,
    filtered: Vec<String>,
    list_state: ListState,
    presentation: Presentation,
    focus: Focus,
    editing: bool,

    title: String,
    placeholder: String,
    control_keys: AutocompleteCtrlKeys,

    tx: ActionSender,
}

impl AutocompleteInput {
    pub fn new<T: Into<String>>(
        id: u64,
        candidates: Vec<String>,
        title: T,
        tx: ActionSender,
    ) -> Self {
        Self {
            id,
            input: Input::default(),
            candidates,
            filtered: Vec::new(),
            list_state: ListState::default(),
            presentation: Presentation::Dropdown,
            focus: Focus::default(),
            editing: false,
            title: title.into(),
            placeholder: "Type something...".into(),
            control_keys: AutocompleteCtrlKeys::default(),
            tx,
        }
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_placeholder<T: Into<String>>(mut self, placeholder: T) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_control_keys(mut self, control_keys: AutocompleteCtrlKeys) -> Self {
        self.control_keys = control_keys;
        self
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn overlay_visible(&self) -> bool {
        matches!(self.presentation, Presentation::Modal { visible: true })
    }

    /// Replace the raw text wholesale and recompute the filtered candidates,
    /// as a keystroke would.
    pub fn set_value<T: Into<String>>(&mut self, value: T) {
        self.input = Input::from(value.into());
        self.refilter();
    }

    /// Replace the candidate set. The filter is recomputed against the
    /// current text immediately so the next render is consistent.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.refilter();
    }

    pub fn switch_focus_action(&self, focus: Focus) -> Action {
        self.action(AutocompleteAction::SwitchFocus(focus))
    }

    pub fn parse_selected_action(&self, action: &Action) -> Option<String> {
        match self.unwrap_action(action) {
            Some(AutocompleteAction::Selected(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_help_msg(&self) -> HelpMsg {
        let mut msg = HelpMsg::default();
        if matches!(self.focus, Focus::Idle) {
            return msg;
        }
        if self.overlay_visible() {
            msg.push(HelpEntry::new_plain("j/k", "move"));
            msg.push(HelpEntry::new(
                self.control_keys.commit_keys[0].clone(),
                "choose",
            ));
            msg.push(HelpEntry::new(
                self.control_keys.exit_keys[0].clone(),
                "close",
            ));
            return msg;
        }
        if self.editing {
            if !self.filtered.is_empty() {
                msg.push(HelpEntry::new_plain("up/down", "move"));
                msg.push(HelpEntry::new(
                    self.control_keys.commit_keys[0].clone(),
                    "choose",
                ));
            }
            msg.push(HelpEntry::new(
                self.control_keys.exit_keys[0].clone(),
                "quit input",
            ));
        } else {
            msg.push(HelpEntry::new(
                self.control_keys.edit_keys[0].clone(),
                "start input",
            ));
        }
        if self.can_open_overlay() {
            msg.push(HelpEntry::new(
                self.control_keys.open_keys[0].clone(),
                "suggestions",
            ));
        }
        msg
    }

    fn action(&self, action: AutocompleteAction) -> Action {
        Action::Comp((CompAction::Autocomplete(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<AutocompleteAction> {
        if let Action::Comp((CompAction::Autocomplete(action), id)) = action {
            if *id == self.id {
                return Some(action.clone());
            }
        }
        None
    }

    fn refilter(&mut self) {
        self.filtered = filter_candidates(&self.candidates, self.input.value());
        self.list_state.select(None);
    }

    /// The open trigger exists only in modal presentation, only while the
    /// overlay is closed, and only with something to show.
    fn can_open_overlay(&self) -> bool {
        matches!(self.presentation, Presentation::Modal { visible: false })
            && !self.filtered.is_empty()
    }

    /// Whether a candidate list is currently on screen (inline or overlay).
    fn list_visible(&self) -> bool {
        match self.presentation {
            Presentation::Dropdown => !self.filtered.is_empty(),
            Presentation::Modal { visible } => visible,
        }
    }

    fn highlighted(&self) -> Option<String> {
        if !self.list_visible() {
            return None;
        }
        self.list_state
            .selected()
            .and_then(|i| self.filtered.get(i))
            .cloned()
    }

    fn handle_overlay_events(&mut self, event: &Event) -> EventHandlingStatus {
        let Event::Key(key) = event else {
            return EventHandlingStatus::Ignored;
        };
        let key_event: KeyEvent = (*key).into();
        if self.control_keys.exit_keys.contains(&key_event) {
            self.tx.send(self.action(AutocompleteAction::Dismiss));
        } else if self.control_keys.commit_keys.contains(&key_event) {
            if let Some(value) = self.highlighted() {
                self.tx.send(self.action(AutocompleteAction::Select(value)));
            }
        } else {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.tx.send(self.action(AutocompleteAction::ListUp));
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.tx.send(self.action(AutocompleteAction::ListDown));
                }
                // the overlay is modal: unmapped keys stop here
                _ => {}
            }
        }
        EventHandlingStatus::Consumed
    }

    fn handle_editing_events(&mut self, event: &Event) -> EventHandlingStatus {
        match event {
            Event::Key(key) => {
                let key_event: KeyEvent = (*key).into();
                if self.control_keys.commit_keys.contains(&key_event) {
                    if let Some(value) = self.highlighted() {
                        self.tx.send(self.action(AutocompleteAction::Select(value)));
                    } else {
                        self.tx.send(self.action(AutocompleteAction::StopEditing));
                    }
                } else if self.control_keys.exit_keys.contains(&key_event) {
                    self.tx.send(self.action(AutocompleteAction::StopEditing));
                } else if self.control_keys.open_keys.contains(&key_event) {
                    if self.can_open_overlay() {
                        self.tx.send(self.action(AutocompleteAction::OpenOverlay));
                    }
                } else {
                    match key.code {
                        KeyCode::Up => self.tx.send(self.action(AutocompleteAction::ListUp)),
                        KeyCode::Down => self.tx.send(self.action(AutocompleteAction::ListDown)),
                        _ => self
                            .tx
                            .send(self.action(AutocompleteAction::HandleKey(key_event))),
                    }
                }
                EventHandlingStatus::Consumed
            }
            Event::Paste(s) => {
                self.tx
                    .send(self.action(AutocompleteAction::HandlePaste(s.clone())));
                EventHandlingStatus::Consumed
            }
            _ => EventHandlingStatus::Ignored,
        }
    }

    fn move_highlight(&mut self, down: bool) {
        if !self.list_visible() || self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        let next = match (self.list_state.selected(), down) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => min(i + 1, last),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.list_state.select(Some(next));
    }

    fn render_field(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.max(3) - 3;
        let scroll = self.input.visual_scroll(width as usize);
        let style: Style = match self.focus {
            Focus::Focused => {
                if self.editing {
                    Color::Yellow.into()
                } else {
                    Color::Cyan.into()
                }
            }
            Focus::Idle => Style::default(),
        };

        let content: Line = if self.input.value().is_empty() {
            Line::styled(
                self.placeholder.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Line::raw(self.input.value().to_string())
        };

        let input_widget = Paragraph::new(content)
            .style(style)
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(self.title.as_str()),
            );
        frame.render_widget(input_widget, area);

        if self.editing {
            // Ratatui hides the cursor unless it's explicitly set. Position the cursor past the
            // end of the input text and one line down from the border to the input line
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            frame.set_cursor_position((area.x + x as u16, area.y + 1));
        }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, block: Block) {
        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .fg(tailwind::INDIGO.c400);

        let items: Vec<ListItem> = self
            .filtered
            .iter()
            .map(|candidate| ListItem::from(Line::raw(candidate.clone())))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(selected_row_style)
            .highlight_symbol("» ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect) {
        let hint = HelpEntry::new(
            self.control_keys.open_keys[0].clone(),
            format!("{} suggestions", self.filtered.len()),
        );
        let trigger = Paragraph::new(Line::raw(format!("» {hint}"))).style(
            Style::default()
                .fg(tailwind::INDIGO.c400)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(trigger, area);
    }

    fn render_overlay(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let width = min(area.width.saturating_sub(4).max(20), 60);
        let show_area = Rect {
            x: area.width.saturating_sub(width) / 2,
            y: area.height / 6,
            width,
            height: area.height.saturating_sub(area.height / 3),
        };
        let bottom_help_area = Rect {
            x: 0,
            y: area.height.saturating_sub(3),
            width: area.width,
            height: min(3, area.height),
        };

        frame.render_widget(Clear, bottom_help_area);
        self.get_help_msg().render(frame, bottom_help_area);

        let block = Block::new()
            .title(Line::raw(self.title.clone()).centered())
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1));
        self.render_list(frame, show_area, block);
    }
}

impl WidgetExt for AutocompleteInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [field_area, below_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
        self.render_field(frame, field_area);

        match self.presentation {
            Presentation::Dropdown => {
                if !self.filtered.is_empty() && below_area.height > 0 {
                    let list_area = Rect {
                        height: min(self.filtered.len() as u16 + 2, below_area.height),
                        ..below_area
                    };
                    let block = Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded);
                    self.render_list(frame, list_area, block);
                }
            }
            Presentation::Modal { visible } => {
                if !visible && !self.filtered.is_empty() && below_area.height > 0 {
                    self.render_trigger(frame, Rect { height: 1, ..below_area });
                }
                if visible {
                    self.render_overlay(frame);
                }
            }
        }
    }
}

impl Component for AutocompleteInput {
    fn handle_events(&mut self, event: &Event) -> EventHandlingStatus {
        if matches!(self.focus, Focus::Idle) {
            return EventHandlingStatus::Ignored;
        }
        if self.overlay_visible() {
            return self.handle_overlay_events(event);
        }
        if self.editing {
            return self.handle_editing_events(event);
        }

        let Event::Key(key) = event else {
            return EventHandlingStatus::Ignored;
        };
        let key_event: KeyEvent = (*key).into();
        if self.control_keys.edit_keys.contains(&key_event) {
            self.tx.send(self.action(AutocompleteAction::StartEditing));
            EventHandlingStatus::Consumed
        } else if self.control_keys.open_keys.contains(&key_event) && self.can_open_overlay() {
            self.tx.send(self.action(AutocompleteAction::OpenOverlay));
            EventHandlingStatus::Consumed
        } else {
            EventHandlingStatus::Ignored
        }
    }

    fn update(&mut self, action: &Action) {
        let Some(action) = self.unwrap_action(action) else {
            return;
        };

        match action {
            AutocompleteAction::SwitchFocus(focus) => {
                self.focus = focus;
                if matches!(self.focus, Focus::Idle) {
                    self.editing = false;
                    if let Presentation::Modal { visible } = &mut self.presentation {
                        *visible = false;
                    }
                }
            }
            AutocompleteAction::StartEditing => self.editing = true,
            AutocompleteAction::StopEditing => self.editing = false,
            AutocompleteAction::HandleKey(key_event) => {
                self.input
                    .handle_event(&crossterm::event::Event::Key(key_event.into()));
                self.refilter();
            }
            AutocompleteAction::HandlePaste(string) => {
                string.chars().for_each(|c| {
                    self.input.handle(tui_input::InputRequest::InsertChar(c));
                });
                self.refilter();
            }
            AutocompleteAction::ListUp => self.move_highlight(false),
            AutocompleteAction::ListDown => self.move_highlight(true),
            AutocompleteAction::OpenOverlay => {
                if self.can_open_overlay() {
                    if let Presentation::Modal { visible } = &mut self.presentation {
                        *visible = true;
                    }
                    debug!("Opened suggestion overlay ({} matches)", self.filtered.len());
                }
            }
            AutocompleteAction::Dismiss => {
                // hides the surface only: raw text and matches stay untouched
                if let Presentation::Modal { visible } = &mut self.presentation {
                    *visible = false;
                }
                self.list_state.select(None);
            }
            AutocompleteAction::Select(value) => {
                self.input = Input::from(value.clone());
                self.filtered = Vec::new();
                self.list_state.select(None);
                if let Presentation::Modal { visible } = &mut self.presentation {
                    *visible = false;
                }
                self.editing = false;
                debug!("Committed suggestion {:?}", value);
                self.tx.send(self.action(AutocompleteAction::Selected(value)));
            }
            AutocompleteAction::Selected(_) => {}
        }
    }
}

#[cfg(test)]
mod test {
    use insta::assert_snapshot;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::utils::key_events::test_utils::{get_char_evt, get_key_evt};

    use super::*;

    fn tech_stack() -> Vec<String> {
        ["React Native", "React", "Redux", "TypeScript", "JavaScript"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn get_test_input(
        candidates: Vec<String>,
        presentation: Presentation,
    ) -> (AutocompleteInput, UnboundedReceiver<Action>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let mut input = AutocompleteInput::new(1, candidates, "Tech", tx.into())
            .with_presentation(presentation);
        let focus = input.switch_focus_action(Focus::Focused);
        input.update(&focus);
        (input, rx)
    }

    /// One event-loop iteration, returning every committed value the owner
    /// would have observed.
    fn pump(
        input: &mut AutocompleteInput,
        rx: &mut UnboundedReceiver<Action>,
        event: Event,
    ) -> Vec<String> {
        let _ = input.handle_events(&event);
        let mut selected = Vec::new();
        while let Ok(action) = rx.try_recv() {
            if let Some(value) = input.parse_selected_action(&action) {
                selected.push(value);
            }
            input.update(&action);
        }
        selected
    }

    fn type_str(input: &mut AutocompleteInput, rx: &mut UnboundedReceiver<Action>, s: &str) {
        for c in s.chars() {
            pump(input, rx, get_char_evt(c));
        }
    }

    #[test]
    fn filter_empty_query_yields_nothing() {
        assert_eq!(filter_candidates(&tech_stack(), ""), Vec::<String>::new());
        assert_eq!(filter_candidates(&[], ""), Vec::<String>::new());
    }

    #[test]
    fn filter_is_case_insensitive_and_order_preserving() {
        let filtered = filter_candidates(&tech_stack(), "rE");
        assert_eq!(filtered, vec!["React Native", "React", "Redux"]);
        assert_eq!(filter_candidates(&tech_stack(), "script").len(), 2);
    }

    #[test]
    fn filter_tolerates_duplicates_and_empty_candidates() {
        let candidates = vec!["".to_string(), "a".to_string(), "a".to_string()];
        assert_eq!(filter_candidates(&candidates, "a"), vec!["a", "a"]);
        assert_eq!(filter_candidates(&candidates, "b"), Vec::<String>::new());
    }

    #[test]
    fn typing_refilters_on_every_keystroke() {
        let (mut input, mut rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        assert!(input.is_editing());

        type_str(&mut input, &mut rx, "Re");
        assert_eq!(input.value(), "Re");
        assert_eq!(input.filtered(), ["React Native", "React", "Redux"]);

        type_str(&mut input, &mut rx, "d");
        assert_eq!(input.filtered(), ["Redux"]);

        pump(&mut input, &mut rx, get_key_evt(KeyCode::Backspace));
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Backspace));
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        assert!(input.filtered().is_empty());
    }

    #[test]
    fn set_value_is_idempotent() {
        let (mut input, _rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        input.set_value("Re");
        let once = input.filtered().to_vec();
        input.set_value("Re");
        assert_eq!(input.filtered(), once);
    }

    #[test]
    fn set_candidates_refilters_against_current_text() {
        let (mut input, _rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        input.set_value("Re");
        assert_eq!(input.filtered().len(), 3);

        input.set_candidates(vec!["Redis".to_string(), "SQL".to_string()]);
        assert_eq!(input.filtered(), ["Redis"]);

        input.set_candidates(Vec::new());
        assert!(input.filtered().is_empty());
    }

    #[test]
    fn dropdown_select_commits_and_notifies_once() {
        let (mut input, mut rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Re");

        // highlight the third match ("Redux") and commit
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Down));
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Down));
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Down));
        let selected = pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));

        assert_eq!(selected, vec!["Redux"]);
        assert_eq!(input.value(), "Redux");
        assert!(input.filtered().is_empty());
        assert!(!input.is_editing());
    }

    #[test]
    fn highlight_saturates_at_list_edges() {
        let (mut input, mut rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Re");

        for _ in 0..10 {
            pump(&mut input, &mut rx, get_key_evt(KeyCode::Down));
        }
        let selected = pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        assert_eq!(selected, vec!["Redux"]);
    }

    #[test]
    fn enter_without_highlight_stops_editing_without_commit() {
        let (mut input, mut rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Re");

        let selected = pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        assert!(selected.is_empty());
        assert!(!input.is_editing());
        assert_eq!(input.value(), "Re");
        // matches survive: only a commit clears them
        assert_eq!(input.filtered().len(), 3);
    }

    #[test]
    fn modal_trigger_opens_overlay_only_with_matches() {
        let candidates = vec!["TypeScript".to_string(), "JavaScript".to_string()];
        let (mut input, mut rx) = get_test_input(candidates, Presentation::modal());

        // nothing typed: the trigger must not react
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Tab));
        assert!(!input.overlay_visible());

        type_str(&mut input, &mut rx, "Script");
        assert_eq!(input.filtered().len(), 2);
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Tab));
        assert!(input.overlay_visible());
    }

    #[test]
    fn modal_dismiss_keeps_text_and_matches() {
        let candidates = vec!["TypeScript".to_string(), "JavaScript".to_string()];
        let (mut input, mut rx) = get_test_input(candidates, Presentation::modal());
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Script");
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Tab));
        assert!(input.overlay_visible());

        let selected = pump(&mut input, &mut rx, get_key_evt(KeyCode::Esc));
        assert!(selected.is_empty());
        assert!(!input.overlay_visible());
        assert_eq!(input.value(), "Script");
        assert_eq!(input.filtered().len(), 2);
    }

    #[test]
    fn modal_select_commits_and_closes_overlay() {
        let candidates = vec!["TypeScript".to_string(), "JavaScript".to_string()];
        let (mut input, mut rx) = get_test_input(candidates, Presentation::modal());
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Script");
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Tab));

        pump(&mut input, &mut rx, get_char_evt('j'));
        pump(&mut input, &mut rx, get_char_evt('j'));
        let selected = pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));

        assert_eq!(selected, vec!["JavaScript"]);
        assert_eq!(input.value(), "JavaScript");
        assert!(!input.overlay_visible());
        assert!(input.filtered().is_empty());
    }

    #[test]
    fn empty_candidate_set_never_surfaces_anything() {
        let (mut input, mut rx) = get_test_input(Vec::new(), Presentation::modal());
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "anything");
        assert!(input.filtered().is_empty());
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Tab));
        assert!(!input.overlay_visible());
    }

    #[test]
    fn idle_widget_ignores_events() {
        let (mut input, mut rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        let idle = input.switch_focus_action(Focus::Idle);
        input.update(&idle);

        let status = input.handle_events(&get_char_evt('R'));
        assert_eq!(status, EventHandlingStatus::Ignored);
        drop(rx);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn losing_focus_closes_the_overlay() {
        let candidates = vec!["TypeScript".to_string()];
        let (mut input, mut rx) = get_test_input(candidates, Presentation::modal());
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Type");
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Tab));
        assert!(input.overlay_visible());

        let idle = input.switch_focus_action(Focus::Idle);
        input.update(&idle);
        assert!(!input.overlay_visible());
        assert!(!input.is_editing());
    }

    #[test]
    fn overlay_stays_open_when_candidates_drain() {
        let candidates = vec!["TypeScript".to_string(), "JavaScript".to_string()];
        let (mut input, mut rx) = get_test_input(candidates, Presentation::modal());
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Script");
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Tab));
        assert!(input.overlay_visible());

        // the host shrinks the candidate set while the overlay is open
        input.set_candidates(Vec::new());
        assert!(input.filtered().is_empty());
        assert!(input.overlay_visible());

        // with nothing highlighted, commit keys cannot produce a selection
        let selected = pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_render_dropdown() {
        let (mut input, mut rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        type_str(&mut input, &mut rx, "Red");

        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal
            .draw(|frame| input.render(frame, frame.area()))
            .unwrap();
        assert_snapshot!(terminal.backend(), @r#"
        "╭Tech────────────────────────╮"
        "│Red                         │"
        "╰────────────────────────────╯"
        "╭────────────────────────────╮"
        "│  Redux                     │"
        "╰────────────────────────────╯"
        "                              "
        "                              "
        "#);
    }

    #[test]
    fn test_render_focus_colors() {
        fn title_color(t: &Terminal<TestBackend>) -> Color {
            let cell = t
                .backend()
                .buffer()
                .content()
                .iter()
                .find(|&c| c.symbol() == "T")
                .unwrap();
            cell.fg
        }

        let (mut input, mut rx) = get_test_input(tech_stack(), Presentation::Dropdown);
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();

        terminal
            .draw(|frame| input.render(frame, frame.area()))
            .unwrap();
        assert_eq!(title_color(&terminal), Color::Cyan);

        pump(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        terminal
            .draw(|frame| input.render(frame, frame.area()))
            .unwrap();
        assert_eq!(title_color(&terminal), Color::Yellow);

        let idle = input.switch_focus_action(Focus::Idle);
        input.update(&idle);
        terminal
            .draw(|frame| input.render(frame, frame.area()))
            .unwrap();
        assert_eq!(title_color(&terminal), Color::Reset);
    }
}
