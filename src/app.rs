use color_eyre::eyre::Result;
use tui_uikit::{
    actions::{Action, ActionSender},
    tui::{Event, TuiEnum},
};

use crate::{config::Config, gallery::Gallery};

pub struct RootState {
    pub should_quit: bool,
    pub action_tx: tokio::sync::mpsc::UnboundedSender<Action>,
    pub action_rx: tokio::sync::mpsc::UnboundedReceiver<Action>,

    pub config: Config,
}

impl RootState {
    pub fn new(config: Config) -> Self {
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            should_quit: false,
            action_tx,
            action_rx,
            config,
        }
    }

    pub fn sender(&self) -> ActionSender {
        self.action_tx.clone().into()
    }
}

pub struct App {
    pub gallery: Gallery,
    pub state: RootState,
    pub tui: TuiEnum,
}

impl App {
    pub fn new(state: RootState, tui: TuiEnum) -> Self {
        let mut gallery = Gallery::new(&state.config, state.sender());
        gallery.init();
        Self {
            gallery,
            state,
            tui,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        loop {
            let e = self.tui.next().await?;

            self.dispatch_event(e);

            while let Ok(action) = self.state.action_rx.try_recv() {
                self.perform_action(action);
            }

            // application exit
            if self.state.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Translate a terminal event into actions.
    ///
    /// Heartbeats become their actions directly; keys and pastes are offered
    /// to the gallery, which pushes whatever they mean onto the channel.
    fn dispatch_event(&mut self, event: Event) {
        match event {
            Event::Tick => self.state.sender().send(Action::Tick),
            Event::Render | Event::Resize(_, _) => self.state.sender().send(Action::Render),
            Event::Error => self.state.sender().send(Action::Quit),
            Event::Init | Event::FocusGained | Event::FocusLost | Event::Mouse(_) => {}
            Event::Key(_) | Event::Paste(_) => {
                let _ = self.gallery.handle_events(&event);
            }
        }
    }

    /// Perform an action.
    ///
    /// This SHOULD be the only place where the state of the application is
    /// changed: application-wide actions are handled here, everything else is
    /// delegated to the gallery.
    fn perform_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Render => {
                let Self { gallery, tui, .. } = self;
                tui.draw(|f| gallery.render(f, f.area())).unwrap();
            }
            action => self.gallery.update(&action),
        }
    }
}

#[cfg(test)]
mod test {
    use tui_uikit::tui::TestTui;

    use super::*;

    fn get_test_app() -> App {
        let config = Config::new(None).unwrap();
        App::new(RootState::new(config), TestTui::new().into())
    }

    fn drain(app: &mut App) {
        while let Ok(action) = app.state.action_rx.try_recv() {
            app.perform_action(action);
        }
    }

    #[test]
    fn quit_key_stops_the_app() {
        let mut app = get_test_app();
        drain(&mut app); // apply the gallery's initial focus actions

        app.dispatch_event(Event::Tick);
        drain(&mut app);
        assert!(!app.state.should_quit);

        app.dispatch_event('q'.into());
        drain(&mut app);
        assert!(app.state.should_quit);
    }

    #[test]
    fn render_action_draws_the_gallery() {
        let mut app = get_test_app();
        drain(&mut app);

        app.dispatch_event(Event::Render);
        drain(&mut app);

        let TuiEnum::Test(tui) = &app.tui else {
            panic!("expected the test backend");
        };
        let drawn = tui
            .terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .any(|cell| cell.symbol() != " ");
        assert!(drawn);
    }
}
