use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::deck::Deck;
use crate::help::HelpOverlay;
use crate::input::Command;
use crate::navigator::{Navigator, SlideChange};
use crate::timer::{DEFAULT_DURATION, PresentationTimer};

/// Host-facing slide information, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideInfo {
    pub current: usize,
    pub total: usize,
    pub title: String,
}

/// Side effects the window host has to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    EnterFullscreen,
    ExitFullscreen,
    SetTitle(String),
}

/// View state derived from the last slide change: counter, progress bar,
/// button states, screen reader text and pending heading focus.
#[derive(Debug, Clone, PartialEq)]
pub struct Chrome {
    pub counter: String,
    pub progress: f32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub announcement: String,
    pub focus_slide: Option<usize>,
}

impl From<&SlideChange> for Chrome {
    fn from(change: &SlideChange) -> Self {
        Self {
            counter: change.counter(),
            progress: change.progress(),
            previous_enabled: change.can_go_previous(),
            next_enabled: change.can_go_next(),
            announcement: change.announcement(),
            focus_slide: Some(change.to),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub timer_duration: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timer_duration: DEFAULT_DURATION,
        }
    }
}

/// Owns every piece of presentation state for one run. Input adapters and
/// the window host get it by reference.
pub struct PresentationSession {
    navigator: Navigator,
    timer: PresentationTimer,
    help: HelpOverlay,
    fullscreen_active: bool,
    chrome: Chrome,
    deck_title: String,
    requests: Vec<HostRequest>,
}

impl PresentationSession {
    pub fn new(deck: Deck, options: SessionOptions) -> Self {
        let deck_title = deck.title().unwrap_or("Presentation").to_string();
        let navigator = Navigator::new(deck);
        let chrome = Chrome::from(&navigator.snapshot());

        let mut session = Self {
            navigator,
            timer: PresentationTimer::new(options.timer_duration),
            help: HelpOverlay::default(),
            fullscreen_active: false,
            chrome,
            deck_title,
            requests: Vec::new(),
        };
        session.requests.push(HostRequest::SetTitle(session.window_title()));

        info!(
            deck = %session.deck_title,
            slides = session.navigator.total(),
            "presentation ready"
        );
        info!("press ? for keyboard shortcuts");
        info!("press Ctrl/Cmd + T to start the presentation timer");
        session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn timer(&self) -> &PresentationTimer {
        &self.timer
    }

    pub fn help(&self) -> &HelpOverlay {
        &self.help
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen_active
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    pub fn apply(&mut self, command: Command) {
        debug!(?command, "applying command");
        match command {
            Command::Next => {
                let change = self.navigator.next();
                self.on_change(change);
            }
            Command::Previous => {
                let change = self.navigator.previous();
                self.on_change(change);
            }
            Command::First => {
                let change = self.navigator.first();
                self.on_change(change);
            }
            Command::Last => {
                let change = self.navigator.last();
                self.on_change(change);
            }
            Command::GoTo(index) => {
                let change = self.navigator.go_to(index);
                self.on_change(change);
            }
            Command::ExitFullscreen => {
                if self.fullscreen_active {
                    self.requests.push(HostRequest::ExitFullscreen);
                }
            }
            Command::ToggleFullscreen => {
                let request = if self.fullscreen_active {
                    HostRequest::ExitFullscreen
                } else {
                    HostRequest::EnterFullscreen
                };
                self.requests.push(request);
            }
            Command::ToggleTimer => self.timer.toggle(),
            Command::ToggleHelp => self.help.toggle(),
            Command::HideHelp => self.help.hide(),
        }
    }

    /// Jump to a 1-based slide number. Anything out of range is ignored.
    pub fn go_to_slide(&mut self, number: usize) {
        if let Some(index) = number.checked_sub(1) {
            let change = self.navigator.go_to(index);
            self.on_change(change);
        }
    }

    pub fn current_slide_info(&self) -> SlideInfo {
        let index = self.navigator.current_index();
        SlideInfo {
            current: index + 1,
            total: self.navigator.total(),
            title: self
                .navigator
                .deck()
                .slide(index)
                .and_then(|s| s.title.clone())
                .unwrap_or_default(),
        }
    }

    pub fn window_title(&self) -> String {
        let info = self.current_slide_info();
        format!("Slide {}/{} - {}", info.current, info.total, self.deck_title)
    }

    /// The host reports the window's actual fullscreen state.
    pub fn on_fullscreen_changed(&mut self, active: bool) {
        if self.fullscreen_active != active {
            debug!(active, "fullscreen changed");
            self.fullscreen_active = active;
        }
    }

    /// The host refused a fullscreen request. State stays as it was.
    pub fn fullscreen_rejected(&self, reason: &str) {
        warn!(reason, "error attempting to change fullscreen mode");
    }

    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Slide whose heading should receive focus, consumed once.
    pub fn take_focus_request(&mut self) -> Option<usize> {
        self.chrome.focus_slide.take()
    }

    fn on_change(&mut self, change: Option<SlideChange>) {
        let Some(change) = change else { return };
        self.chrome = Chrome::from(&change);
        self.requests.push(HostRequest::SetTitle(self.window_title()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Slide;

    fn session(n: usize) -> PresentationSession {
        let slides = (1..=n)
            .map(|i| Slide::new(Some(&format!("Part {i}")), format!("# Part {i}")))
            .collect();
        let deck = Deck::new(slides).unwrap().with_title("Kinetics");
        PresentationSession::new(deck, SessionOptions::default())
    }

    #[test]
    fn test_initial_state() {
        let mut s = session(3);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.chrome().counter, "1/3");
        assert!(!s.chrome().previous_enabled);
        assert!(s.chrome().next_enabled);
        assert_eq!(
            s.take_requests(),
            vec![HostRequest::SetTitle("Slide 1/3 - Kinetics".into())]
        );
    }

    #[test]
    fn test_five_slide_example() {
        let mut s = session(5);
        for _ in 0..3 {
            s.apply(Command::Next);
        }
        assert_eq!(s.current_index(), 3);
        assert!(s.chrome().previous_enabled);
        assert!(s.chrome().next_enabled);

        s.apply(Command::Next);
        s.apply(Command::Next);
        assert_eq!(s.current_index(), 4);
        assert!(!s.chrome().next_enabled);
        assert_eq!(s.chrome().progress, 1.0);
    }

    #[test]
    fn test_go_to_slide_is_one_based() {
        let mut s = session(4);
        s.go_to_slide(3);
        assert_eq!(s.current_index(), 2);
        s.go_to_slide(0);
        s.go_to_slide(5);
        assert_eq!(s.current_index(), 2);
        assert_eq!(
            s.current_slide_info(),
            SlideInfo {
                current: 3,
                total: 4,
                title: "Part 3".into()
            }
        );
    }

    #[test]
    fn test_slide_info_without_title_is_empty() {
        let deck = Deck::new(vec![Slide::new(None, "text")]).unwrap();
        let s = PresentationSession::new(deck, SessionOptions::default());
        assert_eq!(s.current_slide_info().title, "");
        assert_eq!(s.window_title(), "Slide 1/1 - Presentation");
    }

    #[test]
    fn test_slide_info_serializes() {
        let s = session(2);
        let json = serde_json::to_string(&s.current_slide_info()).unwrap();
        assert_eq!(json, r#"{"current":1,"total":2,"title":"Part 1"}"#);
    }

    #[test]
    fn test_transition_updates_title_and_focus() {
        let mut s = session(3);
        s.take_requests();
        s.take_focus_request();

        s.apply(Command::Last);
        assert_eq!(
            s.take_requests(),
            vec![HostRequest::SetTitle("Slide 3/3 - Kinetics".into())]
        );
        assert_eq!(s.chrome().announcement, "Part 3, slide 3 of 3");
        assert_eq!(s.take_focus_request(), Some(2));
        assert_eq!(s.take_focus_request(), None);
    }

    #[test]
    fn test_noop_navigation_emits_nothing() {
        let mut s = session(2);
        s.take_requests();
        s.apply(Command::Previous);
        s.apply(Command::GoTo(7));
        assert!(s.take_requests().is_empty());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn test_fullscreen_requests_follow_host_state() {
        let mut s = session(2);
        s.take_requests();

        s.apply(Command::ExitFullscreen);
        assert!(s.take_requests().is_empty());

        s.apply(Command::ToggleFullscreen);
        assert_eq!(s.take_requests(), vec![HostRequest::EnterFullscreen]);
        assert!(!s.is_fullscreen(), "state changes only when the host confirms");

        s.on_fullscreen_changed(true);
        s.apply(Command::ToggleFullscreen);
        s.apply(Command::ExitFullscreen);
        assert_eq!(
            s.take_requests(),
            vec![HostRequest::ExitFullscreen, HostRequest::ExitFullscreen]
        );
    }

    #[test]
    fn test_rejected_fullscreen_leaves_state() {
        let mut s = session(2);
        s.apply(Command::ToggleFullscreen);
        s.fullscreen_rejected("permission denied");
        assert!(!s.is_fullscreen());
    }

    #[test]
    fn test_dimensions_are_independent() {
        let mut s = session(3);
        s.apply(Command::ToggleTimer);
        s.apply(Command::ToggleHelp);
        s.apply(Command::Next);
        s.on_fullscreen_changed(true);

        assert_eq!(s.current_index(), 1);
        assert!(s.timer().is_running());
        assert!(s.help().is_visible());
        assert!(s.is_fullscreen());

        s.apply(Command::HideHelp);
        s.apply(Command::ToggleTimer);
        assert_eq!(s.current_index(), 1);
        assert!(!s.timer().is_running());
        assert!(!s.help().is_visible());
        assert!(s.is_fullscreen());
    }

    #[test]
    fn test_bus_dispatch_reaches_session() {
        use crate::input::{InputBus, InputEvent, InputSettings, Key, Modifiers, Point};

        let mut s = session(5);
        let mut bus = InputBus::with_adapters(&InputSettings::default());

        bus.dispatch(
            &InputEvent::Key {
                key: Key::Digit(4),
                modifiers: Modifiers::CTRL,
            },
            &mut s,
        );
        assert_eq!(s.current_index(), 3);

        bus.dispatch(&InputEvent::TouchStart { id: 0, pos: Point::new(300.0, 100.0) }, &mut s);
        bus.dispatch(&InputEvent::TouchEnd { id: 0, pos: Point::new(360.0, 110.0) }, &mut s);
        assert_eq!(s.current_index(), 2);

        bus.dispatch(&InputEvent::TouchStart { id: 0, pos: Point::new(300.0, 100.0) }, &mut s);
        bus.dispatch(&InputEvent::TouchEnd { id: 0, pos: Point::new(260.0, 100.0) }, &mut s);
        assert_eq!(s.current_index(), 2);
    }
}
