use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::event::{AppEvent, GatewayEvent};
use crate::gateway::GeminiClient;
use crate::session::controller::{EvaluationRequest, PracticeSession};
use crate::session::task::Difficulty;
use crate::ui::components::dashboard::Dashboard;
use crate::ui::theme::Theme;

const PASTE_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Practice,
    History,
    Settings,
}

/// Top-level state: the active screen, the practice session, and the
/// gateway handle. Gateway calls run on spawned worker threads and come
/// back through the event channel, so the UI thread never blocks on the
/// network.
pub struct App {
    pub screen: AppScreen,
    pub session: PracticeSession,
    pub dashboard: Dashboard,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub reference_scroll: u16,
    gateway: GeminiClient,
    events_tx: mpsc::Sender<AppEvent>,
    paste_notice: Option<Instant>,
}

impl App {
    pub fn new(config: Config, gateway: GeminiClient, events_tx: mpsc::Sender<AppEvent>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let dashboard = Dashboard::new(theme);

        Self {
            screen: AppScreen::Dashboard,
            session: PracticeSession::new(Difficulty::Beginner),
            dashboard,
            theme,
            config,
            should_quit: false,
            reference_scroll: 0,
            gateway,
            events_tx,
            paste_notice: None,
        }
    }

    /// Selecting a difficulty on the dashboard records it and enters the
    /// practice screen with a fresh load.
    pub fn start_practice(&mut self, difficulty: Difficulty) {
        self.session.difficulty = difficulty;
        self.screen = AppScreen::Practice;
        let seq = self.session.start();
        self.spawn_generation(seq);
    }

    pub fn request_next_task(&mut self) {
        if let Some(seq) = self.session.begin_load() {
            self.spawn_generation(seq);
        }
    }

    pub fn cycle_difficulty(&mut self, forward: bool) {
        let next = if forward {
            self.session.difficulty.next()
        } else {
            self.session.difficulty.prev()
        };
        if let Some(seq) = self.session.set_difficulty(next) {
            self.spawn_generation(seq);
        }
    }

    pub fn submit(&mut self) {
        if let Some(req) = self.session.begin_evaluation() {
            self.spawn_evaluation(req);
        }
    }

    fn spawn_generation(&mut self, seq: u64) {
        self.reference_scroll = 0;
        let gateway = self.gateway.clone();
        let difficulty = self.session.difficulty;
        let topic = self.config.topic_hint().map(str::to_string);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let task = gateway.generate_task(difficulty, topic.as_deref());
            let _ = tx.send(AppEvent::Gateway(GatewayEvent::TaskGenerated { seq, task }));
        });
    }

    fn spawn_evaluation(&mut self, req: EvaluationRequest) {
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = gateway.evaluate(&req.original, &req.candidate);
            let _ = tx.send(AppEvent::Gateway(GatewayEvent::SubmissionScored {
                seq: req.seq,
                result,
            }));
        });
    }

    /// Completions arrive here regardless of the visible screen; the
    /// controller's sequence check decides whether they still apply.
    pub fn handle_gateway(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::TaskGenerated { seq, task } => {
                self.session.apply_task(seq, task);
            }
            GatewayEvent::SubmissionScored { seq, result } => {
                self.session.apply_feedback(seq, result);
            }
        }
    }

    /// Pasting is rejected outright: the payload is dropped and a
    /// transient warning is shown instead.
    pub fn handle_paste(&mut self, _text: String) {
        if self.screen == AppScreen::Practice {
            self.paste_notice = Some(Instant::now());
        }
    }

    pub fn paste_notice_active(&self) -> bool {
        self.paste_notice
            .is_some_and(|since| since.elapsed() < PASTE_NOTICE_TTL)
    }

    pub fn on_tick(&mut self) {
        if let Some(since) = self.paste_notice {
            if since.elapsed() >= PASTE_NOTICE_TTL {
                self.paste_notice = None;
            }
        }
    }

    pub fn scroll_reference(&mut self, delta: i32) {
        let next = self.reference_scroll as i32 + delta;
        self.reference_scroll = next.clamp(0, u16::MAX as i32) as u16;
    }

    pub fn go_to_dashboard(&mut self) {
        self.screen = AppScreen::Dashboard;
    }

    pub fn go_to_history(&mut self) {
        self.screen = AppScreen::History;
    }

    pub fn go_to_settings(&mut self) {
        self.screen = AppScreen::Settings;
    }
}
