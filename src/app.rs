use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use chrono::Utc;

use crate::advice::chat::ChatSession;
use crate::advice::recommend::RecommendationFetcher;
use crate::api::{Api, ChatRequest};
use crate::config::Config;
use crate::engine::animator::{DisplayState, ScoreAnimator};
use crate::engine::metrics::DerivedMetrics;
use crate::event::{AppEvent, NetEvent};
use crate::predict::form::{FormSnapshot, PredictForm};
use crate::store::history::{HistoryStore, PredictionRecord};
use crate::store::json_store::{JsonStore, SESSION_SLOT};
use crate::store::schema::SessionData;
use crate::ui::line_input::LineInput;
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Predict,
    History,
    Recommendation,
    Settings,
}

pub const PREDICT_FAILED: &str = "Prediction failed. Please try again.";

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu,
    pub theme: &'static Theme,
    pub config: Config,
    pub session: SessionData,
    pub store: Option<JsonStore>,
    pub should_quit: bool,

    // Predict screen
    pub form: PredictForm,
    pub predict_busy: bool,
    pub predict_error: Option<&'static str>,
    pending_input: Option<FormSnapshot>,

    // History and everything derived from it
    pub history: HistoryStore,
    metrics: DerivedMetrics,
    metrics_version: Option<u64>,
    pub history_selected: usize,
    pub history_confirm_clear: bool,

    // Recommendation screen
    pub animator: ScoreAnimator,
    pub display: DisplayState,
    pub recommendation: RecommendationFetcher,
    pub chat: ChatSession,
    pub chat_input: LineInput,
    pub chat_focused: bool,

    pub settings_selected: usize,

    api: Arc<dyn Api>,
    events_tx: Sender<AppEvent>,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn Api>, events_tx: Sender<AppEvent>) -> Self {
        let store = JsonStore::new().ok();
        let session: SessionData = store
            .as_ref()
            .map(|s| s.load(SESSION_SLOT))
            .unwrap_or_default();

        let theme_name = if session.dark_mode {
            "dark".to_string()
        } else {
            config.theme.clone()
        };
        let theme: &'static Theme =
            Box::leak(Box::new(Theme::load(&theme_name).unwrap_or_default()));

        let history = HistoryStore::load(store.clone());
        let chat = ChatSession::load(store.clone());

        let mut animator = ScoreAnimator::new();
        if let Some(last) = history.last() {
            animator.set_target(last.result, Instant::now());
        }
        let display = animator.display_state();

        let mut app = Self {
            screen: AppScreen::Menu,
            menu: Menu::new(),
            theme,
            config,
            session,
            store,
            should_quit: false,
            form: PredictForm::new(),
            predict_busy: false,
            predict_error: None,
            pending_input: None,
            metrics: DerivedMetrics::derive(history.all()),
            metrics_version: Some(history.version()),
            history,
            history_selected: 0,
            history_confirm_clear: false,
            animator,
            display,
            recommendation: RecommendationFetcher::new(),
            chat,
            chat_input: LineInput::new(),
            chat_focused: false,
            settings_selected: 0,
            api,
            events_tx,
        };
        // One-shot recommendation on startup when a log already exists.
        if !app.history.is_empty() {
            app.refresh_recommendation();
        }
        app
    }

    /// Derived metrics, recomputed only when the history version moved.
    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    fn refresh_metrics(&mut self) {
        if self.metrics_version != Some(self.history.version()) {
            self.metrics = DerivedMetrics::derive(self.history.all());
            self.metrics_version = Some(self.history.version());
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.display = self.animator.tick(now);
    }

    // --- Predict flow ---------------------------------------------------

    pub fn submit_form(&mut self) {
        if self.predict_busy {
            return;
        }
        let Some(snapshot) = self.form.validate_all() else {
            return;
        };
        self.predict_busy = true;
        self.predict_error = None;
        self.pending_input = Some(snapshot.clone());

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = api.predict(&snapshot).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::Net(NetEvent::Prediction(result)));
        });
    }

    pub fn handle_net(&mut self, event: NetEvent) {
        match event {
            NetEvent::Prediction(Ok(score)) => {
                self.predict_busy = false;
                if let Some(input) = self.pending_input.take() {
                    self.history.append(PredictionRecord {
                        input,
                        result: score,
                        timestamp: Utc::now(),
                    });
                    self.refresh_metrics();
                    self.animator.set_target(score, Instant::now());
                    self.display = self.animator.display_state();
                    self.refresh_recommendation();
                    self.form.reset();
                    self.screen = AppScreen::Recommendation;
                }
            }
            NetEvent::Prediction(Err(_)) => {
                self.predict_busy = false;
                self.pending_input = None;
                self.predict_error = Some(PREDICT_FAILED);
            }
            NetEvent::Recommendation { generation, result } => {
                self.recommendation.complete(generation, result);
            }
            NetEvent::ChatReply(result) => {
                self.chat.complete(result);
            }
        }
    }

    // --- Recommendation flow ----------------------------------------------

    pub fn refresh_recommendation(&mut self) {
        if self.history.is_empty() {
            self.recommendation.reset();
            return;
        }
        let generation = self.recommendation.begin_refresh();
        let history = self.history.score_points();
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = api.recommend(&history).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::Net(NetEvent::Recommendation { generation, result }));
        });
    }

    pub fn send_chat(&mut self) {
        // Transcript as it stood before this question; the question itself
        // travels in its own field.
        let transcript = self.chat.turns().to_vec();
        let Some(question) = self.chat.begin_send(self.chat_input.value()) else {
            return;
        };
        self.chat_input.clear();

        let request = ChatRequest {
            history: self.history.score_points(),
            chat_history: transcript,
            question,
        };
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = api.chat(&request).map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::Net(NetEvent::ChatReply(result)));
        });
    }

    // --- History --------------------------------------------------------

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.refresh_metrics();
        self.history_selected = 0;
        self.animator.reset();
        self.display = self.animator.display_state();
        self.recommendation.reset();
    }

    // --- Navigation and settings -----------------------------------------

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.chat_focused = false;
    }

    pub fn go_to_predict(&mut self) {
        self.predict_error = None;
        self.screen = AppScreen::Predict;
    }

    pub fn go_to_history(&mut self) {
        self.history_selected = 0;
        self.history_confirm_clear = false;
        self.screen = AppScreen::History;
    }

    pub fn go_to_recommendation(&mut self) {
        self.refresh_metrics();
        if let Some(last) = self.history.last() {
            self.animator.set_target(last.result, Instant::now());
        }
        self.screen = AppScreen::Recommendation;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.session.dark_mode = dark;
        self.save_session();
        let theme = if dark { Theme::dark() } else { Theme::light() };
        self.theme = Box::leak(Box::new(theme));
    }

    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.session.dark_mode);
    }

    fn save_session(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save(SESSION_SLOT, &self.session);
        }
    }
}
