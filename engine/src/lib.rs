//! Card engine for Cupid: session state without terminal dependencies.
//!
//! [`App`] owns the flow state plus everything the screens need around it:
//! the setup form, the highlighted gender, notices, the decline control's
//! hide timer and the background hearts. Frontends feed it input and frame
//! time and read it back to draw.

use std::{
    mem,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::task::JoinHandle;
use url::Url;

pub use cupid_config::{ConfigError, CupidConfig};
pub use cupid_core::{FlowState, Outcome, phrases};
use cupid_notify::EmailJsClient;
pub use cupid_types::{
    ButtonPlacement, FlowStep, Footprint, Gender, Proposal, Viewport,
    ui::{Notice, NoticeKind, UiOptions},
};
use cupid_types::ui::EffectTimer;

mod form;
mod hearts;
mod settings;

pub use form::{FormField, SetupForm, TextField};
pub use hearts::{HEART_COUNT, HEART_STYLES, Heart, Hearts};
pub use settings::{AppSettings, notifier_from_config};

/// How long the decline control stays hidden after it moves.
pub const DECLINE_HIDE: Duration = Duration::from_millis(20);

/// Rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

/// What a pending clipboard write holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    ShareLink,
    ReplyLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardRequest {
    pub target: CopyTarget,
    pub text: String,
}

pub struct App {
    flow: FlowState,
    form: SetupForm,
    gender_highlight: Option<Gender>,
    notice: Option<Notice>,
    /// Running while the decline control is hidden after a move.
    decline_hidden: Option<EffectTimer>,
    hearts: Hearts,
    /// Animation clock for the hearts.
    clock: Duration,
    viewport: Viewport,
    accept_rect: Option<CellRect>,
    decline_rect: Option<CellRect>,
    settings: AppSettings,
    notifier: Option<Arc<EmailJsClient>>,
    notification_task: Option<JoinHandle<()>>,
    clipboard_request: Option<ClipboardRequest>,
    should_quit: bool,
    last_frame: Instant,
}

impl App {
    /// `shared` is whatever the card was opened with, if anything.
    #[must_use]
    pub fn new(settings: AppSettings, shared: Option<&str>) -> Self {
        Self {
            flow: FlowState::initial(shared),
            form: SetupForm::default(),
            gender_highlight: None,
            notice: None,
            decline_hidden: None,
            hearts: Hearts::scatter(HEART_COUNT),
            clock: Duration::ZERO,
            viewport: Viewport::new(80.0, 24.0),
            accept_rect: None,
            decline_rect: None,
            settings,
            notifier: None,
            notification_task: None,
            clipboard_request: None,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: EmailJsClient) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    // ---- read side -------------------------------------------------------

    #[must_use]
    pub fn flow(&self) -> &FlowState {
        &self.flow
    }

    #[must_use]
    pub fn step(&self) -> FlowStep {
        self.flow.step()
    }

    #[must_use]
    pub fn form(&self) -> &SetupForm {
        &self.form
    }

    #[must_use]
    pub fn gender_highlight(&self) -> Option<Gender> {
        self.gender_highlight
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn hearts(&self) -> &Hearts {
        &self.hearts
    }

    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.settings.ui
    }

    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn proposal(&self) -> Option<&Proposal> {
        self.flow.proposal()
    }

    #[must_use]
    pub fn share_link(&self) -> Option<&Url> {
        self.flow.link()
    }

    #[must_use]
    pub fn question(&self) -> Option<String> {
        match &self.flow {
            FlowState::Ask { proposal, .. } => Some(phrases::question(proposal)),
            _ => None,
        }
    }

    #[must_use]
    pub fn decline_label(&self) -> &'static str {
        self.flow.decline_label()
    }

    /// Where the decline control sits, once it has moved at least once.
    #[must_use]
    pub fn decline_placement(&self) -> Option<ButtonPlacement> {
        self.flow.placement()
    }

    /// Size of the decline control for the current viewport.
    #[must_use]
    pub fn decline_footprint(&self) -> Footprint {
        self.settings.evade.footprint(self.viewport)
    }

    #[must_use]
    pub fn decline_visible(&self) -> bool {
        self.step() == FlowStep::Ask
            && self
                .decline_hidden
                .as_ref()
                .is_none_or(EffectTimer::is_finished)
    }

    #[must_use]
    pub fn reply_link(&self) -> Option<Url> {
        self.flow.reply_link(&self.settings.reply_host)
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ---- frame -----------------------------------------------------------

    /// Get elapsed time since last frame and update timing.
    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    /// Advance timers by `delta`.
    pub fn tick(&mut self, delta: Duration) {
        if !self.settings.ui.reduced_motion {
            self.clock = self.clock.saturating_add(delta);
        }

        if let Some(notice) = self.notice.as_mut() {
            notice.advance(delta);
            if notice.is_expired() {
                self.notice = None;
            }
        }

        if let Some(timer) = self.decline_hidden.as_mut() {
            timer.advance(delta);
            if timer.is_finished() {
                self.decline_hidden = None;
            }
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(f64::from(width), f64::from(height));
    }

    /// Record where the answer controls were drawn, for pointer hit tests.
    pub fn set_button_rects(&mut self, accept: Option<CellRect>, decline: Option<CellRect>) {
        self.accept_rect = accept;
        self.decline_rect = decline;
    }

    fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    // ---- setup -----------------------------------------------------------

    /// Mutable access to the form, only while it is on screen.
    pub fn form_mut(&mut self) -> Option<&mut SetupForm> {
        (self.step() == FlowStep::Setup).then_some(&mut self.form)
    }

    pub fn submit_setup(&mut self) {
        if let Some(draft) = self.flow.draft_mut() {
            self.form.fill(draft);
        }
        let transition = mem::take(&mut self.flow).continue_to_gender();
        self.apply(transition.state, transition.outcome);
    }

    // ---- gender ----------------------------------------------------------

    /// Move the highlight between the two choices; the first press picks
    /// the first one.
    pub fn cycle_gender_highlight(&mut self) {
        self.gender_highlight = Some(match self.gender_highlight {
            None | Some(Gender::Female) => Gender::Male,
            Some(Gender::Male) => Gender::Female,
        });
    }

    pub fn set_gender_highlight(&mut self, gender: Gender) {
        self.gender_highlight = Some(gender);
    }

    /// Confirm the highlighted choice. Nothing highlighted trips the guard.
    pub fn confirm_gender(&mut self) {
        self.choose_gender(self.gender_highlight);
    }

    pub fn choose_gender(&mut self, gender: Option<Gender>) {
        if gender.is_some() {
            self.gender_highlight = gender;
        }
        let transition = mem::take(&mut self.flow).choose_gender(gender);
        self.apply(transition.state, transition.outcome);
    }

    /// Back from the gender screen to the form, keeping what was typed.
    pub fn back_to_setup(&mut self) {
        if let FlowState::ChooseGender { draft } = mem::take(&mut self.flow) {
            self.flow = FlowState::Setup { draft };
        } else {
            tracing::debug!("Back ignored outside gender step");
        }
    }

    // ---- link ------------------------------------------------------------

    pub fn generate_link(&mut self) {
        let base = self.settings.base_url.clone();
        let transition = mem::take(&mut self.flow).generate_link(&base);
        self.apply(transition.state, transition.outcome);
    }

    // ---- ask -------------------------------------------------------------

    pub fn accept(&mut self) {
        let transition = mem::take(&mut self.flow).accept();
        self.apply(transition.state, transition.outcome);
    }

    /// Keyboard attempt at the decline control.
    pub fn decline(&mut self) {
        if !self.decline_visible() {
            return;
        }
        let transition = mem::take(&mut self.flow).decline(self.viewport, &self.settings.evade);
        self.apply(transition.state, transition.outcome);
    }

    /// Pointer moved to `(column, row)`.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        if self.decline_rect.is_some_and(|rect| rect.contains(column, row)) {
            self.decline();
        }
    }

    /// Pointer pressed at `(column, row)`.
    pub fn pointer_pressed(&mut self, column: u16, row: u16) {
        if self.step() != FlowStep::Ask {
            return;
        }
        if self.accept_rect.is_some_and(|rect| rect.contains(column, row)) {
            self.accept();
        } else if self.decline_rect.is_some_and(|rect| rect.contains(column, row)) {
            self.decline();
        }
    }

    #[must_use]
    pub fn notification_pending(&self) -> bool {
        self.notification_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Handle of the last acceptance notification, if one was dispatched.
    pub fn take_notification_task(&mut self) -> Option<JoinHandle<()>> {
        self.notification_task.take()
    }

    // ---- celebrate -------------------------------------------------------

    pub fn copy_reply_link(&mut self) {
        match self.reply_link() {
            Some(url) => {
                self.clipboard_request = Some(ClipboardRequest {
                    target: CopyTarget::ReplyLink,
                    text: url.to_string(),
                });
            }
            None => tracing::debug!("No reply link to copy"),
        }
    }

    // ---- clipboard -------------------------------------------------------

    /// Text the frontend should put on the clipboard.
    pub fn take_clipboard_request(&mut self) -> Option<ClipboardRequest> {
        self.clipboard_request.take()
    }

    /// Report how the clipboard write went.
    pub fn clipboard_finished(&mut self, target: CopyTarget, result: Result<(), String>) {
        match result {
            Ok(()) => {
                tracing::debug!(?target, "Copied to clipboard");
                self.set_notice(Notice::success(phrases::LINK_COPIED));
            }
            Err(err) => {
                tracing::warn!(?target, error = %err, "Clipboard write failed");
                self.set_notice(Notice::warning(phrases::COPY_FAILED));
            }
        }
    }

    // ---- transitions -----------------------------------------------------

    fn apply(&mut self, state: FlowState, outcome: Outcome) {
        self.flow = state;
        match outcome {
            Outcome::Advanced => {
                self.notice = None;
                if self.step() == FlowStep::ChooseGender {
                    self.gender_highlight = self.flow.draft().and_then(|draft| draft.gender);
                }
            }
            Outcome::Blocked(reason) => {
                self.set_notice(Notice::warning(phrases::guard_message(reason)));
            }
            Outcome::Ignored => {}
            Outcome::LinkReady(link) => {
                self.clipboard_request = Some(ClipboardRequest {
                    target: CopyTarget::ShareLink,
                    text: link.to_string(),
                });
            }
            Outcome::Evaded { .. } => {
                self.decline_hidden = Some(EffectTimer::new(DECLINE_HIDE));
            }
            Outcome::Accepted { notification } => {
                self.decline_hidden = None;
                self.accept_rect = None;
                self.decline_rect = None;
                match (notification, self.notifier.as_ref()) {
                    (Some(notification), Some(notifier)) => {
                        self.notification_task =
                            Some(cupid_notify::dispatch(Arc::clone(notifier), notification));
                    }
                    (Some(_), None) => {
                        tracing::debug!("Notifications not configured; skipping");
                    }
                    (None, _) => {}
                }
            }
        }
    }
}
