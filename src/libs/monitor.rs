//! The watcher: keyboard activity in, status line and notifications out.
//!
//! A dedicated thread runs the blocking `rdev` listener and forwards every
//! editing keystroke over a channel. The async loop multiplexes:
//!
//! - keystrokes, evaluated as [`Trigger::Typing`];
//! - answers to notification questions ([`FollowUp`]);
//! - the 30 s evaluation tick ([`Trigger::Timer`]);
//! - a 1 s housekeeping tick: countdown display, inbox commands and
//!   configuration reloads;
//! - the 500 ms animation tick;
//! - the shutdown signal, after which today's stats are flushed.
//!
//! The whole desktop is the observed window, so focus is always reported.

use crate::db::inbox::Inbox;
use crate::db::kv::SqliteStore;
use crate::libs::config::Config;
use crate::libs::engine::{EditReason, Engine, FollowUp, Intent, Notice, Question, Trigger};
use crate::libs::messages::Message;
use crate::libs::phrases;
use crate::libs::report;
use crate::libs::store::StoreError;
use crate::libs::surface::{follow_up_for, DesktopNotifier, Notifier, Presenter};
use crate::libs::time_of_day::Moment;
use crate::{msg_debug, msg_error, msg_info, msg_warning};
use anyhow::Result;
use parking_lot::Mutex;
use rdev::{listen, Event, EventType, Key};
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Duration, MissedTickBehavior};

const EVALUATION_INTERVAL: Duration = Duration::from_secs(30);
const HOUSEKEEPING_INTERVAL: Duration = Duration::from_secs(1);
const ANIMATION_INTERVAL: Duration = Duration::from_millis(500);
/// Key events seen this long after an undo starts are the undo itself.
const UNDO_WINDOW: Duration = Duration::from_millis(300);
const FOCUSED: bool = true;

pub struct Monitor {
    engine: Engine<SqliteStore>,
    presenter: Presenter<Stdout>,
    notifier: Arc<dyn Notifier>,
    inbox: Inbox,
    config_modified: Option<SystemTime>,
    synthetic_until: Arc<Mutex<Option<Instant>>>,
    follow_up_tx: mpsc::UnboundedSender<FollowUp>,
    follow_up_rx: Option<mpsc::UnboundedReceiver<FollowUp>>,
}

impl Monitor {
    pub fn new() -> Result<Self> {
        let config = Config::read()?;
        let engine = Engine::new(config, SqliteStore::new()?, Moment::now())?;
        let (follow_up_tx, follow_up_rx) = mpsc::unbounded_channel();
        Ok(Self {
            engine,
            presenter: Presenter::stdout(),
            notifier: Arc::new(DesktopNotifier),
            inbox: Inbox::new()?,
            config_modified: Config::modified(),
            synthetic_until: Arc::new(Mutex::new(None)),
            follow_up_tx,
            follow_up_rx: Some(follow_up_rx),
        })
    }

    pub async fn run(&mut self, mut shutdown: oneshot::Receiver<()>) -> Result<()> {
        let config = self.engine.config();
        msg_info!(Message::MonitorStarted {
            work_start: config.work_start.to_string(),
            work_end: config.work_end.to_string(),
        });

        let mut typing_rx = self.spawn_listener();
        let mut follow_up_rx = self.follow_up_rx.take().unwrap_or_else(|| {
            let (tx, rx) = mpsc::unbounded_channel();
            self.follow_up_tx = tx;
            rx
        });

        let mut evaluation = time::interval_at(time::Instant::now() + EVALUATION_INTERVAL, EVALUATION_INTERVAL);
        let mut housekeeping = time::interval(HOUSEKEEPING_INTERVAL);
        let mut animation = time::interval(ANIMATION_INTERVAL);
        for interval in [&mut evaluation, &mut housekeeping, &mut animation] {
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        }

        let activation = self.engine.activate(Moment::now(), FOCUSED);
        self.handle(activation);

        loop {
            tokio::select! {
                Some(reason) = typing_rx.recv() => {
                    let result = self.engine.evaluate(Trigger::Typing(reason), Moment::now(), FOCUSED);
                    self.handle(result);
                }
                Some(follow_up) = follow_up_rx.recv() => {
                    msg_debug!(format!("follow-up: {:?}", follow_up));
                    let result = self.engine.resolve(follow_up, Moment::now(), FOCUSED);
                    self.handle(result);
                }
                _ = evaluation.tick() => {
                    let result = self.engine.evaluate(Trigger::Timer, Moment::now(), FOCUSED);
                    self.handle(result);
                }
                _ = housekeeping.tick() => self.housekeeping(),
                _ = animation.tick() => self.presenter.animation_tick(),
                _ = &mut shutdown => {
                    msg_info!(Message::MonitorShuttingDown);
                    break;
                }
            }
        }

        self.presenter.stop_all();
        let now = Moment::now();
        self.engine.shutdown(now)?;
        msg_debug!(Message::StatsFlushed(now.date_key()));
        Ok(())
    }

    /// Starts the keyboard listener thread. The listener is restarted after
    /// errors, once per second.
    fn spawn_listener(&self) -> mpsc::UnboundedReceiver<EditReason> {
        let (tx, rx) = mpsc::unbounded_channel();
        let synthetic_until = self.synthetic_until.clone();
        std::thread::spawn(move || loop {
            let tx = tx.clone();
            let synthetic_until = synthetic_until.clone();
            let result = listen(move |event: Event| {
                if let EventType::KeyPress(key) = event.event_type {
                    if !is_edit_key(key) {
                        return;
                    }
                    let until = *synthetic_until.lock();
                    let synthetic = until.is_some_and(|until| Instant::now() < until);
                    let reason = if synthetic { EditReason::Programmatic } else { EditReason::User };
                    let _ = tx.send(reason);
                }
            });
            match result {
                Ok(()) => break,
                Err(e) => {
                    msg_warning!(Message::KeyboardListenFailed(format!("{:?}", e)));
                    std::thread::sleep(std::time::Duration::from_secs(1));
                }
            }
        });
        rx
    }

    fn housekeeping(&mut self) {
        self.presenter.countdown_tick(&Moment::now());
        self.drain_inbox();
        self.reload_config();
    }

    fn drain_inbox(&mut self) {
        let commands = match self.inbox.drain() {
            Ok(commands) => commands,
            Err(e) => {
                msg_error!(Message::EvaluationFailed(e.to_string()));
                return;
            }
        };
        for command in commands {
            msg_debug!(format!("inbox command: {:?}", command));
            let result = self.engine.apply(command, Moment::now(), FOCUSED);
            self.handle(result);
        }
    }

    fn reload_config(&mut self) {
        let modified = Config::modified();
        if modified == self.config_modified {
            return;
        }
        self.config_modified = modified;
        match Config::read() {
            Ok(config) if &config == self.engine.config() => {}
            Ok(config) => {
                msg_info!(Message::ConfigReloaded);
                let result = self.engine.reconfigure(config, Moment::now(), FOCUSED);
                self.handle(result);
            }
            Err(e) => msg_warning!(Message::ConfigReloadFailed(e.to_string())),
        }
    }

    fn handle(&mut self, result: Result<Vec<Intent>, StoreError>) {
        match result {
            Ok(intents) => {
                for intent in intents {
                    self.dispatch(intent);
                }
            }
            Err(e) => msg_error!(Message::EvaluationFailed(e.to_string())),
        }
    }

    fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::SetStatus(status) => self.presenter.show(phrases::status_line(status)),
            Intent::ShowSnoozed { until_ms } => {
                self.presenter.stop_all();
                self.presenter.show(phrases::snoozed_line(until_ms));
            }
            Intent::ShowPaused => {
                self.presenter.stop_all();
                self.presenter.show(phrases::paused_line());
            }
            Intent::IdleStatus { animate } => self.presenter.show_idle(animate),
            Intent::StopAnimation => self.presenter.stop_animation(),
            Intent::StartCountdown { until } => self.presenter.start_countdown(until, &Moment::now()),
            Intent::StopCountdown => self.presenter.stop_countdown(),
            Intent::Notify(notice) => self.notify(notice),
            Intent::Ask(question) => self.ask(question),
            Intent::Undo => self.undo(),
            Intent::SnoozedContext(snoozed) => msg_debug!(format!("snoozed context: {}", snoozed)),
            Intent::RefreshReport => self.refresh_report(),
            Intent::OpenReport => self.open_report(),
        }
    }

    fn notify(&self, notice: Notice) {
        let notifier = self.notifier.clone();
        let text = phrases::notice_text(&notice);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = notifier.notify(&text) {
                msg_warning!(Message::NotificationFailed(e.to_string()));
            }
        });
    }

    fn ask(&self, question: Question) {
        let notifier = self.notifier.clone();
        let tx = self.follow_up_tx.clone();
        tokio::task::spawn_blocking(move || {
            let text = phrases::question_text(&question);
            // A question that could not be shown counts as dismissed, so the
            // engine does not wait on it forever.
            let answer = notifier.ask(&text, phrases::question_actions(&question)).unwrap_or_else(|e| {
                msg_warning!(Message::NotificationFailed(e.to_string()));
                None
            });
            let _ = tx.send(follow_up_for(&question, answer));
        });
    }

    fn undo(&self) {
        let synthetic_until = self.synthetic_until.clone();
        tokio::task::spawn_blocking(move || {
            *synthetic_until.lock() = Some(Instant::now() + UNDO_WINDOW);
            if let Err(e) = simulate_undo() {
                msg_warning!(Message::UndoSimulationFailed(e));
            }
        });
    }

    fn refresh_report(&self) {
        match report::is_open(self.engine.store()) {
            Ok(true) => {
                if let Err(e) = report::write_report(&self.engine.snapshot(Moment::now())) {
                    msg_warning!(Message::EvaluationFailed(e.to_string()));
                }
            }
            Ok(false) => {}
            Err(e) => msg_warning!(Message::EvaluationFailed(e.to_string())),
        }
    }

    fn open_report(&mut self) {
        let opened = report::write_report(&self.engine.snapshot(Moment::now()));
        match opened {
            Ok(path) => {
                msg_info!(Message::ReportWritten(path.display().to_string()));
                if let Err(e) = report::open_in_browser(&path) {
                    msg_warning!(Message::ReportOpenFailed(e.to_string()));
                }
            }
            Err(e) => msg_warning!(Message::EvaluationFailed(e.to_string())),
        }
    }
}

/// Keys that edit text. Bare modifiers and navigation do not count as
/// typing.
pub fn is_edit_key(key: Key) -> bool {
    !matches!(
        key,
        Key::ShiftLeft
            | Key::ShiftRight
            | Key::ControlLeft
            | Key::ControlRight
            | Key::Alt
            | Key::AltGr
            | Key::MetaLeft
            | Key::MetaRight
            | Key::CapsLock
            | Key::Escape
            | Key::UpArrow
            | Key::DownArrow
            | Key::LeftArrow
            | Key::RightArrow
            | Key::PageUp
            | Key::PageDown
            | Key::Home
            | Key::End
    )
}

#[cfg(target_os = "macos")]
const UNDO_MODIFIER: Key = Key::MetaLeft;
#[cfg(not(target_os = "macos"))]
const UNDO_MODIFIER: Key = Key::ControlLeft;

/// Sends the platform undo shortcut to the focused window.
fn simulate_undo() -> std::result::Result<(), String> {
    let sequence = [
        EventType::KeyPress(UNDO_MODIFIER),
        EventType::KeyPress(Key::KeyZ),
        EventType::KeyRelease(Key::KeyZ),
        EventType::KeyRelease(UNDO_MODIFIER),
    ];
    for event in &sequence {
        rdev::simulate(event).map_err(|e| format!("{:?}", e))?;
        // Some platforms drop events sent back to back.
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
    Ok(())
}
