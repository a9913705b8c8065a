//! The call console state machine.

use crate::error::ConsoleError;
use crate::session::{SessionCallbacks, SessionDriver};
use crate::starter::CallStarter;
use dialect_types::{
    is_e164, CallMedium, DemoConfig, Speaker, TelephonyMediumConfig, TranscriptEntry,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How long a telephony call shows as dialing before the console
/// optimistically resets. There is no real completion signal from the
/// bridged leg; a completion webhook could call `finish_dialing` instead.
const DEFAULT_DIAL_RESET_DELAY: Duration = Duration::from_secs(3);

const STATUS_OFF: &str = "off";
const STATUS_STARTING: &str = "Starting call...";
const STATUS_ENDING: &str = "Ending call...";
const STATUS_ENDED: &str = "Call ended successfully";
const STATUS_DIALING: &str = "Phone call initiated";
const STATUS_READY_AGAIN: &str = "Ready to start a new call";
const STATUS_INVALID_NUMBER: &str =
    "Please enter a valid phone number in E.164 format (e.g., +1234567890)";

/// Lifecycle phase of the console.
///
/// Telephony calls never enter `Active` locally — the session library only
/// connects for the web medium, so a bridged call sits in `Dialing` until
/// the optimistic reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallPhase {
    #[default]
    Idle,
    Starting,
    Active,
    Dialing,
}

/// Which medium the user has selected for the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallType {
    #[default]
    Web,
    Phone,
}

#[derive(Debug)]
struct ConsoleState {
    phase: CallPhase,
    status: String,
    transcript: Vec<TranscriptEntry>,
    /// Bumped on every transcript change; the UI scrolls the transcript
    /// view to its end whenever it observes a new revision.
    transcript_rev: u64,
    debug_messages: Vec<Value>,
    /// Key forcing a re-render of the dependent profile-display component.
    profile_key: Option<String>,
    call_type: CallType,
    phone_number: String,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            phase: CallPhase::Idle,
            status: STATUS_OFF.to_string(),
            transcript: Vec::new(),
            transcript_rev: 0,
            debug_messages: Vec::new(),
            profile_key: None,
            call_type: CallType::Web,
            phone_number: String::new(),
        }
    }
}

/// The call console.
///
/// All state mutation happens under a brief synchronous lock that never
/// spans an `.await` point, so session callbacks can be applied from any
/// task without blocking or racing destructively: last-write-wins for
/// status, wholesale replacement for the transcript, append for debug.
pub struct CallConsole<G, S> {
    state: Arc<Mutex<ConsoleState>>,
    starter: G,
    session: S,
    demo: DemoConfig,
    dial_reset_delay: Duration,
}

impl<G: CallStarter, S: SessionDriver> CallConsole<G, S> {
    pub fn new(starter: G, session: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(ConsoleState::default())),
            starter,
            session,
            demo: DemoConfig::default(),
            dial_reset_delay: DEFAULT_DIAL_RESET_DELAY,
        }
    }

    pub fn with_demo_config(mut self, demo: DemoConfig) -> Self {
        self.demo = demo;
        self
    }

    pub fn with_dial_reset_delay(mut self, delay: Duration) -> Self {
        self.dial_reset_delay = delay;
        self
    }

    /// Starts a call from the demo template with the selected medium.
    ///
    /// Failures never propagate: they land in the status label and the
    /// console returns to `Idle`.
    pub async fn start(&self, model_override: Option<&str>, show_debug: bool) {
        let (call_type, phone_number, call_key) = {
            let mut state = lock(&self.state);
            if state.phase != CallPhase::Idle {
                tracing::debug!(phase = ?state.phase, "ignoring start while a call is underway");
                return;
            }
            if state.call_type == CallType::Phone && !is_e164(&state.phone_number) {
                state.status = STATUS_INVALID_NUMBER.to_string();
                return;
            }

            state.phase = CallPhase::Starting;
            state.status = STATUS_STARTING.to_string();
            state.transcript.clear();
            state.transcript_rev += 1;
            state.debug_messages.clear();

            // Fresh correlation key: re-keys the profile display and ties
            // the created profile back to this call downstream.
            let call_key = format!("call-{}", chrono::Utc::now().timestamp_millis());
            state.profile_key = Some(call_key.clone());

            (state.call_type, state.phone_number.clone(), call_key)
        };

        let mut config = self.demo.call_config.clone();
        if let Some(model) = model_override {
            config.model = model.to_string();
        }
        config.medium = match call_type {
            CallType::Web => None,
            CallType::Phone => Some(CallMedium::Telephony {
                config: TelephonyMediumConfig {
                    phone_number,
                },
            }),
        };
        config.set_correlation_id(&call_key);

        let result = match self.starter.start_call(&config).await {
            Ok(result) => result,
            Err(e) => {
                let mut state = lock(&self.state);
                state.phase = CallPhase::Idle;
                state.status = format!("Error starting call: {e}");
                return;
            }
        };

        match call_type {
            CallType::Web => self.attach_session(&result, show_debug).await,
            CallType::Phone => self.begin_dialing(),
        }
    }

    /// Joins the returned session and goes `Active`.
    async fn attach_session(&self, result: &Value, show_debug: bool) {
        let Some(join_url) = result.get("joinUrl").and_then(Value::as_str) else {
            let mut state = lock(&self.state);
            state.phase = CallPhase::Idle;
            state.status = "Error starting call: response has no joinUrl".to_string();
            return;
        };

        let callbacks = Self::callbacks(self.state.clone());
        match self.session.join(join_url, show_debug, callbacks).await {
            Ok(()) => {
                lock(&self.state).phase = CallPhase::Active;
            }
            Err(e) => {
                let mut state = lock(&self.state);
                state.phase = CallPhase::Idle;
                state.status = format!("Error starting call: {e}");
            }
        }
    }

    /// Enters `Dialing` and schedules the optimistic reset.
    fn begin_dialing(&self) {
        {
            let mut state = lock(&self.state);
            state.phase = CallPhase::Dialing;
            state.status = STATUS_DIALING.to_string();
        }

        let state = self.state.clone();
        let delay = self.dial_reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            finish_dialing(&state);
        });
    }

    /// Completes the dialing phase: back to `Idle`, phone number cleared.
    ///
    /// Normally driven by the dial-reset timer; exposed so a real telephony
    /// completion signal can drive it instead.
    pub fn finish_dialing(&self) {
        finish_dialing(&self.state);
    }

    /// Ends the current call.
    ///
    /// Web calls tear down the live session; the phase, active flag, and
    /// profile key are reset regardless of what the teardown reports.
    pub async fn end(&self) {
        let call_type = {
            let mut state = lock(&self.state);
            state.status = STATUS_ENDING.to_string();
            state.call_type
        };

        let leave_error: Option<ConsoleError> = if call_type == CallType::Web {
            self.session.leave().await.err()
        } else {
            None
        };

        let mut state = lock(&self.state);
        state.phase = CallPhase::Idle;
        state.profile_key = None;
        state.status = match leave_error {
            Some(e) => format!("Error ending call: {e}"),
            None => STATUS_ENDED.to_string(),
        };
    }

    fn callbacks(state: Arc<Mutex<ConsoleState>>) -> SessionCallbacks {
        let status_state = state.clone();
        let transcript_state = state.clone();
        let debug_state = state;

        SessionCallbacks {
            on_status: Box::new(move |status| {
                lock(&status_state).status = status.unwrap_or_else(|| STATUS_OFF.to_string());
            }),
            on_transcript: Box::new(move |entries| {
                let mut state = lock(&transcript_state);
                state.transcript = entries;
                state.transcript_rev += 1;
            }),
            on_debug: Box::new(move |message| {
                lock(&debug_state).debug_messages.push(message);
            }),
        }
    }

    // --- accessors the UI renders from ---

    pub fn phase(&self) -> CallPhase {
        lock(&self.state).phase
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).phase == CallPhase::Active
    }

    pub fn status(&self) -> String {
        lock(&self.state).status.clone()
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        lock(&self.state).transcript.clone()
    }

    /// Transcript entries the UI should render. When user transcripts are
    /// disabled only agent utterances are shown.
    pub fn visible_entries(&self, show_user: bool) -> Vec<TranscriptEntry> {
        lock(&self.state)
            .transcript
            .iter()
            .filter(|entry| show_user || entry.speaker == Speaker::Agent)
            .cloned()
            .collect()
    }

    /// Current transcript revision. The UI scrolls its transcript view to
    /// the end whenever this advances.
    pub fn transcript_revision(&self) -> u64 {
        lock(&self.state).transcript_rev
    }

    pub fn debug_messages(&self) -> Vec<Value> {
        lock(&self.state).debug_messages.clone()
    }

    pub fn profile_key(&self) -> Option<String> {
        lock(&self.state).profile_key.clone()
    }

    pub fn set_call_type(&self, call_type: CallType) {
        lock(&self.state).call_type = call_type;
    }

    pub fn set_phone_number(&self, number: impl Into<String>) {
        lock(&self.state).phone_number = number.into();
    }

    pub fn phone_number(&self) -> String {
        lock(&self.state).phone_number.clone()
    }
}

fn finish_dialing(state: &Mutex<ConsoleState>) {
    let mut state = lock_ref(state);
    if state.phase == CallPhase::Dialing {
        state.phase = CallPhase::Idle;
        state.phone_number.clear();
        state.status = STATUS_READY_AGAIN.to_string();
    }
}

fn lock(state: &Arc<Mutex<ConsoleState>>) -> MutexGuard<'_, ConsoleState> {
    lock_ref(state)
}

fn lock_ref(state: &Mutex<ConsoleState>) -> MutexGuard<'_, ConsoleState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
