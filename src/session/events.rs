//! Change notifications for the UI layer

use super::progress::ProgressTrack;

/// Simple value holders on `SessionState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CurrentPage,
    ShowNumericPad,
    NumericPadContext,
    LastEnteredCardNumber,
    IsMuted,
    IsMusicPlaying,
    CurrentMusic,
    PenaltySecs,
}

impl Field {
    /// JS-side field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CurrentPage => "currentPage",
            Field::ShowNumericPad => "showNumericPad",
            Field::NumericPadContext => "numericPadContext",
            Field::LastEnteredCardNumber => "lastEnteredCardNumber",
            Field::IsMuted => "isMuted",
            Field::IsMusicPlaying => "isMusicPlaying",
            Field::CurrentMusic => "currentMusic",
            Field::PenaltySecs => "penalty",
        }
    }
}

/// Something observable changed on the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TimerStarted,
    TimerStopped,
    /// One second elapsed
    Tick { time_left: u32 },
    /// Countdown reached zero
    TimeExpired,
    PenaltyApplied { deducted: u32, time_left: u32 },
    Reset,
    /// Persisted values were loaded into the session
    Restored,
    ProgressRecorded {
        track: ProgressTrack,
        card: u32,
        index: u32,
    },
    WireCut(String),
    FieldChanged(Field),
}

impl SessionEvent {
    /// Short name used by the JS bridge
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::TimerStarted => "timerStarted",
            SessionEvent::TimerStopped => "timerStopped",
            SessionEvent::Tick { .. } => "tick",
            SessionEvent::TimeExpired => "timeExpired",
            SessionEvent::PenaltyApplied { .. } => "penaltyApplied",
            SessionEvent::Reset => "reset",
            SessionEvent::Restored => "restored",
            SessionEvent::ProgressRecorded { .. } => "progressRecorded",
            SessionEvent::WireCut(_) => "wireCut",
            SessionEvent::FieldChanged(field) => field.as_str(),
        }
    }
}

/// Callback registered through `SessionState::subscribe`
pub type Listener = Box<dyn FnMut(&SessionEvent)>;
