use std::time::Duration;

use strum_macros::{Display, EnumIter};

use postline_utils::constants::{ERROR_NOTIFICATION_DURATION_MS, SUCCESS_NOTIFICATION_DURATION_MS};

#[derive(Clone, Copy, Debug, Display, EnumIter, Hash, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
}

/// A single notification slot, a new message replaces the previous one
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationChannel {
    pub message: String,
    pub is_visible: bool,
    generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notifications {
    pub error: NotificationChannel,
    pub success: NotificationChannel,
}

impl NotificationKind {
    pub fn auto_hide_duration(&self) -> Duration {
        match self {
            NotificationKind::Error => Duration::from_millis(ERROR_NOTIFICATION_DURATION_MS),
            NotificationKind::Success => Duration::from_millis(SUCCESS_NOTIFICATION_DURATION_MS),
        }
    }

    pub fn alert_class(&self) -> &'static str {
        match self {
            NotificationKind::Error => "alert-error",
            NotificationKind::Success => "alert-success",
        }
    }
}

impl NotificationChannel {
    /// Displays `message` and returns the generation to pass to [`NotificationChannel::expire`]
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.message = message.into();
        self.is_visible = true;
        self.generation += 1;
        self.generation
    }

    pub fn dismiss(&mut self) {
        self.is_visible = false;
    }

    /// Hides the message shown with `generation`, returns false if it was already replaced
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation == generation {
            self.is_visible = false;
            true
        } else {
            false
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Notifications {
    pub fn channel(&self, kind: NotificationKind) -> &NotificationChannel {
        match kind {
            NotificationKind::Error => &self.error,
            NotificationKind::Success => &self.success,
        }
    }

    pub fn channel_mut(&mut self, kind: NotificationKind) -> &mut NotificationChannel {
        match kind {
            NotificationKind::Error => &mut self.error,
            NotificationKind::Success => &mut self.success,
        }
    }

    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.channel_mut(kind).show(message)
    }
}
