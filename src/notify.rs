use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Success,
    Error,
}

impl Variant {
    /// Event name used when a notification is emitted.
    pub fn event_name(&self) -> &'static str {
        match self {
            Variant::Success => "success",
            Variant::Error => "error",
        }
    }
}

/// A user-facing toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: Variant::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            variant: Variant::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == Variant::Error
    }
}

/// Sink for user-facing notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Collects notifications in a shared buffer. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferNotifier {
    buffer: Arc<Mutex<Vec<Notification>>>,
}

impl BufferNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.buffer
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(Notification::is_error)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}

impl Notifier for BufferNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(notification);
        }
    }
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            Variant::Success => log::info!("[{}] {}", notification.title, notification.message),
            Variant::Error => log::warn!("[{}] {}", notification.title, notification.message),
        }
    }
}

/// Emits notifications through an `EventEmitter` under `"success"` / `"error"`.
///
/// Listeners run on the emitter's own threads.
#[cfg(feature = "emitter")]
pub struct EmitterNotifier {
    emitter: Mutex<EventEmitter>,
}

#[cfg(feature = "emitter")]
impl Default for EmitterNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "emitter")]
impl EmitterNotifier {
    pub fn new() -> Self {
        Self {
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Register a listener for one variant.
    pub fn on<F>(&self, variant: Variant, listener: F)
    where
        F: Fn(Notification) + Send + Sync + 'static,
    {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.on(variant.event_name(), listener);
        }
    }
}

#[cfg(feature = "emitter")]
impl Notifier for EmitterNotifier {
    fn notify(&self, notification: Notification) {
        match self.emitter.lock() {
            Ok(mut emitter) => {
                let _ = emitter.emit(notification.variant.event_name(), notification);
            }
            Err(_) => log::warn!("notification emitter poisoned; dropping notification"),
        }
    }
}
