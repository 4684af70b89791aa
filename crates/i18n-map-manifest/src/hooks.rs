//! Host lifecycle events that trigger map generation
//!
//! Composer runs `post-install-cmd` after `composer install` and
//! `post-update-cmd` after `composer update`. Both regenerate the map.

use crate::errors::ManifestError;
use crate::generator::{generate_manifest, GenerateOutcome, GenerateRequest};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    PostInstall,
    PostUpdate,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 2] = [LifecycleEvent::PostInstall, LifecycleEvent::PostUpdate];

    /// The host's script event name
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleEvent::PostInstall => "post-install-cmd",
            LifecycleEvent::PostUpdate => "post-update-cmd",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| ManifestError::UnknownEvent(s.to_string()))
    }
}

pub type EventHandler = fn(&GenerateRequest<'_>) -> Result<GenerateOutcome, ManifestError>;

/// The events this tool listens to and the handler each one runs
pub fn subscribed_events() -> [(LifecycleEvent, EventHandler); 2] {
    [
        (
            LifecycleEvent::PostInstall,
            generate_manifest as EventHandler,
        ),
        (LifecycleEvent::PostUpdate, generate_manifest as EventHandler),
    ]
}

/// Run the handler subscribed to `event`
pub fn dispatch(
    event: LifecycleEvent,
    request: &GenerateRequest<'_>,
) -> Result<GenerateOutcome, ManifestError> {
    let handler = subscribed_events()
        .into_iter()
        .find_map(|(subscribed, handler)| (subscribed == event).then_some(handler))
        .ok_or_else(|| ManifestError::UnknownEvent(event.to_string()))?;
    handler(request)
}
