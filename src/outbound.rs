//! Outbound directives to the server side of the proxy.
//!
//! Blocking a user also engages the game's own ignore feature: the rule
//! asks the host to emit an `IgnoreUser` / `UnignoreUser` packet toward
//! the server. Emission is fire-and-forget; addressing and encoding of the
//! named directive belong to the host.

use std::sync::Arc;

use parking_lot::Mutex;

/// A named server-bound directive with a single string argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Ask the server to ignore a user (mutes speech and trades game-side).
    IgnoreUser(String),
    /// Lift a previous ignore.
    UnignoreUser(String),
}

impl Directive {
    /// Wire name of the directive packet.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IgnoreUser(_) => "IgnoreUser",
            Self::UnignoreUser(_) => "UnignoreUser",
        }
    }

    /// The user-name argument, as typed by the operator.
    pub fn argument(&self) -> &str {
        match self {
            Self::IgnoreUser(name) | Self::UnignoreUser(name) => name,
        }
    }
}

/// Fire-and-forget emission of directives toward the server.
///
/// Delivery failures are the sink's to report; callers never block on
/// delivery.
pub trait OutboundSink {
    /// Queue a directive for sending.
    fn send(&mut self, directive: Directive);
}

/// Sink that discards every directive, for hosts without a server side.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutboundSink for NullSink {
    fn send(&mut self, _directive: Directive) {}
}

/// Sink that buffers directives for later inspection.
///
/// Clones share one buffer, so a host or test can keep a handle while the
/// interception core owns another.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<Directive>>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Directives sent so far, oldest first.
    pub fn sent(&self) -> Vec<Directive> {
        self.sent.lock().clone()
    }

    /// Drain and return the buffered directives.
    pub fn take(&self) -> Vec<Directive> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl OutboundSink for RecordingSink {
    fn send(&mut self, directive: Directive) {
        self.sent.lock().push(directive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_accessors() {
        let d = Directive::IgnoreUser("Alice".to_string());
        assert_eq!(d.name(), "IgnoreUser");
        assert_eq!(d.argument(), "Alice");

        let d = Directive::UnignoreUser("Bob".to_string());
        assert_eq!(d.name(), "UnignoreUser");
        assert_eq!(d.argument(), "Bob");
    }

    #[test]
    fn recording_sink_clones_share_the_buffer() {
        let sink = RecordingSink::new();
        let mut writer = sink.clone();
        writer.send(Directive::IgnoreUser("Alice".to_string()));
        assert_eq!(sink.sent(), vec![Directive::IgnoreUser("Alice".to_string())]);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.sent().is_empty());
    }
}
