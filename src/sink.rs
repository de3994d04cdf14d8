/// Result sinks
///
/// Receive newly detected keywords for display. The matcher calls `show`
/// once per keyword per session, in keyword-list order within one `detect`.

use crossbeam_channel::Sender;

/// Display surface for detections
pub trait ResultSink {
    /// Append a newly detected keyword
    fn show(&mut self, keyword: &str);

    /// Remove everything previously shown
    fn clear(&mut self);
}

/// Keeps the displayed keywords in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    shown: Vec<String>,
    clears: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed keywords, oldest first
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// Number of times the display was cleared
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl ResultSink for RecordingSink {
    fn show(&mut self, keyword: &str) {
        self.shown.push(keyword.to_string());
    }

    fn clear(&mut self) {
        self.shown.clear();
        self.clears += 1;
    }
}

/// Writes detections to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ResultSink for LogSink {
    fn show(&mut self, keyword: &str) {
        tracing::info!(keyword, "Keyword detected");
    }

    fn clear(&mut self) {
        tracing::info!("Detected keywords cleared");
    }
}

/// Display events published by `ChannelSink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Detected(String),
    Cleared,
}

/// Forwards display events to another thread
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<SinkEvent>,
}

impl ChannelSink {
    pub fn new(sender: Sender<SinkEvent>) -> Self {
        Self { sender }
    }

    fn publish(&self, event: SinkEvent) {
        // Receiver gone means nobody is displaying; detection carries on
        if self.sender.try_send(event).is_err() {
            tracing::debug!("Result channel closed, dropping display event");
        }
    }
}

impl ResultSink for ChannelSink {
    fn show(&mut self, keyword: &str) {
        self.publish(SinkEvent::Detected(keyword.to_string()));
    }

    fn clear(&mut self) {
        self.publish(SinkEvent::Cleared);
    }
}
