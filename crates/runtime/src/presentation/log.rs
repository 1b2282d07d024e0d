use std::collections::VecDeque;

use game_core::MessageTone;

use super::{LogSink, StatusLine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub tone: Option<MessageTone>,
}

/// Bounded log keeping the most recent messages and the latest status.
#[derive(Clone, Debug)]
pub struct MessageLog {
    capacity: usize,
    entries: VecDeque<LogEntry>,
    status: Option<StatusLine>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            status: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages from newest to oldest.
    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl LogSink for MessageLog {
    fn log_message(&mut self, text: &str, tone: Option<MessageTone>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            text: text.to_owned(),
            tone,
        });
    }

    fn write_status(&mut self, status: &StatusLine) {
        self.status = Some(*status);
    }
}
