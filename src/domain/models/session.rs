use super::Message;

/// Identity of a chat thread. Threads are never removed, so the creation
/// position stays valid for the lifetime of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThreadId(usize);

impl ThreadId {
    pub(crate) fn new(index: usize) -> ThreadId {
        return ThreadId(index);
    }

    pub fn index(&self) -> usize {
        return self.0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatThread {
    pub title: String,
    messages: Vec<Message>,
    // Send position of each entry in `messages`, kept sorted.
    positions: Vec<usize>,
    sent: usize,
}

impl ChatThread {
    pub fn new(title: &str) -> ChatThread {
        return ChatThread {
            title: title.to_string(),
            messages: vec![],
            positions: vec![],
            sent: 0,
        };
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    /// Claims the next send position in this thread.
    pub fn next_position(&mut self) -> usize {
        let position = self.sent;
        self.sent += 1;
        return position;
    }

    /// Places a completed message by its send position, so the thread reads
    /// in the order questions were asked even when answers arrive out of
    /// order.
    pub fn insert(&mut self, position: usize, message: Message) {
        let idx = self.positions.partition_point(|sent| return *sent < position);
        self.positions.insert(idx, position);
        self.messages.insert(idx, message);
    }
}

/// All chat threads for the running client, plus the active one.
#[derive(Debug, Default)]
pub struct Session {
    pub threads: Vec<ChatThread>,
    pub active: Option<ThreadId>,
}

/// A question that has been sent and is waiting for its response. The target
/// thread and the position within it are fixed when the question is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingQuery {
    pub thread: ThreadId,
    pub position: usize,
    pub query: String,
}
