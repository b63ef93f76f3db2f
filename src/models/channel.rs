//! Relay channels and the fixed-size table that owns them.

/// One physical relay output plus its identifying metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Position in the channel table, assigned at construction.
    pub index: usize,
    /// Output line handed to the GPIO backend.
    pub line: u32,
    /// Physical header pin label, written as the subject of state rows.
    pub label: u32,
    /// Room name, matched against the subject of rows read back from the log.
    pub room: String,
    /// Whether the relay is currently driven high.
    pub is_on: bool,
}

/// Ordered set of channels. Room names and output lines are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelTable {
    channels: Vec<Channel>,
}

impl ChannelTable {
    /// Build a table from `(room, line, label)` triples, all channels off.
    ///
    /// Uniqueness is enforced by `Config::validate`; this constructor trusts
    /// its input.
    pub fn new<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32, u32)>,
        S: Into<String>,
    {
        let channels = specs
            .into_iter()
            .enumerate()
            .map(|(index, (room, line, label))| Channel {
                index,
                line,
                label,
                room: room.into(),
                is_on: false,
            })
            .collect();
        Self { channels }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Channel> {
        self.channels.get_mut(index)
    }

    /// First channel, ascending index, whose room name equals `room`.
    pub fn find_by_room(&self, room: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.room == room)
    }

    /// First channel, ascending index, that is currently on.
    pub fn first_active(&self) -> Option<&Channel> {
        self.channels.iter().find(|c| c.is_on)
    }

    /// Indices of all channels currently on.
    pub fn active_indices(&self) -> Vec<usize> {
        self.channels
            .iter()
            .filter(|c| c.is_on)
            .map(|c| c.index)
            .collect()
    }
}
