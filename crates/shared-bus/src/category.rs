//! # Message Categories
//!
//! Routing keys of protocol messages. Receivers subscribe per category; the
//! dispatcher never looks past a message's category.

use std::fmt;

/// Protocol purpose of a message.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Connection control (ping, shutdown).
    Control,
    /// Peer exchange and authentication.
    Peer,
    /// Channel proposals and their responses.
    ChannelProposal,
    /// Off-chain state updates.
    ChannelUpdate,
    /// Funding coordination.
    Funding,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Control,
        Category::Peer,
        Category::ChannelProposal,
        Category::ChannelUpdate,
        Category::Funding,
    ];

    /// Stable lowercase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Control => "control",
            Category::Peer => "peer",
            Category::ChannelProposal => "channel_proposal",
            Category::ChannelUpdate => "channel_update",
            Category::Funding => "funding",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message that can be routed by a peer.
pub trait Msg: fmt::Debug + Send + Sync + 'static {
    /// Category the message is dispatched under.
    fn category(&self) -> Category;
}
