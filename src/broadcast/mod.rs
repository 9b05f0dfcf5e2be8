//! In-process pub/sub fan-out for the `locations` and `donations`
//! channels.
//!
//! Delivery is best-effort broadcast: every current subscriber of a
//! channel receives each published event, a subscriber that connects
//! after an event was published never sees it, and a receiver that falls
//! more than the channel capacity behind loses the oldest events. The
//! registry is injected into services rather than reached as a global.

use tokio::sync::broadcast::{self, Receiver, Sender};

use crate::model::event::{Channel, Event};

const CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct ChannelRegistry {
    locations: Sender<Event>,
    donations: Sender<Event>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        let (locations, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (donations, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            locations,
            donations,
        }
    }

    fn sender(&self, channel: Channel) -> &Sender<Event> {
        match channel {
            Channel::Locations => &self.locations,
            Channel::Donations => &self.donations,
        }
    }

    /// Joins a channel. The receiver only observes events published after
    /// this call; there is no replay or backlog.
    pub fn subscribe(&self, channel: Channel) -> Receiver<Event> {
        self.sender(channel).subscribe()
    }

    /// Fans an event out to every current subscriber of the channel.
    /// Returns how many receivers the event reached; zero means the event
    /// was dropped, which is an accepted loss.
    pub fn publish(&self, channel: Channel, event: Event) -> usize {
        self.sender(channel).send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.sender(channel).receiver_count()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
