//! Pub/sub router: channel and pattern subscriptions, and message fan-out.
//!
//! Each subscriber is registered with the sending half of its client's inbox. Publishing pushes
//! one frame per matching subscription into those inboxes and counts how many were delivered.
//! A subscriber whose client has gone away is dropped on the next delivery attempt.

use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc::UnboundedSender;

use crate::db::ClientId;
use crate::frame::Frame;
use crate::glob;

type Subscribers = HashMap<ClientId, UnboundedSender<Frame>>;

#[derive(Debug, Default)]
pub struct PubSub {
    channels: BTreeMap<Bytes, Subscribers>,
    patterns: BTreeMap<Bytes, Subscribers>,
}

impl PubSub {
    /// Returns true when the client was not already subscribed.
    pub fn subscribe(&mut self, channel: Bytes, client: ClientId, tx: UnboundedSender<Frame>) -> bool {
        subscribe_to(&mut self.channels, channel, client, tx)
    }

    pub fn unsubscribe(&mut self, channel: &[u8], client: &ClientId) -> bool {
        unsubscribe_from(&mut self.channels, channel, client)
    }

    pub fn psubscribe(&mut self, pattern: Bytes, client: ClientId, tx: UnboundedSender<Frame>) -> bool {
        subscribe_to(&mut self.patterns, pattern, client, tx)
    }

    pub fn punsubscribe(&mut self, pattern: &[u8], client: &ClientId) -> bool {
        unsubscribe_from(&mut self.patterns, pattern, client)
    }

    /// Channels the client is subscribed to, in byte order.
    pub fn channels_of(&self, client: &ClientId) -> Vec<Bytes> {
        subscribed_by(&self.channels, client)
    }

    pub fn patterns_of(&self, client: &ClientId) -> Vec<Bytes> {
        subscribed_by(&self.patterns, client)
    }

    /// Delivers `message` to every exact subscriber of `channel` and to every pattern subscriber
    /// whose pattern matches it. Returns how many deliveries were made.
    pub fn publish(&mut self, channel: &Bytes, message: &Bytes) -> usize {
        let mut count = 0;

        if let Some(subscribers) = self.channels.get_mut(channel) {
            let frame = Frame::array_of_bulks([
                Bytes::from_static(b"message"),
                channel.clone(),
                message.clone(),
            ]);
            count += deliver(subscribers, &frame);
            if subscribers.is_empty() {
                self.channels.remove(channel);
            }
        }

        let mut emptied = Vec::new();
        for (pattern, subscribers) in self.patterns.iter_mut() {
            if !glob::matches(pattern, channel) {
                continue;
            }
            let frame = Frame::array_of_bulks([
                Bytes::from_static(b"pmessage"),
                pattern.clone(),
                channel.clone(),
                message.clone(),
            ]);
            count += deliver(subscribers, &frame);
            if subscribers.is_empty() {
                emptied.push(pattern.clone());
            }
        }
        for pattern in emptied {
            self.patterns.remove(&pattern);
        }

        count
    }

    /// Active channels, optionally filtered by a glob pattern. Used by PUBSUB CHANNELS.
    pub fn channel_names(&self, pattern: Option<&[u8]>) -> Vec<Bytes> {
        self.channels
            .keys()
            .filter(|name| pattern.map_or(true, |pattern| glob::matches(pattern, name)))
            .cloned()
            .collect()
    }

    /// Number of subscribers of a channel. Used by PUBSUB NUMSUB.
    pub fn numsub(&self, channel: &[u8]) -> usize {
        self.channels.get(channel).map_or(0, |subscribers| subscribers.len())
    }

    /// Number of distinct patterns with at least one subscriber. Used by PUBSUB NUMPAT.
    pub fn numpat(&self) -> usize {
        self.patterns.len()
    }

    /// Forgets a client entirely, as on disconnect.
    pub fn remove_client(&mut self, client: &ClientId) {
        for map in [&mut self.channels, &mut self.patterns] {
            map.retain(|_, subscribers| {
                subscribers.remove(client);
                !subscribers.is_empty()
            });
        }
    }
}

fn subscribe_to(
    map: &mut BTreeMap<Bytes, Subscribers>,
    key: Bytes,
    client: ClientId,
    tx: UnboundedSender<Frame>,
) -> bool {
    map.entry(key).or_default().insert(client, tx).is_none()
}

fn unsubscribe_from(map: &mut BTreeMap<Bytes, Subscribers>, key: &[u8], client: &ClientId) -> bool {
    let Some(subscribers) = map.get_mut(key) else {
        return false;
    };
    let removed = subscribers.remove(client).is_some();
    if subscribers.is_empty() {
        map.remove(key);
    }
    removed
}

fn subscribed_by(map: &BTreeMap<Bytes, Subscribers>, client: &ClientId) -> Vec<Bytes> {
    map.iter()
        .filter(|(_, subscribers)| subscribers.contains_key(client))
        .map(|(key, _)| key.clone())
        .collect()
}

// Sends to every subscriber, dropping the ones whose inbox is closed.
fn deliver(subscribers: &mut Subscribers, frame: &Frame) -> usize {
    let mut delivered = 0;
    subscribers.retain(|_, tx| {
        let sent = tx.send(frame.clone()).is_ok();
        if sent {
            delivered += 1;
        }
        sent
    });
    delivered
}
