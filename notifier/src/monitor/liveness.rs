//! In-memory liveness bookkeeping for the notify-once policy.

use std::collections::HashMap;

use twitch_client::ChannelId;

/// Known state of a channel.
///
/// A channel only ever moves `NotLive -> Live`; nothing moves it back
/// until the store is re-initialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LivenessState {
    #[default]
    NotLive,
    Live,
}

/// Channel -> liveness mapping owned by the polling engine.
#[derive(Debug, Default)]
pub struct LivenessStore {
    /// Configured channels in load order, without duplicates.
    order: Vec<ChannelId>,
    states: HashMap<ChannelId, LivenessState>,
}

impl LivenessStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with `NotLive` for the given channels.
    pub fn initialize(&mut self, channels: &[ChannelId]) {
        self.order.clear();
        self.states.clear();
        for channel in channels {
            if self
                .states
                .insert(channel.clone(), LivenessState::NotLive)
                .is_none()
            {
                self.order.push(channel.clone());
            }
        }
    }

    /// Unknown channels read as `NotLive`.
    pub fn get(&self, channel: &ChannelId) -> LivenessState {
        self.states.get(channel).copied().unwrap_or_default()
    }

    pub fn is_live(&self, channel: &ChannelId) -> bool {
        self.get(channel) == LivenessState::Live
    }

    /// Mark a channel live. Returns `true` only for an actual transition.
    pub fn set_live(&mut self, channel: &ChannelId) -> bool {
        match self.states.get_mut(channel) {
            Some(LivenessState::Live) => false,
            Some(state) => {
                *state = LivenessState::Live;
                true
            }
            None => {
                self.order.push(channel.clone());
                self.states.insert(channel.clone(), LivenessState::Live);
                true
            }
        }
    }

    /// Those of `channels` still waiting to go live, in the given order.
    pub fn pending(&self, channels: &[ChannelId]) -> Vec<ChannelId> {
        channels
            .iter()
            .filter(|c| !self.is_live(c))
            .cloned()
            .collect()
    }

    pub fn channels(&self) -> &[ChannelId] {
        &self.order
    }

    pub fn live_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == LivenessState::Live)
            .count()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
