//! Curves: named collections of transform channels.

use crate::channel::Channel;
use crate::group::{ChannelGroup, ChannelName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How much of a channel group a curve defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupPresence {
    /// No channel of the group is present.
    Absent,
    /// Some but not all channels are present.
    Partial,
    /// Every channel of the group is present.
    Complete,
}

/// An animation set: up to thirteen transform channels.
///
/// A curve is owned by the scene and may be referenced by several objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    #[serde(default)]
    channels: BTreeMap<ChannelName, Channel>,
}

impl Curve {
    /// Creates a curve with no channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a channel.
    pub fn with_channel(mut self, name: ChannelName, channel: Channel) -> Self {
        self.channels.insert(name, channel);
        self
    }

    /// Returns the channel, if present.
    pub fn channel(&self, name: ChannelName) -> Option<&Channel> {
        self.channels.get(&name)
    }

    /// Returns the channel mutably, if present.
    pub fn channel_mut(&mut self, name: ChannelName) -> Option<&mut Channel> {
        self.channels.get_mut(&name)
    }

    /// Returns true if the channel is present.
    pub fn has_channel(&self, name: ChannelName) -> bool {
        self.channels.contains_key(&name)
    }

    /// Sets a channel, returning the one it replaced.
    pub fn set_channel(&mut self, name: ChannelName, channel: Channel) -> Option<Channel> {
        self.channels.insert(name, channel)
    }

    /// Removes a channel, returning it.
    pub fn remove_channel(&mut self, name: ChannelName) -> Option<Channel> {
        self.channels.remove(&name)
    }

    /// Iterates over present channels in canonical order.
    pub fn channels(&self) -> impl Iterator<Item = (ChannelName, &Channel)> {
        self.channels.iter().map(|(name, channel)| (*name, channel))
    }

    /// Returns true if any transform channel is present.
    pub fn is_animated(&self) -> bool {
        !self.channels.is_empty()
    }

    /// Returns the group's present channels in canonical order.
    pub fn present_in(&self, group: ChannelGroup) -> Vec<(ChannelName, &Channel)> {
        group
            .channels()
            .iter()
            .filter_map(|&name| self.channel(name).map(|channel| (name, channel)))
            .collect()
    }

    /// Classifies how much of the group this curve defines.
    pub fn presence(&self, group: ChannelGroup) -> GroupPresence {
        let present = group
            .channels()
            .iter()
            .filter(|&&name| self.has_channel(name))
            .count();
        if present == 0 {
            GroupPresence::Absent
        } else if present == group.channels().len() {
            GroupPresence::Complete
        } else {
            GroupPresence::Partial
        }
    }
}
