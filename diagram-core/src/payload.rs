//! Drag payload channels and their JSON codec.
//!
//! A drag gesture carries its payload in a [`DataTransfer`]: a map from a
//! channel name to text, as the host's drag data store does. Each transfer
//! protocol writes to its own named channel so a drop handler can tell a new
//! placement from a reposition without guessing.
//!
//! Payload text crosses a trust boundary. Decoding never panics and returns a
//! [`PayloadError`] for anything that is missing or does not have the
//! expected shape.

use std::collections::HashMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CanvasItem, ComponentItem};

/// Named slot in a drag payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// A template dragged from the palette.
    Component,
    /// A placed item being repositioned.
    Move,
}

impl Channel {
    /// Channel name as used in the host drag data store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Move => "move",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "component" => Ok(Self::Component),
            "move" => Ok(Self::Move),
            other => Err(PayloadError::UnknownChannel(other.to_string())),
        }
    }
}

/// Why a payload could not be read.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Nothing was written to the channel.
    #[error("no data on channel '{0}'")]
    Missing(Channel),

    /// The channel text is not valid JSON for the expected entity.
    #[error("malformed payload on channel '{channel}': {source}")]
    Malformed {
        /// Channel that was read.
        channel: Channel,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A channel name no protocol uses.
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),
}

/// Per-gesture drag data, keyed by channel name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataTransfer {
    entries: HashMap<String, String>,
}

impl DataTransfer {
    /// Create an empty transfer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write raw text under an arbitrary name, replacing any previous value.
    pub fn set_data(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(name.into(), text.into());
    }

    /// Read raw text by name. Empty text reads as absent, as in the host.
    #[must_use]
    pub fn get_data(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Protocol channels that carry data. Other names are skipped.
    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.entries
            .iter()
            .filter(|(_, text)| !text.is_empty())
            .filter_map(|(name, _)| name.parse::<Channel>().ok())
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serialize `value` as JSON onto `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn put<T: Serialize>(&mut self, channel: Channel, value: &T) -> serde_json::Result<()> {
        let text = serde_json::to_string(value)?;
        self.set_data(channel.as_str(), text);
        Ok(())
    }

    /// Decode the JSON on `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Missing`] if the channel is empty and
    /// [`PayloadError::Malformed`] if the text does not decode as `T`.
    pub fn take<T: DeserializeOwned>(&self, channel: Channel) -> Result<T, PayloadError> {
        let text = self
            .get_data(channel.as_str())
            .ok_or(PayloadError::Missing(channel))?;
        decode(channel, text)
    }

    /// Put a template on the placement channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be serialized.
    pub fn put_template(&mut self, template: &ComponentItem) -> serde_json::Result<()> {
        self.put(Channel::Component, template)
    }

    /// Put an item's current state on the reposition channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the item cannot be serialized.
    pub fn put_item(&mut self, item: &CanvasItem) -> serde_json::Result<()> {
        self.put(Channel::Move, item)
    }

    /// Read the template from the placement channel.
    ///
    /// # Errors
    ///
    /// See [`DataTransfer::take`].
    pub fn template(&self) -> Result<ComponentItem, PayloadError> {
        self.take(Channel::Component)
    }

    /// Read the item from the reposition channel.
    ///
    /// # Errors
    ///
    /// See [`DataTransfer::take`].
    pub fn item(&self) -> Result<CanvasItem, PayloadError> {
        self.take(Channel::Move)
    }
}

/// Decode payload text read from `channel`.
///
/// # Errors
///
/// Returns [`PayloadError::Malformed`] if the text does not decode as `T`.
pub fn decode<T: DeserializeOwned>(channel: Channel, text: &str) -> Result<T, PayloadError> {
    serde_json::from_str(text).map_err(|source| PayloadError::Malformed { channel, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemId;

    fn resistor() -> ComponentItem {
        ComponentItem::new("Resistor", "passive", "Resistor")
            .with_images("r.png", "r.svg")
            .with_args(vec![serde_json::json!(220), serde_json::json!("ohm")])
    }

    #[test]
    fn channels_are_independent() {
        let mut transfer = DataTransfer::new();
        transfer.put_template(&resistor()).expect("should encode");
        assert_eq!(
            transfer.channels().collect::<Vec<_>>(),
            vec![Channel::Component]
        );
        assert!(matches!(
            transfer.item(),
            Err(PayloadError::Missing(Channel::Move))
        ));
        assert_eq!(transfer.template().expect("should decode"), resistor());
    }

    #[test]
    fn item_payload_keeps_arg_order() {
        let item = CanvasItem::from_template(resistor(), ItemId::new(3), 12.0, 8.0);
        let mut transfer = DataTransfer::new();
        transfer.put_item(&item).expect("should encode");
        let decoded = transfer.item().expect("should decode");
        assert_eq!(decoded.template.args, item.template.args);
        assert_eq!(decoded.id, ItemId::new(3));
    }

    #[test]
    fn malformed_text_is_reported() {
        let mut transfer = DataTransfer::new();
        transfer.set_data("component", "{ not json");
        assert!(matches!(
            transfer.template(),
            Err(PayloadError::Malformed {
                channel: Channel::Component,
                ..
            })
        ));
    }

    #[test]
    fn wrong_shape_is_reported() {
        let mut transfer = DataTransfer::new();
        transfer.set_data("move", r#"{"id":"seven","x":1}"#);
        assert!(matches!(
            transfer.item(),
            Err(PayloadError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_text_reads_as_missing() {
        let mut transfer = DataTransfer::new();
        transfer.set_data("component", "");
        assert!(matches!(
            transfer.template(),
            Err(PayloadError::Missing(Channel::Component))
        ));
    }

    #[test]
    fn channels_lists_only_protocol_names() {
        let mut transfer = DataTransfer::new();
        transfer.set_data("text/plain", "hello");
        transfer.set_data("component", "");
        assert_eq!(transfer.channels().count(), 0);

        transfer.set_data("move", "{}");
        assert_eq!(transfer.channels().collect::<Vec<_>>(), vec![Channel::Move]);
    }

    #[test]
    fn channel_names_parse() {
        assert_eq!("move".parse::<Channel>().ok(), Some(Channel::Move));
        assert_eq!(Channel::Component.to_string(), "component");
        assert!(matches!(
            "text/plain".parse::<Channel>(),
            Err(PayloadError::UnknownChannel(ref name)) if name == "text/plain"
        ));
    }
}
