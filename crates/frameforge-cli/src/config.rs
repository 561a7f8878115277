//! TOML configuration: frame map layout and transport selection.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use frameforge_proto::{FieldTag, FrameSchema};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A single schema position, as written in TOML: `"sync"`, `"frame"`,
/// `"checksum"`, `"term"`, or `"user:<id>"` for a caller-defined field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSpec {
    /// `FieldTag::SYNC`.
    Sync,
    /// `FieldTag::FRAME`.
    Frame,
    /// `FieldTag::CHECKSUM`.
    Checksum,
    /// `FieldTag::TERM`.
    Term,
    /// `FieldTag::User(id)`.
    User(i32),
}

/// A `TagSpec` string that doesn't match `sync`, `frame`, `checksum`,
/// `term`, or `user:<id>`.
#[derive(Debug, Error)]
#[error("invalid tag spec {0:?}: expected sync, frame, checksum, term, or user:<id>")]
pub struct TagSpecParseError(String);

impl FromStr for TagSpec {
    type Err = TagSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(Self::Sync),
            "frame" => Ok(Self::Frame),
            "checksum" => Ok(Self::Checksum),
            "term" => Ok(Self::Term),
            _ => s
                .strip_prefix("user:")
                .and_then(|id| id.parse::<i32>().ok())
                .map(Self::User)
                .ok_or_else(|| TagSpecParseError(s.to_string())),
        }
    }
}

impl From<TagSpec> for FieldTag {
    fn from(spec: TagSpec) -> Self {
        match spec {
            TagSpec::Sync => FieldTag::SYNC,
            TagSpec::Frame => FieldTag::FRAME,
            TagSpec::Checksum => FieldTag::CHECKSUM,
            TagSpec::Term => FieldTag::TERM,
            TagSpec::User(id) => FieldTag::User(id),
        }
    }
}

impl<'de> Deserialize<'de> for TagSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagSpecVisitor;
        impl Visitor<'_> for TagSpecVisitor {
            type Value = TagSpec;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a tag spec string, e.g. \"sync\" or \"user:3\"")
            }
            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(de::Error::custom)
            }
        }
        deserializer.deserialize_str(TagSpecVisitor)
    }
}

/// The frame processor's schema configuration: every frame id's field
/// layout plus the sync marker and default frame id.
#[derive(Debug, Deserialize)]
pub struct ProcessorConfig {
    /// Frame id selected when the frame map has only one schema, or used
    /// as the template for sync search before the frame-id byte is known.
    pub default_frame_id: u8,
    /// Raw bytes of the sync marker, as an ASCII string.
    pub sync_value: String,
    /// Frame id to ordered tag sequence.
    pub schemas: BTreeMap<u8, Vec<TagSpec>>,
}

impl ProcessorConfig {
    /// Build the `frameforge-proto` schema map this config describes.
    #[must_use]
    pub fn schema_map(&self) -> BTreeMap<u8, FrameSchema> {
        self.schemas
            .iter()
            .map(|(&id, tags)| (id, FrameSchema::new(tags.iter().map(|&t| t.into()).collect())))
            .collect()
    }
}

/// Which concrete transceiver to drive the processor with.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportConfig {
    /// A serial device.
    Serial {
        /// Device path, e.g. `/dev/ttyUSB0`.
        path: String,
        /// Baud rate.
        baud_rate: u32,
    },
    /// A single bidirectional UDP socket.
    Udp {
        /// Local address to bind.
        local: String,
        /// Peer address to connect to.
        peer: String,
    },
    /// A paired-socket UDP loopback (one socket per direction).
    DualUdp {
        /// Shared address for both sockets.
        address: String,
        /// Local receive port.
        recv_port: u16,
        /// Peer send port.
        send_port: u16,
    },
}

/// The whole `frameforge` TOML document: a `[processor]` table and a
/// `[transport]` table.
#[derive(Debug, Deserialize)]
pub struct FrameforgeConfig {
    /// Frame map and sync configuration.
    pub processor: ProcessorConfig,
    /// Which transceiver to drive the processor with.
    pub transport: TransportConfig,
}

impl FrameforgeConfig {
    /// Parse a complete configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_builtin_and_user_tags() {
        assert_eq!("sync".parse::<TagSpec>().unwrap(), TagSpec::Sync);
        assert_eq!("user:7".parse::<TagSpec>().unwrap(), TagSpec::User(7));
        assert!("nonsense".parse::<TagSpec>().is_err());
    }

    #[test]
    fn deserializes_full_document() {
        let text = r#"
            [processor]
            default_frame_id = 0
            sync_value = "A"

            [processor.schemas]
            0 = ["sync", "user:1", "user:2", "user:3"]

            [transport]
            kind = "udp"
            local = "127.0.0.1:9000"
            peer = "127.0.0.1:9001"
        "#;

        let doc = FrameforgeConfig::from_toml_str(text).unwrap();
        assert_eq!(doc.processor.default_frame_id, 0);
        assert!(matches!(doc.transport, TransportConfig::Udp { .. }));
        assert_eq!(doc.processor.schema_map().len(), 1);
    }
}
