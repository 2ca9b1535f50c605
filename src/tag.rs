//! Tag vocabulary for dump log records
//!
//! Every logged byte sequence is attributed to one of eight tags: a side
//! (local or remote) crossed with one of four pipeline channels. The tag
//! set is closed; lines carrying anything else are not records.

use std::fmt;
use std::str::FromStr;

/// Vantage point a channel was logged from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Local,
    Remote,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Local => "l",
            Side::Remote => "r",
        }
    }
}

/// Pipeline stage a byte sequence was captured at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Plaintext queued for encryption
    ToEncrypt,
    /// Ciphertext produced by the encoder
    Encrypted,
    /// Ciphertext queued for decryption
    ToDecrypt,
    /// Plaintext produced by the decoder
    Decrypted,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::ToEncrypt => "toenc",
            Channel::Encrypted => "enc-d",
            Channel::ToDecrypt => "todec",
            Channel::Decrypted => "dec-d",
        }
    }
}

/// One of the eight (side, channel) stream identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub side: Side,
    pub channel: Channel,
}

impl Tag {
    pub const fn new(side: Side, channel: Channel) -> Self {
        Tag { side, channel }
    }

    /// All eight tags, in stream-index order
    pub const ALL: [Tag; 8] = [
        Tag::new(Side::Local, Channel::ToEncrypt),
        Tag::new(Side::Local, Channel::Encrypted),
        Tag::new(Side::Local, Channel::ToDecrypt),
        Tag::new(Side::Local, Channel::Decrypted),
        Tag::new(Side::Remote, Channel::ToEncrypt),
        Tag::new(Side::Remote, Channel::Encrypted),
        Tag::new(Side::Remote, Channel::ToDecrypt),
        Tag::new(Side::Remote, Channel::Decrypted),
    ];

    /// Stable index into per-tag storage, matching the order of `ALL`
    pub fn index(self) -> usize {
        let side = match self.side {
            Side::Local => 0,
            Side::Remote => 4,
        };
        let channel = match self.channel {
            Channel::ToEncrypt => 0,
            Channel::Encrypted => 1,
            Channel::ToDecrypt => 2,
            Channel::Decrypted => 3,
        };
        side + channel
    }

    /// Parse the two colon-separated fields of a tag (`"l"`, `"toenc"`)
    pub fn from_fields(side: &str, channel: &str) -> Option<Tag> {
        let side = match side {
            "l" => Side::Local,
            "r" => Side::Remote,
            _ => return None,
        };
        let channel = match channel {
            "toenc" => Channel::ToEncrypt,
            "enc-d" => Channel::Encrypted,
            "todec" => Channel::ToDecrypt,
            "dec-d" => Channel::Decrypted,
            _ => return None,
        };
        Some(Tag { side, channel })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side.as_str(), self.channel.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownTag;

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, channel) = s.split_once(':').ok_or(UnknownTag)?;
        Tag::from_fields(side, channel).ok_or(UnknownTag)
    }
}

/// The four stream pairings expected to carry identical bytes under correct
/// protocol behavior: what one side queued for encryption must equal what the
/// other side got out of decryption, and the ciphertext seen leaving one side
/// must equal the ciphertext queued on the other.
pub const PAIRINGS: [(Tag, Tag); 4] = [
    (
        Tag::new(Side::Local, Channel::ToEncrypt),
        Tag::new(Side::Remote, Channel::Decrypted),
    ),
    (
        Tag::new(Side::Local, Channel::Encrypted),
        Tag::new(Side::Remote, Channel::ToDecrypt),
    ),
    (
        Tag::new(Side::Local, Channel::ToDecrypt),
        Tag::new(Side::Remote, Channel::Encrypted),
    ),
    (
        Tag::new(Side::Local, Channel::Decrypted),
        Tag::new(Side::Remote, Channel::ToEncrypt),
    ),
];
