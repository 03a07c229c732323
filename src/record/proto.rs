//! Wire messages for the inner vault record

use prost::Message;

/// Serialized vault record
#[derive(Clone, PartialEq, Message)]
pub struct VaultMessage {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub public_key_ecdsa: String,
    #[prost(string, tag = "3")]
    pub public_key_eddsa: String,
    #[prost(string, repeated, tag = "4")]
    pub signers: Vec<String>,
    #[prost(message, optional, tag = "5")]
    pub created_at: Option<TimestampMessage>,
    #[prost(string, tag = "6")]
    pub hex_chain_code: String,
    #[prost(message, repeated, tag = "7")]
    pub key_shares: Vec<KeyShareMessage>,
    #[prost(string, tag = "8")]
    pub local_party_id: String,
    #[prost(string, tag = "9")]
    pub reshare_prefix: String,
    /// 0 = GG20, 1 = DKLS
    #[prost(int32, tag = "10")]
    pub lib_type: i32,
}

/// One party's key share
#[derive(Clone, PartialEq, Message)]
pub struct KeyShareMessage {
    #[prost(string, tag = "1")]
    pub public_key: String,
    #[prost(string, tag = "2")]
    pub keyshare: String,
}

/// `google.protobuf.Timestamp`
#[derive(Clone, Copy, PartialEq, Message)]
pub struct TimestampMessage {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}
