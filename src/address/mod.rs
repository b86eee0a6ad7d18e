// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;
use std::str::FromStr;

use cid::Cid;
use fvm_ipld_encoding::{BytesDe, BytesSer, RawBytes};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::utils::encoding::blake2b_256_parts;

/// Length of an address payload in bytes.
pub const PAYLOAD_LEN: usize = 32;

/// Workchain prefix used in the textual form.
const WORKCHAIN_PREFIX: &str = "0:";

const WALLET_DOMAIN: &[u8] = b"wallet/";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("invalid address length {0}, expected 32 bytes")]
    InvalidLength(usize),
    #[error("invalid address encoding: {0}")]
    InvalidEncoding(#[from] hex::FromHexError),
}

/// Content-derived identifier of an actor.
///
/// Actor addresses are `blake2b-256(code || constructor params)`; the same
/// actor kind with the same constructor parameters always lands on the same
/// address, which is the only way actors discover each other.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; PAYLOAD_LEN]);

impl Address {
    /// Derives the address of an actor from its code identifier and encoded constructor parameters.
    pub fn new_actor(code: &Cid, data: &[u8]) -> Self {
        Self(blake2b_256_parts(&[&code.to_bytes(), data]))
    }

    /// Address of an external wallet, keyed by a human readable name.
    pub fn new_wallet(name: &str) -> Self {
        Self(blake2b_256_parts(&[WALLET_DOMAIN, name.as_bytes()]))
    }

    pub fn payload(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// Short form used in log lines.
    pub fn short(&self) -> String {
        let hex = hex::encode(&self.0[..4]);
        format!("{WORKCHAIN_PREFIX}{hex}..")
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{WORKCHAIN_PREFIX}{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(WORKCHAIN_PREFIX).unwrap_or(s);
        let bytes = hex::decode(s)?;
        let payload: [u8; PAYLOAD_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::InvalidLength(bytes.len()))?;
        Ok(Self(payload))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            BytesSer(&self.0).serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        } else {
            let BytesDe(bytes) = BytesDe::deserialize(deserializer)?;
            let payload: [u8; PAYLOAD_LEN] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| de::Error::custom(Error::InvalidLength(bytes.len())))?;
            Ok(Self(payload))
        }
    }
}

/// Everything needed to deploy an actor: its code and its encoded constructor parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateInit {
    pub code: Cid,
    pub data: RawBytes,
}

impl StateInit {
    pub fn new<P: Serialize + ?Sized>(
        code: Cid,
        params: &P,
    ) -> Result<Self, fvm_ipld_encoding::Error> {
        Ok(Self {
            code,
            data: RawBytes::serialize(params)?,
        })
    }

    /// The address this descriptor deploys to.
    pub fn address(&self) -> Address {
        Address::new_actor(&self.code, self.data.bytes())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Address {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut payload = [0u8; PAYLOAD_LEN];
        for b in payload.iter_mut() {
            *b = u8::arbitrary(g);
        }
        Self(payload)
    }
}
