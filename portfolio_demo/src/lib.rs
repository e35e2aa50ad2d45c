use std::{net::IpAddr, sync::LazyLock};

use chrono::{DateTime, TimeZone, Utc};
use portfolio_models::Sha256Hash;

pub mod contact;

pub const CLIENT_IP: &str = "192.0.2.1";

/// sha256 of [`CLIENT_IP`]
pub const CLIENT_IP_HASH_HEX: &str =
    "37fcff24bf62035b2b08020afc08b4fecd4fcffce57ab23518e3561ff0fe76b9";

pub static CLIENT_IP_HASH: LazyLock<Sha256Hash> =
    LazyLock::new(|| Sha256Hash(hex::decode(CLIENT_IP_HASH_HEX).unwrap().try_into().unwrap()));

pub static CLIENT_ADDR: LazyLock<IpAddr> = LazyLock::new(|| CLIENT_IP.parse().unwrap());

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap());
