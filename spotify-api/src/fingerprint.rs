//! Browser and device fingerprint constants.
//!
//! The web player endpoints gate on header plausibility, so every request
//! pretends to come from desktop Chrome on Windows. When Spotify starts
//! rejecting these, this file is the one to update.

/// User agent for resource calls (the authenticated session).
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// User agent for the token exchange requests.
pub const BOOTSTRAP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

pub const SEC_CH_UA: &str = r#""Not.A/Brand";v="8", "Chromium";v="114", "Google Chrome";v="114""#;
pub const SEC_CH_UA_MOBILE: &str = "?0";
pub const SEC_CH_UA_PLATFORM: &str = r#""Windows""#;
pub const ACCEPT_LANGUAGE: &str = "en,en-US;q=0.9,en-IN;q=0.8";

/// `accept` sent to the identity endpoint, which is a document navigation.
pub const ACCEPT_DOCUMENT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
    image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

pub const ORIGIN: &str = "https://open.spotify.com";
pub const REFERER: &str = "https://open.spotify.com/";

/// Web player build reported to the client-token endpoint.
pub const CLIENT_VERSION: &str = "1.2.16.562.g2a214ff8";

/// Synthetic "computer" device registered with the client-token endpoint.
pub struct DeviceFingerprint {
    pub brand: &'static str,
    pub model: &'static str,
    pub os: &'static str,
    pub os_version: &'static str,
    pub device_id: &'static str,
    pub device_type: &'static str,
}

pub const COMPUTER: DeviceFingerprint = DeviceFingerprint {
    brand: "unknown",
    model: "unknown",
    os: "windows",
    os_version: "NT 10.0",
    device_id: "00000000000000000000000000000000",
    device_type: "computer",
};

/// Connect-state dealer connection id presented when listing devices.
pub const CONNECTION_ID: &str = "Y2FlODljOGUtNDA3Zi00ZTQ2LTk3YjItMDZhYmJlNzA4OWMxK2RlYWxlcit0Y3A6\
Ly9nYWUyLWRlYWxlci1hLWxjcHMuZ2FlMi5zcG90aWZ5Lm5ldDo1NzAwK0M3QUYyRUNBNUFBNDEwN0ZEQTExODVD\
MTRGNDhGOTA0NjIxNDc5MDA0RTM4NDBDQjI3RTI0QzdDN0UxMEI3QkM=";

/// Hidden observer device used for the connect-state devices call.
pub const OBSERVER_DEVICE: &str = "hobs_1244c7ff01cd7cfcab51e39d2fb5573e71b";
