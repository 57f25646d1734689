//! Connect-state player APIs.
//!
//! [`devices`](SpotifyClient::devices) registers a hidden observer device
//! and reads back the account's connect state:
//!
//! `PUT connect /connect-state/v1/devices/{observer}`
//!
//! Every player command is then posted to the target device (the active
//! one, else the first listed) as
//!
//! `POST connect /connect-state/v1/player/command/from/{device}/to/{device}`
//!
//! ```json
//! { "command": { "endpoint": "seek_to", "value": 90 } }
//! ```
//!
//! Each command reads the connect state first, so the device is chosen
//! from fresh data.

use serde_json::{Value, json};
use tracing::debug;

use crate::auth::Overlay;
use crate::client::SpotifyClient;
use crate::error::{Result, SpotifyError};
use crate::fingerprint::OBSERVER_DEVICE;
use crate::locator::{ResourceKind, resource_id};
use crate::types::{DeviceInfo, PlayerAction};
use crate::util::time_to_seconds;

impl SpotifyClient {
    /// Devices and player state of the account.
    pub fn devices(&self) -> Result<DeviceInfo> {
        let body = json!({
            "member_type": "CONNECT_STATE",
            "device": {
                "device_info": {
                    "capabilities": {
                        "can_be_player": false,
                        "hidden": true,
                        "needs_full_player_state": true,
                    },
                },
            },
        });
        let raw = self.put_json(
            &format!(
                "{}/connect-state/v1/devices/{OBSERVER_DEVICE}",
                self.endpoints().connect
            ),
            &body,
            &[Overlay::ConnectionId],
            "error retrieving device info, check response format",
        )?;
        Ok(DeviceInfo::from_value(raw))
    }

    pub fn add_to_queue(&self, track: &str) -> Result<Value> {
        let id = resource_id(track)?;
        self.player_command(
            &self.devices()?,
            json!({
                "track": {
                    "uri": ResourceKind::Track.uri(id),
                    "metadata": { "is_queued": "true" },
                    "provider": "queue",
                },
                "endpoint": "add_to_queue",
            }),
            "error adding track to queue, check track URL or response format",
        )
    }

    /// Play or pause, skipping to `track`.
    pub fn manage_player(&self, track: &str, action: PlayerAction) -> Result<Value> {
        let id = resource_id(track)?;
        self.skip_to(&self.devices()?, id, action)
    }

    /// Resume the current context.
    pub fn play(&self) -> Result<Value> {
        self.current_context_command(PlayerAction::Play)
    }

    /// Pause the current context.
    pub fn pause(&self) -> Result<Value> {
        self.current_context_command(PlayerAction::Pause)
    }

    /// Seek to an `mm:ss` position.
    pub fn seek(&self, position: &str) -> Result<Value> {
        let seconds = time_to_seconds(position)?;
        self.player_command(
            &self.devices()?,
            json!({ "value": seconds, "endpoint": "seek_to" }),
            "error seeking player, check position or response format",
        )
    }

    /// Repeat the current context.
    pub fn enable_repeat(&self) -> Result<Value> {
        self.repeat(true, false, "error enabling repeat on player, check response format")
    }

    /// Repeat the current track.
    pub fn enable_repeat_one(&self) -> Result<Value> {
        self.repeat(
            true,
            true,
            "error enabling repeat of the current track on player, check response format",
        )
    }

    pub fn disable_repeat(&self) -> Result<Value> {
        self.repeat(false, false, "error disabling repeat on player, check response format")
    }

    pub fn enable_shuffle(&self) -> Result<Value> {
        self.shuffle(true, "error enabling shuffle on player, check response format")
    }

    pub fn disable_shuffle(&self) -> Result<Value> {
        self.shuffle(false, "error disabling shuffle on player, check response format")
    }

    fn current_context_command(&self, action: PlayerAction) -> Result<Value> {
        let devices = self.devices()?;
        let id = devices
            .currently_playing_id
            .clone()
            .ok_or_else(|| SpotifyError::NotFound("nothing is currently playing".into()))?;
        self.skip_to(&devices, &id, action)
    }

    fn skip_to(&self, devices: &DeviceInfo, id: &str, action: PlayerAction) -> Result<Value> {
        self.player_command(
            devices,
            json!({
                "options": {
                    "license": "on-demand",
                    "skip_to": { "track_index": 0, "track_uri": ResourceKind::Track.uri(id) },
                    "player_options_override": {},
                },
                "endpoint": action.endpoint(),
            }),
            &format!(
                "error sending {} to player, check track URL or response format",
                action.endpoint()
            ),
        )
    }

    fn repeat(&self, context_repeat: bool, track_repeat: bool, context: &str) -> Result<Value> {
        self.player_command(
            &self.devices()?,
            json!({
                "repeating_context": context_repeat,
                "repeating_track": track_repeat,
                "endpoint": "set_options",
            }),
            context,
        )
    }

    fn shuffle(&self, enabled: bool, context: &str) -> Result<Value> {
        self.player_command(
            &self.devices()?,
            json!({ "value": enabled, "endpoint": "set_shuffling_context" }),
            context,
        )
    }

    fn player_command(&self, devices: &DeviceInfo, command: Value, context: &str) -> Result<Value> {
        let device = devices.target_device_id()?;
        let endpoint = command["endpoint"].as_str().unwrap_or_default();
        debug!(%device, endpoint, "player command");
        self.post_json(
            &format!(
                "{}/connect-state/v1/player/command/from/{device}/to/{device}",
                self.endpoints().connect
            ),
            &json!({ "command": command }),
            &[],
            context,
        )
    }
}
