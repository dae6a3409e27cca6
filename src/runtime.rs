// Fixed-rate bridge between Zenoh and the simulator side channel
// Each tick: encode pending command requests, parse pending controller
// records, then publish health.

use std::time::{Duration, Instant};

use bytes::Bytes;
use serde_json::Value;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::attributes::{AttrError, ControllerState, Kwargs, SimCommand};
use crate::config::Args;
use crate::messages::{CommandRejected, RuntimeHealth};
use crate::side_channel::IncomingMessage;

/// Error types for the bridge runtime
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Zenoh error: {0}")]
    Zenoh(zenoh::Error),
}

impl From<zenoh::Error> for RuntimeError {
    fn from(e: zenoh::Error) -> Self {
        Self::Zenoh(e)
    }
}

pub struct Runtime {
    state_timeout: Duration,
    state_received_at: Instant,
    latest_state: Option<ControllerState>,
    desync: bool,
    health: RuntimeHealth,
}

impl Runtime {
    pub fn new(state_timeout: Duration) -> Self {
        Self {
            state_timeout,
            state_received_at: Instant::now(),
            latest_state: None,
            desync: false,
            health: RuntimeHealth::StateStale, // Start stale until first record
        }
    }

    /// Turn a JSON command request into an encoded side-channel message
    pub fn on_command(&self, payload: &[u8]) -> Result<(SimCommand, Bytes), CommandRejected> {
        let request: Kwargs = serde_json::from_slice(payload).map_err(|e| CommandRejected {
            command: None,
            reason: format!("Request is not a JSON object: {}", e),
        })?;
        let name = request
            .get("command")
            .and_then(Value::as_str)
            .map(str::to_string);

        let encoded = SimCommand::from_request(request)
            .and_then(|cmd| cmd.to_message().map(|msg| (cmd, msg.into_bytes())));

        match encoded {
            Ok((cmd, bytes)) => {
                info!("Encoded {} for object {}", cmd.name(), cmd.id());
                Ok((cmd, bytes))
            }
            Err(e) => Err(CommandRejected {
                command: name,
                reason: e.to_string(),
            }),
        }
    }

    /// Parse a controller record pushed by the simulator
    pub fn on_state(&mut self, payload: Bytes) -> Result<&ControllerState, AttrError> {
        let mut msg = IncomingMessage::new(payload);
        match ControllerState::parse(&mut msg) {
            Ok(state) => {
                if msg.remaining() > 0 {
                    debug!("{} trailing bytes after controller record", msg.remaining());
                }
                self.desync = false;
                self.state_received_at = Instant::now();
                Ok(&*self.latest_state.insert(state))
            }
            Err(e) => {
                self.desync = true;
                Err(e)
            }
        }
    }

    /// Update health from the age and decodability of the last record
    pub fn compute_health(&mut self) -> RuntimeHealth {
        let state_age = self.state_received_at.elapsed();

        let health = if self.desync {
            RuntimeHealth::Desync
        } else if self.latest_state.is_none() || state_age > self.state_timeout {
            RuntimeHealth::StateStale
        } else {
            RuntimeHealth::Ok
        };

        if health != self.health {
            match health {
                RuntimeHealth::Ok => info!("Controller state flowing"),
                RuntimeHealth::StateStale => warn!("Controller state stale ({:?} old)", state_age),
                RuntimeHealth::Desync => warn!("Controller record could not be decoded"),
            }
        }
        self.health = health;
        health
    }

    pub fn latest_state(&self) -> Option<&ControllerState> {
        self.latest_state.as_ref()
    }
}

pub async fn run(args: Args) -> Result<(), RuntimeError> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let sub_cmd = session.declare_subscriber(args.cmd_topic.as_str()).await?;
    let sub_channel_in = session.declare_subscriber(args.channel_in_topic.as_str()).await?;
    let pub_channel_out = session.declare_publisher(args.channel_out_topic.as_str()).await?;
    let pub_rejected = session.declare_publisher(args.rejected_topic.as_str()).await?;
    let pub_state = session.declare_publisher(args.state_topic.as_str()).await?;
    let pub_health = session.declare_publisher(args.health_topic.as_str()).await?;

    let mut runtime = Runtime::new(args.state_timeout());
    let mut tick = interval(args.tick_period());

    info!(
        "Runtime started: {}Hz loop, {}ms state timeout",
        args.loop_hz, args.state_timeout_ms
    );
    info!("Subscribed to: {}, {}", args.cmd_topic, args.channel_in_topic);
    info!(
        "Publishing to: {}, {}, {}",
        args.channel_out_topic, args.state_topic, args.health_topic
    );

    loop {
        tick.tick().await;

        // 1. Drain all pending command requests, in arrival order
        while let Ok(Some(sample)) = sub_cmd.try_recv() {
            let payload = sample.payload().to_bytes();
            match runtime.on_command(&payload) {
                Ok((_, bytes)) => pub_channel_out.put(bytes.to_vec()).await?,
                Err(rejected) => {
                    warn!("Rejected command {:?}: {}", rejected.command, rejected.reason);
                    pub_rejected.put(serde_json::to_string(&rejected)?).await?;
                }
            }
        }

        // 2. Drain controller records, publish each decoded state
        while let Ok(Some(sample)) = sub_channel_in.try_recv() {
            let payload = Bytes::from(sample.payload().to_bytes().into_owned());
            match runtime.on_state(payload) {
                Ok(state) => {
                    let state_json = serde_json::to_string(state)?;
                    pub_state.put(state_json).await?;
                }
                Err(e) => warn!("Failed to parse controller record: {}", e),
            }
        }

        // 3. Publish health
        let health_json = serde_json::to_string(&runtime.compute_health())?;
        pub_health.put(health_json).await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::controller::SetJointPosition;
    use crate::attributes::Command;
    use crate::side_channel::OutgoingMessage;

    fn controller_record(quaternion: &[f32]) -> Bytes {
        let mut msg = OutgoingMessage::new();
        msg.write_string("ur5");
        for _ in 0..(3 + 3 + 4 + 3 + 3 + 4) {
            msg.write_float32(0.0);
        }
        msg.write_float32_list(&[]);
        msg.write_int32(1);
        msg.write_float32_list(&[0.0, 0.0, 0.0]);
        msg.write_float32_list(&[0.0, 0.0, 0.0]);
        msg.write_float32_list(quaternion);
        msg.write_float32_list(&[0.0, 0.0, 0.0]);
        msg.write_float32_list(&[0.5]);
        msg.write_float32_list(&[0.0]);
        msg.write_bool(true);
        msg.write_bool(true);
        msg.write_bool(true);
        msg.write_bool(false);
        msg.into_bytes()
    }

    #[test]
    fn test_command_request_encodes() {
        let runtime = Runtime::new(Duration::from_millis(500));
        let payload = br#"{"command": "SetJointPosition", "id": 2, "joint_positions": [0.1, 0.2]}"#;

        let (cmd, bytes) = runtime.on_command(payload).unwrap();
        let expected = SetJointPosition::new(2, vec![0.1, 0.2]).to_message().unwrap();
        assert_eq!(cmd.name(), "SetJointPosition");
        assert_eq!(&bytes[..], expected.as_bytes());
    }

    #[test]
    fn test_command_request_rejected() {
        let runtime = Runtime::new(Duration::from_millis(500));
        let payload = br#"{"command": "SetJointPosition", "id": 2}"#;

        let rejected = runtime.on_command(payload).unwrap_err();
        assert_eq!(rejected.command.as_deref(), Some("SetJointPosition"));
        assert!(rejected.reason.contains("joint_positions"));

        let rejected = runtime.on_command(b"[1, 2]").unwrap_err();
        assert_eq!(rejected.command, None);
    }

    #[test]
    fn test_health_transitions() {
        let mut runtime = Runtime::new(Duration::from_millis(500));
        assert_eq!(runtime.compute_health(), RuntimeHealth::StateStale);

        runtime.on_state(controller_record(&[0.0, 0.0, 0.0, 1.0])).unwrap();
        assert_eq!(runtime.compute_health(), RuntimeHealth::Ok);
        assert_eq!(runtime.latest_state().unwrap().joint_positions, vec![0.5]);

        assert!(runtime.on_state(controller_record(&[0.0, 0.0, 1.0])).is_err());
        assert_eq!(runtime.compute_health(), RuntimeHealth::Desync);
        // Last good state is kept
        assert!(runtime.latest_state().is_some());

        runtime.on_state(controller_record(&[0.0, 0.0, 0.0, 1.0])).unwrap();
        assert_eq!(runtime.compute_health(), RuntimeHealth::Ok);
    }

    #[test]
    fn test_health_goes_stale() {
        let mut runtime = Runtime::new(Duration::ZERO);
        runtime.on_state(controller_record(&[0.0, 0.0, 0.0, 1.0])).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(runtime.compute_health(), RuntimeHealth::StateStale);
    }
}
