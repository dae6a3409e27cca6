// IK demo: enable native IK on an arm, trace a square with the IK target,
// then read back the controller state published by the runtime.
//
// Usage: cargo run --example ik_publisher -- [object id]
// Start the runtime first: cargo run

use std::time::Duration;

use rfu_sidechannel::attributes::controller::{EnabledNativeIk, IkTargetDoComplete, IkTargetDoMove};
use rfu_sidechannel::attributes::{ControllerState, SimCommand};
use rfu_sidechannel::config::{TOPIC_CMD, TOPIC_STATE};
use tracing::{info, warn};

const SQUARE: [[f32; 3]; 4] = [
    [0.1, 0.0, 0.0],
    [0.0, 0.0, 0.1],
    [-0.1, 0.0, 0.0],
    [0.0, 0.0, -0.1],
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let id: i32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 639787,
    };

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let publisher = session.declare_publisher(TOPIC_CMD).await?;
    let states = session.declare_subscriber(TOPIC_STATE).await?;

    let enable = SimCommand::EnabledNativeIk(EnabledNativeIk { id, enabled: true });
    publisher.put(serde_json::to_string(&enable)?).await?;

    for offset in SQUARE {
        let step = IkTargetDoMove {
            relative: Some(true),
            ..IkTargetDoMove::new(id, offset, 0.1)
        };
        info!("Moving IK target by {:?}", offset);
        publisher
            .put(serde_json::to_string(&SimCommand::IkTargetDoMove(step))?)
            .await?;
        wait_for_motion(&states).await;
    }

    let complete = SimCommand::IkTargetDoComplete(IkTargetDoComplete { id });
    publisher.put(serde_json::to_string(&complete)?).await?;

    Ok(())
}

/// Wait until the runtime reports the move finished, up to a few seconds
async fn wait_for_motion(states: &zenoh::pubsub::Subscriber<zenoh::handlers::FifoChannelHandler<zenoh::sample::Sample>>) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        match tokio::time::timeout(Duration::from_millis(200), states.recv_async()).await {
            Ok(Ok(sample)) => {
                let payload = sample.payload().to_bytes();
                match serde_json::from_slice::<ControllerState>(&payload) {
                    Ok(state) if state.motion_done() => {
                        info!("Joint positions: {:?}", state.joint_positions);
                        return;
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Failed to parse state: {}", e),
                }
            }
            Ok(Err(e)) => {
                warn!("State subscriber closed: {}", e);
                return;
            }
            Err(_) => {} // no state this round
        }
    }
    warn!("Timed out waiting for the IK target to settle");
}
