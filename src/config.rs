// Loop rate, timeouts and Zenoh key expressions
use std::time::Duration;

use clap::Parser;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// No controller state for this long marks the simulator stale
pub const STATE_TIMEOUT: Duration = Duration::from_millis(500);

// Zenoh topics
pub const TOPIC_CMD: &str = "rfu/cmd"; // JSON command requests
pub const TOPIC_CMD_REJECTED: &str = "rfu/cmd/rejected"; // rejected requests
pub const TOPIC_CHANNEL_OUT: &str = "rfu/side_channel/out"; // encoded commands -> simulator
pub const TOPIC_CHANNEL_IN: &str = "rfu/side_channel/in"; // controller records <- simulator
pub const TOPIC_STATE: &str = "rfu/state/controller"; // parsed controller state
pub const TOPIC_HEALTH: &str = "rfu/state/health"; // health status

/// Command-line overrides for the defaults above
#[derive(Debug, Clone, Parser)]
#[command(name = "rfu-sidechannel", version, about = "Bridge JSON commands and controller state to the simulator side channel")]
pub struct Args {
    /// Loop frequency in Hz
    #[arg(long, default_value_t = LOOP_HZ)]
    pub loop_hz: u64,

    /// Milliseconds without a controller record before reporting stale
    #[arg(long, default_value_t = STATE_TIMEOUT.as_millis() as u64)]
    pub state_timeout_ms: u64,

    #[arg(long, default_value = TOPIC_CMD)]
    pub cmd_topic: String,

    #[arg(long, default_value = TOPIC_CMD_REJECTED)]
    pub rejected_topic: String,

    #[arg(long, default_value = TOPIC_CHANNEL_OUT)]
    pub channel_out_topic: String,

    #[arg(long, default_value = TOPIC_CHANNEL_IN)]
    pub channel_in_topic: String,

    #[arg(long, default_value = TOPIC_STATE)]
    pub state_topic: String,

    #[arg(long, default_value = TOPIC_HEALTH)]
    pub health_topic: String,
}

impl Args {
    pub fn state_timeout(&self) -> Duration {
        Duration::from_millis(self.state_timeout_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.loop_hz.clamp(1, 1_000_000))
    }
}
