// Side-channel byte protocol shared with the simulator host
//
// Provides:
// - Message primitives (int32, float32, bool, string, float32 list)
// - The command table describing every command's field layout

pub mod message;
pub mod wire;

pub use message::{IncomingMessage, MessageError, OutgoingMessage};
pub use wire::{decode_command, layout, DecodedCommand, WireError, WireValue, PROTOCOL_VERSION};
