// Simulator object attributes
//
// Provides:
// - Command builders for collider and articulation (controller) objects
// - Parsers for the state records the simulator sends back
// - Keyword-argument validation for JSON command requests

pub mod base;
pub mod collider;
pub mod command;
pub mod controller;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::side_channel::{MessageError, OutgoingMessage};

pub use base::BaseAttr;
pub use command::SimCommand;
pub use controller::ControllerState;

/// Keyword arguments as received in a JSON command request
pub type Kwargs = Map<String, Value>;

/// Error types for building commands and parsing attribute records
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AttrError {
    #[error("Missing compulsory argument: {key}")]
    MissingArgument { key: String },

    #[error("Length of {field} is {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument {key}: {reason}")]
    InvalidArgument { key: String, reason: String },

    #[error("Invalid arguments for {command}: {reason}")]
    InvalidKwargs { command: String, reason: String },

    #[error("Malformed {field}: length {len} is not a multiple of {width}")]
    MalformedMessage {
        field: &'static str,
        width: usize,
        len: usize,
    },

    #[error(transparent)]
    Message(#[from] MessageError),
}

pub type Result<T> = std::result::Result<T, AttrError>;

/// Fail with the first compulsory key missing from `kwargs`
pub fn check_kwargs(kwargs: &Kwargs, compulsory: &[&str]) -> Result<()> {
    match compulsory.iter().find(|key| !kwargs.contains_key(**key)) {
        Some(key) => Err(AttrError::MissingArgument {
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// A single simulator command
///
/// Implementors describe their name and argument checks; encoding always
/// starts with the object id and the name, then `write_args`.
pub trait Command: DeserializeOwned {
    /// Command name, dispatched on by the simulator
    const NAME: &'static str;

    /// Keys that must be present in a keyword request
    const COMPULSORY: &'static [&'static str];

    /// Target object id
    fn id(&self) -> i32;

    /// Check arguments before anything is written
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Write the fields following the command name
    fn write_args(&self, _msg: &mut OutgoingMessage) {}

    /// Validate, then encode the full message
    fn to_message(&self) -> Result<OutgoingMessage> {
        self.validate()?;

        let mut msg = OutgoingMessage::new();
        msg.write_int32(self.id());
        msg.write_string(Self::NAME);
        self.write_args(&mut msg);

        debug!("Encoded {} for object {} ({} bytes)", Self::NAME, self.id(), msg.len());
        Ok(msg)
    }

    /// Build from keyword arguments, checking compulsory keys first
    fn from_kwargs(kwargs: &Kwargs) -> Result<Self> {
        check_kwargs(kwargs, Self::COMPULSORY)?;
        serde_json::from_value(Value::Object(kwargs.clone())).map_err(|e| {
            AttrError::InvalidKwargs {
                command: Self::NAME.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// Reshape a flat list into groups of `N` floats
pub fn parse_raw_list<const N: usize>(
    field: &'static str,
    raw: Vec<f32>,
) -> Result<Vec<[f32; N]>> {
    if raw.len() % N != 0 {
        return Err(AttrError::MalformedMessage {
            field,
            width: N,
            len: raw.len(),
        });
    }
    Ok(raw
        .chunks_exact(N)
        .map(|chunk| {
            let mut group = [0.0f32; N];
            group.copy_from_slice(chunk);
            group
        })
        .collect())
}

/// Write a per-joint vector list flattened x, y, z in joint order
pub(crate) fn write_vec3s(msg: &mut OutgoingMessage, values: &[[f32; 3]]) {
    for v in values {
        msg.write_float32(v[0]);
        msg.write_float32(v[1]);
        msg.write_float32(v[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kwargs(value: Value) -> Kwargs {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_check_kwargs_names_missing_key() {
        let args = kwargs(json!({ "id": 1 }));
        assert_eq!(
            check_kwargs(&args, &["id", "joint_positions"]),
            Err(AttrError::MissingArgument {
                key: "joint_positions".to_string()
            })
        );
    }

    #[test]
    fn test_check_kwargs_ignores_extra_keys() {
        let args = kwargs(json!({ "id": 1, "speed_scales": [1.0], "note": "x" }));
        assert_eq!(check_kwargs(&args, &["id"]), Ok(()));
    }

    #[test]
    fn test_parse_raw_list_groups() {
        let groups = parse_raw_list::<4>("quaternion", vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0])
            .unwrap();
        assert_eq!(groups, vec![[0.0, 0.0, 0.0, 1.0], [1.0, 0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_parse_raw_list_rejects_partial_group() {
        let raw = vec![1.0; 7];
        assert_eq!(
            parse_raw_list::<3>("positions", raw),
            Err(AttrError::MalformedMessage {
                field: "positions",
                width: 3,
                len: 7
            })
        );
    }

    #[test]
    fn test_parse_raw_list_empty() {
        assert_eq!(parse_raw_list::<3>("velocities", Vec::new()), Ok(Vec::new()));
    }
}
