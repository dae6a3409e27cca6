// Command table: field layout of every command the simulator accepts
//
// Each command on the wire is [int32 id, string name, fields...].
// The protocol carries no type tags, so this table is the only
// description of what follows the name.

use super::message::{IncomingMessage, MessageError};

/// Bumped whenever a layout below changes
pub const PROTOCOL_VERSION: u32 = 1;

/// Wire type of a single command field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Int32,
    Float32,
    Bool,
    /// int32 count + count float32 values
    Float32List,
    /// Fixed number of float32 values, no prefix
    Float32Array(usize),
    /// `width` float32 values repeated N times, N = int32 field at index `count_at`
    Float32Groups { count_at: usize, width: usize },
    /// N float32 lists, N = int32 field at index `count_at`
    Float32ListSeries { count_at: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireField {
    pub name: &'static str,
    pub ty: WireType,
}

const fn field(name: &'static str, ty: WireType) -> WireField {
    WireField { name, ty }
}

const NO_FIELDS: &[WireField] = &[];

const JOINT_LIST: &[WireField] = &[
    field("num_joints", WireType::Int32),
    field("joint_positions", WireType::Float32List),
];

const SET_JOINT_POSITION: &[WireField] = &[
    field("num_joints", WireType::Int32),
    field("joint_positions", WireType::Float32List),
    field("speed_scales", WireType::Float32List),
];

const SET_JOINT_POSITION_CONTINUE: &[WireField] = &[
    field("num_times", WireType::Int32),
    field("num_joints", WireType::Int32),
    field("interval", WireType::Int32),
    field(
        "time_joint_positions",
        WireType::Float32ListSeries { count_at: 0 },
    ),
];

const SET_JOINT_VELOCITY: &[WireField] = &[
    field("num_joints", WireType::Int32),
    field("joint_velocitys", WireType::Float32List),
];

const ADD_JOINT_FORCE: &[WireField] = &[
    field("num_joints", WireType::Int32),
    field(
        "joint_forces",
        WireType::Float32Groups {
            count_at: 0,
            width: 3,
        },
    ),
];

// Force and position are interleaved per joint
const ADD_JOINT_FORCE_AT_POSITION: &[WireField] = &[
    field("num_joints", WireType::Int32),
    field(
        "joint_forces_and_positions",
        WireType::Float32Groups {
            count_at: 0,
            width: 6,
        },
    ),
];

const ADD_JOINT_TORQUE: &[WireField] = &[
    field("num_joints", WireType::Int32),
    field(
        "joint_torque",
        WireType::Float32Groups {
            count_at: 0,
            width: 3,
        },
    ),
];

const SET_IMMOVABLE: &[WireField] = &[field("immovable", WireType::Bool)];

const DISTANCE_SPEED: &[WireField] = &[
    field("distance", WireType::Float32),
    field("speed", WireType::Float32),
];

const ANGLE_SPEED: &[WireField] = &[
    field("angle", WireType::Float32),
    field("speed", WireType::Float32),
];

const ENABLED_NATIVE_IK: &[WireField] = &[field("enabled", WireType::Bool)];

const IK_TARGET_DO_MOVE: &[WireField] = &[
    field("position", WireType::Float32Array(3)),
    field("duration", WireType::Float32),
    field("speed_based", WireType::Bool),
    field("relative", WireType::Bool),
];

const IK_TARGET_DO_ROTATE_QUATERNION: &[WireField] = &[
    field("quaternion", WireType::Float32Array(4)),
    field("duration", WireType::Float32),
    field("speed_based", WireType::Bool),
    field("relative", WireType::Bool),
];

/// Every command name, in the order of the table
pub const COMMAND_NAMES: [&str; 19] = [
    "GenerateVHACDColider",
    "SetJointPosition",
    "SetJointPositionDirectly",
    "SetJointPositionContinue",
    "SetJointVelocity",
    "AddJointForce",
    "AddJointForceAtPosition",
    "AddJointTorque",
    "GetJointInverseDynamicsForce",
    "SetImmovable",
    "MoveForward",
    "MoveBack",
    "TurnLeft",
    "TurnRight",
    "EnabledNativeIK",
    "IKTargetDoMove",
    "IKTargetDoRotateQuaternion",
    "IKTargetDoComplete",
    "IKTargetDoKill",
];

/// Field layout following the command name, or `None` for unknown commands
pub fn layout(command: &str) -> Option<&'static [WireField]> {
    let fields = match command {
        "GenerateVHACDColider"
        | "GetJointInverseDynamicsForce"
        | "IKTargetDoComplete"
        | "IKTargetDoKill" => NO_FIELDS,
        "SetJointPosition" => SET_JOINT_POSITION,
        "SetJointPositionDirectly" => JOINT_LIST,
        "SetJointPositionContinue" => SET_JOINT_POSITION_CONTINUE,
        "SetJointVelocity" => SET_JOINT_VELOCITY,
        "AddJointForce" => ADD_JOINT_FORCE,
        "AddJointForceAtPosition" => ADD_JOINT_FORCE_AT_POSITION,
        "AddJointTorque" => ADD_JOINT_TORQUE,
        "SetImmovable" => SET_IMMOVABLE,
        "MoveForward" | "MoveBack" => DISTANCE_SPEED,
        "TurnLeft" | "TurnRight" => ANGLE_SPEED,
        "EnabledNativeIK" => ENABLED_NATIVE_IK,
        "IKTargetDoMove" => IK_TARGET_DO_MOVE,
        "IKTargetDoRotateQuaternion" => IK_TARGET_DO_ROTATE_QUATERNION,
        _ => return None,
    };
    Some(fields)
}

/// A decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Int32(i32),
    Float32(f32),
    Bool(bool),
    Float32List(Vec<f32>),
    Float32Array(Vec<f32>),
    Float32Groups(Vec<Vec<f32>>),
    Float32ListSeries(Vec<Vec<f32>>),
}

/// A command read back from the wire
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCommand {
    pub id: i32,
    pub name: String,
    pub fields: Vec<(&'static str, WireValue)>,
}

impl DecodedCommand {
    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

/// Error types for table-driven decoding
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WireError {
    #[error(transparent)]
    Message(#[from] MessageError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Field {field} has invalid count {count}")]
    InvalidCount { field: &'static str, count: i32 },
}

/// Read one command (id, name and fields) by walking its layout
pub fn decode_command(msg: &mut IncomingMessage) -> Result<DecodedCommand, WireError> {
    let id = msg.read_int32()?;
    let name = msg.read_string()?;
    let fields = layout(&name).ok_or_else(|| WireError::UnknownCommand(name.clone()))?;

    let mut decoded: Vec<(&'static str, WireValue)> = Vec::with_capacity(fields.len());
    for f in fields {
        let value = match f.ty {
            WireType::Int32 => WireValue::Int32(msg.read_int32()?),
            WireType::Float32 => WireValue::Float32(msg.read_float32()?),
            WireType::Bool => WireValue::Bool(msg.read_bool()?),
            WireType::Float32List => WireValue::Float32List(msg.read_float32_list()?),
            WireType::Float32Array(n) => WireValue::Float32Array(read_floats(msg, n)?),
            WireType::Float32Groups { count_at, width } => {
                let count = count_of(&decoded, count_at, f.name)?;
                let groups = (0..count)
                    .map(|_| read_floats(msg, width))
                    .collect::<Result<Vec<_>, _>>()?;
                WireValue::Float32Groups(groups)
            }
            WireType::Float32ListSeries { count_at } => {
                let count = count_of(&decoded, count_at, f.name)?;
                let lists = (0..count)
                    .map(|_| msg.read_float32_list())
                    .collect::<Result<Vec<_>, _>>()?;
                WireValue::Float32ListSeries(lists)
            }
        };
        decoded.push((f.name, value));
    }

    Ok(DecodedCommand {
        id,
        name,
        fields: decoded,
    })
}

fn read_floats(msg: &mut IncomingMessage, n: usize) -> Result<Vec<f32>, MessageError> {
    (0..n).map(|_| msg.read_float32()).collect()
}

fn count_of(
    decoded: &[(&'static str, WireValue)],
    index: usize,
    field: &'static str,
) -> Result<usize, WireError> {
    match decoded.get(index) {
        Some((_, WireValue::Int32(count))) => {
            usize::try_from(*count).map_err(|_| WireError::InvalidCount {
                field,
                count: *count,
            })
        }
        _ => Err(WireError::InvalidCount { field, count: -1 }),
    }
}
