// Controller attribute: articulation bodies (robot arms, grippers, mobile bases)
//
// Commands drive joints and the native IK target; the state record
// reports per-part transforms and per-joint positions and velocities.

use serde::{Deserialize, Serialize};

use super::{parse_raw_list, write_vec3s, AttrError, BaseAttr, Command, Result};
use crate::side_channel::{IncomingMessage, OutgoingMessage};

// === State record ===

/// Joint state of one articulation body, as reported by the simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub base: BaseAttr,
    pub number_of_joints: i32,
    /// World position of each part
    pub positions: Vec<[f32; 3]>,
    /// Euler rotation of each part
    pub rotations: Vec<[f32; 3]>,
    pub quaternion: Vec<[f32; 4]>,
    /// Linear velocity of each part
    pub velocities: Vec<[f32; 3]>,
    pub joint_positions: Vec<f32>,
    pub joint_velocities: Vec<f32>,
    pub all_stable: bool,
    pub move_done: bool,
    pub rotate_done: bool,
    // Only present after GetJointInverseDynamicsForce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity_forces: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coriolis_centrifugal_forces: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_forces: Option<Vec<f32>>,
}

impl ControllerState {
    /// Read a controller record, base header first
    ///
    /// Fails without a partial result if any grouped list has a length
    /// that is not a multiple of its group width.
    pub fn parse(msg: &mut IncomingMessage) -> Result<Self> {
        let base = BaseAttr::parse(msg)?;
        let number_of_joints = msg.read_int32()?;
        let positions = parse_raw_list("positions", msg.read_float32_list()?)?;
        let rotations = parse_raw_list("rotations", msg.read_float32_list()?)?;
        let quaternion = parse_raw_list("quaternion", msg.read_float32_list()?)?;
        let velocities = parse_raw_list("velocities", msg.read_float32_list()?)?;
        let joint_positions = msg.read_float32_list()?;
        let joint_velocities = msg.read_float32_list()?;
        let all_stable = msg.read_bool()?;
        let move_done = msg.read_bool()?;
        let rotate_done = msg.read_bool()?;

        let (gravity_forces, coriolis_centrifugal_forces, drive_forces) = if msg.read_bool()? {
            (
                Some(msg.read_float32_list()?),
                Some(msg.read_float32_list()?),
                Some(msg.read_float32_list()?),
            )
        } else {
            (None, None, None)
        };

        Ok(Self {
            base,
            number_of_joints,
            positions,
            rotations,
            quaternion,
            velocities,
            joint_positions,
            joint_velocities,
            all_stable,
            move_done,
            rotate_done,
            gravity_forces,
            coriolis_centrifugal_forces,
            drive_forces,
        })
    }

    /// True once the last move and rotate targets were both reached
    pub fn motion_done(&self) -> bool {
        self.move_done && self.rotate_done
    }
}

/// Parse a controller record
pub fn parse_message(msg: &mut IncomingMessage) -> Result<ControllerState> {
    ControllerState::parse(msg)
}

// === Joint commands ===

/// Drive every joint towards a target position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetJointPosition {
    pub id: i32,
    pub joint_positions: Vec<f32>,
    /// Per-joint speed scale, all 1.0 when omitted
    #[serde(default)]
    pub speed_scales: Option<Vec<f32>>,
}

impl SetJointPosition {
    pub fn new(id: i32, joint_positions: Vec<f32>) -> Self {
        Self {
            id,
            joint_positions,
            speed_scales: None,
        }
    }

    pub fn with_speed_scales(mut self, speed_scales: Vec<f32>) -> Self {
        self.speed_scales = Some(speed_scales);
        self
    }
}

impl Command for SetJointPosition {
    const NAME: &'static str = "SetJointPosition";
    const COMPULSORY: &'static [&'static str] = &["id", "joint_positions"];

    fn id(&self) -> i32 {
        self.id
    }

    fn validate(&self) -> Result<()> {
        match &self.speed_scales {
            Some(scales) => check_len("speed_scales", self.joint_positions.len(), scales.len()),
            None => Ok(()),
        }
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        let num_joints = self.joint_positions.len();
        msg.write_int32(num_joints as i32);
        msg.write_float32_list(&self.joint_positions);
        match &self.speed_scales {
            Some(scales) => msg.write_float32_list(scales),
            None => msg.write_float32_list(&vec![1.0; num_joints]),
        }
    }
}

/// Teleport every joint to its target, skipping the physics in between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetJointPositionDirectly {
    pub id: i32,
    pub joint_positions: Vec<f32>,
}

impl Command for SetJointPositionDirectly {
    const NAME: &'static str = "SetJointPositionDirectly";
    const COMPULSORY: &'static [&'static str] = &["id", "joint_positions"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        msg.write_int32(self.joint_positions.len() as i32);
        msg.write_float32_list(&self.joint_positions);
    }
}

/// Play back a joint trajectory, one step every `interval` milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetJointPositionContinue {
    pub id: i32,
    pub interval: i32,
    pub time_joint_positions: Vec<Vec<f32>>,
}

impl Command for SetJointPositionContinue {
    const NAME: &'static str = "SetJointPositionContinue";
    const COMPULSORY: &'static [&'static str] = &["id", "interval", "time_joint_positions"];

    fn id(&self) -> i32 {
        self.id
    }

    fn validate(&self) -> Result<()> {
        let Some(first) = self.time_joint_positions.first() else {
            return Err(AttrError::InvalidArgument {
                key: "time_joint_positions".to_string(),
                reason: "trajectory has no time steps".to_string(),
            });
        };
        // Joint count on the wire comes from the first step
        for step in &self.time_joint_positions[1..] {
            check_len("time_joint_positions", first.len(), step.len())?;
        }
        Ok(())
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        let num_joints = self.time_joint_positions.first().map_or(0, Vec::len);
        msg.write_int32(self.time_joint_positions.len() as i32);
        msg.write_int32(num_joints as i32);
        msg.write_int32(self.interval);
        for step in &self.time_joint_positions {
            msg.write_float32_list(step);
        }
    }
}

/// Set target velocity for every joint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetJointVelocity {
    pub id: i32,
    #[serde(rename = "joint_velocitys")]
    pub joint_velocities: Vec<f32>,
}

impl Command for SetJointVelocity {
    const NAME: &'static str = "SetJointVelocity";
    const COMPULSORY: &'static [&'static str] = &["id", "joint_velocitys"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        msg.write_int32(self.joint_velocities.len() as i32);
        msg.write_float32_list(&self.joint_velocities);
    }
}

/// Apply a force to each joint's body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddJointForce {
    pub id: i32,
    pub joint_forces: Vec<[f32; 3]>,
}

impl Command for AddJointForce {
    const NAME: &'static str = "AddJointForce";
    const COMPULSORY: &'static [&'static str] = &["id", "joint_forces"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        msg.write_int32(self.joint_forces.len() as i32);
        write_vec3s(msg, &self.joint_forces);
    }
}

/// Apply a force to each joint's body at a world position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddJointForceAtPosition {
    pub id: i32,
    pub joint_forces: Vec<[f32; 3]>,
    pub forces_position: Vec<[f32; 3]>,
}

impl Command for AddJointForceAtPosition {
    const NAME: &'static str = "AddJointForceAtPosition";
    const COMPULSORY: &'static [&'static str] = &["id", "joint_forces", "forces_position"];

    fn id(&self) -> i32 {
        self.id
    }

    fn validate(&self) -> Result<()> {
        check_len(
            "forces_position",
            self.joint_forces.len(),
            self.forces_position.len(),
        )
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        msg.write_int32(self.joint_forces.len() as i32);
        for (force, position) in self.joint_forces.iter().zip(&self.forces_position) {
            write_vec3s(msg, &[*force, *position]);
        }
    }
}

/// Apply a torque to each joint's body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddJointTorque {
    pub id: i32,
    pub joint_torque: Vec<[f32; 3]>,
}

impl Command for AddJointTorque {
    const NAME: &'static str = "AddJointTorque";
    const COMPULSORY: &'static [&'static str] = &["id", "joint_torque"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        msg.write_int32(self.joint_torque.len() as i32);
        write_vec3s(msg, &self.joint_torque);
    }
}

/// Pin or release the articulation root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetImmovable {
    pub id: i32,
    pub immovable: bool,
}

impl Command for SetImmovable {
    const NAME: &'static str = "SetImmovable";
    const COMPULSORY: &'static [&'static str] = &["id", "immovable"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        msg.write_bool(self.immovable);
    }
}

/// Switch the simulator's built-in IK solver on or off
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnabledNativeIk {
    pub id: i32,
    pub enabled: bool,
}

impl Command for EnabledNativeIk {
    const NAME: &'static str = "EnabledNativeIK";
    const COMPULSORY: &'static [&'static str] = &["id", "enabled"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        msg.write_bool(self.enabled);
    }
}

/// Commands that carry nothing but the object id
macro_rules! id_only_command {
    ($(#[$meta:meta])* $ty:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $ty {
            pub id: i32,
        }

        impl Command for $ty {
            const NAME: &'static str = $name;
            const COMPULSORY: &'static [&'static str] = &["id"];

            fn id(&self) -> i32 {
                self.id
            }
        }
    };
}

id_only_command!(
    /// Request gravity, coriolis and drive forces in the next state record
    GetJointInverseDynamicsForce,
    "GetJointInverseDynamicsForce"
);
id_only_command!(
    /// Jump the running IK tween to its end
    IkTargetDoComplete,
    "IKTargetDoComplete"
);
id_only_command!(
    /// Stop the running IK tween where it is
    IkTargetDoKill,
    "IKTargetDoKill"
);

// === Mobile base commands ===

/// Commands that move the base by an amount at a speed
macro_rules! motion_command {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $amount:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $ty {
            pub id: i32,
            pub $amount: f32,
            pub speed: f32,
        }

        impl Command for $ty {
            const NAME: &'static str = $name;
            const COMPULSORY: &'static [&'static str] = &["id", stringify!($amount), "speed"];

            fn id(&self) -> i32 {
                self.id
            }

            fn write_args(&self, msg: &mut OutgoingMessage) {
                msg.write_float32(self.$amount);
                msg.write_float32(self.speed);
            }
        }
    };
}

motion_command!(
    /// Drive forward by `distance` meters
    MoveForward,
    "MoveForward",
    distance
);
motion_command!(
    /// Drive backward by `distance` meters
    MoveBack,
    "MoveBack",
    distance
);
motion_command!(
    /// Turn left by `angle` degrees
    TurnLeft,
    "TurnLeft",
    angle
);
motion_command!(
    /// Turn right by `angle` degrees
    TurnRight,
    "TurnRight",
    angle
);

// === IK target commands ===

/// Tween the IK target to a position over `duration`
///
/// With `speed_based` (default true) `duration` is a speed instead of a time;
/// with `relative` (default false) `position` is an offset from the current target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IkTargetDoMove {
    pub id: i32,
    pub position: [f32; 3],
    pub duration: f32,
    #[serde(default)]
    pub speed_based: Option<bool>,
    #[serde(default)]
    pub relative: Option<bool>,
}

impl IkTargetDoMove {
    pub fn new(id: i32, position: [f32; 3], duration: f32) -> Self {
        Self {
            id,
            position,
            duration,
            speed_based: None,
            relative: None,
        }
    }
}

impl Command for IkTargetDoMove {
    const NAME: &'static str = "IKTargetDoMove";
    const COMPULSORY: &'static [&'static str] = &["id", "position", "duration"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        for v in self.position {
            msg.write_float32(v);
        }
        msg.write_float32(self.duration);
        write_tween_flags(msg, self.speed_based, self.relative);
    }
}

/// Tween the IK target to a rotation over `duration`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IkTargetDoRotateQuaternion {
    pub id: i32,
    /// x, y, z, w
    pub quaternion: [f32; 4],
    pub duration: f32,
    #[serde(default)]
    pub speed_based: Option<bool>,
    #[serde(default)]
    pub relative: Option<bool>,
}

impl IkTargetDoRotateQuaternion {
    pub fn new(id: i32, quaternion: [f32; 4], duration: f32) -> Self {
        Self {
            id,
            quaternion,
            duration,
            speed_based: None,
            relative: None,
        }
    }
}

impl Command for IkTargetDoRotateQuaternion {
    const NAME: &'static str = "IKTargetDoRotateQuaternion";
    const COMPULSORY: &'static [&'static str] = &["id", "quaternion", "duration"];

    fn id(&self) -> i32 {
        self.id
    }

    fn write_args(&self, msg: &mut OutgoingMessage) {
        for v in self.quaternion {
            msg.write_float32(v);
        }
        msg.write_float32(self.duration);
        write_tween_flags(msg, self.speed_based, self.relative);
    }
}

fn write_tween_flags(msg: &mut OutgoingMessage, speed_based: Option<bool>, relative: Option<bool>) {
    msg.write_bool(speed_based.unwrap_or(true));
    msg.write_bool(relative.unwrap_or(false));
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(AttrError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::base::tests::{sample_base, write_base};

    fn read_header(msg: OutgoingMessage) -> IncomingMessage {
        let mut incoming = IncomingMessage::from(msg);
        incoming.read_int32().unwrap();
        incoming.read_string().unwrap();
        incoming
    }

    #[test]
    fn test_speed_scales_default_to_one() {
        let msg = SetJointPosition::new(2, vec![0.1, 0.2, 0.3]).to_message().unwrap();
        let mut incoming = read_header(msg);

        assert_eq!(incoming.read_int32().unwrap(), 3);
        assert_eq!(incoming.read_float32_list().unwrap(), vec![0.1, 0.2, 0.3]);
        assert_eq!(incoming.read_float32_list().unwrap(), vec![1.0, 1.0, 1.0]);
        assert_eq!(incoming.remaining(), 0);
    }

    #[test]
    fn test_speed_scales_length_mismatch() {
        let cmd = SetJointPosition::new(2, vec![0.1, 0.2, 0.3]).with_speed_scales(vec![0.5, 0.5]);
        assert_eq!(
            cmd.to_message().unwrap_err(),
            AttrError::LengthMismatch {
                field: "speed_scales",
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_continue_layout() {
        let cmd = SetJointPositionContinue {
            id: 4,
            interval: 10,
            time_joint_positions: vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        };
        let mut incoming = read_header(cmd.to_message().unwrap());

        assert_eq!(incoming.read_int32().unwrap(), 3); // num_times
        assert_eq!(incoming.read_int32().unwrap(), 2); // num_joints
        assert_eq!(incoming.read_int32().unwrap(), 10); // interval
        assert_eq!(incoming.read_float32_list().unwrap(), vec![1.0, 2.0]);
        assert_eq!(incoming.read_float32_list().unwrap(), vec![3.0, 4.0]);
        assert_eq!(incoming.read_float32_list().unwrap(), vec![5.0, 6.0]);
        assert_eq!(incoming.remaining(), 0);
    }

    #[test]
    fn test_continue_ragged_steps_rejected() {
        let cmd = SetJointPositionContinue {
            id: 4,
            interval: 10,
            time_joint_positions: vec![vec![1.0, 2.0], vec![3.0]],
        };
        assert_eq!(
            cmd.to_message().unwrap_err(),
            AttrError::LengthMismatch {
                field: "time_joint_positions",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_continue_empty_rejected() {
        let cmd = SetJointPositionContinue {
            id: 4,
            interval: 10,
            time_joint_positions: Vec::new(),
        };
        assert!(matches!(
            cmd.to_message(),
            Err(AttrError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_force_at_position_interleaves() {
        let cmd = AddJointForceAtPosition {
            id: 1,
            joint_forces: vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            forces_position: vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
        };
        let mut incoming = read_header(cmd.to_message().unwrap());

        assert_eq!(incoming.read_int32().unwrap(), 2);
        let values: Vec<f32> = (0..12).map(|_| incoming.read_float32().unwrap()).collect();
        assert_eq!(
            values,
            vec![1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 4.0, 5.0, 6.0, 0.4, 0.5, 0.6]
        );
        assert_eq!(incoming.remaining(), 0);
    }

    #[test]
    fn test_force_at_position_length_mismatch() {
        let cmd = AddJointForceAtPosition {
            id: 1,
            joint_forces: vec![[1.0, 2.0, 3.0]],
            forces_position: Vec::new(),
        };
        assert_eq!(
            cmd.to_message().unwrap_err(),
            AttrError::LengthMismatch {
                field: "forces_position",
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_ik_move_default_flags() {
        let msg = IkTargetDoMove::new(9, [0.3, 0.4, 0.5], 0.2).to_message().unwrap();
        let mut incoming = read_header(msg);

        for expected in [0.3, 0.4, 0.5, 0.2] {
            assert_eq!(incoming.read_float32().unwrap(), expected);
        }
        assert!(incoming.read_bool().unwrap()); // speed_based
        assert!(!incoming.read_bool().unwrap()); // relative
        assert_eq!(incoming.remaining(), 0);
    }

    #[test]
    fn test_ik_rotate_explicit_flags() {
        let cmd = IkTargetDoRotateQuaternion {
            speed_based: Some(false),
            relative: Some(true),
            ..IkTargetDoRotateQuaternion::new(9, [0.0, 0.0, 0.0, 1.0], 1.5)
        };
        let mut incoming = read_header(cmd.to_message().unwrap());

        for expected in [0.0, 0.0, 0.0, 1.0, 1.5] {
            assert_eq!(incoming.read_float32().unwrap(), expected);
        }
        assert!(!incoming.read_bool().unwrap());
        assert!(incoming.read_bool().unwrap());
    }

    #[test]
    fn test_motion_compulsory_keys() {
        assert_eq!(MoveBack::COMPULSORY, &["id", "distance", "speed"]);
        assert_eq!(TurnRight::COMPULSORY, &["id", "angle", "speed"]);
    }

    fn sample_state(with_forces: bool) -> ControllerState {
        let forces = |scale: f32| Some(vec![scale, 2.0 * scale]);
        ControllerState {
            base: sample_base(),
            number_of_joints: 2,
            positions: vec![[0.0, 0.0, 0.0], [0.0, 0.3, 0.0]],
            rotations: vec![[0.0, 0.0, 0.0], [0.0, 45.0, 0.0]],
            quaternion: vec![[0.0, 0.0, 0.0, 1.0], [0.0, 0.3827, 0.0, 0.9239]],
            velocities: vec![[0.0, 0.0, 0.0], [0.01, 0.0, 0.0]],
            joint_positions: vec![0.0, 45.0],
            joint_velocities: vec![0.0, 1.5],
            all_stable: true,
            move_done: true,
            rotate_done: false,
            gravity_forces: if with_forces { forces(1.0) } else { None },
            coriolis_centrifugal_forces: if with_forces { forces(0.1) } else { None },
            drive_forces: if with_forces { forces(3.0) } else { None },
        }
    }

    fn write_state(state: &ControllerState) -> OutgoingMessage {
        let mut msg = OutgoingMessage::new();
        write_base(&mut msg, &state.base);
        msg.write_int32(state.number_of_joints);
        msg.write_float32_list(&state.positions.concat());
        msg.write_float32_list(&state.rotations.concat());
        msg.write_float32_list(&state.quaternion.concat());
        msg.write_float32_list(&state.velocities.concat());
        msg.write_float32_list(&state.joint_positions);
        msg.write_float32_list(&state.joint_velocities);
        msg.write_bool(state.all_stable);
        msg.write_bool(state.move_done);
        msg.write_bool(state.rotate_done);
        match (
            &state.gravity_forces,
            &state.coriolis_centrifugal_forces,
            &state.drive_forces,
        ) {
            (Some(g), Some(c), Some(d)) => {
                msg.write_bool(true);
                msg.write_float32_list(g);
                msg.write_float32_list(c);
                msg.write_float32_list(d);
            }
            _ => msg.write_bool(false),
        }
        msg
    }

    #[test]
    fn test_parse_without_forces() {
        let state = sample_state(false);
        let mut incoming = IncomingMessage::from(write_state(&state));
        let parsed = parse_message(&mut incoming).unwrap();

        assert_eq!(parsed, state);
        assert_eq!(incoming.remaining(), 0);
        assert!(!parsed.motion_done());

        let json = serde_json::to_value(&parsed).unwrap();
        for key in ["gravity_forces", "coriolis_centrifugal_forces", "drive_forces"] {
            assert!(json.get(key).is_none(), "{} should be absent", key);
        }
    }

    #[test]
    fn test_parse_with_forces() {
        let state = sample_state(true);
        let mut incoming = IncomingMessage::from(write_state(&state));
        let parsed = ControllerState::parse(&mut incoming).unwrap();

        assert_eq!(parsed, state);
        assert_eq!(incoming.remaining(), 0);

        let json = serde_json::to_value(&parsed).unwrap();
        for key in ["gravity_forces", "coriolis_centrifugal_forces", "drive_forces"] {
            let forces = json[key].as_array().unwrap();
            assert_eq!(forces.len(), parsed.number_of_joints as usize);
        }
    }

    #[test]
    fn test_parse_rejects_partial_quaternion() {
        let mut msg = OutgoingMessage::new();
        write_base(&mut msg, &sample_base());
        msg.write_int32(1);
        msg.write_float32_list(&[0.0, 0.0, 0.0]);
        msg.write_float32_list(&[0.0, 0.0, 0.0]);
        msg.write_float32_list(&[0.0, 0.0, 1.0]); // 3 is not a multiple of 4

        assert_eq!(
            ControllerState::parse(&mut msg.into()).unwrap_err(),
            AttrError::MalformedMessage {
                field: "quaternion",
                width: 4,
                len: 3
            }
        );
    }
}
