// Closed set of commands, dispatched by name for keyword requests

use serde::{Deserialize, Serialize};

use super::collider::GenerateVhacdCollider;
use super::controller::{
    AddJointForce, AddJointForceAtPosition, AddJointTorque, EnabledNativeIk,
    GetJointInverseDynamicsForce, IkTargetDoComplete, IkTargetDoKill, IkTargetDoMove,
    IkTargetDoRotateQuaternion, MoveBack, MoveForward, SetImmovable, SetJointPosition,
    SetJointPositionContinue, SetJointPositionDirectly, SetJointVelocity, TurnLeft, TurnRight,
};
use super::{AttrError, Command, Kwargs, Result};
use crate::side_channel::OutgoingMessage;

/// Any command the simulator accepts
///
/// Serialized with the command name under `"command"`, next to the
/// command's own keyword arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum SimCommand {
    #[serde(rename = "GenerateVHACDColider")]
    GenerateVhacdCollider(GenerateVhacdCollider),
    SetJointPosition(SetJointPosition),
    SetJointPositionDirectly(SetJointPositionDirectly),
    SetJointPositionContinue(SetJointPositionContinue),
    SetJointVelocity(SetJointVelocity),
    AddJointForce(AddJointForce),
    AddJointForceAtPosition(AddJointForceAtPosition),
    AddJointTorque(AddJointTorque),
    GetJointInverseDynamicsForce(GetJointInverseDynamicsForce),
    SetImmovable(SetImmovable),
    MoveForward(MoveForward),
    MoveBack(MoveBack),
    TurnLeft(TurnLeft),
    TurnRight(TurnRight),
    #[serde(rename = "EnabledNativeIK")]
    EnabledNativeIk(EnabledNativeIk),
    #[serde(rename = "IKTargetDoMove")]
    IkTargetDoMove(IkTargetDoMove),
    #[serde(rename = "IKTargetDoRotateQuaternion")]
    IkTargetDoRotateQuaternion(IkTargetDoRotateQuaternion),
    #[serde(rename = "IKTargetDoComplete")]
    IkTargetDoComplete(IkTargetDoComplete),
    #[serde(rename = "IKTargetDoKill")]
    IkTargetDoKill(IkTargetDoKill),
}

/// Expand `$body` once per variant with `$cmd` bound to the inner command
macro_rules! each_command {
    ($self:expr, $cmd:ident => $body:expr) => {
        match $self {
            SimCommand::GenerateVhacdCollider($cmd) => $body,
            SimCommand::SetJointPosition($cmd) => $body,
            SimCommand::SetJointPositionDirectly($cmd) => $body,
            SimCommand::SetJointPositionContinue($cmd) => $body,
            SimCommand::SetJointVelocity($cmd) => $body,
            SimCommand::AddJointForce($cmd) => $body,
            SimCommand::AddJointForceAtPosition($cmd) => $body,
            SimCommand::AddJointTorque($cmd) => $body,
            SimCommand::GetJointInverseDynamicsForce($cmd) => $body,
            SimCommand::SetImmovable($cmd) => $body,
            SimCommand::MoveForward($cmd) => $body,
            SimCommand::MoveBack($cmd) => $body,
            SimCommand::TurnLeft($cmd) => $body,
            SimCommand::TurnRight($cmd) => $body,
            SimCommand::EnabledNativeIk($cmd) => $body,
            SimCommand::IkTargetDoMove($cmd) => $body,
            SimCommand::IkTargetDoRotateQuaternion($cmd) => $body,
            SimCommand::IkTargetDoComplete($cmd) => $body,
            SimCommand::IkTargetDoKill($cmd) => $body,
        }
    };
}

impl SimCommand {
    /// Build the named command from its keyword arguments
    ///
    /// Compulsory keys are checked before the values are deserialized, so a
    /// missing key is always reported as `MissingArgument`.
    pub fn from_kwargs(name: &str, kwargs: &Kwargs) -> Result<Self> {
        let cmd = match name {
            GenerateVhacdCollider::NAME => {
                Self::GenerateVhacdCollider(Command::from_kwargs(kwargs)?)
            }
            SetJointPosition::NAME => Self::SetJointPosition(Command::from_kwargs(kwargs)?),
            SetJointPositionDirectly::NAME => {
                Self::SetJointPositionDirectly(Command::from_kwargs(kwargs)?)
            }
            SetJointPositionContinue::NAME => {
                Self::SetJointPositionContinue(Command::from_kwargs(kwargs)?)
            }
            SetJointVelocity::NAME => Self::SetJointVelocity(Command::from_kwargs(kwargs)?),
            AddJointForce::NAME => Self::AddJointForce(Command::from_kwargs(kwargs)?),
            AddJointForceAtPosition::NAME => {
                Self::AddJointForceAtPosition(Command::from_kwargs(kwargs)?)
            }
            AddJointTorque::NAME => Self::AddJointTorque(Command::from_kwargs(kwargs)?),
            GetJointInverseDynamicsForce::NAME => {
                Self::GetJointInverseDynamicsForce(Command::from_kwargs(kwargs)?)
            }
            SetImmovable::NAME => Self::SetImmovable(Command::from_kwargs(kwargs)?),
            MoveForward::NAME => Self::MoveForward(Command::from_kwargs(kwargs)?),
            MoveBack::NAME => Self::MoveBack(Command::from_kwargs(kwargs)?),
            TurnLeft::NAME => Self::TurnLeft(Command::from_kwargs(kwargs)?),
            TurnRight::NAME => Self::TurnRight(Command::from_kwargs(kwargs)?),
            EnabledNativeIk::NAME => Self::EnabledNativeIk(Command::from_kwargs(kwargs)?),
            IkTargetDoMove::NAME => Self::IkTargetDoMove(Command::from_kwargs(kwargs)?),
            IkTargetDoRotateQuaternion::NAME => {
                Self::IkTargetDoRotateQuaternion(Command::from_kwargs(kwargs)?)
            }
            IkTargetDoComplete::NAME => Self::IkTargetDoComplete(Command::from_kwargs(kwargs)?),
            IkTargetDoKill::NAME => Self::IkTargetDoKill(Command::from_kwargs(kwargs)?),
            _ => {
                return Err(AttrError::InvalidArgument {
                    key: "command".to_string(),
                    reason: format!("unknown command {}", name),
                });
            }
        };
        Ok(cmd)
    }

    /// Build from a JSON object carrying the name under `"command"`
    pub fn from_request(mut request: Kwargs) -> Result<Self> {
        let name = match request.remove("command") {
            Some(serde_json::Value::String(name)) => name,
            Some(other) => {
                return Err(AttrError::InvalidArgument {
                    key: "command".to_string(),
                    reason: format!("expected a string, got {}", other),
                });
            }
            None => {
                return Err(AttrError::MissingArgument {
                    key: "command".to_string(),
                });
            }
        };
        Self::from_kwargs(&name, &request)
    }

    /// Command name as sent on the wire
    pub fn name(&self) -> &'static str {
        fn name_of<C: Command>(_: &C) -> &'static str {
            C::NAME
        }
        each_command!(self, cmd => name_of(cmd))
    }

    pub fn id(&self) -> i32 {
        each_command!(self, cmd => cmd.id())
    }

    /// Validate, then encode
    pub fn to_message(&self) -> Result<OutgoingMessage> {
        each_command!(self, cmd => cmd.to_message())
    }
}
