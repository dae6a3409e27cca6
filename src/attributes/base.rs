// Common header every object record starts with

use serde::{Deserialize, Serialize};

use super::Result;
use crate::side_channel::IncomingMessage;

/// Transform and identity of a simulator object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BaseAttr {
    pub name: String,
    pub position: [f32; 3],
    /// Euler angles in degrees
    pub rotation: [f32; 3],
    pub quaternion: [f32; 4],
    pub local_position: [f32; 3],
    pub local_rotation: [f32; 3],
    pub local_quaternion: [f32; 4],
    /// Column-major 4x4 matrix, sent as a float list
    pub local_to_world_matrix: Vec<f32>,
}

impl BaseAttr {
    /// Read the base record from the front of `msg`
    pub fn parse(msg: &mut IncomingMessage) -> Result<Self> {
        Ok(Self {
            name: msg.read_string()?,
            position: msg.read_float32_array()?,
            rotation: msg.read_float32_array()?,
            quaternion: msg.read_float32_array()?,
            local_position: msg.read_float32_array()?,
            local_rotation: msg.read_float32_array()?,
            local_quaternion: msg.read_float32_array()?,
            local_to_world_matrix: msg.read_float32_list()?,
        })
    }
}
