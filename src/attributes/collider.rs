// Collider attribute: plain objects with a physics collider

use serde::{Deserialize, Serialize};

use super::{BaseAttr, Command, Result};
use crate::side_channel::IncomingMessage;

/// A collider record carries nothing beyond the base header
pub fn parse_message(msg: &mut IncomingMessage) -> Result<BaseAttr> {
    BaseAttr::parse(msg)
}

/// Replace the object's collider with a V-HACD convex decomposition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateVhacdCollider {
    pub id: i32,
}

impl Command for GenerateVhacdCollider {
    // Spelling matches the simulator's dispatch table
    const NAME: &'static str = "GenerateVHACDColider";
    const COMPULSORY: &'static [&'static str] = &["id"];

    fn id(&self) -> i32 {
        self.id
    }
}
