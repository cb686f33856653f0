use serde::{Deserialize, Serialize};

use crate::types::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Equal,    // floor(state * modulus / m) == roll
    LessThan, // floor(state * modulus / m) < roll
}

/*
    One roll seen in the channel.
    `step_offset` counts generator calls since the previous observation (for the first one: since the origin seed).
    `extra_steps` widens that to a window: offsets step_offset..step_offset + extra_steps are all tried.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub relation: Relation,
    pub roll: Roll,
    pub modulus: Modulus,
    pub step_offset: Steps,
    #[serde(default = "default_extra_steps")]
    pub extra_steps: Steps,
}

fn default_extra_steps() -> Steps {
    return 1;
}

impl Observation {
    pub fn equal(roll: Roll, modulus: Modulus, step_offset: Steps) -> Self {
        Self {
            relation: Relation::Equal,
            roll,
            modulus,
            step_offset,
            extra_steps: 1,
        }
    }

    pub fn less_than(roll: Roll, modulus: Modulus, step_offset: Steps) -> Self {
        Self {
            relation: Relation::LessThan,
            roll,
            modulus,
            step_offset,
            extra_steps: 1,
        }
    }

    pub fn with_extra_steps(self, extra_steps: Steps) -> Self {
        Self { extra_steps, ..self }
    }

    /// Exact check against a roll produced by the generator.
    pub fn accepts(&self, roll: Roll) -> bool {
        match self.relation {
            Relation::Equal => roll == self.roll,
            Relation::LessThan => roll < self.roll,
        }
    }
}
