use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::Error;

const SLOT_PREFIX: &str = "answer_";

// handed out once per poll and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u32);

impl SlotId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn after(last_index: i32) -> Self {
        Self(last_index.max(0) as u32 + 1)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", SLOT_PREFIX, self.0)
    }
}

impl FromStr for SlotId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let index = s
            .strip_prefix(SLOT_PREFIX)
            .filter(|n| n.len() >= 2 && n.chars().all(|c| c.is_ascii_digit()))
            .ok_or_else(|| Error::BusinessError(format!("invalid answer slot: {}", s)))?
            .parse::<u32>()?;
        // counters are stored as i32
        if index == 0 || index > i32::MAX as u32 {
            return Err(Error::BusinessError(format!("invalid answer slot: {}", s)));
        }
        Ok(Self(index))
    }
}
