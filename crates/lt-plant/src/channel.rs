use core::fmt;

/// Plant port selector.
///
/// Channels are small non-negative integers whose meaning is plant-defined;
/// the tuning core never interprets them beyond passing the configured
/// selector through.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Channel(pub u32);

impl Channel {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Channel {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
