use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AbilitySlot {
    Q,
    W,
    E,
    R,
}

impl AbilitySlot {
    pub const ALL: [AbilitySlot; 4] = [Self::Q, Self::W, Self::E, Self::R];

    pub fn index(self) -> usize {
        match self {
            Self::Q => 0,
            Self::W => 1,
            Self::E => 2,
            Self::R => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Q => "Q",
            Self::W => "W",
            Self::E => "E",
            Self::R => "R",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "Q" => Some(Self::Q),
            "W" => Some(Self::W),
            "E" => Some(Self::E),
            "R" => Some(Self::R),
            _ => None,
        }
    }
}

/// One value per ability slot, serialized as `{"Q": .., "W": .., "E": .., "R": ..}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerSlot<T> {
    #[serde(rename = "Q", default)]
    pub q: T,
    #[serde(rename = "W", default)]
    pub w: T,
    #[serde(rename = "E", default)]
    pub e: T,
    #[serde(rename = "R", default)]
    pub r: T,
}

impl<T> PerSlot<T> {
    pub fn from_fn(mut f: impl FnMut(AbilitySlot) -> T) -> Self {
        Self {
            q: f(AbilitySlot::Q),
            w: f(AbilitySlot::W),
            e: f(AbilitySlot::E),
            r: f(AbilitySlot::R),
        }
    }

    pub fn get(&self, slot: AbilitySlot) -> &T {
        match slot {
            AbilitySlot::Q => &self.q,
            AbilitySlot::W => &self.w,
            AbilitySlot::E => &self.e,
            AbilitySlot::R => &self.r,
        }
    }

    pub fn get_mut(&mut self, slot: AbilitySlot) -> &mut T {
        match slot {
            AbilitySlot::Q => &mut self.q,
            AbilitySlot::W => &mut self.w,
            AbilitySlot::E => &mut self.e,
            AbilitySlot::R => &mut self.r,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AbilitySlot, &T)> + '_ {
        AbilitySlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(AbilitySlot, &T) -> U) -> PerSlot<U> {
        PerSlot::from_fn(|slot| f(slot, self.get(slot)))
    }
}

impl PerSlot<bool> {
    pub fn any(&self) -> bool {
        self.q || self.w || self.e || self.r
    }

    pub fn all(&self) -> bool {
        self.q && self.w && self.e && self.r
    }
}
