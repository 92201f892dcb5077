use serde::{Deserialize, Serialize};

/// Ability property inferred from free text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Mobility,
    Stun,
    Slow,
    Root,
    Knockup,
    Silence,
    Stealth,
    AttackSpeed,
    MoveSpeed,
    Shield,
    Heal,
    Pull,
    Lifesteal,
}

impl TagKind {
    pub const ALL: [TagKind; 13] = [
        Self::Mobility,
        Self::Stun,
        Self::Slow,
        Self::Root,
        Self::Knockup,
        Self::Silence,
        Self::Stealth,
        Self::AttackSpeed,
        Self::MoveSpeed,
        Self::Shield,
        Self::Heal,
        Self::Pull,
        Self::Lifesteal,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Mobility => "mobility",
            Self::Stun => "stun",
            Self::Slow => "slow",
            Self::Root => "root",
            Self::Knockup => "knockup",
            Self::Silence => "silence",
            Self::Stealth => "stealth",
            Self::AttackSpeed => "attack_speed",
            Self::MoveSpeed => "move_speed",
            Self::Shield => "shield",
            Self::Heal => "heal",
            Self::Pull => "pull",
            Self::Lifesteal => "lifesteal",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "mobility" | "dash" | "blink" => Some(Self::Mobility),
            "stun" => Some(Self::Stun),
            "slow" => Some(Self::Slow),
            "root" | "snare" => Some(Self::Root),
            "knockup" | "knockback" => Some(Self::Knockup),
            "silence" => Some(Self::Silence),
            "stealth" | "invisible" => Some(Self::Stealth),
            "attackspeed" | "as" => Some(Self::AttackSpeed),
            "movespeed" | "ms" => Some(Self::MoveSpeed),
            "shield" => Some(Self::Shield),
            "heal" => Some(Self::Heal),
            "pull" | "grab" => Some(Self::Pull),
            "lifesteal" | "omnivamp" | "vamp" => Some(Self::Lifesteal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Magic,
}

impl DamageType {
    pub const ALL: [DamageType; 2] = [Self::Physical, Self::Magic];

    pub fn key(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Magic => "magic",
        }
    }

    /// Literal phrase that marks this damage type in English tooltips.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Physical => "physical damage",
            Self::Magic => "magic damage",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "physical" | "ad" => Some(Self::Physical),
            "magic" | "ap" => Some(Self::Magic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    Tank,
    Fighter,
    Mage,
    Marksman,
    Assassin,
    Support,
}

impl RoleKind {
    pub const ALL: [RoleKind; 6] = [
        Self::Tank,
        Self::Fighter,
        Self::Mage,
        Self::Marksman,
        Self::Assassin,
        Self::Support,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Tank => "tank",
            Self::Fighter => "fighter",
            Self::Mage => "mage",
            Self::Marksman => "marksman",
            Self::Assassin => "assassin",
            Self::Support => "support",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tank" => Some(Self::Tank),
            "fighter" => Some(Self::Fighter),
            "mage" => Some(Self::Mage),
            "marksman" => Some(Self::Marksman),
            "assassin" => Some(Self::Assassin),
            "support" => Some(Self::Support),
            _ => None,
        }
    }
}
