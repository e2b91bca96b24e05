use crate::models::{FunStat, Stat};

/// Base and current value of one stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatValue {
    pub base: i32,
    /// Value after buffs and drains
    pub current: i32,
}

impl StatValue {
    pub fn new(base: i32, current: i32) -> Self {
        Self { base, current }
    }

    /// How far buffs and drains move the stat from its base.
    pub fn modifier(&self) -> i32 {
        self.current - self.base
    }
}

/// The six LevelDrain stats of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub strength: StatValue,
    pub vitality: StatValue,
    pub dexterity: StatValue,
    pub intelligence: StatValue,
    pub charisma: StatValue,
    pub luck: StatValue,
}

impl Stats {
    /// Value for `stat`; `None` for [`Stat::Lvl`], which is not a sheet stat.
    pub fn get(&self, stat: Stat) -> Option<StatValue> {
        match stat {
            Stat::Str => Some(self.strength),
            Stat::Vit => Some(self.vitality),
            Stat::Dex => Some(self.dexterity),
            Stat::Int => Some(self.intelligence),
            Stat::Cha => Some(self.charisma),
            Stat::Luc => Some(self.luck),
            Stat::Lvl => None,
        }
    }
}

/// Gained / lost counters with their running sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub gained: i32,
    pub lost: i32,
    pub sum: i32,
}

/// A character's StatTrack stat sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatSheet {
    pub name: String,
    pub class_name: String,
    pub level: u32,
    pub level_cap: u32,
    pub stat_cap: u32,
    pub devotion: i32,
    pub titles: Vec<String>,
    pub conditions: Vec<String>,
    pub stats: Stats,
    pub item: String,
    pub locked: bool,
    pub fun_stats: Vec<FunStat>,
    pub levels: Tally,
    pub stat_points: Tally,
}

impl StatSheet {
    /// One-line summary, e.g. `You are Alice, the Level 12 Witch.`
    pub fn brief_description(&self) -> String {
        format!(
            "You are {}, the Level {} {}.",
            self.name, self.level, self.class_name
        )
    }
}
