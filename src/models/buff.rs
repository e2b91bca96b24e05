use crate::bbcode;
use crate::models::JobId;
use std::fmt;

/// Index of a [`Buff`] inside its [`BuffRepository`](crate::services::BuffRepository).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuffId(pub usize);

/// Stat a buff belongs to, derived from the colour of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Str,
    Vit,
    Dex,
    Int,
    Cha,
    Luc,
    Lvl,
}

impl Stat {
    /// Map a catalogue colour to its stat. Unknown colours count as LVL.
    pub fn from_color(color: &str) -> Self {
        match color.to_ascii_lowercase().as_str() {
            "orange" => Stat::Str,
            "yellow" => Stat::Vit,
            "red" => Stat::Dex,
            "cyan" => Stat::Int,
            "pink" => Stat::Cha,
            "green" => Stat::Luc,
            _ => Stat::Lvl,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stat::Str => "STR",
            Stat::Vit => "VIT",
            Stat::Dex => "DEX",
            Stat::Int => "INT",
            Stat::Cha => "CHA",
            Stat::Luc => "LUC",
            Stat::Lvl => "LVL",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// A status effect from the LevelDrain buff catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buff {
    /// Display name as written in the catalogue, including its colour tag
    pub name: String,
    pub cost: i32,
    pub description: String,

    /// Source job names split on `,` exactly as written (not trimmed)
    pub from: Vec<String>,

    /// Colour from the name's `[color=...]` tag, empty if none
    pub color: String,

    /// Jobs granting this buff, filled by
    /// [`BuffRepository::link_from_jobs`](crate::services::BuffRepository::link_from_jobs)
    pub from_jobs: Vec<JobId>,
}

impl Buff {
    pub fn new(name: String, cost: i32, description: String, from: Vec<String>) -> Self {
        let color = bbcode::first_color(&name).unwrap_or_default().to_string();
        Self {
            name,
            cost,
            description,
            from,
            color,
            from_jobs: Vec::new(),
        }
    }

    /// Name without any markup.
    pub fn plain_name(&self) -> String {
        bbcode::strip_tags(&self.name).trim().to_string()
    }

    /// Name with its text wrapped in `[u]...[/u]` inside the colour tag.
    pub fn underlined_name(&self) -> String {
        bbcode::underline_first_text(&self.name)
    }

    /// Styling class for the name colour (`redText`), empty without a colour.
    pub fn color_class(&self) -> String {
        if self.color.is_empty() {
            String::new()
        } else {
            format!("{}Text", self.color)
        }
    }

    pub fn stat(&self) -> Stat {
        Stat::from_color(&self.color)
    }
}
