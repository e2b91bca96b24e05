use crate::models::BuffId;

/// Index of a [`Job`] inside its [`JobRepository`](crate::services::JobRepository).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub usize);

/// A character class from the LevelDrain job catalogue.
///
/// Relations to other entities are indices into the owning repositories.
/// Use [`GameData`](crate::services::GameData) to follow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub description: String,

    /// Archetype labels, e.g. `["Support", "Crafter"]`
    pub tags: Vec<String>,

    /// Raw "Converts:" target as written in the catalogue
    pub converts: Option<String>,

    /// Resolved conversion target, set by
    /// [`JobRepository::link_converts`](crate::services::JobRepository::link_converts)
    pub convert_job: Option<JobId>,

    /// Stat scaling descriptor, e.g. `INT/LUC`
    pub scaling: String,

    pub innate: Option<BuffId>,
    pub buffs: Vec<BuffId>,
}

impl Job {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }
}
