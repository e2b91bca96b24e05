//! `buff://`, `job://` and `tag://` preview links.

use crate::models::{Buff, Job};
use crate::services::GameData;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A link to an inline LevelDrain preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLink {
    Buff(String),
    Job(String),
    Tag(String),
}

/// What a [`PreviewLink`] points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTarget<'a> {
    Buff(&'a Buff),
    Job(&'a Job),
    Tag(Vec<&'a Job>),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LinkError {
    #[error("Not a preview link: {0}")]
    UnknownScheme(String),

    #[error("Preview link has no name: {0}")]
    EmptyName(String),
}

impl PreviewLink {
    pub fn name(&self) -> &str {
        match self {
            PreviewLink::Buff(name) | PreviewLink::Job(name) | PreviewLink::Tag(name) => name,
        }
    }

    fn scheme(&self) -> &'static str {
        match self {
            PreviewLink::Buff(_) => "buff",
            PreviewLink::Job(_) => "job",
            PreviewLink::Tag(_) => "tag",
        }
    }

    /// Look the link up in the catalogues.
    ///
    /// Tags resolve to the jobs carrying them and count as missing when no
    /// job does.
    pub fn resolve<'a>(&self, data: &'a GameData) -> Option<PreviewTarget<'a>> {
        match self {
            PreviewLink::Buff(name) => data.get_buff(name).map(PreviewTarget::Buff),
            PreviewLink::Job(name) => data.get_job(name).map(PreviewTarget::Job),
            PreviewLink::Tag(tag) => {
                let jobs: Vec<&Job> = data.jobs_with_tag(tag).collect();
                (!jobs.is_empty()).then_some(PreviewTarget::Tag(jobs))
            }
        }
    }
}

impl FromStr for PreviewLink {
    type Err = LinkError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let (scheme, name) = url
            .split_once("://")
            .ok_or_else(|| LinkError::UnknownScheme(url.to_string()))?;

        if name.is_empty() {
            return Err(LinkError::EmptyName(url.to_string()));
        }

        let name = name.to_string();
        match scheme {
            "buff" => Ok(PreviewLink::Buff(name)),
            "job" => Ok(PreviewLink::Job(name)),
            "tag" => Ok(PreviewLink::Tag(name)),
            _ => Err(LinkError::UnknownScheme(url.to_string())),
        }
    }
}

impl fmt::Display for PreviewLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schemes() {
        assert_eq!("buff://Agile".parse(), Ok(PreviewLink::Buff("Agile".to_string())));
        assert_eq!("job://Witch".parse(), Ok(PreviewLink::Job("Witch".to_string())));
        assert_eq!("tag://Caster".parse(), Ok(PreviewLink::Tag("Caster".to_string())));
    }

    #[test]
    fn test_parse_rejects_other_urls() {
        assert!(matches!(
            "https://example.com".parse::<PreviewLink>(),
            Err(LinkError::UnknownScheme(_))
        ));
        assert!(matches!("Agile".parse::<PreviewLink>(), Err(LinkError::UnknownScheme(_))));
        assert!(matches!("buff://".parse::<PreviewLink>(), Err(LinkError::EmptyName(_))));
    }

    #[test]
    fn test_display_round_trips() {
        let link = PreviewLink::Job("Witch".to_string());
        assert_eq!(link.to_string(), "job://Witch");
        assert_eq!(link.to_string().parse(), Ok(link));
    }

    #[test]
    fn test_resolve() {
        let data = GameData::load();

        let buff = PreviewLink::Buff("agile".to_string()).resolve(&data);
        assert!(matches!(buff, Some(PreviewTarget::Buff(b)) if b.plain_name() == "Agile"));

        let job = PreviewLink::Job("WITCH".to_string()).resolve(&data);
        assert!(matches!(job, Some(PreviewTarget::Job(j)) if j.name == "Witch"));

        match PreviewLink::Tag("Tank".to_string()).resolve(&data) {
            Some(PreviewTarget::Tag(jobs)) => assert!(jobs.iter().any(|j| j.name == "Knight")),
            other => panic!("expected tag target, got {:?}", other),
        }

        assert!(PreviewLink::Tag("Chef".to_string()).resolve(&data).is_none());
        assert!(PreviewLink::Buff("Nimble".to_string()).resolve(&data).is_none());
    }
}
