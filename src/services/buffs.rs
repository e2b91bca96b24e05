use crate::bbcode;
use crate::models::{Buff, BuffId};
use crate::services::corpus::{ParseReport, Record, RecordError, split_records};
use crate::services::JobRepository;
use indexmap::IndexMap;
use indexmap::map::Entry;
use regex::Regex;

const KIND: &str = "buff";

/// Field extraction for buff records.
///
/// - `head`: `[b]NAME[/b] (Cost: N) - DESCRIPTION`
/// - `from`: `[sup]From: a, b, c[/sup]` on any following line
struct BuffRecordParser {
    head: Regex,
    from: Regex,
}

impl BuffRecordParser {
    fn new() -> Self {
        Self {
            head: Regex::new(
                r"^\s*\[b\](?P<name>.+?)\[/b\]\s*\(Cost:\s*(?P<cost>[^)]*)\)\s*-\s*(?P<desc>.*?)\s*$",
            )
            .expect("Invalid buff head regex"),
            from: Regex::new(r"\[sup\]From:\s*(?P<from>.*?)\[/sup\]")
                .expect("Invalid buff source regex"),
        }
    }

    fn parse(&self, record: &Record<'_>) -> Result<Buff, RecordError> {
        let missing = |field: &'static str| RecordError::MissingField {
            kind: KIND,
            line: record.line,
            field,
            head: record.head().to_string(),
        };

        let head = self
            .head
            .captures(record.head())
            .ok_or_else(|| missing("name and cost"))?;
        let from = record
            .lines
            .iter()
            .skip(1)
            .find_map(|line| self.from.captures(line))
            .ok_or_else(|| missing("source list"))?;

        let cost = head["cost"].trim().parse().unwrap_or_else(|_| {
            tracing::debug!(
                "Buff at line {} has non-numeric cost '{}', using 0",
                record.line,
                &head["cost"]
            );
            0
        });

        // Entries are kept exactly as split, blanks included; lookups normalise instead.
        let sources = from["from"].split(',').map(str::to_string).collect();

        Ok(Buff::new(
            head["name"].to_string(),
            cost,
            head["desc"].to_string(),
            sources,
        ))
    }
}

/// Symbol table of LevelDrain buffs keyed by normalised name.
#[derive(Debug, Clone, Default)]
pub struct BuffRepository {
    buffs: IndexMap<String, Buff>,
    report: ParseReport,
}

impl BuffRepository {
    /// Parse every record of a buff catalogue.
    ///
    /// Malformed records and duplicate names are skipped and listed in
    /// [`report`](Self::report).
    pub fn from_corpus(corpus: &str) -> Self {
        let parser = BuffRecordParser::new();
        let mut repository = Self::default();

        for record in split_records(corpus) {
            let buff = match parser.parse(&record) {
                Ok(buff) => buff,
                Err(e) => {
                    repository.report.reject(e);
                    continue;
                }
            };

            match repository.buffs.entry(Self::normalize_key(&buff.name)) {
                Entry::Occupied(entry) => repository.report.reject(RecordError::Duplicate {
                    kind: KIND,
                    line: record.line,
                    name: entry.key().clone(),
                }),
                Entry::Vacant(entry) => {
                    entry.insert(buff);
                    repository.report.parsed += 1;
                }
            }
        }

        tracing::info!(
            "Parsed {} buffs ({} rejected records)",
            repository.report.parsed,
            repository.report.failures.len()
        );
        repository
    }

    /// Lookup key for a buff name: tags stripped, trimmed, lower-cased.
    pub fn normalize_key(name: &str) -> String {
        bbcode::strip_tags(name).trim().to_lowercase()
    }

    pub fn get_buff(&self, name: &str) -> Option<&Buff> {
        self.buffs.get(&Self::normalize_key(name))
    }

    pub fn get_buff_id(&self, name: &str) -> Option<BuffId> {
        self.buffs.get_index_of(&Self::normalize_key(name)).map(BuffId)
    }

    pub fn get(&self, id: BuffId) -> Option<&Buff> {
        self.buffs.get_index(id.0).map(|(_, buff)| buff)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuffId, &Buff)> {
        self.buffs
            .values()
            .enumerate()
            .map(|(index, buff)| (BuffId(index), buff))
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    /// Resolve every buff's raw source names against `jobs`.
    ///
    /// Names that match no job are skipped. Running this again replaces the
    /// previous links.
    pub fn link_from_jobs(&mut self, jobs: &JobRepository) {
        let mut linked = 0;
        for buff in self.buffs.values_mut() {
            let mut from_jobs = Vec::with_capacity(buff.from.len());
            for source in &buff.from {
                match jobs.get_job_id(source) {
                    Some(id) if !from_jobs.contains(&id) => from_jobs.push(id),
                    Some(_) => {}
                    None if source.trim().is_empty() => {}
                    None => tracing::debug!("Buff {} lists unknown source job '{}'", buff.name, source),
                }
            }
            linked += from_jobs.len();
            buff.from_jobs = from_jobs;
        }
        tracing::debug!("Linked {} buff sources to jobs", linked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGILE: &str = "[b][color=red]Agile[/color][/b] (Cost: 3) - Raises the effectiveness of DEX.\n\t[sup]From: alchemist, bard[/sup]";

    #[test]
    fn test_parse_single_record() {
        let repository = BuffRepository::from_corpus(AGILE);
        assert_eq!(repository.len(), 1);
        assert!(repository.report().is_clean());

        let agile = repository.get_buff("Agile").unwrap();
        assert!(agile.name.contains("Agile"));
        assert_eq!(agile.cost, 3);
        assert_eq!(agile.description, "Raises the effectiveness of DEX.");
        assert_eq!(agile.color, "red");
        assert_eq!(agile.stat().abbreviation(), "DEX");
        assert_eq!(agile.from, vec!["alchemist".to_string(), " bard".to_string()]);
    }

    #[test]
    fn test_lookup_normalizes_names() {
        let repository = BuffRepository::from_corpus(AGILE);
        let id = repository.get_buff_id("Agile");

        assert!(id.is_some());
        assert_eq!(repository.get_buff_id(" agile "), id);
        assert_eq!(repository.get_buff_id("[b]AGILE[/b]"), id);
        assert_eq!(repository.get_buff_id("[color=red]Agile[/color]"), id);
        assert!(repository.get_buff("Nimble").is_none());
    }

    #[test]
    fn test_source_list_keeps_blank_entries() {
        let corpus = "[b]Odd[/b] (Cost: 1) - Sparse list.\n\t[sup]From: bard, , witch,[/sup]";
        let repository = BuffRepository::from_corpus(corpus);
        let odd = repository.get_buff("odd").unwrap();
        assert_eq!(
            odd.from,
            vec!["bard".to_string(), " ".to_string(), " witch".to_string(), String::new()]
        );
    }

    #[test]
    fn test_unparseable_cost_defaults_to_zero() {
        let corpus = "[b]Odd[/b] (Cost: ?) - Nobody knows.\n\t[sup]From: bard[/sup]";
        let repository = BuffRepository::from_corpus(corpus);
        assert_eq!(repository.get_buff("odd").unwrap().cost, 0);
    }

    #[test]
    fn test_malformed_records_are_reported_not_fatal() {
        let corpus = format!(
            "{AGILE}\n\nnot a buff at all\n\n[b]Orphan[/b] (Cost: 1) - No sources.\n\n{}",
            "[b][color=green]Lucky[/color][/b] (Cost: 3) - Raises LUC.\n\t[sup]From: rogue[/sup]"
        );
        let repository = BuffRepository::from_corpus(&corpus);

        assert_eq!(repository.len(), 2);
        assert!(repository.get_buff("lucky").is_some());

        let failures = &repository.report().failures;
        assert_eq!(failures.len(), 2);
        assert!(matches!(
            &failures[0],
            RecordError::MissingField { line: 4, field: "name and cost", .. }
        ));
        assert!(matches!(
            &failures[1],
            RecordError::MissingField { line: 6, field: "source list", .. }
        ));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let corpus = format!(
            "{AGILE}\n\n[b][color=cyan]agile[/color][/b] (Cost: 9) - Impostor.\n\t[sup]From: witch[/sup]"
        );
        let repository = BuffRepository::from_corpus(&corpus);

        assert_eq!(repository.len(), 1);
        assert_eq!(repository.get_buff("agile").unwrap().cost, 3);
        assert!(matches!(
            &repository.report().failures[0],
            RecordError::Duplicate { line: 4, .. }
        ));
    }

    #[test]
    fn test_ids_follow_catalogue_order() {
        let corpus = format!(
            "{AGILE}\n\n[b][color=green]Lucky[/color][/b] (Cost: 3) - Raises LUC.\n\t[sup]From: rogue[/sup]"
        );
        let repository = BuffRepository::from_corpus(&corpus);

        let ids: Vec<BuffId> = repository.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![BuffId(0), BuffId(1)]);
        assert_eq!(repository.get(BuffId(1)).unwrap().plain_name(), "Lucky");
        assert!(repository.get(BuffId(2)).is_none());
    }
}
