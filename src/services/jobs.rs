use crate::models::{BuffId, Job, JobId};
use crate::services::BuffRepository;
use crate::services::corpus::{ParseReport, Record, RecordError, split_records};
use indexmap::IndexMap;
use indexmap::map::Entry;
use regex::Regex;

const KIND: &str = "job";

/// Field extraction for job records.
///
/// A record is:
///
/// ```text
/// [u]NAME[/u]
/// [b]TAG TAG Converts: TARGET[/b]
/// DESCRIPTION
/// [sub]Scaling: STATS[/sub] Innate: BUFF
/// [sup]BUFF, BUFF, BUFF[/sup]
/// ```
///
/// The name must come first. The other lines are recognised by their markup;
/// any line matching none of them is description text. `Converts:`,
/// `Innate:` and the buff list are optional.
struct JobRecordParser {
    name: Regex,
    tags: Regex,
    scaling: Regex,
    buffs: Regex,
}

impl JobRecordParser {
    fn new() -> Self {
        Self {
            name: Regex::new(r"^\s*\[u\](?P<name>.+?)\[/u\]\s*$").expect("Invalid job name regex"),
            tags: Regex::new(r"^\s*\[b\](?P<tags>.*?)(?:Converts:\s*(?P<converts>.*?))?\s*\[/b\]\s*$")
                .expect("Invalid job tags regex"),
            scaling: Regex::new(
                r"^\s*\[sub\]Scaling:\s*(?P<scaling>.*?)\s*\[/sub\](?:\s*Innate:\s*(?P<innate>.*?))?\s*$",
            )
            .expect("Invalid job scaling regex"),
            buffs: Regex::new(r"^\s*\[sup\](?P<buffs>.*)\[/sup\]\s*$").expect("Invalid job buff list regex"),
        }
    }

    fn parse(&self, record: &Record<'_>, buffs: &BuffRepository) -> Result<Job, RecordError> {
        let missing = |field: &'static str| RecordError::MissingField {
            kind: KIND,
            line: record.line,
            field,
            head: record.head().to_string(),
        };

        let name = self
            .name
            .captures(record.head())
            .ok_or_else(|| missing("underlined name"))?["name"]
            .trim()
            .to_string();

        let mut tags = None;
        let mut scaling = None;
        let mut granted = None;
        let mut description = Vec::new();

        for line in record.lines.iter().skip(1) {
            if let Some(caps) = self.tags.captures(line).filter(|_| tags.is_none()) {
                let converts = caps
                    .name("converts")
                    .map(|m| m.as_str().trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                let labels: Vec<String> = caps["tags"].split_whitespace().map(str::to_string).collect();
                tags = Some((labels, converts));
            } else if let Some(caps) = self.scaling.captures(line).filter(|_| scaling.is_none()) {
                let innate = caps.name("innate").map(|m| m.as_str().to_string());
                scaling = Some((caps["scaling"].to_string(), innate));
            } else if let Some(caps) = self.buffs.captures(line).filter(|_| granted.is_none()) {
                granted = Some(caps["buffs"].to_string());
            } else {
                description.push(line.trim());
            }
        }

        let (tags, converts) = tags.ok_or_else(|| missing("tag line"))?;
        let (scaling, innate) = scaling.ok_or_else(|| missing("scaling line"))?;
        if description.is_empty() {
            return Err(missing("description"));
        }

        let innate = innate
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| resolve_buff(buffs, &name, &raw));
        let granted = granted
            .map(|list| {
                list.split(',')
                    .filter(|entry| !entry.trim().is_empty())
                    .filter_map(|entry| resolve_buff(buffs, &name, entry))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Job {
            name,
            description: description.join(" "),
            tags,
            converts,
            convert_job: None,
            scaling,
            innate,
            buffs: granted,
        })
    }
}

fn resolve_buff(buffs: &BuffRepository, job: &str, name: &str) -> Option<BuffId> {
    let id = buffs.get_buff_id(name);
    if id.is_none() {
        tracing::debug!("Job {} references unknown buff '{}'", job, name.trim());
    }
    id
}

/// Symbol table of LevelDrain jobs keyed by lower-cased name.
#[derive(Debug, Clone, Default)]
pub struct JobRepository {
    jobs: IndexMap<String, Job>,
    report: ParseReport,
}

impl JobRepository {
    /// Parse every record of a job catalogue and link conversions.
    ///
    /// `buffs` must already hold the full buff catalogue; innate and granted
    /// buffs are resolved against it while parsing.
    pub fn from_corpus(corpus: &str, buffs: &BuffRepository) -> Self {
        let parser = JobRecordParser::new();
        let mut repository = Self::default();

        for record in split_records(corpus) {
            let job = match parser.parse(&record, buffs) {
                Ok(job) => job,
                Err(e) => {
                    tracing::debug!("Rejected job record:\n{}", record.lines.join("\n"));
                    repository.report.reject(e);
                    continue;
                }
            };

            match repository.jobs.entry(Self::normalize_key(&job.name)) {
                Entry::Occupied(entry) => repository.report.reject(RecordError::Duplicate {
                    kind: KIND,
                    line: record.line,
                    name: entry.key().clone(),
                }),
                Entry::Vacant(entry) => {
                    entry.insert(job);
                    repository.report.parsed += 1;
                }
            }
        }

        repository.link_converts();

        tracing::info!(
            "Parsed {} jobs ({} rejected records)",
            repository.report.parsed,
            repository.report.failures.len()
        );
        repository
    }

    /// Lookup key for a job name: trimmed and lower-cased.
    pub fn normalize_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn get_job(&self, name: &str) -> Option<&Job> {
        self.jobs.get(&Self::normalize_key(name))
    }

    pub fn get_job_id(&self, name: &str) -> Option<JobId> {
        self.jobs.get_index_of(&Self::normalize_key(name)).map(JobId)
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.get_index(id.0).map(|(_, job)| job)
    }

    pub fn iter(&self) -> impl Iterator<Item = (JobId, &Job)> {
        self.jobs
            .values()
            .enumerate()
            .map(|(index, job)| (JobId(index), job))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn report(&self) -> &ParseReport {
        &self.report
    }

    /// Resolve every job's raw "Converts:" target.
    ///
    /// Runs after all jobs are parsed, so targets later in the catalogue
    /// resolve too. Unknown targets leave `convert_job` empty.
    pub fn link_converts(&mut self) {
        let targets: Vec<Option<JobId>> = self
            .jobs
            .values()
            .map(|job| {
                let target = job.converts.as_deref()?;
                let id = self.get_job_id(target);
                if id.is_none() {
                    tracing::debug!("Job {} converts into unknown job '{}'", job.name, target);
                }
                id
            })
            .collect();

        for (job, target) in self.jobs.values_mut().zip(targets) {
            job.convert_job = target;
        }
    }
}
