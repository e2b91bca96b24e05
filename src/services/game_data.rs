use crate::models::{Buff, Job};
use crate::services::corpus::{BUFF_CORPUS, JOB_CORPUS, RecordError};
use crate::services::{BuffRepository, JobRepository};
use std::time::Instant;

/// Both LevelDrain catalogues, parsed and cross-linked.
///
/// Construction runs the whole pipeline in dependency order: buffs, then
/// jobs (which resolve their buffs), then the buff → job back-links. After
/// that the tables are read-only.
#[derive(Debug, Clone)]
pub struct GameData {
    buffs: BuffRepository,
    jobs: JobRepository,
}

impl GameData {
    /// Load the catalogues embedded in the binary.
    pub fn load() -> Self {
        Self::from_corpora(BUFF_CORPUS, JOB_CORPUS)
    }

    pub fn from_corpora(buff_corpus: &str, job_corpus: &str) -> Self {
        let start = Instant::now();

        let mut buffs = BuffRepository::from_corpus(buff_corpus);
        let jobs = JobRepository::from_corpus(job_corpus, &buffs);
        buffs.link_from_jobs(&jobs);

        tracing::info!(
            "LevelDrain data loaded in {:.2}ms: {} buffs, {} jobs",
            start.elapsed().as_secs_f64() * 1000.0,
            buffs.len(),
            jobs.len()
        );

        Self { buffs, jobs }
    }

    pub fn buffs(&self) -> &BuffRepository {
        &self.buffs
    }

    pub fn jobs(&self) -> &JobRepository {
        &self.jobs
    }

    pub fn get_job(&self, name: &str) -> Option<&Job> {
        self.jobs.get_job(name)
    }

    pub fn get_buff(&self, name: &str) -> Option<&Buff> {
        self.buffs.get_buff(name)
    }

    /// The job `job` converts into, if it names a known job.
    pub fn convert_target(&self, job: &Job) -> Option<&Job> {
        job.convert_job.and_then(|id| self.jobs.get(id))
    }

    pub fn innate_buff(&self, job: &Job) -> Option<&Buff> {
        job.innate.and_then(|id| self.buffs.get(id))
    }

    pub fn granted_buffs<'a>(&'a self, job: &'a Job) -> impl Iterator<Item = &'a Buff> + 'a {
        job.buffs.iter().filter_map(|id| self.buffs.get(*id))
    }

    /// Jobs listed as sources of `buff`.
    pub fn source_jobs<'a>(&'a self, buff: &'a Buff) -> impl Iterator<Item = &'a Job> + 'a {
        buff.from_jobs.iter().filter_map(|id| self.jobs.get(*id))
    }

    /// Jobs that carry `tag` among their archetype labels.
    pub fn jobs_with_tag<'a, 't>(&'a self, tag: &'t str) -> impl Iterator<Item = &'a Job> {
        self.jobs
            .iter()
            .map(|(_, job)| job)
            .filter(move |job| job.has_tag(tag))
    }

    /// Every rejected record from both catalogues.
    pub fn failures(&self) -> impl Iterator<Item = &RecordError> {
        self.buffs
            .report()
            .failures
            .iter()
            .chain(self.jobs.report().failures.iter())
    }
}
