//! Integration tests for the LevelDrain catalogues
//!
//! These tests verify that the embedded buff and job catalogues:
//! - Parse without rejected records
//! - Resolve names regardless of case, padding and markup
//! - Link conversions in both directions of catalogue order
//! - Link every buff back to the jobs named in its source list

use rpchat::models::{FunStat, Stat};
use rpchat::services::{
    BuffRepository, GameData, JobRepository, MessageKind, MessageSegment, STAT_TRACK_SENDER,
    StatSheetMatcher,
};

#[test]
fn test_embedded_catalogues_are_clean() {
    let data = GameData::load();
    let failures: Vec<String> = data.failures().map(|e| e.to_string()).collect();
    assert!(failures.is_empty(), "Rejected records: {:?}", failures);
}

#[test]
fn test_addled_lookup_variants() {
    let data = GameData::load();
    let buffs = data.buffs();

    let id = buffs.get_buff_id("Addled").expect("Addled should exist");
    assert_eq!(buffs.get_buff_id(" addled "), Some(id));
    assert_eq!(buffs.get_buff_id("[b]Addled[/b]"), Some(id));
    assert_eq!(buffs.get_buff_id("ADDLED"), Some(id));
}

#[test]
fn test_agile_buff() {
    let data = GameData::load();
    let agile = data.get_buff("Agile").unwrap();

    assert_eq!(agile.cost, 3);
    assert_eq!(agile.color, "red");
    assert_eq!(agile.stat(), Stat::Dex);
    assert_eq!(agile.from, vec!["alchemist".to_string(), " bard".to_string()]);

    let sources: Vec<&str> = data.source_jobs(agile).map(|j| j.name.as_str()).collect();
    assert_eq!(sources, vec!["Alchemist", "Bard"]);
}

#[test]
fn test_convert_links() {
    let data = GameData::load();

    // Forward reference: Scholar is defined after Alchemist
    let alchemist = data.get_job("Alchemist").unwrap();
    assert_eq!(data.convert_target(alchemist).unwrap().name, "Scholar");

    // Backward reference: Monk is defined before Wrestler
    let wrestler = data.get_job("Wrestler").unwrap();
    assert_eq!(data.convert_target(wrestler).unwrap().name, "Monk");

    let monk = data.get_job("Monk").unwrap();
    assert!(monk.converts.is_none());
    assert!(monk.convert_job.is_none());
}

#[test]
fn test_convert_job_set_iff_target_exists() {
    let data = GameData::load();
    for (_, job) in data.jobs().iter() {
        let target_known = job
            .converts
            .as_deref()
            .is_some_and(|name| data.get_job(name).is_some());
        assert_eq!(job.convert_job.is_some(), target_known, "job {}", job.name);
    }
}

#[test]
fn test_from_jobs_matches_source_names() {
    let data = GameData::load();
    for (_, buff) in data.buffs().iter() {
        let mut expected: Vec<_> = buff
            .from
            .iter()
            .filter_map(|name| data.jobs().get_job_id(name))
            .collect();
        expected.sort();
        expected.dedup();

        let mut actual = buff.from_jobs.clone();
        actual.sort();
        assert_eq!(actual, expected, "buff {}", buff.plain_name());
    }
}

#[test]
fn test_job_relations_resolve() {
    let data = GameData::load();
    let barbarian = data.get_job("barbarian").unwrap();

    assert_eq!(data.innate_buff(barbarian).unwrap().plain_name(), "Mighty");
    assert!(data.granted_buffs(barbarian).any(|b| b.plain_name() == "Brutal"));

    let wrestler = data.get_job("wrestler").unwrap();
    assert!(wrestler.innate.is_none());
}

#[test]
fn test_catalogue_survives_bad_records() {
    let buffs = BuffRepository::from_corpus(
        "[b][color=red]Agile[/color][/b] (Cost: 3) - DEX.\n\t[sup]From: bard[/sup]\n\ngarbage\n\n[b][color=green]Lucky[/color][/b] (Cost: 2) - LUC.\n\t[sup]From: bard[/sup]",
    );
    assert_eq!(buffs.len(), 2);
    assert_eq!(buffs.report().failures.len(), 1);
    assert_eq!(buffs.report().failures[0].line(), 4);

    let jobs = JobRepository::from_corpus(
        "[u]Bard[/u]\n[b]Support[/b]\nSings.\n[sub]Scaling: CHA[/sub]\n\n[u]Broken[/u]\nno tags",
        &buffs,
    );
    assert_eq!(jobs.len(), 1);
    assert!(!jobs.report().is_clean());
}

#[test]
fn test_stat_sheet_links_job() {
    let data = GameData::load();
    let matcher = StatSheetMatcher::new();
    let sheet = "[b]Level Drain Stat Sheet[/b]\nMira, Level 7 Knight ✚Grit (2) ━Tact (1)";

    let segments = matcher.enrich(STAT_TRACK_SENDER, MessageKind::Message, sheet, &data);
    let job = segments
        .iter()
        .find_map(|s| match s {
            MessageSegment::Job { id, .. } => data.jobs().get(*id),
            MessageSegment::Text(_) => None,
        })
        .expect("job segment");
    assert_eq!(job.name, "Knight");
}

#[test]
fn test_fun_stats_parse() {
    let grit: FunStat = "✚Grit (2)".parse().unwrap();
    assert_eq!(grit.name, "Grit");
    assert_eq!(grit.value, 2);

    let tact: FunStat = "━Tact (1)".parse().unwrap();
    assert_eq!(tact.value, -1);
    assert_eq!(tact.to_string(), "━Tact (1)");
}
