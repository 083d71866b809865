use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use paraphrase_pairs::{
    grouping::{extract_groups, split_rows},
    pairs::enumerate_all,
    perturb::Perturber,
    sampling::sample_negatives,
    DatasetStore, JsonlStore, Pipeline, PipelineConfig, Row,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Five train groups and two validation groups of three paraphrases each
fn corpus() -> Vec<Row> {
    let groups: [(i64, [&str; 3]); 7] = [
        (1, ["the cat sat", "a cat was sitting", "the cat is seated"]),
        (2, ["i am hungry", "i want food", "i need to eat"]),
        (3, ["it is raining", "rain is falling", "the rain came down"]),
        (4, ["he runs fast", "he is a fast runner", "he sprints"]),
        (5, ["we went home", "we returned home", "we headed back home"]),
        (10, ["open the door", "please open the door", "the door needs opening"]),
        (20, ["close the window", "shut the window", "the window should be closed"]),
    ];

    let mut rows = Vec::new();
    let mut member = 0;
    for (id, texts) in groups {
        for text in texts {
            member += 1;
            rows.push(Row::new(id, member, text));
        }
    }
    rows
}

fn config(dir: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        output_dir: dir.to_path_buf(),
        worker_count: 4,
        seed: Some(1),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_full_run_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(config(dir.path())).unwrap();

    let report = pipeline.run_rows(corpus()).unwrap();

    assert_eq!(report.train.pairs, 5 * 6);
    assert_eq!(report.valid.pairs, 2 * 6);

    let store = JsonlStore::new(dir.path());
    let actor = store.load_actor().unwrap();
    let critic = store.load_critic().unwrap();

    assert_eq!(actor.train.len(), 30);
    assert_eq!(actor.valid.len(), 12);
    assert!(actor.valid.iter().all(|r| r.id % 10 == 0));
    assert!(actor.train.iter().all(|r| r.id % 10 != 0));
    assert_eq!(critic.train.len(), 30);
    assert_eq!(critic.valid.len(), 12);
}

#[test]
fn test_labels_are_in_allowed_set() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.seed = None;
    Pipeline::new(cfg).unwrap().run_rows(corpus()).unwrap();

    let critic = JsonlStore::new(dir.path()).load_critic().unwrap();
    for example in critic.train.iter().chain(critic.valid.iter()) {
        let label = example.labels;
        assert!(
            label == -1.5 || label == -0.55 || (label >= 0.5 && label <= 1.5),
            "unexpected label {}",
            label
        );
    }
}

#[test]
fn test_critic_rows_keep_anchor_of_some_pair() {
    let dir = tempfile::tempdir().unwrap();
    Pipeline::new(config(dir.path()))
        .unwrap()
        .run_rows(corpus())
        .unwrap();

    let store = JsonlStore::new(dir.path());
    let actor = store.load_actor().unwrap();
    let critic = store.load_critic().unwrap();

    for (pair, example) in actor.train.iter().zip(critic.train.iter()) {
        assert_eq!(pair.set_a, example.set_a);
    }
}

#[test]
fn test_grouping_and_enumeration_are_deterministic() {
    let build = || {
        let split = split_rows(corpus(), 10);
        let groups = extract_groups(&split.train);
        enumerate_all(&groups)
    };

    let first = build();
    for _ in 0..5 {
        assert_eq!(build(), first);
    }
}

#[test]
fn test_negatives_never_come_from_own_group() {
    let rows = corpus();
    let text_group: HashMap<&str, i64> = rows
        .iter()
        .map(|r| (r.text.as_str(), r.group_id))
        .collect();

    let split = split_rows(rows.clone(), 10);
    let pairs = enumerate_all(&extract_groups(&split.train));

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let negatives = sample_negatives(&pairs, &mut rng).unwrap();

        for (pair, negative) in pairs.iter().zip(&negatives) {
            assert_ne!(text_group[negative.as_str()], pair.group_id);
        }
    }
}

#[test]
fn test_default_fakes_alter_the_anchor() {
    let dir = tempfile::tempdir().unwrap();
    let report = Pipeline::new(config(dir.path()))
        .unwrap()
        .run_rows(corpus())
        .unwrap();
    let critic = JsonlStore::new(dir.path()).load_critic().unwrap();

    let synthetic: Vec<_> = critic
        .train
        .iter()
        .chain(critic.valid.iter())
        .filter(|e| e.labels == -0.55)
        .collect();

    assert!(report.train.labels.synthetic_negative > 0);
    for example in synthetic {
        assert_ne!(example.set_b, example.set_a);
    }
}

struct UppercasePerturber;

impl Perturber for UppercasePerturber {
    fn perturb(&self, sentence: &str, _num_variants: usize, _rng: &mut dyn RngCore) -> Vec<String> {
        vec![sentence.to_uppercase()]
    }

    fn name(&self) -> &str {
        "uppercase"
    }
}

#[test]
fn test_custom_perturber_supplies_synthetic_negatives() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(config(dir.path()))
        .unwrap()
        .with_perturber(Arc::new(UppercasePerturber));

    let report = pipeline.run_rows(corpus()).unwrap();
    let critic = JsonlStore::new(dir.path()).load_critic().unwrap();

    let synthetic: Vec<_> = critic
        .train
        .iter()
        .chain(critic.valid.iter())
        .filter(|e| e.labels == -0.55)
        .collect();

    assert_eq!(
        synthetic.len(),
        report.train.labels.synthetic_negative + report.valid.labels.synthetic_negative
    );
    for example in synthetic {
        assert_eq!(example.set_b, example.set_a.to_uppercase());
    }
}

#[test]
fn test_run_reads_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("corpus.jsonl");
    let lines: Vec<String> = corpus()
        .iter()
        .map(|r| serde_json::to_string(r).unwrap())
        .collect();
    fs::write(&input, lines.join("\n")).unwrap();

    let mut cfg = config(&dir.path().join("out"));
    cfg.input = input;
    let report = Pipeline::new(cfg).unwrap().run().unwrap();

    assert_eq!(report.train.rows + report.valid.rows, 21);
    assert!(dir.path().join("out/critic_data/manifest.json").exists());
}
