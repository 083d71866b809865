use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{ActorRecord, LabeledExample, Split, SplitData};
use crate::error::{PipelineError, Result};
use crate::storage::{DatasetManifest, DatasetStore, ACTOR_DATASET, CRITIC_DATASET};

const MANIFEST_FILE: &str = "manifest.json";

/// JSON Lines dataset store
///
/// Layout:
/// ```text
/// <root>/actor_data/{train,valid}.jsonl + manifest.json
/// <root>/critic_data/{train,valid}.jsonl + manifest.json
/// ```
/// Each dataset is staged in `<name>.tmp` and renamed into place once every
/// split is written.
pub struct JsonlStore {
    root: PathBuf,
}

impl JsonlStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn dataset_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn manifest(&self, name: &str) -> Result<DatasetManifest> {
        let raw = fs::read_to_string(self.dataset_dir(name).join(MANIFEST_FILE))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_dataset<T: Serialize>(&self, name: &str, data: &SplitData<T>) -> Result<()> {
        let final_dir = self.dataset_dir(name);
        let staging_dir = self.root.join(format!("{}.tmp", name));

        if staging_dir.exists() {
            fs::remove_dir_all(&staging_dir)?;
        }
        fs::create_dir_all(&staging_dir)?;

        let mut splits = BTreeMap::new();
        for split in Split::ALL {
            let records = data.get(split);
            write_jsonl(&staging_dir.join(format!("{}.jsonl", split.name())), records)?;
            splits.insert(split.name().to_string(), records.len());
        }

        let manifest = DatasetManifest {
            dataset: name.to_string(),
            created_at: Utc::now(),
            version: crate::VERSION.to_string(),
            splits,
        };
        fs::write(
            staging_dir.join(MANIFEST_FILE),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        if final_dir.exists() {
            fs::remove_dir_all(&final_dir)?;
        }
        fs::rename(&staging_dir, &final_dir)?;

        tracing::info!(
            "💾 Saved {} ({} train, {} valid) to {}",
            name,
            data.train.len(),
            data.valid.len(),
            final_dir.display()
        );
        Ok(())
    }

    fn read_dataset<T: DeserializeOwned>(&self, name: &str) -> Result<SplitData<T>> {
        let dir = self.dataset_dir(name);
        let train = read_jsonl(&dir.join(format!("{}.jsonl", Split::Train.name())))?;
        let valid = read_jsonl(&dir.join(format!("{}.jsonl", Split::Valid.name())))?;
        Ok(SplitData::new(train, valid))
    }
}

fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            PipelineError::validation(index + 1, format!("{}: {}", path.display(), e))
        })?;
        records.push(record);
    }
    Ok(records)
}

impl DatasetStore for JsonlStore {
    fn save_actor(&self, data: &SplitData<ActorRecord>) -> Result<()> {
        self.write_dataset(ACTOR_DATASET, data)
    }

    fn save_critic(&self, data: &SplitData<LabeledExample>) -> Result<()> {
        self.write_dataset(CRITIC_DATASET, data)
    }

    fn load_actor(&self) -> Result<SplitData<ActorRecord>> {
        self.read_dataset(ACTOR_DATASET)
    }

    fn load_critic(&self) -> Result<SplitData<LabeledExample>> {
        self.read_dataset(CRITIC_DATASET)
    }
}
