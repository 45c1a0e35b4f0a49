use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde_json::{Map, Value};
use tracing::warn;

use ember_core::config::ConfigStore;

use crate::app::Entry;

pub const APP_DIR: &str = "ember";

/// Settings store over a single JSON object file. Values live in memory and
/// are written back on every set; a failed write keeps the in-memory value
/// and logs, matching the store's fire-and-forget contract.
pub struct FileConfig {
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl FileConfig {
    pub fn load() -> Self {
        Self::load_from(config_path())
    }

    fn load_from(path: Option<PathBuf>) -> Self {
        let values = path
            .as_deref()
            .filter(|p| p.exists())
            .and_then(|p| fs::read(p).ok())
            .and_then(|data| serde_json::from_slice::<Value>(&data).ok())
            .and_then(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();
        Self { path, values }
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok();
        }
        let data = serde_json::to_vec_pretty(&Value::Object(self.values.clone()))?;
        let mut tmp = path.clone();
        tmp.set_extension("json.tmp");
        {
            let mut f =
                fs::File::create(&tmp).with_context(|| format!("create tmp: {}", tmp.display()))?;
            f.write_all(&data)?;
            f.flush()?;
        }
        fs::rename(&tmp, path)
            .with_context(|| format!("persist settings to {}", path.display()))?;
        Ok(())
    }
}

impl ConfigStore for FileConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        if let Err(err) = self.save() {
            warn!(target: "tui", %err, "settings write failed");
        }
    }
}

fn config_path() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    Some(base.config_dir().join(APP_DIR).join("config.json"))
}

fn transcript_path() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    Some(base.data_dir().join(APP_DIR).join("chatlog.jsonl"))
}

pub fn load_transcript() -> Result<Vec<Entry>> {
    load_transcript_from(transcript_path())
}

fn load_transcript_from(path: Option<PathBuf>) -> Result<Vec<Entry>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data =
        fs::read_to_string(&path).with_context(|| format!("read game log: {}", path.display()))?;
    let mut out = Vec::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Ok(entry) = serde_json::from_str::<Entry>(line) {
            out.push(entry);
        }
    }
    Ok(out)
}

pub fn save_transcript(entries: &[Entry]) -> Result<()> {
    save_transcript_to(transcript_path(), entries)
}

fn save_transcript_to(path: Option<PathBuf>, entries: &[Entry]) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok();
    }
    let mut tmp = path.clone();
    tmp.set_extension("jsonl.tmp");
    {
        let mut f =
            fs::File::create(&tmp).with_context(|| format!("create tmp: {}", tmp.display()))?;
        for entry in entries {
            let line = serde_json::to_string(entry)?;
            f.write_all(line.as_bytes())?;
            f.write_all(b"\n")?;
        }
        f.flush()?;
    }
    fs::rename(&tmp, &path).with_context(|| format!("persist game log to {}", path.display()))?;
    Ok(())
}
