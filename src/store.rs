use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::Entry;
use crate::error::Result;
use crate::makefile::Makefile;

/// A named makefile kept by a [`MakefileStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMakefile {
    pub name: String,
    /// Older exports call this field `targets`.
    #[serde(default, alias = "targets")]
    pub entries: Vec<Entry>,
}

impl SavedMakefile {
    pub fn new(name: impl Into<String>, makefile: Makefile) -> Self {
        SavedMakefile {
            name: name.into(),
            entries: makefile.entries,
        }
    }

    pub fn makefile(&self) -> Makefile {
        Makefile::new(self.entries.clone())
    }
}

/// Repository of saved makefiles keyed by name.
///
/// Names are unique; insertion order is kept.
pub trait MakefileStore {
    /// Names of all saved makefiles, in insertion order.
    fn list(&self) -> Result<Vec<String>>;

    fn load(&self, name: &str) -> Result<Option<SavedMakefile>>;

    /// Store `makefile`, replacing any saved makefile with the same name.
    fn save(&mut self, makefile: SavedMakefile) -> Result<()>;

    /// Remove a saved makefile. Returns whether it existed.
    fn delete(&mut self, name: &str) -> Result<bool>;
}

/// Serialize a saved collection as pretty-printed JSON.
pub fn export_json(makefiles: &[SavedMakefile]) -> Result<String> {
    Ok(serde_json::to_string_pretty(makefiles)?)
}

/// Read a collection written by [`export_json`].
pub fn import_json(json: &str) -> Result<Vec<SavedMakefile>> {
    Ok(serde_json::from_str(json)?)
}

fn upsert(makefiles: &mut Vec<SavedMakefile>, makefile: SavedMakefile) {
    match makefiles.iter_mut().find(|m| m.name == makefile.name) {
        Some(existing) => existing.entries = makefile.entries,
        None => makefiles.push(makefile),
    }
}

fn remove(makefiles: &mut Vec<SavedMakefile>, name: &str) -> bool {
    let before = makefiles.len();
    makefiles.retain(|m| m.name != name);
    makefiles.len() != before
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    makefiles: Vec<SavedMakefile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn into_inner(self) -> Vec<SavedMakefile> {
        self.makefiles
    }
}

impl From<Vec<SavedMakefile>> for MemoryStore {
    fn from(makefiles: Vec<SavedMakefile>) -> Self {
        MemoryStore { makefiles }
    }
}

impl MakefileStore for MemoryStore {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self.makefiles.iter().map(|m| m.name.clone()).collect())
    }

    fn load(&self, name: &str) -> Result<Option<SavedMakefile>> {
        Ok(self.makefiles.iter().find(|m| m.name == name).cloned())
    }

    fn save(&mut self, makefile: SavedMakefile) -> Result<()> {
        upsert(&mut self.makefiles, makefile);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        Ok(remove(&mut self.makefiles, name))
    }
}

/// Store backed by a single JSON file holding the whole collection.
///
/// A missing file reads as an empty collection. Every write rewrites the
/// file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every saved makefile in the file.
    pub fn read_all(&self) -> Result<Vec<SavedMakefile>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => import_json(&json),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file contents with `makefiles`.
    pub fn write_all(&self, makefiles: &[SavedMakefile]) -> Result<()> {
        fs::write(&self.path, export_json(makefiles)?)?;
        debug!(path = %self.path.display(), count = makefiles.len(), "wrote saved makefiles");
        Ok(())
    }
}

impl MakefileStore for JsonFileStore {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self.read_all()?.into_iter().map(|m| m.name).collect())
    }

    fn load(&self, name: &str) -> Result<Option<SavedMakefile>> {
        Ok(self.read_all()?.into_iter().find(|m| m.name == name))
    }

    fn save(&mut self, makefile: SavedMakefile) -> Result<()> {
        let mut makefiles = self.read_all()?;
        upsert(&mut makefiles, makefile);
        self.write_all(&makefiles)
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        let mut makefiles = self.read_all()?;
        let removed = remove(&mut makefiles, name);
        if removed {
            self.write_all(&makefiles)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    fn sample(name: &str) -> SavedMakefile {
        let makefile = Makefile::parse("CC=gcc\nbuild: ## Build\n\t$(CC) main.c").unwrap();
        SavedMakefile::new(name, makefile)
    }

    fn exercise(store: &mut dyn MakefileStore) {
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.load("web").unwrap(), None);

        store.save(sample("web")).unwrap();
        store.save(sample("cli")).unwrap();
        assert_eq!(store.list().unwrap(), vec!["web", "cli"]);

        let replacement = SavedMakefile::new("web", Makefile::parse("all:").unwrap());
        store.save(replacement.clone()).unwrap();
        assert_eq!(store.list().unwrap(), vec!["web", "cli"]);
        assert_eq!(store.load("web").unwrap(), Some(replacement));

        assert!(store.delete("web").unwrap());
        assert!(!store.delete("web").unwrap());
        assert_eq!(store.list().unwrap(), vec!["cli"]);
        let cli = store.load("cli").unwrap().unwrap();
        assert_eq!(cli.makefile().render(), "CC=gcc\nbuild: ## Build\n\t$(CC) main.c");
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert_eq!(store.into_inner().len(), 1);
    }

    #[test]
    fn json_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("saved.json"));
        exercise(&mut store);

        let reopened = JsonFileStore::new(store.path());
        assert_eq!(reopened.list().unwrap(), vec!["cli"]);
    }

    #[test]
    fn json_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.list().unwrap_err(), Error::Json(_)));
    }

    #[test]
    fn export_import_round_trip() {
        let makefiles = vec![sample("a"), sample("b")];
        let json = export_json(&makefiles).unwrap();
        assert!(json.contains("\n  {"));
        assert_eq!(import_json(&json).unwrap(), makefiles);
    }

    #[test]
    fn import_legacy_targets_field() {
        let json = r#"[
            {"name": "old", "targets": [{"type": "target", "name": "all", "dependents": "app"}]},
            {"name": "empty"}
        ]"#;
        let makefiles = import_json(json).unwrap();
        assert_eq!(makefiles[0].entries, vec![Entry::target("all", "app")]);
        assert!(makefiles[1].entries.is_empty());
    }
}
