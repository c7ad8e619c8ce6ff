//! JSON document adapter for [`TalkerRepository`].

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::{debug, warn};

use super::atomic_io::write_atomic;
use crate::domain::TraceId;
use crate::domain::Talker;
use crate::domain::ports::{TalkerPersistenceError, TalkerRepository};

/// Errors raised while opening the document location.
#[derive(Debug, thiserror::Error)]
pub enum StoreOpenError {
    /// The configured path has no file name component.
    #[error("talker store path {path} must name a file")]
    MissingFileName { path: PathBuf },
    /// The parent directory could not be opened.
    #[error("failed to open talker store directory {path}: {source}")]
    OpenDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Talker repository persisting the collection as one JSON document.
///
/// The parent directory is opened once as a capability handle; every load
/// re-reads the document and every save rewrites it.
///
/// # Examples
/// ```no_run
/// use backend::outbound::persistence::JsonFileTalkerRepository;
///
/// let repo = JsonFileTalkerRepository::open("talker.json").expect("open store");
/// assert_eq!(repo.path().file_name().and_then(|n| n.to_str()), Some("talker.json"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileTalkerRepository {
    dir: Arc<Dir>,
    file_name: String,
    path: PathBuf,
}

impl JsonFileTalkerRepository {
    /// Open the directory containing `path`; the file itself may not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreOpenError> {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreOpenError::MissingFileName { path: path.clone() })?
            .to_owned();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let dir = Dir::open_ambient_dir(&parent, ambient_authority()).map_err(|source| {
            StoreOpenError::OpenDirectory {
                path: parent.clone(),
                source,
            }
        })?;
        Ok(Self {
            dir: Arc::new(dir),
            file_name,
            path,
        })
    }

    /// Configured document path.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn read_blocking(&self) -> Result<Vec<Talker>, TalkerPersistenceError> {
        let text = match self.dir.read_to_string(&self.file_name) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "talker document absent; treating as empty");
                return Ok(Vec::new());
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "talker document unreadable");
                return Err(TalkerPersistenceError::unreadable(err.to_string()));
            }
        };
        serde_json::from_str(&text).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "talker document malformed");
            TalkerPersistenceError::malformed(err.to_string())
        })
    }

    fn write_blocking(&self, talkers: &[Talker]) -> Result<(), TalkerPersistenceError> {
        let contents = serde_json::to_string_pretty(talkers)
            .map_err(|err| TalkerPersistenceError::write_failed(err.to_string()))?;
        write_atomic(&self.dir, &self.file_name, &contents).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "talker document write failed");
            TalkerPersistenceError::write_failed(err.to_string())
        })
    }
}

#[async_trait]
impl TalkerRepository for JsonFileTalkerRepository {
    async fn load(&self) -> Result<Vec<Talker>, TalkerPersistenceError> {
        let repo = self.clone();
        let trace_id = TraceId::current();
        tokio::task::spawn_blocking(move || {
            TraceId::in_blocking_scope(trace_id, || repo.read_blocking())
        })
        .await
        .map_err(|err| TalkerPersistenceError::unreadable(format!("load task failed: {err}")))?
    }

    async fn save(&self, talkers: &[Talker]) -> Result<(), TalkerPersistenceError> {
        let repo = self.clone();
        let talkers = talkers.to_vec();
        let trace_id = TraceId::current();
        tokio::task::spawn_blocking(move || {
            TraceId::in_blocking_scope(trace_id, || repo.write_blocking(&talkers))
        })
        .await
        .map_err(|err| TalkerPersistenceError::write_failed(format!("save task failed: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    struct Store {
        tmp: tempfile::TempDir,
        repo: JsonFileTalkerRepository,
    }

    impl Store {
        fn write_raw(&self, contents: &str) {
            std::fs::write(self.tmp.path().join("talker.json"), contents).expect("seed document");
        }

        fn read_raw(&self) -> String {
            std::fs::read_to_string(self.tmp.path().join("talker.json")).expect("read document")
        }
    }

    #[fixture]
    fn store() -> Store {
        let tmp = tempfile::tempdir().expect("temp dir");
        let repo = JsonFileTalkerRepository::open(tmp.path().join("talker.json")).expect("open");
        Store { tmp, repo }
    }

    fn seed_document() -> serde_json::Value {
        json!([
            { "name": "Henrique Albuquerque", "age": 62, "id": 1,
              "talk": { "watchedAt": "23/10/2020", "rate": 5 } },
            { "name": "Heloísa Albuquerque", "age": 67, "id": 2,
              "talk": { "watchedAt": "23/10/2020", "rate": 5 } }
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn absent_document_loads_as_empty(store: Store) {
        assert!(store.repo.load().await.expect("load").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn loads_records_in_document_order(store: Store) {
        store.write_raw(&seed_document().to_string());
        let talkers = store.repo.load().await.expect("load");
        let names: Vec<&str> = talkers.iter().map(Talker::name).collect();
        assert_eq!(names, vec!["Henrique Albuquerque", "Heloísa Albuquerque"]);
    }

    #[rstest]
    #[case("")]
    #[case("{}")]
    #[case("[{\"id\": 1}]")]
    #[case("not json")]
    #[tokio::test]
    async fn malformed_documents_are_reported(store: Store, #[case] contents: &str) {
        store.write_raw(contents);
        let err = store.repo.load().await.expect_err("malformed");
        assert!(matches!(err, TalkerPersistenceError::Malformed { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn save_then_load_preserves_records(store: Store) {
        store.write_raw(&seed_document().to_string());
        let loaded = store.repo.load().await.expect("load");
        store.repo.save(&loaded).await.expect("save");
        let reloaded = store.repo.load().await.expect("reload");
        assert_eq!(loaded, reloaded);
        let on_disk: serde_json::Value =
            serde_json::from_str(&store.read_raw()).expect("document is JSON");
        assert_eq!(on_disk, seed_document());
    }

    #[rstest]
    #[tokio::test]
    async fn save_creates_the_document(store: Store) {
        store.repo.save(&[]).await.expect("save");
        assert_eq!(store.read_raw().trim(), "[]");
    }

    #[rstest]
    fn open_rejects_paths_without_file_name() {
        let err = JsonFileTalkerRepository::open("/").expect_err("no file name");
        assert!(matches!(err, StoreOpenError::MissingFileName { .. }));
    }

    #[rstest]
    fn open_rejects_missing_directories() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let err = JsonFileTalkerRepository::open(tmp.path().join("missing").join("talker.json"))
            .expect_err("missing parent");
        assert!(matches!(err, StoreOpenError::OpenDirectory { .. }));
    }
}
