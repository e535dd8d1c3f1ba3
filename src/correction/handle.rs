//! Shared, reloadable access to the active [`Corrector`].
//!
//! Readers clone an `Arc` under a short read lock and then correct without
//! holding any lock. A reload builds the new engine completely before the
//! swap, so in-flight calls finish on the engine they started with and a
//! failed reload leaves the old engine serving.

use crate::artifact::Artifact;
use crate::correction::mode::Mode;
use crate::correction::pipeline::{Corrector, CorrectorOptions};
use crate::correction::result::CorrectionResult;
use crate::error::{Result, ShuddhoError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

pub struct EngineHandle {
    current: RwLock<Arc<Corrector>>,
    manifest: Option<PathBuf>,
    options: CorrectorOptions,
}

impl EngineHandle {
    /// Wrap an already built engine. Such a handle has no manifest to reload
    /// from; use [`EngineHandle::replace`] instead.
    pub fn new(corrector: Corrector) -> Self {
        let options = *corrector.options();
        Self {
            current: RwLock::new(Arc::new(corrector)),
            manifest: None,
            options,
        }
    }

    /// Load the artifact at `manifest` and build the first engine.
    pub fn load(manifest: &Path, options: CorrectorOptions) -> Result<Self> {
        let artifact = Artifact::load(manifest)?;
        Ok(Self {
            current: RwLock::new(Arc::new(Corrector::new(artifact, options))),
            manifest: Some(manifest.to_path_buf()),
            options,
        })
    }

    /// The engine serving new calls right now.
    pub fn current(&self) -> Arc<Corrector> {
        // Poisoning only means a writer panicked mid-swap; the stored Arc is
        // still a complete engine.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn correct(&self, sentence: &str, mode: Mode) -> CorrectionResult {
        self.current().correct(sentence, mode)
    }

    /// Re-read the manifest this handle was loaded from and swap it in.
    ///
    /// On error the previous engine stays active.
    pub fn reload(&self) -> Result<()> {
        let manifest = self.manifest.as_deref().ok_or_else(|| {
            ShuddhoError::Other("engine was not loaded from a manifest".to_string())
        })?;
        let artifact = Artifact::load(manifest)?;
        self.replace(Corrector::new(artifact, self.options));
        tracing::info!(manifest = %manifest.display(), "artifact reloaded");
        Ok(())
    }

    /// Swap in a new engine.
    pub fn replace(&self, corrector: Corrector) {
        let next = Arc::new(corrector);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub fn manifest(&self) -> Option<&Path> {
        self.manifest.as_deref()
    }
}

static GLOBAL: OnceLock<EngineHandle> = OnceLock::new();

/// Install the process-wide engine. Only the first call succeeds.
pub fn install_global(handle: EngineHandle) -> Result<&'static EngineHandle> {
    GLOBAL
        .set(handle)
        .map_err(|_| ShuddhoError::Other("global engine already installed".to_string()))?;
    global().ok_or_else(|| ShuddhoError::Other("global engine missing".to_string()))
}

/// The process-wide engine, if one was installed.
pub fn global() -> Option<&'static EngineHandle> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{Lexicon, LexiconEntry};
    use crate::rules::RuleSet;
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    const MANIFEST: &str = "format = \"shuddho-artifact\"\nversion = 1\nlexicon = \"lexicon.tsv\"\n";

    fn write_artifact(dir: &TempDir, lexicon: &str) -> PathBuf {
        fs::write(dir.path().join("lexicon.tsv"), lexicon).unwrap();
        let path = dir.path().join("artifact.toml");
        fs::write(&path, MANIFEST).unwrap();
        path
    }

    fn in_memory(surface: &str, canonical: &str) -> Corrector {
        let lexicon = Lexicon::from_entries([LexiconEntry::new(surface, canonical, 1.0)]).unwrap();
        Corrector::new(
            Artifact::new(lexicon, RuleSet::default()),
            CorrectorOptions::default(),
        )
    }

    #[test]
    fn reload_swaps_in_new_artifact() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(&dir, "বীজ্ঞানী\tবিজ্ঞানী\n");
        let handle = EngineHandle::load(&path, CorrectorOptions::default()).unwrap();
        assert_eq!(handle.correct("বীজ্ঞানী", Mode::Conservative).corrected, "বিজ্ঞানী");

        let before = handle.current();
        write_artifact(&dir, "বীজ্ঞানী\tবীজ্ঞানী\n");
        handle.reload().unwrap();

        assert_eq!(handle.correct("বীজ্ঞানী", Mode::Conservative).corrected, "বীজ্ঞানী");
        // Callers holding the old engine keep their view.
        assert_eq!(before.correct("বীজ্ঞানী", Mode::Conservative).corrected, "বিজ্ঞানী");
    }

    #[test]
    fn failed_reload_keeps_old_engine() {
        let dir = TempDir::new().unwrap();
        let path = write_artifact(&dir, "ক\tখ\n");
        let handle = EngineHandle::load(&path, CorrectorOptions::default()).unwrap();

        fs::write(dir.path().join("lexicon.tsv"), "ক\n").unwrap();
        let err = handle.reload().unwrap_err();
        assert!(matches!(err, ShuddhoError::ArtifactLoad { .. }));
        assert_eq!(handle.correct("ক", Mode::Conservative).corrected, "খ");
    }

    #[test]
    fn in_memory_handle_cannot_reload() {
        let handle = EngineHandle::new(in_memory("ক", "খ"));
        assert!(handle.manifest().is_none());
        assert!(handle.reload().is_err());

        handle.replace(in_memory("ক", "গ"));
        assert_eq!(handle.correct("ক", Mode::Aggressive).corrected, "গ");
    }

    #[test]
    fn concurrent_readers_during_replace() {
        let handle = Arc::new(EngineHandle::new(in_memory("ক", "খ")));
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let out = handle.correct("ক", Mode::Conservative).corrected;
                        assert!(out == "খ" || out == "গ", "unexpected {out}");
                    }
                })
            })
            .collect();
        for _ in 0..20 {
            handle.replace(in_memory("ক", "গ"));
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(handle.correct("ক", Mode::Conservative).corrected, "গ");
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineHandle>();
    }
}
