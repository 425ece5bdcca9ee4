//! Parallel rendering of the whole asset catalog to disk.
//!
//! Assets are pulled from a shared counter by `std::thread::scope` workers;
//! each worker renders and writes independently, so one failure (or panic)
//! never stops the others.

use std::path::{Path, PathBuf};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::thread;

use microbe_forge_assets::{snapshot, AssetDescriptor, Category};
use microbe_forge_core::{EngineError, RenderConfig};
use tracing::{debug, info, warn};

use crate::error::CliError;

/// What happened to one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    /// The file already existed and `--force` was not given.
    Skipped(PathBuf),
    Failed(String),
}

/// Where `asset` lands under `root`.
pub fn output_path(root: &Path, asset: &AssetDescriptor) -> PathBuf {
    root.join(format!("{}.png", asset.file_stem()))
}

/// Renders and writes one asset.
fn produce(
    root: &Path,
    asset: &AssetDescriptor,
    config: &RenderConfig,
    force: bool,
) -> Result<Outcome, EngineError> {
    let path = output_path(root, asset);
    if !force && path.exists() {
        return Ok(Outcome::Skipped(path));
    }
    let image = asset.synthesize(config)?;
    snapshot::write_png(&image, &path)?;
    Ok(Outcome::Written(path))
}

/// Runs `work` for every index in `0..count` on `jobs` scoped threads.
///
/// Each result lands in its own slot as soon as it is produced, and a panic
/// inside `work` is caught per index, so finished work is never lost.
fn fan_out<F>(count: usize, jobs: usize, work: F) -> Vec<Outcome>
where
    F: Fn(usize) -> Outcome + Sync,
{
    let next = AtomicUsize::new(0);
    let slots: Vec<OnceLock<Outcome>> = (0..count).map(|_| OnceLock::new()).collect();

    thread::scope(|s| {
        for _ in 0..jobs.clamp(1, count.max(1)) {
            s.spawn(|| loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                let Some(slot) = slots.get(i) else { break };
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| work(i)))
                    .unwrap_or_else(|_| {
                        warn!(index = i, "asset panicked");
                        Outcome::Failed("panicked while rendering".into())
                    });
                let _ = slot.set(outcome);
            });
        }
    });

    slots
        .into_iter()
        .map(|slot| {
            slot.into_inner()
                .unwrap_or_else(|| Outcome::Failed("never rendered".into()))
        })
        .collect()
}

/// Renders every asset in `assets` into `root`, `jobs` at a time.
///
/// Returns the outcomes in `assets` order. Only setup failures (the output
/// directories) are errors; per-asset failures are reported as
/// [`Outcome::Failed`].
pub fn run_batch(
    root: &Path,
    assets: &[AssetDescriptor],
    config: &RenderConfig,
    force: bool,
    jobs: usize,
) -> Result<Vec<Outcome>, CliError> {
    config.validate()?;
    for category in [Category::Germs, Category::Tiles] {
        let dir = root.join(category.dir_name());
        std::fs::create_dir_all(&dir)
            .map_err(|source| CliError::CreateDir { path: dir.clone(), source })?;
    }

    info!(assets = assets.len(), jobs, root = %root.display(), "starting batch");
    Ok(fan_out(assets.len(), jobs, |i| {
        let asset = &assets[i];
        let outcome = produce(root, asset, config, force).unwrap_or_else(|e| {
            warn!(asset = %asset, error = %e, "asset failed");
            Outcome::Failed(e.to_string())
        });
        debug!(asset = %asset, ?outcome, "asset done");
        outcome
    }))
}

/// Worker count when `--jobs` is not given: one per available core.
pub fn default_jobs() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RenderConfig {
        RenderConfig { canvas_size: 64, output_size: 32 }
    }

    #[test]
    fn output_paths_follow_categories() {
        let root = Path::new("out");
        let coccus = AssetDescriptor::from_name("coccus").unwrap();
        let tile = AssetDescriptor::from_name("tile_empty_w3").unwrap();
        assert_eq!(output_path(root, &coccus), root.join("germs/coccus.png"));
        assert_eq!(output_path(root, &tile), root.join("tiles/tile_empty_w3.png"));
    }

    #[test]
    fn batch_writes_every_asset() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetDescriptor::catalog();
        let outcomes = run_batch(dir.path(), &catalog, &small(), false, 4).unwrap();
        assert_eq!(outcomes.len(), 26);
        for (asset, outcome) in catalog.iter().zip(&outcomes) {
            let expected = output_path(dir.path(), asset);
            assert_eq!(outcome, &Outcome::Written(expected.clone()));
            assert!(expected.is_file());
        }
    }

    #[test]
    fn existing_files_are_skipped_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let assets = [
            AssetDescriptor::from_name("spore").unwrap(),
            AssetDescriptor::from_name("tile_wall_w1").unwrap(),
        ];
        run_batch(dir.path(), &assets, &small(), false, 2).unwrap();

        let again = run_batch(dir.path(), &assets, &small(), false, 2).unwrap();
        assert!(again.iter().all(|o| matches!(o, Outcome::Skipped(_))));

        let forced = run_batch(dir.path(), &assets, &small(), true, 2).unwrap();
        assert!(forced.iter().all(|o| matches!(o, Outcome::Written(_))));
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let assets = [
            AssetDescriptor::from_name("coccus").unwrap(),
            AssetDescriptor::from_name("phage").unwrap(),
        ];
        // A directory squatting on the output path makes that write fail.
        std::fs::create_dir_all(output_path(dir.path(), &assets[0])).unwrap();
        let outcomes = run_batch(dir.path(), &assets, &small(), true, 1).unwrap();
        assert!(matches!(outcomes[0], Outcome::Failed(_)));
        assert!(matches!(outcomes[1], Outcome::Written(_)));
    }

    #[test]
    fn invalid_config_fails_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig { canvas_size: 16, output_size: 32 };
        let result = run_batch(dir.path(), &AssetDescriptor::catalog(), &config, false, 1);
        assert!(matches!(result, Err(CliError::Render(_))));
    }

    #[test]
    fn panicking_asset_keeps_finished_outcomes() {
        let outcomes = fan_out(6, 2, |i| {
            if i == 3 {
                panic!("boom");
            }
            Outcome::Written(PathBuf::from(format!("{i}.png")))
        });
        assert_eq!(outcomes.len(), 6);
        for (i, outcome) in outcomes.iter().enumerate() {
            if i == 3 {
                assert_eq!(outcome, &Outcome::Failed("panicked while rendering".into()));
            } else {
                assert_eq!(outcome, &Outcome::Written(PathBuf::from(format!("{i}.png"))));
            }
        }
    }

    #[test]
    fn fan_out_with_nothing_to_do_is_empty() {
        assert!(fan_out(0, 4, |_| unreachable!()).is_empty());
    }

    #[test]
    fn zero_jobs_still_runs() {
        let dir = tempfile::tempdir().unwrap();
        let assets = [AssetDescriptor::from_name("yeast").unwrap()];
        let outcomes = run_batch(dir.path(), &assets, &small(), false, 0).unwrap();
        assert!(matches!(outcomes[0], Outcome::Written(_)));
    }
}
