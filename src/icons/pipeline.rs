use crate::icons::{Density, Rasterizer, Resizer};
use crate::utils::Result;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const ICON_FILE: &str = "ic_launcher.png";
pub const ROUND_ICON_FILE: &str = "ic_launcher_round.png";
pub const TEMP_ICON_FILE: &str = "temp_icon.png";

/// Rasterizes the source vector once, then fans the thumbnail out into
/// every density bucket under the resource root. The round variant reuses
/// the square image verbatim; no mask is applied.
pub struct IconPipeline {
    rasterizer: Rasterizer,
    resizer: Resizer,
    source: PathBuf,
    res_root: PathBuf,
    work_dir: PathBuf,
    thumb_size: u32,
}

impl IconPipeline {
    pub fn new(
        rasterizer: Rasterizer,
        resizer: Resizer,
        source: PathBuf,
        res_root: PathBuf,
        work_dir: PathBuf,
        thumb_size: u32,
    ) -> Self {
        Self {
            rasterizer,
            resizer,
            source,
            res_root,
            work_dir,
            thumb_size,
        }
    }

    pub fn run(&self) -> Result<()> {
        log::info!(
            "Rasterizing {} at {} px",
            self.source.display(),
            self.thumb_size
        );
        let thumb = self.make_thumbnail()?;

        for density in Density::ALL {
            let bucket_dir = self.res_root.join(density.mipmap_dir());
            fs::create_dir_all(&bucket_dir)
                .map_err(|e| format!("Directory {}: {}", bucket_dir.display(), e))?;

            let size = density.icon_size();
            for file_name in [ICON_FILE, ROUND_ICON_FILE] {
                let output = bucket_dir.join(file_name);
                log::info!("Creating {} ({}x{})", output.display(), size, size);
                self.resizer.resize(&thumb, &output, size)?;
            }
        }

        // Intermediate cleanup happens only once every icon is written; a
        // failure above leaves the thumbnail in place for inspection.
        if thumb.exists() {
            fs::remove_file(&thumb).map_err(|e| format!("File {}: {}", thumb.display(), e))?;
        }

        log::info!("All icons created successfully");
        Ok(())
    }

    /// Runs the rasterizer and renames its derived output file to the fixed
    /// intermediate name. If the tool produced nothing at the expected path
    /// the rename is skipped and the first resize fails on the missing file.
    fn make_thumbnail(&self) -> Result<PathBuf> {
        let rendered = self
            .rasterizer
            .rasterize(&self.source, self.thumb_size, &self.work_dir)?;
        let thumb = self.work_dir.join(TEMP_ICON_FILE);
        if rendered.exists() {
            fs::rename(&rendered, &thumb)
                .map_err(|e| format!("File {}: {}", rendered.display(), e))?;
        }
        Ok(thumb)
    }
}

/// Returns the output path for one (density, variant) pair.
pub fn icon_path(res_root: &Path, density: Density, round: bool) -> PathBuf {
    let file_name = if round { ROUND_ICON_FILE } else { ICON_FILE };
    res_root.join(density.mipmap_dir()).join(file_name)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    // Fake rasterizer with qlmanage's argument shape: copies the source to
    // "<out_dir>/<source filename>.png".
    const FAKE_RASTERIZER: &str = "#!/bin/sh\ncp \"$6\" \"$5/$(basename \"$6\").png\"\n";

    // Fake resizer with sips' argument shape: copies input to output.
    const FAKE_RESIZER: &str = "#!/bin/sh\ncp \"$4\" \"$6\"\n";

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn pipeline_in(dir: &Path, rasterizer_body: &str, resizer_body: &str) -> IconPipeline {
        let rasterizer = write_script(dir, "fake_rasterizer", rasterizer_body);
        let resizer = write_script(dir, "fake_resizer", resizer_body);
        let source = dir.join("app_icon.svg");
        fs::write(&source, b"<svg>fake vector</svg>").unwrap();
        IconPipeline::new(
            Rasterizer::new(rasterizer.to_str().unwrap()),
            Resizer::new(resizer.to_str().unwrap()),
            source,
            dir.join("app/src/main/res"),
            dir.to_path_buf(),
            200,
        )
    }

    #[test]
    fn test_run_creates_all_icons_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline_in(dir.path(), FAKE_RASTERIZER, FAKE_RESIZER);
        pipeline.run().unwrap();

        let res_root = dir.path().join("app/src/main/res");
        for density in Density::ALL {
            let icon = icon_path(&res_root, density, false);
            let round = icon_path(&res_root, density, true);
            assert!(icon.exists(), "missing {}", icon.display());
            assert!(round.exists(), "missing {}", round.display());
            assert_eq!(
                fs::read(&icon).unwrap(),
                fs::read(&round).unwrap(),
                "round variant differs for {}",
                density
            );
        }
        assert!(!dir.path().join(TEMP_ICON_FILE).exists());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline_in(dir.path(), FAKE_RASTERIZER, FAKE_RESIZER);
        pipeline.run().unwrap();
        let res_root = dir.path().join("app/src/main/res");
        let first = fs::read(icon_path(&res_root, Density::Xxxhdpi, false)).unwrap();
        pipeline.run().unwrap();
        let second = fs::read(icon_path(&res_root, Density::Xxxhdpi, false)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rasterizer_failure_creates_no_outputs() {
        let dir = TempDir::new().unwrap();
        let pipeline = pipeline_in(dir.path(), "#!/bin/sh\nexit 3\n", FAKE_RESIZER);
        assert!(pipeline.run().is_err());
        assert!(!dir.path().join("app").exists());
        assert!(!dir.path().join(TEMP_ICON_FILE).exists());
    }

    #[test]
    fn test_resizer_failure_keeps_earlier_outputs_and_thumbnail() {
        let dir = TempDir::new().unwrap();
        // Fails on the xhdpi bucket; mdpi and hdpi run before it.
        let failing_resizer =
            "#!/bin/sh\ncase \"$6\" in *mipmap-xhdpi*) exit 1;; esac\ncp \"$4\" \"$6\"\n";
        let pipeline = pipeline_in(dir.path(), FAKE_RASTERIZER, failing_resizer);
        assert!(pipeline.run().is_err());

        let res_root = dir.path().join("app/src/main/res");
        assert!(icon_path(&res_root, Density::Mdpi, true).exists());
        assert!(icon_path(&res_root, Density::Hdpi, true).exists());
        assert!(!icon_path(&res_root, Density::Xhdpi, false).exists());
        assert!(!icon_path(&res_root, Density::Xxhdpi, false).exists());
        assert!(dir.path().join(TEMP_ICON_FILE).exists());
    }

    #[test]
    fn test_missing_rasterizer_output_fails_on_first_resize() {
        let dir = TempDir::new().unwrap();
        // Rasterizer exits 0 but writes nothing, so temp_icon.png never
        // appears and the first resize fails on the missing input.
        let pipeline = pipeline_in(dir.path(), "#!/bin/sh\nexit 0\n", FAKE_RESIZER);
        assert!(pipeline.run().is_err());
        assert!(!dir.path().join(TEMP_ICON_FILE).exists());
    }
}
