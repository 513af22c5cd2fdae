//! Frontend build and zip packaging.

use std::path::{Path, PathBuf};

use crate::{
    archive,
    cmd::{Cmd, Runner},
    error::{Phase, Result},
    native::run_phase,
};

#[derive(Debug, Clone)]
pub struct WebBundleOptions {
    work_dir: PathBuf,
    dist_dir: PathBuf,
    tmp_dir: PathBuf,
    archive_name: String,
    program: String,
    args: Vec<String>,
}

impl Default for WebBundleOptions {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            dist_dir: PathBuf::from("dist"),
            tmp_dir: PathBuf::from("tmp"),
            archive_name: "app.zip".to_string(),
            program: "pnpm".to_string(),
            args: vec!["build".to_string()],
        }
    }
}

impl WebBundleOptions {
    /// Resolves `dist/`, `tmp/` and the build command relative to `work_dir`.
    pub fn set_work_dir<P>(mut self, work_dir: P) -> Self
    where
        P: Into<PathBuf>, {
        self.work_dir = work_dir.into();
        self
    }

    pub fn set_command<T, I, A>(mut self, program: T, args: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>, {
        self.program = program.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.work_dir.join(&self.dist_dir)
    }

    pub fn tmp_dir(&self) -> PathBuf {
        self.work_dir.join(&self.tmp_dir)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.tmp_dir().join(&self.archive_name)
    }

    pub fn build_command(&self) -> Cmd {
        Cmd::new(self.program.as_str())
            .add_args(self.args.iter().cloned())
            .set_current_dir(self.work_dir.clone())
    }
}

pub struct WebBundle {
    options: WebBundleOptions,
}

impl WebBundle {
    pub fn new(options: WebBundleOptions) -> Self {
        Self { options }
    }

    /// Runs the frontend build and replaces the archive with a zip of `dist/`.
    pub fn run<R>(&self, runner: &mut R) -> Result<PathBuf>
    where
        R: Runner + ?Sized, {
        let options = &self.options;
        std::fs::create_dir_all(options.tmp_dir())?;

        let build = options.build_command();
        tracing::info!("Running {}...", build);
        run_phase(runner, &build, Phase::WebBuild)?;

        let archive_path = options.archive_path();
        tracing::info!("Creating zip archive...");
        remove_stale(&archive_path)?;
        archive::zip_dir(&options.dist_dir(), &archive_path)?;

        Ok(archive_path)
    }
}

fn remove_stale(path: &Path) -> Result<()> {
    if path.exists() {
        tracing::debug!("removing previous archive {}", path.display());
        std::fs::remove_file(path)?;
    }
    Ok(())
}
