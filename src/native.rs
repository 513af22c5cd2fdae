//! CMake configure and build driver.
//!
//! ```no_run
//! use buildr::{NativeBuild, NativeOptions, ProcessRunner};
//!
//! let options = NativeOptions::new(".").release(true).clean(true);
//! let report = NativeBuild::new(options).run(&mut ProcessRunner::new(false))?;
//! println!("{}", report.build_dir.display());
//! # Ok::<(), buildr::Error>(())
//! ```

use std::path::{Path, PathBuf};

use crate::{
    cmake::{BuildType, CMakePresets},
    cmd::{Cmd, Runner},
    error::{Error, Phase, Result},
    platform::{self, Platform},
};

#[derive(Debug, Clone)]
pub struct NativeOptions {
    project_root: PathBuf,
    clean: bool,
    release: bool,
    jobs: Option<usize>,
    generator: Option<String>,
    preset: Option<String>,
}

impl NativeOptions {
    pub fn new<P>(project_root: P) -> Self
    where
        P: Into<PathBuf>, {
        Self {
            project_root: project_root.into(),
            clean: false,
            release: false,
            jobs: None,
            generator: None,
            preset: None,
        }
    }

    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn release(mut self, release: bool) -> Self {
        self.release = release;
        self
    }

    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn generator<T>(mut self, generator: Option<T>) -> Self
    where
        T: Into<String>, {
        self.generator = generator.map(Into::into);
        self
    }

    pub fn preset<T>(mut self, preset: Option<T>) -> Self
    where
        T: Into<String>, {
        self.preset = preset.map(Into::into);
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn build_type(&self) -> BuildType {
        BuildType::from_release(self.release)
    }

    /// `<project_root>/build/<debug|release>`.
    pub fn build_dir(&self) -> PathBuf {
        build_dir(&self.project_root, self.build_type())
    }
}

/// Build directory for `build_type` under `project_root`.
pub fn build_dir(project_root: &Path, build_type: BuildType) -> PathBuf {
    project_root.join("build").join(build_type.dir_name())
}

/// Result of a successful native build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub build_type: BuildType,
    pub build_dir: PathBuf,
}

pub struct NativeBuild {
    options: NativeOptions,
    platform: Platform,
}

impl NativeBuild {
    pub fn new(options: NativeOptions) -> Self {
        Self::with_platform(options, Platform::current())
    }

    pub fn with_platform(options: NativeOptions, platform: Platform) -> Self {
        Self { options, platform }
    }

    pub fn options(&self) -> &NativeOptions {
        &self.options
    }

    pub fn configure_command(&self) -> Cmd {
        let options = &self.options;
        let mut cmd = Cmd::new("cmake")
            .add_arg("-S")
            .add_path_arg(&options.project_root)
            .add_arg("-B")
            .add_path_arg(options.build_dir());

        // a preset picks its own generator unless one is forced
        let generator = match &options.preset {
            Some(_) => options.generator.as_deref(),
            None => options.generator.as_deref().or(self.platform.generator()),
        };
        if let Some(generator) = generator {
            cmd = cmd.add_args(["-G", generator]);
        }
        if let Some(preset) = &options.preset {
            cmd = cmd.add_arg(format!("--preset={}", preset));
        }

        cmd.add_define("CMAKE_BUILD_TYPE", options.build_type())
    }

    pub fn build_command(&self) -> Cmd {
        let options = &self.options;
        let jobs = options.jobs.unwrap_or_else(platform::cpu_count);

        Cmd::new("cmake")
            .add_arg("--build")
            .add_path_arg(options.build_dir())
            .add_args(["--config", options.build_type().as_str()])
            .add_args(self.platform.parallel_args(jobs))
    }

    /// Cleans and creates the build directory, then configures and builds.
    pub fn run<R>(&self, runner: &mut R) -> Result<BuildReport>
    where
        R: Runner + ?Sized, {
        let options = &self.options;
        let build_type = options.build_type();
        let build_dir = options.build_dir();

        tracing::info!("Detected OS: {}", self.platform.name());
        tracing::info!("Building in {} mode", build_type);

        if !options.project_root.join("CMakeLists.txt").exists() {
            tracing::warn!("no CMakeLists.txt in {}", options.project_root.display());
        }

        if let Some(name) = &options.preset {
            let presets = CMakePresets::load(&options.project_root)?;
            if presets.get_preset(name).is_none() {
                return Err(Error::Preset {
                    message: format!("preset {} not found", name),
                });
            }
        }

        if options.clean && build_dir.exists() {
            tracing::info!("Cleaning build directory: {}", build_dir.display());
            std::fs::remove_dir_all(&build_dir)?;
        }
        std::fs::create_dir_all(&build_dir)?;

        tracing::info!("Configuring CMake project...");
        run_phase(runner, &self.configure_command(), Phase::Configure)?;

        tracing::info!("Building project...");
        run_phase(runner, &self.build_command(), Phase::Build)?;

        Ok(BuildReport { build_type, build_dir })
    }
}

pub(crate) fn run_phase<R>(runner: &mut R, cmd: &Cmd, phase: Phase) -> Result<()>
where
    R: Runner + ?Sized, {
    let exit = runner.run(cmd)?;
    if !exit.success() {
        return Err(Error::CommandFailed { phase, code: exit.code() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::Exit;

    /// Records every command and answers with scripted exit codes.
    struct Scripted {
        codes: Vec<i32>,
        seen: Vec<Cmd>,
    }

    impl Runner for Scripted {
        fn run(&mut self, cmd: &Cmd) -> Result<Exit> {
            self.seen.push(cmd.clone());
            let code = if self.codes.is_empty() { 0 } else { self.codes.remove(0) };
            Ok(Exit::from_code(code))
        }
    }

    fn scripted(codes: &[i32]) -> Scripted {
        Scripted { codes: codes.to_vec(), seen: Vec::new() }
    }

    #[test]
    fn build_dir_is_lowercase_for_every_flag_combination() {
        for clean in [false, true] {
            for release in [false, true] {
                let options = NativeOptions::new("/proj").clean(clean).release(release);
                let expected = if release { "/proj/build/release" } else { "/proj/build/debug" };
                assert_eq!(options.build_dir(), PathBuf::from(expected));
            }
        }
    }

    #[test]
    fn configure_command_per_platform() {
        let options = NativeOptions::new("/proj").release(true);
        let linux = NativeBuild::with_platform(options.clone(), Platform::Linux);
        assert_eq!(
            linux.configure_command().args(),
            [
                "-S",
                "/proj",
                "-B",
                "/proj/build/release",
                "-G",
                "Unix Makefiles",
                "-DCMAKE_BUILD_TYPE=Release",
            ]
        );

        let other = NativeBuild::with_platform(options, Platform::Other);
        assert!(!other.configure_command().args().iter().any(|a| a == "-G"));
    }

    #[test]
    fn build_command_uses_jobs() {
        let options = NativeOptions::new("/proj").jobs(Some(6));

        let linux = NativeBuild::with_platform(options.clone(), Platform::Linux);
        assert_eq!(
            linux.build_command().to_string(),
            "cmake --build /proj/build/debug --config Debug -- -j6"
        );

        let windows = NativeBuild::with_platform(options, Platform::Windows);
        assert_eq!(
            &windows.build_command().args()[3..],
            ["Debug", "--parallel", "6"]
        );
    }

    #[test]
    fn generator_override() {
        let options = NativeOptions::new("/proj").generator(Some("Ninja"));
        let build = NativeBuild::with_platform(options, Platform::Windows);
        let args = build.configure_command().args().to_vec();
        let pos = args.iter().position(|a| a == "-G").unwrap();
        assert_eq!(args[pos + 1], "Ninja");
    }

    #[test]
    fn preset_keeps_its_own_generator() {
        let options = NativeOptions::new("/proj").preset(Some("default"));
        let build = NativeBuild::with_platform(options.clone(), Platform::Linux);
        let args = build.configure_command().args().to_vec();
        assert!(!args.iter().any(|a| a == "-G"));
        assert!(args.iter().any(|a| a == "--preset=default"));

        let forced = NativeBuild::with_platform(options.generator(Some("Ninja")), Platform::Linux);
        let args = forced.configure_command().args().to_vec();
        let pos = args.iter().position(|a| a == "-G").unwrap();
        assert_eq!(args[pos + 1], "Ninja");
    }

    #[test]
    fn failed_configure_skips_build() {
        let dir = tempfile::tempdir().unwrap();
        let build = NativeBuild::with_platform(NativeOptions::new(dir.path()), Platform::Linux);
        let mut runner = scripted(&[1]);

        let err = build.run(&mut runner).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { phase: Phase::Configure, code: Some(1) }));
        assert_eq!(runner.seen.len(), 1);
        assert_eq!(runner.seen[0].args()[0], "-S");
    }

    #[test]
    fn failed_build_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let build = NativeBuild::with_platform(NativeOptions::new(dir.path()), Platform::Linux);
        let mut runner = scripted(&[0, 2]);

        let err = build.run(&mut runner).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { phase: Phase::Build, code: Some(2) }));
        assert_eq!(runner.seen.len(), 2);
    }

    #[test]
    fn unknown_preset_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("CMakePresets.json"),
            r#"{ "configurePresets": [ { "name": "default" } ] }"#,
        )
        .unwrap();

        let options = NativeOptions::new(dir.path()).preset(Some("ci"));
        let mut runner = scripted(&[]);
        let err = NativeBuild::new(options).run(&mut runner).unwrap_err();

        assert!(matches!(err, Error::Preset { .. }));
        assert!(runner.seen.is_empty());
        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn known_preset_is_passed_to_configure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("CMakePresets.json"),
            r#"{ "configurePresets": [ { "name": "default" } ] }"#,
        )
        .unwrap();

        let options = NativeOptions::new(dir.path()).preset(Some("default"));
        let mut runner = scripted(&[]);
        NativeBuild::new(options).run(&mut runner).unwrap();

        assert!(runner.seen[0].args().iter().any(|a| a == "--preset=default"));
    }
}
