use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::{Error, Result};

/// An external command: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl Cmd {
    pub fn new<T>(program: T) -> Self
    where
        T: Into<String>, {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn add_arg<T>(mut self, arg: T) -> Self
    where
        T: Into<OsString>, {
        self.args.push(arg.into());
        self
    }

    pub fn add_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>, {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn add_path_arg<P>(self, path: P) -> Self
    where
        P: AsRef<Path>, {
        self.add_arg(path.as_ref().as_os_str())
    }

    pub fn add_define<K, V>(self, key: K, value: V) -> Self
    where
        K: fmt::Display,
        V: fmt::Display, {
        self.add_arg(format!("-D{}={}", key, value))
    }

    pub fn set_current_dir<P>(mut self, dir: P) -> Self
    where
        P: Into<PathBuf>, {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How a finished external process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit {
    code: Option<i32>,
}

impl Exit {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process terminated without an exit code, e.g. by a signal.
    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for Exit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self { code: status.code() }
    }
}

/// Runs external commands to completion.
pub trait Runner {
    fn run(&mut self, cmd: &Cmd) -> Result<Exit>;
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner {
    verbose: bool,
}

impl ProcessRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Runner for ProcessRunner {
    fn run(&mut self, cmd: &Cmd) -> Result<Exit> {
        // resolves .cmd shims such as pnpm.cmd on windows
        let program = which::which(cmd.program()).map_err(|_| Error::ToolNotFound {
            program: cmd.program().to_string(),
        })?;

        if self.verbose {
            println!("Running: {}", cmd);
        }

        let mut command = Command::new(&program);
        command.args(cmd.args());
        if let Some(dir) = cmd.current_dir() {
            command.current_dir(dir);
        }

        let status = command.status()?;
        tracing::debug!(code = ?status.code(), "`{}` exited", cmd.program());

        Ok(status.into())
    }
}
