//! Platform lookup table for CMake generator and parallel build flags.

/// The operating system the driver runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "Darwin",
            Platform::Linux => "Linux",
            Platform::Other => std::env::consts::OS,
        }
    }

    /// Generator passed to `cmake -G`, if the platform has a fixed one.
    pub fn generator(&self) -> Option<&'static str> {
        match self {
            Platform::Windows => Some("Visual Studio 17 2022"),
            Platform::MacOs | Platform::Linux => Some("Unix Makefiles"),
            Platform::Other => None,
        }
    }

    /// Arguments appended to `cmake --build` to run `jobs` jobs in parallel.
    pub fn parallel_args(&self, jobs: usize) -> Vec<String> {
        match self {
            Platform::Windows => vec!["--parallel".to_string(), jobs.to_string()],
            Platform::MacOs | Platform::Linux => vec!["--".to_string(), format!("-j{}", jobs)],
            Platform::Other => Vec::new(),
        }
    }
}

/// Number of CPUs available, 2 when it cannot be determined.
pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
}
