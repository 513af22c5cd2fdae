//! # buildr
//!
//! Build drivers for a CMake project and its pnpm web frontend.
//!
//! [`NativeBuild`] configures and builds the native project under
//! `build/<debug|release>`, picking the CMake generator and parallel flags for
//! the current platform. [`WebBundle`] runs `pnpm build` and packs `dist/`
//! into `tmp/app.zip`.
//!
//! External programs run through a [`Runner`]; [`ProcessRunner`] spawns them
//! as child processes.
//!
//! ```no_run
//! use buildr::{ProcessRunner, WebBundle, WebBundleOptions};
//!
//! let archive = WebBundle::new(WebBundleOptions::default())
//!     .run(&mut ProcessRunner::new(false))?;
//! println!("Build and zip completed: {}", archive.display());
//! # Ok::<(), buildr::Error>(())
//! ```

pub mod archive;
pub mod cmake;
pub mod cmd;
pub mod error;
pub mod logger;
pub mod native;
pub mod platform;
pub mod webapp;

pub use cmake::BuildType;
pub use cmd::{Cmd, Exit, ProcessRunner, Runner};
pub use error::{Error, Phase, Result};
pub use native::{BuildReport, NativeBuild, NativeOptions};
pub use platform::Platform;
pub use webapp::{WebBundle, WebBundleOptions};
