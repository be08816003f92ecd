use std::ffi::OsString;
use std::path::{Path, PathBuf};

use sudoers_eventlog::{EventLogConfig, EventLogSettings, NullEventLog};
use sudoers_identity::{AccountDb, NameService, SystemAccounts, SystemNameService};
use sudoers_iolog::{OFFLINE_ESCAPES, PathExpander};

use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};

/// Finds the executable a command name refers to.
pub trait CommandResolver {
	/// Resolves `cmnd`, looking inside `chroot` when one is given.
	///
	/// The returned path is relative to the chroot, as the command will see it.
	fn resolve(&self, cmnd: &str, chroot: Option<&str>) -> Option<String>;
}

/// Searches a list of directories like `execvp(3)`.
#[derive(Debug, Clone, Default)]
pub struct PathCommandResolver {
	search_path: Vec<PathBuf>,
}

impl PathCommandResolver {
	pub fn new(search_path: Vec<PathBuf>) -> Self {
		Self { search_path }
	}

	/// Uses the directories in `PATH`.
	pub fn from_env() -> Self {
		let search_path = std::env::var_os("PATH")
			.map(|path| std::env::split_paths(&path).collect())
			.unwrap_or_default();
		Self { search_path }
	}

	/// Search directories as seen from outside `chroot`.
	fn search_path_in(&self, chroot: Option<&Path>) -> Option<OsString> {
		let dirs = self.search_path.iter().map(|dir| match chroot {
			Some(root) => root.join(dir.strip_prefix("/").unwrap_or(dir)),
			None => dir.clone(),
		});
		std::env::join_paths(dirs).ok()
	}
}

impl CommandResolver for PathCommandResolver {
	fn resolve(&self, cmnd: &str, chroot: Option<&str>) -> Option<String> {
		let root = chroot.map(Path::new);
		let name = match root {
			Some(root) if cmnd.starts_with('/') => root.join(&cmnd[1..]),
			_ => PathBuf::from(cmnd),
		};
		let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
		let found = which::which_in(&name, self.search_path_in(root), cwd).ok()?;
		let found = match root {
			Some(root) => Path::new("/").join(found.strip_prefix(root).ok()?),
			None => found,
		};
		tracing::debug!(cmnd, ?chroot, path = %found.display(), "resolved command");
		Some(found.to_string_lossy().into_owned())
	}
}

/// Reports every command as missing; used by tools that never execute one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotFoundCommandResolver;

impl CommandResolver for NotFoundCommandResolver {
	fn resolve(&self, _cmnd: &str, _chroot: Option<&str>) -> Option<String> {
		None
	}
}

/// Services the directive handlers call into.
pub struct Collaborators {
	pub names: Box<dyn NameService>,
	pub accounts: Box<dyn AccountDb>,
	pub commands: Box<dyn CommandResolver>,
	pub eventlog: Box<dyn EventLogConfig>,
	pub diagnostics: Box<dyn DiagnosticSink>,
	/// Escape table for I/O log path templates.
	pub paths: PathExpander,
}

impl Collaborators {
	/// Full policy agent wiring.
	pub fn agent() -> Self {
		Self {
			names: Box::new(SystemNameService),
			accounts: Box::new(SystemAccounts),
			commands: Box::new(PathCommandResolver::from_env()),
			eventlog: Box::new(EventLogSettings::default()),
			diagnostics: Box::new(TracingDiagnostics),
			paths: PathExpander::default(),
		}
	}

	/// Wiring for converters and editors, which neither run commands nor log
	/// events. `%{seq}` in log paths stays literal.
	pub fn offline() -> Self {
		Self {
			names: Box::new(SystemNameService),
			accounts: Box::new(SystemAccounts),
			commands: Box::new(NotFoundCommandResolver),
			eventlog: Box::new(NullEventLog),
			diagnostics: Box::new(TracingDiagnostics),
			paths: PathExpander::new(OFFLINE_ESCAPES),
		}
	}

	pub fn with_names(mut self, names: impl NameService + 'static) -> Self {
		self.names = Box::new(names);
		self
	}

	pub fn with_accounts(mut self, accounts: impl AccountDb + 'static) -> Self {
		self.accounts = Box::new(accounts);
		self
	}

	pub fn with_commands(mut self, commands: impl CommandResolver + 'static) -> Self {
		self.commands = Box::new(commands);
		self
	}

	pub fn with_eventlog(mut self, eventlog: impl EventLogConfig + 'static) -> Self {
		self.eventlog = Box::new(eventlog);
		self
	}

	pub fn with_diagnostics(mut self, diagnostics: impl DiagnosticSink + 'static) -> Self {
		self.diagnostics = Box::new(diagnostics);
		self
	}

	pub fn with_paths(mut self, paths: PathExpander) -> Self {
		self.paths = paths;
		self
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::os::unix::fs::PermissionsExt;

	use super::*;

	fn install(dir: &Path, name: &str, mode: u32) -> PathBuf {
		let path = dir.join(name);
		fs::write(&path, b"#!/bin/sh\n").expect("must write command");
		fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("must chmod");
		path
	}

	#[test]
	fn searches_directories_in_order() {
		let first = tempfile::tempdir().expect("must create tempdir");
		let second = tempfile::tempdir().expect("must create tempdir");
		install(second.path(), "tool", 0o755);
		let resolver =
			PathCommandResolver::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

		let found = resolver.resolve("tool", None).expect("must find tool");
		assert_eq!(found, second.path().join("tool").to_string_lossy());
	}

	#[test]
	fn skips_non_executable() {
		let dir = tempfile::tempdir().expect("must create tempdir");
		install(dir.path(), "data", 0o644);
		let resolver = PathCommandResolver::new(vec![dir.path().to_path_buf()]);
		assert_eq!(resolver.resolve("data", None), None);
	}

	#[test]
	fn resolves_inside_chroot() {
		let root = tempfile::tempdir().expect("must create tempdir");
		let bin = root.path().join("bin");
		fs::create_dir(&bin).expect("must create bin");
		install(&bin, "sh", 0o755);
		let resolver = PathCommandResolver::new(vec![PathBuf::from("/bin")]);
		let chroot = root.path().to_str().expect("tempdir is utf-8");

		assert_eq!(resolver.resolve("sh", Some(chroot)).as_deref(), Some("/bin/sh"));
		assert_eq!(resolver.resolve("/bin/sh", Some(chroot)).as_deref(), Some("/bin/sh"));
		assert_eq!(resolver.resolve("/bin/missing", Some(chroot)), None);
	}

	#[test]
	fn offline_never_finds_commands() {
		let collab = Collaborators::offline();
		assert_eq!(collab.commands.resolve("/bin/sh", None), None);
		assert!(collab.eventlog.destinations().is_empty());
	}
}
