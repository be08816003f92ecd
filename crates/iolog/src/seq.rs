use std::cell::OnceCell;
use std::fmt;
use std::fs::{DirBuilder, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::{Path, PathBuf};

use rustix::fs::{FlockOperation, flock};
use thiserror::Error;

use crate::settings::IologSettings;

#[cfg(test)]
mod tests;

const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Name of the allocation record inside the log root.
pub const SEQ_FILE: &str = "seq";

#[derive(Debug, Error)]
pub enum SequenceError {
	#[error("{}: {source}", path.display())]
	Io { path: PathBuf, source: io::Error },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SequenceError + '_ {
	move |source| SequenceError::Io {
		path: path.to_path_buf(),
		source,
	}
}

/// A six-digit base-36 session id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId([u8; 6]);

impl SessionId {
	/// Renders the low six base-36 digits of `n`.
	pub fn from_number(mut n: u64) -> Self {
		let mut digits = [b'0'; 6];
		for slot in digits.iter_mut().rev() {
			*slot = DIGITS[(n % 36) as usize];
			n /= 36;
		}
		Self(digits)
	}

	/// Parses six upper-case base-36 digits.
	pub fn parse(text: &str) -> Option<Self> {
		let bytes: [u8; 6] = text.as_bytes().try_into().ok()?;
		bytes
			.iter()
			.all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
			.then_some(Self(bytes))
	}

	pub fn to_number(self) -> u64 {
		self.0.iter().fold(0, |acc, &b| {
			let digit = match b {
				b'0'..=b'9' => b - b'0',
				_ => b - b'A' + 10,
			};
			acc * 36 + u64::from(digit)
		})
	}

	/// Three two-character directory levels, e.g. `00/00/1A`.
	pub fn path_fragment(&self) -> String {
		let d = self.0.map(char::from);
		format!("{}{}/{}{}/{}{}", d[0], d[1], d[2], d[3], d[4], d[5])
	}
}

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for &b in &self.0 {
			write!(f, "{}", char::from(b))?;
		}
		Ok(())
	}
}

/// Hands out the session id for this process.
///
/// The first successful [`next`](Self::next) allocates from the log root and
/// every later call returns the same id. A process keeps one allocator for
/// its lifetime; a second allocator issues a second id. Uniqueness across
/// processes comes from an exclusive `flock` on `<root>/seq` around the
/// read-increment-write.
#[derive(Debug, Default)]
pub struct SequenceAllocator {
	settings: IologSettings,
	cached: OnceCell<SessionId>,
}

impl SequenceAllocator {
	pub fn new(settings: IologSettings) -> Self {
		Self {
			settings,
			cached: OnceCell::new(),
		}
	}

	pub fn settings(&self) -> &IologSettings {
		&self.settings
	}

	/// Settings used by the next allocation. An id already handed out is
	/// not affected.
	pub fn settings_mut(&mut self) -> &mut IologSettings {
		&mut self.settings
	}

	/// Returns the id allocated so far, if any.
	pub fn current(&self) -> Option<SessionId> {
		self.cached.get().copied()
	}

	/// Returns this process's session id, allocating it from `root` on
	/// first use.
	pub fn next(&self, root: &Path) -> Result<SessionId, SequenceError> {
		if let Some(id) = self.cached.get() {
			return Ok(*id);
		}
		let id = self.allocate(root)?;
		Ok(*self.cached.get_or_init(|| id))
	}

	fn allocate(&self, root: &Path) -> Result<SessionId, SequenceError> {
		DirBuilder::new()
			.recursive(true)
			.mode(self.settings.dir_mode())
			.create(root)
			.map_err(io_error(root))?;

		let path = root.join(SEQ_FILE);
		let mut file = OpenOptions::new()
			.read(true)
			.write(true)
			.create(true)
			.truncate(false)
			.mode(self.settings.mode)
			.open(&path)
			.map_err(io_error(&path))?;
		self.apply_owner(&file).map_err(io_error(&path))?;

		flock(&file, FlockOperation::LockExclusive)
			.map_err(io::Error::from)
			.map_err(io_error(&path))?;

		let current = read_record(&mut file, self.settings.max_seq()).map_err(io_error(&path))?;
		let next = match current + 1 {
			n if n >= self.settings.max_seq() => 1,
			n => n,
		};
		let id = SessionId::from_number(next);
		write_record(&mut file, id).map_err(io_error(&path))?;

		tracing::debug!(path = %path.display(), %id, "allocated session id");
		// The lock is released when `file` is closed.
		Ok(id)
	}

	fn apply_owner(&self, file: &File) -> io::Result<()> {
		if !nix::unistd::geteuid().is_root() {
			return Ok(());
		}
		std::os::unix::fs::fchown(file, Some(self.settings.uid), Some(self.settings.gid))
	}
}

/// Reads the last issued id; an empty, malformed or out-of-range record
/// counts as zero.
fn read_record(file: &mut File, max: u64) -> io::Result<u64> {
	let mut buf = String::new();
	file.read_to_string(&mut buf)?;
	let text = buf.strip_suffix('\n').unwrap_or(&buf);
	if text.is_empty() {
		return Ok(0);
	}
	match SessionId::parse(text).map(SessionId::to_number) {
		Some(n) if n < max => Ok(n),
		_ => {
			tracing::debug!(record = text, "bad sequence number, restarting");
			Ok(0)
		}
	}
}

fn write_record(file: &mut File, id: SessionId) -> io::Result<()> {
	file.seek(SeekFrom::Start(0))?;
	file.set_len(0)?;
	file.write_all(format!("{id}\n").as_bytes())?;
	file.flush()
}
