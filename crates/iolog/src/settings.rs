/// Number of distinct six-digit base-36 session ids.
pub const SESSID_MAX: u64 = 2_176_782_336;

/// Ownership, permissions and id range for I/O log storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IologSettings {
	pub uid: u32,
	pub gid: u32,
	/// Mode for log files; directories derive theirs from it.
	pub mode: u32,
	max_seq: u64,
}

impl Default for IologSettings {
	fn default() -> Self {
		Self {
			uid: 0,
			gid: 0,
			mode: 0o600,
			max_seq: SESSID_MAX,
		}
	}
}

impl IologSettings {
	pub fn max_seq(&self) -> u64 {
		self.max_seq
	}

	/// Sets the point at which session ids wrap, capped at [`SESSID_MAX`].
	pub fn set_max_seq(&mut self, max: u64) {
		self.max_seq = max.clamp(1, SESSID_MAX);
	}

	/// Directory mode: the file mode plus search permission for the owner
	/// and for any class with read or write access.
	pub fn dir_mode(&self) -> u32 {
		let mut mode = self.mode | 0o100;
		if self.mode & 0o060 != 0 {
			mode |= 0o010;
		}
		if self.mode & 0o006 != 0 {
			mode |= 0o001;
		}
		mode
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dir_mode_adds_search_bits() {
		let mut settings = IologSettings::default();
		assert_eq!(settings.dir_mode(), 0o700);
		settings.mode = 0o640;
		assert_eq!(settings.dir_mode(), 0o750);
		settings.mode = 0o644;
		assert_eq!(settings.dir_mode(), 0o755);
	}

	#[test]
	fn max_seq_is_capped() {
		let mut settings = IologSettings::default();
		settings.set_max_seq(u64::MAX);
		assert_eq!(settings.max_seq(), SESSID_MAX);
		settings.set_max_seq(100);
		assert_eq!(settings.max_seq(), 100);
	}
}
