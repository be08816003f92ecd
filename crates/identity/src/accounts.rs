use nix::unistd::{Gid, Group, Uid, User};
use thiserror::Error;

/// A user database entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
	pub name: String,
	pub uid: u32,
	pub gid: u32,
}

/// A group database entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
	pub name: String,
	pub gid: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
	#[error("unknown user {0}")]
	UnknownUser(String),
	#[error("unknown group {0}")]
	UnknownGroup(String),
}

/// User and group databases.
pub trait AccountDb {
	fn user_by_uid(&self, uid: u32) -> Option<UserRecord>;
	fn user_by_name(&self, name: &str) -> Option<UserRecord>;
	fn group_by_gid(&self, gid: u32) -> Option<GroupRecord>;
	fn group_by_name(&self, name: &str) -> Option<GroupRecord>;
}

/// Parses a numeric user or group id.
///
/// `u32::MAX` is rejected since it is the `(uid_t)-1` "no change" value.
pub fn parse_id(text: &str) -> Option<u32> {
	if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	text.parse::<u32>().ok().filter(|&id| id != u32::MAX)
}

/// Resolves a user given either `#<uid>` or a login name.
///
/// The numeric form is tried first and only falls back to a name lookup of
/// the whole text when it does not parse or names no existing uid.
pub fn resolve_user_spec(db: &dyn AccountDb, spec: &str) -> Result<UserRecord, LookupError> {
	let by_uid = spec
		.strip_prefix('#')
		.and_then(parse_id)
		.and_then(|uid| db.user_by_uid(uid));
	by_uid
		.or_else(|| db.user_by_name(spec))
		.ok_or_else(|| LookupError::UnknownUser(spec.to_string()))
}

/// The system passwd and group databases.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAccounts;

impl SystemAccounts {
	fn user(found: nix::Result<Option<User>>) -> Option<UserRecord> {
		match found {
			Ok(user) => user.map(|u| UserRecord {
				name: u.name,
				uid: u.uid.as_raw(),
				gid: u.gid.as_raw(),
			}),
			Err(errno) => {
				tracing::debug!(%errno, "passwd lookup failed");
				None
			}
		}
	}

	fn group(found: nix::Result<Option<Group>>) -> Option<GroupRecord> {
		match found {
			Ok(group) => group.map(|g| GroupRecord {
				name: g.name,
				gid: g.gid.as_raw(),
			}),
			Err(errno) => {
				tracing::debug!(%errno, "group lookup failed");
				None
			}
		}
	}
}

impl AccountDb for SystemAccounts {
	fn user_by_uid(&self, uid: u32) -> Option<UserRecord> {
		Self::user(User::from_uid(Uid::from_raw(uid)))
	}

	fn user_by_name(&self, name: &str) -> Option<UserRecord> {
		Self::user(User::from_name(name))
	}

	fn group_by_gid(&self, gid: u32) -> Option<GroupRecord> {
		Self::group(Group::from_gid(Gid::from_raw(gid)))
	}

	fn group_by_name(&self, name: &str) -> Option<GroupRecord> {
		Self::group(Group::from_name(name))
	}
}

/// Fixed in-memory account tables for offline tools and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticAccounts {
	users: Vec<UserRecord>,
	groups: Vec<GroupRecord>,
}

impl StaticAccounts {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_user(mut self, name: &str, uid: u32, gid: u32) -> Self {
		self.users.push(UserRecord {
			name: name.to_string(),
			uid,
			gid,
		});
		self
	}

	pub fn with_group(mut self, name: &str, gid: u32) -> Self {
		self.groups.push(GroupRecord {
			name: name.to_string(),
			gid,
		});
		self
	}
}

impl AccountDb for StaticAccounts {
	fn user_by_uid(&self, uid: u32) -> Option<UserRecord> {
		self.users.iter().find(|u| u.uid == uid).cloned()
	}

	fn user_by_name(&self, name: &str) -> Option<UserRecord> {
		self.users.iter().find(|u| u.name == name).cloned()
	}

	fn group_by_gid(&self, gid: u32) -> Option<GroupRecord> {
		self.groups.iter().find(|g| g.gid == gid).cloned()
	}

	fn group_by_name(&self, name: &str) -> Option<GroupRecord> {
		self.groups.iter().find(|g| g.name == name).cloned()
	}
}
