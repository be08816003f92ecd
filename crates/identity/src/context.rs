use crate::accounts::{GroupRecord, UserRecord};
use crate::hosts::HostNames;

bitflags::bitflags! {
	/// Per-context state set while parsing the command line and policy.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ContextFlags: u32 {
		/// `intercept_allow_setid` was set explicitly in the policy.
		const INTERCEPT_SETID = 1 << 0;
		/// The command line named a runas user.
		const RUNAS_USER_SPECIFIED = 1 << 1;
		/// The command line named a runas group.
		const RUNAS_GROUP_SPECIFIED = 1 << 2;
	}
}

/// Outcome of resolving the command path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
	Found,
	NotFound,
}

/// Runtime record for the invoking user or the runas target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
	pub name: String,
	pub uid: u32,
	pub gid: u32,
	/// Group requested explicitly for the runas target.
	pub group: Option<GroupRecord>,
	/// Command as resolved so far, if any.
	pub cmnd: Option<String>,
	pub cmnd_status: Option<CommandStatus>,
	pub flags: ContextFlags,
	hosts: HostNames,
}

impl IdentityContext {
	pub fn new(name: impl Into<String>, uid: u32, gid: u32, hosts: HostNames) -> Self {
		Self {
			name: name.into(),
			uid,
			gid,
			group: None,
			cmnd: None,
			cmnd_status: None,
			flags: ContextFlags::empty(),
			hosts,
		}
	}

	pub fn from_user(user: &UserRecord, hosts: HostNames) -> Self {
		Self::new(user.name.clone(), user.uid, user.gid, hosts)
	}

	pub fn hosts(&self) -> &HostNames {
		&self.hosts
	}

	pub fn host(&self) -> &str {
		self.hosts.host()
	}

	pub fn shost(&self) -> &str {
		self.hosts.shost()
	}

	/// Installs a new host pair, releasing the previous one.
	pub fn set_hosts(&mut self, hosts: HostNames) {
		tracing::debug!(
			old_host = self.hosts.host(),
			old_aliased = self.hosts.is_alias(),
			new_host = hosts.host(),
			new_shost = hosts.shost(),
			"replacing host names"
		);
		self.hosts = hosts;
	}

	/// Replaces the identity with `user`, keeping hosts, command and flags.
	pub fn set_user(&mut self, user: &UserRecord) {
		self.name.clone_from(&user.name);
		self.uid = user.uid;
		self.gid = user.gid;
	}

	/// Final path component of the command.
	pub fn cmnd_base(&self) -> Option<&str> {
		let cmnd = self.cmnd.as_deref()?;
		Some(cmnd.rsplit('/').next().unwrap_or(cmnd))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx() -> IdentityContext {
		IdentityContext::new("alice", 1000, 1000, HostNames::bootstrap(Some("box".into())))
	}

	#[test]
	fn cmnd_base_is_last_component() {
		let mut ctx = ctx();
		assert_eq!(ctx.cmnd_base(), None);
		ctx.cmnd = Some("/usr/bin/id".into());
		assert_eq!(ctx.cmnd_base(), Some("id"));
		ctx.cmnd = Some("ls".into());
		assert_eq!(ctx.cmnd_base(), Some("ls"));
	}

	#[test]
	fn set_hosts_replaces_pair() {
		let mut ctx = ctx();
		assert!(ctx.hosts().is_alias());
		ctx.set_hosts(HostNames::from_long("box.example.com".into()).unwrap());
		assert_eq!(ctx.host(), "box.example.com");
		assert_eq!(ctx.shost(), "box");
	}

	#[test]
	fn set_user_keeps_hosts_and_flags() {
		let mut ctx = ctx();
		ctx.flags |= ContextFlags::INTERCEPT_SETID;
		ctx.set_user(&UserRecord {
			name: "root".into(),
			uid: 0,
			gid: 0,
		});
		assert_eq!(ctx.name, "root");
		assert_eq!(ctx.uid, 0);
		assert_eq!(ctx.host(), "box");
		assert!(ctx.flags.contains(ContextFlags::INTERCEPT_SETID));
	}
}
