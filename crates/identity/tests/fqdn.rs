use pretty_assertions::assert_eq;
use sudoers_identity::{
	FqdnError, HostNames, HostResolver, IdentityContext, MapNameService, ResolutionError,
};

fn ctx(name: &str, host: &str) -> IdentityContext {
	IdentityContext::new(name, 1000, 1000, HostNames::bootstrap(Some(host.to_string())))
}

#[test]
fn disabled_flag_changes_nothing() {
	let names = MapNameService::new().with_name("box", "box.example.com");
	let mut user = ctx("alice", "box");
	let mut runas = ctx("root", "box");
	let (user_before, runas_before) = (user.clone(), runas.clone());

	HostResolver::new(&names)
		.update_fqdn(false, &mut user, &mut runas)
		.unwrap();

	assert_eq!(user, user_before);
	assert_eq!(runas, runas_before);
	assert_eq!(names.lookups(), 0);
}

#[test]
fn local_host_is_resolved_once_and_copied() {
	let _ = tracing_subscriber::fmt::try_init();
	let names = MapNameService::new().with_name("box", "box.example.com");
	let mut user = ctx("alice", "box");
	let mut runas = ctx("root", "box");

	HostResolver::new(&names)
		.update_fqdn(true, &mut user, &mut runas)
		.unwrap();

	assert_eq!(names.lookups(), 1);
	assert_eq!(user.host(), "box.example.com");
	assert_eq!(user.shost(), "box");
	assert_eq!(runas.hosts(), user.hosts());
	assert_ne!(runas.host().as_ptr(), user.host().as_ptr());
	assert_ne!(runas.shost().as_ptr(), user.shost().as_ptr());
}

#[test]
fn local_alias_relationship_is_copied() {
	let names = MapNameService::new().with_name("box", "box");
	let mut user = ctx("alice", "box");
	let mut runas = ctx("root", "box");

	HostResolver::new(&names)
		.update_fqdn(true, &mut user, &mut runas)
		.unwrap();

	assert!(user.hosts().is_alias());
	assert!(runas.hosts().is_alias());
	assert_eq!(runas.shost(), "box");
}

#[test]
fn invoking_failure_falls_back_to_runas_host() {
	let names = MapNameService::new()
		.with_error("box", ResolutionError::NotFound)
		.with_name("db", "db.prod.example.com");
	let mut user = ctx("alice", "box");
	let mut runas = ctx("root", "db");

	HostResolver::new(&names)
		.update_fqdn(true, &mut user, &mut runas)
		.unwrap();

	assert_eq!(user.host(), "db.prod.example.com");
	assert_eq!(user.shost(), "db");
	assert_eq!(runas.host(), "db.prod.example.com");
	assert_eq!(names.lookups(), 3);
}

#[test]
fn both_failing_reports_invoking_host_and_keeps_contexts() {
	let names = MapNameService::new()
		.with_error("box", ResolutionError::Transient)
		.with_error("db", ResolutionError::Transient);
	let mut user = ctx("alice", "box");
	let mut runas = ctx("root", "db");
	let (user_before, runas_before) = (user.clone(), runas.clone());

	let err = HostResolver::new(&names)
		.update_fqdn(true, &mut user, &mut runas)
		.unwrap_err();

	match err {
		FqdnError::Invoking { host, source } => {
			assert_eq!(host, "box");
			assert_eq!(source, ResolutionError::Transient);
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(user, user_before);
	assert_eq!(runas, runas_before);
}

#[test]
fn remote_failure_leaves_runas_hosts() {
	let names = MapNameService::new()
		.with_name("box", "box.example.com")
		.with_error("far", ResolutionError::NotFound);
	let mut user = ctx("alice", "box");
	let mut runas = ctx("root", "far");

	let err = HostResolver::new(&names)
		.update_fqdn(true, &mut user, &mut runas)
		.unwrap_err();

	assert!(matches!(err, FqdnError::Target { ref host, .. } if host == "far"));
	assert_eq!(err.to_string(), "unable to resolve host far: name or service not known");
	assert_eq!(user.host(), "box.example.com");
	assert_eq!(runas.host(), "far");
	assert!(runas.hosts().is_alias());
}

#[test]
fn remote_host_resolved_independently() {
	let names = MapNameService::new()
		.with_name("box", "box.example.com")
		.with_name("far", "far.example.org");
	let mut user = ctx("alice", "box");
	let mut runas = ctx("root", "far");

	HostResolver::new(&names)
		.update_fqdn(true, &mut user, &mut runas)
		.unwrap();

	assert_eq!(names.lookups(), 2);
	assert_eq!(runas.host(), "far.example.org");
	assert_eq!(runas.shost(), "far");
}
