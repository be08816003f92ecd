use sudoers_identity::{HostNames, IdentityContext, StaticAccounts};
use sudoers_iolog::{EscapeContext, IologSettings, PathExpander, SequenceAllocator, TemplateError};

fn contexts() -> (IdentityContext, IdentityContext) {
	let hosts = HostNames::from_long("box.example.com".to_string()).unwrap();
	let user = IdentityContext::new("alice", 1000, 1000, hosts.clone());
	let runas = IdentityContext::new("root", 0, 0, hosts);
	(user, runas)
}

#[test]
fn seq_and_user_from_existing_log_root() {
	let root = tempfile::tempdir().expect("must create tempdir");
	std::fs::write(root.path().join("seq"), "A1B2C2\n").unwrap();

	let (user, runas) = contexts();
	let accounts = StaticAccounts::new();
	let sequence = SequenceAllocator::new(IologSettings::default());
	let ctx = EscapeContext {
		user: &user,
		runas: &runas,
		accounts: &accounts,
		sequence: &sequence,
		log_dir: root.path(),
	};

	let expander = PathExpander::default();
	assert_eq!(expander.expand("%{seq}/%{user}", &ctx).unwrap(), "A1/B2/C3/alice");
	// The id is cached; the record is not touched again.
	assert_eq!(expander.expand("%{seq}", &ctx).unwrap(), "A1/B2/C3");
	let record = std::fs::read_to_string(root.path().join("seq")).unwrap();
	assert_eq!(record, "A1B2C3\n");
}

#[test]
fn bogus_token_fails_regardless_of_literals() {
	let root = tempfile::tempdir().expect("must create tempdir");
	let (user, runas) = contexts();
	let accounts = StaticAccounts::new();
	let sequence = SequenceAllocator::default();
	let ctx = EscapeContext {
		user: &user,
		runas: &runas,
		accounts: &accounts,
		sequence: &sequence,
		log_dir: root.path(),
	};

	for pattern in ["%{bogus}", "/var/log/%{bogus}", "x%{bogus}y", "%%%{bogus}"] {
		let err = PathExpander::default().expand(pattern, &ctx).unwrap_err();
		assert!(matches!(err, TemplateError::UnknownToken(ref t) if t == "bogus"));
	}
}

#[test]
fn seq_failure_aborts_expansion() {
	let root = tempfile::tempdir().expect("must create tempdir");
	let blocker = root.path().join("not-a-dir");
	std::fs::write(&blocker, "").unwrap();

	let (user, runas) = contexts();
	let accounts = StaticAccounts::new();
	let sequence = SequenceAllocator::default();
	let ctx = EscapeContext {
		user: &user,
		runas: &runas,
		accounts: &accounts,
		sequence: &sequence,
		log_dir: &blocker,
	};

	let err = PathExpander::default().expand("%{user}/%{seq}", &ctx).unwrap_err();
	assert!(matches!(err, TemplateError::Sequence(_)));
	assert_eq!(sequence.current(), None);
}
