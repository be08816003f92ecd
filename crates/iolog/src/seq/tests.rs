use rstest::rstest;

use super::*;
use crate::settings::SESSID_MAX;

#[rstest]
#[case(0, "000000")]
#[case(1, "000001")]
#[case(35, "00000Z")]
#[case(36, "000010")]
#[case(SESSID_MAX - 1, "ZZZZZZ")]
fn renders_base36(#[case] n: u64, #[case] text: &str) {
	let id = SessionId::from_number(n);
	assert_eq!(id.to_string(), text);
	assert_eq!(SessionId::parse(text), Some(id));
	assert_eq!(id.to_number(), n);
}

#[rstest]
#[case("")]
#[case("00001")]
#[case("0000001")]
#[case("00000a")]
#[case("00-001")]
fn rejects_malformed_ids(#[case] text: &str) {
	assert_eq!(SessionId::parse(text), None);
}

#[test]
fn path_fragment_has_three_levels() {
	let id = SessionId::parse("A1B2C3").unwrap();
	assert_eq!(id.path_fragment(), "A1/B2/C3");
}

#[test]
fn first_id_in_fresh_root() {
	let root = tempfile::tempdir().expect("must create tempdir");
	let logdir = root.path().join("sudo-io");
	let alloc = SequenceAllocator::default();

	let id = alloc.next(&logdir).unwrap();
	assert_eq!(id.to_string(), "000001");
	let record = std::fs::read_to_string(logdir.join(SEQ_FILE)).unwrap();
	assert_eq!(record, "000001\n");
}

#[test]
fn cached_within_process() {
	let root = tempfile::tempdir().expect("must create tempdir");
	let alloc = SequenceAllocator::default();
	assert_eq!(alloc.current(), None);

	let first = alloc.next(root.path()).unwrap();
	let second = alloc.next(root.path()).unwrap();
	assert_eq!(first, second);
	assert_eq!(alloc.current(), Some(first));
	// Only one allocation reached the record.
	let record = std::fs::read_to_string(root.path().join(SEQ_FILE)).unwrap();
	assert_eq!(record, "000001\n");
}

#[test]
fn continues_from_existing_record() {
	let root = tempfile::tempdir().expect("must create tempdir");
	std::fs::write(root.path().join(SEQ_FILE), "00001Z\n").unwrap();

	let id = SequenceAllocator::default().next(root.path()).unwrap();
	assert_eq!(id.to_string(), "000020");
}

#[test]
fn corrupt_record_restarts() {
	let root = tempfile::tempdir().expect("must create tempdir");
	std::fs::write(root.path().join(SEQ_FILE), "garbage\n").unwrap();

	let id = SequenceAllocator::default().next(root.path()).unwrap();
	assert_eq!(id.to_string(), "000001");
}

#[test]
fn wraps_at_max_seq() {
	let root = tempfile::tempdir().expect("must create tempdir");
	std::fs::write(root.path().join(SEQ_FILE), "000009\n").unwrap();
	let mut settings = IologSettings::default();
	settings.set_max_seq(10);

	let id = SequenceAllocator::new(settings).next(root.path()).unwrap();
	assert_eq!(id.to_string(), "000001");
}

#[test]
fn independent_allocators_never_share_an_id() {
	let root = tempfile::tempdir().expect("must create tempdir");
	let path = root.path().to_path_buf();

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let path = path.clone();
			std::thread::spawn(move || {
				(0..16)
					.map(|_| SequenceAllocator::default().next(&path).unwrap())
					.collect::<Vec<_>>()
			})
		})
		.collect();

	let mut ids: Vec<SessionId> = handles
		.into_iter()
		.flat_map(|h| h.join().unwrap())
		.collect();
	let total = ids.len();
	ids.sort_by_key(|id| id.to_number());
	ids.dedup();
	assert_eq!(ids.len(), total);
	assert_eq!(ids.last().unwrap().to_number(), total as u64);
}

const CHILD_ROOT: &str = "SUDOERS_IOLOG_SEQ_ROOT";
const CHILD_OUT: &str = "SUDOERS_IOLOG_SEQ_OUT";

/// Allocates one id when run as a child of `separate_processes_never_share_an_id`.
#[test]
fn allocate_in_child() {
	let (Some(root), Some(out)) = (std::env::var_os(CHILD_ROOT), std::env::var_os(CHILD_OUT))
	else {
		return;
	};
	let id = SequenceAllocator::default()
		.next(std::path::Path::new(&root))
		.unwrap();
	std::fs::write(out, id.to_string()).unwrap();
}

#[test]
fn separate_processes_never_share_an_id() {
	let root = tempfile::tempdir().expect("must create tempdir");
	let logdir = root.path().join("sudo-io");
	let exe = std::env::current_exe().expect("must locate test binary");

	let children: Vec<_> = (0..6)
		.map(|n| {
			let out = root.path().join(format!("child-{n}"));
			let child = std::process::Command::new(&exe)
				.args(["seq::tests::allocate_in_child", "--exact", "--test-threads=1"])
				.env(CHILD_ROOT, &logdir)
				.env(CHILD_OUT, &out)
				.stdout(std::process::Stdio::null())
				.spawn()
				.expect("must spawn child");
			(child, out)
		})
		.collect();

	let mut ids: Vec<SessionId> = children
		.into_iter()
		.map(|(mut child, out)| {
			assert!(child.wait().unwrap().success());
			SessionId::parse(&std::fs::read_to_string(out).unwrap()).unwrap()
		})
		.collect();
	ids.sort_by_key(|id| id.to_number());
	ids.dedup();
	assert_eq!(ids.len(), 6);
	assert_eq!(ids.last().unwrap().to_number(), 6);
	let record = std::fs::read_to_string(logdir.join(SEQ_FILE)).unwrap();
	assert_eq!(record, "000006\n");
}

#[test]
fn unwritable_root_is_an_error() {
	let root = tempfile::tempdir().expect("must create tempdir");
	let blocker = root.path().join("file");
	std::fs::write(&blocker, "").unwrap();

	let err = SequenceAllocator::default()
		.next(&blocker.join("logs"))
		.unwrap_err();
	assert!(matches!(err, SequenceError::Io { .. }));
	assert!(err.to_string().contains("logs"));
}
