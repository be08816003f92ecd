use thiserror::Error;

/// A string or record could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocationError {
	#[error("unable to allocate memory")]
	OutOfMemory,
}

impl From<std::collections::TryReserveError> for AllocationError {
	fn from(_: std::collections::TryReserveError) -> Self {
		AllocationError::OutOfMemory
	}
}

/// Copies `src` into a freshly allocated string, reporting allocation
/// failure instead of aborting.
pub fn try_dup(src: &str) -> Result<String, AllocationError> {
	let mut out = String::new();
	out.try_reserve_exact(src.len())?;
	out.push_str(src);
	Ok(out)
}
