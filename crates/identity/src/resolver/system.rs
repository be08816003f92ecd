use std::ffi::{CStr, CString};
use std::ptr;

use sudoers_primitives::try_dup;

use super::{NameService, ResolutionError};

/// The system resolver via `getaddrinfo(3)` with `AI_CANONNAME`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNameService;

impl ResolutionError {
	fn from_gai(code: i32) -> Self {
		match code {
			libc::EAI_AGAIN => ResolutionError::Transient,
			libc::EAI_NONAME => ResolutionError::NotFound,
			libc::EAI_MEMORY => ResolutionError::MemoryExhausted,
			_ => {
				// SAFETY: gai_strerror returns a pointer to a static,
				// NUL-terminated message for any code.
				let message = unsafe { CStr::from_ptr(libc::gai_strerror(code)) };
				ResolutionError::Failed {
					code,
					message: message.to_string_lossy().into_owned(),
				}
			}
		}
	}
}

impl NameService for SystemNameService {
	fn canonical_name(&self, host: &str) -> Result<String, ResolutionError> {
		let c_host = CString::new(host).map_err(|_| ResolutionError::NotFound)?;

		// SAFETY: addrinfo is a plain C struct; all-zero is a valid hint.
		let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
		hints.ai_family = libc::AF_UNSPEC;
		hints.ai_flags = libc::AI_CANONNAME;

		let mut res: *mut libc::addrinfo = ptr::null_mut();
		// SAFETY: `c_host` and `hints` outlive the call and `res` is a valid
		// out pointer.
		let rc = unsafe { libc::getaddrinfo(c_host.as_ptr(), ptr::null(), &hints, &mut res) };
		if rc != 0 {
			return Err(ResolutionError::from_gai(rc));
		}

		// SAFETY: on success `res` points to at least one entry owned by us
		// until freeaddrinfo; the canonical name is NUL-terminated when set.
		let canonical = unsafe {
			let canon = (*res).ai_canonname;
			let name = if canon.is_null() {
				try_dup(host)
			} else {
				try_dup(&CStr::from_ptr(canon).to_string_lossy())
			};
			libc::freeaddrinfo(res);
			name
		};
		canonical.map_err(|_| ResolutionError::MemoryExhausted)
	}
}
