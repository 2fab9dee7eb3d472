//! The platform randomness seam.
//!
//! Credential generation needs a cryptographically secure source; platforms
//! plug one in as a plain function filling a byte slice. The function is
//! expected to be infallible - a platform whose CSPRNG can report errors
//! should adapt (e.g. abort) before this seam.

pub type Rand = fn(&mut [u8]);

/// A deterministic, non-secure filler. Only for tests.
pub fn dummy_rand(buf: &mut [u8]) {
    for (i, byte) in buf.iter_mut().enumerate() {
        *byte = (i % 256) as u8;
    }
}

#[cfg(feature = "std")]
pub fn sys_rand(buf: &mut [u8]) {
    use rand::{thread_rng, RngCore};

    thread_rng().fill_bytes(buf);
}
