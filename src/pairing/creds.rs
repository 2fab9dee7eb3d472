/*
 *
 *    Copyright (c) 2020-2022 Project CHIP Authors
 *
 *    Licensed under the Apache License, Version 2.0 (the "License");
 *    you may not use this file except in compliance with the License.
 *    You may obtain a copy of the License at
 *
 *        http://www.apache.org/licenses/LICENSE-2.0
 *
 *    Unless required by applicable law or agreed to in writing, software
 *    distributed under the License is distributed on an "AS IS" BASIS,
 *    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *    See the License for the specific language governing permissions and
 *    limitations under the License.
 */

//! Generation of commissioning credentials from a secure random source.

use crate::error::{Error, ErrorCode};
use crate::utils::rand::Rand;

use super::DISCRIMINATOR_MAX;

/// Largest valid passcode; the top of the 27-bit space is reserved.
pub const PASSCODE_MAX: u32 = 99_999_998;

/// Passcodes too guessable to ever ship on a device.
pub const INVALID_PASSCODES: [u32; 11] = [
    11111111, 22222222, 33333333, 44444444, 55555555, 66666666, 77777777, 88888888, 99999999,
    12345678, 87654321,
];

/// The number of distinct discriminators, and thus the largest batch of
/// mutually-unique credentials that can exist.
pub const MAX_BATCH: usize = DISCRIMINATOR_MAX as usize + 1;

/// Whether `passcode` is in-domain and not denylisted.
pub fn is_valid_passcode(passcode: u32) -> bool {
    (1..=PASSCODE_MAX).contains(&passcode) && !INVALID_PASSCODES.contains(&passcode)
}

/// A `(discriminator, passcode)` pair identifying one commissionable device.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Credentials {
    /// 12-bit device-class discriminator; not secret
    pub discriminator: u16,
    /// Commissioning passcode in `[1, PASSCODE_MAX]`
    pub passcode: u32,
}

impl Credentials {
    /// Wrap externally supplied values, e.g. fixed commissioning data baked
    /// into a device configuration. Not range-checked; see
    /// [`SetupPayload::is_valid`](super::SetupPayload::is_valid).
    pub const fn new(discriminator: u16, passcode: u32) -> Self {
        Self {
            discriminator,
            passcode,
        }
    }

    /// Draw a fresh credential pair from `rand`.
    ///
    /// The discriminator is uniform over `[0, DISCRIMINATOR_MAX]` and the
    /// passcode uniform over the valid passcodes: denylisted draws are
    /// rejected and redrawn.
    pub fn generate(rand: Rand) -> Self {
        let discriminator = rand_range(rand, DISCRIMINATOR_MAX as u32 + 1) as u16;

        let passcode = loop {
            let passcode = rand_range(rand, PASSCODE_MAX) + 1;
            if is_valid_passcode(passcode) {
                break passcode;
            }
        };

        Self {
            discriminator,
            passcode,
        }
    }
}

/// Fill `out` with `out.len()` freshly generated credentials whose
/// discriminators are pairwise distinct and whose passcodes are pairwise
/// distinct.
///
/// Fails with `InvalidCount` for an empty slice and with `TooManyRequested`
/// for more than [`MAX_BATCH`] entries - the latter before any draw, as a
/// larger batch cannot exist. Colliding draws are discarded and retried;
/// within the allowed batch sizes the retry loop terminates with
/// overwhelming probability and carries no iteration cap.
pub fn generate_batch(rand: Rand, out: &mut [Credentials]) -> Result<(), Error> {
    if out.is_empty() {
        Err(ErrorCode::InvalidCount)?;
    }

    if out.len() > MAX_BATCH {
        Err(ErrorCode::TooManyRequested)?;
    }

    for index in 0..out.len() {
        loop {
            let creds = Credentials::generate(rand);

            let unique = out[..index]
                .iter()
                .all(|c| c.discriminator != creds.discriminator && c.passcode != creds.passcode);

            if unique {
                out[index] = creds;
                break;
            }
        }
    }

    Ok(())
}

/// An unbiased draw from `[0, range)`.
///
/// A raw `u32` draw above the largest multiple of `range` in the `u32` space
/// is rejected and redrawn, so the final reduction favors no value.
fn rand_range(rand: Rand, range: u32) -> u32 {
    debug_assert!(range > 0);

    const RAW_SPACE: u64 = 1 << u32::BITS;
    let zone = RAW_SPACE - RAW_SPACE % range as u64;

    loop {
        let mut raw = [0; 4];
        rand(&mut raw);
        let raw = u32::from_le_bytes(raw);

        if (raw as u64) < zone {
            break raw % range;
        }
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicU32, Ordering};

    use crate::utils::rand::dummy_rand;

    use super::*;

    // A fake random source that hands out an increasing counter, so batch
    // draws are distinct and deterministic.
    static NEXT: AtomicU32 = AtomicU32::new(0);

    fn seq_rand(buf: &mut [u8]) {
        let n = NEXT.fetch_add(1, Ordering::Relaxed).to_le_bytes();
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = n[i % 4];
        }
    }

    #[test]
    fn passcode_validity() {
        assert!(!is_valid_passcode(0));
        assert!(is_valid_passcode(1));
        assert!(is_valid_passcode(PASSCODE_MAX));
        assert!(!is_valid_passcode(PASSCODE_MAX + 1));
        for denied in INVALID_PASSCODES {
            assert!(!is_valid_passcode(denied));
        }
    }

    #[test]
    fn generate_is_in_domain() {
        let creds = Credentials::generate(dummy_rand);
        assert!(creds.discriminator <= DISCRIMINATOR_MAX);
        assert!(is_valid_passcode(creds.passcode));

        // dummy_rand always yields the raw draw 0x03020100
        assert_eq!(creds.discriminator, 256);
        assert_eq!(creds.passcode, 50462977);
    }

    #[test]
    fn batch_entries_are_distinct() {
        let mut batch = [Credentials::default(); 16];
        generate_batch(seq_rand, &mut batch).unwrap();

        for (i, a) in batch.iter().enumerate() {
            assert!(a.discriminator <= DISCRIMINATOR_MAX);
            assert!(is_valid_passcode(a.passcode));

            for b in &batch[i + 1..] {
                assert_ne!(a.discriminator, b.discriminator);
                assert_ne!(a.passcode, b.passcode);
            }
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = generate_batch(seq_rand, &mut []).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidCount);
    }

    #[test]
    fn oversized_batch_is_rejected_upfront() {
        let mut batch = [Credentials::default(); MAX_BATCH + 1];
        let err = generate_batch(seq_rand, &mut batch).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TooManyRequested);
        // nothing was drawn into the buffer
        assert!(batch.iter().all(|c| *c == Credentials::default()));
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_randomness_stays_in_domain() {
        use crate::utils::rand::sys_rand;

        let mut batch = [Credentials::default(); 64];
        generate_batch(sys_rand, &mut batch).unwrap();

        for creds in batch {
            assert!(creds.discriminator <= DISCRIMINATOR_MAX);
            assert!(is_valid_passcode(creds.passcode));
        }
    }
}
