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

//! The 11-digit manual pairing code, the typable fallback when the QR code
//! cannot be scanned.

use core::fmt::Write;

use crate::error::{Error, ErrorCode};

use super::creds::Credentials;
use super::verhoeff;

/// Bit width limit of the packed (short discriminator, truncated passcode) value.
const COMBINED_BITS: u32 = 24;

/// Length of a rendered pairing code: 11 digits plus the hyphen.
pub const PAIRING_CODE_LEN: usize = 12;

/// Compute the manual pairing code for `creds`, formatted `DDDDD-DDDDDD`.
///
/// The code packs the top 4 bits of the discriminator with the top 20 bits
/// of the 27-bit passcode, renders the result as 10 decimal digits and
/// appends a Verhoeff check digit. Fails with `CombinedValueOutOfRange` when
/// the packed value exceeds its 24-bit limit, which only happens for an
/// out-of-domain discriminator.
pub fn compute_pairing_code(
    creds: &Credentials,
) -> Result<heapless::String<PAIRING_CODE_LEN>, Error> {
    let short_discriminator = (creds.discriminator >> 8) as u32;
    let combined = (short_discriminator << 20) | ((creds.passcode & 0x7FF_FFFF) >> 7);

    if combined >= 1 << COMBINED_BITS {
        Err(ErrorCode::CombinedValueOutOfRange)?;
    }

    let mut digits = heapless::String::<10>::new();
    write!(&mut digits, "{:010}", combined as u64 % 10_000_000_000)?;

    let check = verhoeff::check_digit(&digits);

    let mut code = heapless::String::new();
    write!(&mut code, "{}-{}{}", &digits[..5], &digits[5..], check)?;

    Ok(code)
}
