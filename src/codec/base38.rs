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

//! Base38 encoding of byte buffers into QR-friendly text.
//!
//! Bytes are consumed in 3-byte little-endian groups of 24 bits; every group,
//! including a trailing 1- or 2-byte partial group, is rendered as exactly
//! [`GROUP_CHARS`] base-38 digits, most-significant digit first.

use crate::error::{Error, ErrorCode};

/// The fixed alphabet. Index 38 (`?`) is never reached by radix-38
/// arithmetic but keeps every published symbol at its fixed index.
const BASE38_CHARS: [char; 39] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '-', '.',
    '?',
];

const RADIX: u32 = 38;

/// Input bytes per encoded group.
pub const GROUP_BYTES: usize = 3;

/// Output characters per group, partial groups included.
pub const GROUP_CHARS: usize = 5;

/// Whether `c` can appear in base38-encoded output.
pub fn is_valid_char(c: char) -> bool {
    BASE38_CHARS[..RADIX as usize].contains(&c)
}

/// Encode a byte array into a base38 string.
///
/// # Arguments
/// * `bytes` - byte array to encode
pub fn encode_string<const N: usize>(bytes: &[u8]) -> Result<heapless::String<N>, Error> {
    let mut string = heapless::String::new();
    for c in encode(bytes) {
        string.push(c).map_err(|_| ErrorCode::NoSpace)?;
    }

    Ok(string)
}

pub fn encode(bytes: &[u8]) -> impl Iterator<Item = char> + '_ {
    bytes.chunks(GROUP_BYTES).flat_map(|group| {
        let mut value = 0;
        for (index, byte) in group.iter().enumerate() {
            value |= (*byte as u32) << (8 * index);
        }

        encode_group(value)
    })
}

fn encode_group(value: u32) -> impl Iterator<Item = char> {
    (0..GROUP_CHARS as u32)
        .rev()
        .map(move |digit| BASE38_CHARS[((value / RADIX.pow(digit)) % RADIX) as usize])
}
