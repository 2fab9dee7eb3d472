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

//! The QR code payload text: the bit-packed identity fields rendered as
//! Base38 behind the `MT:` marker.

use crate::codec::base38;
use crate::codec::bitpack::BitPacker;
use crate::error::{Error, ErrorCode};

use super::SetupPayload;

const VERSION_FIELD_LENGTH_IN_BITS: usize = 3;
const VENDOR_ID_FIELD_LENGTH_IN_BITS: usize = 16;
const PRODUCT_ID_FIELD_LENGTH_IN_BITS: usize = 16;
const COMMISSIONING_FLOW_FIELD_LENGTH_IN_BITS: usize = 2;
const DISCOVERY_CAPABILITIES_FIELD_LENGTH_IN_BITS: usize = 8;
const PAYLOAD_DISCRIMINATOR_FIELD_LENGTH_IN_BITS: usize = 12;
const SETUP_PASSCODE_FIELD_LENGTH_IN_BITS: usize = 27;

const TOTAL_PAYLOAD_DATA_SIZE_IN_BITS: usize = VERSION_FIELD_LENGTH_IN_BITS
    + VENDOR_ID_FIELD_LENGTH_IN_BITS
    + PRODUCT_ID_FIELD_LENGTH_IN_BITS
    + COMMISSIONING_FLOW_FIELD_LENGTH_IN_BITS
    + DISCOVERY_CAPABILITIES_FIELD_LENGTH_IN_BITS
    + PAYLOAD_DISCRIMINATOR_FIELD_LENGTH_IN_BITS
    + SETUP_PASSCODE_FIELD_LENGTH_IN_BITS;

pub const TOTAL_PAYLOAD_DATA_SIZE_IN_BYTES: usize = TOTAL_PAYLOAD_DATA_SIZE_IN_BITS.div_ceil(8);

/// The fixed marker every QR code payload starts with.
pub const QR_CODE_PREFIX: &str = "MT:";

/// Rendered length of the QR code text.
pub const QR_CODE_TEXT_LEN: usize = QR_CODE_PREFIX.len()
    + TOTAL_PAYLOAD_DATA_SIZE_IN_BYTES.div_ceil(base38::GROUP_BYTES) * base38::GROUP_CHARS;

/// Render `payload` as QR code text.
///
/// Deterministic: identical field values always yield the identical string.
/// Fields are masked to their bit widths, so a payload that satisfies
/// [`SetupPayload::is_valid`] encodes without loss.
pub fn compute_qr_code_text(
    payload: &SetupPayload,
) -> Result<heapless::String<QR_CODE_TEXT_LEN>, Error> {
    let mut packer = BitPacker::<TOTAL_PAYLOAD_DATA_SIZE_IN_BYTES>::new();

    packer.pack_bits(payload.version as u32, VERSION_FIELD_LENGTH_IN_BITS)?;
    packer.pack_bits(payload.vendor_id as u32, VENDOR_ID_FIELD_LENGTH_IN_BITS)?;
    packer.pack_bits(payload.product_id as u32, PRODUCT_ID_FIELD_LENGTH_IN_BITS)?;
    packer.pack_bits(payload.flow as u32, COMMISSIONING_FLOW_FIELD_LENGTH_IN_BITS)?;
    packer.pack_bits(
        payload.discovery_capabilities.bits() as u32,
        DISCOVERY_CAPABILITIES_FIELD_LENGTH_IN_BITS,
    )?;
    packer.pack_bits(
        payload.creds.discriminator as u32,
        PAYLOAD_DISCRIMINATOR_FIELD_LENGTH_IN_BITS,
    )?;
    packer.pack_bits(payload.creds.passcode, SETUP_PASSCODE_FIELD_LENGTH_IN_BITS)?;
    packer.pad_to_byte_boundary();

    let mut text = heapless::String::new();
    text.push_str(QR_CODE_PREFIX)
        .map_err(|_| ErrorCode::NoSpace)?;
    for c in base38::encode(packer.as_slice()) {
        text.push(c).map_err(|_| ErrorCode::NoSpace)?;
    }

    Ok(text)
}
