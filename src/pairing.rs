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

//! This module contains the logic for generating the pairing code and the QR code text for easy pairing.

use crate::error::Error;
use crate::utils::bitflags::bitflags;

use self::code::compute_pairing_code;
use self::creds::Credentials;
use self::qr::compute_qr_code_text;

pub mod code;
pub mod creds;
pub mod qr;
pub mod verhoeff;

/// Largest value of the 12-bit discriminator.
pub const DISCRIMINATOR_MAX: u16 = 0xFFF;

bitflags! {
    #[repr(transparent)]
    #[cfg_attr(not(feature = "defmt"), derive(Debug, Copy, Clone, Eq, PartialEq, Hash))]
    pub struct DiscoveryCapabilities: u8 {
        const SOFT_AP = 0x01;
        const BLE = 0x02;
        const IP = 0x04;
    }
}

impl Default for DiscoveryCapabilities {
    fn default() -> Self {
        Self::IP
    }
}

#[repr(u8)]
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommissioningFlow {
    #[default]
    Standard = 0,
    UserIntent = 1,
    Custom = 2,
}

/// The full set of fields encoded into the QR code text.
///
/// A fresh value is built per encoding request and never mutated.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(not(feature = "defmt"), derive(Debug))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupPayload {
    /// 3-bit payload version, 0 for the current format
    pub version: u8,
    /// Vendor identifier of the device maker
    pub vendor_id: u16,
    /// Product identifier within the vendor's namespace
    pub product_id: u16,
    /// 2-bit commissioning flow indicator
    pub flow: CommissioningFlow,
    /// How the device can be discovered during commissioning
    pub discovery_capabilities: DiscoveryCapabilities,
    /// The device-class discriminator and commissioning passcode
    pub creds: Credentials,
}

impl SetupPayload {
    /// Create a payload for `vendor_id`/`product_id` with the given
    /// credentials and all other fields at their defaults.
    pub fn new(vendor_id: u16, product_id: u16, creds: Credentials) -> Self {
        const DEFAULT_VERSION: u8 = 0;

        Self {
            version: DEFAULT_VERSION,
            vendor_id,
            product_id,
            flow: Default::default(),
            discovery_capabilities: Default::default(),
            creds,
        }
    }

    /// Whether every field is within its encodable domain.
    ///
    /// Advisory: the encoders mask fields to their bit widths rather than
    /// fail, so callers holding externally supplied credentials should check
    /// here first.
    pub fn is_valid(&self) -> bool {
        // A version not equal to 0 would indicate a new, unknown format
        if self.version != 0 {
            return false;
        }

        if self.discovery_capabilities.is_empty() {
            return false;
        }

        if self.creds.discriminator > DISCRIMINATOR_MAX {
            return false;
        }

        creds::is_valid_passcode(self.creds.passcode)
    }
}

/// Prepares and logs the pairing code and the QR code text for easy pairing.
pub fn print_pairing_code_and_qr(payload: &SetupPayload) -> Result<(), Error> {
    let pairing_code = compute_pairing_code(&payload.creds)?;
    info!("Manual pairing code: {}", pairing_code.as_str());

    let qr_code_text = compute_qr_code_text(payload)?;
    info!("QR code text: {}", qr_code_text.as_str());

    Ok(())
}
