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

//! Commissioning onboarding codes for smart-home device pairing.
//!
//! This crate turns the numeric identity of a commissionable device - vendor ID,
//! product ID, discriminator and passcode - into the two textual artifacts a
//! commissioner understands:
//! * the QR code payload text (`"MT:..."`, Base38-encoded bit-packed fields);
//! * the 11-digit manual pairing code (`"DDDDD-DDDDDD"`, Verhoeff-checked).
//!
//! It can also generate fresh, denylist-filtered `(discriminator, passcode)`
//! credentials from a platform-provided secure random source.
//!
//! The crate is `no_std` by default and allocation-free; all produced text
//! lives in fixed-capacity `heapless` strings.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::uninlined_format_args)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod codec;
pub mod error;
pub mod pairing;
pub mod utils;

pub use error::{Error, ErrorCode};
pub use pairing::creds::Credentials;
pub use pairing::{CommissioningFlow, DiscoveryCapabilities, SetupPayload};
