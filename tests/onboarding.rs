/*
 * Copyright (c) 2024 Project CHIP Authors
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! End-to-end checks of the public onboarding-codes surface, driven by the
//! system random source.

use std::collections::HashSet;

use onboarding_codes::pairing::code::compute_pairing_code;
use onboarding_codes::pairing::creds::{self, generate_batch};
use onboarding_codes::pairing::qr::{compute_qr_code_text, QR_CODE_PREFIX, QR_CODE_TEXT_LEN};
use onboarding_codes::pairing::{print_pairing_code_and_qr, DISCRIMINATOR_MAX};
use onboarding_codes::utils::rand::sys_rand;
use onboarding_codes::{Credentials, ErrorCode, SetupPayload};

fn assert_pairing_code_shape(code: &str) {
    let (first, last) = code.split_once('-').expect("missing hyphen");
    assert_eq!(first.len(), 5);
    assert_eq!(last.len(), 6);
    assert!(first.bytes().chain(last.bytes()).all(|b| b.is_ascii_digit()));
}

#[test]
fn generated_credentials_produce_well_formed_artifacts() {
    for _ in 0..32 {
        let creds = Credentials::generate(sys_rand);

        assert!(creds.discriminator <= DISCRIMINATOR_MAX);
        assert!(creds::is_valid_passcode(creds.passcode));

        let payload = SetupPayload::new(0xFFF1, 0x8000, creds);
        assert!(payload.is_valid());

        let qr_text = compute_qr_code_text(&payload).unwrap();
        assert!(qr_text.starts_with(QR_CODE_PREFIX));
        assert_eq!(qr_text.len(), QR_CODE_TEXT_LEN);

        let code = compute_pairing_code(&creds).unwrap();
        assert_pairing_code_shape(&code);
    }
}

#[test]
fn batches_are_mutually_unique() {
    for count in [1usize, 2, 64] {
        let mut batch = vec![Credentials::default(); count];
        generate_batch(sys_rand, &mut batch).unwrap();

        let discriminators: HashSet<_> = batch.iter().map(|c| c.discriminator).collect();
        let passcodes: HashSet<_> = batch.iter().map(|c| c.passcode).collect();

        assert_eq!(discriminators.len(), count);
        assert_eq!(passcodes.len(), count);

        for creds in &batch {
            assert!(creds.discriminator <= DISCRIMINATOR_MAX);
            assert!(creds::is_valid_passcode(creds.passcode));
        }
    }
}

#[test]
fn batch_count_errors() {
    let err = generate_batch(sys_rand, &mut []).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidCount);

    let mut batch = vec![Credentials::default(); creds::MAX_BATCH + 1];
    let err = generate_batch(sys_rand, &mut batch).unwrap_err();
    assert_eq!(err.code(), ErrorCode::TooManyRequested);
}

#[test]
fn fixed_commissioning_values_round_out() {
    // Fixed test credentials supplied by a configuration rather than drawn
    let creds = Credentials::new(1, 1);
    let payload = SetupPayload::new(0x1234, 0x5678, creds);

    assert_eq!(
        compute_qr_code_text(&payload).unwrap(),
        "MT:61.SC10VIR000DI00000"
    );
    assert_eq!(compute_pairing_code(&creds).unwrap(), "00000-000005");

    print_pairing_code_and_qr(&payload).unwrap();
}
