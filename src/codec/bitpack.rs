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

//! A little-endian bit accumulator over a fixed-capacity byte buffer.
//!
//! Fields are appended least-significant-bit first and packed contiguously;
//! the unused high bits of the final byte stay zero. This keeps the packing
//! order auditable field-by-field, without relying on any struct layout.

use crate::error::{Error, ErrorCode};

#[derive(Debug, Default)]
pub struct BitPacker<const N: usize> {
    buf: heapless::Vec<u8, N>,
    bits: usize,
}

impl<const N: usize> BitPacker<N> {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            bits: 0,
        }
    }

    /// Append the low `width` bits of `value`, LSB first. Bits of `value`
    /// above `width` are ignored.
    pub fn pack_bits(&mut self, value: u32, width: usize) -> Result<(), Error> {
        debug_assert!(width <= u32::BITS as usize);

        for index in 0..width {
            let pos = self.bits % 8;
            if pos == 0 {
                self.buf.push(0).map_err(|_| ErrorCode::NoSpace)?;
            }

            if let Some(last) = self.buf.last_mut() {
                *last |= (((value >> index) & 1) as u8) << pos;
            }

            self.bits += 1;
        }

        Ok(())
    }

    /// Zero-fill up to the next byte boundary.
    pub fn pad_to_byte_boundary(&mut self) {
        self.bits = self.buf.len() * 8;
    }

    pub fn bit_len(&self) -> usize {
        self.bits
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_land_lsb_first() {
        let mut packer = BitPacker::<2>::new();
        packer.pack_bits(0b101, 3).unwrap();
        packer.pack_bits(0b01, 2).unwrap();
        assert_eq!(packer.bit_len(), 5);
        assert_eq!(packer.as_slice(), &[0b01101]);
    }

    #[test]
    fn width_masks_the_value() {
        let mut packer = BitPacker::<2>::new();
        packer.pack_bits(0xFF, 4).unwrap();
        packer.pad_to_byte_boundary();
        assert_eq!(packer.as_slice(), &[0x0F]);
        assert_eq!(packer.bit_len(), 8);
    }

    #[test]
    fn padding_on_a_boundary_is_a_no_op() {
        let mut packer = BitPacker::<2>::new();
        packer.pack_bits(0xAB, 8).unwrap();
        packer.pad_to_byte_boundary();
        assert_eq!(packer.as_slice(), &[0xAB]);
        assert_eq!(packer.bit_len(), 8);
    }

    #[test]
    fn overflowing_the_buffer_fails() {
        let mut packer = BitPacker::<1>::new();
        packer.pack_bits(0, 8).unwrap();
        let err = packer.pack_bits(0, 1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NoSpace);
    }

    #[test]
    fn fields_pack_contiguously() {
        let mut packer = BitPacker::<11>::new();
        packer.pack_bits(0, 3).unwrap();
        packer.pack_bits(0x1234, 16).unwrap();
        packer.pack_bits(0x5678, 16).unwrap();
        packer.pack_bits(0, 2).unwrap();
        packer.pack_bits(0x04, 8).unwrap();
        packer.pack_bits(1, 12).unwrap();
        packer.pack_bits(1, 27).unwrap();
        packer.pad_to_byte_boundary();

        assert_eq!(packer.bit_len(), 88);
        assert_eq!(
            packer.as_slice(),
            &[0xA0, 0x91, 0xC0, 0xB3, 0x82, 0x20, 0x00, 0x02, 0x00, 0x00, 0x00]
        );
    }
}
