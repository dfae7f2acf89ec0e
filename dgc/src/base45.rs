// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Base45 (RFC 9285) encoding.
//!
//! Every two input bytes become three symbols; a trailing single byte becomes two.

use crate::error::Base45Error;

const ALPHABET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn symbol_value(position: usize, symbol: u8) -> Result<u16, Base45Error> {
    let value = match symbol {
        b'0'..=b'9' => symbol - b'0',
        b'A'..=b'Z' => symbol - b'A' + 10,
        b' ' => 36,
        b'$' => 37,
        b'%' => 38,
        b'*' => 39,
        b'+' => 40,
        b'-' => 41,
        b'.' => 42,
        b'/' => 43,
        b':' => 44,
        _ => return Err(Base45Error::InvalidSymbol { position, symbol }),
    };
    Ok(u16::from(value))
}

/// Number of bytes `decode` produces for an input of `encoded_len` symbols.
pub fn decoded_len(encoded_len: usize) -> usize {
    (encoded_len / 3) * 2 + usize::from(encoded_len % 3 == 2)
}

pub fn decode(input: &[u8]) -> Result<Vec<u8>, Base45Error> {
    if input.len() % 3 == 1 {
        return Err(Base45Error::DanglingSymbol);
    }

    let mut out = Vec::with_capacity(decoded_len(input.len()));
    for (index, group) in input.chunks(3).enumerate() {
        let position = index * 3;
        let mut value: u32 = 0;
        let mut weight: u32 = 1;
        for (offset, &symbol) in group.iter().enumerate() {
            value += u32::from(symbol_value(position + offset, symbol)?) * weight;
            weight *= 45;
        }

        if group.len() == 3 {
            let pair = u16::try_from(value).map_err(|_| Base45Error::ValueOverflow { position })?;
            out.extend_from_slice(&pair.to_be_bytes());
        } else {
            let byte = u8::try_from(value).map_err(|_| Base45Error::ValueOverflow { position })?;
            out.push(byte);
        }
    }
    Ok(out)
}

pub fn encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(2) * 3);
    for pair in input.chunks(2) {
        let (mut value, symbols) = match *pair {
            [hi, lo] => (u32::from(u16::from_be_bytes([hi, lo])), 3),
            _ => (u32::from(pair[0]), 2),
        };
        for _ in 0..symbols {
            out.push(char::from(ALPHABET[(value % 45) as usize]));
            value /= 45;
        }
    }
    out
}
