// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `dgc` integration tests.
//!
//! Certificates are built here from scratch: CBOR via `minicbor`, signatures
//! from fixed P-256 keys, then zlib and base45 as a real issuer would.

#![allow(dead_code)]

use std::io::Write as _;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use minicbor::data::Tag;
use minicbor::Encoder;
use p256::ecdsa::signature::hazmat::PrehashSigner as _;
use p256::ecdsa::signature::Signer as _;
use sha2::Digest as _;

pub const SAMPLE_ISSUER: &str = "CZ";
pub const SAMPLE_ISSUED_AT: u64 = 1_622_316_073;
pub const SAMPLE_EXPIRING_DATE: u64 = 1_653_852_073;
pub const SAMPLE_KID: &[u8] = &[0x47, 0x1f, 0x9c, 0x2e, 0x55, 0x0a, 0x3b, 0x61];
pub const ES256: i64 = -7;

pub fn signing_key() -> p256::ecdsa::SigningKey {
    p256::ecdsa::SigningKey::from_slice(&[0x2a; 32]).unwrap()
}

pub fn other_signing_key() -> p256::ecdsa::SigningKey {
    p256::ecdsa::SigningKey::from_slice(&[0x17; 32]).unwrap()
}

pub fn p384_signing_key() -> p384::ecdsa::SigningKey {
    p384::ecdsa::SigningKey::from_slice(&[0x2a; 48]).unwrap()
}

pub fn public_key(sk: &p256::ecdsa::SigningKey) -> dgc::PublicKey {
    dgc::PublicKey::from(sk.verifying_key().clone())
}

/// `{1: alg, 4: kid}`
pub fn encode_protected(alg: i64, kid: &[u8]) -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    enc.map(2).unwrap();
    enc.i64(1).unwrap().i64(alg).unwrap();
    enc.i64(4).unwrap().bytes(kid).unwrap();
    enc.into_writer()
}

/// Writes a small vaccination record as the value of `-260: {1: ...}`.
fn encode_health_certificate(enc: &mut Encoder<Vec<u8>>) {
    enc.map(1).unwrap().i64(1).unwrap();
    enc.map(4).unwrap();
    enc.str("ver").unwrap().str("1.3.0").unwrap();
    enc.str("nam").unwrap();
    enc.map(2).unwrap();
    enc.str("fn").unwrap().str("Novak").unwrap();
    enc.str("gn").unwrap().str("Jan").unwrap();
    enc.str("dob").unwrap().str("1990-01-01").unwrap();
    enc.str("v").unwrap();
    enc.array(1).unwrap();
    enc.map(3).unwrap();
    enc.str("dn").unwrap().u8(2).unwrap();
    enc.str("sd").unwrap().u8(2).unwrap();
    enc.str("ma").unwrap().str("ORG-100030215").unwrap();
}

/// `{1: iss, 4: exp, 6: iat, -260: {1: {...}}}`
pub fn encode_sample_claims() -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    enc.map(4).unwrap();
    enc.i64(1).unwrap().str(SAMPLE_ISSUER).unwrap();
    enc.i64(4).unwrap().u64(SAMPLE_EXPIRING_DATE).unwrap();
    enc.i64(6).unwrap().u64(SAMPLE_ISSUED_AT).unwrap();
    enc.i64(-260).unwrap();
    encode_health_certificate(&mut enc);
    enc.into_writer()
}

pub fn sig_structure(protected: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    enc.array(4).unwrap();
    enc.str("Signature1").unwrap();
    enc.bytes(protected).unwrap();
    enc.bytes(&[]).unwrap();
    enc.bytes(payload).unwrap();
    enc.into_writer()
}

/// ES256 over SHA-256, as deployed certificates are signed.
pub fn sign_es256(sk: &p256::ecdsa::SigningKey, protected: &[u8], payload: &[u8]) -> Vec<u8> {
    let sig: p256::ecdsa::Signature = sk.sign(&sig_structure(protected, payload));
    sig.to_bytes().to_vec()
}

/// ECDSA P-256 over a SHA-384 digest.
pub fn sign_p256_sha384(sk: &p256::ecdsa::SigningKey, protected: &[u8], payload: &[u8]) -> Vec<u8> {
    let digest = sha2::Sha384::digest(sig_structure(protected, payload));
    let sig: p256::ecdsa::Signature = sk.sign_prehash(&digest).unwrap();
    sig.to_bytes().to_vec()
}

pub fn sign_p384(sk: &p384::ecdsa::SigningKey, protected: &[u8], payload: &[u8]) -> Vec<u8> {
    let sig: p384::ecdsa::Signature = sk.sign(&sig_structure(protected, payload));
    sig.to_bytes().to_vec()
}

/// `[protected, unprotected, payload, signature]`, optionally wrapped in tag 18.
pub fn encode_cose_sign1(tagged: bool, protected: &[u8], unprotected_kid: Option<&[u8]>, payload: &[u8], signature: &[u8]) -> Vec<u8> {
    let mut enc = Encoder::new(Vec::new());
    if tagged {
        enc.tag(Tag::new(18)).unwrap();
    }
    enc.array(4).unwrap();
    enc.bytes(protected).unwrap();
    match unprotected_kid {
        Some(kid) => {
            enc.map(1).unwrap().i64(4).unwrap().bytes(kid).unwrap();
        }
        None => {
            enc.map(0).unwrap();
        }
    }
    enc.bytes(payload).unwrap();
    enc.bytes(signature).unwrap();
    enc.into_writer()
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn to_certificate_text(compressed: &[u8]) -> String {
    format!("HC1:{}", dgc::base45::encode(compressed))
}

/// The signed, tagged COSE_Sign1 bytes of the sample certificate.
pub fn sample_cose() -> Vec<u8> {
    let protected = encode_protected(ES256, SAMPLE_KID);
    let payload = encode_sample_claims();
    let signature = sign_es256(&signing_key(), &protected, &payload);
    encode_cose_sign1(true, &protected, None, &payload, &signature)
}

/// The sample certificate as it would be scanned from a QR code.
pub fn sample_certificate_text() -> String {
    to_certificate_text(&zlib(&sample_cose()))
}
