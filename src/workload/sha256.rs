// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/workload/sha256.rs
//
// This file implements the double SHA-256 demo workload. One iteration is one
// double digest of an 80-byte header with an incrementing nonce.
//
// Tree Location:
// - src/workload/sha256.rs (double SHA-256 hashing workload)
// - Depends on: sha2, hex, rand

use crate::bench::timer::PauseTimer;
use crate::core::error::BenchError;
use crate::workload::{seeded_rng, CancelToken, Workload, CANCEL_CHECK_INTERVAL};
use log::debug;
use rand::RngCore;
use sha2::{Digest, Sha256};

const LOG_TARGET: &str = "peakbench::workload::sha256";

const HEADER_LEN: usize = 80;

fn sha256d_with_nonce(header: &[u8], nonce: u32) -> [u8; 32] {
    let mut input = [0u8; HEADER_LEN];
    input.copy_from_slice(header);
    input[76..80].copy_from_slice(&nonce.to_le_bytes());
    let first = Sha256::digest(input);
    Sha256::digest(first).into()
}

/// Double-hashes a seeded 80-byte header with an incrementing nonce.
pub struct Sha256dWorkload {
    header: [u8; HEADER_LEN],
    nonce: u32,
    checksum: u64,
    first_digest: Option<[u8; 32]>,
}

impl Sha256dWorkload {
    pub fn new(seed: u64) -> Self {
        let mut header = [0u8; HEADER_LEN];
        seeded_rng(seed).fill_bytes(&mut header);
        debug!(target: LOG_TARGET, "header: {}", hex::encode(header));
        Self {
            header,
            nonce: 0,
            checksum: 0,
            first_digest: None,
        }
    }

    pub fn checksum(&self) -> u64 {
        self.checksum
    }
}

impl Workload for Sha256dWorkload {
    fn name(&self) -> &str {
        "sha256d"
    }

    fn run_batch(
        &mut self,
        iterations: u64,
        _timer: &mut PauseTimer,
        cancel: &CancelToken,
    ) -> Result<u64, BenchError> {
        let mut completed = 0u64;
        while completed < iterations {
            if completed % CANCEL_CHECK_INTERVAL == 0 {
                cancel.check()?;
            }
            let digest = sha256d_with_nonce(&self.header, self.nonce);
            if self.first_digest.is_none() {
                self.first_digest = Some(digest);
            }
            self.checksum ^= u64::from_le_bytes(digest[..8].try_into().unwrap());
            self.nonce = self.nonce.wrapping_add(1);
            completed += 1;
        }
        Ok(completed)
    }

    fn verify(&mut self) -> bool {
        match self.first_digest {
            None => true,
            Some(recorded) => recorded == sha256d_with_nonce(&self.header, 0),
        }
    }
}
