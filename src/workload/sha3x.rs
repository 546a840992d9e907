// peakbench - Free and Open Source Software Statement
//
// This project, peakbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/workload/sha3x.rs
//
// This file implements the SHA3-256 demo workload: repeated hashing of a
// fixed header with an incrementing nonce. One iteration is one digest.
//
// Tree Location:
// - src/workload/sha3x.rs (SHA3 hashing workload)
// - Depends on: sha3, hex, rand

use crate::bench::timer::PauseTimer;
use crate::core::error::BenchError;
use crate::workload::{seeded_rng, CancelToken, Workload, CANCEL_CHECK_INTERVAL};
use log::debug;
use rand::RngCore;
use sha3::{Digest, Sha3_256};

const LOG_TARGET: &str = "peakbench::workload::sha3x";

const HEADER_LEN: usize = 32;

fn hash_with_nonce(header: &[u8], nonce: u64) -> [u8; 32] {
    let mut input = [0u8; HEADER_LEN + 8];
    input[..8].copy_from_slice(&nonce.to_le_bytes());
    input[8..].copy_from_slice(header);
    Sha3_256::digest(input).into()
}

/// Hashes a seeded 32-byte header with an incrementing nonce. The running
/// checksum folds every digest in so the compiler cannot discard the work.
pub struct Sha3xWorkload {
    header: [u8; HEADER_LEN],
    nonce: u64,
    checksum: u64,
    first_digest: Option<[u8; 32]>,
}

impl Sha3xWorkload {
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

impl Workload for Sha3xWorkload {
    fn name(&self) -> &str {
        "sha3x"
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
            let digest = hash_with_nonce(&self.header, self.nonce);
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
        // Recompute the first digest out of band; a mismatch means the
        // measured loop corrupted the header or nonce stream.
        match self.first_digest {
            None => true,
            Some(recorded) => {
                let expected = hash_with_nonce(&self.header, 0);
                let ok = recorded == expected;
                if !ok {
                    debug!(target: LOG_TARGET,
                        "first digest mismatch: recorded {} expected {}",
                        hex::encode(recorded),
                        hex::encode(expected)
                    );
                }
                ok
            }
        }
    }
}
