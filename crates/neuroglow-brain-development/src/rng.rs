// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Random source construction

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded generator when `seed` is set, entropy-seeded otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
