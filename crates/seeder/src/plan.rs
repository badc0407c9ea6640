// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Random selection of (sensor, year, month) upload tasks

use crate::sensors::SensorId;
use rand::Rng;
use rand::seq::index;
use std::ops::RangeInclusive;

/// Years seeded when none are configured.
pub const DEFAULT_YEARS: [i32; 4] = [2022, 2023, 2024, 2025];

/// How many distinct months are drawn for each (sensor, year) pair.
pub const MONTHS_PER_YEAR: RangeInclusive<usize> = 2..=4;

const MONTHS_IN_YEAR: usize = 12;

/// One placeholder object to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub sensor: SensorId,
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl UploadTask {
    /// Object name, e.g. `s1_2022_03.csv`.
    #[must_use]
    pub fn object_name(&self) -> String {
        format!("{}_{}_{:02}.csv", self.sensor, self.year, self.month)
    }
}

/// Pick 2-4 distinct months, uniformly at random.
pub fn sample_months<R: Rng + ?Sized>(rng: &mut R) -> Vec<u32> {
    let count = rng.gen_range(MONTHS_PER_YEAR);
    index::sample(rng, MONTHS_IN_YEAR, count)
        .into_iter()
        .map(|i| i as u32 + 1)
        .collect()
}

/// Build the task list, grouped by sensor then year in input order.
pub fn plan_tasks<R: Rng + ?Sized>(
    sensors: &[SensorId],
    years: &[i32],
    rng: &mut R,
) -> Vec<UploadTask> {
    let mut tasks = Vec::new();
    for sensor in sensors {
        for &year in years {
            for month in sample_months(rng) {
                tasks.push(UploadTask {
                    sensor: sensor.clone(),
                    year,
                    month,
                });
            }
        }
    }
    tasks
}
