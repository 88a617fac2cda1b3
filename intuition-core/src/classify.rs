//! Grade and percentile-band classification.
//!
//! A [`Ladder`] is an ordered list of bands, highest bound first.  The first
//! band whose lower bound the score reaches wins; the last band catches
//! everything else.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One rung of a ladder.  `min` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub grade: &'static str,
    pub percentile: &'static str,
}

const FIVE_BAND: &[Band] = &[
    Band { min: 82.0, grade: "최상", percentile: "최상위" },
    Band { min: 72.0, grade: "상위", percentile: "상위권" },
    Band { min: 62.0, grade: "중상", percentile: "평균 이상" },
    Band { min: 52.0, grade: "중위", percentile: "평균권" },
    Band { min: f64::NEG_INFINITY, grade: "하위", percentile: "하위권" },
];

const SEVEN_BAND: &[Band] = &[
    Band { min: 90.0, grade: "최상", percentile: "상위 3%" },
    Band { min: 80.0, grade: "상위", percentile: "상위 10%" },
    Band { min: 70.0, grade: "중상", percentile: "상위 25%" },
    Band { min: 60.0, grade: "중위", percentile: "평균 이상" },
    Band { min: 50.0, grade: "중하", percentile: "평균권" },
    Band { min: 40.0, grade: "하위", percentile: "하위권" },
    Band { min: f64::NEG_INFINITY, grade: "최하", percentile: "최하위권" },
];

/// The labelling scheme applied to every grade and percentile lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ladder {
    FiveBand,
    SevenBand,
}

impl Ladder {
    pub fn bands(self) -> &'static [Band] {
        match self {
            Ladder::FiveBand  => FIVE_BAND,
            Ladder::SevenBand => SEVEN_BAND,
        }
    }

    /// Band for `score`.  NaN lands in the bottom band.
    pub fn classify(self, score: f64) -> &'static Band {
        let bands = self.bands();
        bands
            .iter()
            .find(|b| score >= b.min)
            .unwrap_or(&bands[bands.len() - 1])
    }

    /// Zero-based rank of the band `score` falls in; `0` is the top band.
    pub fn rank(self, score: f64) -> usize {
        let band = self.classify(score);
        self.bands().iter().position(|b| b == band).unwrap_or(0)
    }

    pub fn grade(self, score: f64) -> &'static str {
        self.classify(score).grade
    }

    pub fn percentile(self, score: f64) -> &'static str {
        self.classify(score).percentile
    }
}

impl fmt::Display for Ladder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Ladder::FiveBand  => "five_band",
            Ladder::SevenBand => "seven_band",
        })
    }
}
