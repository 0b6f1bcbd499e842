//! Mathematical utilities for robust statistical analysis
//!
//! Distribution functions needed by the confidence interval, hypothesis test
//! and digest crates. Special functions come from `statrs`; the normal
//! quantile is Wichura's AS241 so that results match published tables.

/// Distribution-related mathematical functions
pub mod distributions {
    /// Standard normal distribution
    pub mod normal {
        use statrs::function::erf::erfc;
        use std::f64::consts::{PI, SQRT_2};

        /// Cumulative distribution function of the standard normal distribution
        pub fn cdf(x: f64) -> f64 {
            0.5 * erfc(-x / SQRT_2)
        }

        /// Upper tail probability `1 - cdf(x)` without cancellation
        pub fn sf(x: f64) -> f64 {
            0.5 * erfc(x / SQRT_2)
        }

        /// Probability density function of the standard normal distribution
        pub fn pdf(x: f64) -> f64 {
            (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
        }

        /// Inverse cumulative distribution function (quantile function)
        ///
        /// Algorithm AS241 (PPND16), accurate to about 1 part in 10^16.
        /// Returns the infinities at `p = 0` and `p = 1`.
        ///
        /// # Panics
        /// Panics if `p` is outside `[0, 1]`.
        pub fn ppf(p: f64) -> f64 {
            assert!(
                (0.0..=1.0).contains(&p),
                "Normal quantile level must be in [0, 1], got {p}"
            );
            if p == 0.0 {
                return f64::NEG_INFINITY;
            }
            if p == 1.0 {
                return f64::INFINITY;
            }

            let q = p - 0.5;
            if q.abs() <= 0.425 {
                let r = 0.180625 - q * q;
                return q * ratio(&A, &B, r);
            }

            let r = if q < 0.0 { p } else { 1.0 - p };
            let r = (-r.ln()).sqrt();
            let value = if r <= 5.0 {
                ratio(&C, &D, r - 1.6)
            } else {
                ratio(&E, &F, r - 5.0)
            };
            if q < 0.0 {
                -value
            } else {
                value
            }
        }

        // Degree-7 rational approximation num(r)/den(r), den has a leading 1
        fn ratio(num: &[f64; 8], den: &[f64; 7], r: f64) -> f64 {
            let n = num.iter().rev().fold(0.0, |acc, &c| acc * r + c);
            let d = den.iter().rev().fold(0.0, |acc, &c| acc * r + c) * r + 1.0;
            n / d
        }

        const A: [f64; 8] = [
            3.387_132_872_796_366_608,
            1.331_416_678_917_843_774_5e2,
            1.971_590_950_306_551_442_7e3,
            1.373_169_376_550_946_112_5e4,
            4.592_195_393_154_987_145_7e4,
            6.726_577_092_700_870_085_3e4,
            3.343_057_558_358_812_810_5e4,
            2.509_080_928_730_122_672_7e3,
        ];
        const B: [f64; 7] = [
            4.231_333_070_160_091_125_1e1,
            6.871_870_074_920_579_083e2,
            5.394_196_021_424_751_076_9e3,
            2.121_379_430_158_659_586_7e4,
            3.930_789_580_009_271_061e4,
            2.872_908_573_572_194_267_5e4,
            5.226_495_278_852_854_561e3,
        ];
        const C: [f64; 8] = [
            1.423_437_110_749_683_577_34,
            4.630_337_846_156_545_295_9,
            5.769_497_221_460_691_405_5,
            3.647_848_324_763_204_605_04,
            1.270_458_252_452_368_382_58,
            2.417_807_251_774_506_117_7e-1,
            2.272_384_498_926_918_458_3e-2,
            7.745_450_142_783_414_076_6e-4,
        ];
        const D: [f64; 7] = [
            2.053_191_626_637_758_821_87,
            1.676_384_830_183_803_849_4,
            6.897_673_349_851_000_045_2e-1,
            1.481_039_764_274_800_745_9e-1,
            1.519_866_656_361_645_719_66e-2,
            5.475_938_084_995_344_946_3e-4,
            1.050_750_071_644_416_843_22e-9,
        ];
        const E: [f64; 8] = [
            6.657_904_643_501_103_777_2,
            5.463_784_911_164_114_369_9,
            1.784_826_539_917_291_335_8,
            2.965_605_718_285_048_912_4e-1,
            2.653_218_952_657_612_309_4e-2,
            1.242_660_947_388_078_438_6e-3,
            2.711_555_568_743_487_578_4e-5,
            2.010_334_399_292_288_132_6e-7,
        ];
        const F: [f64; 7] = [
            5.998_322_065_558_879_376_9e-1,
            1.369_298_809_227_358_053_4e-1,
            1.487_536_129_085_061_485_2e-2,
            7.868_691_311_456_132_591e-4,
            1.846_318_317_510_054_681_8e-5,
            1.421_511_758_316_445_887_7e-7,
            2.044_263_103_389_939_785_64e-15,
        ];

    }

    /// Chi-squared distribution
    pub mod chi_squared {
        use statrs::function::gamma::gamma_lr;

        /// Cumulative distribution function with `dof` degrees of freedom
        ///
        /// # Panics
        /// Panics if `dof` is zero.
        pub fn cdf(x: f64, dof: usize) -> f64 {
            assert!(dof > 0, "Chi-squared distribution needs at least one degree of freedom");
            if x <= 0.0 {
                return 0.0;
            }
            if x.is_infinite() {
                return 1.0;
            }
            gamma_lr(dof as f64 / 2.0, x / 2.0)
        }

        /// Upper tail probability, the p-value of an observed statistic `x`
        pub fn sf(x: f64, dof: usize) -> f64 {
            (1.0 - cdf(x, dof)).clamp(0.0, 1.0)
        }

    }
}
