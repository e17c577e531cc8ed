//! Darken / lighten
//!
//! Moves color channels toward black or white by a percentage.
//!
//! The two directions deliberately use different rounding and hex casing:
//!
//! | Adjustment | RGB rounding             | Hex output |
//! |------------|--------------------------|------------|
//! | Darken     | floor                    | lowercase  |
//! | Lighten    | round half away from 0   | uppercase  |
//!
//! HSL colors are only ever darkened (lightness goes down); lightening an HSL
//! color returns it unchanged. Alpha is never touched.

use std::fmt;

use crate::color::{ColorSpace, ColorValue, FunctionalColor, HexCase, HexColor};
use crate::error::{ConfigError, ConfigResult};

/// Intensity factor in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.0);
    pub const FULL: Percentage = Percentage(1.0);

    pub fn new(value: f64) -> ConfigResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::PercentageOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Parse `0.3` or `30%`
    pub fn parse(input: &str) -> ConfigResult<Self> {
        let trimmed = input.trim();
        let invalid = || ConfigError::InvalidPercentage { input: input.to_string() };

        let value = match trimmed.strip_suffix('%') {
            Some(number) => number.trim().parse::<f64>().map_err(|_| invalid())? / 100.0,
            None => trimmed.parse::<f64>().map_err(|_| invalid())?,
        };
        if value.is_nan() {
            return Err(invalid());
        }
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}

/// How a computed channel is brought back to an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    HalfAwayFromZero,
}

impl Rounding {
    fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Floor => value.floor(),
            Rounding::HalfAwayFromZero => value.round(),
        }
    }
}

/// Direction of an intensity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Darken,
    Lighten,
}

impl Adjustment {
    pub fn rounding(self) -> Rounding {
        match self {
            Adjustment::Darken => Rounding::Floor,
            Adjustment::Lighten => Rounding::HalfAwayFromZero,
        }
    }

    pub fn hex_case(self) -> HexCase {
        match self {
            Adjustment::Darken => HexCase::Lower,
            Adjustment::Lighten => HexCase::Upper,
        }
    }

    /// Compute one RGB channel
    fn rgb_channel(self, channel: f64, pct: f64) -> f64 {
        let moved = match self {
            Adjustment::Darken => channel * (1.0 - pct),
            Adjustment::Lighten => channel + (255.0 - channel) * pct,
        };
        self.rounding().apply(moved).clamp(0.0, 255.0)
    }

    pub fn apply(self, color: ColorValue, pct: Percentage) -> ColorValue {
        let pct = pct.value();
        match color {
            ColorValue::Hex(hex) => ColorValue::Hex(self.apply_hex(hex, pct)),
            ColorValue::Functional(func) => {
                ColorValue::Functional(self.apply_functional(func, pct))
            }
            passthrough @ (ColorValue::Transparent | ColorValue::Unrecognized(_)) => passthrough,
        }
    }

    fn apply_hex(self, hex: HexColor, pct: f64) -> HexColor {
        // Channel results are clamped to 0..=255, so the casts are lossless
        let channel = |c: u8| self.rgb_channel(f64::from(c), pct) as u8;
        HexColor {
            r: channel(hex.r),
            g: channel(hex.g),
            b: channel(hex.b),
            alpha: hex.alpha,
            case: self.hex_case(),
        }
    }

    fn apply_functional(self, func: FunctionalColor, pct: f64) -> FunctionalColor {
        let [x, y, z] = func.channels;
        let channels = match (func.space, self) {
            (ColorSpace::Rgb, _) => [
                self.rgb_channel(x, pct),
                self.rgb_channel(y, pct),
                self.rgb_channel(z, pct),
            ],
            (ColorSpace::Hsl, Adjustment::Darken) => [x, y, (z - pct * 100.0).clamp(0.0, 100.0)],
            (ColorSpace::Hsl, Adjustment::Lighten) => return func,
        };
        FunctionalColor { channels, ..func }
    }
}

/// Move a color toward black
pub fn darken(color: ColorValue, pct: Percentage) -> ColorValue {
    Adjustment::Darken.apply(color, pct)
}

/// Move an RGB-space color toward white; HSL colors pass through
pub fn lighten(color: ColorValue, pct: Percentage) -> ColorValue {
    Adjustment::Lighten.apply(color, pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{format, parse};
    use proptest::prelude::*;

    fn pct(value: f64) -> Percentage {
        Percentage::new(value).unwrap()
    }

    #[test]
    fn test_percentage_parse() {
        assert_eq!(Percentage::parse("0.3").unwrap().value(), 0.3);
        assert_eq!(Percentage::parse("75%").unwrap().value(), 0.75);
        assert_eq!(Percentage::parse(" 100 % ").unwrap(), Percentage::FULL);
        assert_eq!(
            Percentage::parse("1.5"),
            Err(ConfigError::PercentageOutOfRange { value: 1.5 })
        );
        assert!(matches!(
            Percentage::parse("abc"),
            Err(ConfigError::InvalidPercentage { .. })
        ));
        assert!(Percentage::new(f64::NAN).is_err());
    }

    #[test]
    fn test_darken_hex_floors() {
        // 255 * 0.7 = 178.5 -> 178
        let out = darken(parse("#ff0000"), pct(0.3));
        assert_eq!(format(&out), "#b20000");
    }

    #[test]
    fn test_darken_hex_shorthand() {
        assert_eq!(format(&darken(parse("#FFF"), pct(0.5))), "#7f7f7f");
    }

    #[test]
    fn test_lighten_hex_rounds_uppercase() {
        // 0 + 255 * 0.75 = 191.25 -> 191
        let out = lighten(parse("#000000"), pct(0.75));
        assert_eq!(format(&out), "#BFBFBF");
        // 0 + 255 * 0.5 = 127.5 -> 128
        assert_eq!(format(&lighten(parse("#000"), pct(0.5))), "#808080");
    }

    #[test]
    fn test_darken_rgba_keeps_alpha() {
        let out = darken(parse("rgba(10, 20, 30, 0.5)"), pct(0.5));
        assert_eq!(format(&out), "rgba(5, 10, 15, 0.5)");
    }

    #[test]
    fn test_darken_rgb_clamps_out_of_range_input() {
        assert_eq!(format(&darken(parse("rgb(400, 0, 0)"), Percentage::ZERO)), "rgb(255, 0, 0)");
    }

    #[test]
    fn test_lighten_rgb() {
        assert_eq!(format(&lighten(parse("rgb(0, 100, 255)"), pct(0.5))), "rgb(128, 178, 255)");
    }

    #[test]
    fn test_darken_hsl_only_lightness() {
        let out = darken(parse("hsl(200, 40%, 50%)"), pct(0.2));
        assert_eq!(format(&out), "hsl(200, 40%, 30%)");
        let out = darken(parse("hsla(10, 20%, 10%, 0.3)"), pct(0.5));
        assert_eq!(format(&out), "hsla(10, 20%, 0%, 0.3)");
    }

    #[test]
    fn test_lighten_hsl_is_noop() {
        let color = parse("hsl(200, 40%, 50%)");
        assert_eq!(lighten(color.clone(), pct(0.9)), color);
    }

    #[test]
    fn test_passthrough_variants() {
        assert_eq!(darken(ColorValue::Transparent, pct(0.4)), ColorValue::Transparent);
        let raw = ColorValue::Unrecognized("#xyz".to_string());
        assert_eq!(lighten(raw.clone(), pct(0.4)), raw);
    }

    #[test]
    fn test_policies() {
        assert_eq!(Adjustment::Darken.rounding(), Rounding::Floor);
        assert_eq!(Adjustment::Lighten.rounding(), Rounding::HalfAwayFromZero);
        assert_eq!(Adjustment::Darken.hex_case(), HexCase::Lower);
        assert_eq!(Adjustment::Lighten.hex_case(), HexCase::Upper);
    }

    fn hex(r: u8, g: u8, b: u8) -> ColorValue {
        ColorValue::Hex(HexColor::rgb(r, g, b))
    }

    proptest! {
        #[test]
        fn test_zero_intensity_is_identity(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(darken(hex(r, g, b), Percentage::ZERO), hex(r, g, b));
            prop_assert_eq!(
                lighten(hex(r, g, b), Percentage::ZERO),
                ColorValue::Hex(HexColor::rgb(r, g, b).with_case(HexCase::Upper))
            );
        }

        #[test]
        fn test_full_intensity_reaches_black_and_white(
            r in any::<u8>(),
            g in any::<u8>(),
            b in any::<u8>(),
        ) {
            prop_assert_eq!(format(&darken(hex(r, g, b), Percentage::FULL)), "#000000");
            prop_assert_eq!(format(&lighten(hex(r, g, b), Percentage::FULL)), "#FFFFFF");
        }

        #[test]
        fn test_rgb_channels_stay_in_range(
            r in 0u32..1000, g in 0u32..1000, b in 0u32..1000,
            p in 0.0f64..=1.0,
        ) {
            let color = parse(&format!("rgb({}, {}, {})", r, g, b));
            for out in [darken(color.clone(), pct(p)), lighten(color, pct(p))] {
                match out {
                    ColorValue::Functional(func) => {
                        for c in func.channels {
                            prop_assert!((0.0..=255.0).contains(&c));
                        }
                    }
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }
        }

        #[test]
        fn test_hsl_stays_in_range(
            h in 0u32..=360,
            s in 0u32..=100,
            l in 0u32..=100,
            p in 0.0f64..=1.0,
        ) {
            let color = parse(&format!("hsl({}, {}%, {}%)", h, s, l));
            match darken(color, pct(p)) {
                ColorValue::Functional(func) => {
                    prop_assert_eq!(func.channels[0], f64::from(h));
                    prop_assert_eq!(func.channels[1], f64::from(s));
                    prop_assert!((0.0..=100.0).contains(&func.channels[2]));
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }

        #[test]
        fn test_alpha_is_untouched(a in 0u32..=1000, p in 0.0f64..=1.0) {
            let alpha = format!("0.{}", a);
            let literal = format!("rgba(12, 34, 56, {})", alpha);
            for out in [darken(parse(&literal), pct(p)), lighten(parse(&literal), pct(p))] {
                match out {
                    ColorValue::Functional(func) => {
                        prop_assert_eq!(
                            func.alpha.as_ref().map(|a| a.as_str()),
                            Some(alpha.as_str())
                        );
                    }
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }
        }

        #[test]
        fn test_transparent_is_fixed_point(p in 0.0f64..=1.0) {
            prop_assert_eq!(darken(ColorValue::Transparent, pct(p)), ColorValue::Transparent);
            prop_assert_eq!(lighten(ColorValue::Transparent, pct(p)), ColorValue::Transparent);
        }
    }
}
