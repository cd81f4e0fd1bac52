use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Native width:height ratio of a tablet's digitizer area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal correction factor: width ratio over height ratio.
    pub fn xscale(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RatioError::BadRatio(s.to_owned());
        let (width, height) = s.split_once(':').ok_or_else(bad)?;
        let width: u32 = width.trim().parse().map_err(|_| bad())?;
        let height: u32 = height.trim().parse().map_err(|_| bad())?;
        if width == 0 || height == 0 {
            return Err(bad());
        }
        Ok(Self { width, height })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatioError {
    #[error("unsupported tablet {0:?}; pick one from --tablets or set aspect_ratio in the config")]
    UnknownTablet(String),
    #[error("malformed aspect ratio {0:?}, expected WIDTH:HEIGHT")]
    BadRatio(String),
}

/// Models with a known digitizer ratio, by Android device name.
pub const KNOWN_TABLETS: &[(&str, AspectRatio)] = &[
    ("Galaxy Note 4", AspectRatio::new(16, 9)),
    ("Galaxy Note 10.1", AspectRatio::new(16, 10)),
    ("Galaxy Tab S2", AspectRatio::new(4, 3)),
    ("Nexus 7", AspectRatio::new(16, 10)),
];

/// Looks up a tablet's aspect ratio by device name.
///
/// Unrecognized names are rejected rather than mapped to a default; a
/// model missing from the table can still be used by setting
/// `aspect_ratio` in the config file.
pub fn lookup(name: &str) -> Result<AspectRatio, RatioError> {
    KNOWN_TABLETS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, ratio)| *ratio)
        .ok_or_else(|| RatioError::UnknownTablet(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_tablet() {
        assert_eq!(lookup("Galaxy Note 4"), Ok(AspectRatio::new(16, 9)));
    }

    #[test]
    fn rejects_unknown_tablet() {
        assert_eq!(
            lookup("Etch A Sketch"),
            Err(RatioError::UnknownTablet("Etch A Sketch".to_owned()))
        );
    }

    #[test]
    fn xscale_is_width_over_height() {
        assert!((AspectRatio::new(16, 9).xscale() - 16.0 / 9.0).abs() < 1e-12);
        assert_eq!(AspectRatio::new(2, 1).xscale(), 2.0);
    }

    #[test]
    fn parses_ratio_string() {
        assert_eq!("16:10".parse(), Ok(AspectRatio::new(16, 10)));
        assert_eq!("4 : 3".parse(), Ok(AspectRatio::new(4, 3)));
    }

    #[test]
    fn rejects_malformed_ratio_string() {
        for text in ["16", "16:", ":9", "16:0", "0:9", "-16:9", "16x9"] {
            assert_eq!(
                text.parse::<AspectRatio>(),
                Err(RatioError::BadRatio(text.to_owned())),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn displays_like_the_config_syntax() {
        assert_eq!(AspectRatio::new(21, 9).to_string(), "21:9");
    }
}
