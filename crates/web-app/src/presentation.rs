use std::fmt;

use setpace_domain::Time;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            round(self.hue),
            round(self.saturation),
            round(self.lightness)
        )
    }
}

/// Colour stops of the rest timer background, shifting from teal to cyan as time passes.
#[must_use]
pub fn rest_timer_gradient(progress: f64) -> (Hsl, Hsl) {
    let progress = progress.clamp(0., 1.);
    let from = Hsl {
        hue: 200. - 20. * progress,
        saturation: 70. + 20. * progress,
        lightness: 35. + 15. * progress,
    };
    let to = Hsl {
        hue: from.hue + 30.,
        lightness: from.lightness + 10.,
        ..from
    };
    (from, to)
}

#[must_use]
pub fn rest_timer_background(progress: f64) -> String {
    let (from, to) = rest_timer_gradient(progress);
    format!("linear-gradient(135deg, {from}, {to})")
}

#[must_use]
pub fn percentage(fraction: f64) -> String {
    format!("{}%", round(fraction.clamp(0., 1.) * 100.))
}

/// Formats a duration as `m:ss`.
#[must_use]
pub fn format_duration(time: Time) -> String {
    let seconds = time.seconds();
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn round(value: f64) -> f64 {
    (value * 100.).round() / 100.
}
