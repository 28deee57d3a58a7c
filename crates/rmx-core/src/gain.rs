//! Decibel / linear gain conversion and the gain control range.

/// Lowest gain the control surface offers, in dB.
pub const GAIN_DB_MIN: f64 = -30.0;

/// Highest gain the control surface offers, in dB.
pub const GAIN_DB_MAX: f64 = 30.0;

/// Default gain, in dB.
pub const GAIN_DB_DEFAULT: f64 = 0.0;

/// Slider positions per dB (0.1 dB resolution).
pub const SLIDER_SCALE: f64 = 10.0;

/// Convert a decibel value to a linear multiplier.
///
/// Non-finite input (e.g. `-inf` for a hard mute) yields 0.0. Finite input
/// too large for `f32` saturates at `f32::MAX`.
pub fn db_to_mul(db: f32) -> f32 {
    if db.is_finite() {
        libm::powf(10.0, db / 20.0).min(f32::MAX)
    } else {
        0.0
    }
}

/// Convert a linear multiplier to decibels. Zero maps to `-inf`.
pub fn mul_to_db(mul: f32) -> f32 {
    if mul == 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * libm::log10f(mul)
    }
}

/// Clamp a dB value to the control range. `NaN` becomes the default.
pub fn clamp_db(db: f64) -> f64 {
    if db.is_nan() {
        GAIN_DB_DEFAULT
    } else {
        db.clamp(GAIN_DB_MIN, GAIN_DB_MAX)
    }
}

/// Slider position for a dB value.
pub fn db_to_slider(db: f64) -> i32 {
    libm::round(clamp_db(db) * SLIDER_SCALE) as i32
}

/// dB value for a slider position.
pub fn slider_to_db(position: i32) -> f64 {
    clamp_db(position as f64 / SLIDER_SCALE)
}
