use setpace_domain::RandomSource;

/// Random indices drawn from `Math.random()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathRandom;

impl RandomSource for MathRandom {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn index(&mut self, len: usize) -> usize {
        let index = (js_sys::Math::random() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}
