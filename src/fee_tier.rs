use crate::error::InputError;
use crate::math::tick_math::{MAX_TICK, MIN_TICK, nearest_usable_tick};

/// Pool fee tier, in hundredths of a basis point, with its fixed tick
/// spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeeTier {
    /// 0.01%, spacing 1
    Lowest,
    /// 0.05%, spacing 10
    Low,
    /// 0.3%, spacing 60
    Medium,
    /// 1%, spacing 200
    High,
}

impl FeeTier {
    pub const ALL: [FeeTier; 4] = [
        FeeTier::Lowest,
        FeeTier::Low,
        FeeTier::Medium,
        FeeTier::High,
    ];

    #[inline]
    pub const fn fee(self) -> u32 {
        match self {
            FeeTier::Lowest => 100,
            FeeTier::Low => 500,
            FeeTier::Medium => 3000,
            FeeTier::High => 10000,
        }
    }

    #[inline]
    pub const fn tick_spacing(self) -> i32 {
        match self {
            FeeTier::Lowest => 1,
            FeeTier::Low => 10,
            FeeTier::Medium => 60,
            FeeTier::High => 200,
        }
    }

    /// Lowest tick a position in this tier can use.
    pub fn min_usable_tick(self) -> i32 {
        nearest_usable_tick(MIN_TICK, self.tick_spacing())
    }

    /// Highest tick a position in this tier can use.
    pub fn max_usable_tick(self) -> i32 {
        nearest_usable_tick(MAX_TICK, self.tick_spacing())
    }

    /// Strict validation for ticks supplied directly by a caller rather
    /// than derived through [`nearest_usable_tick`].
    pub fn check_usable(self, tick: i32) -> Result<(), InputError> {
        if !(MIN_TICK..=MAX_TICK).contains(&tick) {
            return Err(InputError::InvalidRange);
        }
        let spacing = self.tick_spacing();
        if tick % spacing != 0 {
            return Err(InputError::NotUsableTick { tick, spacing });
        }
        Ok(())
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = InputError;

    fn try_from(fee: u32) -> Result<Self, Self::Error> {
        FeeTier::ALL
            .into_iter()
            .find(|tier| tier.fee() == fee)
            .ok_or(InputError::UnknownFeeTier(fee))
    }
}
