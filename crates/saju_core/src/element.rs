//! Five-element (ohaeng) cycle and polarity.
//!
//! The generative ordering Wood→Fire→Earth→Metal→Water→Wood drives every
//! offset-based derivation (ten gods, resource/output/controller elements).

use serde::{Deserialize, Serialize};

/// The five elements in generative order (index 0 = Wood).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FiveElement {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generative order.
pub const ALL_ELEMENTS: [FiveElement; 5] = [
    FiveElement::Wood,
    FiveElement::Fire,
    FiveElement::Earth,
    FiveElement::Metal,
    FiveElement::Water,
];

impl FiveElement {
    /// 0-based index in the generative cycle (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Create from a 0-based cycle index, wrapping modulo 5.
    pub const fn from_cycle(idx: i32) -> Self {
        ALL_ELEMENTS[idx.rem_euclid(5) as usize]
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// Element this one generates (next in cycle). Wood→Fire, ... Water→Wood.
    pub const fn generates(self) -> Self {
        Self::from_cycle(self.index() as i32 + 1)
    }

    /// Element this one controls (+2 in cycle). Wood→Earth, Fire→Metal, ...
    pub const fn controls(self) -> Self {
        Self::from_cycle(self.index() as i32 + 2)
    }

    /// Element that generates this one (-1 in cycle): the resource element.
    pub const fn resource(self) -> Self {
        Self::from_cycle(self.index() as i32 + 4)
    }

    /// Element this one produces (+1 in cycle): the output element.
    pub const fn output(self) -> Self {
        self.generates()
    }

    /// Element that controls this one (+3 in cycle): the controller element.
    pub const fn controller(self) -> Self {
        Self::from_cycle(self.index() as i32 + 3)
    }
}

/// Yin/yang polarity of a stem or branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Polarity of a 0-based cycle index: even=Yang, odd=Yin.
    pub const fn from_index(idx: u8) -> Self {
        if idx % 2 == 0 { Self::Yang } else { Self::Yin }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yang => "Yang",
            Self::Yin => "Yin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generative_cycle_closes() {
        let mut e = FiveElement::Wood;
        for _ in 0..5 {
            e = e.generates();
        }
        assert_eq!(e, FiveElement::Wood);
    }

    #[test]
    fn control_cycle() {
        assert_eq!(FiveElement::Wood.controls(), FiveElement::Earth);
        assert_eq!(FiveElement::Metal.controls(), FiveElement::Wood);
        assert_eq!(FiveElement::Water.controls(), FiveElement::Fire);
    }

    #[test]
    fn resource_inverts_generates() {
        for e in ALL_ELEMENTS {
            assert_eq!(e.resource().generates(), e);
        }
    }

    #[test]
    fn controller_inverts_controls() {
        for e in ALL_ELEMENTS {
            assert_eq!(e.controller().controls(), e);
        }
    }

    #[test]
    fn polarity_parity() {
        assert_eq!(Polarity::from_index(0), Polarity::Yang);
        assert_eq!(Polarity::from_index(7), Polarity::Yin);
    }
}
