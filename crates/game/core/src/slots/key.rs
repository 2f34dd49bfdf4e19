//! Slot identifiers and their fixed classification.

use bitflags::bitflags;

use crate::config::JabsConfig;

bitflags! {
    /// Static properties of a slot, derived from its key.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SlotFlags: u8 {
        /// Weapon/tool/dodge bindings.
        const PRIMARY          = 1 << 0;
        /// The eight L1/R1 combat-skill bindings.
        const SECONDARY        = 1 << 1;
        /// `set_lock` is ignored.
        const LOCK_EXEMPT      = 1 << 2;
        /// Bulk autoclear sweeps leave the binding alone.
        const AUTOCLEAR_EXEMPT = 1 << 3;
    }
}

/// One of the thirteen action-binding positions on a battler.
///
/// The string form (`Main`, `Off`, `L1A`, ...) is the identifier used in data
/// files and save records.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotKey {
    /// Pseudo-slot for battler-wide actions; neither primary nor secondary.
    Global,
    Main,
    #[strum(serialize = "Off")]
    #[cfg_attr(feature = "serde", serde(rename = "Off"))]
    Offhand,
    Tool,
    Dodge,
    L1A,
    L1B,
    L1X,
    L1Y,
    R1A,
    R1B,
    R1X,
    R1Y,
}

impl SlotKey {
    /// Every key, in the fixed order slots are laid out in.
    pub const ALL: [SlotKey; JabsConfig::SLOT_COUNT] = [
        SlotKey::Global,
        SlotKey::Main,
        SlotKey::Offhand,
        SlotKey::Tool,
        SlotKey::Dodge,
        SlotKey::L1A,
        SlotKey::L1B,
        SlotKey::L1X,
        SlotKey::L1Y,
        SlotKey::R1A,
        SlotKey::R1B,
        SlotKey::R1X,
        SlotKey::R1Y,
    ];

    /// Position of this key in [`SlotKey::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn flags(self) -> SlotFlags {
        match self {
            SlotKey::Global => SlotFlags::empty(),
            SlotKey::Main | SlotKey::Offhand => SlotFlags::PRIMARY
                .union(SlotFlags::LOCK_EXEMPT)
                .union(SlotFlags::AUTOCLEAR_EXEMPT),
            SlotKey::Tool => SlotFlags::PRIMARY.union(SlotFlags::AUTOCLEAR_EXEMPT),
            SlotKey::Dodge => SlotFlags::PRIMARY,
            SlotKey::L1A
            | SlotKey::L1B
            | SlotKey::L1X
            | SlotKey::L1Y
            | SlotKey::R1A
            | SlotKey::R1B
            | SlotKey::R1X
            | SlotKey::R1Y => SlotFlags::SECONDARY,
        }
    }

    pub const fn is_primary(self) -> bool {
        self.flags().contains(SlotFlags::PRIMARY)
    }

    pub const fn is_secondary(self) -> bool {
        self.flags().contains(SlotFlags::SECONDARY)
    }

    pub const fn is_lock_exempt(self) -> bool {
        self.flags().contains(SlotFlags::LOCK_EXEMPT)
    }

    pub const fn is_autoclear_exempt(self) -> bool {
        self.flags().contains(SlotFlags::AUTOCLEAR_EXEMPT)
    }
}
