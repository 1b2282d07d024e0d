//! Commands currently available to the player.

bitflags::bitflags! {
    /// Player command groups. Cleared once the session ends.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Controls: u8 {
        /// Movement, waiting and interaction.
        const TURN  = 1 << 0;
        const CRAFT = 1 << 1;
        const DROP  = 1 << 2;
        /// Wear, wield and remove.
        const EQUIP = 1 << 3;
        const USE   = 1 << 4;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::all()
    }
}
