//! Castling permissions.

use chess_core::Color;

/// The four independent castling permissions.
///
/// Rights only ever get removed during play; the game state restores earlier
/// values from its history on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates rights from raw flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Creates rights from `[white kingside, white queenside, black kingside, black queenside]`.
    pub fn from_flags(flags: [bool; 4]) -> Self {
        let bits = [
            Self::WHITE_KINGSIDE,
            Self::WHITE_QUEENSIDE,
            Self::BLACK_KINGSIDE,
            Self::BLACK_QUEENSIDE,
        ];
        let raw = flags
            .iter()
            .zip(bits)
            .filter(|(set, _)| **set)
            .fold(0, |acc, (_, bit)| acc | bit);
        CastlingRights(raw)
    }

    /// Returns the rights as `[white kingside, white queenside, black kingside, black queenside]`.
    pub const fn to_flags(self) -> [bool; 4] {
        [
            self.can_castle_kingside(Color::White),
            self.can_castle_queenside(Color::White),
            self.can_castle_kingside(Color::Black),
            self.can_castle_queenside(Color::Black),
        ]
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        (self.0 & Self::kingside_flag(color)) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        (self.0 & Self::queenside_flag(color)) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &= !(Self::kingside_flag(color) | Self::queenside_flag(color));
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_flag(color);
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_flag(color);
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    const fn kingside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    const fn queenside_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        rights.remove_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));
    }

    #[test]
    fn remove_queenside() {
        let mut rights = CastlingRights::ALL;
        rights.remove_queenside(Color::Black);
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn remove_color() {
        let mut rights = CastlingRights::ALL;
        rights.remove_color(Color::White);
        assert_eq!(rights.to_flags(), [false, false, true, true]);
    }

    #[test]
    fn none() {
        let rights = CastlingRights::NONE;
        assert_eq!(rights.to_flags(), [false; 4]);
        assert_eq!(rights.raw(), 0);
        assert_eq!(CastlingRights::default(), CastlingRights::NONE);
    }

    #[test]
    fn flags_roundtrip() {
        let flags = [true, false, false, true];
        assert_eq!(CastlingRights::from_flags(flags).to_flags(), flags);
        assert_eq!(CastlingRights::from_flags([true; 4]), CastlingRights::ALL);
        assert_eq!(CastlingRights::new(0xFF), CastlingRights::ALL);
    }
}
