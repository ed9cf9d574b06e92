//! Castling rights and their per-ply history.

use ply_core::Color;
use std::fmt;

/// Snapshot of the four castling permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights::new(false, false, false, false);
    pub const ALL: CastlingRights = CastlingRights::new(true, true, true, true);

    #[inline]
    pub const fn new(
        white_king_side: bool,
        white_queen_side: bool,
        black_king_side: bool,
        black_queen_side: bool,
    ) -> Self {
        CastlingRights {
            white_king_side,
            white_queen_side,
            black_king_side,
            black_queen_side,
        }
    }

    /// Returns true if the given side may still castle king-side.
    #[inline]
    pub const fn king_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side,
            Color::Black => self.black_king_side,
        }
    }

    /// Returns true if the given side may still castle queen-side.
    #[inline]
    pub const fn queen_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_side,
            Color::Black => self.black_queen_side,
        }
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_king_side(color);
        self.remove_queen_side(color);
    }

    /// Removes king-side castling for a color.
    #[inline]
    pub fn remove_king_side(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_side = false,
            Color::Black => self.black_king_side = false,
        }
    }

    /// Removes queen-side castling for a color.
    #[inline]
    pub fn remove_queen_side(&mut self, color: Color) {
        match color {
            Color::White => self.white_queen_side = false,
            Color::Black => self.black_queen_side = false,
        }
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CastlingRights::NONE {
            return f.write_str("-");
        }
        for (held, c) in [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ] {
            if held {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Append-only history of castling rights, one snapshot per applied ply
/// plus the initial one.
///
/// Undoing a ply pops its snapshot, which makes the previous one current
/// again. The initial snapshot is never popped, so there is always a
/// current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsTracker {
    history: Vec<CastlingRights>,
}

impl RightsTracker {
    /// Creates a tracker whose history holds only `initial`.
    pub fn new(initial: CastlingRights) -> Self {
        RightsTracker {
            history: vec![initial],
        }
    }

    /// Returns the rights in force now.
    #[inline]
    pub fn current(&self) -> CastlingRights {
        // The root snapshot is never removed.
        self.history[self.history.len() - 1]
    }

    /// Records the rights that hold after a newly applied ply.
    #[inline]
    pub fn push(&mut self, rights: CastlingRights) {
        self.history.push(rights);
    }

    /// Drops the snapshot of the last applied ply and returns it.
    ///
    /// Returns `None` when only the initial snapshot is left.
    #[inline]
    pub fn pop(&mut self) -> Option<CastlingRights> {
        if self.history.len() > 1 {
            self.history.pop()
        } else {
            None
        }
    }

    /// Returns all snapshots, oldest first: one per applied ply after the
    /// initial one.
    pub fn history(&self) -> &[CastlingRights] {
        &self.history
    }
}

impl Default for RightsTracker {
    fn default() -> Self {
        Self::new(CastlingRights::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.king_side(Color::White));
        assert!(rights.queen_side(Color::Black));

        rights.remove_king_side(Color::White);
        assert!(!rights.king_side(Color::White));
        assert!(rights.queen_side(Color::White));
    }

    #[test]
    fn castling_rights_remove_queen_side() {
        let mut rights = CastlingRights::ALL;
        rights.remove_queen_side(Color::Black);
        assert!(rights.king_side(Color::Black));
        assert!(!rights.queen_side(Color::Black));
        assert!(!rights.black_queen_side);
    }

    #[test]
    fn castling_rights_remove_color() {
        let mut rights = CastlingRights::ALL;
        rights.remove_color(Color::White);
        assert!(!rights.king_side(Color::White));
        assert!(!rights.queen_side(Color::White));
        assert!(rights.king_side(Color::Black));
        assert!(rights.queen_side(Color::Black));
    }

    #[test]
    fn castling_rights_display() {
        assert_eq!(CastlingRights::ALL.to_string(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_string(), "-");
        assert_eq!(
            CastlingRights::new(false, true, true, false).to_string(),
            "Qk"
        );
    }

    #[test]
    fn tracker_push_pop() {
        let mut tracker = RightsTracker::default();
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.current(), CastlingRights::ALL);

        let mut after = CastlingRights::ALL;
        after.remove_color(Color::White);
        tracker.push(after);
        assert_eq!(tracker.history().len(), 2);
        assert_eq!(tracker.current(), after);

        assert_eq!(tracker.pop(), Some(after));
        assert_eq!(tracker.current(), CastlingRights::ALL);
    }

    #[test]
    fn tracker_keeps_initial_snapshot() {
        let mut tracker = RightsTracker::new(CastlingRights::NONE);
        assert_eq!(tracker.pop(), None);
        assert_eq!(tracker.history().len(), 1);
        assert_eq!(tracker.current(), CastlingRights::NONE);
    }
}
