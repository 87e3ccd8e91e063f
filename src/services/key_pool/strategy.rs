//! Rotation modes
//!
//! Decide where the pool starts scanning for a working key after the active
//! one has failed.

use serde::{Deserialize, Serialize};

/// Where a rotation starts scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Advance past the failed key, then scan forward and wrap (default)
    #[default]
    FromCursor,
    /// Advance the cursor but rescan from index 0, so the first healthy key
    /// in priority order always wins
    RestartFromZero,
}

impl std::str::FromStr for RotationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "from_cursor" | "fromcursor" | "next" => Ok(Self::FromCursor),
            "restart_from_zero" | "restartfromzero" | "legacy" => Ok(Self::RestartFromZero),
            _ => anyhow::bail!(
                "Invalid rotation mode: {}. Expected: from_cursor or restart_from_zero",
                s
            ),
        }
    }
}

impl RotationMode {
    /// First slot probed by a rotation, given the already-advanced cursor
    pub fn scan_start(&self, advanced_cursor: usize) -> usize {
        match self {
            Self::FromCursor => advanced_cursor,
            Self::RestartFromZero => 0,
        }
    }
}

impl std::fmt::Display for RotationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FromCursor => write!(f, "from_cursor"),
            Self::RestartFromZero => write!(f, "restart_from_zero"),
        }
    }
}

/// Every slot of a pool of `len` exactly once, starting at `start` and wrapping
pub fn scan_order(start: usize, len: usize) -> impl Iterator<Item = usize> {
    (0..len).map(move |offset| (start + offset) % len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("from_cursor".parse::<RotationMode>().unwrap(), RotationMode::FromCursor);
        assert_eq!(
            "RESTART_FROM_ZERO".parse::<RotationMode>().unwrap(),
            RotationMode::RestartFromZero
        );
        assert_eq!("legacy".parse::<RotationMode>().unwrap(), RotationMode::RestartFromZero);
        assert!("unknown".parse::<RotationMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [RotationMode::FromCursor, RotationMode::RestartFromZero] {
            assert_eq!(mode.to_string().parse::<RotationMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_scan_start() {
        assert_eq!(RotationMode::FromCursor.scan_start(2), 2);
        assert_eq!(RotationMode::RestartFromZero.scan_start(2), 0);
    }

    #[test]
    fn test_scan_order_wraps() {
        assert_eq!(scan_order(2, 4).collect::<Vec<_>>(), vec![2, 3, 0, 1]);
        assert_eq!(scan_order(0, 3).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(scan_order(0, 0).count(), 0);
    }
}
