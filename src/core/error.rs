//! Engine error type.
//!
//! Every variant is a contract violation by the caller. There is no I/O in
//! the engine, so nothing here is transient or worth retrying.

use super::Symbol;

/// Errors returned by fallible board operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinate ({x}, {y}) is outside the {x_count}x{y_count} board")]
    OutOfRange {
        x: usize,
        y: usize,
        x_count: usize,
        y_count: usize,
    },

    #[error("symbol {symbol} is outside the {letter_count}-letter alphabet")]
    UnknownSymbol { symbol: Symbol, letter_count: u8 },

    #[error("invalid board config: {0}")]
    InvalidConfig(String),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

/// Result alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = BoardError::OutOfRange {
            x: 5,
            y: 0,
            x_count: 3,
            y_count: 2,
        };
        assert_eq!(err.to_string(), "coordinate (5, 0) is outside the 3x2 board");
    }

    #[test]
    fn test_unknown_symbol_display() {
        let err = BoardError::UnknownSymbol {
            symbol: Symbol::new(7),
            letter_count: 5,
        };
        assert_eq!(err.to_string(), "symbol H is outside the 5-letter alphabet");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = BoardError::InvalidConfig("x_count must be > 0".to_string());
        assert_eq!(err.to_string(), "invalid board config: x_count must be > 0");
    }
}
