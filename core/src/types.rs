//! Shared primitive types used across the booking system.
//!
//! Row identity is an index into a fixed letter alphabet. The mapping is
//! explicit in both directions; a hall never has more rows than letters.

/// A seat code such as `A1`: row letter followed by column number.
pub type SeatCode = String;

/// Zero-based row position in the hall grid.
pub type RowIndex = usize;

/// One-based column position in the hall grid.
pub type ColNumber = u32;

/// The row alphabet. Its length is the hard limit on hall rows.
pub const ROW_LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Letter for a row index, or `None` past the end of the alphabet.
pub fn row_letter(index: RowIndex) -> Option<char> {
    ROW_LETTERS.get(index).copied()
}

/// Row index for a letter, or `None` if the letter is not a row letter.
pub fn row_index(letter: char) -> Option<RowIndex> {
    ROW_LETTERS.iter().position(|&c| c == letter)
}

/// Build the canonical code for a seat.
pub fn seat_code(row: char, col: ColNumber) -> SeatCode {
    format!("{row}{col}")
}

/// Split a canonical seat code into its row letter and column number.
///
/// The code must round-trip: `A01`, `A0`, `A+1` and `a1` are all rejected.
pub fn parse_seat_code(code: &str) -> Option<(char, ColNumber)> {
    let mut chars = code.chars();
    let row = chars.next()?;
    row_index(row)?;

    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let col: ColNumber = digits.parse().ok()?;
    if col == 0 || seat_code(row, col) != code {
        return None;
    }
    Some((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_mapping_is_bidirectional() {
        for (i, letter) in ROW_LETTERS.iter().enumerate() {
            assert_eq!(row_letter(i), Some(*letter));
            assert_eq!(row_index(*letter), Some(i));
        }
    }

    #[test]
    fn row_mapping_stops_at_z() {
        assert_eq!(row_letter(25), Some('Z'));
        assert_eq!(row_letter(26), None);
        assert_eq!(row_index('a'), None);
        assert_eq!(row_index('1'), None);
    }

    #[test]
    fn parses_canonical_codes() {
        assert_eq!(parse_seat_code("A1"), Some(('A', 1)));
        assert_eq!(parse_seat_code("E8"), Some(('E', 8)));
        assert_eq!(parse_seat_code("C12"), Some(('C', 12)));
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in ["", "A", "1A", "a1", "A0", "A01", "A+1", "A-1", "AA1", "A1 ", "Ä1"] {
            assert_eq!(parse_seat_code(bad), None, "expected {bad:?} to be rejected");
        }
    }
}
