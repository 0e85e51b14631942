/// Operator choices on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewMap,
    Book,
    Reset,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [Self::ViewMap, Self::Book, Self::Reset, Self::Exit];

    /// Parse a menu line. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ViewMap),
            "2" => Some(Self::Book),
            "3" => Some(Self::Reset),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Self::ViewMap => '1',
            Self::Book    => '2',
            Self::Reset   => '3',
            Self::Exit    => '4',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ViewMap => "View Seating Map",
            Self::Book    => "Book a Seat",
            Self::Reset   => "Reset System (Admin)",
            Self::Exit    => "Exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back_to_their_choice() {
        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.key().to_string()), Some(choice));
        }
    }

    #[test]
    fn tolerates_whitespace() {
        assert_eq!(MenuChoice::parse(" 2\n"), Some(MenuChoice::Book));
    }

    #[test]
    fn rejects_anything_else() {
        for bad in ["", "0", "5", "12", "one", "exit"] {
            assert_eq!(MenuChoice::parse(bad), None, "expected {bad:?} to be rejected");
        }
    }
}
