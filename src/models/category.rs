/// The fixed set of spending categories offered by the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Drinks,
    Entertainment,
    Transport,
    Holidays,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Drinks => "Drinks",
            Self::Entertainment => "Entertainment",
            Self::Transport => "Transport",
            Self::Holidays => "Holidays",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup. Unlike free-text fields there is no fallback:
    /// anything outside the fixed set is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "drinks" => Some(Self::Drinks),
            "entertainment" => Some(Self::Entertainment),
            "transport" => Some(Self::Transport),
            "holidays" => Some(Self::Holidays),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Form order, as presented in the category picker.
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Drinks,
            Self::Entertainment,
            Self::Transport,
            Self::Holidays,
            Self::Other,
        ]
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
