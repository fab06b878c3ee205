//! Направление сортировки таблиц.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    /// Header-click cycle: none -> asc -> desc -> none.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Asc,
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
        }
    }

    /// Arrow glyph for the column header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::None => "",
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_cycle_wraps() {
        assert_eq!(SortDirection::None.next(), SortDirection::Asc);
        assert_eq!(SortDirection::Asc.next(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.next(), SortDirection::None);
    }
}
