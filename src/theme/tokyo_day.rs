//! Tokyo Night Day theme (light mode)

use ratatui::style::Color;

use super::Theme;

/// Tokyo Night Day color palette
pub const TOKYO_DAY: Theme = Theme {
    name: String::new(),

    bg_primary: Color::Rgb(225, 226, 231),   // #e1e2e7
    bg_secondary: Color::Rgb(208, 213, 227), // #d0d5e3
    bg_tertiary: Color::Rgb(196, 200, 218),  // #c4c8da

    fg_primary: Color::Rgb(55, 96, 191),    // #3760bf
    fg_secondary: Color::Rgb(97, 114, 176), // #6172b0
    fg_muted: Color::Rgb(132, 140, 181),    // #848cb5

    accent_primary: Color::Rgb(46, 125, 233),   // #2e7de9
    accent_secondary: Color::Rgb(152, 84, 241), // #9854f1

    success: Color::Rgb(88, 117, 57),  // #587539
    warning: Color::Rgb(140, 108, 62), // #8c6c3e
    error: Color::Rgb(245, 42, 101),   // #f52a65
    info: Color::Rgb(0, 113, 151),     // #007197

    border: Color::Rgb(168, 174, 203),        // #a8aecb
    border_focused: Color::Rgb(46, 125, 233), // #2e7de9
    selection: Color::Rgb(183, 193, 227),     // #b7c1e3
    cursor: Color::Rgb(55, 96, 191),          // #3760bf
    spoken_word: Color::Rgb(153, 167, 223),   // #99a7df
};

impl Theme {
    pub fn tokyo_day() -> Self {
        Theme { name: "Tokyo Day".to_string(), ..TOKYO_DAY }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokyo_day_has_correct_name() {
        assert_eq!(Theme::tokyo_day().name, "Tokyo Day");
    }

    #[test]
    fn tokyo_day_is_lighter_than_night() {
        let Color::Rgb(r, g, b) = Theme::tokyo_day().bg_primary else {
            panic!("expected rgb background");
        };
        let Color::Rgb(nr, ng, nb) = Theme::tokyo_night().bg_primary else {
            panic!("expected rgb background");
        };
        assert!(u32::from(r) + u32::from(g) + u32::from(b) > u32::from(nr) + u32::from(ng) + u32::from(nb));
    }
}
