//! Locale-aware ordering for product names.
//!
//! Follows the levels of root-locale collation. Names are decomposed
//! (NFKD) and compared by base letters first, ignoring case and accents;
//! accents break ties next, then case with lowercase first. Spaces and
//! punctuation order before digits, digits before letters.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two names the way a storefront lists them alphabetically.
///
/// ```
/// use shop_commerce::search::compare_names;
/// use std::cmp::Ordering;
/// assert_eq!(compare_names("Élan", "fig"), Ordering::Less);
/// assert_eq!(compare_names("elan", "Élan"), Ordering::Less);
/// ```
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (a_elements, b_elements) = (elements(a), elements(b));

    a_elements
        .iter()
        .flat_map(Element::primary)
        .cmp(b_elements.iter().flat_map(Element::primary))
        .then_with(|| {
            a_elements
                .iter()
                .map(|e| &e.marks)
                .cmp(b_elements.iter().map(|e| &e.marks))
        })
        .then_with(|| {
            a_elements
                .iter()
                .map(Element::is_upper)
                .cmp(b_elements.iter().map(Element::is_upper))
        })
        .then_with(|| a.cmp(b))
}

/// A base character with the combining marks that follow it.
#[derive(Debug)]
struct Element {
    base: char,
    marks: Vec<char>,
}

impl Element {
    fn new(base: char) -> Self {
        Self {
            base,
            marks: Vec::new(),
        }
    }

    /// Primary weights: character group, then the case-folded character.
    fn primary(&self) -> impl Iterator<Item = (u8, char)> {
        let group = if self.base.is_alphabetic() {
            2
        } else if self.base.is_numeric() {
            1
        } else {
            0
        };
        self.base.to_lowercase().map(move |c| (group, c))
    }

    fn is_upper(&self) -> bool {
        self.base.is_uppercase()
    }
}

fn elements(name: &str) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::with_capacity(name.len());
    for c in name.nfkd() {
        match elements.last_mut() {
            Some(last) if is_combining_mark(c) => last.marks.push(c),
            _ => match c {
                // Sharp s collates as "ss".
                'ß' => elements.extend([Element::new('s'), Element::new('s')]),
                'ẞ' => elements.extend([Element::new('S'), Element::new('S')]),
                _ => elements.push(Element::new(c)),
            },
        }
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_is_ignored_at_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Banana", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_breaks_ties_first() {
        assert_eq!(compare_names("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_names("Apple", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_equal_names() {
        assert_eq!(compare_names("Chobani", "Chobani"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_names("Almond", "Almonds"), Ordering::Less);
    }

    #[test]
    fn test_accents_sort_with_their_base_letter() {
        assert_eq!(compare_names("Élan", "fig"), Ordering::Less);
        assert_eq!(compare_names("crème brûlée", "crepe"), Ordering::Less);
        assert_eq!(compare_names("Ñandú", "oats"), Ordering::Less);
        assert_eq!(compare_names("Zürich", "zucchini"), Ordering::Greater);
    }

    #[test]
    fn test_accents_break_ties_before_case() {
        assert_eq!(compare_names("elan", "élan"), Ordering::Less);
        assert_eq!(compare_names("Elan", "élan"), Ordering::Less);
        assert_eq!(compare_names("elan", "Élan"), Ordering::Less);
    }

    #[test]
    fn test_composed_and_decomposed_forms_are_adjacent() {
        let composed = "caf\u{e9}";
        let decomposed = "cafe\u{301}";
        assert_ne!(compare_names(composed, decomposed), Ordering::Equal);
        assert_eq!(compare_names(composed, "cafes"), Ordering::Less);
        assert_eq!(compare_names(decomposed, "cafes"), Ordering::Less);
        assert_eq!(compare_names("cafe", composed), Ordering::Less);
        assert_eq!(compare_names("cafe", decomposed), Ordering::Less);
    }

    #[test]
    fn test_sharp_s_expands() {
        assert_eq!(compare_names("Straße", "Strast"), Ordering::Less);
        assert_eq!(compare_names("Straße", "Strasse"), Ordering::Greater);
    }

    #[test]
    fn test_spaces_and_digits_before_letters() {
        assert_eq!(compare_names("Blue Diamond", "Bluefin"), Ordering::Less);
        assert_eq!(compare_names("7 Grain Bread", "Apple"), Ordering::Less);
        assert_eq!(compare_names("Ale: Pale", "Ale2"), Ordering::Less);
    }

    #[test]
    fn test_sorts_sample_names() {
        let mut names = vec![
            "zucchini",
            "Organic Quinoa Brown Rice",
            "Élan",
            "blue Diamond Almonds",
            "fig",
            "Canada Dry Ginger Ale",
            "Blue Diamond Almonds",
            "elan",
        ];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(
            names,
            vec![
                "blue Diamond Almonds",
                "Blue Diamond Almonds",
                "Canada Dry Ginger Ale",
                "elan",
                "Élan",
                "fig",
                "Organic Quinoa Brown Rice",
                "zucchini",
            ]
        );
    }
}
