pub mod brands;
pub mod categories;
pub mod deals;
pub mod specs;
pub mod uploads;

/// URL-friendly form of `input`: lowercase ASCII letters and digits, every
/// other run of characters collapsed to a single `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Apple"), "apple");
        assert_eq!(slugify("  Home & Garden  "), "home-garden");
        assert_eq!(slugify("4K TVs -- 2024"), "4k-tvs-2024");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Déco"), "caf-d-co");
        assert_eq!(slugify("!!!"), "");
    }
}
