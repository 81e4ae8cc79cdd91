//! Slug normalisation.
//!
//! Turns human-entered names ("Los Angeles", "O'Fallon!") into the
//! URL-safe identifiers stored in every collection's `slug` field.
//!
//! The rules are deliberately small:
//!
//! 1. lower-case the input
//! 2. replace every maximal run of characters outside `[a-z0-9]` with one `-`
//! 3. strip one leading and one trailing `-`
//!
//! Collisions are not resolved here. Two names that normalise to the same
//! slug are rejected by the store's uniqueness rule.

/// Separator inserted for runs of non-alphanumeric characters.
pub const SEPARATOR: char = '-';

/// Normalise arbitrary text into a slug.
///
/// The output only contains `[a-z0-9-]`, never starts or ends with `-`,
/// and never contains `--`, so normalising twice is a no-op.
///
/// # Example
///
/// ```
/// use vellum_core::util::slug::normalize_slug;
///
/// assert_eq!(normalize_slug("Los Angeles"), "los-angeles");
/// assert_eq!(normalize_slug("  O'Fallon! "), "o-fallon");
/// ```
pub fn normalize_slug(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_run = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push(SEPARATOR);
            in_run = true;
        }
    }

    let trimmed = out.strip_prefix(SEPARATOR).unwrap_or(&out);
    let trimmed = trimmed.strip_suffix(SEPARATOR).unwrap_or(trimmed);
    trimmed.to_string()
}

/// Build a two-part slug such as `city-state`.
///
/// Each half is normalised on its own and the halves are joined with a
/// single `-`. Nothing is collapsed across the join, so an empty half
/// leaves a dangling separator.
///
/// # Example
///
/// ```
/// use vellum_core::util::slug::composite_slug;
///
/// assert_eq!(
///     composite_slug("Los Angeles", "California"),
///     "los-angeles-california"
/// );
/// ```
pub fn composite_slug(first: &str, second: &str) -> String {
    format!(
        "{}{}{}",
        normalize_slug(first),
        SEPARATOR,
        normalize_slug(second)
    )
}
