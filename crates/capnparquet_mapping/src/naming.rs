//! Column name normalization.

/// Converts a camel-case identifier to `snake_case`.
///
/// An underscore is inserted before an upper-case letter that follows a
/// lower-case letter or a digit, and before a digit that follows a
/// lower-case letter. Existing underscores are kept.
///
/// ```
/// use capnparquet_mapping::to_snake_case;
///
/// assert_eq!(to_snake_case("timestampMillis"), "timestamp_millis");
/// assert_eq!(to_snake_case("int32"), "int_32");
/// assert_eq!(to_snake_case("Point"), "point");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if let Some(p) = prev {
            let boundary = if c.is_ascii_digit() {
                p.is_lowercase()
            } else if c.is_uppercase() {
                p.is_lowercase() || p.is_ascii_digit()
            } else {
                false
            };
            if boundary {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
        prev = Some(c);
    }
    out
}
