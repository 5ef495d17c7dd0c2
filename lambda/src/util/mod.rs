/// Reads an integer query parameter, treating anything unparsable as absent.
pub(crate) fn parse_lenient_i32(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}
