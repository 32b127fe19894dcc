/// Split `path[:line]` into the path and a 0-based line
pub fn parse_location(location: &str) -> (String, Option<u32>) {
    if let Some(colon_pos) = location.rfind(':') {
        let path_part = &location[..colon_pos];
        let line_part = &location[colon_pos + 1..];

        // Check if it's a valid line number
        if let Ok(line_num) = line_part.parse::<u32>() {
            // Convert 1-based to 0-based
            (path_part.to_string(), Some(line_num.saturating_sub(1)))
        } else {
            // Not a valid line number, treat the whole thing as a path
            (location.to_string(), None)
        }
    } else {
        (location.to_string(), None)
    }
}
