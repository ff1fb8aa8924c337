/// Parse a quantity input; anything but a non-negative integer is unknown
pub fn parse_quantity(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}
