// Message output formatting.

use crate::constants::GROUP_SIZE;

/// Split `msg` into space-separated groups of `size` symbols; the final
/// group may be shorter. A `size` of 0 returns `msg` unchanged.
pub fn group(msg: &str, size: usize) -> String {
    if size == 0 {
        return msg.to_string();
    }
    let chars: Vec<char> = msg.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`group`] with the conventional five-symbol width.
pub fn group_fives(msg: &str) -> String {
    group(msg, GROUP_SIZE)
}
