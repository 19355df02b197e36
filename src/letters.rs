use crate::DriveLetter;

/// Free drive letters for a given OS bitmask of mounted volumes, ordered Z
/// down to A.
///
/// Bit `i` of `mask` set means letter A+`i` is in use, whether by a local
/// volume or an existing network mapping. Late letters come first so that new
/// mappings stay clear of the conventional early local-volume letters (C:,
/// D:, E:). An all-ones mask yields an empty list, which callers treat as "no
/// free letters" rather than an error.
pub fn free_letters(mask: u32) -> Vec<DriveLetter> {
    (0..26u8)
        .rev()
        .filter(|i| mask & (1 << i) == 0)
        .filter_map(DriveLetter::from_index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_of(used: &str) -> u32 {
        used.chars()
            .map(|c| 1 << (c as u8 - b'A'))
            .fold(0, |acc, bit| acc | bit)
    }

    #[test]
    fn all_free_starts_at_z() {
        let free = free_letters(0);
        assert_eq!(free.len(), 26);
        assert_eq!(free[0], DriveLetter::new('Z').unwrap());
        assert_eq!(free[25], DriveLetter::new('A').unwrap());
    }

    #[test]
    fn used_letters_are_skipped_in_descending_order() {
        let free = free_letters(mask_of("ACD"));
        assert_eq!(free.len(), 23);
        assert_eq!(free[0], DriveLetter::new('Z').unwrap());
        assert_eq!(free[22], DriveLetter::new('B').unwrap());
        assert!(free.windows(2).all(|pair| pair[0] > pair[1]));
        assert!(!free.contains(&DriveLetter::new('A').unwrap()));
        assert!(!free.contains(&DriveLetter::new('C').unwrap()));
        assert!(!free.contains(&DriveLetter::new('D').unwrap()));
    }

    #[test]
    fn fully_mounted_system_has_no_free_letters() {
        assert!(free_letters(0x03FF_FFFF).is_empty());
        assert!(free_letters(u32::MAX).is_empty());
    }

    #[test]
    fn bits_above_the_alphabet_are_ignored() {
        assert_eq!(free_letters(!0x03FF_FFFF).len(), 26);
    }
}
