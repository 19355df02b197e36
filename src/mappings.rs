use crate::DriveLetter;

/// Searches an OS mapping report for `server_share` and returns the drive
/// letter of the first line naming it.
///
/// The report is untrusted free text, one active mapping per line in OS
/// report order. Matching is a case-sensitive substring test; the letter is
/// the first whitespace-delimited `X:` token on the matching line. A line
/// that names the share but carries no such token is skipped and the scan
/// continues, so duplicate or malformed lines degrade gracefully instead of
/// failing the lookup.
pub fn find_mapping(server_share: &str, report: &str) -> Option<DriveLetter> {
    report
        .lines()
        .filter(|line| line.contains(server_share))
        .find_map(|line| line.split_whitespace().find_map(DriveLetter::from_token))
}
