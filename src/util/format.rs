// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// Formats a duration in seconds into the catalog's `minutes:seconds` text.
///
/// Minutes are the floor division of the total, seconds the remainder. The
/// seconds part is deliberately not zero-padded: this is the form the remote
/// catalog service stores and returns (125 seconds is `"2:5"`), and changing
/// it here would make imported records disagree with existing ones.
pub fn format_runtime(total_seconds: u64) -> String {
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{}:{}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_floor_and_remainder() {
        assert_eq!(format_runtime(125), "2:5");
    }

    #[test]
    fn formats_exact_minute() {
        assert_eq!(format_runtime(60), "1:0");
    }

    #[test]
    fn formats_sub_minute() {
        assert_eq!(format_runtime(59), "0:59");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_runtime(0), "0:0");
    }
}
