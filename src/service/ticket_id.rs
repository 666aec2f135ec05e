//! Human-readable ticket identifier allocation.
//!
//! Identifiers look like `O01A07`: the kind prefix, the two-digit month, a letter
//! block and a two-digit sequence number. Each `(prefix, year, month)` has its own
//! cursor, so numbering restarts every month. Cursors live in memory only and reset
//! when the process restarts.

use std::{collections::HashMap, sync::Arc};

use chrono::{Datelike, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::model::ticket::TicketPrefix;

const MAX_SEQUENCE: u8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct AllocationKey {
    prefix: TicketPrefix,
    year: i32,
    month: u32,
}

/// Next identifier to hand out for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cursor {
    letter: String,
    number: u8,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            letter: "A".to_string(),
            number: 1,
        }
    }
}

impl Cursor {
    fn advance(&mut self) {
        if self.number >= MAX_SEQUENCE {
            self.number = 1;
            self.letter = next_letter(&self.letter);
        } else {
            self.number += 1;
        }
    }
}

/// Increments a letter block: `A → B`, `Z → AA`, `AZ → BA`, `ZZ → AAA`.
///
/// Past `Z` the block grows by one leading letter, which makes the identifier
/// longer than the usual six characters.
fn next_letter(letter: &str) -> String {
    let mut chars: Vec<char> = letter.chars().collect();

    for c in chars.iter_mut().rev() {
        if *c == 'Z' {
            *c = 'A';
        } else {
            *c = (*c as u8 + 1) as char;
            return chars.into_iter().collect();
        }
    }

    std::iter::once('A').chain(chars).collect()
}

/// Allocates sequential ticket identifiers.
///
/// Cheap to clone; clones share the same cursors.
#[derive(Debug, Clone, Default)]
pub struct TicketIdAllocator {
    cursors: Arc<Mutex<HashMap<AllocationKey, Cursor>>>,
}

impl TicketIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next identifier for `prefix` in the current UTC month.
    pub async fn allocate(&self, prefix: TicketPrefix) -> String {
        self.allocate_at(prefix, Utc::now().date_naive()).await
    }

    /// Allocates the next identifier for `prefix` in the month containing `date`.
    ///
    /// # Arguments
    /// - `prefix` - Ticket kind prefix
    /// - `date` - Date whose year and month select the cursor
    ///
    /// # Returns
    /// - `String` - Identifier such as `S03B12`, never returned twice for the same
    ///   prefix and month
    pub async fn allocate_at(&self, prefix: TicketPrefix, date: NaiveDate) -> String {
        let key = AllocationKey {
            prefix,
            year: date.year(),
            month: date.month(),
        };

        let mut cursors = self.cursors.lock().await;
        let cursor = cursors.entry(key).or_default();

        let id = format!(
            "{}{:02}{}{:02}",
            prefix.as_char(),
            key.month,
            cursor.letter,
            cursor.number
        );
        cursor.advance();

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 15).unwrap()
    }

    /// Tests the letter rollover after 99 allocations.
    ///
    /// Expected: calls 1-99 use letter A with numbers 01-99, call 100 is B01
    #[tokio::test]
    async fn wraps_sequence_into_next_letter() {
        let allocator = TicketIdAllocator::new();
        let mut ids = Vec::new();
        for _ in 0..150 {
            ids.push(allocator.allocate_at(TicketPrefix::Order, date(2025, 3)).await);
        }

        assert_eq!(ids[0], "O03A01");
        assert_eq!(ids[98], "O03A99");
        assert_eq!(ids[99], "O03B01");
        assert_eq!(ids[149], "O03B51");
        for (i, id) in ids.iter().take(99).enumerate() {
            assert_eq!(*id, format!("O03A{:02}", i + 1));
        }
    }

    /// Tests that allocations for one key are distinct and increasing.
    ///
    /// Expected: strictly increasing by (letter block length, letter block, number)
    #[tokio::test]
    async fn issues_distinct_increasing_ids() {
        let allocator = TicketIdAllocator::new();
        let mut previous: Option<(usize, String, u8)> = None;

        // 99 * 27 allocations run the letter block from A past Z into AA.
        for _ in 0..2700 {
            let id = allocator
                .allocate_at(TicketPrefix::Support, date(2025, 11))
                .await;
            let letter = id[3..id.len() - 2].to_string();
            let number: u8 = id[id.len() - 2..].parse().unwrap();
            let key = (letter.len(), letter, number);

            if let Some(prev) = &previous {
                assert!(*prev < key, "{:?} not after {:?}", key, prev);
            }
            previous = Some(key);
        }
        assert_eq!(previous.map(|(len, _, _)| len), Some(2));
    }

    /// Tests that prefixes and months have independent cursors.
    ///
    /// Expected: each key starts at A01
    #[tokio::test]
    async fn keeps_separate_cursors_per_key() {
        let allocator = TicketIdAllocator::new();

        assert_eq!(allocator.allocate_at(TicketPrefix::Order, date(2025, 1)).await, "O01A01");
        assert_eq!(allocator.allocate_at(TicketPrefix::Order, date(2025, 1)).await, "O01A02");
        assert_eq!(allocator.allocate_at(TicketPrefix::Report, date(2025, 1)).await, "R01A01");
        assert_eq!(allocator.allocate_at(TicketPrefix::Order, date(2025, 2)).await, "O02A01");
        assert_eq!(allocator.allocate_at(TicketPrefix::Order, date(2026, 1)).await, "O01A01");
    }

    /// Tests that clones share cursors and separate instances do not.
    #[tokio::test]
    async fn clones_share_state() {
        let allocator = TicketIdAllocator::new();
        let clone = allocator.clone();
        let other = TicketIdAllocator::new();

        allocator.allocate_at(TicketPrefix::Order, date(2025, 5)).await;
        assert_eq!(clone.allocate_at(TicketPrefix::Order, date(2025, 5)).await, "O05A02");
        assert_eq!(other.allocate_at(TicketPrefix::Order, date(2025, 5)).await, "O05A01");
    }

    #[test]
    fn grows_letter_block_past_z() {
        assert_eq!(next_letter("A"), "B");
        assert_eq!(next_letter("Z"), "AA");
        assert_eq!(next_letter("AZ"), "BA");
        assert_eq!(next_letter("ZZ"), "AAA");
    }
}
