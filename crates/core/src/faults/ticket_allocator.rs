//! Sequential ticket IDs (`ID-00001`, `ID-00002`, ...).
//!
//! The next ID is one past the largest number found in any ticket table, so
//! it is unique as long as allocation and the append that uses it are not
//! interleaved with another allocation. `TicketAllocator::lock` provides that.

use log::debug;
use tokio::sync::{Mutex, MutexGuard};

use crate::constants::{TICKET_ID_PREFIX, TICKET_ID_WIDTH};
use crate::errors::Result;
use crate::store::InventoryTables;

/// The first run of ASCII digits in `id`, if any.
pub fn leading_number(id: &str) -> Option<u64> {
    let start = id.find(|c: char| c.is_ascii_digit())?;
    let digits: String = id[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

pub fn format_ticket_id(number: u64) -> String {
    format!("{}{:0width$}", TICKET_ID_PREFIX, number, width = TICKET_ID_WIDTH)
}

/// One past the highest numbered ID, or `ID-00001` when none are numbered.
pub fn next_ticket_id<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing.into_iter().filter_map(leading_number).max();
    format_ticket_id(max.map_or(1, |n| n.saturating_add(1)))
}

pub struct TicketAllocator {
    tables: InventoryTables,
    lock: Mutex<()>,
}

impl TicketAllocator {
    pub fn new(tables: InventoryTables) -> Self {
        Self {
            tables,
            lock: Mutex::new(()),
        }
    }

    /// Serialise allocation. Hold the guard until the new ticket row is written.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    /// Scan the active, archive and journal tables and return the next free ID.
    pub async fn next_ticket_id(&self) -> Result<String> {
        let ids = self.tables.all_ticket_ids().await?;
        let next = next_ticket_id(ids.iter().map(String::as_str));
        debug!("Allocated ticket {} after scanning {} id(s)", next, ids.len());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tables_start_at_one() {
        assert_eq!(next_ticket_id(Vec::<&str>::new()), "ID-00001");
        assert_eq!(next_ticket_id(["", "FLT-ABCD"]), "ID-00001");
    }

    #[test]
    fn increments_past_the_highest_number_in_any_table() {
        let ids = ["ID-00003", "ID-00012", "ID-00004", "legacy"];
        assert_eq!(next_ticket_id(ids), "ID-00013");
    }

    #[test]
    fn uses_the_first_digit_run_only() {
        assert_eq!(leading_number("ID-00042-B7"), Some(42));
        assert_eq!(leading_number("T9"), Some(9));
        assert_eq!(leading_number("ID-"), None);
    }

    #[test]
    fn widens_past_five_digits() {
        assert_eq!(next_ticket_id(["ID-99999"]), "ID-100000");
    }

    #[test]
    fn ignores_numbers_too_large_to_parse() {
        assert_eq!(
            next_ticket_id(["ID-99999999999999999999999", "ID-00002"]),
            "ID-00003"
        );
    }
}
