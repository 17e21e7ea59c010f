//! One-shot selection flow
//!
//! Read-only consumer of the history store: snapshot, present a menu,
//! delegate the chosen item to the paste service. A failure here aborts this
//! invocation only; history is never mutated.

mod menu;
mod paste;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryStore;

pub use menu::present;
pub use paste::paste_item;

pub fn run(store: &HistoryStore, config: &Config) -> Result<()> {
    let items = store.snapshot();
    if items.is_empty() {
        info!("History is empty, nothing to show");
        return Ok(());
    }

    let Some(index) = menu::present(&items, config.rofi_theme.as_deref())? else {
        info!("No selection made");
        return Ok(());
    };

    paste::paste_item(&items[index])
}
