//! Reply selection: keyword table, random sources, selector.

pub mod defaults;
pub mod random;
pub mod selector;
pub mod table;

pub use defaults::default_table;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use selector::select_reply;
pub use table::{ReplyRule, ReplyTable, ReplyTableBuilder};

use crate::config::BotConfig;

/// The table `config` asks for: the JSON file at `reply_table_path` if set,
/// otherwise the built-in one. Either way it is validated before returning.
pub fn load_table(config: &BotConfig) -> crate::error::Result<ReplyTable> {
    let table = match config.reply_table_path.as_deref() {
        Some(path) => ReplyTable::from_json_file(path)?,
        None => default_table()?,
    };
    Ok(table)
}
