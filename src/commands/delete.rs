//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::error::{Error, ErrorType, IntoResult};
use crate::{Config, Result};
use tracing::debug;

/// Deletes every expense with the given ID.
///
/// When nothing matches, the store is left untouched (it is not rewritten) and the message says
/// so. This is not an error.
///
/// # Errors
///
/// - `ErrorType::InvalidId` if the ID is not an integer.
/// - `ErrorType::Store` if the collection cannot be saved.
pub fn delete(config: &Config, args: DeleteArgs) -> Result<Out<i64>> {
    let id: i64 = args.id.trim().parse().map_err(|_| {
        Error::msg(ErrorType::InvalidId, format!("Invalid ID '{}'", args.id.trim()))
    })?;

    let store = config.store();
    let mut expenses = store.load();
    let removed = expenses.remove_id(id);
    if removed == 0 {
        return Ok("ID not found.".into());
    }
    debug!("Removed {removed} expense(s) with ID {id}");

    store.save(&expenses).pub_result(ErrorType::Store)?;
    Ok(Out::new("Deleted successfully!", id))
}
